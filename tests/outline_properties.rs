use braindump::editor::{Action, EditSession};
use braindump::outline::{
    BulletLine, MAX_LEVEL, SaveDecision, decide_save, decode, encode,
    normalize_for_display,
};
use proptest::prelude::*;

const FRONTMATTER: &str = "---\ndate: 2026-01-05\nsynthesised: false\n---";

fn bullet_line() -> impl Strategy<Value = String> {
    (1..=MAX_LEVEL, "[a-z]([a-z ]{0,8}[a-z])?").prop_map(|(level, text)| {
        format!("{}- {text}", "  ".repeat(level - 1))
    })
}

fn action() -> impl Strategy<Value = Action> {
    prop::sample::select(vec![
        Action::Indent,
        Action::Outdent,
        Action::Insert('a'),
        Action::Confirm,
        Action::Up,
        Action::Down,
        Action::Home,
        Action::End,
    ])
}

fn split(text: &str) -> Vec<String> {
    text.split('\n').map(str::to_string).collect()
}

proptest! {
    #[test]
    fn display_normalisation_is_idempotent(
        lines in prop::collection::vec(bullet_line(), 1..12),
    ) {
        let once = normalize_for_display(&lines);
        let twice = normalize_for_display(&split(&once));
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn encoded_body_decodes_to_same_lines(
        lines in prop::collection::vec(bullet_line(), 1..12),
    ) {
        let doc = decode(&encode(FRONTMATTER, &lines));
        prop_assert!(doc.has_frontmatter());
        prop_assert_eq!(doc.body_lines, lines);
    }

    #[test]
    fn saving_untouched_buffer_skips_write(
        lines in prop::collection::vec(bullet_line(), 1..12),
    ) {
        let doc = decode(&encode(FRONTMATTER, &lines));
        let shown = normalize_for_display(&doc.body_lines);
        prop_assert_eq!(decide_save(&doc, &shown), SaveDecision::Skip);
    }

    #[test]
    fn levels_stay_within_bounds(
        actions in prop::collection::vec(action(), 0..60),
    ) {
        let mut session = EditSession::new("• start");
        for a in actions {
            session.handle(a);
        }
        for line in session.text().split('\n') {
            let level = BulletLine::parse(line).level();
            prop_assert!((1..=MAX_LEVEL).contains(&level), "line {:?}", line);
        }
    }
}
