use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::session::Action;

/// Translate a terminal key event into an editor action. Key releases
/// yield `None`; keys without a binding map to [`Action::Ignore`].
pub fn action_for(key: KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    let action = match key.code {
        KeyCode::Char(c) if ctrl => match c.to_ascii_lowercase() {
            's' => Action::Save,
            'x' => Action::Cancel,
            'n' => Action::CycleNext,
            'p' => Action::CyclePrev,
            'c' | 'd' => Action::Interrupt,
            _ => Action::Ignore,
        },
        KeyCode::Char(_) if key.modifiers.contains(KeyModifiers::ALT) => {
            Action::Ignore
        }
        KeyCode::Char(c) => Action::Insert(c),
        KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => {
            Action::Outdent
        }
        KeyCode::Tab => Action::Indent,
        KeyCode::BackTab => Action::Outdent,
        KeyCode::Enter => Action::Confirm,
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Delete => Action::Delete,
        KeyCode::Left => Action::Left,
        KeyCode::Right => Action::Right,
        KeyCode::Home => Action::Home,
        KeyCode::End => Action::End,
        KeyCode::Up => Action::Up,
        KeyCode::Down => Action::Down,
        KeyCode::Esc => Action::Cancel,
        _ => Action::Ignore,
    };
    Some(action)
}
