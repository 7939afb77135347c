//! Conversion between an entry file on disk and the text the outline editor
//! works on.

use super::{BulletLine, GLYPHS, marker_for_level};
use crate::frontmatter::split_frontmatter;

/// An entry file split into its verbatim frontmatter block and body lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// Everything from the opening `---` through the closing `---`, or empty.
    pub frontmatter_raw: String,
    pub body_lines: Vec<String>,
}

impl Document {
    pub fn has_frontmatter(&self) -> bool {
        !self.frontmatter_raw.is_empty()
    }

    /// Body lines with anything left after trimming.
    pub fn has_content(&self) -> bool {
        self.body_lines.iter().any(|l| !l.trim().is_empty())
    }

    pub fn encode(&self, lines: &[String]) -> String {
        encode(&self.frontmatter_raw, lines)
    }
}

/// What to do with the file once a session ends in a save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveDecision {
    Write(String),
    Skip,
    Delete,
}

pub fn decode(raw: &str) -> Document {
    let (frontmatter_raw, body) = match split_frontmatter(raw) {
        Some(parts) => (parts.block.to_string(), parts.rest),
        None => (String::new(), raw),
    };
    let body = body.trim_start_matches(['\n', '\r']).trim_end();
    let body_lines = if body.is_empty() {
        Vec::new()
    } else {
        body.split('\n')
            .map(|l| l.trim_end_matches('\r').to_string())
            .collect()
    };
    Document { frontmatter_raw, body_lines }
}

/// Rewrite every recognised marker to the glyph for its line's level.
/// An empty body seeds a single level-1 bullet.
pub fn normalize_for_display(lines: &[String]) -> String {
    let text = lines
        .iter()
        .map(|line| {
            let bullet = BulletLine::parse(line);
            bullet.with_canonical_marker(bullet.level())
        })
        .collect::<Vec<_>>()
        .join("\n");
    if text.trim().is_empty() { marker_for_level(1) } else { text }
}

pub fn encode(frontmatter_raw: &str, lines: &[String]) -> String {
    let body = lines
        .iter()
        .filter(|l| !l.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join("\n");
    if frontmatter_raw.is_empty() {
        format!("{body}\n")
    } else {
        format!("{frontmatter_raw}\n\n{body}\n")
    }
}

/// Strip trailing whitespace, then drop blank lines and bare markers.
pub fn clean_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .filter(|line| {
            let rest = line.trim_start_matches(' ');
            let mut chars = rest.chars();
            !matches!(
                (chars.next(), chars.next()),
                (Some(c), None) if GLYPHS.contains(&c)
            )
        })
        .map(str::to_string)
        .collect()
}

/// Compare two line sets ignoring marker style and blank lines.
pub fn is_unchanged(edited: &[String], original: &[String]) -> bool {
    let canon = |lines: &[String]| -> Vec<String> {
        lines
            .iter()
            .map(|l| l.trim_end())
            .filter(|l| !l.is_empty())
            .map(|l| BulletLine::parse(l).with_canonical_marker(1))
            .collect()
    };
    canon(edited) == canon(original)
}

/// Decide how to persist the final buffer of a saved session.
pub fn decide_save(doc: &Document, buffer_text: &str) -> SaveDecision {
    let edited = clean_lines(buffer_text);
    if is_unchanged(&edited, &doc.body_lines) {
        if doc.has_content() {
            SaveDecision::Skip
        } else {
            SaveDecision::Delete
        }
    } else {
        SaveDecision::Write(doc.encode(&edited))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    const RAW: &str = "---\ndate: 2026-01-05\nsynthesised: false\n---\n\n- first\n  - nested\n";

    #[test]
    fn decode_splits_frontmatter_and_body() {
        let doc = decode(RAW);
        assert_eq!(
            doc.frontmatter_raw,
            "---\ndate: 2026-01-05\nsynthesised: false\n---"
        );
        assert_eq!(doc.body_lines, lines(&["- first", "  - nested"]));
    }

    #[test]
    fn decode_without_frontmatter_is_all_body() {
        let doc = decode("• one\n• two\n");
        assert!(doc.frontmatter_raw.is_empty());
        assert_eq!(doc.body_lines, lines(&["• one", "• two"]));
    }

    #[test]
    fn decode_unterminated_frontmatter_is_body() {
        let doc = decode("---\ndate: x\n- item\n");
        assert!(!doc.has_frontmatter());
        assert_eq!(doc.body_lines.len(), 3);
    }

    #[test]
    fn decode_ignores_dashes_inside_values() {
        let doc = decode("---\ntitle: a---b\n---\n\n• x\n");
        assert_eq!(doc.frontmatter_raw, "---\ntitle: a---b\n---");
        assert_eq!(doc.body_lines, lines(&["• x"]));
    }

    #[test]
    fn normalize_rewrites_markers_by_level() {
        let text = normalize_for_display(&lines(&[
            "- a",
            "  • b",
            "    ▪ c",
            "plain",
        ]));
        assert_eq!(text, "• a\n  ◦ b\n    ‣ c\nplain");
    }

    #[test]
    fn normalize_seeds_empty_body() {
        assert_eq!(normalize_for_display(&[]), "• ");
        assert_eq!(normalize_for_display(&lines(&["   "])), "• ");
    }

    #[test]
    fn encode_with_and_without_frontmatter() {
        let body = lines(&["• a", "  ◦ b"]);
        assert_eq!(encode("", &body), "• a\n  ◦ b\n");
        assert_eq!(encode("---\nk: v\n---", &body), "---\nk: v\n---\n\n• a\n  ◦ b\n");
    }

    #[test]
    fn clean_lines_drops_blank_and_bare_markers() {
        let cleaned = clean_lines("• keep  \n\n  ◦ \n• \n  text\n‣");
        assert_eq!(cleaned, lines(&["• keep", "  text"]));
    }

    #[test]
    fn hyphen_to_glyph_switch_is_unchanged() {
        let original = lines(&["- item", "  - sub"]);
        let edited = lines(&["• item", "  ◦ sub"]);
        assert!(is_unchanged(&edited, &original));
        assert!(!is_unchanged(&lines(&["• item!"]), &original[..1]));
    }

    #[test]
    fn decide_save_skip_delete_write() {
        let doc = decode("---\nk: v\n---\n\n- item\n");
        assert_eq!(decide_save(&doc, "• item"), SaveDecision::Skip);
        assert_eq!(
            decide_save(&doc, "• item\n• more\n• "),
            SaveDecision::Write("---\nk: v\n---\n\n• item\n• more\n".to_string())
        );

        let fresh = decode("---\nk: v\n---\n");
        assert_eq!(decide_save(&fresh, "• "), SaveDecision::Delete);
    }
}
