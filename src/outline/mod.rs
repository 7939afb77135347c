//! Bullet glyphs and line scanning shared by the outline editor and the
//! document codec.
//!
//! A bullet line is `"  " * (level - 1)` followed by a marker character and
//! a single space. The marker is one of the five level glyphs, or a plain
//! markdown hyphen for files written by other tools.

pub mod codec;

pub use codec::{
    Document, SaveDecision, clean_lines, decide_save, decode, encode,
    is_unchanged, normalize_for_display,
};

pub const MAX_LEVEL: usize = 5;
pub const INDENT: &str = "  ";

/// Level glyphs, index 0 is level 1.
pub const GLYPHS: [char; MAX_LEVEL] = [
    '\u{2022}', // •
    '\u{25E6}', // ◦
    '\u{2023}', // ‣
    '\u{2043}', // ⁃
    '\u{25AA}', // ▪
];

/// Canonical glyph for a level. Levels past the last glyph reuse it and
/// level 0 is treated as level 1.
pub fn glyph_for_level(level: usize) -> char {
    let idx = level.saturating_sub(1).min(GLYPHS.len() - 1);
    GLYPHS[idx]
}

/// Marker text (glyph plus trailing space) for a level.
pub fn marker_for_level(level: usize) -> String {
    format!("{} ", glyph_for_level(level))
}

/// Indentation plus marker for a level.
pub fn prefix_for_level(level: usize) -> String {
    format!("{}{}", INDENT.repeat(level.max(1) - 1), marker_for_level(level))
}

/// Level implied by a count of leading spaces.
pub fn level_for_spaces(spaces: usize) -> usize {
    spaces / INDENT.len() + 1
}

/// A line split into its indentation, optional marker and content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulletLine<'a> {
    pub spaces: usize,
    pub marker: Option<char>,
    pub content: &'a str,
}

impl<'a> BulletLine<'a> {
    /// Scan a line for a level glyph, falling back to `-`.
    pub fn parse(line: &'a str) -> Self {
        let rest = line.trim_start_matches(' ');
        let spaces = line.len() - rest.len();
        let mut chars = rest.chars();
        if let (Some(marker), Some(' ')) = (chars.next(), chars.next()) {
            if GLYPHS.contains(&marker) || marker == '-' {
                return Self {
                    spaces,
                    marker: Some(marker),
                    content: &rest[marker.len_utf8() + 1..],
                };
            }
        }
        Self { spaces, marker: None, content: rest }
    }

    pub fn level(&self) -> usize {
        level_for_spaces(self.spaces)
    }

    pub fn is_bullet(&self) -> bool {
        self.marker.is_some()
    }

    /// A marker followed by nothing but whitespace.
    pub fn is_empty_bullet(&self) -> bool {
        self.marker.is_some() && self.content.trim().is_empty()
    }

    /// Width in chars of indentation plus marker and its space.
    pub fn prefix_chars(&self) -> usize {
        self.spaces + if self.marker.is_some() { 2 } else { 0 }
    }

    /// Rebuild the line with the canonical marker for `level`, keeping the
    /// original indentation. Unmarked lines come back unchanged.
    pub fn with_canonical_marker(&self, level: usize) -> String {
        match self.marker {
            Some(_) => format!(
                "{}{}{}",
                " ".repeat(self.spaces),
                marker_for_level(level),
                self.content
            ),
            None => format!("{}{}", " ".repeat(self.spaces), self.content),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyph_lookup_is_clamped() {
        assert_eq!(glyph_for_level(1), '•');
        assert_eq!(glyph_for_level(2), '◦');
        assert_eq!(glyph_for_level(5), '▪');
        assert_eq!(glyph_for_level(9), '▪');
        assert_eq!(glyph_for_level(0), '•');
    }

    #[test]
    fn prefix_matches_indentation() {
        assert_eq!(prefix_for_level(1), "• ");
        assert_eq!(prefix_for_level(3), "    ‣ ");
    }

    #[test]
    fn parse_recognizes_glyphs_and_hyphen() {
        let line = BulletLine::parse("  ◦ nested");
        assert_eq!(line.spaces, 2);
        assert_eq!(line.marker, Some('◦'));
        assert_eq!(line.content, "nested");
        assert_eq!(line.level(), 2);
        assert_eq!(line.prefix_chars(), 4);

        let hyphen = BulletLine::parse("- item");
        assert_eq!(hyphen.marker, Some('-'));
    }

    #[test]
    fn marker_needs_trailing_space() {
        let line = BulletLine::parse("•no space");
        assert!(!line.is_bullet());
        assert_eq!(line.content, "•no space");
        assert!(BulletLine::parse("• ").is_empty_bullet());
        assert!(!BulletLine::parse("plain").is_empty_bullet());
    }

    #[test]
    fn canonical_marker_keeps_spaces() {
        let line = BulletLine::parse("   - odd indent");
        assert_eq!(line.with_canonical_marker(line.level()), "   ◦ odd indent");
    }
}
