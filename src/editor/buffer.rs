//! A single growable text blob with a cursor.
//!
//! The cursor is a byte offset that always sits on a char boundary.
//! Columns are counted in chars from the start of the line; visual x
//! offsets and wrap widths are in terminal cells.

use std::ops::Range;

use unicode_width::UnicodeWidthChar;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    text: String,
    cursor: usize,
    /// Sticky column for consecutive vertical moves.
    desired_x: Option<usize>,
}

impl TextBuffer {
    /// Buffer with the cursor at the end of `text`.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.len();
        Self { text, cursor, desired_x: None }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Place the cursor, snapping back to the nearest char boundary.
    pub fn set_cursor(&mut self, pos: usize) {
        let mut pos = pos.min(self.text.len());
        while !self.text.is_char_boundary(pos) {
            pos -= 1;
        }
        self.cursor = pos;
        self.desired_x = None;
    }

    /// Replace the whole text and cursor in one step.
    pub fn set(&mut self, text: String, cursor: usize) {
        self.text = text;
        self.set_cursor(cursor);
    }

    pub fn insert_str(&mut self, s: &str) {
        self.text.insert_str(self.cursor, s);
        self.cursor += s.len();
        self.desired_x = None;
    }

    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
        self.desired_x = None;
    }

    /// Delete the char before the cursor. False at the start of the text.
    pub fn delete_before(&mut self) -> bool {
        self.desired_x = None;
        match self.text[..self.cursor].chars().next_back() {
            Some(c) => {
                self.cursor -= c.len_utf8();
                self.text.remove(self.cursor);
                true
            }
            None => false,
        }
    }

    /// Delete the char under the cursor. False at the end of the text.
    pub fn delete_after(&mut self) -> bool {
        self.desired_x = None;
        if self.cursor < self.text.len() {
            self.text.remove(self.cursor);
            true
        } else {
            false
        }
    }

    pub fn move_left(&mut self) {
        if let Some(c) = self.text[..self.cursor].chars().next_back() {
            self.cursor -= c.len_utf8();
        }
        self.desired_x = None;
    }

    pub fn move_right(&mut self) {
        if let Some(c) = self.text[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
        self.desired_x = None;
    }

    pub fn move_home(&mut self) {
        self.cursor = self.line_start();
        self.desired_x = None;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.line_end();
        self.desired_x = None;
    }

    pub fn move_to_text_end(&mut self) {
        self.cursor = self.text.len();
        self.desired_x = None;
    }

    /// Byte offset where the cursor's line begins.
    pub fn line_start(&self) -> usize {
        self.text[..self.cursor].rfind('\n').map_or(0, |i| i + 1)
    }

    /// Byte offset of the cursor line's newline, or the end of the text.
    pub fn line_end(&self) -> usize {
        self.text[self.cursor..]
            .find('\n')
            .map_or(self.text.len(), |i| self.cursor + i)
    }

    pub fn line_range(&self) -> Range<usize> {
        self.line_start()..self.line_end()
    }

    pub fn current_line(&self) -> &str {
        &self.text[self.line_range()]
    }

    /// Zero-based index of the cursor's line.
    pub fn line_index(&self) -> usize {
        self.text[..self.cursor].matches('\n').count()
    }

    pub fn is_last_line(&self) -> bool {
        !self.text[self.cursor..].contains('\n')
    }

    /// Cursor column in chars.
    pub fn column(&self) -> usize {
        self.text[self.line_start()..self.cursor].chars().count()
    }

    /// Swap the cursor's line for `line` and put the cursor at char column
    /// `col` of the new line.
    pub fn replace_current_line(&mut self, line: &str, col: usize) {
        let range = self.line_range();
        let start = range.start;
        self.text.replace_range(range, line);
        self.cursor = start + byte_offset(line, col);
        self.desired_x = None;
    }

    /// Move to the previous visual row. Rows are at most `width` cells wide
    /// when wrapping is on, otherwise each logical line is one row.
    pub fn move_up(&mut self, width: Option<usize>) {
        let (row, x) = self.visual_position(width);
        let x = *self.desired_x.get_or_insert(x);
        let start = self.line_start();
        if row > 0 {
            let line = self.current_line();
            let col = target_col(line, row - 1, x, width);
            self.cursor = start + byte_offset(line, col);
        } else if start > 0 {
            let prev_start = self.text[..start - 1].rfind('\n').map_or(0, |i| i + 1);
            let prev = &self.text[prev_start..start - 1];
            let last_row = row_count(prev, width) - 1;
            let col = target_col(prev, last_row, x, width);
            self.cursor = prev_start + byte_offset(prev, col);
        }
    }

    /// Move to the next visual row. Returns false when already on the last
    /// row of the text.
    pub fn move_down(&mut self, width: Option<usize>) -> bool {
        let (row, x) = self.visual_position(width);
        let line = self.current_line();
        let rows = row_count(line, width);
        let start = self.line_start();
        if row + 1 < rows {
            let x = *self.desired_x.get_or_insert(x);
            let line = self.current_line();
            let col = target_col(line, row + 1, x, width);
            self.cursor = start + byte_offset(line, col);
            return true;
        }
        let end = self.line_end();
        if end >= self.text.len() {
            return false;
        }
        let x = *self.desired_x.get_or_insert(x);
        let next_start = end + 1;
        let next_end = self.text[next_start..]
            .find('\n')
            .map_or(self.text.len(), |i| next_start + i);
        let next = &self.text[next_start..next_end];
        let col = target_col(next, 0, x, width);
        self.cursor = next_start + byte_offset(next, col);
        true
    }

    /// Visual row within the current line and x offset, in cells, within
    /// that row.
    pub fn visual_position(&self, width: Option<usize>) -> (usize, usize) {
        let line = self.current_line();
        let col = self.column();
        let rows = wrap_line(line, width);
        let row = rows.iter().rposition(|r| r.start <= col).unwrap_or(0);
        let x = line
            .chars()
            .skip(rows[row].start)
            .take(col - rows[row].start)
            .map(cell_width)
            .sum();
        (row, x)
    }
}

fn cell_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

/// Char column ranges of the visual rows `line` wraps into. A row never
/// exceeds `width` cells unless it holds a single wider char.
pub fn wrap_line(line: &str, width: Option<usize>) -> Vec<Range<usize>> {
    let Some(width) = width.filter(|w| *w > 0) else {
        return vec![0..line.chars().count()];
    };
    let mut rows = Vec::new();
    let mut start = 0;
    let mut used = 0;
    let mut len = 0;
    for (i, c) in line.chars().enumerate() {
        let w = cell_width(c);
        if used > 0 && used + w > width {
            rows.push(start..i);
            start = i;
            used = 0;
        }
        used += w;
        len = i + 1;
    }
    rows.push(start..len);
    rows
}

/// Number of visual rows a line occupies.
pub fn row_count(line: &str, width: Option<usize>) -> usize {
    wrap_line(line, width).len()
}

/// Char column on visual `row` closest to cell offset `x` without passing
/// it. Rows other than the last stop before their final boundary, which
/// belongs to the next row.
fn target_col(line: &str, row: usize, x: usize, width: Option<usize>) -> usize {
    let rows = wrap_line(line, width);
    let last = rows.len() - 1;
    let range = rows[row.min(last)].clone();
    let mut col = range.start;
    let mut used = 0;
    for c in line.chars().skip(range.start).take(range.len()) {
        let w = cell_width(c);
        if used + w > x {
            break;
        }
        used += w;
        col += 1;
    }
    if row < last && col == range.end && range.end > range.start {
        col -= 1;
    }
    col
}

/// Byte offset of char column `col` in `s`, clamped to its length.
pub fn byte_offset(s: &str, col: usize) -> usize {
    s.char_indices().nth(col).map_or(s.len(), |(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_puts_cursor_at_end() {
        let buf = TextBuffer::new("• a\n• b");
        assert_eq!(buf.cursor(), buf.text().len());
        assert_eq!(buf.line_index(), 1);
        assert_eq!(buf.column(), 3);
    }

    #[test]
    fn insert_and_delete_respect_multibyte_chars() {
        let mut buf = TextBuffer::new("• ");
        buf.insert_char('é');
        assert_eq!(buf.text(), "• é");
        assert!(buf.delete_before());
        assert!(buf.delete_before());
        assert_eq!(buf.text(), "•");
        buf.move_left();
        assert_eq!(buf.cursor(), 0);
        assert!(!buf.delete_before());
        assert!(buf.delete_after());
        assert_eq!(buf.text(), "");
    }

    #[test]
    fn set_cursor_snaps_to_char_boundary() {
        let mut buf = TextBuffer::new("•x");
        buf.set_cursor(1);
        assert_eq!(buf.cursor(), 0);
    }

    #[test]
    fn line_queries() {
        let mut buf = TextBuffer::new("• one\n  ◦ two\n• three");
        buf.set_cursor(10);
        assert_eq!(buf.current_line(), "  ◦ two");
        assert_eq!(buf.line_index(), 1);
        assert!(!buf.is_last_line());
        buf.move_end();
        assert_eq!(buf.column(), 7);
        buf.move_home();
        assert_eq!(buf.column(), 0);
    }

    #[test]
    fn replace_current_line_places_cursor_by_column() {
        let mut buf = TextBuffer::new("• a\n• b");
        buf.replace_current_line("  ◦ b", 4);
        assert_eq!(buf.text(), "• a\n  ◦ b");
        assert_eq!(buf.column(), 4);
    }

    #[test]
    fn vertical_moves_keep_sticky_column() {
        let mut buf = TextBuffer::new("• long line\n• x\n• another");
        buf.set_cursor(0);
        buf.move_end();
        assert!(buf.move_down(None));
        assert_eq!(buf.column(), 3);
        assert!(buf.move_down(None));
        assert_eq!(buf.column(), 9);
        assert!(!buf.move_down(None));
        buf.move_up(None);
        buf.move_up(None);
        assert_eq!(buf.line_index(), 0);
        assert_eq!(buf.column(), 11);
    }

    #[test]
    fn vertical_moves_follow_wrapped_rows() {
        // 12 chars at width 5: rows "• abc", "defgh", "ij"
        let mut buf = TextBuffer::new("• abcdefghij\n• k");
        buf.set_cursor(0);
        buf.move_right();
        assert!(buf.move_down(Some(5)));
        assert_eq!(buf.line_index(), 0);
        assert_eq!(buf.column(), 6);
        assert!(buf.move_down(Some(5)));
        assert_eq!(buf.column(), 11);
        assert!(buf.move_down(Some(5)));
        assert_eq!(buf.line_index(), 1);
        assert_eq!(buf.column(), 1);
        buf.move_up(Some(5));
        assert_eq!(buf.line_index(), 0);
        assert_eq!(buf.column(), 11);
    }

    #[test]
    fn wide_chars_wrap_by_cell_width() {
        let rows = wrap_line("• 日本語日本", Some(6));
        assert_eq!(rows, vec![0..4, 4..7]);
        assert_eq!(row_count("• 日本語日本", Some(6)), 2);
        assert_eq!(wrap_line("", Some(6)), vec![0..0]);
    }

    #[test]
    fn visual_position_counts_cells() {
        let mut buf = TextBuffer::new("• 日本語日本");
        assert_eq!(buf.visual_position(Some(6)), (1, 6));
        buf.set_cursor("• 日".len());
        assert_eq!(buf.visual_position(Some(6)), (0, 4));
        assert_eq!(buf.visual_position(None), (0, 4));
    }

    #[test]
    fn vertical_moves_across_wide_rows() {
        // rows at width 6: "• 日本" and "語日本"
        let mut buf = TextBuffer::new("• 日本語日本\n• ab");
        buf.set_cursor("• 日".len());
        assert!(buf.move_down(Some(6)));
        assert_eq!(buf.line_index(), 0);
        assert_eq!(buf.column(), 6);
        assert!(buf.move_down(Some(6)));
        assert_eq!(buf.line_index(), 1);
        assert_eq!(buf.column(), 4);
        buf.move_up(Some(6));
        assert_eq!(buf.line_index(), 0);
        assert_eq!(buf.column(), 6);
    }
}
