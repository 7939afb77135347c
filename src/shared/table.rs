//! Table and text layout helpers used by the CLI.
//! Keeps ANSI-aware width calculations and simple table rendering in one place.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
    Center,
}

/// One column: its header, alignment and an optional width cap.
#[derive(Debug, Clone)]
pub struct Column {
    pub header: String,
    pub align: Align,
    pub max_width: Option<usize>,
}

impl Column {
    pub fn new(header: &str) -> Self {
        Self { header: header.to_string(), align: Align::Left, max_width: None }
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn max_width(mut self, width: usize) -> Self {
        self.max_width = Some(width);
        self
    }
}

/// A cell's plain text and the (possibly colored) text to print.
#[derive(Debug, Clone)]
pub struct Cell {
    pub plain: String,
    pub display: String,
}

impl Cell {
    pub fn plain(text: impl Into<String>) -> Self {
        let text = text.into();
        Self { display: text.clone(), plain: text }
    }

    /// `style` is applied after truncation so escapes never get cut.
    pub fn styled(text: impl Into<String>, style: impl Fn(&str) -> String) -> Self {
        let plain = text.into();
        Self { display: style(&plain), plain }
    }
}

/// Render a simple text table. Column widths are auto-computed from the widest
/// cell (header or row), capped by each column's `max_width`. Cells over the
/// cap are cut with an ellipsis.
pub fn render_table(columns: &[Column], rows: &[Vec<Cell>]) -> String {
    if columns.is_empty() {
        return String::new();
    }
    let mut widths: Vec<usize> =
        columns.iter().map(|c| display_len(&c.header)).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(columns.len()) {
            widths[i] = widths[i].max(cell.plain.chars().count());
        }
    }
    for (w, col) in widths.iter_mut().zip(columns) {
        if let Some(cap) = col.max_width {
            *w = (*w).min(cap.max(display_len(&col.header)));
        }
    }

    let headers: Vec<String> = columns.iter().map(|c| c.header.clone()).collect();
    let header_line = format_row(
        &headers,
        &headers.iter().map(|h| display_len(h)).collect::<Vec<_>>(),
        columns,
        &widths,
    );
    let mut out = String::new();
    out.push_str(&header_line);
    out.push('\n');
    out.push_str(&"=".repeat(display_len(&header_line)));

    for row in rows {
        let mut texts = Vec::new();
        let mut lens = Vec::new();
        for (cell, width) in row.iter().zip(&widths) {
            if cell.plain.chars().count() > *width {
                let cut = truncate_with_ellipsis(&cell.plain, *width);
                lens.push(cut.chars().count());
                texts.push(cut);
            } else {
                lens.push(cell.plain.chars().count());
                texts.push(cell.display.clone());
            }
        }
        out.push('\n');
        out.push_str(&format_row(&texts, &lens, columns, &widths));
    }
    out
}

fn format_row(
    cells: &[String],
    lens: &[usize],
    columns: &[Column],
    widths: &[usize],
) -> String {
    let mut parts: Vec<String> = Vec::new();
    for (((cell, len), col), width) in
        cells.iter().zip(lens).zip(columns).zip(widths)
    {
        parts.push(align_field(cell, *width, *len, col.align));
    }
    parts.join(" | ").trim_end().to_string()
}

fn align_field(display: &str, target: usize, plain_len: usize, align: Align) -> String {
    let padding = target.saturating_sub(plain_len);
    match align {
        Align::Left => pad_field(display, target, plain_len),
        Align::Right => format!("{}{}", " ".repeat(padding), display),
        Align::Center => {
            let left = padding / 2;
            format!("{}{}{}", " ".repeat(left), display, " ".repeat(padding - left))
        }
    }
}

/// Right-pad a field based on visible length (ignoring ANSI codes).
pub fn pad_field(display: &str, target: usize, plain_len: usize) -> String {
    let mut out = display.to_string();
    let padding = target.saturating_sub(plain_len);
    out.push_str(&" ".repeat(padding));
    out
}

/// Truncate text to a width, appending an ellipsis when needed.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    let len = text.chars().count();
    if len <= max_width {
        return text.to_string();
    }
    if max_width == 1 {
        return "…".to_string();
    }
    let mut out =
        text.chars().take(max_width.saturating_sub(1)).collect::<String>();
    out.push('…');
    out
}

/// Compute visible length of a string, ignoring ANSI escape sequences.
pub fn display_len(s: &str) -> usize {
    let mut len = 0;
    let mut chars = s.chars();
    while let Some(ch) = chars.next() {
        if ch == '\x1b' {
            for next in chars.by_ref() {
                if next == 'm' {
                    break;
                }
            }
            continue;
        }
        len += 1;
    }
    len
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_with_ellipsis() {
        assert_eq!(truncate_with_ellipsis("health, work", 8), "health,…");
        assert_eq!(truncate_with_ellipsis("short", 8), "short");
        assert_eq!(truncate_with_ellipsis("abc", 1), "…");
    }

    #[test]
    fn test_display_len_ignores_ansi() {
        assert_eq!(display_len("\x1b[1;31mred\x1b[0m"), 3);
    }

    #[test]
    fn test_render_table_alignment_and_cap() {
        let columns = [
            Column::new("ID").align(Align::Right),
            Column::new("Tags").max_width(6),
        ];
        let rows = vec![
            vec![Cell::plain("1"), Cell::plain("health, work")],
            vec![Cell::plain("10"), Cell::plain("")],
        ];
        let out = render_table(&columns, &rows);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "ID | Tags");
        assert_eq!(lines[2], " 1 | healt…");
        assert_eq!(lines[3], "10 |");
    }

    #[test]
    fn test_styled_cell_keeps_plain_width() {
        let cell = Cell::styled("True", |s| format!("\x1b[32m{s}\x1b[0m"));
        assert_eq!(cell.plain, "True");
        assert_eq!(display_len(&cell.display), 4);
    }
}
