//! Full-screen host for an [`EditSession`]: header bar, wrapped body,
//! status bar. Owns raw mode and the alternate screen while it runs.

use std::io::{self, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event};
use crossterm::style::{
    Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor,
    SetForegroundColor,
};
use crossterm::terminal::{
    self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
    disable_raw_mode, enable_raw_mode,
};
use crossterm::{execute, queue};

use super::buffer::{row_count, wrap_line};
use super::keymap::action_for;
use super::session::{Action, EditSession};
use crate::formatting::FormatContext;

const SEPARATOR: char = '─';
const PENDING_HINT: &str = " Press Enter again to save and exit ";
const STATUS_BAR_BG: (u8, u8, u8) = (62, 62, 62);
const HEADER_FG: (u8, u8, u8) = (30, 30, 30);
/// Header, two separators and the status bar.
const CHROME_ROWS: u16 = 4;

/// Text drawn around the body.
#[derive(Debug, Clone)]
pub struct Chrome {
    pub header: String,
    pub status: String,
}

impl Chrome {
    pub fn new(header: impl Into<String>, can_cycle: bool) -> Self {
        Self { header: header.into(), status: status_line(can_cycle) }
    }
}

pub fn status_line(can_cycle: bool) -> String {
    if can_cycle {
        " Ctrl+S: Save  |  Ctrl+X/Esc: Cancel  |  Ctrl+N/P: Next/Prev  |  Tab: Indent "
            .to_string()
    } else {
        " Ctrl+S: Save  |  Ctrl+X/Esc: Cancel  |  Tab: Indent  |  Shift+Tab: Unindent "
            .to_string()
    }
}

struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
    }
}

/// Run the session until it terminates. A failed key read ends the
/// session as an interrupt.
pub fn run(
    session: &mut EditSession,
    chrome: &Chrome,
    ctx: &FormatContext,
) -> io::Result<()> {
    let _guard = TerminalGuard::enter()?;
    let mut out = io::stdout();
    let mut scroll = 0usize;

    while !session.is_terminated() {
        let (cols, rows) = terminal::size()?;
        let width = usize::from(cols.max(1));
        session.wrap_width = Some(width);
        draw(&mut out, session, chrome, ctx, width, rows, &mut scroll)?;

        match event::read() {
            Ok(Event::Key(key)) => {
                if let Some(action) = action_for(key) {
                    session.handle(action);
                }
            }
            Ok(_) => {}
            Err(err) => {
                tracing::warn!(%err, "reading key event failed");
                session.handle(Action::Interrupt);
            }
        }
    }
    Ok(())
}

fn draw(
    out: &mut impl Write,
    session: &EditSession,
    chrome: &Chrome,
    ctx: &FormatContext,
    width: usize,
    rows: u16,
    scroll: &mut usize,
) -> io::Result<()> {
    let body_height = usize::from(rows.saturating_sub(CHROME_ROWS).max(1));
    let visual = visual_rows(session.text(), width);
    let (cursor_row, cursor_x) = cursor_cell(session, width);
    *scroll = adjust_scroll(*scroll, cursor_row, body_height);

    queue!(out, Hide, MoveTo(0, 0), Clear(ClearType::All))?;
    bar(out, &chrome.header, width, ctx, BarKind::Header)?;
    separator(out, 1, width, ctx)?;

    for (i, row) in visual.iter().skip(*scroll).take(body_height).enumerate() {
        queue!(out, MoveTo(0, (i + 2) as u16), Print(row))?;
    }

    let bottom = (body_height + 2) as u16;
    separator(out, bottom, width, ctx)?;
    queue!(out, MoveTo(0, bottom + 1))?;
    if session.is_pending_exit() {
        bar(out, PENDING_HINT, width, ctx, BarKind::Hint)?;
    } else {
        bar(out, &chrome.status, width, ctx, BarKind::Status)?;
    }

    let y = (cursor_row - *scroll + 2) as u16;
    let x = cursor_x.min(width - 1) as u16;
    queue!(out, MoveTo(x, y), Show)?;
    out.flush()
}

enum BarKind {
    Header,
    Status,
    Hint,
}

fn bar(
    out: &mut impl Write,
    text: &str,
    width: usize,
    ctx: &FormatContext,
    kind: BarKind,
) -> io::Result<()> {
    let mut line: String = text.chars().take(width).collect();
    let len = line.chars().count();
    line.push_str(&" ".repeat(width - len));

    if !ctx.use_color {
        return queue!(out, Print(line));
    }
    let p = ctx.palette;
    let (fg, bg) = match kind {
        BarKind::Header => (HEADER_FG, p.id),
        BarKind::Status => (p.success, STATUS_BAR_BG),
        BarKind::Hint => (p.warning, STATUS_BAR_BG),
    };
    queue!(out, SetForegroundColor(rgb(fg)), SetBackgroundColor(rgb(bg)))?;
    if matches!(kind, BarKind::Header) {
        queue!(out, SetAttribute(Attribute::Bold))?;
    }
    queue!(out, Print(line), SetAttribute(Attribute::Reset), ResetColor)
}

fn separator(
    out: &mut impl Write,
    y: u16,
    width: usize,
    ctx: &FormatContext,
) -> io::Result<()> {
    let line = SEPARATOR.to_string().repeat(width);
    queue!(out, MoveTo(0, y), Print(ctx.format_muted(&line)))
}

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb { r, g, b }
}

/// Split text into rows of at most `width` terminal cells, one or more per
/// line.
pub fn visual_rows(text: &str, width: usize) -> Vec<String> {
    let mut rows = Vec::new();
    for line in text.split('\n') {
        let chars: Vec<char> = line.chars().collect();
        rows.extend(
            wrap_line(line, Some(width.max(1)))
                .into_iter()
                .map(|r| chars[r].iter().collect::<String>()),
        );
    }
    rows
}

/// Absolute visual row and x of the cursor.
fn cursor_cell(session: &EditSession, width: usize) -> (usize, usize) {
    let buffer = session.buffer();
    let rows_above: usize = buffer.text()[..buffer.line_start()]
        .split_terminator('\n')
        .map(|line| row_count(line, Some(width)))
        .sum();
    let (row, x) = buffer.visual_position(Some(width));
    (rows_above + row, x)
}

/// Keep `cursor_row` inside a window of `height` rows starting at `scroll`.
pub fn adjust_scroll(scroll: usize, cursor_row: usize, height: usize) -> usize {
    if cursor_row < scroll {
        cursor_row
    } else if cursor_row >= scroll + height {
        cursor_row + 1 - height
    } else {
        scroll
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visual_rows_wrap_long_lines() {
        let rows = visual_rows("• abcdefgh\n\n• x", 5);
        assert_eq!(rows, vec!["• abc", "defgh", "", "• x"]);
    }

    #[test]
    fn visual_rows_fit_wide_chars_in_width() {
        let rows = visual_rows("• 日本語日本語日本語", 10);
        assert_eq!(rows, vec!["• 日本語日", "本語日本語"]);
        let cells = |s: &str| unicode_width::UnicodeWidthStr::width(s);
        assert!(rows.iter().all(|r| cells(r) <= 10));
    }

    #[test]
    fn cursor_cell_uses_cell_offsets() {
        let session = EditSession::new("• 日本語日本語日本語");
        assert_eq!(cursor_cell(&session, 10), (1, 10));
    }

    #[test]
    fn cursor_cell_counts_wrapped_rows_above() {
        let session = EditSession::new("• abcdefgh\n• xy");
        assert_eq!(cursor_cell(&session, 5), (2, 4));
    }

    #[test]
    fn scroll_follows_cursor() {
        assert_eq!(adjust_scroll(0, 3, 10), 0);
        assert_eq!(adjust_scroll(0, 12, 10), 3);
        assert_eq!(adjust_scroll(5, 2, 10), 2);
    }

    #[test]
    fn status_line_mentions_cycling_only_when_available() {
        assert!(status_line(true).contains("Ctrl+N/P"));
        assert!(status_line(false).contains("Shift+Tab"));
    }
}
