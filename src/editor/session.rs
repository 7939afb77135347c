//! Keystroke rules for the outline editor.
//!
//! An [`EditSession`] owns the buffer and the save/exit state for one file.
//! The host feeds it [`Action`]s and reads back the text and the
//! [`Outcome`] once the session has terminated.

use super::buffer::{TextBuffer, byte_offset};
use crate::outline::{BulletLine, INDENT, MAX_LEVEL, marker_for_level};

/// Editor input, already decoded from whatever key events the host reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Insert(char),
    Indent,
    Outdent,
    Confirm,
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    Up,
    Down,
    Save,
    Cancel,
    CycleNext,
    CyclePrev,
    Interrupt,
    /// A key with no binding. Only clears a pending exit.
    Ignore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Persist the buffer. `next` is the index of the file to open after
    /// this one when the session ended by cycling.
    Saved { next: Option<usize> },
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Editing,
    /// One confirm on an empty top-level bullet; a second one saves.
    PendingExit,
    Terminated(Outcome),
}

/// Position of this session's file within the list being cycled through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cycle {
    pub index: usize,
    pub len: usize,
}

impl Cycle {
    fn step(self, forward: bool) -> usize {
        if forward {
            (self.index + 1) % self.len
        } else {
            (self.index + self.len - 1) % self.len
        }
    }
}

#[derive(Debug, Clone)]
pub struct EditSession {
    buffer: TextBuffer,
    state: State,
    cycle: Option<Cycle>,
    /// Visual row width for Up/Down, set by the host from the terminal size.
    pub wrap_width: Option<usize>,
}

impl EditSession {
    /// Start editing `seeded` with the cursor at its end.
    pub fn new(seeded: impl Into<String>) -> Self {
        Self {
            buffer: TextBuffer::new(seeded),
            state: State::Editing,
            cycle: None,
            wrap_width: None,
        }
    }

    /// Enable Ctrl+N/Ctrl+P cycling. Ignored for fewer than two files.
    pub fn with_cycle(mut self, index: usize, len: usize) -> Self {
        self.cycle = (len > 1).then(|| Cycle { index: index % len, len });
        self
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.state {
            State::Terminated(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn is_terminated(&self) -> bool {
        self.outcome().is_some()
    }

    pub fn is_pending_exit(&self) -> bool {
        self.state == State::PendingExit
    }

    pub fn can_cycle(&self) -> bool {
        self.cycle.is_some()
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn text(&self) -> &str {
        self.buffer.text()
    }

    /// Apply one action. Terminated sessions ignore further input.
    pub fn handle(&mut self, action: Action) -> State {
        if self.is_terminated() {
            return self.state;
        }
        if action != Action::Confirm {
            self.state = State::Editing;
        }

        match action {
            Action::Insert(c) => self.buffer.insert_char(c),
            Action::Indent => {
                let level = self.current_level();
                if level < MAX_LEVEL {
                    self.set_line_level(level + 1);
                }
            }
            Action::Outdent => {
                let level = self.current_level();
                if level > 1 {
                    self.set_line_level(level - 1);
                }
            }
            Action::Confirm => self.confirm(),
            Action::Backspace => self.backspace(),
            Action::Delete => {
                self.buffer.delete_after();
            }
            Action::Left => self.buffer.move_left(),
            Action::Right => self.buffer.move_right(),
            Action::Home => self.buffer.move_home(),
            Action::End => self.buffer.move_end(),
            Action::Up => self.buffer.move_up(self.wrap_width),
            Action::Down => self.move_down(),
            Action::Save => self.finish(Outcome::Saved { next: None }),
            Action::Cancel | Action::Interrupt => {
                self.finish(Outcome::Cancelled)
            }
            Action::Ignore => {}
            Action::CycleNext | Action::CyclePrev => {
                if let Some(cycle) = self.cycle {
                    let next = cycle.step(action == Action::CycleNext);
                    self.finish(Outcome::Saved { next: Some(next) });
                }
            }
        }
        self.state
    }

    fn finish(&mut self, outcome: Outcome) {
        tracing::debug!(?outcome, "edit session finished");
        self.state = State::Terminated(outcome);
    }

    fn current_level(&self) -> usize {
        BulletLine::parse(self.buffer.current_line()).level()
    }

    /// Rebuild the cursor line at `level`, rewriting its marker.
    fn set_line_level(&mut self, level: usize) {
        let line = BulletLine::parse(self.buffer.current_line());
        let indent = INDENT.repeat(level - 1);
        let new_line = match line.marker {
            Some(_) => format!("{indent}{}{}", marker_for_level(level), line.content),
            None => format!("{indent}{}", line.content),
        };

        let old_prefix = line.prefix_chars();
        let new_prefix =
            indent.len() + if line.is_bullet() { 2 } else { 0 };
        let col = self.buffer.column();
        let new_col = if col <= old_prefix {
            new_prefix
        } else {
            col - old_prefix + new_prefix
        };
        let new_col = new_col.min(new_line.chars().count());
        self.buffer.replace_current_line(&new_line, new_col);
    }

    fn confirm(&mut self) {
        let line = BulletLine::parse(self.buffer.current_line());
        let level = line.level();

        if line.is_empty_bullet() {
            if level > 1 {
                self.set_line_level(level - 1);
                self.state = State::Editing;
            } else if self.state == State::PendingExit {
                self.finish(Outcome::Saved { next: None });
            } else {
                self.state = State::PendingExit;
            }
            return;
        }

        self.state = State::Editing;
        let spaces = line.spaces;
        let prefix = line.prefix_chars();
        if self.buffer.column() < prefix {
            // Never split inside the indent or marker.
            let start = self.buffer.line_start();
            let offset = byte_offset(self.buffer.current_line(), prefix);
            self.buffer.set_cursor(start + offset);
        }
        self.buffer.insert_str(&format!(
            "\n{}{}",
            " ".repeat(spaces),
            marker_for_level(level)
        ));
    }

    fn backspace(&mut self) {
        if self.buffer.cursor() == 0 {
            return;
        }
        let line = BulletLine::parse(self.buffer.current_line());
        if !line.is_bullet() || self.buffer.column() != line.prefix_chars() {
            self.buffer.delete_before();
            return;
        }

        // Cursor sits right after the marker: fold this line into the one
        // above, or strip the marker from the first line.
        let start = self.buffer.line_start();
        let end = self.buffer.line_end();
        let text = self.buffer.text();
        if start > 0 {
            let joined =
                format!("{}{}{}", &text[..start - 1], line.content, &text[end..]);
            self.buffer.set(joined, start - 1);
        } else if !line.content.is_empty() {
            let stripped = format!("{}{}", line.content, &text[end..]);
            self.buffer.set(stripped, 0);
        }
    }

    fn move_down(&mut self) {
        if !self.buffer.is_last_line() {
            self.buffer.move_down(self.wrap_width);
            return;
        }
        let line = BulletLine::parse(self.buffer.current_line());
        let new_line =
            format!("\n{}{}", " ".repeat(line.spaces), marker_for_level(line.level()));
        self.buffer.move_to_text_end();
        self.buffer.insert_str(&new_line);
    }
}
