//! The full-screen outline editor: a pure session state machine plus the
//! crossterm host that feeds it keys and draws it.

pub mod buffer;
pub mod keymap;
pub mod session;
pub mod terminal;

pub use session::{Action, EditSession, Outcome, State};

use std::error::Error;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::formatting::FormatContext;
use crate::frontmatter::Metadata;
use crate::journal::{Store, header_label};
use crate::outline::{self, Document, SaveDecision};
use terminal::Chrome;

/// What happened to the file when a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persisted {
    Written,
    Unchanged,
    Deleted,
    Discarded,
}

/// Open `files[index]` in the editor. With `cycle` set, Ctrl+N/Ctrl+P end
/// the session and the index of the adjacent file is returned.
pub fn edit_entry(
    store: &impl Store,
    config: &Config,
    files: &[PathBuf],
    index: usize,
    cycle: bool,
) -> Result<Option<usize>, Box<dyn Error>> {
    let path = files.get(index).ok_or("No journal file at that position.")?;
    let raw = store.load(path)?;
    let doc = outline::decode(&raw);
    let meta = Metadata::from_file_text(&raw);

    let mut session =
        EditSession::new(outline::normalize_for_display(&doc.body_lines));
    if cycle {
        session = session.with_cycle(index, files.len());
    }

    let ctx = FormatContext::from_config(config);
    let chrome =
        Chrome::new(header_label(index + 1, path, &meta), session.can_cycle());
    terminal::run(&mut session, &chrome, &ctx)?;

    let persisted = persist(store, path, &doc, &session)?;
    report(&ctx, path, persisted);

    Ok(match session.outcome() {
        Some(Outcome::Saved { next }) => next,
        _ => None,
    })
}

/// Apply a terminated session to the file on disk.
pub fn persist(
    store: &impl Store,
    path: &Path,
    doc: &Document,
    session: &EditSession,
) -> std::io::Result<Persisted> {
    let Some(Outcome::Saved { .. }) = session.outcome() else {
        tracing::info!(path = %path.display(), "edit cancelled");
        return Ok(Persisted::Discarded);
    };
    match outline::decide_save(doc, session.text()) {
        SaveDecision::Write(text) => {
            store.save(path, &text)?;
            Ok(Persisted::Written)
        }
        SaveDecision::Skip => Ok(Persisted::Unchanged),
        SaveDecision::Delete => {
            store.delete(path)?;
            Ok(Persisted::Deleted)
        }
    }
}

fn report(ctx: &FormatContext, path: &Path, persisted: Persisted) {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match persisted {
        Persisted::Written => {
            println!("{}", ctx.success(&format!("Saved {}", ctx.format_date(&name))))
        }
        Persisted::Unchanged => {}
        Persisted::Deleted => println!("{}", ctx.warning("Empty dump deleted.")),
        Persisted::Discarded => {
            println!("{}", ctx.warning("Cancelled. No changes saved."))
        }
    }
}
