use crate::error::JournalError;
use crate::frontmatter::{DELIMITER, split_frontmatter};

const ENTRY_SEPARATOR: &str = "\n\n---\n\n";

/// Tag an entry's frontmatter with its display id so pasted text keeps
/// track of which dump each section came from.
pub fn with_id(raw: &str, id: usize) -> String {
    match split_frontmatter(raw) {
        Some(parts) => format!(
            "{DELIMITER}\nid: {id}\n{}{DELIMITER}{}",
            parts.yaml, parts.rest
        ),
        None => raw.to_string(),
    }
}

/// Intro line followed by each entry, separated by horizontal rules.
pub fn build_payload(entries: &[(usize, String)]) -> String {
    let ids = join_ids(entries.iter().map(|(id, _)| *id));
    let bodies = entries
        .iter()
        .map(|(id, raw)| with_id(raw, *id))
        .collect::<Vec<_>>()
        .join(ENTRY_SEPARATOR);
    format!("Here is a copy of my brain dump(s) #{ids}:{ENTRY_SEPARATOR}{bodies}")
}

pub fn join_ids(ids: impl IntoIterator<Item = usize>) -> String {
    ids.into_iter().map(|i| i.to_string()).collect::<Vec<_>>().join(", ")
}

/// Place text on the system clipboard.
pub fn copy_text(text: &str) -> Result<(), JournalError> {
    arboard::Clipboard::new()
        .and_then(|mut c| c.set_text(text))
        .map_err(|e| JournalError::Clipboard(e.to_string()))
}
