use crate::error::JournalError;
use crate::frontmatter::{self, new_entry_block};
use crate::journal::{DirStore, Entry, Store};
use crate::tags::{TagActions, TagChange};
use chrono::NaiveDate;
use std::error::Error;
use std::path::{Path, PathBuf};

/// Write a fresh entry for `date` and return its path
pub fn create_entry(
    store: &DirStore,
    date: NaiveDate,
    tags: &[String],
) -> Result<PathBuf, Box<dyn Error>> {
    let path = store.next_entry_path(date)?;
    let block = new_entry_block(&date.format("%Y-%m-%d").to_string(), tags);
    store.save(&path, &block)?;
    tracing::info!(path = %path.display(), "created entry");
    Ok(path)
}

/// Load the newest `limit` entries with their display ids
pub fn load_entries(
    store: &impl Store,
    files: &[PathBuf],
    limit: usize,
) -> Result<Vec<Entry>, Box<dyn Error>> {
    let mut entries = Vec::new();
    for (idx, path) in files.iter().take(limit).enumerate() {
        entries.push(Entry::load(store, idx + 1, path)?);
    }
    Ok(entries)
}

/// Add and remove tags on an entry, rewriting its frontmatter
pub fn retag(
    store: &impl Store,
    path: &Path,
    actions: &TagActions,
) -> Result<TagChange, JournalError> {
    let raw = store.load(path)?;
    let mut meta = frontmatter::read_strict(&raw)?;
    let change = crate::tags::apply(&meta.tags(), actions);
    meta.set_tags(&change.tags);
    store.save(path, &frontmatter::rewrite(&raw, &meta)?)?;
    Ok(change)
}

/// Flip `synthesised` and return the new value
pub fn toggle_synthesised(
    store: &impl Store,
    path: &Path,
) -> Result<bool, JournalError> {
    let raw = store.load(path)?;
    let mut meta = frontmatter::read_strict(&raw)?;
    let value = !meta.synthesised();
    meta.set_synthesised(value);
    store.save(path, &frontmatter::rewrite(&raw, &meta)?)?;
    Ok(value)
}
