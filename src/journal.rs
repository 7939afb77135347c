use crate::error::JournalError;
use crate::frontmatter::Metadata;
use chrono::{Local, NaiveDate};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const EXTENSION: &str = "md";
const DATE_PREFIX_FMT: &str = "%Y%m%d";
const STEM_LEN: usize = 10;

/// File access the journal commands and editor sessions go through.
pub trait Store {
    fn load(&self, path: &Path) -> io::Result<String>;
    fn save(&self, path: &Path, text: &str) -> io::Result<()>;
    fn delete(&self, path: &Path) -> io::Result<()>;
    /// Entry files, newest first by filename.
    fn list_all(&self) -> io::Result<Vec<PathBuf>>;
}

/// A journal directory on disk.
#[derive(Debug, Clone)]
pub struct DirStore {
    dir: PathBuf,
}

impl DirStore {
    /// Open a store, creating the directory when missing.
    pub fn open(dir: impl AsRef<Path>) -> io::Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        if ensure_dir(&dir)? {
            println!("Created journal directory at {}", dir.display());
        }
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path for the next entry created on `date`.
    pub fn next_entry_path(&self, date: NaiveDate) -> io::Result<PathBuf> {
        let prefix = date.format(DATE_PREFIX_FMT).to_string();
        let increment = next_increment(&self.dir, &prefix)?;
        Ok(entry_path(&self.dir, &format!("{prefix}{increment}")))
    }
}

impl Store for DirStore {
    fn load(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn save(&self, path: &Path, text: &str) -> io::Result<()> {
        tracing::debug!(path = %path.display(), bytes = text.len(), "writing entry");
        fs::write(path, text)
    }

    fn delete(&self, path: &Path) -> io::Result<()> {
        tracing::debug!(path = %path.display(), "deleting entry");
        fs::remove_file(path)
    }

    fn list_all(&self) -> io::Result<Vec<PathBuf>> {
        list_entry_files(&self.dir)
    }
}

/// Create `path` if needed. Returns true when it was created.
pub fn ensure_dir(path: &Path) -> io::Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    fs::create_dir_all(path)?;
    Ok(true)
}

pub fn entry_path(dir: &Path, stem: &str) -> PathBuf {
    dir.join(format!("{stem}.{EXTENSION}"))
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Two-digit sequence number for the next entry with `prefix`.
pub fn next_increment(dir: &Path, prefix: &str) -> io::Result<String> {
    let highest = list_entry_files(dir)?
        .iter()
        .filter_map(|p| file_stem(p))
        .filter(|stem| stem.len() == STEM_LEN && stem.starts_with(prefix))
        .filter_map(|stem| stem[8..].parse::<u32>().ok())
        .max();
    Ok(format!("{:02}", highest.map_or(1, |n| n + 1)))
}

/// Markdown files in `dir`, sorted by filename descending.
pub fn list_entry_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file()
            && entry.path().extension().and_then(|s| s.to_str())
                == Some(EXTENSION)
        {
            files.push(entry.path());
        }
    }
    files.sort_by(|a, b| b.file_name().cmp(&a.file_name()));
    Ok(files)
}

fn file_stem(path: &Path) -> Option<&str> {
    path.file_stem().and_then(|s| s.to_str())
}

/// Date encoded in the first eight characters of an entry filename.
pub fn date_from_stem(stem: &str) -> Option<NaiveDate> {
    let prefix = stem.get(..8)?;
    NaiveDate::parse_from_str(prefix, DATE_PREFIX_FMT).ok()
}

/// Resolve a 1-based display id against the ordered file list.
pub fn resolve_id<'a>(
    files: &'a [PathBuf],
    id: &str,
) -> Result<(usize, &'a PathBuf), JournalError> {
    if files.is_empty() {
        return Err(JournalError::Empty);
    }
    let invalid =
        || JournalError::InvalidId { id: id.to_string(), max: files.len() };
    let n: usize = id.trim().parse().map_err(|_| invalid())?;
    if n == 0 || n > files.len() {
        return Err(invalid());
    }
    Ok((n, &files[n - 1]))
}

/// One journal file with its display id and parsed metadata.
#[derive(Debug, Clone)]
pub struct Entry {
    pub id: usize,
    pub path: PathBuf,
    pub meta: Metadata,
}

impl Entry {
    pub fn load(
        store: &impl Store,
        id: usize,
        path: &Path,
    ) -> io::Result<Self> {
        let raw = store.load(path)?;
        Ok(Self {
            id,
            path: path.to_path_buf(),
            meta: Metadata::from_file_text(&raw),
        })
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string()
    }

    fn stem(&self) -> &str {
        file_stem(&self.path).unwrap_or_default()
    }

    /// `Jan 5, 2026`, falling back to the raw filename stem.
    pub fn list_date(&self) -> String {
        date_from_stem(self.stem())
            .map(|d| d.format("%b %-d, %Y").to_string())
            .unwrap_or_else(|| self.stem().to_string())
    }

    /// `05/01/2026`, falling back to the frontmatter date.
    pub fn header_date(&self) -> String {
        date_from_stem(self.stem())
            .map(|d| d.format("%d/%m/%Y").to_string())
            .or_else(|| self.meta.date())
            .unwrap_or_else(|| "Unknown".to_string())
    }
}

/// Label shown in the editor's header bar.
pub fn header_label(id: usize, path: &Path, meta: &Metadata) -> String {
    if meta.is_empty() {
        return "New Brain Dump".to_string();
    }
    let entry = Entry { id, path: path.to_path_buf(), meta: meta.clone() };
    let mut parts = vec![
        format!("Brain Dump #{id}"),
        format!("Date: {}", entry.header_date()),
    ];
    let tags = meta.tags();
    if !tags.is_empty() {
        parts.push(format!("Tags: {}", tags.join(", ")));
    }
    parts.join("  |  ")
}
