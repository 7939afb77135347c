use std::io;
use std::path::PathBuf;

/// Errors surfaced by journal operations. Command handlers box these.
#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    #[error("No journal files found.")]
    Empty,

    #[error("Invalid ID: {id}. Valid range: 1-{max}")]
    InvalidId { id: String, max: usize },

    #[error("Invalid ID(s): {ids}. Valid range: 1-{max}")]
    InvalidIds { ids: String, max: usize },

    #[error("File has no valid frontmatter.")]
    NoFrontmatter,

    #[error("Failed to parse frontmatter: {0}")]
    BadFrontmatter(String),

    #[error("Journal directory is not a git repository. Initialise with: cd {} && git init", .0.display())]
    NotARepository(PathBuf),

    #[error("No remote configured for the repository. Add a remote with: cd {} && git remote add origin <url>", .0.display())]
    NoRemote(PathBuf),

    #[error("You have uncommitted local changes. Run `dump sync` to commit and sync your changes first.")]
    UncommittedChanges,

    #[error("git {command} failed: {stderr}")]
    Git { command: String, stderr: String },

    #[error("Failed to copy to clipboard: {0}")]
    Clipboard(String),

    #[error("HOME not set; set BRAINDUMP_DIR explicitly")]
    NoHome,

    #[error(transparent)]
    Io(#[from] io::Error),
}
