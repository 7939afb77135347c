//! Runtime configuration assembled from the environment.

use crate::error::JournalError;
use crate::formatting::ColorPalette;
use std::path::PathBuf;

pub const DIR_ENV: &str = "BRAINDUMP_DIR";
pub const LOG_ENV: &str = "BRAINDUMP_LOG";
const DEFAULT_DIR_NAME: &str = "dumps";

/// Settings shared by every command and the editor session host.
///
/// The default journal directory is `$HOME/dumps`; `BRAINDUMP_DIR`
/// overrides it. Color is on unless `NO_COLOR` is set.
#[derive(Debug, Clone)]
pub struct Config {
    pub journal_dir: PathBuf,
    pub use_color: bool,
    pub palette: ColorPalette,
    /// External editor for `edit`, from `$EDITOR`.
    pub editor: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, JournalError> {
        Ok(Self {
            journal_dir: journal_dir()?,
            use_color: std::env::var_os("NO_COLOR").is_none(),
            palette: ColorPalette::MONOKAI,
            editor: std::env::var("EDITOR").ok().filter(|e| !e.is_empty()),
        })
    }
}

fn journal_dir() -> Result<PathBuf, JournalError> {
    if let Ok(dir) = std::env::var(DIR_ENV) {
        if !dir.is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home = std::env::var("HOME").map_err(|_| JournalError::NoHome)?;
    Ok(PathBuf::from(home).join(DEFAULT_DIR_NAME))
}
