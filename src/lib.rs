use std::env;
use std::error::Error;
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use terminal_size::{Height, Width, terminal_size};

pub mod args;
pub mod clipboard;
pub mod config;
pub mod editor;
pub mod error;
pub mod formatting;
pub mod frontmatter;
mod help;
pub mod journal;
pub mod logging;
pub mod operations;
pub mod outline;
pub mod render;
pub mod shared;
pub mod tags;
pub mod vcs;

use args::{ArgParser, ViewFlags, parse_count, parse_ids};
use config::Config;
use error::JournalError;
use formatting::FormatContext;
use journal::{DirStore, Entry, Store, resolve_id, today};
use shared::table::{Align, Cell, Column, render_table};

const DEFAULT_LIST_COUNT: usize = 10;
const TAGS_COLUMN_WIDTH: usize = 20;

pub fn entry() -> Result<(), Box<dyn Error>> {
    let mut args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        return help::run(Vec::new());
    }

    let cmd = args.remove(0);
    let cmd = help::resolve_alias(&cmd).map(str::to_string).unwrap_or(cmd);
    if matches!(cmd.as_str(), "help" | "--help" | "-h") {
        return help::run(args);
    }

    let config = Config::from_env()?;
    logging::init(config.use_color);
    let store = DirStore::open(&config.journal_dir)?;
    tracing::debug!(%cmd, dir = %config.journal_dir.display(), "dispatching");

    match cmd.as_str() {
        "new" => new_entry(args, &store, &config)?,
        "open" => open_entry(args, &store, &config)?,
        "edit" => edit_external(args, &store, &config)?,
        "list" => list_entries(args, &store, &config)?,
        "view" => view_entry(args, &store, &config)?,
        "copy" => copy_entries(args, &store, &config)?,
        "tag" => tag_entry(args, &store, &config)?,
        "synth" => synth_entry(args, &store, &config)?,
        "delete" => delete_entry(args, &store, &config)?,
        "sync" => sync_journal(&config)?,
        "pull" => pull_journal(&config)?,
        "path" => println!("{}", store.dir().display()),
        other => {
            return Err(format!(
                "Unknown command: {other}. Run `dump help` for usage."
            )
            .into());
        }
    }

    Ok(())
}

/// Print with a blank line above and below.
pub fn print_padded(text: &str) {
    println!();
    println!("{text}");
    println!();
}

/// Width of the attached terminal, if any.
pub fn terminal_columns() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| usize::from(w))
}

fn terminal_rows() -> Option<usize> {
    terminal_size().map(|(_, Height(h))| usize::from(h))
}

/// Print lines, going through `$PAGER` (default `less -R`) when they would
/// overflow an interactive terminal.
pub fn paginate_and_print(lines: &[String]) -> io::Result<()> {
    let text = lines.join("\n");
    let overflow = terminal_rows().is_some_and(|rows| lines.len() + 1 > rows);
    if !overflow || !io::stdout().is_terminal() {
        println!("{text}");
        return Ok(());
    }

    let pager = env::var("PAGER").unwrap_or_else(|_| "less -R".to_string());
    let mut parts = pager.split_whitespace();
    let Some(program) = parts.next() else {
        println!("{text}");
        return Ok(());
    };
    match Command::new(program).args(parts).stdin(Stdio::piped()).spawn() {
        Ok(mut child) => {
            if let Some(mut stdin) = child.stdin.take() {
                // The pager may quit before reading everything.
                let _ = writeln!(stdin, "{text}");
            }
            child.wait()?;
        }
        Err(err) => {
            tracing::debug!(%err, %pager, "pager unavailable");
            println!("{text}");
        }
    }
    Ok(())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Entry list for commands that need at least one file.
fn require_files(store: &DirStore) -> Result<Vec<PathBuf>, JournalError> {
    let files = store.list_all()?;
    if files.is_empty() {
        return Err(JournalError::Empty);
    }
    Ok(files)
}

fn new_entry(
    args: Vec<String>,
    store: &DirStore,
    config: &Config,
) -> Result<(), Box<dyn Error>> {
    let tag_list = tags::normalize_tags(&args);
    let path = operations::create_entry(store, today(), &tag_list)?;
    let files = store.list_all()?;
    let index = files
        .iter()
        .position(|p| p == &path)
        .ok_or("New entry vanished before it could be opened.")?;
    editor::edit_entry(store, config, &files, index, false)?;
    Ok(())
}

fn open_entry(
    args: Vec<String>,
    store: &DirStore,
    config: &Config,
) -> Result<(), Box<dyn Error>> {
    let mut parser = ArgParser::new(args, "open");
    let id = parser.next().unwrap_or_else(|| "1".to_string());
    parser.finish()?;

    let mut files = require_files(store)?;
    let (n, _) = resolve_id(&files, &id)?;
    let mut index = n - 1;

    while let Some(next) = editor::edit_entry(store, config, &files, index, true)? {
        // The entry just closed may have been deleted, so re-read the list.
        let target = files[next].clone();
        files = store.list_all()?;
        index = match files.iter().position(|p| p == &target) {
            Some(i) => i,
            None => break,
        };
    }
    Ok(())
}

fn edit_external(
    args: Vec<String>,
    store: &DirStore,
    config: &Config,
) -> Result<(), Box<dyn Error>> {
    let mut parser = ArgParser::new(args, "edit");
    let id = parser.next().unwrap_or_else(|| "1".to_string());
    parser.finish()?;

    let files = require_files(store)?;
    let (_, path) = resolve_id(&files, &id)?;
    let fallback = if cfg!(target_os = "macos") { "open" } else { "nano" };
    let editor =
        config.editor.clone().unwrap_or_else(|| fallback.to_string());

    let status = Command::new(&editor)
        .arg(path)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()?;
    if !status.success() {
        return Err("Editor exited with non-zero status".into());
    }

    let ctx = FormatContext::from_config(config);
    print_padded(&ctx.success(&format!(
        "Opened {} in external editor",
        ctx.format_date(&file_name(path))
    )));
    Ok(())
}

fn list_entries(
    args: Vec<String>,
    store: &DirStore,
    config: &Config,
) -> Result<(), Box<dyn Error>> {
    let mut parser = ArgParser::new(args, "list");
    let count = match parser.next() {
        Some(raw) => parse_count(&raw)?,
        None => DEFAULT_LIST_COUNT,
    };
    parser.finish()?;

    let ctx = FormatContext::from_config(config);
    let files = store.list_all()?;
    if files.is_empty() {
        print_padded(&ctx.warning(&JournalError::Empty.to_string()));
        return Ok(());
    }

    let entries = operations::load_entries(store, &files, count)?;
    let table = render_entry_table(&entries, &ctx);

    println!();
    println!("{}", ctx.format_header("Brain Dumps"));
    println!("{table}");
    let excluded = files.len().saturating_sub(entries.len());
    if excluded > 0 {
        println!("{}", ctx.format_muted(&format!("  +{excluded} more")));
    }
    println!();
    Ok(())
}

fn render_entry_table(entries: &[Entry], ctx: &FormatContext) -> String {
    let columns = [
        Column::new("ID").align(Align::Right),
        Column::new("Date"),
        Column::new("Tags").max_width(TAGS_COLUMN_WIDTH),
        Column::new("Synthesised").align(Align::Center),
    ];
    let rows: Vec<Vec<Cell>> = entries
        .iter()
        .map(|e| {
            let synth = if e.meta.synthesised() { "True" } else { "False" };
            vec![
                Cell::styled(e.id.to_string(), |s| ctx.format_id(s)),
                Cell::styled(e.list_date(), |s| ctx.format_date(s)),
                Cell::plain(e.meta.tags().join(", ")),
                Cell::styled(synth, |s| {
                    if e.meta.synthesised() {
                        ctx.format_positive(s)
                    } else {
                        ctx.format_muted(s)
                    }
                }),
            ]
        })
        .collect();
    let table = render_table(&columns, &rows);
    match table.split_once('\n') {
        Some((head, rest)) => format!("{}\n{rest}", ctx.format_header(head)),
        None => table,
    }
}

fn view_entry(
    args: Vec<String>,
    store: &DirStore,
    config: &Config,
) -> Result<(), Box<dyn Error>> {
    let flags = ViewFlags::parse(args)?;
    let id = flags
        .id
        .ok_or("Usage: dump view <id> [--render|-r] [--plain]")?;
    let files = require_files(store)?;
    let (n, path) = resolve_id(&files, &id)?;
    let raw = store.load(path)?;

    if !flags.render {
        println!("{}", raw.trim_end());
        return Ok(());
    }

    let ctx = FormatContext::new(config.use_color && !flags.plain, config.palette);
    let meta = frontmatter::Metadata::from_file_text(&raw);
    let doc = outline::decode(&raw);
    println!("{}", ctx.format_header(&journal::header_label(n, path, &meta)));
    println!();
    println!("{}", render::render_markdown(&doc.body_lines.join("\n"), &ctx));
    Ok(())
}

fn copy_entries(
    args: Vec<String>,
    store: &DirStore,
    config: &Config,
) -> Result<(), Box<dyn Error>> {
    let files = require_files(store)?;
    let ids = if args.is_empty() {
        vec![1]
    } else {
        parse_ids(&args, files.len())?
    };

    let mut entries = Vec::with_capacity(ids.len());
    for id in &ids {
        entries.push((*id, store.load(&files[id - 1])?));
    }
    clipboard::copy_text(&clipboard::build_payload(&entries))?;

    let ctx = FormatContext::from_config(config);
    let msg = if ids.len() == 1 {
        format!("Copied dump #{} to clipboard.", ids[0])
    } else {
        format!("Copied dumps #{} to clipboard.", clipboard::join_ids(ids))
    };
    print_padded(&ctx.success(&msg));
    Ok(())
}

fn tag_entry(
    args: Vec<String>,
    store: &DirStore,
    config: &Config,
) -> Result<(), Box<dyn Error>> {
    let mut parser = ArgParser::new(args, "tag");
    let id = parser.require("an entry id")?;
    let actions = tags::parse_tag_actions(&parser.collect_remaining())?;

    let files = require_files(store)?;
    let (_, path) = resolve_id(&files, &id)?;
    let change = operations::retag(store, path, &actions)?;

    let ctx = FormatContext::from_config(config);
    let mut line = ctx.format_date(&file_name(path));
    if !change.added.is_empty() {
        line.push_str(&format!(" + {}", ctx.format_tags(&change.added)));
    }
    if !change.removed.is_empty() {
        line.push_str(&format!(" - {}", change.removed.join(", ")));
    }
    println!();
    println!("{line}");
    if !change.tags.is_empty() {
        println!("  Tags: {}", ctx.format_tags(&change.tags));
    }
    println!();
    Ok(())
}

fn synth_entry(
    args: Vec<String>,
    store: &DirStore,
    config: &Config,
) -> Result<(), Box<dyn Error>> {
    let mut parser = ArgParser::new(args, "synth");
    let id = parser.require("an entry id")?;
    parser.finish()?;

    let files = require_files(store)?;
    let (_, path) = resolve_id(&files, &id)?;
    let value = operations::toggle_synthesised(store, path)?;

    let ctx = FormatContext::from_config(config);
    let shown = if value { "True" } else { "False" };
    print_padded(&format!(
        "{} synthesised: {shown}",
        ctx.format_date(&file_name(path))
    ));
    Ok(())
}

fn delete_entry(
    args: Vec<String>,
    store: &DirStore,
    config: &Config,
) -> Result<(), Box<dyn Error>> {
    let mut parser = ArgParser::new(args, "delete");
    let id = parser.require("an entry id")?;
    parser.finish()?;

    let files = require_files(store)?;
    let (_, path) = resolve_id(&files, &id)?;
    store.delete(path)?;

    let ctx = FormatContext::from_config(config);
    print_padded(&ctx.success(&format!("Deleted {}", file_name(path))));
    Ok(())
}

fn sync_journal(config: &Config) -> Result<(), Box<dyn Error>> {
    let ctx = FormatContext::from_config(config);
    println!("{}", ctx.format_muted("Synchronising..."));
    let message = vcs::Repo::new(&config.journal_dir).sync(today())?;
    println!();
    println!("{}", ctx.success("Successfully synchronised with remote."));
    println!("  {}", ctx.format_muted(&format!("Commit: {message}")));
    println!();
    Ok(())
}

fn pull_journal(config: &Config) -> Result<(), Box<dyn Error>> {
    let ctx = FormatContext::from_config(config);
    vcs::Repo::new(&config.journal_dir).pull()?;
    print_padded(&ctx.success("Successfully pulled from remote."));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatting::ColorPalette;
    use crate::frontmatter::Metadata;

    #[test]
    fn test_entry_table_plain() {
        let ctx = FormatContext::new(false, ColorPalette::MONOKAI);
        let entries = vec![
            Entry {
                id: 1,
                path: PathBuf::from("2026010502.md"),
                meta: Metadata::parse(
                    "synthesised: true\ntags: [health, exercise, career, family]",
                ),
            },
            Entry {
                id: 2,
                path: PathBuf::from("2026010501.md"),
                meta: Metadata::default(),
            },
        ];
        let table = render_entry_table(&entries, &ctx);
        let lines: Vec<&str> = table.lines().collect();
        assert!(lines[0].starts_with("ID | Date"));
        assert!(lines[2].contains("Jan 5, 2026"));
        assert!(lines[2].contains("health, exercise, c…"));
        assert!(lines[2].contains("True"));
        assert!(lines[3].contains("False"));
    }
}
