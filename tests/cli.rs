#![allow(deprecated)]

use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn cmd(temp: &TempDir) -> assert_cmd::Command {
    let mut c = assert_cmd::Command::cargo_bin("braindump").unwrap();
    c.env("BRAINDUMP_DIR", temp.path())
        .env("NO_COLOR", "1")
        .env_remove("BRAINDUMP_LOG");
    c
}

fn write_entry(dir: &Path, stem: &str, frontmatter: &str, body: &str) {
    let content = if frontmatter.is_empty() {
        format!("{body}\n")
    } else {
        format!("---\n{frontmatter}\n---\n\n{body}\n")
    };
    fs::write(dir.join(format!("{stem}.md")), content).unwrap();
}

fn seed(temp: &TempDir) {
    write_entry(
        temp.path(),
        "2026010501",
        "date: 2026-01-05\nsynthesised: false",
        "- oldest",
    );
    write_entry(
        temp.path(),
        "2026010502",
        "date: 2026-01-05\nsynthesised: true\ntags: [work]",
        "- middle",
    );
    write_entry(
        temp.path(),
        "2026010601",
        "date: 2026-01-06\nsynthesised: false\ntags: [health]",
        "- first\n  - nested",
    );
}

fn read(temp: &TempDir, stem: &str) -> String {
    fs::read_to_string(temp.path().join(format!("{stem}.md"))).unwrap()
}

#[test]
fn list_empty_journal_warns() {
    let temp = TempDir::new().unwrap();
    cmd(&temp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No journal files found."));
}

#[test]
fn list_shows_newest_first_with_footer() {
    let temp = TempDir::new().unwrap();
    seed(&temp);
    let out = cmd(&temp)
        .args(["list", "2"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let out = String::from_utf8_lossy(&out);
    assert!(out.contains("Brain Dumps"));
    assert!(out.contains("ID | Date"));
    let first = out.lines().find(|l| l.contains("Jan 6, 2026")).unwrap();
    assert!(first.trim_start().starts_with("1 |"));
    assert!(first.contains("health"));
    assert!(first.contains("False"));
    assert!(out.contains("True"));
    assert!(out.contains("+1 more"));
}

#[test]
fn ls_alias_lists_entries() {
    let temp = TempDir::new().unwrap();
    seed(&temp);
    cmd(&temp)
        .arg("ls")
        .assert()
        .success()
        .stdout(predicate::str::contains("Jan 5, 2026"))
        .stdout(predicate::str::contains("more").not());
}

#[test]
fn list_rejects_bad_count() {
    let temp = TempDir::new().unwrap();
    cmd(&temp)
        .args(["list", "zero"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Expected a positive number"));
}

#[test]
fn tag_adds_and_removes() {
    let temp = TempDir::new().unwrap();
    seed(&temp);
    cmd(&temp)
        .args(["tag", "1", "add", "Gym", "Work", "remove", "health"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2026010601.md + gym, work - health"))
        .stdout(predicate::str::contains("Tags: gym, work"));

    let raw = read(&temp, "2026010601");
    assert!(raw.contains("gym"));
    assert!(!raw.contains("health"));
    assert!(raw.ends_with("---\n\n- first\n  - nested\n"));
}

#[test]
fn tag_requires_action_keyword() {
    let temp = TempDir::new().unwrap();
    seed(&temp);
    cmd(&temp)
        .args(["tag", "1", "gym"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Expected 'add' or 'remove' before 'gym'",
        ));
    cmd(&temp)
        .args(["tag", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No tags specified to add or remove."));
}

#[test]
fn tag_without_frontmatter_fails() {
    let temp = TempDir::new().unwrap();
    write_entry(temp.path(), "2026010501", "", "- bare");
    cmd(&temp)
        .args(["tag", "1", "add", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File has no valid frontmatter."));
}

#[test]
fn synth_toggles_flag() {
    let temp = TempDir::new().unwrap();
    seed(&temp);
    cmd(&temp)
        .args(["synth", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2026010601.md synthesised: True"));
    cmd(&temp)
        .args(["synth", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("synthesised: False"));
}

#[test]
fn synth_requires_id() {
    let temp = TempDir::new().unwrap();
    seed(&temp);
    cmd(&temp)
        .arg("synth")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Provide an entry id for synth"));
}

#[test]
fn delete_removes_file() {
    let temp = TempDir::new().unwrap();
    seed(&temp);
    cmd(&temp)
        .args(["rm", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted 2026010502.md"));
    assert!(!temp.path().join("2026010502.md").exists());
    assert!(temp.path().join("2026010501.md").exists());
}

#[test]
fn view_prints_raw_file() {
    let temp = TempDir::new().unwrap();
    seed(&temp);
    cmd(&temp)
        .args(["view", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("---\ndate: 2026-01-05"))
        .stdout(predicate::str::contains("- oldest"));
}

#[test]
fn view_render_plain_uses_outline_glyphs() {
    let temp = TempDir::new().unwrap();
    seed(&temp);
    cmd(&temp)
        .args(["view", "1", "--render", "--plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Brain Dump #1"))
        .stdout(predicate::str::contains("Date: 06/01/2026"))
        .stdout(predicate::str::contains("• first"))
        .stdout(predicate::str::contains("◦ nested"))
        .stdout(predicate::str::contains("\x1b[").not());
}

#[test]
fn view_requires_id() {
    let temp = TempDir::new().unwrap();
    seed(&temp);
    cmd(&temp)
        .arg("view")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage: dump view <id>"));
}

#[test]
fn open_rejects_out_of_range_id() {
    let temp = TempDir::new().unwrap();
    seed(&temp);
    cmd(&temp)
        .args(["open", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid ID: 9. Valid range: 1-3"));
}

#[test]
fn open_on_empty_journal_fails() {
    let temp = TempDir::new().unwrap();
    cmd(&temp)
        .arg("open")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No journal files found."));
}

#[test]
fn copy_reports_every_invalid_id() {
    let temp = TempDir::new().unwrap();
    seed(&temp);
    cmd(&temp)
        .args(["copy", "1", "7", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid ID(s): 7, x. Valid range: 1-3"));
}

#[test]
fn path_prints_journal_dir_and_creates_it() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("journal");
    let mut c = cmd(&temp);
    c.env("BRAINDUMP_DIR", &dir)
        .arg("path")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created journal directory at"))
        .stdout(predicate::str::contains(dir.display().to_string()));
    assert!(dir.is_dir());
}

#[test]
fn pull_outside_repository_fails() {
    let temp = TempDir::new().unwrap();
    cmd(&temp)
        .arg("pull")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a git repository"));
}

#[test]
fn help_overview_and_topic() {
    let temp = TempDir::new().unwrap();
    cmd(&temp)
        .assert()
        .success()
        .stdout(predicate::str::contains("Brain Dump"))
        .stdout(predicate::str::contains("Commands:"));
    cmd(&temp)
        .args(["help", "tag"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tag: Add or remove tags"));
    cmd(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("usage: dump <command> [args]"));
}

#[test]
fn unknown_command_fails() {
    let temp = TempDir::new().unwrap();
    cmd(&temp)
        .arg("bogus")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown command: bogus"));
}
