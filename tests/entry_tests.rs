//! Integration tests for add, list and show commands

#![allow(deprecated)]

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

mod common;
use common::{add_entry, daylog_cmd};

fn init(temp: &TempDir, layout: &str, content: &str) {
    daylog_cmd()
        .arg("init")
        .arg(temp.path())
        .args(["--layout", layout, "--content", content])
        .assert()
        .success();
}

#[test]
fn test_structured_scenario_nested() {
    let temp = TempDir::new().unwrap();
    init(&temp, "nested", "structured");

    let slug = add_entry(
        temp.path(),
        &[
            "--date",
            "2025-08-08",
            "--title",
            "Test",
            "--description",
            "",
            "--attach",
            "a.png",
        ],
    );

    assert!(slug.starts_with("2025/08/2025-08-08-"), "slug: {}", slug);
    let token = slug.trim_start_matches("2025/08/2025-08-08-");
    assert!(!token.is_empty() && token.chars().all(|c| c.is_ascii_digit()));

    // Body is stored under the workspace at slug + ".md"
    let stored = fs::read_to_string(temp.path().join(format!("{}.md", slug))).unwrap();
    assert!(stored.contains("# Test"));
    assert!(stored.contains("- a.png"));
    assert!(stored.contains("No references"));

    daylog_cmd()
        .current_dir(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("2025-08-08  {}  Test", slug)))
        .stdout(predicate::str::contains("1 total entry"));

    daylog_cmd()
        .current_dir(temp.path())
        .args(["show", &slug])
        .assert()
        .success()
        .stdout(predicate::eq(stored.as_str()));
}

#[test]
fn test_structured_scenario_flat() {
    let temp = TempDir::new().unwrap();
    init(&temp, "flat", "structured");

    let slug = add_entry(
        temp.path(),
        &["--date", "2025-08-08", "--title", "Test", "--attach", "a.png"],
    );

    assert!(slug.starts_with("2025-08-08-"), "slug: {}", slug);
    assert!(!slug.contains('/'));
    assert!(temp.path().join(format!("{}.md", slug)).is_file());
}

#[test]
fn test_verbatim_body_round_trip() {
    let temp = TempDir::new().unwrap();
    init(&temp, "nested", "verbatim");

    let body = "# Notes\n\nSome *markdown* here.\n";
    let body_path = temp.path().join("draft.txt");
    fs::write(&body_path, body).unwrap();

    let slug = add_entry(
        temp.path(),
        &[
            "--date",
            "2025-01-17",
            "--title",
            "Draft",
            "--body-file",
            body_path.to_str().unwrap(),
        ],
    );

    daylog_cmd()
        .current_dir(temp.path())
        .args(["show", &slug])
        .assert()
        .success()
        .stdout(predicate::eq(body));
}

#[test]
fn test_verbatim_body_from_stdin() {
    let temp = TempDir::new().unwrap();
    init(&temp, "flat", "verbatim");

    let output = daylog_cmd()
        .current_dir(temp.path())
        .args(["add", "--date", "2025-01-17", "--title", "Piped", "--body-file", "-"])
        .write_stdin("piped body\n")
        .output()
        .unwrap();
    assert!(output.status.success());
    let slug = String::from_utf8(output.stdout).unwrap().trim().to_string();

    daylog_cmd()
        .current_dir(temp.path())
        .args(["show", &slug])
        .assert()
        .success()
        .stdout(predicate::eq("piped body\n"));
}

#[test]
fn test_verbatim_requires_body() {
    let temp = TempDir::new().unwrap();
    init(&temp, "nested", "verbatim");

    daylog_cmd()
        .current_dir(temp.path())
        .args(["add", "--date", "2025-01-17", "--title", "Empty"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("body is required"));

    daylog_cmd()
        .current_dir(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No entries found"));
}

#[test]
fn test_structured_rejects_body() {
    let temp = TempDir::new().unwrap();
    init(&temp, "nested", "structured");

    daylog_cmd()
        .current_dir(temp.path())
        .args(["add", "--date", "2025-01-17", "--title", "T", "--body", "# mine"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("structured mode"));
}

#[test]
fn test_invalid_date_and_title_rejected() {
    let temp = TempDir::new().unwrap();
    init(&temp, "nested", "structured");

    daylog_cmd()
        .current_dir(temp.path())
        .args(["add", "--date", "2025-02-30", "--title", "T"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("not a valid calendar date"));

    daylog_cmd()
        .current_dir(temp.path())
        .args(["add", "--date", "2025-02-03", "--title", "  "])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("title must not be empty"));

    // Nothing was written besides .daylog
    let visible: Vec<_> = fs::read_dir(temp.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| !e.file_name().to_string_lossy().starts_with('.'))
        .collect();
    assert!(visible.is_empty());
}

#[test]
fn test_list_sorted_and_filtered() {
    let temp = TempDir::new().unwrap();
    init(&temp, "flat", "structured");

    add_entry(temp.path(), &["--date", "2025-01-15", "--title", "Middle"]);
    add_entry(temp.path(), &["--date", "2025-01-20", "--title", "Newest"]);
    add_entry(temp.path(), &["--date", "2025-01-10", "--title", "Oldest"]);
    add_entry(temp.path(), &["--date", "2025-01-15", "--title", "Middle again"]);

    let output = daylog_cmd()
        .current_dir(temp.path())
        .arg("list")
        .output()
        .unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().filter(|l| !l.is_empty()).collect();

    assert_eq!(lines.len(), 5);
    assert!(lines[0].contains("2025-01-20"));
    assert!(lines[1].contains("2025-01-15"));
    assert!(lines[2].contains("2025-01-15"));
    assert!(lines[3].contains("2025-01-10"));
    assert_eq!(lines[4], "4 total entries");

    daylog_cmd()
        .current_dir(temp.path())
        .args(["list", "--on", "2025-01-15"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Middle"))
        .stdout(predicate::str::contains("Newest").not())
        .stdout(predicate::str::contains("2 entries"));

    daylog_cmd()
        .current_dir(temp.path())
        .args(["list", "--on", "2024-12-31"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No entries found"));

    daylog_cmd()
        .current_dir(temp.path())
        .args(["list", "-n", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Newest"))
        .stdout(predicate::str::contains("Oldest").not());
}

#[test]
fn test_show_missing_slug() {
    let temp = TempDir::new().unwrap();
    init(&temp, "nested", "structured");

    daylog_cmd()
        .current_dir(temp.path())
        .args(["show", "2025/08/2025-08-08-1"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("No content stored at"));
}

#[test]
fn test_show_with_header() {
    let temp = TempDir::new().unwrap();
    init(&temp, "nested", "structured");

    let slug = add_entry(temp.path(), &["--date", "2025-08-08", "--title", "Test"]);

    daylog_cmd()
        .current_dir(temp.path())
        .args(["show", "--header", &slug])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("August 08, 2025\n\n# Test"));
}

#[test]
fn test_orphans_report() {
    let temp = TempDir::new().unwrap();
    init(&temp, "flat", "structured");

    add_entry(temp.path(), &["--date", "2025-08-08", "--title", "Kept"]);

    daylog_cmd()
        .current_dir(temp.path())
        .arg("orphans")
        .assert()
        .success()
        .stdout(predicate::str::contains("No orphaned content found"));

    fs::write(temp.path().join("2025-08-08-42.md"), "left behind").unwrap();
    fs::write(temp.path().join("README.md"), "not an entry").unwrap();

    daylog_cmd()
        .current_dir(temp.path())
        .arg("orphans")
        .assert()
        .success()
        .stdout(predicate::eq("2025-08-08-42.md\n"));

    assert!(temp.path().join("2025-08-08-42.md").exists());
}

#[test]
fn test_layout_locked_after_first_entry() {
    let temp = TempDir::new().unwrap();
    init(&temp, "nested", "structured");

    daylog_cmd()
        .current_dir(temp.path())
        .args(["config", "layout", "flat"])
        .assert()
        .success();
    daylog_cmd()
        .current_dir(temp.path())
        .args(["config", "layout", "nested"])
        .assert()
        .success();

    add_entry(temp.path(), &["--date", "2025-08-08", "--title", "Pinned"]);

    daylog_cmd()
        .current_dir(temp.path())
        .args(["config", "layout", "flat"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot switch layout"));
}

#[test]
fn test_list_long_shows_stored_metadata() {
    let temp = TempDir::new().unwrap();
    init(&temp, "nested", "verbatim");

    let slug = add_entry(
        temp.path(),
        &[
            "--date",
            "2025-08-08",
            "--title",
            "Retro",
            "--description",
            "Sprint 14",
            "--link",
            "https://example.com/retro",
            "--attach",
            "board.png",
            "--attach",
            "notes.pdf",
            "--ref",
            "RFC 9110",
            "--body",
            "# My own notes\n",
        ],
    );

    // The verbatim body carries none of these fields
    daylog_cmd()
        .current_dir(temp.path())
        .args(["show", &slug])
        .assert()
        .success()
        .stdout(predicate::str::contains("board.png").not());

    daylog_cmd()
        .current_dir(temp.path())
        .args(["list", "--long"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("2025-08-08  {}  Retro", slug)))
        .stdout(predicate::str::contains("    description: Sprint 14\n"))
        .stdout(predicate::str::contains("    link: https://example.com/retro\n"))
        .stdout(predicate::str::contains(
            "    attachments: 2 files\n      - board.png\n      - notes.pdf\n",
        ))
        .stdout(predicate::str::contains("    references: 1 ref\n      - RFC 9110\n"))
        .stdout(predicate::str::contains("1 total entry"));

    daylog_cmd()
        .current_dir(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Sprint 14").not());
}

#[test]
fn test_multiline_labels_rejected() {
    let temp = TempDir::new().unwrap();
    init(&temp, "nested", "structured");

    daylog_cmd()
        .current_dir(temp.path())
        .args([
            "add",
            "--date",
            "2025-08-08",
            "--title",
            "Test",
            "--attach",
            "a.png\n- b.png",
        ])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("must not contain line breaks"));

    daylog_cmd()
        .current_dir(temp.path())
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No entries found"));
}

#[test]
fn test_five_digit_year_rejected() {
    let temp = TempDir::new().unwrap();
    init(&temp, "nested", "structured");

    daylog_cmd()
        .current_dir(temp.path())
        .args(["add", "--date", "+12345-01-01", "--title", "Far future"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("outside the supported years"));

    assert!(!temp.path().join("+12345").exists());
}

#[test]
fn test_structured_rejection_hint() {
    let temp = TempDir::new().unwrap();
    init(&temp, "flat", "structured");

    daylog_cmd()
        .current_dir(temp.path())
        .args(["add", "--date", "2025-08-08", "--title", "T", "--body", "x"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("omit --body"))
        .stderr(predicate::str::contains("a body is required").not());
}
