#![allow(dead_code)]

use assert_cmd::Command;
use std::path::Path;

pub fn daylog_cmd() -> Command {
    let mut cmd = Command::cargo_bin("daylog").unwrap();
    cmd.env_remove("DAYLOG_ROOT");
    cmd.env_remove("DAYLOG_LOG");
    cmd
}

/// Run `daylog add` in `dir` and return the printed slug
pub fn add_entry(dir: &Path, args: &[&str]) -> String {
    let output = daylog_cmd()
        .current_dir(dir)
        .arg("add")
        .args(args)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "add failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).unwrap().trim().to_string()
}
