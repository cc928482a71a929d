use assert_cmd::Command;
use std::path::Path;

pub fn habitlog_cmd() -> Command {
    let mut cmd = Command::cargo_bin("habitlog").unwrap();
    cmd.env_remove("HABITLOG_ROOT");
    cmd.env_remove("HABITLOG_TODAY");
    cmd.env_remove("HABITLOG_LOG");
    cmd
}

/// Command running inside `root` with a fixed today
#[allow(dead_code)]
pub fn habitlog_at(root: &Path, today: &str) -> Command {
    let mut cmd = habitlog_cmd();
    cmd.current_dir(root).env("HABITLOG_TODAY", today);
    cmd
}
