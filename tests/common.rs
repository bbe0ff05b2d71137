#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub const ALICE: &str = "Name: Alice\nID: 42\n";
pub const BOB: &str = "Name: Bob\nID: 7\nLatitude: 14.5\nLongitude: 121.0\n";

pub fn rat() -> Command {
    cargo_bin_cmd!("rattendance")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rattendance.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create an empty output directory inside the system temp dir
pub fn temp_dir(name: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rattendance_out", name));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).expect("create temp dir");
    path
}

/// Initialize the DB and scan Alice then Bob (Bob ends up first).
pub fn init_db_with_data(db_path: &str) {
    rat()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    scan(db_path, &format!("{ALICE}\n{BOB}"));
}

/// Run one scan window fed with `input`.
pub fn scan(db_path: &str, input: &str) {
    rat()
        .args(["--db", db_path, "scan", "--duration", "60"])
        .write_stdin(input.to_string())
        .assert()
        .success();
}
