use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{ALICE, BOB, init_db_with_data, rat, scan, setup_test_db};

#[test]
fn test_scan_registers_attendees_from_stdin() {
    let db_path = setup_test_db("scan_from_stdin");

    rat()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    rat()
        .args(["--db", &db_path, "scan", "--duration", "60"])
        .write_stdin(format!("{ALICE}\n{BOB}"))
        .assert()
        .success()
        .stdout(contains("Scanner started"))
        .stdout(contains("Captured: Alice (ID: 42)"))
        .stdout(contains("Captured: Bob (ID: 7)"))
        .stdout(contains("Scanner stopped"))
        .stdout(contains("2 attendee(s) captured, 2 in roster."));
}

#[test]
fn test_list_shows_newest_first() {
    let db_path = setup_test_db("list_newest_first");
    init_db_with_data(&db_path);

    let out = rat()
        .args(["--db", &db_path, "list"])
        .output()
        .expect("run list");
    assert!(out.status.success());

    let stdout = String::from_utf8_lossy(&out.stdout);
    let bob = stdout.find("Bob").expect("Bob listed");
    let alice = stdout.find("Alice").expect("Alice listed");
    assert!(bob < alice, "newest scan must come first:\n{stdout}");
    assert!(stdout.contains("14.5, 121"));
    assert!(stdout.contains("1 attendee(s) with a recorded location"));
}

#[test]
fn test_roster_survives_across_scan_windows() {
    let db_path = setup_test_db("roster_survives");
    init_db_with_data(&db_path);

    scan(&db_path, "Name: Carol\nID: 99\n");

    rat()
        .args(["--db", &db_path, "list"])
        .assert()
        .success()
        .stdout(contains("Carol"))
        .stdout(contains("Bob"))
        .stdout(contains("Alice"))
        .stdout(contains("Attendee Records (3)"));
}

#[test]
fn test_unknown_payload_gets_defaults() {
    let db_path = setup_test_db("scan_defaults");

    rat()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    rat()
        .args(["--db", &db_path, "scan"])
        .write_stdin("just some text\n")
        .assert()
        .success()
        .stdout(contains("Captured: Unknown (ID: -)"));
}

#[test]
fn test_list_on_empty_roster() {
    let db_path = setup_test_db("list_empty");

    rat()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    rat()
        .args(["--db", &db_path, "list"])
        .assert()
        .success()
        .stdout(contains("No attendees recorded yet."));
}

#[test]
fn test_scan_writes_audit_log() {
    let db_path = setup_test_db("scan_audit_log");
    init_db_with_data(&db_path);

    rat()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("migration_applied"))
        .stdout(contains("Alice").and(contains("Bob")))
        .stdout(contains("2 captured, 0 failed scans"));
}
