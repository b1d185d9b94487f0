// Binary-level checks that run without a terminal: the TUI must refuse to
// start when stdin is not a tty, while the informational flags still work.

use assert_cmd::Command;

#[test]
fn refuses_to_start_without_a_tty() {
    let assert = Command::cargo_bin("bloom").unwrap().assert().failure();

    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).to_string();
    assert!(
        stderr.contains("stdin must be a tty"),
        "unexpected stderr: {stderr}"
    );
}

#[test]
fn version_flag_works_without_a_tty() {
    let assert = Command::cargo_bin("bloom")
        .unwrap()
        .arg("--version")
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    assert!(stdout.contains("bloom"), "unexpected stdout: {stdout}");
}

#[test]
fn help_mentions_the_dev_flag() {
    let assert = Command::cargo_bin("bloom")
        .unwrap()
        .arg("--help")
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    assert!(stdout.contains("--dev"), "unexpected stdout: {stdout}");
}

#[test]
fn rejects_malformed_duration_flags() {
    Command::cargo_bin("bloom")
        .unwrap()
        .args(["-w", "soon"])
        .assert()
        .failure();
}
