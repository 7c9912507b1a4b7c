#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use assert_cmd::cargo_bin_cmd;
use predicates::prelude::predicate;

/// Adds a show through the CLI into the given data directory.
fn add_show(dir: &std::path::Path, title: &str, start: Option<&str>, end: Option<&str>) {
    let mut cmd = cargo_bin_cmd!("tvguide");
    cmd.args(["--dir", dir.to_str().unwrap(), "show", "add", "--title", title]);
    if let Some(start) = start {
        cmd.args(["--start-time", start]);
    }
    if let Some(end) = end {
        cmd.args(["--end-time", end]);
    }
    cmd.assert().success();
}

/// Renders the schedule and returns captured stdout.
fn render_schedule(dir: &std::path::Path) -> String {
    let mut cmd = cargo_bin_cmd!("tvguide");
    let output = cmd
        .args(["--dir", dir.to_str().unwrap(), "schedule", "render"])
        .output()
        .unwrap();
    assert!(output.status.success());
    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn test_schedule_render_empty() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act
    let fragment = render_schedule(dir.path());

    // Assert: exactly the no-shows message, no list markup
    assert!(fragment.contains("No shows scheduled for today."));
    assert!(!fragment.contains("<ul>"));
}

#[test]
fn test_schedule_render_orders_by_start_time() {
    // Arrange: inserted out of order
    let dir = tempfile::tempdir().unwrap();
    add_show(dir.path(), "Nine", Some("09:00"), None);
    add_show(dir.path(), "Seven", Some("07:00"), None);
    add_show(dir.path(), "Eight", Some("08:00"), None);

    // Act
    let fragment = render_schedule(dir.path());

    // Assert
    let seven = fragment.find("Seven").unwrap();
    let eight = fragment.find("Eight").unwrap();
    let nine = fragment.find("Nine").unwrap();
    assert!(seven < eight);
    assert!(eight < nine);
}

#[test]
fn test_schedule_render_time_range() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    add_show(dir.path(), "Evening News", Some("19:00"), Some("20:00"));

    // Act
    let fragment = render_schedule(dir.path());

    // Assert
    assert!(fragment.contains("Time: 7:00 PM \u{2013} 8:00 PM<br>"));
}

#[test]
fn test_schedule_render_skips_shows_without_start_time() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    add_show(dir.path(), "Scheduled", Some("12:00"), None);
    add_show(dir.path(), "Unscheduled", None, None);

    // Act
    let fragment = render_schedule(dir.path());

    // Assert
    assert!(fragment.contains("Scheduled"));
    assert!(!fragment.contains("Unscheduled"));
}

#[test]
fn test_schedule_render_escapes_markup() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    add_show(dir.path(), "<script>alert(1)</script>", Some("10:00"), None);

    // Act
    let fragment = render_schedule(dir.path());

    // Assert: markup-significant characters render as escaped text
    assert!(fragment.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    assert!(!fragment.contains("<script>"));
}

#[test]
fn test_schedule_render_custom_heading() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    add_show(dir.path(), "Any", Some("10:00"), None);

    // Act
    let mut cmd = cargo_bin_cmd!("tvguide");
    cmd.args([
        "--dir",
        dir.path().to_str().unwrap(),
        "schedule",
        "render",
        "--heading",
        "Tonight on SMG",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("<h2>Tonight on SMG</h2>"));
}

#[test]
fn test_schedule_render_to_file() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    add_show(dir.path(), "Filed", Some("10:00"), None);
    let out = dir.path().join("schedule.html");

    // Act
    let mut cmd = cargo_bin_cmd!("tvguide");
    cmd.args([
        "--dir",
        dir.path().to_str().unwrap(),
        "schedule",
        "render",
        "--out",
        out.to_str().unwrap(),
    ])
    .assert()
    .success();

    // Assert
    let written = std::fs::read_to_string(&out).unwrap();
    assert!(written.contains("<div class=\"tv-guide-schedule\">"));
    assert!(written.contains("Filed"));
}

#[test]
fn test_show_add_invalid_start_time() {
    // Arrange & Act & Assert
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = cargo_bin_cmd!("tvguide");
    cmd.args([
        "--dir",
        dir.path().to_str().unwrap(),
        "show",
        "add",
        "--title",
        "Broken",
        "--start-time",
        "not-a-time",
    ])
    .assert()
    .failure()
    .stderr(predicate::str::contains("invalid --start-time value"));

    // Nothing was written
    let fragment = render_schedule(dir.path());
    assert!(fragment.contains("No shows scheduled for today."));
}

#[test]
fn test_show_add_requires_title() {
    // Arrange & Act & Assert
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = cargo_bin_cmd!("tvguide");
    cmd.args(["--dir", dir.path().to_str().unwrap(), "show", "add"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--title"));
}

#[test]
fn test_show_set_reschedules() {
    // Arrange: id 1 is the first inserted show
    let dir = tempfile::tempdir().unwrap();
    add_show(dir.path(), "Movable", Some("09:00"), None);
    add_show(dir.path(), "Fixed", Some("08:00"), None);

    // Act
    let mut cmd = cargo_bin_cmd!("tvguide");
    cmd.args([
        "--dir",
        dir.path().to_str().unwrap(),
        "show",
        "set",
        "--id",
        "1",
        "--start-time",
        "07:00",
    ])
    .assert()
    .success();

    // Assert: Movable now sorts first
    let fragment = render_schedule(dir.path());
    let movable = fragment.find("Movable").unwrap();
    let fixed = fragment.find("Fixed").unwrap();
    assert!(movable < fixed);
}

#[test]
fn test_show_set_clear_schedule() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    add_show(dir.path(), "Retired", Some("09:00"), Some("10:00"));

    // Act
    let mut cmd = cargo_bin_cmd!("tvguide");
    cmd.args([
        "--dir",
        dir.path().to_str().unwrap(),
        "show",
        "set",
        "--id",
        "1",
        "--clear-schedule",
    ])
    .assert()
    .success();

    // Assert: the show no longer appears in the schedule
    let fragment = render_schedule(dir.path());
    assert!(fragment.contains("No shows scheduled for today."));
}

#[test]
fn test_show_set_missing_id() {
    // Arrange & Act & Assert
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = cargo_bin_cmd!("tvguide");
    cmd.args([
        "--dir",
        dir.path().to_str().unwrap(),
        "show",
        "set",
        "--id",
        "42",
        "--title",
        "Ghost",
    ])
    .assert()
    .failure()
    .stderr(predicate::str::contains("show 42 not found"));
}

#[test]
fn test_show_remove_missing_id() {
    // Arrange & Act & Assert
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = cargo_bin_cmd!("tvguide");
    cmd.args([
        "--dir",
        dir.path().to_str().unwrap(),
        "show",
        "remove",
        "--id",
        "42",
    ])
    .assert()
    .failure()
    .stderr(predicate::str::contains("show 42 not found"));
}

#[test]
fn test_show_remove_then_render() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    add_show(dir.path(), "Cancelled", Some("09:00"), None);

    // Act
    let mut cmd = cargo_bin_cmd!("tvguide");
    cmd.args([
        "--dir",
        dir.path().to_str().unwrap(),
        "show",
        "remove",
        "--id",
        "1",
    ])
    .assert()
    .success();

    // Assert
    let fragment = render_schedule(dir.path());
    assert!(fragment.contains("No shows scheduled for today."));
}

#[test]
fn test_show_add_help() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("tvguide");
    cmd.args(["show", "add", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--start-time"));
}

#[test]
fn test_update_check_requires_repository() {
    // Arrange & Act & Assert
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = cargo_bin_cmd!("tvguide");
    cmd.args(["--dir", dir.path().to_str().unwrap(), "update", "check"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "update.repository is not configured",
        ));
}

#[test]
fn test_update_check_rejects_malformed_repository() {
    // Arrange & Act & Assert
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = cargo_bin_cmd!("tvguide");
    cmd.args([
        "--dir",
        dir.path().to_str().unwrap(),
        "update",
        "check",
        "--repository",
        "no-slash-here",
    ])
    .assert()
    .failure()
    .stderr(predicate::str::contains("expected \"owner/repo\""));
}
