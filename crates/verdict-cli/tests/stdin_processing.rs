//! End-to-end tests piping records through the `verdict` binary.

#![allow(deprecated)] // Command::cargo_bin is deprecated but replacement requires newer assert_cmd

use assert_cmd::Command;
use predicates::prelude::*;

fn verdict() -> Command {
    let mut cmd = Command::cargo_bin("verdict").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

// ============================================================================
// Decisions
// ============================================================================

#[test]
fn admin_is_authorized() {
    verdict()
        .write_stdin("{\"azure.authenticated\":\"true\",\"azure.role\":\"admin\"}\n")
        .assert()
        .success()
        .stdout("authorized\n")
        .stderr("");
}

#[test]
fn unauthenticated_admin_is_unauthorized() {
    verdict()
        .write_stdin("{\"azure.authenticated\":\"false\",\"azure.role\":\"admin\"}\n")
        .assert()
        .success()
        .stdout("unauthorized\n")
        .stderr("");
}

#[test]
fn engineering_developer_is_authorized() {
    verdict()
        .write_stdin(
            "{\"azure.authenticated\":\"true\",\"azure.department\":\"Engineering\",\"azure.groups\":\"developers,qa\"}\n",
        )
        .assert()
        .success()
        .stdout("authorized\n");
}

#[test]
fn example_com_user_is_authorized() {
    verdict()
        .write_stdin(
            "{\"azure.authenticated\":\"true\",\"azure.email\":\"joe@example.com\",\"azure.role\":\"user\"}\n",
        )
        .assert()
        .success()
        .stdout("authorized\n");
}

#[test]
fn guest_is_unauthorized() {
    verdict()
        .write_stdin("{\"azure.authenticated\":\"true\",\"azure.role\":\"guest\"}\n")
        .assert()
        .success()
        .stdout("unauthorized\n");
}

#[test]
fn boolean_attribute_is_coerced() {
    verdict()
        .write_stdin("{\"azure.authenticated\":true,\"azure.role\":\"admin\"}")
        .assert()
        .success()
        .stdout("authorized\n");
}

// ============================================================================
// Malformed Input
// ============================================================================

#[test]
fn malformed_line_fails_closed_and_continues() {
    verdict()
        .write_stdin("not json\n{\"azure.authenticated\":\"true\",\"azure.role\":\"admin\"}\n")
        .assert()
        .success()
        .stdout("unauthorized\nauthorized\n")
        .stderr(predicate::str::contains("Error parsing JSON:"));
}

#[test]
fn array_and_scalar_lines_are_rejected() {
    verdict()
        .write_stdin("[1,2,3]\n\"hello\"\n")
        .assert()
        .success()
        .stdout("unauthorized\nunauthorized\n")
        .stderr(predicate::str::contains("expected a JSON object, found array"))
        .stderr(predicate::str::contains("expected a JSON object, found string"));
}

#[test]
fn blank_lines_produce_no_output() {
    verdict()
        .write_stdin("\n   \n\t\n")
        .assert()
        .success()
        .stdout("")
        .stderr("");
}

#[test]
fn empty_input_exits_cleanly() {
    verdict().write_stdin("").assert().success().stdout("");
}

#[test]
fn output_order_matches_input_order() {
    let input = [
        r#"{"azure.authenticated":"true","azure.role":"guest"}"#,
        r#"{"azure.authenticated":"true","azure.role":"admin"}"#,
        "",
        r#"{"azure.role":"admin"}"#,
        r#"{"azure.authenticated":"true","azure.department":"Engineering","azure.groups":"developers"}"#,
    ]
    .join("\n");

    verdict()
        .write_stdin(input)
        .assert()
        .success()
        .stdout("unauthorized\nauthorized\nunauthorized\nauthorized\n");
}
