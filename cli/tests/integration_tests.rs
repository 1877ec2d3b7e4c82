use std::fs;
use std::process::{Command, Output};

fn cidrcalc(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cidrcalc"))
        .args(args)
        .env_remove("CIDRCALC_SCHEMA")
        .env_remove("CIDRCALC_LOG")
        .output()
        .expect("failed to run cidrcalc")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

#[test]
fn no_arguments_prints_usage() {
    let out = cidrcalc(&[]);
    assert_eq!(out.status.code(), Some(0));
    let text = stdout(&out);
    assert!(text.contains("Usage: cidrcalc <command> [switches]"));
    assert!(text.contains("cidrcalc cidr --cidr|-c <a.b.c.d/n>"));
}

#[test]
fn combined_notation_prints_network_details() {
    let out = cidrcalc(&["cidr", "-c", "10.0.0.0/24"]);
    assert_eq!(out.status.code(), Some(0), "stderr: {}", stderr(&out));
    let text = stdout(&out);
    assert!(text.contains("Network:      10.0.0.0/24"));
    assert!(text.contains("Broadcast:    10.0.0.255"));
    assert!(text.contains("Usable hosts: 254"));
}

#[test]
fn separate_flags_print_network_details() {
    let out = cidrcalc(&["cidr", "--ip", "192.168.10.130", "--cidr-bits", "26"]);
    assert_eq!(out.status.code(), Some(0), "stderr: {}", stderr(&out));
    let text = stdout(&out);
    assert!(text.contains("Network:      192.168.10.128/26"));
    assert!(text.contains("Last host:    192.168.10.190"));
}

#[test]
fn ipv6_block_is_supported() {
    let out = cidrcalc(&["cidr", "-c", "2001:db8::/126"]);
    assert_eq!(out.status.code(), Some(0), "stderr: {}", stderr(&out));
    assert!(stdout(&out).contains("Last address: 2001:db8::3"));
}

#[test]
fn missing_second_flag_exits_with_usage_status() {
    let out = cidrcalc(&["cidr", "-i", "10.0.0.0"]);
    assert_eq!(out.status.code(), Some(2));
    let text = stderr(&out);
    assert!(text.contains("Missing arguments for 'cidr': --cidr-bits|-cb"));
    assert!(text.contains("(missing)"));
}

#[test]
fn unknown_command_is_reported() {
    let out = cidrcalc(&["bogus"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(stderr(&out).starts_with("unknown command 'bogus'"));
}

#[test]
fn orphan_value_is_a_fatal_error() {
    let out = cidrcalc(&["cidr", "10.0.0.0/24"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("error: CMDARG_NOKEY: value '10.0.0.0/24'"));
}

#[test]
fn out_of_range_prefix_fails_in_handler() {
    let out = cidrcalc(&["cidr", "-c", "10.0.0.0/40"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("prefix length 40 out of range for IPv4"));
}

#[test]
fn version_command_and_flag_agree() {
    let expected = format!("cidrcalc {}\n", env!("CARGO_PKG_VERSION"));

    let out = cidrcalc(&["version"]);
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(stdout(&out), expected);

    let out = cidrcalc(&["--version"]);
    assert_eq!(stdout(&out), expected);
}

#[test]
fn help_flag_prints_usage() {
    let out = cidrcalc(&["-h"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(stdout(&out).contains("Commands:"));
}

// ---------------------------------------------------------------------------
// Declarative schema packages
// ---------------------------------------------------------------------------

#[test]
fn schema_package_adds_commands() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("extra.yaml");
    fs::write(
        &path,
        r#"
version: "1.0"
commands:
  - name: greet
    description: Say hello.
    switch_sets:
      - - name: who
          switches: ["-n", "--name"]
"#,
    )
    .unwrap();

    let out = Command::new(env!("CARGO_BIN_EXE_cidrcalc"))
        .args(["greet", "--name", "world"])
        .env("CIDRCALC_SCHEMA", &path)
        .output()
        .expect("failed to run cidrcalc");

    assert_eq!(out.status.code(), Some(0), "stderr: {}", stderr(&out));
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["name"], "greet");
    assert_eq!(json["chains"][0]["nodes"][0]["value"], "world");
}

#[test]
fn conflicting_schema_package_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("conflict.json");
    fs::write(&path, r#"{ "version": "1.0", "commands": [ { "name": "cidr" } ] }"#).unwrap();

    let out = Command::new(env!("CARGO_BIN_EXE_cidrcalc"))
        .arg("version")
        .env("CIDRCALC_SCHEMA", &path)
        .output()
        .expect("failed to run cidrcalc");

    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("duplicate command in registry: cidr"));
}
