//! CLI tests for `propstore query|set|unset`.
//!
//! Spawns the binary against a temporary config and settings file and checks
//! stdout plus exit codes.

use std::process::{Command, Output};

use propstore::exit_codes;
use propstore::store::{BUILD_PRODUCT_VERSION, BUILD_TOOL_VERSION};
use propstore::test_support::TestEnv;

fn propstore(env: &TestEnv, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_propstore"))
        .current_dir(env.path())
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(&env.config_path)
        .args(args)
        .output()
        .expect("run propstore")
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("utf8 stdout")
}

#[test]
fn set_then_query_round_trips_across_invocations() {
    let env = TestEnv::new().expect("env");

    let set = propstore(&env, &["set", "A", "1", "B", "two words"]);
    assert_eq!(set.status.code(), Some(exit_codes::OK));
    assert!(set.stdout.is_empty());

    let single = propstore(&env, &["query", "B"]);
    assert_eq!(single.status.code(), Some(exit_codes::OK));
    assert_eq!(stdout(&single), "two words\n");

    let multi = propstore(&env, &["query", "A", "B"]);
    assert_eq!(stdout(&multi), "A:1\nB:two words\n");
}

#[test]
fn unknown_property_fails_with_marker() {
    let env = TestEnv::new().expect("env");

    let output = propstore(&env, &["query", "INSTALL_PREFIX", "missing"]);
    assert_eq!(output.status.code(), Some(exit_codes::FAILED));
    assert_eq!(
        stdout(&output),
        "INSTALL_PREFIX:/opt/tool\nmissing:**Unknown**\n"
    );
}

#[test]
fn unpaired_set_fails_after_applying_pairs() {
    let env = TestEnv::new().expect("env");

    let output = propstore(&env, &["set", "A", "1", "B"]);
    assert_eq!(output.status.code(), Some(exit_codes::FAILED));

    assert_eq!(stdout(&propstore(&env, &["query", "A"])), "1\n");
    let missing = propstore(&env, &["query", "B"]);
    assert_eq!(missing.status.code(), Some(exit_codes::FAILED));
    assert_eq!(stdout(&missing), "**Unknown**\n");
}

#[test]
fn unset_removes_property() {
    let env = TestEnv::new().expect("env");

    propstore(&env, &["set", "A", "1"]);
    let unset = propstore(&env, &["unset", "A", ".hidden"]);
    assert_eq!(unset.status.code(), Some(exit_codes::OK));

    let output = propstore(&env, &["query", "A"]);
    assert_eq!(output.status.code(), Some(exit_codes::FAILED));
}

#[test]
fn query_falls_back_to_older_version() {
    let env = TestEnv::new().expect("env");
    env.write_settings("[\"0.0.1\"]\nX = \"old\"\n[\"99.0\"]\nX = \"future\"\n")
        .expect("settings");

    let output = propstore(&env, &["query", "X"]);
    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert_eq!(stdout(&output), "old\n");
}

#[test]
fn dump_lists_persisted_then_computed() {
    let env = TestEnv::new().expect("env");
    env.write_settings(&format!(
        "[\"0.0.1\"]\nX = \"old\"\n[\"{BUILD_TOOL_VERSION}\"]\nY = \"new\"\n"
    ))
    .expect("settings");

    let output = propstore(&env, &["query"]);
    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let text = stdout(&output);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(&lines[..2], &["Y:new", "0.0.1/X:old"]);
    assert!(lines.contains(&"INSTALL_LIBS:/opt/tool/lib"));
    assert!(lines.contains(&"RAW_INSTALL_LIBS:${prefix}/lib"));
    assert!(lines.contains(&"SPEC_PATHS:/opt/tool/specs"));
    let computed = 29 + 2 + usize::from(BUILD_PRODUCT_VERSION.is_some());
    assert_eq!(lines.len(), 2 + computed);
}

#[test]
fn corrupt_settings_file_is_an_error() {
    let env = TestEnv::new().expect("env");
    env.write_settings("not = [valid").expect("settings");

    let output = propstore(&env, &["query", "X"]);
    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("parse settings"));
}

#[test]
fn computed_query_does_not_create_settings_file() {
    let env = TestEnv::new().expect("env");

    let output = propstore(&env, &["query", "TOOL_VERSION"]);
    assert_eq!(stdout(&output), format!("{BUILD_TOOL_VERSION}\n"));
    assert!(!env.settings_path.exists());
}
