//! CLI end-to-end tests that invoke the compiled `provis` binary.
//!
//! Every test points `-f` at the shared chef fixtures so the working
//! directory never matters.

use assert_cmd::Command;
use predicates::prelude::*;
use provis_test_utils::{DB_IP, DEMO_IP, TestWorkspace, WEB_IP, chef_fixture};
use rstest::rstest;

/// Get a Command for the provis binary with no inherited source list
fn provis_cmd() -> Command {
    let mut cmd = Command::cargo_bin("provis").expect("Failed to find provis binary");
    cmd.env_remove("PROVIS_YML_FILES").env_remove("RUST_LOG");
    cmd
}

fn fixture_arg(name: &str) -> String {
    chef_fixture(name).to_string_lossy().into_owned()
}

// ============================================================================
// Help and Version
// ============================================================================

#[test]
fn test_help_output() {
    provis_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("targets"))
        .stdout(predicate::str::contains("bootstrap-plan"));
}

#[test]
fn test_no_command_prints_hint() {
    provis_cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("provis --help"));
}

// ============================================================================
// targets
// ============================================================================

#[rstest]
#[case(&["rails_env:demo"], &[WEB_IP, DEMO_IP])]
#[case(&["rails_env:demo", "color:green"], &[DEMO_IP])]
#[case(&["demo.sharespost.com", "db.sharespost.com"], &[DEMO_IP, DB_IP])]
#[case(&["ip_address:1.2.3.4"], &["1.2.3.4"])]
fn test_targets(#[case] query: &[&str], #[case] expected: &[&str]) {
    let mut expected_out = expected.join("\n");
    expected_out.push('\n');

    provis_cmd()
        .args(["-f", &fixture_arg("chef.yml"), "targets"])
        .args(query)
        .assert()
        .success()
        .stdout(expected_out);
}

#[test]
fn test_targets_json() {
    let output = provis_cmd()
        .args(["-f", &fixture_arg("hello_world_chef.yml"), "targets", "--json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let targets: Vec<String> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(targets, vec![WEB_IP]);
}

#[test]
fn test_targets_from_env_sources() {
    provis_cmd()
        .env("PROVIS_YML_FILES", fixture_arg("hello_world_chef.yml"))
        .arg("targets")
        .assert()
        .success()
        .stdout(format!("{WEB_IP}\n"));
}

#[test]
fn test_targets_with_no_match_warns() {
    provis_cmd()
        .args(["-f", &fixture_arg("chef.yml"), "targets", "rails_env:demo", "color:yellow"])
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("No targets matched"));
}

#[test]
fn test_missing_source_is_not_an_error() {
    let ws = TestWorkspace::new();
    provis_cmd()
        .current_dir(ws.root())
        .args(["targets", "10.0.0.1"])
        .assert()
        .success()
        .stdout("10.0.0.1\n");
}

// ============================================================================
// servers
// ============================================================================

#[test]
fn test_servers_lists_in_declaration_order() {
    provis_cmd()
        .args(["-f", &fixture_arg("chef.yml"), "servers", "rails_env:demo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("web.sharespost.com"))
        .stdout(predicate::str::contains("demo.sharespost.com"))
        .stdout(predicate::str::contains("db.sharespost.com").not());
}

#[test]
fn test_servers_rejects_bare_words() {
    provis_cmd()
        .args(["-f", &fixture_arg("chef.yml"), "servers", "demo"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("key:value"));
}

// ============================================================================
// node
// ============================================================================

#[test]
fn test_node_layers_server_and_overrides() {
    let output = provis_cmd()
        .args(["-f", &fixture_arg("chef.yml"), "node", DB_IP, "-s", "color=purple"])
        .args(["--chef-args", "-l debug", "--quiet"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let node: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(node["color"], "purple");
    assert_eq!(node["adapter"], "mysql2");
    assert_eq!(node["ip_address"], DB_IP);
    assert!(node.get("chef_args").is_none());
    assert!(node.get("quiet").is_none());
}

#[test]
fn test_node_attributes_are_overridden_by_sources() {
    let output = provis_cmd()
        .args(["-f", &format!("{},{}", fixture_arg("foo.yml"), fixture_arg("bar.yml"))])
        .args(["-a", "another_node_attribute=cold", "-a", "temperature=warm", "node"])
        .output()
        .unwrap();

    let node: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(node["another_node_attribute"], "hot");
    assert_eq!(node["temperature"], "warm");
    assert_eq!(node["blah"], "bar");
}

#[test]
fn test_node_rejects_bad_options() {
    provis_cmd()
        .args(["node", "--options", "[1, 2]"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("JSON object"));
}

// ============================================================================
// save-node-json and stage
// ============================================================================

#[test]
fn test_save_node_json() {
    let ws = TestWorkspace::new();
    let output = ws.path("foo/chef/node.json");

    provis_cmd()
        .args(["-f", &fixture_arg("foo.yml"), "save-node-json"])
        .arg(&output)
        .assert()
        .success();

    ws.assert_file_contains("foo/chef/node.json", "\"blah\": \"bar\"");
}

#[test]
fn test_stage_per_target() {
    let ws = TestWorkspace::new();
    let out = ws.path("staging");

    provis_cmd()
        .args(["-f", &fixture_arg("chef.yml"), "stage", "rails_env:demo", "--out"])
        .arg(&out)
        .args(["--chef-args", "-l debug"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Staged"));

    ws.assert_file_contains(&format!("staging/{WEB_IP}/node.json"), "hello_world");
    ws.assert_file_contains(&format!("staging/{DEMO_IP}/node.json"), "green");
    ws.assert_file_contains(&format!("staging/{DEMO_IP}/run_chef_solo"), "-l debug");
    ws.assert_file_exists(&format!("staging/{DEMO_IP}/solo.rb"));
}

#[test]
fn test_stage_without_targets_fails() {
    let ws = TestWorkspace::new();
    provis_cmd()
        .current_dir(ws.root())
        .args(["stage", "--out", "staging"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No targets matched"));
}

// ============================================================================
// bootstrap-plan and completions
// ============================================================================

#[test]
fn test_bootstrap_plan_json() {
    let output = provis_cmd()
        .args(["-f", &fixture_arg("chef.yml"), "bootstrap-plan", "1.2.3.4", "--json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let commands: Vec<String> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(commands.len(), 9);
    assert!(commands.contains(&"source /etc/profile.d/rvm.sh && rvm install 1.9.2".to_string()));
}

#[test]
fn test_bootstrap_plan_ruby_override() {
    provis_cmd()
        .args(["bootstrap-plan", "1.2.3.4", "--ruby-version", "2.0.0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rvm use 2.0.0 --default"));
}

#[test]
fn test_completions() {
    provis_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("provis"));
}
