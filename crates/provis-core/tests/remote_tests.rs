//! Tests for chef-solo staging and remote execution

mod common;

use common::RecordingExecutor;
use pretty_assertions::assert_eq;
use provis_core::config::{ConfigResolver, Settings, SourceLoader, TemplateVars};
use provis_core::remote::{NODE_JSON, RUN_SCRIPT, SOLO_RB};
use provis_core::{Config, Document, Error, SoloRun};
use provis_test_utils::{TestWorkspace, WEB_IP, chef_fixture};
use serde_json::{Value, json};

fn solo_run(ws: &TestWorkspace, options: Value) -> SoloRun {
    let roles = ws.mkdir("roles");
    let cookbooks = ws.mkdir("cookbooks");
    let settings = Settings::new()
        .yml_files(chef_fixture("hello_world_chef.yml").to_string_lossy().into_owned())
        .roles_path(roles.to_string_lossy().into_owned())
        .cookbook_path(cookbooks.to_string_lossy().into_owned());
    let config = ConfigResolver::new(settings)
        .with_loader(SourceLoader::with_vars(TemplateVars::isolated()))
        .resolve();

    let node = config
        .node_builder()
        .from_options(Document::from_value(options).unwrap())
        .unwrap();
    SoloRun::new(node)
}

#[test]
fn test_stage_writes_artifacts() {
    let ws = TestWorkspace::new();
    let run = solo_run(&ws, json!({"chef_args": "-l debug"}));

    let staged = run.stage(&ws.path("staging")).unwrap();

    assert_eq!(staged.len(), 3);
    ws.assert_file_contains("staging/solo.rb", "role_path \"/var/chef/roles\"");
    ws.assert_file_contains(
        "staging/run_chef_solo",
        "chef-solo $@ -l debug -j /var/chef/node.json -c /var/chef/solo.rb",
    );

    let node: Value = serde_json::from_str(&ws.read("staging/node.json")).unwrap();
    assert_eq!(node["ip_address"], WEB_IP);
    assert_eq!(node["recipes"], json!(["recipe[hello_world]"]));
    assert!(node.get("chef_args").is_none());
}

#[cfg(unix)]
#[test]
fn test_run_script_is_executable() {
    use std::os::unix::fs::PermissionsExt;

    let ws = TestWorkspace::new();
    let run = solo_run(&ws, json!({}));
    run.stage(&ws.path("staging")).unwrap();

    let mode = std::fs::metadata(ws.path("staging/run_chef_solo"))
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o755);
}

#[test]
fn test_execute_drives_executor_in_order() {
    let ws = TestWorkspace::new();
    let run = solo_run(&ws, json!({"quiet": true}));
    let mut executor = RecordingExecutor::default();

    run.execute(&ws.path("staging"), &mut executor).unwrap();

    assert_eq!(
        executor.commands,
        vec![
            "mkdir -p /var/chef".to_string(),
            "bash --login -c /var/chef/run_chef_solo".to_string(),
        ]
    );
    assert_eq!(executor.uploads.len(), 1);

    let (paths, remote_dir) = &executor.uploads[0];
    assert_eq!(remote_dir, "/var/chef");
    let names: Vec<_> = paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec![SOLO_RB, RUN_SCRIPT, NODE_JSON, "roles", "cookbooks"]);
    assert!(paths.iter().all(|p| p.is_absolute()));
}

#[test]
fn test_execute_respects_remote_dir_override() {
    let ws = TestWorkspace::new();
    let run = solo_run(&ws, json!({"remote_chef_dir": "/opt/chef"}));
    let mut executor = RecordingExecutor::default();

    run.execute(&ws.path("staging"), &mut executor).unwrap();

    assert_eq!(executor.commands[0], "mkdir -p /opt/chef");
    assert_eq!(executor.uploads[0].1, "/opt/chef");
    ws.assert_file_contains("staging/solo.rb", "file_cache_path \"/opt/chef\"");
}

#[test]
fn test_execute_stops_when_mkdir_fails() {
    let ws = TestWorkspace::new();
    let run = solo_run(&ws, json!({}));
    let mut executor = RecordingExecutor::failing_on("mkdir");

    let err = run.execute(&ws.path("staging"), &mut executor).unwrap_err();

    assert!(matches!(err, Error::Remote { .. }));
    assert!(executor.uploads.is_empty());
}

#[test]
fn test_empty_config_still_stages() {
    let ws = TestWorkspace::new();
    let node = Config::empty().node_builder().from_options(Document::new()).unwrap();

    SoloRun::new(node).stage(&ws.path("bare")).unwrap();

    assert_eq!(ws.read("bare/node.json").trim(), "{}");
}
