//! End-to-end integration test for a full provisioning pass
//!
//! This test exercises the complete flow: settings -> layered sources ->
//! target resolution -> node build -> staged chef-solo run -> upload.

use std::path::PathBuf;

use pretty_assertions::assert_eq;
use provis_core::config::{ConfigResolver, Settings, SourceLoader, TemplateVars};
use provis_core::{Bootstrap, Config, Document, RemoteExecutor, Result, SoloRun};
use provis_fs::{DocumentFormat, NormalizedPath};
use provis_test_utils::{DEMO_IP, TestWorkspace, WEB_IP, chef_fixture};
use serde_json::json;

#[derive(Default)]
struct Recorder {
    log: Vec<String>,
}

impl RemoteExecutor for Recorder {
    fn run_remote(&mut self, command: &str) -> Result<String> {
        self.log.push(format!("run {command}"));
        Ok(String::new())
    }

    fn copy_to_remote(&mut self, local_paths: &[PathBuf], remote_dir: &str) -> Result<()> {
        self.log.push(format!("copy {} -> {remote_dir}", local_paths.len()));
        Ok(())
    }
}

/// Workspace with the fixture registry plus a local override file
fn setup() -> (TestWorkspace, Config) {
    let ws = TestWorkspace::new();
    let local = ws.write(
        "local.yml",
        "servers:\n  demo.sharespost.com:\n    color: ${DEMO_COLOR:-teal}\nremote_chef_dir: /opt/chef\n",
    );
    ws.mkdir("roles");
    ws.mkdir("cookbooks");

    let settings = Settings::new()
        .yml_files(vec![
            chef_fixture("chef.yml").to_string_lossy().into_owned(),
            local.to_string_lossy().into_owned(),
        ])
        .roles_path(ws.path("roles").to_string_lossy().into_owned())
        .cookbook_path(ws.path("cookbooks").to_string_lossy().into_owned())
        .node_attribute("environment", "staging");

    let config = ConfigResolver::new(settings)
        .with_loader(SourceLoader::with_vars(TemplateVars::isolated()))
        .resolve();
    (ws, config)
}

#[test]
fn test_local_override_merges_into_registry() {
    let (_ws, config) = setup();

    let demo = config
        .registry()
        .find_server_config_by_name("demo.sharespost.com")
        .unwrap();
    assert_eq!(demo.get_str("color").unwrap(), Some("teal"));
    assert_eq!(demo.get_str("ip_address").unwrap(), Some(DEMO_IP));
    assert_eq!(config.remote_chef_dir().unwrap(), "/opt/chef");
    assert_eq!(config.document().get_str("environment").unwrap(), Some("staging"));

    // The override changed the color filter result
    assert_eq!(config.resolve_targets("color:green").unwrap(), Vec::<String>::new());
    assert_eq!(config.resolve_targets("color:teal").unwrap(), vec![DEMO_IP]);
}

#[test]
fn test_full_run_for_every_target() {
    let (ws, config) = setup();
    let targets = config.resolve_targets("rails_env:demo").unwrap();
    assert_eq!(targets, vec![WEB_IP, DEMO_IP]);

    for ip in &targets {
        let mut options = Document::new();
        options.insert("ip_address", ip.as_str());
        options.insert("chef_args", "-l info");
        let run = SoloRun::new(config.node_builder().from_options(options).unwrap());

        let mut recorder = Recorder::default();
        run.execute(&ws.path(&format!("staging/{ip}")), &mut recorder)
            .unwrap();

        assert_eq!(
            recorder.log,
            vec![
                "run mkdir -p /opt/chef".to_string(),
                "copy 5 -> /opt/chef".to_string(),
                "run bash --login -c /opt/chef/run_chef_solo".to_string(),
            ]
        );

        let node: serde_json::Value =
            serde_json::from_str(&ws.read(&format!("staging/{ip}/node.json"))).unwrap();
        assert_eq!(node["ip_address"], ip.as_str());
        assert_eq!(node["rails_env"], "demo");
        assert_eq!(node["environment"], "staging");
    }
}

#[test]
fn test_saved_node_json_reloads_identically() {
    let (ws, config) = setup();
    let path = ws.path("out/node.json");

    config.save_node_json(&path).unwrap();
    let reloaded = Config::from_json_file(&path).unwrap();

    assert_eq!(reloaded, config);
    assert_eq!(
        reloaded.resolve_targets("rails_env:demo").unwrap(),
        config.resolve_targets("rails_env:demo").unwrap()
    );
}

#[test]
fn test_yaml_rendering_roundtrip() {
    let (ws, config) = setup();
    let path = NormalizedPath::new(ws.path("rendered.yml"));

    let rendered = DocumentFormat::Yaml.render(config.document(), &path).unwrap();
    let parsed: Document = DocumentFormat::Yaml.parse(&rendered, &path).unwrap();

    assert_eq!(&parsed, config.document());
}

#[test]
fn test_bootstrap_plan_from_same_config() {
    let (_ws, config) = setup();
    let overrides = Document::from_value(json!({"ip_address": WEB_IP})).unwrap();

    let bootstrap = Bootstrap::resolve(&config, &overrides).unwrap();
    let mut recorder = Recorder::default();
    bootstrap.run(&mut recorder).unwrap();

    assert_eq!(recorder.log.len(), 9);
    assert!(recorder.log[8].contains("gem install rspec -v 2.11.0"));
}
