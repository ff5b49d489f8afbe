//! Handing a node run to a remote executor
//!
//! The transport itself lives outside this crate. [`RemoteExecutor`] is the
//! seam: this module renders the chef-solo artifacts for a [`NodeRun`],
//! stages them locally and drives the executor through the run.

use std::path::{Path, PathBuf};

use provis_fs::{NormalizedPath, expand_paths, io};

use crate::error::Result;
use crate::node::NodeRun;

/// File name of the staged node configuration
pub const NODE_JSON: &str = "node.json";

/// File name of the staged chef-solo configuration
pub const SOLO_RB: &str = "solo.rb";

/// File name of the staged run script
pub const RUN_SCRIPT: &str = "run_chef_solo";

/// A connection to one remote host
pub trait RemoteExecutor {
    /// Run `command` on the remote host, returning its output
    fn run_remote(&mut self, command: &str) -> Result<String>;

    /// Copy local files or directories into `remote_dir`
    fn copy_to_remote(&mut self, local_paths: &[PathBuf], remote_dir: &str) -> Result<()>;
}

/// A chef-solo run for one node
#[derive(Debug, Clone)]
pub struct SoloRun {
    node: NodeRun,
}

impl SoloRun {
    pub fn new(node: NodeRun) -> Self {
        Self { node }
    }

    pub fn node(&self) -> &NodeRun {
        &self.node
    }

    /// Contents of `solo.rb`
    pub fn solo_rb(&self) -> Result<String> {
        let dir = self.node.remote_chef_dir()?;
        Ok(format!(
            "file_cache_path \"{dir}\"\n\
             cookbook_path [\"{dir}/cookbooks\"]\n\
             role_path \"{dir}/roles\"\n\
             cache_options({{ :path => \"{dir}/cache/checksums\", :skip_expires => true }})\n"
        ))
    }

    /// Contents of the run script; extra script arguments pass through
    pub fn run_script(&self) -> Result<String> {
        let dir = self.node.remote_chef_dir()?;
        let chef_args = self.node.chef_args.as_deref().unwrap_or("");
        Ok(format!(
            "#!/bin/bash\n\
             # Pass \"-l debug\" to this script to get more debug output\n\
             \n\
             chef-solo $@ {chef_args} -j {dir}/{NODE_JSON} -c {dir}/{SOLO_RB}\n"
        ))
    }

    /// The node configuration as indented JSON
    pub fn node_json(&self) -> Result<String> {
        self.node.config.to_json_pretty()
    }

    /// Write the run artifacts into `dir`, returning the written paths
    pub fn stage(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let staging = NormalizedPath::new(dir);
        let artifacts = [
            (SOLO_RB, self.solo_rb()?),
            (RUN_SCRIPT, self.run_script()?),
            (NODE_JSON, self.node_json()?),
        ];

        let mut written = Vec::with_capacity(artifacts.len());
        for (name, content) in artifacts {
            let path = staging.join(name);
            io::write_text(&path, &content)?;
            written.push(path.to_native());
        }
        make_executable(&staging.join(RUN_SCRIPT).to_native())?;

        tracing::debug!(dir = %staging, "Staged chef-solo run");
        Ok(written)
    }

    /// Everything copied to the remote directory: the staged artifacts,
    /// then the roles, cookbook and spec paths.
    pub fn upload_paths(&self, staged: Vec<PathBuf>) -> Result<Vec<PathBuf>> {
        let config = &self.node.config;
        let extra = expand_paths([
            config.get_string_list("roles_path")?,
            config.get_string_list("cookbook_path")?,
            config.get_string_list("spec_path")?,
        ])?;
        Ok(staged.into_iter().chain(extra).collect())
    }

    /// Stage into `staging_dir`, upload and run chef-solo through `executor`
    pub fn execute(&self, staging_dir: &Path, executor: &mut dyn RemoteExecutor) -> Result<()> {
        let remote_dir = self.node.remote_chef_dir()?.to_string();
        let staged = self.stage(staging_dir)?;
        let uploads = self.upload_paths(staged)?;

        self.log_command(&format!("mkdir -p {remote_dir}"), executor)?;
        executor.copy_to_remote(&uploads, &remote_dir)?;
        self.log_command(&format!("bash --login -c {remote_dir}/{RUN_SCRIPT}"), executor)?;
        Ok(())
    }

    fn log_command(&self, command: &str, executor: &mut dyn RemoteExecutor) -> Result<()> {
        let output = executor.run_remote(command)?;
        if !self.node.quiet {
            tracing::info!(command, output = %output.trim_end(), "Remote command finished");
        }
        Ok(())
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))?;
    Ok(())
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}
