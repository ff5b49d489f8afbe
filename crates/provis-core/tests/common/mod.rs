//! Shared helpers for provis-core integration tests

use std::path::PathBuf;

use provis_core::{Error, RemoteExecutor, Result};

/// Records every call instead of talking to a host.
#[derive(Debug, Default)]
pub struct RecordingExecutor {
    pub commands: Vec<String>,
    pub uploads: Vec<(Vec<PathBuf>, String)>,
    fail_on: Option<String>,
}

#[allow(dead_code)]
impl RecordingExecutor {
    /// An executor that fails any command containing `needle`
    pub fn failing_on(needle: &str) -> Self {
        Self {
            fail_on: Some(needle.to_string()),
            ..Self::default()
        }
    }
}

impl RemoteExecutor for RecordingExecutor {
    fn run_remote(&mut self, command: &str) -> Result<String> {
        self.commands.push(command.to_string());
        match &self.fail_on {
            Some(needle) if command.contains(needle.as_str()) => {
                Err(Error::remote(command, "exit status 1"))
            }
            _ => Ok(format!("ran: {command}\n")),
        }
    }

    fn copy_to_remote(&mut self, local_paths: &[PathBuf], remote_dir: &str) -> Result<()> {
        self.uploads.push((local_paths.to_vec(), remote_dir.to_string()));
        Ok(())
    }
}
