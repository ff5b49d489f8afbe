//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// provis - Resolve layered chef configuration into targets and node runs
#[derive(Parser, Debug)]
#[command(name = "provis")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub config: ConfigArgs,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Where the configuration comes from
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ConfigArgs {
    /// Configuration sources, merged in order (later files win)
    #[arg(
        short = 'f',
        long = "yml-file",
        global = true,
        env = "PROVIS_YML_FILES",
        value_delimiter = ',',
        default_value = "chef.yml"
    )]
    pub yml_files: Vec<String>,

    /// Remote working directory [default: /var/chef]
    #[arg(long, global = true)]
    pub remote_chef_dir: Option<String>,

    /// Local roles directories
    #[arg(long, global = true)]
    pub roles_path: Vec<String>,

    /// Local spec directories
    #[arg(long, global = true)]
    pub spec_path: Vec<String>,

    /// Local cookbook directories
    #[arg(long, global = true)]
    pub cookbook_path: Vec<String>,

    /// Node attribute (key=value) applied before the source files
    #[arg(short = 'a', long = "attribute", global = true, value_parser = parse_key_val)]
    pub attributes: Vec<(String, String)>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Resolve a query to target IP addresses
    ///
    /// Examples:
    ///   provis targets rails_env:demo              # Servers with rails_env demo
    ///   provis targets rails_env:demo color:green  # Every attribute must match
    ///   provis targets web.example.com 10.0.0.5    # Names and addresses
    ///   provis targets                             # Top-level ip_address
    Targets {
        /// Query tokens, joined with spaces
        query: Vec<String>,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// List registered servers, optionally filtered by key:value criteria
    Servers {
        /// key:value criteria; all must match
        criteria: Vec<String>,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Print the node configuration for a target
    Node {
        /// Target IP address
        target: Option<String>,

        /// Override an attribute (key=value)
        #[arg(short = 's', long = "set", value_parser = parse_key_val)]
        set: Vec<(String, String)>,

        /// Options as a JSON object, applied before --set
        #[arg(long)]
        options: Option<String>,

        /// Extra arguments for chef-solo
        #[arg(long, allow_hyphen_values = true)]
        chef_args: Option<String>,

        /// Mark the run as quiet
        #[arg(long)]
        quiet: bool,
    },

    /// Write the canonical configuration as node JSON
    SaveNodeJson {
        /// Output file
        path: PathBuf,
    },

    /// Stage chef-solo runs for every target of a query
    ///
    /// Each target gets its own directory under --out, named by address.
    Stage {
        /// Query tokens, joined with spaces
        query: Vec<String>,

        /// Directory to stage into
        #[arg(short, long)]
        out: PathBuf,

        /// Extra arguments for chef-solo
        #[arg(long, allow_hyphen_values = true)]
        chef_args: Option<String>,
    },

    /// Print the commands that would bootstrap a host
    BootstrapPlan {
        /// Host address
        ip: String,

        /// Ruby version to install
        #[arg(long)]
        ruby_version: Option<String>,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Parse `key=value`; the value may itself contain `=`
fn parse_key_val(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected key=value, got '{raw}'")),
    }
}
