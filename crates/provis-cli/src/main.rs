//! provis CLI
//!
//! Resolves layered chef configuration into target addresses, node
//! configurations and staged chef-solo runs.

mod cli;
mod commands;
mod error;
mod logging;

use clap::{CommandFactory, Parser};
use colored::Colorize;

use cli::{Cli, Commands};
use commands::node::NodeArgs;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    tracing::debug!(sources = ?cli.config.yml_files, "Starting provis");

    match cli.command {
        Some(cmd) => execute_command(&cli.config, cmd),
        None => {
            println!("{} Chef configuration resolver", "provis".green().bold());
            println!();
            println!("Run {} for available commands.", "provis --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(config_args: &cli::ConfigArgs, cmd: Commands) -> Result<()> {
    // Completions never need the configuration
    if let Commands::Completions { shell } = cmd {
        clap_complete::generate(shell, &mut Cli::command(), "provis", &mut std::io::stdout());
        return Ok(());
    }

    let config = commands::load_config(config_args);
    match cmd {
        Commands::Targets { query, json } => {
            commands::run_targets(&config, &commands::join_query(&query), json)
        }
        Commands::Servers { criteria, json } => {
            commands::run_servers(&config, &commands::join_query(&criteria), json)
        }
        Commands::Node {
            target,
            set,
            options,
            chef_args,
            quiet,
        } => commands::run_node(
            &config,
            &NodeArgs {
                target: target.as_deref(),
                options: options.as_deref(),
                set: &set,
                chef_args: chef_args.as_deref(),
                quiet,
            },
        ),
        Commands::SaveNodeJson { path } => commands::run_save_node_json(&config, &path),
        Commands::Stage {
            query,
            out,
            chef_args,
        } => commands::run_stage(
            &config,
            &commands::join_query(&query),
            &out,
            chef_args.as_deref(),
        ),
        Commands::BootstrapPlan {
            ip,
            ruby_version,
            json,
        } => commands::run_bootstrap_plan(&config, &ip, ruby_version.as_deref(), json),
        Commands::Completions { .. } => Ok(()),
    }
}
