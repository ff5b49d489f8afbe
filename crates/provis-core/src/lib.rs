//! Configuration resolution engine for provis
//!
//! This crate turns layered configuration files into everything a
//! provisioning run needs:
//!
//! - **Configuration resolution**: base settings, node attributes and
//!   template-expanded YAML/JSON/TOML sources, deep-merged in order
//! - **Server registry**: attribute and name lookups over `servers`
//! - **Target resolution**: free-form queries to ordered IP addresses
//! - **Node configuration**: canonical, server and caller layers per host
//! - **Remote runs**: chef-solo staging and bootstrap commands, driven
//!   through a [`RemoteExecutor`]
//!
//! # Architecture
//!
//! ```text
//!                 provis-cli
//!                     |
//!                provis-core
//!                     |
//!                 provis-fs
//! ```
//!
//! # Example
//!
//! ```no_run
//! use provis_core::config::{ConfigResolver, Settings};
//!
//! fn example() -> provis_core::Result<()> {
//!     let config = ConfigResolver::new(Settings::new()).resolve();
//!     for ip in config.resolve_targets("rails_env:demo")? {
//!         let node = config.node_builder().for_ip(&ip)?;
//!         println!("{ip}: {}", node.config.to_json()?);
//!     }
//!     Ok(())
//! }
//! ```

pub mod bootstrap;
pub mod config;
pub mod document;
pub mod error;
pub mod node;
pub mod registry;
pub mod remote;
pub mod targets;

pub use bootstrap::Bootstrap;
pub use config::{Config, ConfigResolver, PathList, Settings, SourceLoader, TemplateVars};
pub use document::Document;
pub use error::{Error, Result};
pub use node::{NodeBuilder, NodeRun};
pub use registry::{Lookup, Server, ServerRegistry};
pub use remote::{RemoteExecutor, SoloRun};
pub use targets::resolve_targets;
