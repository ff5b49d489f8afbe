//! Configuration loading, merging and the canonical configuration handle
//!
//! # Layering
//!
//! The canonical document is built once per invocation, lowest layer first:
//!
//! 1. **Base document** - `yml_files`, `remote_chef_dir` (default
//!    `/var/chef`), `roles_path`, `spec_path`, `cookbook_path` (always lists)
//! 2. **Node attributes** - caller soft defaults, replacing base keys
//! 3. **Source files** - each deep-merged in order, later files winning
//!
//! Sources are template-expanded (`${NAME}`, `${NAME:-fallback}`) before
//! parsing. Missing or unparseable sources contribute nothing.
//!
//! # Example
//!
//! ```no_run
//! use provis_core::config::{ConfigResolver, Settings};
//!
//! let settings = Settings::new()
//!     .yml_files(vec!["config/chef.yml", "config/local.yml"])
//!     .cookbook_path("cookbooks");
//! let config = ConfigResolver::new(settings).resolve();
//! println!("{}", config.remote_chef_dir().unwrap());
//! ```

mod canonical;
mod merge;
mod resolver;
mod settings;
mod source;
mod template;

pub use canonical::Config;
pub use merge::merge;
pub use resolver::ConfigResolver;
pub use settings::{DEFAULT_REMOTE_CHEF_DIR, PathList, Settings};
pub use source::SourceLoader;
pub use template::TemplateVars;
