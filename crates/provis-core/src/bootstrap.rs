//! Bootstrap options for preparing a fresh host
//!
//! Options come from the canonical `bootstrap` section with caller options
//! laid over it. Gem versions are checked before any command is produced,
//! so a bad version fails the run before anything touches the host.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::config::Config;
use crate::document::{Document, value_kind};
use crate::error::{Error, Result};
use crate::remote::RemoteExecutor;

/// Ruby installed when no version is configured
pub const DEFAULT_RUBY_VERSION: &str = "1.8.7";

/// Gems installed to bootstrap chef, in install order
pub const BOOTSTRAP_GEMS: &[&str] = &["bundler", "chef", "rspec"];

static VERSION_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d[.\d]+\d$").unwrap());

// Build dependencies needed before rvm can compile a ruby
const RVM_PACKAGES: &str = "build-essential openssl libreadline6 libreadline6-dev curl git-core zlib1g zlib1g-dev libssl-dev libyaml-dev libsqlite3-0 libsqlite3-dev sqlite3 libxml2-dev libxslt-dev autoconf libc6-dev ncurses-dev automake libtool bison subversion";

const RVM_INSTALL: &str = "curl -s https://raw.github.com/wayneeseguin/rvm/master/binscripts/rvm-installer -o rvm-installer ; chmod +x rvm-installer ; sudo -s ./rvm-installer --version latest";

const SOURCE_RVM: &str = "source /etc/profile.d/rvm.sh";

/// Resolved bootstrap options for one host
#[derive(Debug, Clone, PartialEq)]
pub struct Bootstrap {
    pub ip_address: Option<String>,
    pub password: Option<String>,
    pub ruby_version: String,
    /// Gem name to requested version
    pub gems: Document,
    pub public_ssh_key: Option<String>,
    pub quiet: bool,
}

impl Bootstrap {
    /// Lay `overrides` over the configured `bootstrap` section.
    ///
    /// The address and password are only taken from `overrides`; they are
    /// per-host and never read from shared configuration.
    pub fn resolve(config: &Config, overrides: &Document) -> Result<Self> {
        let mut options = config.bootstrap()?.unwrap_or_default();
        options.merge_shallow(overrides);

        Ok(Self {
            ip_address: overrides.get_str("ip_address")?.map(str::to_string),
            password: overrides.get_str("password")?.map(str::to_string),
            ruby_version: options
                .get_str("ruby_version")?
                .unwrap_or(DEFAULT_RUBY_VERSION)
                .to_string(),
            gems: options.get_document("gems")?.unwrap_or_default(),
            public_ssh_key: options.get_str("public_ssh_key")?.map(str::to_string),
            quiet: options.get_bool("quiet")?.unwrap_or(false),
        })
    }

    /// Requested version of `gem`, if any
    pub fn gem_version(&self, gem: &str) -> Result<Option<String>> {
        match self.gems.get(gem) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(Value::Number(n)) => Ok(Some(n.to_string())),
            Some(other) => Err(Error::WrongShape {
                key: format!("gems.{gem}"),
                expected: "version string",
                found: value_kind(other),
            }),
        }
    }

    /// The remote commands that bootstrap the host, in order.
    ///
    /// Fails with [`Error::InvalidVersion`] before producing anything if a
    /// gem version does not look like `1.2.3`.
    pub fn remote_commands(&self) -> Result<Vec<String>> {
        let mut gem_installs = Vec::with_capacity(BOOTSTRAP_GEMS.len());
        for gem in BOOTSTRAP_GEMS {
            let version_flag = match self.gem_version(gem)? {
                Some(version) => {
                    validate_version(gem, &version)?;
                    format!(" -v {version}")
                }
                None => String::new(),
            };
            gem_installs.push(format!(
                "{SOURCE_RVM} && gem install {gem}{version_flag} --no-rdoc --no-ri"
            ));
        }

        let ruby = &self.ruby_version;
        let mut commands = vec![
            "apt-get update && apt-get --yes upgrade".to_string(),
            RVM_INSTALL.to_string(),
            "usermod -a -G rvm root".to_string(),
            format!("apt-get install -y {RVM_PACKAGES}"),
            format!("{SOURCE_RVM} && rvm install {ruby}"),
            format!("{SOURCE_RVM} && rvm use {ruby} --default"),
        ];
        commands.extend(gem_installs);
        Ok(commands)
    }

    /// Run every bootstrap command through `executor`
    pub fn run(&self, executor: &mut dyn RemoteExecutor) -> Result<()> {
        for command in self.remote_commands()? {
            let output = executor.run_remote(&command)?;
            if !self.quiet {
                tracing::info!(command = %command, output = %output.trim_end(), "Bootstrap step finished");
            }
        }
        Ok(())
    }
}

/// Check `version` against the strict version pattern
pub fn validate_version(name: &str, version: &str) -> Result<()> {
    if VERSION_PATTERN.is_match(version) {
        Ok(())
    } else {
        Err(Error::InvalidVersion {
            name: name.to_string(),
            version: version.to_string(),
        })
    }
}
