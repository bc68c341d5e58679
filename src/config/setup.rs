//! Per-invocation setup phase.
//!
//! Runs once before a command body: scans the environment, binds the active
//! command's flags and, when the command asks for it, loads the env file.
//! The returned store is only read from afterwards.

use super::env::EnvSource;
use super::flags::FlagSet;
use super::store::KeyStore;
use crate::error::ConfigError;
use std::path::PathBuf;
use tracing::debug;

/// Key holding the env file path.
pub const ENV_FILE_KEY: &str = "env-file";

/// Env file path used when no source provides one.
pub const DEFAULT_ENV_FILE: &str = "./.env";

/// Configuration requirements a command declares at construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandConfig {
    /// Load the env file before the command runs. A missing file is an error.
    pub requires_config_file: bool,
    /// Prefix shared by environment variables and env file keys.
    pub env_prefix: String,
}

impl CommandConfig {
    pub fn new(env_prefix: impl Into<String>) -> Self {
        Self {
            requires_config_file: false,
            env_prefix: env_prefix.into(),
        }
    }

    pub fn with_config_file(mut self) -> Self {
        self.requires_config_file = true;
        self
    }
}

/// Build the store for one invocation.
///
/// The env file path is itself resolved through the store, so `--env-file`,
/// `CLI_ENV_FILE` and the flag default all apply. Any error aborts before the
/// command body runs.
pub fn prepare(
    config: &CommandConfig,
    flags: &FlagSet,
    env: &dyn EnvSource,
) -> Result<KeyStore, ConfigError> {
    let mut store = KeyStore::new(config.env_prefix.as_str());
    store.activate_environment_from(env);
    store.bind_flag_set(flags);

    if config.requires_config_file {
        let path = match store.get_string(ENV_FILE_KEY) {
            path if path.is_empty() => PathBuf::from(DEFAULT_ENV_FILE),
            path => PathBuf::from(path),
        };
        store.load_file_source(&path)?;
    }

    debug!(prefix = store.prefix(), settings = ?store.settings(), "Configuration resolved");
    Ok(store)
}
