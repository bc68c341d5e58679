//! Environment variable source.
//!
//! Only variables named `PREFIX_<NAME>` are visible. `<NAME>` becomes the
//! canonical key, so `CLI_ENV_FILE` answers lookups for `env-file`.

use super::keys::{canonical_key, strip_prefix};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

/// Abstraction over a set of environment variables.
///
/// Lets tests resolve against an in-memory environment instead of mutating
/// the process environment.
pub trait EnvSource {
    /// Iterate over all variables.
    fn vars(&self) -> Box<dyn Iterator<Item = (String, String)> + '_>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdEnv;

impl EnvSource for StdEnv {
    fn vars(&self) -> Box<dyn Iterator<Item = (String, String)> + '_> {
        Box::new(std::env::vars_os().filter_map(|(name, value)| {
            match (name.into_string(), value.into_string()) {
                (Ok(name), Ok(value)) => Some((name, value)),
                (Ok(name), Err(_)) => {
                    warn!(name = %name, "Skipping environment variable with non UTF-8 value");
                    None
                }
                (Err(name), _) => {
                    warn!(name = ?name, "Skipping environment variable with non UTF-8 name");
                    None
                }
            }
        }))
    }
}

/// Environment backed by a map.
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    vars: BTreeMap<String, String>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(iter: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }

    pub fn remove(&mut self, name: &str) {
        self.vars.remove(name);
    }
}

impl EnvSource for MapEnv {
    fn vars(&self) -> Box<dyn Iterator<Item = (String, String)> + '_> {
        Box::new(self.vars.iter().map(|(k, v)| (k.clone(), v.clone())))
    }
}

/// Collect the variables carrying `prefix`, keyed by canonical key.
///
/// An empty prefix exposes nothing.
pub fn scan(env: &dyn EnvSource, prefix: &str) -> HashMap<String, String> {
    if prefix.is_empty() {
        debug!("No environment prefix configured, skipping environment scan");
        return HashMap::new();
    }

    // Sorted so that case variants of one name (`CLI_X`, `cli_x`) resolve the
    // same way on every run.
    let matched: BTreeMap<String, String> = env
        .vars()
        .filter(|(name, _)| strip_prefix(name, prefix).is_some())
        .collect();

    let vars: HashMap<String, String> = matched
        .into_iter()
        .filter_map(|(name, value)| strip_prefix(&name, prefix).map(|rest| (canonical_key(rest), value)))
        .collect();

    debug!(prefix = %prefix, count = vars.len(), "Scanned environment");
    vars
}
