//! Per-invocation store of resolved settings.
//!
//! Every source keeps its own map. Binding never overwrites another source;
//! precedence is applied only when a value is read, so the order in which
//! flags, the env file and the environment are bound does not matter.

use super::dotenv;
use super::env::{self, EnvSource, StdEnv};
use super::flags::{FlagSet, FlagValue};
use super::keys::{Aliases, canonical_key, derive_aliases};
use super::source::Source;
use crate::error::ConfigError;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Resolution scope for one command invocation.
///
/// Mutated during setup, then read-only. Reads need no synchronization once
/// setup is done.
#[derive(Debug, Clone, Default)]
pub struct KeyStore {
    prefix: String,
    flags: HashMap<String, FlagValue>,
    file: HashMap<String, String>,
    environment: HashMap<String, String>,
    defaults: HashMap<String, String>,
    aliases: Aliases,
    file_path: Option<PathBuf>,
}

impl KeyStore {
    /// Create an empty store for a command tree using `prefix`.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            ..Self::default()
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Register a flag set as the Flag source.
    ///
    /// Names are canonicalized. The last registration of a name wins.
    pub fn bind_flag_set(&mut self, flags: &FlagSet) {
        for (name, value) in flags.iter() {
            self.flags.insert(canonical_key(name), value.clone());
        }
        debug!(source = %Source::Flag, count = flags.len(), "Bound flags");
    }

    /// Load the env file at `path` into the File source.
    ///
    /// Keys carrying the store prefix are aliased to their unprefixed form.
    /// Parsing completes before anything is applied, so a malformed file
    /// leaves the store untouched. Returns the number of entries loaded.
    pub fn load_file_source(&mut self, path: &Path) -> Result<usize, ConfigError> {
        if let Some(loaded) = &self.file_path {
            return Err(ConfigError::FileAlreadyLoaded {
                path: loaded.clone(),
            });
        }

        let entries = dotenv::load(path)?;
        let aliases = derive_aliases(entries.iter().map(|e| e.key.as_str()), &self.prefix);

        let mut file = HashMap::with_capacity(entries.len());
        for entry in entries {
            let key = canonical_key(&entry.key);
            file.insert(aliases.resolve(&key).to_string(), entry.value);
        }

        debug!(
            source = %Source::File,
            path = %path.display(),
            count = file.len(),
            aliases = aliases.len(),
            "Loaded env file"
        );

        let count = file.len();
        self.file = file;
        self.aliases = aliases;
        self.file_path = Some(path.to_path_buf());
        Ok(count)
    }

    /// Scan the process environment into the Environment source.
    pub fn activate_environment(&mut self) {
        self.activate_environment_from(&StdEnv);
    }

    /// Scan `env` into the Environment source, replacing any earlier scan.
    pub fn activate_environment_from(&mut self, env: &dyn EnvSource) {
        self.environment = env::scan(env, &self.prefix);
    }

    /// Register a fallback used when no other source binds `key`.
    pub fn set_default(&mut self, key: &str, value: impl ToString) {
        self.defaults.insert(canonical_key(key), value.to_string());
    }

    /// Resolve `key` to its value and the source that answered.
    ///
    /// Order: supplied flags, file, environment, defaults, then flags left
    /// at their intrinsic default.
    pub fn lookup(&self, key: &str) -> Option<(Source, &str)> {
        let key = canonical_key(key);
        let key = self.aliases.resolve(&key);

        let flag = self.flags.get(key);
        if let Some(flag) = flag.filter(|f| f.changed) {
            return Some((Source::Flag, flag.value.as_str()));
        }

        [
            (Source::File, &self.file),
            (Source::Environment, &self.environment),
            (Source::Default, &self.defaults),
        ]
        .into_iter()
        .find_map(|(source, map)| map.get(key).map(|v| (source, v.as_str())))
        .or_else(|| flag.map(|f| (Source::Flag, f.value.as_str())))
    }

    /// The source `key` resolves from, if bound anywhere.
    pub fn source_of(&self, key: &str) -> Option<Source> {
        self.lookup(key).map(|(source, _)| source)
    }

    pub fn is_set(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    /// Resolve `key` as a string. Unbound keys yield `""`.
    pub fn get_string(&self, key: &str) -> String {
        self.lookup(key)
            .map(|(_, value)| value.to_string())
            .unwrap_or_default()
    }

    /// Resolve `key` as an integer. Unbound or blank keys yield `0`.
    pub fn get_int(&self, key: &str) -> Result<i64, ConfigError> {
        match self.lookup(key) {
            Some((_, value)) if !value.trim().is_empty() => value
                .trim()
                .parse()
                .map_err(|_| conversion_error(key, value, "integer")),
            _ => Ok(0),
        }
    }

    /// Resolve `key` as a boolean. Unbound or blank keys yield `false`.
    ///
    /// Accepts `1`, `t`, `true` and `0`, `f`, `false` in any case.
    pub fn get_bool(&self, key: &str) -> Result<bool, ConfigError> {
        match self.lookup(key) {
            Some((_, value)) if !value.trim().is_empty() => {
                parse_bool(value.trim()).ok_or_else(|| conversion_error(key, value, "boolean"))
            }
            _ => Ok(false),
        }
    }

    /// Path of the loaded env file, or `None` if the file source is inactive.
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub fn aliases(&self) -> &Aliases {
        &self.aliases
    }

    /// Every known key with its resolved value.
    pub fn settings(&self) -> BTreeMap<String, String> {
        self.flags
            .keys()
            .chain(self.file.keys())
            .chain(self.environment.keys())
            .chain(self.defaults.keys())
            .filter_map(|key| {
                self.lookup(key)
                    .map(|(_, value)| (key.clone(), value.to_string()))
            })
            .collect()
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "t" | "true" => Some(true),
        "0" | "f" | "false" => Some(false),
        _ => None,
    }
}

fn conversion_error(key: &str, value: &str, expected: &'static str) -> ConfigError {
    ConfigError::TypeConversion {
        key: key.to_string(),
        value: value.to_string(),
        expected,
    }
}
