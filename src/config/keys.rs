//! Canonical key normalization and prefix alias derivation.
//!
//! Every source meets in one namespace: lowercase, with `-` as the only word
//! separator. `CLI_ENV_FILE` from the environment, `CLI_ENV_FILE` from the env
//! file and the `--env-file` flag all resolve under `env-file`.

use std::collections::HashMap;

/// Normalize a raw key into its canonical form.
///
/// Lowercases and rewrites `_` and `.` to `-`. Applied on every bind and on
/// every lookup, so callers may ask for `env_file` or `env-file` alike.
pub fn canonical_key(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .replace(|c: char| c == '_' || c == '.', "-")
}

/// Strip `prefix + "_"` from `raw`, ignoring ASCII case.
///
/// Returns `None` when the prefix is empty, does not match, or nothing
/// follows it.
pub fn strip_prefix<'a>(raw: &'a str, prefix: &str) -> Option<&'a str> {
    if prefix.is_empty() {
        return None;
    }
    let head = raw.get(..prefix.len())?;
    if !head.eq_ignore_ascii_case(prefix) {
        return None;
    }
    let rest = raw[prefix.len()..].strip_prefix('_')?;
    (!rest.is_empty()).then_some(rest)
}

/// Derived mapping from prefixed raw keys to canonical keys.
///
/// Built once per file load. Lookups are non-recursive: a resolved key is
/// never looked up again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aliases {
    map: HashMap<String, String>,
}

impl Aliases {
    /// Resolve `key` (already canonical) through the table.
    ///
    /// Unknown keys pass through unchanged.
    pub fn resolve<'a>(&'a self, key: &'a str) -> &'a str {
        self.map.get(key).map(String::as_str).unwrap_or(key)
    }

    pub fn get(&self, raw_key: &str) -> Option<&str> {
        self.map.get(&canonical_key(raw_key)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Derive aliases for every raw key starting with `prefix + "_"`.
///
/// `CLI_RIGHT` with prefix `CLI` maps to `right`. Keys without the prefix get
/// no entry and resolve under their own canonical form. An empty prefix
/// produces an empty table.
pub fn derive_aliases<'a>(raw_keys: impl IntoIterator<Item = &'a str>, prefix: &str) -> Aliases {
    let map = raw_keys
        .into_iter()
        .filter_map(|raw| {
            strip_prefix(raw, prefix).map(|rest| (canonical_key(raw), canonical_key(rest)))
        })
        .collect();
    Aliases { map }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_key_lowercases_and_unifies_separators() {
        assert_eq!(canonical_key("LEFT"), "left");
        assert_eq!(canonical_key("env_file"), "env-file");
        assert_eq!(canonical_key("env.file"), "env-file");
        assert_eq!(canonical_key("env-file"), "env-file");
        assert_eq!(canonical_key("  Hex "), "hex");
    }

    #[test]
    fn test_strip_prefix_is_case_insensitive() {
        assert_eq!(strip_prefix("CLI_RIGHT", "CLI"), Some("RIGHT"));
        assert_eq!(strip_prefix("cli_right", "CLI"), Some("right"));
        assert_eq!(strip_prefix("CLI_ENV_FILE", "cli"), Some("ENV_FILE"));
    }

    #[test]
    fn test_strip_prefix_requires_separator() {
        assert_eq!(strip_prefix("CLIENT_ID", "CLI"), None);
        assert_eq!(strip_prefix("CLI", "CLI"), None);
        assert_eq!(strip_prefix("CLI_", "CLI"), None);
        assert_eq!(strip_prefix("CL", "CLI"), None);
    }

    #[test]
    fn test_strip_prefix_does_not_split_multibyte_chars() {
        assert_eq!(strip_prefix("Ç_X", "CL"), None);
    }

    #[test]
    fn test_derive_aliases_maps_prefixed_keys() {
        let aliases = derive_aliases(["CLI_LEFT", "CLI_RIGHT", "OTHER"], "CLI");
        assert_eq!(aliases.len(), 2);
        assert_eq!(aliases.get("CLI_LEFT"), Some("left"));
        assert_eq!(aliases.get("cli_right"), Some("right"));
        assert_eq!(aliases.get("OTHER"), None);
    }

    #[test]
    fn test_aliases_iter_lists_every_entry() {
        let aliases = derive_aliases(["CLI_LEFT", "CLI_ENV_FILE", "HOME"], "CLI");
        let mut entries: Vec<_> = aliases.iter().collect();
        entries.sort();
        assert_eq!(entries, vec![("cli-env-file", "env-file"), ("cli-left", "left")]);
    }

    #[test]
    fn test_derive_aliases_prefix_collision() {
        // CLIENT_ID shares the letters of the prefix but not the separator.
        let aliases = derive_aliases(["CLIENT_ID", "CLI_ID"], "CLI");
        assert_eq!(aliases.get("CLIENT_ID"), None);
        assert_eq!(aliases.get("CLI_ID"), Some("id"));
    }

    #[test]
    fn test_derive_aliases_empty_prefix_yields_nothing() {
        let aliases = derive_aliases(["CLI_LEFT", "_LEFT", "LEFT"], "");
        assert!(aliases.is_empty());
    }

    #[test]
    fn test_resolve_passthrough_and_non_recursive() {
        let aliases = derive_aliases(["CLI_CLI_X"], "CLI");
        assert_eq!(aliases.resolve("cli-cli-x"), "cli-x");
        // "cli-x" is not itself in the table, and would not be followed anyway.
        assert_eq!(aliases.resolve("cli-x"), "cli-x");
        assert_eq!(aliases.resolve("unknown"), "unknown");
    }
}
