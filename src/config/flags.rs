//! Command-line flags as a configuration source.
//!
//! A [`FlagSet`] captures the current value of every flag a command declares,
//! after clap has parsed argv. Each flag remembers whether the user supplied
//! it: supplied flags outrank every other source, while flags left at their
//! intrinsic default answer only when nothing else does.

use clap::parser::ValueSource;
use clap::{ArgAction, ArgMatches, Command};
use std::collections::BTreeMap;

/// Current value of one bound flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagValue {
    pub value: String,
    /// Whether the value came from argv rather than the flag's default.
    pub changed: bool,
}

/// Flags of the active command, keyed by long name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagSet {
    flags: BTreeMap<String, FlagValue>,
}

impl FlagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a flag. A later insert for the same name replaces the earlier one.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>, changed: bool) {
        self.flags.insert(
            name.into(),
            FlagValue {
                value: value.into(),
                changed,
            },
        );
    }

    /// Builder form of [`FlagSet::insert`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>, changed: bool) -> Self {
        self.insert(name, value, changed);
        self
    }

    /// Capture the declared flags of `command` from its parsed `matches`.
    ///
    /// Positional arguments and help/version actions are not settings and are
    /// skipped, as are flags with neither a value nor a default.
    pub fn from_matches(command: &Command, matches: &ArgMatches) -> Self {
        let mut set = Self::new();

        for arg in command.get_arguments() {
            if arg.is_positional()
                || matches!(
                    arg.get_action(),
                    ArgAction::Help | ArgAction::HelpShort | ArgAction::HelpLong | ArgAction::Version
                )
            {
                continue;
            }

            let id = arg.get_id().as_str();
            let Ok(Some(raw)) = matches.try_get_raw(id) else {
                continue;
            };
            let Some(value) = raw.last() else {
                continue;
            };

            let changed = matches.value_source(id) == Some(ValueSource::CommandLine);
            set.insert(arg.get_long().unwrap_or(id), value.to_string_lossy(), changed);
        }

        set
    }

    /// Merge `other` into this set; its entries win on name clashes.
    pub fn merge(&mut self, other: FlagSet) {
        self.flags.extend(other.flags);
    }

    pub fn remove(&mut self, name: &str) -> Option<FlagValue> {
        self.flags.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&FlagValue> {
        self.flags.get(name)
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FlagValue)> {
        self.flags.iter().map(|(k, v)| (k.as_str(), v))
    }
}
