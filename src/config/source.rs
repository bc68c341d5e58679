//! Configuration sources and their fixed precedence.

use std::fmt;

/// Origin of a configuration value (lowest to highest priority).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Source {
    /// Registered with `KeyStore::set_default` (lowest priority)
    Default = 0,
    /// Process environment variables carrying the tree prefix
    Environment = 1,
    /// The env file, when the command opted into it
    File = 2,
    /// Command-line flags (highest priority)
    Flag = 3,
}

impl Source {
    /// Sources in the order lookups consult them.
    pub const PRECEDENCE: [Source; 4] = [
        Source::Flag,
        Source::File,
        Source::Environment,
        Source::Default,
    ];
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Default => write!(f, "default"),
            Source::Environment => write!(f, "environment"),
            Source::File => write!(f, "file"),
            Source::Flag => write!(f, "flag"),
        }
    }
}

/// A `(key, value, source)` triple produced by a loader before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    /// Key exactly as written by the source.
    pub key: String,
    pub value: String,
    pub source: Source,
}

impl RawEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>, source: Source) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            source,
        }
    }
}
