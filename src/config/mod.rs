//! Layered configuration resolution.
//!
//! Resolves settings from four sources into one lookup, highest priority first:
//! 1. **Flag** - flags the user supplied on the command line
//! 2. **File** - the env file, only for commands that opt in
//! 3. **Environment** - variables named `<PREFIX>_<KEY>`
//! 4. **Default** - values registered with [`KeyStore::set_default`]
//!
//! Flags left at their intrinsic default answer last, after all four.
//!
//! ## Keys
//! Keys are case-insensitive and `_`, `.` and `-` are interchangeable, so the
//! `--env-file` flag, `CLI_ENV_FILE` in the environment and `CLI_ENV_FILE=` in
//! the env file all set `env-file`.

pub mod dotenv;
pub mod env;
pub mod flags;
pub mod keys;
mod setup;
mod source;
mod store;

pub use env::{EnvSource, MapEnv, StdEnv};
pub use flags::{FlagSet, FlagValue};
pub use keys::{Aliases, canonical_key, derive_aliases};
pub use setup::{CommandConfig, DEFAULT_ENV_FILE, ENV_FILE_KEY, prepare};
pub use source::{RawEntry, Source};
pub use store::KeyStore;
