//! Layered CLI configuration library.
//!
//! This module exports the resolution engine and both command trees for the
//! binaries and for integration tests.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
