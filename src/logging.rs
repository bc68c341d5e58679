//! Logging setup for the binaries.
//!
//! Logs go to stderr through tracing. `--verbose` forces debug output;
//! otherwise `RUST_LOG` is honored and defaults to warnings only. Command
//! output never goes through the logger.

use anyhow::Result;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Filter used when neither `--verbose` nor `RUST_LOG` says otherwise.
pub const DEFAULT_DIRECTIVE: &str = "warn";

/// Pick the filter directive for this run.
pub fn filter_directive(verbose: bool, rust_log: Option<&str>) -> String {
    match rust_log {
        _ if verbose => "debug".to_string(),
        Some(directive) if !directive.trim().is_empty() => directive.to_string(),
        _ => DEFAULT_DIRECTIVE.to_string(),
    }
}

/// Install the global subscriber.
pub fn init(verbose: bool) -> Result<()> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let directive = filter_directive(verbose, rust_log.as_deref());
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_wins() {
        assert_eq!(filter_directive(true, Some("error")), "debug");
    }

    #[test]
    fn test_rust_log_used_when_set() {
        assert_eq!(filter_directive(false, Some("layered_cli=trace")), "layered_cli=trace");
    }

    #[test]
    fn test_default_when_unset_or_blank() {
        assert_eq!(filter_directive(false, None), "warn");
        assert_eq!(filter_directive(false, Some("  ")), "warn");
    }
}
