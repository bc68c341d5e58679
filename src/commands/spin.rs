//! Long-running command that only ends when cancelled.

use crate::error::{CommandError, CommandResult};
use std::io::Write;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Print `spin`, then wait for `cancel`.
///
/// Always ends with [`CommandError::Cancelled`].
pub async fn run(out: &mut dyn Write, cancel: &CancellationToken) -> CommandResult {
    writeln!(out, "spin")?;
    out.flush()?;

    cancel.cancelled().await;
    debug!("Spin cancelled");

    writeln!(out, "ctx err: {}", CommandError::Cancelled)?;
    Err(CommandError::Cancelled)
}
