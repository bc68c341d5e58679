//! `tool`: example command tree with `add`, `add-env` and `spin`.

use layered_cli::cli::tool::ToolCli;
use layered_cli::cli::{Execution, Parsed, run};
use layered_cli::config::StdEnv;
use layered_cli::logging;
use std::process::ExitCode;
use tokio_util::sync::CancellationToken;
use tracing::debug;

#[tokio::main]
async fn main() -> ExitCode {
    let parsed = match Parsed::<ToolCli>::try_parse_from(std::env::args_os()) {
        Ok(parsed) => parsed,
        Err(e) => e.exit(),
    };

    if let Err(e) = logging::init(parsed.verbose()) {
        eprintln!("Failed to initialize logging: {e}");
    }

    let cancel = CancellationToken::new();
    let cancel_on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel_on_signal.cancel();
            debug!("Received Ctrl-C, cancelled");
        }
    });

    // Unlocked handles: the logger writes to stderr from other threads while
    // a command is waiting.
    let mut out = std::io::stdout();
    let mut err = std::io::stderr();
    let mut exec = Execution {
        out: &mut out,
        err: &mut err,
        env: &StdEnv,
        cancel,
    };

    match run(parsed, env!("CARGO_PKG_VERSION"), &mut exec).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
