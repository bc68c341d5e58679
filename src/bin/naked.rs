//! `naked`: example command without subcommands.

use layered_cli::cli::naked::NakedCli;
use layered_cli::cli::{Execution, Parsed, run};
use layered_cli::config::StdEnv;
use layered_cli::logging;
use std::process::ExitCode;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> ExitCode {
    let parsed = match Parsed::<NakedCli>::try_parse_from(std::env::args_os()) {
        Ok(parsed) => parsed,
        Err(e) => e.exit(),
    };

    if let Err(e) = logging::init(parsed.verbose()) {
        eprintln!("Failed to initialize logging: {e}");
    }

    // Unlocked handles: the logger writes to stderr from other threads while
    // a command is waiting.
    let mut out = std::io::stdout();
    let mut err = std::io::stderr();
    let mut exec = Execution {
        out: &mut out,
        err: &mut err,
        env: &StdEnv,
        cancel: CancellationToken::new(),
    };

    match run(parsed, env!("CARGO_PKG_VERSION"), &mut exec).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
