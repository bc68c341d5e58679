//! Shared helpers for driving the command trees in-process.

#![allow(dead_code)]

use layered_cli::cli::{CommandTree, Execution, execute};
use layered_cli::config::MapEnv;
use tokio_util::sync::CancellationToken;

pub const VERSION: &str = "0.0.0";

/// Absolute path of the checked-in env file (`CLI_LEFT=32`, `CLI_RIGHT=10`).
pub fn testdata_env() -> String {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/testdata/.env").to_string()
}

/// Captured result of one execution.
pub struct Outcome {
    pub result: anyhow::Result<()>,
    pub out: String,
    pub err: String,
}

/// Run tree `T` with `args` (program name excluded) against `env`.
pub async fn run_tree<T: CommandTree>(
    args: &[&str],
    env: &[(&str, &str)],
    cancel: CancellationToken,
) -> Outcome {
    let env = MapEnv::from_pairs(env.iter().copied());
    let mut out = Vec::new();
    let mut err = Vec::new();

    let argv = std::iter::once("prog").chain(args.iter().copied());
    let result = {
        let mut exec = Execution {
            out: &mut out,
            err: &mut err,
            env: &env,
            cancel,
        };
        execute::<T, _, _>(argv, VERSION, &mut exec).await
    };

    Outcome {
        result,
        out: String::from_utf8(out).expect("utf-8 output"),
        err: String::from_utf8(err).expect("utf-8 error output"),
    }
}
