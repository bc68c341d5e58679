//! CLI command trees and dispatch.
//!
//! Both trees are declared with clap's derive macros. Dispatch is shared:
//! parse argv, bind the active command's flags, prepare the
//! [`KeyStore`], then run the command body against it.

pub mod naked;
pub mod tool;

use crate::config::{self, CommandConfig, DEFAULT_ENV_FILE, EnvSource, FlagSet, KeyStore};
use crate::error::CommandResult;
use anyhow::Result;
use async_trait::async_trait;
use clap::{ArgMatches, Args, Command, CommandFactory, FromArgMatches, Parser};
use std::ffi::OsString;
use std::io::Write;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Prefix for environment variables and env file keys of both trees.
pub const ENV_PREFIX: &str = "CLI";

/// Global flags read straight from argv, never bound as settings.
pub const PROCESS_FLAGS: [&str; 2] = ["verbose", "version"];

/// Flags available on every command.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Env file read by commands that use one
    #[arg(short = 'e', long, default_value = DEFAULT_ENV_FILE, global = true)]
    pub env_file: String,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print version and exit
    #[arg(long, global = true)]
    pub version: bool,
}

/// Operands that may come from flags, the env file or the environment.
#[derive(Args, Debug, Clone)]
pub struct Operands {
    /// Left number
    #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
    pub left: i64,

    /// Right number
    #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
    pub right: i64,

    /// Display as hex
    #[arg(short = 'x', long)]
    pub hex: bool,
}

/// Operands that must be given as flags.
#[derive(Args, Debug, Clone)]
pub struct RequiredOperands {
    /// Left number
    #[arg(short, long, allow_negative_numbers = true)]
    pub left: i64,

    /// Right number
    #[arg(short, long, allow_negative_numbers = true)]
    pub right: i64,

    /// Display as hex
    #[arg(short = 'x', long)]
    pub hex: bool,
}

/// A parsed command tree that can run its selected command.
#[async_trait(?Send)]
pub trait CommandTree: Parser {
    fn global(&self) -> &GlobalArgs;

    /// Requirements of the selected command, `None` if no command was selected.
    fn command_config(&self) -> Option<CommandConfig>;

    /// Run the selected command against a prepared store.
    async fn run(
        &self,
        store: &KeyStore,
        out: &mut dyn Write,
        cancel: &CancellationToken,
    ) -> CommandResult;
}

/// Output streams, environment and cancellation for one execution.
pub struct Execution<'a> {
    pub out: &'a mut dyn Write,
    pub err: &'a mut dyn Write,
    pub env: &'a dyn EnvSource,
    pub cancel: CancellationToken,
}

/// A command tree parsed from argv, with the clap state needed to bind flags.
pub struct Parsed<T> {
    pub cli: T,
    command: Command,
    matches: ArgMatches,
}

impl<T: CommandTree> Parsed<T> {
    pub fn try_parse_from<I, S>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString> + Clone,
    {
        let mut command = <T as CommandFactory>::command();
        let matches = command.try_get_matches_from_mut(args)?;
        let cli = <T as FromArgMatches>::from_arg_matches(&matches)?;
        Ok(Self {
            cli,
            command,
            matches,
        })
    }

    pub fn verbose(&self) -> bool {
        self.cli.global().verbose
    }

    /// Current values of the root flags and of the selected subcommand's
    /// flags. Subcommand values win for global flags.
    ///
    /// Flags in [`PROCESS_FLAGS`] steer the binary itself and are left out.
    pub fn flag_set(&self) -> FlagSet {
        let mut flags = FlagSet::from_matches(&self.command, &self.matches);
        if let Some((name, sub_matches)) = self.matches.subcommand()
            && let Some(sub) = self.command.find_subcommand(name)
        {
            flags.merge(FlagSet::from_matches(sub, sub_matches));
        }
        for name in PROCESS_FLAGS {
            flags.remove(name);
        }
        flags
    }
}

/// Run an already parsed tree.
///
/// Setup and command errors are printed as `Error: <message>` to the error
/// stream and returned.
pub async fn run<T: CommandTree>(
    mut parsed: Parsed<T>,
    version: &str,
    exec: &mut Execution<'_>,
) -> Result<()> {
    if parsed.cli.global().version {
        writeln!(exec.out, "{version}")?;
        return Ok(());
    }

    let Some(config) = parsed.cli.command_config() else {
        write!(exec.out, "{}", parsed.command.render_help())?;
        return Ok(());
    };

    let flags = parsed.flag_set();
    debug!(flags = flags.len(), file = config.requires_config_file, "Preparing configuration");

    let result = match config::prepare(&config, &flags, exec.env) {
        Ok(store) => parsed.cli.run(&store, exec.out, &exec.cancel).await,
        Err(e) => Err(e.into()),
    };

    if let Err(e) = &result {
        writeln!(exec.err, "Error: {e}")?;
    }
    result.map_err(Into::into)
}

/// Parse `args` as tree `T` and run it.
///
/// Help output goes to the output stream and is not an error; usage errors
/// are rendered to the error stream and returned.
pub async fn execute<T, I, S>(args: I, version: &str, exec: &mut Execution<'_>) -> Result<()>
where
    T: CommandTree,
    I: IntoIterator<Item = S>,
    S: Into<OsString> + Clone,
{
    match Parsed::<T>::try_parse_from(args) {
        Ok(parsed) => run(parsed, version, exec).await,
        Err(e) if !e.use_stderr() => {
            write!(exec.out, "{}", e.render())?;
            Ok(())
        }
        Err(e) => {
            write!(exec.err, "{}", e.render())?;
            Err(e.into())
        }
    }
}
