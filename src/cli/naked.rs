//! The `naked` command tree: a single command without subcommands.

use super::{CommandTree, ENV_PREFIX, GlobalArgs, Operands};
use crate::commands::add;
use crate::config::{CommandConfig, KeyStore};
use crate::error::CommandResult;
use async_trait::async_trait;
use clap::Parser;
use std::io::Write;
use tokio_util::sync::CancellationToken;

/// Example naked command.
#[derive(Parser, Debug)]
#[command(name = "naked")]
pub struct NakedCli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(flatten)]
    pub operands: Operands,
}

#[async_trait(?Send)]
impl CommandTree for NakedCli {
    fn global(&self) -> &GlobalArgs {
        &self.global
    }

    fn command_config(&self) -> Option<CommandConfig> {
        Some(CommandConfig::new(ENV_PREFIX))
    }

    async fn run(
        &self,
        store: &KeyStore,
        out: &mut dyn Write,
        _cancel: &CancellationToken,
    ) -> CommandResult {
        add::run(store, out)
    }
}
