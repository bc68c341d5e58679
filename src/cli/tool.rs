//! The `tool` command tree: `add`, `add-env` and `spin`.

use super::{CommandTree, ENV_PREFIX, GlobalArgs, Operands, RequiredOperands};
use crate::commands::{add, spin};
use crate::config::{CommandConfig, KeyStore};
use crate::error::CommandResult;
use async_trait::async_trait;
use clap::{Parser, Subcommand};
use std::io::Write;
use tokio_util::sync::CancellationToken;

/// Example tool command.
#[derive(Parser, Debug)]
#[command(name = "tool")]
pub struct ToolCli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<ToolCommand>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum ToolCommand {
    /// Add two numbers
    Add(RequiredOperands),

    /// Adds two numbers using arguments, env file or both
    AddEnv(Operands),

    /// Spins forever
    Spin,
}

impl ToolCommand {
    pub fn config(&self) -> CommandConfig {
        match self {
            ToolCommand::AddEnv(_) => CommandConfig::new(ENV_PREFIX).with_config_file(),
            ToolCommand::Add(_) | ToolCommand::Spin => CommandConfig::new(ENV_PREFIX),
        }
    }
}

#[async_trait(?Send)]
impl CommandTree for ToolCli {
    fn global(&self) -> &GlobalArgs {
        &self.global
    }

    fn command_config(&self) -> Option<CommandConfig> {
        self.command.as_ref().map(ToolCommand::config)
    }

    async fn run(
        &self,
        store: &KeyStore,
        out: &mut dyn Write,
        cancel: &CancellationToken,
    ) -> CommandResult {
        match &self.command {
            Some(ToolCommand::Add(_) | ToolCommand::AddEnv(_)) => add::run(store, out),
            Some(ToolCommand::Spin) => spin::run(out, cancel).await,
            None => Ok(()),
        }
    }
}
