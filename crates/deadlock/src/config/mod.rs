// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use crate::common::types::{CliCommand, CliContext, CliError, CliResult, CliTypedResult};
use async_trait::async_trait;
use clap::{Parser, Subcommand};
use deadlock_config::config::{DeadlockConfig, PersistableConfig};

/// Tool for managing the configuration of the deadlock tool
#[derive(Subcommand)]
pub enum ConfigTool {
    Init(InitConfig),
    Show(ShowConfig),
}

impl ConfigTool {
    pub async fn execute(self, context: &CliContext) -> CliResult {
        match self {
            ConfigTool::Init(tool) => tool.execute_serialized(context).await,
            ConfigTool::Show(tool) => tool.execute_serialized(context).await,
        }
    }
}

/// Write a config file holding the defaults to the `--config` path
#[derive(Debug, Parser)]
pub struct InitConfig {
    /// Overwrite an existing config file
    #[clap(long)]
    force: bool,
}

#[async_trait]
impl CliCommand<String> for InitConfig {
    fn command_name(&self) -> &'static str {
        "InitConfig"
    }

    async fn execute(self, context: &CliContext) -> CliTypedResult<String> {
        let path = &context.config_path;
        if path.exists() && !self.force {
            return Err(CliError::CommandArgumentError(format!(
                "{} already exists, pass --force to overwrite it",
                path.display()
            )));
        }
        DeadlockConfig::default().save_config(path)?;
        Ok(format!("Wrote default config to {}", path.display()))
    }
}

/// Show the effective config, after defaults and path resolution
#[derive(Debug, Parser)]
pub struct ShowConfig {}

#[async_trait]
impl CliCommand<DeadlockConfig> for ShowConfig {
    fn command_name(&self) -> &'static str {
        "ShowConfig"
    }

    async fn execute(self, context: &CliContext) -> CliTypedResult<DeadlockConfig> {
        Ok(context.config.clone())
    }
}
