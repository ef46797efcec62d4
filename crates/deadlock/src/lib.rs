// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

pub mod common;
pub mod config;
pub mod detect;
pub mod history;
pub mod input;
pub mod render;
pub mod service;

use crate::common::{
    types::{CliCommand, CliContext, CliResult, OutputFormat},
    utils::{start_logger, to_common_result},
};
use clap::{Parser, Subcommand};
use deadlock_config::config::{DeadlockConfig, DEFAULT_CONFIG_FILE};
use std::{path::PathBuf, time::Instant};

/// Detects deadlocks among processes holding and requesting reusable resources
///
/// Reads a snapshot of allocations, outstanding requests and available units,
/// reports the processes that can never complete, and recommends a victim.
#[derive(Parser)]
#[clap(name = "deadlock", author, version, propagate_version = true)]
pub struct Tool {
    /// Path to the config file. Defaults apply when the file does not exist
    #[clap(long, global = true, env = "DEADLOCK_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// How results and errors are printed
    #[clap(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    Detect(detect::DetectCommand),
    History(history::HistoryCommand),
    #[clap(subcommand)]
    Config(config::ConfigTool),
}

impl Tool {
    pub async fn execute(self) -> CliResult {
        let config = match DeadlockConfig::load_or_default(&self.config) {
            Ok(config) => config,
            Err(error) => {
                return to_common_result::<()>(
                    "LoadConfig",
                    Instant::now(),
                    Err(error.into()),
                    self.output,
                )
            },
        };
        start_logger(&config.logger);

        let context = CliContext {
            config,
            config_path: self.config,
            output: self.output,
        };
        match self.command {
            Command::Detect(tool) => tool.execute_serialized(&context).await,
            Command::History(tool) => tool.execute_serialized(&context).await,
            Command::Config(tool) => tool.execute(&context).await,
        }
    }
}
