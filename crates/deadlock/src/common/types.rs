// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use crate::{
    common::utils::to_common_result,
    input::InputError,
    render::RenderText,
    service::{DetectionService, ServiceError},
};
use async_trait::async_trait;
use clap::ValueEnum;
use deadlock_config::config::DeadlockConfig;
use deadlock_detector::ValidationError;
use deadlock_historydb::HistoryDb;
use deadlock_storage_interface::{HistoryDbError, HistoryReaderWriter};
use serde::Serialize;
use std::{path::PathBuf, time::Instant};
use thiserror::Error;

/// A common result to be returned to users
pub type CliResult = Result<String, String>;

/// A common result to remove need for typing `Result<T, CliError>`
pub type CliTypedResult<T> = Result<T, CliError>;

/// CLI Errors for reporting through telemetry and outputs
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Invalid config: {0}")]
    ConfigError(#[from] deadlock_config::config::Error),
    #[error("Invalid arguments: {0}")]
    CommandArgumentError(String),
    #[error("Unable to read file '{0}', error: {1}")]
    UnableToReadFile(String, String),
    #[error("{0}")]
    InvalidInput(#[from] InputError),
    #[error("Input error: {0}")]
    Validation(#[from] ValidationError),
    #[error("History storage error: {0}")]
    Storage(#[from] HistoryDbError),
    #[error("History is disabled in the config")]
    HistoryDisabled,
}

impl CliError {
    pub fn to_str(&self) -> &'static str {
        match self {
            CliError::ConfigError(_) => "ConfigError",
            CliError::CommandArgumentError(_) => "CommandArgumentError",
            CliError::UnableToReadFile(_, _) => "UnableToReadFile",
            CliError::InvalidInput(_) => "InvalidInput",
            CliError::Validation(_) => "Validation",
            CliError::Storage(_) => "Storage",
            CliError::HistoryDisabled => "HistoryDisabled",
        }
    }
}

impl From<ServiceError> for CliError {
    fn from(error: ServiceError) -> Self {
        match error {
            ServiceError::Validation(inner) => CliError::Validation(inner),
            ServiceError::Storage(inner) => CliError::Storage(inner),
            ServiceError::HistoryDisabled => CliError::HistoryDisabled,
        }
    }
}

/// How a command's result is printed
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// State shared by every command of one invocation
#[derive(Clone, Debug)]
pub struct CliContext {
    pub config: DeadlockConfig,
    pub config_path: PathBuf,
    pub output: OutputFormat,
}

/// A common trait for all CLI commands to have consistent outputs
#[async_trait]
pub trait CliCommand<T: Serialize + RenderText + Send>: Sized + Send {
    /// Returns a name for logging purposes
    fn command_name(&self) -> &'static str;

    /// Executes the command, returning a command specific type
    async fn execute(self, context: &CliContext) -> CliTypedResult<T>;

    /// Executes the command, and renders it in the requested output format
    async fn execute_serialized(self, context: &CliContext) -> CliResult {
        let command_name = self.command_name();
        let start_time = Instant::now();
        to_common_result(
            command_name,
            start_time,
            self.execute(context).await,
            context.output,
        )
    }
}

impl CliContext {
    /// Builds the detection service, opening the history db unless storage is
    /// disabled in the config or `skip_history` is set.
    pub fn detection_service(&self, skip_history: bool) -> CliTypedResult<DetectionService> {
        let storage = &self.config.storage;
        if skip_history || !storage.enabled {
            return Ok(DetectionService::without_history());
        }
        let db = HistoryDb::open(storage.db_path())?;
        Ok(DetectionService::new(HistoryReaderWriter::new(db)))
    }
}
