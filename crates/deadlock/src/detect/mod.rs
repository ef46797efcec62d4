// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use crate::{
    common::{
        types::{CliCommand, CliContext, CliError, CliTypedResult},
        utils::read_input,
    },
    input::{decode, decode_form_pairs, InputFormat},
    service::DetectionReport,
};
use async_trait::async_trait;
use clap::Parser;
use deadlock_types::SystemState;
use std::path::PathBuf;

/// Detect deadlocked processes and recommend a recovery
///
/// The snapshot is read from `--input-file` (JSON by default, or form fields
/// with `--format form`), or given inline as `--field key=value` form fields.
/// Every valid run is appended to the history unless `--no-history` is set.
#[derive(Debug, Parser)]
pub struct DetectCommand {
    /// File holding the snapshot; `-` reads stdin
    #[clap(long, value_parser, conflicts_with = "fields")]
    input_file: Option<PathBuf>,

    /// Representation of `--input-file`
    #[clap(long, value_enum, default_value_t = InputFormat::Json)]
    format: InputFormat,

    /// Inline form field, e.g. `--field n=2 --field alloc_0_0=1`
    #[clap(long = "field", value_name = "KEY=VALUE")]
    fields: Vec<String>,

    /// Do not record this run in the history
    #[clap(long)]
    no_history: bool,
}

impl DetectCommand {
    fn read_state(&self) -> CliTypedResult<SystemState> {
        match &self.input_file {
            Some(path) => Ok(decode(&read_input(path)?, self.format)?),
            None if !self.fields.is_empty() => {
                Ok(decode_form_pairs(self.fields.iter().map(String::as_str))?)
            },
            None => Err(CliError::CommandArgumentError(
                "Provide either --input-file or at least one --field".to_string(),
            )),
        }
    }
}

#[async_trait]
impl CliCommand<DetectionReport> for DetectCommand {
    fn command_name(&self) -> &'static str {
        "Detect"
    }

    async fn execute(self, context: &CliContext) -> CliTypedResult<DetectionReport> {
        let state = self.read_state()?;
        let service = context.detection_service(self.no_history)?;
        Ok(service.run(state)?)
    }
}
