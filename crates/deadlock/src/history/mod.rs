// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use crate::common::types::{CliCommand, CliContext, CliTypedResult};
use async_trait::async_trait;
use clap::Parser;
use deadlock_storage_interface::HistoryRecord;

/// Show past detection runs, most recent first
#[derive(Debug, Parser)]
pub struct HistoryCommand {
    /// Show at most this many runs
    #[clap(long)]
    limit: Option<usize>,

    /// Show only the run with this id
    #[clap(long, conflicts_with = "limit")]
    id: Option<u64>,
}

#[async_trait]
impl CliCommand<Vec<HistoryRecord>> for HistoryCommand {
    fn command_name(&self) -> &'static str {
        "History"
    }

    async fn execute(self, context: &CliContext) -> CliTypedResult<Vec<HistoryRecord>> {
        let service = context.detection_service(false)?;
        match self.id {
            Some(id) => Ok(vec![service.history_record(id)?]),
            None => Ok(service.history(self.limit)?),
        }
    }
}
