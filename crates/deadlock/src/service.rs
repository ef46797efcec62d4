// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! Runs one detection request end to end: validate, detect, advise, persist.

use deadlock_detector::{advise, detect, validate, ValidationError};
use deadlock_storage_interface::{
    HistoryDbError, HistoryReaderWriter, HistoryRecord, NewHistoryRecord,
};
use deadlock_types::{Advice, DetectionResult, SystemState};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Storage(#[from] HistoryDbError),
    #[error("History is disabled")]
    HistoryDisabled,
}

/// Everything a front end needs to show for one detection.
#[derive(Clone, Debug, Serialize)]
pub struct DetectionReport {
    #[serde(flatten)]
    pub result: DetectionResult,
    pub advice: Advice,
    /// Id of the stored history record, when history is enabled.
    pub record_id: Option<u64>,
}

/// Detection host. The history store is injected; without one, runs are not
/// recorded.
#[derive(Clone)]
pub struct DetectionService {
    db: Option<HistoryReaderWriter>,
}

impl DetectionService {
    pub fn new(db: HistoryReaderWriter) -> Self {
        Self { db: Some(db) }
    }

    pub fn without_history() -> Self {
        Self { db: None }
    }

    /// Validates `state` and, if it is well formed, detects, advises and
    /// appends the run to the history. Nothing is stored for invalid input.
    pub fn run(&self, state: SystemState) -> Result<DetectionReport, ServiceError> {
        if let Err(error) = validate(&state) {
            warn!(
                n = state.num_processes,
                m = state.num_resources,
                error = %error,
                "Rejected invalid system state"
            );
            return Err(error.into());
        }

        let result = detect(&state);
        let advice = advise(&result.deadlocked_processes, &state.allocation, &state.request);
        info!(
            n = state.num_processes,
            m = state.num_resources,
            deadlocked = result.deadlocked_processes.len(),
            victim = ?advice.victim,
            "Detection complete"
        );

        let record_id = match &self.db {
            Some(db) => {
                let record = NewHistoryRecord::new(state, &result, &advice);
                let id = db.writer.append_record(record)?;
                info!(record_id = id, "Stored detection in history");
                Some(id)
            },
            None => None,
        };

        Ok(DetectionReport {
            result,
            advice,
            record_id,
        })
    }

    /// All stored runs, most recent first, truncated to `limit` if given.
    pub fn history(&self, limit: Option<usize>) -> Result<Vec<HistoryRecord>, ServiceError> {
        let db = self.db.as_ref().ok_or(ServiceError::HistoryDisabled)?;
        let records = match limit {
            Some(limit) => db.reader.list_recent_records(limit)?,
            None => db.reader.list_records()?,
        };
        Ok(records)
    }

    pub fn history_record(&self, id: u64) -> Result<HistoryRecord, ServiceError> {
        let db = self.db.as_ref().ok_or(ServiceError::HistoryDisabled)?;
        db.reader
            .get_record(id)?
            .ok_or_else(|| HistoryDbError::NotFound(format!("History record {}", id)).into())
    }
}
