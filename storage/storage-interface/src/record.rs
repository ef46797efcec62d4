// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use chrono::{Local, NaiveDateTime, SubsecRound};
use deadlock_types::{Advice, DetectionResult, SystemState};
use serde::{Deserialize, Serialize};

/// Timestamp layout used when records are written as text.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Separator between advice lines in the stored advice text.
pub const ADVICE_SEPARATOR: &str = "\n";

/// A completed detection, ready to be appended to the history.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct NewHistoryRecord {
    pub state: SystemState,
    pub result: String,
    pub advice: String,
    pub timestamp: NaiveDateTime,
}

impl NewHistoryRecord {
    /// Stamps the record with the current local time at second precision.
    pub fn new(state: SystemState, result: &DetectionResult, advice: &Advice) -> Self {
        Self::new_at(
            state,
            result.message.clone(),
            advice.to_text(ADVICE_SEPARATOR),
            Local::now().naive_local(),
        )
    }

    pub fn new_at(
        state: SystemState,
        result: String,
        advice: String,
        timestamp: NaiveDateTime,
    ) -> Self {
        Self {
            state,
            result,
            advice,
            timestamp: timestamp.trunc_subsecs(0),
        }
    }

    pub fn formatted_timestamp(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }
}

/// A stored detection with the id assigned by the store.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct HistoryRecord {
    pub id: u64,
    #[serde(flatten)]
    pub record: NewHistoryRecord,
}

impl HistoryRecord {
    pub fn new(id: u64, record: NewHistoryRecord) -> Self {
        Self { id, record }
    }

    pub fn state(&self) -> &SystemState {
        &self.record.state
    }

    pub fn advice_lines(&self) -> impl Iterator<Item = &str> {
        self.record.advice.split(ADVICE_SEPARATOR)
    }
}
