// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

/// This enum defines errors commonly used among history store implementations.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum HistoryDbError {
    /// A requested item is not found.
    #[error("{0} not found.")]
    NotFound(String),
    /// A stored row does not decode into a history record.
    #[error("Corrupt history record {id}: {reason}")]
    CorruptRecord { id: u64, reason: String },
    #[error("SQLite Error: {0}")]
    SqliteError(String),
    #[error("Serialization Error: {0}")]
    SerializationError(String),
    #[error("History DB Other Error: {0}")]
    Other(String),
}

impl From<serde_json::Error> for HistoryDbError {
    fn from(error: serde_json::Error) -> Self {
        Self::SerializationError(format!("{}", error))
    }
}

impl From<std::io::Error> for HistoryDbError {
    fn from(error: std::io::Error) -> Self {
        Self::Other(format!("IO Error: {}", error))
    }
}

#[macro_export]
macro_rules! history_ensure {
    ($cond:expr, $($arg:tt)*) => {
        if !$cond {
            return Err($crate::HistoryDbError::Other(format!($($arg)*)));
        }
    };
}
