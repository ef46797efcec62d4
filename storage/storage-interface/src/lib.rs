// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! Contract between detection hosts and the store of past runs.
//!
//! Hosts receive a store as an injected [`HistoryReaderWriter`]; nothing in
//! the detection core references a store.

#![forbid(unsafe_code)]

mod errors;
pub mod in_memory;
pub mod record;

pub use errors::HistoryDbError;
pub use record::{HistoryRecord, NewHistoryRecord};
use std::sync::Arc;

pub type Result<T, E = HistoryDbError> = std::result::Result<T, E>;

/// Trait that is implemented by a store that can serve past detection runs.
pub trait HistoryReader: Send + Sync {
    /// Returns every stored record, most recent first.
    fn list_records(&self) -> Result<Vec<HistoryRecord>>;

    /// Returns the record with the given id, if any.
    fn get_record(&self, id: u64) -> Result<Option<HistoryRecord>>;

    fn count_records(&self) -> Result<u64>;

    /// Returns at most `limit` records, most recent first.
    fn list_recent_records(&self, limit: usize) -> Result<Vec<HistoryRecord>> {
        let mut records = self.list_records()?;
        records.truncate(limit);
        Ok(records)
    }
}

/// Trait that is implemented by a store that can persist detection runs.
///
/// Implementations serialise concurrent appends: ids are assigned in append
/// order and are strictly increasing.
pub trait HistoryWriter: Send + Sync {
    /// Appends `record` and returns the id assigned to it.
    fn append_record(&self, record: NewHistoryRecord) -> Result<u64>;
}

#[derive(Clone)]
pub struct HistoryReaderWriter {
    pub reader: Arc<dyn HistoryReader>,
    pub writer: Arc<dyn HistoryWriter>,
}

impl HistoryReaderWriter {
    pub fn new<D: 'static + HistoryReader + HistoryWriter>(db: D) -> Self {
        let db = Arc::new(db);
        Self::from_arc(db)
    }

    pub fn from_arc<D: 'static + HistoryReader + HistoryWriter>(db: Arc<D>) -> Self {
        let reader = Arc::clone(&db);
        let writer = db;
        Self { reader, writer }
    }
}
