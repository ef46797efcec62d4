// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! A history store that lives only as long as the process.

use crate::{HistoryReader, HistoryRecord, HistoryWriter, NewHistoryRecord, Result};
use parking_lot::RwLock;

#[derive(Default)]
pub struct InMemoryHistoryStore {
    records: RwLock<Vec<HistoryRecord>>,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HistoryReader for InMemoryHistoryStore {
    fn list_records(&self) -> Result<Vec<HistoryRecord>> {
        Ok(self.records.read().iter().rev().cloned().collect())
    }

    fn get_record(&self, id: u64) -> Result<Option<HistoryRecord>> {
        Ok(self
            .records
            .read()
            .iter()
            .find(|record| record.id == id)
            .cloned())
    }

    fn count_records(&self) -> Result<u64> {
        Ok(self.records.read().len() as u64)
    }
}

impl HistoryWriter for InMemoryHistoryStore {
    fn append_record(&self, record: NewHistoryRecord) -> Result<u64> {
        let mut records = self.records.write();
        let id = records.last().map_or(1, |last| last.id + 1);
        records.push(HistoryRecord::new(id, record));
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HistoryReaderWriter;
    use chrono::NaiveDate;
    use claims::{assert_none, assert_ok_eq, assert_some};
    use deadlock_types::SystemState;
    use std::{sync::Arc, thread};

    fn record(result: &str) -> NewHistoryRecord {
        let timestamp = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap();
        NewHistoryRecord::new_at(
            SystemState::empty(),
            result.to_string(),
            "No action required.".to_string(),
            timestamp,
        )
    }

    #[test]
    fn test_list_is_most_recent_first() {
        let store = InMemoryHistoryStore::new();
        assert_ok_eq!(store.append_record(record("first")), 1);
        assert_ok_eq!(store.append_record(record("second")), 2);

        let records = store.list_records().unwrap();
        let results: Vec<_> = records.iter().map(|r| r.record.result.as_str()).collect();
        assert_eq!(results, vec!["second", "first"]);
        assert_ok_eq!(store.count_records(), 2);
        assert_eq!(store.list_recent_records(1).unwrap()[0].id, 2);
    }

    #[test]
    fn test_get_record() {
        let store = InMemoryHistoryStore::new();
        store.append_record(record("only")).unwrap();
        assert_some!(store.get_record(1).unwrap());
        assert_none!(store.get_record(2).unwrap());
    }

    #[test]
    fn test_concurrent_appends_get_distinct_ids() {
        let db = HistoryReaderWriter::new(InMemoryHistoryStore::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let writer = Arc::clone(&db.writer);
                thread::spawn(move || writer.append_record(record(&i.to_string())).unwrap())
            })
            .collect();
        let mut ids: Vec<u64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        ids.sort_unstable();
        assert_eq!(ids, (1..=8).collect::<Vec<_>>());
        assert_ok_eq!(db.reader.count_records(), 8);
    }
}
