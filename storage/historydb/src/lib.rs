// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! SQLite implementation of the detection history store.

#![forbid(unsafe_code)]

mod schema;


use chrono::NaiveDateTime;
use deadlock_storage_interface::{
    history_ensure, record::TIMESTAMP_FORMAT, HistoryDbError, HistoryReader, HistoryRecord,
    HistoryWriter, NewHistoryRecord, Result,
};
use deadlock_types::SystemState;
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use tracing::info;

fn to_db_err(error: rusqlite::Error) -> HistoryDbError {
    HistoryDbError::SqliteError(error.to_string())
}

/// A history store backed by one SQLite database file.
///
/// The single connection sits behind a mutex, so at most one statement, and
/// therefore at most one writer, runs at a time.
pub struct HistoryDb {
    conn: Mutex<Connection>,
}

impl HistoryDb {
    /// Opens the database at `path`, creating the file and table if missing.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path).map_err(to_db_err)?;
        info!(path = %path.display(), "Opened history db");
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory().map_err(to_db_err)?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(schema::CREATE_HISTORY_TABLE)
            .map_err(to_db_err)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl HistoryReader for HistoryDb {
    fn list_records(&self) -> Result<Vec<HistoryRecord>> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare(schema::SELECT_ALL_RECORDS)
            .map_err(to_db_err)?;
        let rows = stmt
            .query_map([], RawRecord::from_row)
            .map_err(to_db_err)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(to_db_err)?;
        rows.into_iter().map(RawRecord::decode).collect()
    }

    fn get_record(&self, id: u64) -> Result<Option<HistoryRecord>> {
        let conn = self.conn.lock();
        let raw = conn
            .query_row(
                schema::SELECT_RECORD_BY_ID,
                params![id_to_sql(id)?],
                RawRecord::from_row,
            )
            .optional()
            .map_err(to_db_err)?;
        raw.map(RawRecord::decode).transpose()
    }

    fn count_records(&self) -> Result<u64> {
        let conn = self.conn.lock();
        let count: i64 = conn
            .query_row(schema::COUNT_RECORDS, [], |row| row.get(0))
            .map_err(to_db_err)?;
        u64::try_from(count).map_err(|_| HistoryDbError::Other(format!("Bad row count {}", count)))
    }
}

impl HistoryWriter for HistoryDb {
    fn append_record(&self, record: NewHistoryRecord) -> Result<u64> {
        let state = &record.state;
        let allocation = serde_json::to_string(&state.allocation)?;
        let request = serde_json::to_string(&state.request)?;
        let available = serde_json::to_string(&state.available)?;
        let timestamp = record.formatted_timestamp();

        let conn = self.conn.lock();
        conn.execute(
            schema::INSERT_RECORD,
            params![
                dimension_to_sql(state.num_processes)?,
                dimension_to_sql(state.num_resources)?,
                allocation,
                request,
                available,
                record.result,
                record.advice,
                timestamp,
            ],
        )
        .map_err(to_db_err)?;
        let id = conn.last_insert_rowid();
        u64::try_from(id).map_err(|_| HistoryDbError::Other(format!("Bad row id {}", id)))
    }
}

fn id_to_sql(id: u64) -> Result<i64> {
    i64::try_from(id).map_err(|_| HistoryDbError::NotFound(format!("History record {}", id)))
}

fn dimension_to_sql(dimension: usize) -> Result<i64> {
    i64::try_from(dimension)
        .map_err(|_| HistoryDbError::Other(format!("Dimension {} does not fit in SQLite", dimension)))
}

/// A row as SQLite returns it, before any decoding that can fail on our side.
struct RawRecord {
    id: i64,
    n: i64,
    m: i64,
    allocation: String,
    request: String,
    available: String,
    result: String,
    suggestions: String,
    timestamp: String,
}

impl RawRecord {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            n: row.get(1)?,
            m: row.get(2)?,
            allocation: row.get(3)?,
            request: row.get(4)?,
            available: row.get(5)?,
            result: row.get(6)?,
            suggestions: row.get(7)?,
            timestamp: row.get(8)?,
        })
    }

    fn decode(self) -> Result<HistoryRecord> {
        history_ensure!(self.id > 0, "History record id {} is not positive", self.id);
        let id = self.id as u64;
        let corrupt = |reason: String| HistoryDbError::CorruptRecord { id, reason };

        let num_processes =
            usize::try_from(self.n).map_err(|_| corrupt(format!("bad n {}", self.n)))?;
        let num_resources =
            usize::try_from(self.m).map_err(|_| corrupt(format!("bad m {}", self.m)))?;
        let allocation = serde_json::from_str(&self.allocation)
            .map_err(|e| corrupt(format!("allocation: {}", e)))?;
        let request =
            serde_json::from_str(&self.request).map_err(|e| corrupt(format!("request: {}", e)))?;
        let available = serde_json::from_str(&self.available)
            .map_err(|e| corrupt(format!("available: {}", e)))?;
        let timestamp = NaiveDateTime::parse_from_str(&self.timestamp, TIMESTAMP_FORMAT)
            .map_err(|e| corrupt(format!("timestamp {:?}: {}", self.timestamp, e)))?;

        let state = SystemState::new(num_processes, num_resources, allocation, request, available);
        Ok(HistoryRecord::new(
            id,
            NewHistoryRecord::new_at(state, self.result, self.suggestions, timestamp),
        ))
    }
}
