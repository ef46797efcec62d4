// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! SQL for the `history` table. Matrices and the available vector are stored
//! as JSON text; the timestamp as `%Y-%m-%d %H:%M:%S` local time.

pub(crate) const CREATE_HISTORY_TABLE: &str = "CREATE TABLE IF NOT EXISTS history (
    id INTEGER PRIMARY KEY,
    n INTEGER,
    m INTEGER,
    allocation TEXT,
    request TEXT,
    available TEXT,
    result TEXT,
    suggestions TEXT,
    timestamp TEXT
)";

pub(crate) const INSERT_RECORD: &str = "INSERT INTO history \
    (n, m, allocation, request, available, result, suggestions, timestamp) \
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";

pub(crate) const SELECT_ALL_RECORDS: &str = "SELECT id, n, m, allocation, request, available, \
    result, suggestions, timestamp FROM history ORDER BY id DESC";

pub(crate) const SELECT_RECORD_BY_ID: &str = "SELECT id, n, m, allocation, request, available, \
    result, suggestions, timestamp FROM history WHERE id = ?1";

pub(crate) const COUNT_RECORDS: &str = "SELECT COUNT(*) FROM history";
