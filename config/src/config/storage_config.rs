// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use crate::config::{ConfigSanitizer, DeadlockConfig, Error};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_DB_FILE_NAME: &str = "deadlock_history.db";

#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    /// Persist every completed detection to the history db
    pub enabled: bool,
    /// Directory holding the history db. Relative paths are rooted at the
    /// directory of the config file.
    pub dir: PathBuf,
    pub db_file_name: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: PathBuf::from("."),
            db_file_name: DEFAULT_DB_FILE_NAME.to_string(),
        }
    }
}

impl StorageConfig {
    pub fn db_path(&self) -> PathBuf {
        self.dir.join(&self.db_file_name)
    }
}

impl ConfigSanitizer for StorageConfig {
    fn sanitize(config: &DeadlockConfig) -> Result<(), Error> {
        let sanitizer_name = Self::get_sanitizer_name();
        let storage_config = &config.storage;

        if storage_config.enabled && storage_config.db_file_name.trim().is_empty() {
            return Err(Error::ConfigSanitizerFailed(
                sanitizer_name,
                "db_file_name must not be empty when storage is enabled".into(),
            ));
        }

        Ok(())
    }
}
