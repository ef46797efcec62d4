// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use crate::config::{
    ConfigSanitizer, Error, LoggerConfig, PersistableConfig, RootPath, StorageConfig,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "deadlock.yaml";

/// The config for the deadlock tool
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeadlockConfig {
    pub logger: LoggerConfig,
    pub storage: StorageConfig,
}

impl DeadlockConfig {
    /// Loads and sanitizes the config at `path`. Falls back to the defaults
    /// when no file exists there.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            Self::load_config(path)?
        } else {
            Self::default()
        };

        let root_path = RootPath::new(path);
        config.storage.dir = root_path.full_path(&config.storage.dir);

        DeadlockConfig::sanitize(&config)?;
        Ok(config)
    }
}
