// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use crate::config::{utils::get_config_name, DeadlockConfig, Error};

/// A trait for validating configs after they are loaded
pub trait ConfigSanitizer {
    /// Get the name of the sanitizer (e.g., for logging and error strings)
    fn get_sanitizer_name() -> String {
        get_config_name::<Self>().to_string()
    }

    /// Validate and process the config
    fn sanitize(config: &DeadlockConfig) -> Result<(), Error>;
}

impl ConfigSanitizer for DeadlockConfig {
    fn sanitize(config: &DeadlockConfig) -> Result<(), Error> {
        crate::config::StorageConfig::sanitize(config)?;
        Ok(())
    }
}
