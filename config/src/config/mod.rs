// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

// All modules should be declared below
mod config_sanitizer;
mod deadlock_config;
mod error;
mod logger_config;
mod persistable_config;
mod storage_config;
mod utils;

// All public usage statements should be declared below
pub use config_sanitizer::*;
pub use deadlock_config::*;
pub use error::*;
pub use logger_config::*;
pub use persistable_config::*;
pub use storage_config::*;
pub use utils::*;
