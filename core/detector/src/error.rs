// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use deadlock_types::{ProcessIndex, ResourceIndex};
use thiserror::Error;

/// Reasons a system state is rejected before detection runs.
///
/// The `Display` text of each variant is the user-facing reason and is shown
/// verbatim.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ValidationError {
    #[error("Allocation matrix must be n x m.")]
    AllocationShape,
    #[error("Request matrix must be n x m.")]
    RequestShape,
    #[error("Available vector must have m elements.")]
    AvailableLength,
    #[error("Values must be non-negative.")]
    NegativeValue {
        process: ProcessIndex,
        resource: ResourceIndex,
    },
    #[error("Available values must be non-negative.")]
    NegativeAvailable { resource: ResourceIndex },
}
