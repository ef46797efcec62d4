// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

/// Identifies one process. The index is the identity; there is no separate
/// process object.
pub type ProcessIndex = usize;

/// Identifies one resource class.
pub type ResourceIndex = usize;

/// Units of a resource class. Signed so that negative input survives decoding
/// and is rejected by validation rather than by the parser.
pub type ResourceCount = i64;

/// One row of a matrix, or the available vector.
pub type ResourceVector = Vec<ResourceCount>;

/// An `n x m` grid indexed as `matrix[process][resource]`.
pub type Matrix = Vec<ResourceVector>;

/// The complete input of one detection request.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SystemState {
    #[serde(rename = "n")]
    pub num_processes: usize,
    #[serde(rename = "m")]
    pub num_resources: usize,
    /// `allocation[i][j]`: units of resource `j` currently held by process `i`.
    pub allocation: Matrix,
    /// `request[i][j]`: units of resource `j` process `i` still needs to complete.
    pub request: Matrix,
    /// Units of each resource not allocated to any process.
    pub available: ResourceVector,
}

impl SystemState {
    pub fn new(
        num_processes: usize,
        num_resources: usize,
        allocation: Matrix,
        request: Matrix,
        available: ResourceVector,
    ) -> Self {
        Self {
            num_processes,
            num_resources,
            allocation,
            request,
            available,
        }
    }

    /// A state with no processes and no resource classes.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Total units held by `process`. Saturates instead of overflowing.
    pub fn held_by(&self, process: ProcessIndex) -> ResourceCount {
        total_units(&self.allocation[process])
    }
}

/// Sums a row of resource units, saturating at `ResourceCount::MAX`.
pub fn total_units(row: &[ResourceCount]) -> ResourceCount {
    row.iter().fold(0, |acc, units| acc.saturating_add(*units))
}
