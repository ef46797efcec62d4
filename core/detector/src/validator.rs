// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use crate::error::ValidationError;
use deadlock_types::{Matrix, SystemState};

/// Checks that `state` is well formed.
///
/// Checks run in a fixed order and the first failure is returned:
/// allocation shape, request shape, available length, negative matrix
/// entries, negative available entries. Total over its input; never panics.
pub fn validate(state: &SystemState) -> Result<(), ValidationError> {
    let n = state.num_processes;
    let m = state.num_resources;

    if !has_shape(&state.allocation, n, m) {
        return Err(ValidationError::AllocationShape);
    }
    if !has_shape(&state.request, n, m) {
        return Err(ValidationError::RequestShape);
    }
    if state.available.len() != m {
        return Err(ValidationError::AvailableLength);
    }

    for process in 0..n {
        for resource in 0..m {
            if state.allocation[process][resource] < 0 || state.request[process][resource] < 0 {
                return Err(ValidationError::NegativeValue { process, resource });
            }
        }
    }

    if let Some(resource) = state.available.iter().position(|units| *units < 0) {
        return Err(ValidationError::NegativeAvailable { resource });
    }

    Ok(())
}

/// Pair form of [`validate`]: `(true, "")` on success, otherwise `false` and
/// the rejection reason.
pub fn validation_outcome(state: &SystemState) -> (bool, String) {
    match validate(state) {
        Ok(()) => (true, String::new()),
        Err(error) => (false, error.to_string()),
    }
}

fn has_shape(matrix: &Matrix, rows: usize, columns: usize) -> bool {
    matrix.len() == rows && matrix.iter().all(|row| row.len() == columns)
}
