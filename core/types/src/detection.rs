// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use crate::state::ProcessIndex;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

pub const NO_DEADLOCK_MESSAGE: &str = "No deadlock detected.";

/// Outcome of one run of the detection fixed point.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct DetectionResult {
    pub is_deadlock: bool,
    /// Processes never marked finished, in ascending index order.
    pub deadlocked_processes: Vec<ProcessIndex>,
    /// Order in which processes were shown able to finish.
    pub completion_order: Vec<ProcessIndex>,
    pub message: String,
}

impl DetectionResult {
    pub fn new(
        mut deadlocked_processes: Vec<ProcessIndex>,
        completion_order: Vec<ProcessIndex>,
    ) -> Self {
        deadlocked_processes.sort_unstable();
        deadlocked_processes.dedup();
        let message = deadlock_message(&deadlocked_processes);
        Self {
            is_deadlock: !deadlocked_processes.is_empty(),
            deadlocked_processes,
            completion_order,
            message,
        }
    }
}

/// Formats the fixed result message for a deadlocked set.
pub fn deadlock_message(deadlocked: &[ProcessIndex]) -> String {
    if deadlocked.is_empty() {
        NO_DEADLOCK_MESSAGE.to_string()
    } else {
        format!(
            "Deadlock detected in processes: [{}].",
            deadlocked.iter().join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(deadlock_message(&[]), "No deadlock detected.");
        assert_eq!(
            deadlock_message(&[0, 1, 2]),
            "Deadlock detected in processes: [0, 1, 2]."
        );
    }

    #[test]
    fn test_new_sorts_and_flags() {
        let result = DetectionResult::new(vec![2, 0], vec![1]);
        assert!(result.is_deadlock);
        assert_eq!(result.deadlocked_processes, vec![0, 2]);
        assert_eq!(result.message, "Deadlock detected in processes: [0, 2].");

        let result = DetectionResult::new(vec![], vec![0, 1]);
        assert!(!result.is_deadlock);
        assert_eq!(result.message, NO_DEADLOCK_MESSAGE);
    }
}
