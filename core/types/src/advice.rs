// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use crate::state::ProcessIndex;
use serde::{Deserialize, Serialize};

pub const NO_ACTION_REQUIRED: &str = "No action required.";
pub const TERMINATION_STRATEGY: &str =
    "Strategy 1: Terminate one or more deadlocked processes to break the circular wait.";
pub const PREEMPTION_STRATEGY: &str = "Strategy 2: Preempt resources from a process and rollback.";

/// Recovery advice for a deadlocked set.
///
/// `strategies` holds the generic advisories. When a victim was chosen its
/// recommendation is rendered last by [`Advice::lines`].
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Advice {
    pub strategies: Vec<String>,
    pub victim: Option<ProcessIndex>,
}

impl Advice {
    pub fn no_action() -> Self {
        Self {
            strategies: vec![NO_ACTION_REQUIRED.to_string()],
            victim: None,
        }
    }

    pub fn with_victim(victim: ProcessIndex) -> Self {
        Self {
            strategies: vec![
                TERMINATION_STRATEGY.to_string(),
                PREEMPTION_STRATEGY.to_string(),
            ],
            victim: Some(victim),
        }
    }

    pub fn is_no_action(&self) -> bool {
        self.victim.is_none() && self.strategies == [NO_ACTION_REQUIRED]
    }

    pub fn lines(&self) -> Vec<String> {
        let mut lines = self.strategies.clone();
        if let Some(victim) = self.victim {
            lines.push(recommendation(victim));
        }
        lines
    }

    pub fn to_text(&self, separator: &str) -> String {
        self.lines().join(separator)
    }
}

pub fn recommendation(victim: ProcessIndex) -> String {
    format!(
        "Recommendation: Terminate Process P{} (holds fewest resources).",
        victim
    )
}
