// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! Plain text presentation of command results.

use crate::service::DetectionReport;
use deadlock_config::config::DeadlockConfig;
use deadlock_storage_interface::HistoryRecord;
use deadlock_types::ResourceCount;
use itertools::Itertools;
use std::fmt::Write;

/// Human readable rendering used by `--output text`
pub trait RenderText {
    fn render_text(&self) -> String;
}

impl RenderText for () {
    fn render_text(&self) -> String {
        "Success".to_string()
    }
}

impl RenderText for String {
    fn render_text(&self) -> String {
        self.clone()
    }
}

impl RenderText for DetectionReport {
    fn render_text(&self) -> String {
        let mut out = format!("Result: {}\nSuggestions:\n", self.result.message);
        for line in self.advice.lines() {
            let _ = writeln!(out, "  {}", line);
        }
        if let Some(id) = self.record_id {
            let _ = writeln!(out, "Saved as history record #{}", id);
        }
        out.trim_end().to_string()
    }
}

impl RenderText for HistoryRecord {
    fn render_text(&self) -> String {
        let state = self.state();
        let mut out = String::new();
        let _ = writeln!(
            out,
            "#{}  {}  n={} m={}",
            self.id,
            self.record.formatted_timestamp(),
            state.num_processes,
            state.num_resources
        );
        let _ = writeln!(out, "  Allocation:  {}", format_matrix(&state.allocation));
        let _ = writeln!(out, "  Request:     {}", format_matrix(&state.request));
        let _ = writeln!(out, "  Available:   {}", format_vector(&state.available));
        let _ = writeln!(out, "  Result:      {}", self.record.result);
        let _ = writeln!(out, "  Suggestions:");
        for line in self.advice_lines() {
            let _ = writeln!(out, "    {}", line);
        }
        out.trim_end().to_string()
    }
}

impl RenderText for Vec<HistoryRecord> {
    fn render_text(&self) -> String {
        if self.is_empty() {
            return "No detections recorded yet.".to_string();
        }
        self.iter().map(HistoryRecord::render_text).join("\n\n")
    }
}

impl RenderText for DeadlockConfig {
    fn render_text(&self) -> String {
        serde_yaml::to_string(self)
            .unwrap_or_else(|error| format!("Unable to render config: {}", error))
            .trim_end()
            .to_string()
    }
}

pub fn format_vector(vector: &[ResourceCount]) -> String {
    format!("[{}]", vector.iter().join(", "))
}

pub fn format_matrix(matrix: &[Vec<ResourceCount>]) -> String {
    format!("[{}]", matrix.iter().map(|row| format_vector(row)).join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use deadlock_storage_interface::NewHistoryRecord;
    use deadlock_types::{Advice, DetectionResult, SystemState};

    #[test]
    fn test_report() {
        let report = DetectionReport {
            result: DetectionResult::new(vec![0, 1], vec![]),
            advice: Advice::with_victim(0),
            record_id: Some(4),
        };
        assert_eq!(
            report.render_text(),
            "Result: Deadlock detected in processes: [0, 1].\n\
             Suggestions:\n  \
             Strategy 1: Terminate one or more deadlocked processes to break the circular wait.\n  \
             Strategy 2: Preempt resources from a process and rollback.\n  \
             Recommendation: Terminate Process P0 (holds fewest resources).\n\
             Saved as history record #4"
        );
    }

    #[test]
    fn test_history() {
        assert_eq!(Vec::<HistoryRecord>::new().render_text(), "No detections recorded yet.");

        let timestamp = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap();
        let state = SystemState::new(1, 2, vec![vec![1, 0]], vec![vec![0, 0]], vec![2, 3]);
        let record = HistoryRecord::new(
            7,
            NewHistoryRecord::new_at(
                state,
                "No deadlock detected.".to_string(),
                "No action required.".to_string(),
                timestamp,
            ),
        );
        assert_eq!(
            vec![record].render_text(),
            "#7  2024-01-02 03:04:05  n=1 m=2\n  \
             Allocation:  [[1, 0]]\n  \
             Request:     [[0, 0]]\n  \
             Available:   [2, 3]\n  \
             Result:      No deadlock detected.\n  \
             Suggestions:\n    \
             No action required."
        );
    }
}
