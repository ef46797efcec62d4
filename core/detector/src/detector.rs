// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use deadlock_types::{DetectionResult, ProcessIndex, ResourceVector, SystemState};
use tracing::debug;

/// Finds the processes of `state` that can never complete.
///
/// `state` must already have passed [`crate::validate`]; malformed input is
/// not re-checked here. Processes are visited in index order.
pub fn detect(state: &SystemState) -> DetectionResult {
    let order: Vec<ProcessIndex> = (0..state.num_processes).collect();
    detect_in_order(state, &order)
}

/// Same as [`detect`] but visits processes in the given order on every pass.
///
/// The deadlocked set does not depend on `order`; only `completion_order` does.
/// Indices that are out of range or repeated are ignored, and any process not
/// named in `order` is visited after the named ones in index order.
pub fn detect_in_order(state: &SystemState, order: &[ProcessIndex]) -> DetectionResult {
    let order = visitation_order(state.num_processes, order);
    let mut closure = FixedPoint::new(state);
    while closure.pass(&order) {}
    closure.into_result()
}

fn visitation_order(num_processes: usize, order: &[ProcessIndex]) -> Vec<ProcessIndex> {
    let mut seen = vec![false; num_processes];
    let mut visitation = Vec::with_capacity(num_processes);
    let named = order.iter().copied();
    for process in named.chain(0..num_processes) {
        if process < num_processes && !seen[process] {
            seen[process] = true;
            visitation.push(process);
        }
    }
    visitation
}

/// Working state of the detection closure.
///
/// `work` only ever grows and a finished process is never un-finished, which
/// is what makes the final `finish` set independent of visitation order.
pub(crate) struct FixedPoint<'a> {
    state: &'a SystemState,
    work: ResourceVector,
    finish: Vec<bool>,
    completion_order: Vec<ProcessIndex>,
}

impl<'a> FixedPoint<'a> {
    pub(crate) fn new(state: &'a SystemState) -> Self {
        Self {
            state,
            work: state.available.clone(),
            finish: vec![false; state.num_processes],
            completion_order: Vec::with_capacity(state.num_processes),
        }
    }

    #[cfg(test)]
    pub(crate) fn work(&self) -> &[deadlock_types::ResourceCount] {
        &self.work
    }

    fn can_finish(&self, process: ProcessIndex) -> bool {
        self.state.request[process]
            .iter()
            .zip(&self.work)
            .all(|(needed, work)| needed <= work)
    }

    /// Marks `process` finished and releases its allocation into `work` if
    /// its outstanding request can be met. Returns whether it finished.
    pub(crate) fn try_finish(&mut self, process: ProcessIndex) -> bool {
        if self.finish[process] || !self.can_finish(process) {
            return false;
        }
        for (work, held) in self.work.iter_mut().zip(&self.state.allocation[process]) {
            *work = work.saturating_add(*held);
        }
        self.finish[process] = true;
        self.completion_order.push(process);
        debug!(process = process, work = ?self.work, "Process can finish");
        true
    }

    /// One pass over `order`. Returns whether any process finished.
    pub(crate) fn pass(&mut self, order: &[ProcessIndex]) -> bool {
        let mut progressed = false;
        for &process in order {
            progressed |= self.try_finish(process);
        }
        progressed
    }

    pub(crate) fn into_result(self) -> DetectionResult {
        let deadlocked = self
            .finish
            .iter()
            .enumerate()
            .filter(|(_, finished)| !**finished)
            .map(|(process, _)| process)
            .collect();
        DetectionResult::new(deadlocked, self.completion_order)
    }
}
