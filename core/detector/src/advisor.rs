// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use deadlock_types::{state::total_units, Advice, ProcessIndex, ResourceVector};

/// Proposes how to recover from a deadlock.
///
/// An empty `deadlocked` set yields the single "no action required" advisory.
/// Otherwise the two generic strategies (termination, preemption with
/// rollback) are returned together with a victim: the deadlocked process
/// holding the fewest total resource units, the lowest index winning ties.
///
/// The victim choice is a heuristic. It minimises the resources lost by
/// killing one process, not the number of processes that must be killed to
/// clear the deadlock, and it does not look at `request` at all.
pub fn advise(
    deadlocked: &[ProcessIndex],
    allocation: &[ResourceVector],
    _request: &[ResourceVector],
) -> Advice {
    if deadlocked.is_empty() {
        return Advice::no_action();
    }

    let victim = deadlocked
        .iter()
        .copied()
        .filter(|process| *process < allocation.len())
        .min_by_key(|process| (total_units(&allocation[*process]), *process));

    match victim {
        Some(victim) => Advice::with_victim(victim),
        None => Advice::no_action(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::{assert_none, assert_some_eq};

    #[test]
    fn test_empty_set_needs_no_action() {
        let advice = advise(&[], &vec![vec![1]], &vec![vec![1]]);
        assert!(advice.is_no_action());
        assert_none!(advice.victim);
    }

    #[test]
    fn test_smallest_holder_wins() {
        let allocation = vec![vec![3, 1], vec![0, 2], vec![1, 0]];
        let advice = advise(&[0, 1, 2], &allocation, &allocation);
        assert_some_eq!(advice.victim, 2);
        assert_eq!(advice.lines().len(), 3);
    }

    #[test]
    fn test_tie_goes_to_lowest_index_regardless_of_input_order() {
        let allocation = vec![vec![5], vec![2], vec![2], vec![2]];
        let advice = advise(&[3, 2, 1], &allocation, &allocation);
        assert_some_eq!(advice.victim, 1);
    }

    #[test]
    fn test_only_deadlocked_processes_are_candidates() {
        let allocation = vec![vec![0], vec![4], vec![7]];
        let advice = advise(&[1, 2], &allocation, &allocation);
        assert_some_eq!(advice.victim, 1);
    }
}
