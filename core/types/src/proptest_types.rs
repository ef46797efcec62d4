// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! Strategies for generating well-formed system states.

use crate::state::{Matrix, ProcessIndex, ResourceCount, SystemState};
use proptest::{collection::vec, prelude::*};

pub const MAX_PROCESSES: usize = 8;
pub const MAX_RESOURCES: usize = 5;
pub const MAX_UNITS: ResourceCount = 6;

fn arb_matrix(
    num_processes: usize,
    num_resources: usize,
    max_units: ResourceCount,
) -> impl Strategy<Value = Matrix> {
    vec(vec(0..=max_units, num_resources), num_processes)
}

/// Valid states of exactly `n` processes and `m` resource classes.
pub fn arb_state_with_shape(
    num_processes: usize,
    num_resources: usize,
    max_units: ResourceCount,
) -> impl Strategy<Value = SystemState> {
    (
        arb_matrix(num_processes, num_resources, max_units),
        arb_matrix(num_processes, num_resources, max_units),
        vec(0..=max_units, num_resources),
    )
        .prop_map(move |(allocation, request, available)| {
            SystemState::new(
                num_processes,
                num_resources,
                allocation,
                request,
                available,
            )
        })
}

/// Valid states with up to `max_processes` processes and `max_resources`
/// resource classes, including the degenerate empty shapes.
pub fn arb_system_state(
    max_processes: usize,
    max_resources: usize,
    max_units: ResourceCount,
) -> impl Strategy<Value = SystemState> {
    (0..=max_processes, 0..=max_resources).prop_flat_map(move |(n, m)| {
        arb_state_with_shape(n, m, max_units)
    })
}

/// A valid state paired with a permutation of its process indices.
pub fn arb_state_and_order() -> impl Strategy<Value = (SystemState, Vec<ProcessIndex>)> {
    arb_system_state(MAX_PROCESSES, MAX_RESOURCES, MAX_UNITS).prop_flat_map(|state| {
        let order: Vec<ProcessIndex> = (0..state.num_processes).collect();
        (Just(state), Just(order).prop_shuffle())
    })
}

impl Arbitrary for SystemState {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        arb_system_state(MAX_PROCESSES, MAX_RESOURCES, MAX_UNITS).boxed()
    }
}
