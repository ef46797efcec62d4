// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! Deadlock detection over a snapshot of processes and reusable resources.
//!
//! Three pure operations, meant to be called in sequence:
//!
//! 1. [`validate`] checks the shape and sign of the input.
//! 2. [`detect`] runs the detection form of the Banker's Algorithm and returns
//!    the set of processes that can never complete.
//! 3. [`advise`] proposes recovery strategies and a victim for a non-empty
//!    deadlocked set.
//!
//! None of them hold state between calls or touch caller-owned data, so any
//! number of threads may call them concurrently without synchronization.

#![forbid(unsafe_code)]

mod advisor;
mod detector;
mod error;
mod validator;


pub use advisor::advise;
pub use detector::{detect, detect_in_order};
pub use error::ValidationError;
pub use validator::{validate, validation_outcome};
