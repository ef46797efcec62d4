// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! Data model shared by the deadlock detector and its hosts.
//!
//! A [`SystemState`] is built fresh for every detection request. The detector
//! reads it, never mutates it, and produces a [`DetectionResult`]; the advisor
//! turns the deadlocked set into [`Advice`].

#![forbid(unsafe_code)]

pub mod advice;
pub mod detection;
#[cfg(any(test, feature = "fuzzing"))]
pub mod proptest_types;
pub mod state;

pub use advice::Advice;
pub use detection::DetectionResult;
pub use state::{Matrix, ProcessIndex, ResourceCount, ResourceIndex, ResourceVector, SystemState};
