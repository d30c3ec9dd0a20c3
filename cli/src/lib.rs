// SPDX-License-Identifier: Apache-2.0
// Copyright IosLab Authors

//! The deterministic CLI front of the simulator: per-mode command trees, a
//! token resolver with vendor-style abbreviation rules, and the processor
//! that walks a line through the grammar and dispatches state transitions.

/// Command nodes and tree construction
pub mod cmdtree;

/// The per-mode trees
pub mod grammar;

/// Line processing and dispatch
pub mod processor;

/// Response shape and the external-interpreter seam
pub mod proto;

/// Single-token resolution
pub mod resolve;
