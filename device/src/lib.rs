// SPDX-License-Identifier: Apache-2.0
// Copyright IosLab Authors

//! The simulated device: an immutable state snapshot, pure transition
//! functions over it, and the routing table compiler that keeps the derived
//! route table consistent with interfaces, static routes and routing
//! protocol configuration.

pub mod display;
pub mod engine;
pub mod mode;
pub mod rib;
pub mod state;

// re-exports
pub use mode::{Mode, prompt_for};
pub use rib::{NextHop, RouteEntry, RouteOrigin, compile_routes};
pub use state::{
    DeviceKind, DeviceState, IfStatus, Interface, OspfConfig, OspfNetwork, RipConfig,
    RouterProto, StaticRoute, Vlan,
};
