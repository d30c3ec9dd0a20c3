// SPDX-License-Identifier: Apache-2.0
// Copyright IosLab Authors

//! Leaf value types for the CLI simulator: strict IPv4 parsing, canonical
//! netmasks, VLAN ids, canonical interface names and numbered-ACL ranges.
//! Everything validates on construction so the rest of the workspace can
//! trust what it holds.

pub mod acl;
pub mod interface;
pub mod ipv4;
pub mod mask;
pub mod vlan;

pub use acl::{AclKind, AclNumber, InvalidAclNumber};
pub use interface::{IfKind, IfName, InvalidIfName};
pub use ipv4::{InvalidIpv4, network_of, parse_ipv4};
pub use mask::{InvalidNetmask, Netmask};
pub use vlan::{InvalidVid, Vid};
