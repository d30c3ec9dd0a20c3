// SPDX-License-Identifier: Apache-2.0
// Copyright IosLab Authors

//! The immutable device snapshot threaded through the command processor.
//! Every mutation goes through [`crate::engine`] and yields a new snapshot;
//! nothing here is shared between sessions.

use crate::mode::{Mode, prompt_for};
use crate::rib::RouteEntry;
use net::{IfName, Netmask, Vid};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::net::Ipv4Addr;
use strum::{AsRefStr, EnumString};

/// What a session simulates. Only affects the seeded interface set.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, AsRefStr, EnumString, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    #[default]
    Router,
    Switch,
}

/// Administrative status of an interface.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IfStatus {
    Up,
    #[default]
    AdminDown,
}

impl IfStatus {
    /// Status column text, matching vendor phrasing.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            IfStatus::Up => "up",
            IfStatus::AdminDown => "administratively down",
        }
    }

    /// Line-protocol column of `show ip interface brief`.
    #[must_use]
    pub fn protocol(self) -> &'static str {
        match self {
            IfStatus::Up => "up",
            IfStatus::AdminDown => "down",
        }
    }
}

/// Per-interface configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interface {
    pub ip: Option<Ipv4Addr>,
    pub mask: Option<Netmask>,
    pub status: IfStatus,
}

impl Interface {
    /// An interface contributes a connected route only when it is up and
    /// fully addressed.
    #[must_use]
    pub fn addressed_up(&self) -> Option<(Ipv4Addr, Netmask)> {
        if self.status != IfStatus::Up {
            return None;
        }
        match (self.ip, self.mask) {
            (Some(ip), Some(mask)) => Some((ip, mask)),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vlan {
    pub id: Vid,
    pub name: String,
    pub ports: Vec<IfName>,
}

impl Vlan {
    /// The default name a bare `vlan <id>` creates, e.g. `VLAN0010`.
    #[must_use]
    pub fn default_name(id: Vid) -> String {
        format!("VLAN{:04}", id.as_u16())
    }
}

/// User-declared routing intent, distinct from the compiled table.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StaticRoute {
    pub network: Ipv4Addr,
    pub mask: Netmask,
    pub next_hop: Ipv4Addr,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RipConfig {
    pub version: u8,
    pub networks: BTreeSet<Ipv4Addr>,
    pub auto_summary: bool,
}

impl Default for RipConfig {
    fn default() -> Self {
        // vendor defaults: RIPv1 with auto summarization
        Self {
            version: 1,
            networks: BTreeSet::new(),
            auto_summary: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OspfNetwork {
    pub network: Ipv4Addr,
    pub wildcard: Ipv4Addr,
    pub area: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OspfConfig {
    pub process_id: u16,
    pub networks: Vec<OspfNetwork>,
}

/// Which protocol a `router_config` session is editing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouterProto {
    Rip,
    Ospf,
}

/// One simulated device. Treated as an immutable value: the engine clones
/// and edits, callers never observe an in-progress mutation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeviceState {
    pub device: DeviceKind,
    pub hostname: String,
    /// Derived from `(hostname, mode)`; never set directly.
    pub prompt: String,
    pub mode: Mode,
    /// Stack popped by `exit`, cleared by `end`.
    pub mode_history: Vec<Mode>,
    pub current_interface: Option<IfName>,
    pub current_vlan: Option<Vid>,
    pub router_proto: Option<RouterProto>,
    pub interfaces: BTreeMap<IfName, Interface>,
    /// Kept sorted by id; ids are unique.
    pub vlans: Vec<Vlan>,
    pub static_routes: BTreeSet<StaticRoute>,
    pub rip: Option<RipConfig>,
    pub ospf: Option<OspfConfig>,
    /// Compiled routing table. Derived state, rebuilt wholesale by the
    /// engine; never the source of truth for anything else.
    pub routes: Vec<RouteEntry>,
}

impl DeviceState {
    /// Fresh session state with the device kind's factory interfaces, all
    /// unaddressed and administratively down.
    #[must_use]
    pub fn initial(device: DeviceKind, hostname: &str) -> Self {
        let mut interfaces = BTreeMap::new();
        let mut vlans = Vec::new();
        let seeded: &[&str] = match device {
            DeviceKind::Router => &["g0/0", "g0/1", "s0/0/0"],
            DeviceKind::Switch => &["f0/1", "f0/2", "f0/3", "f0/4"],
        };
        for name in seeded {
            if let Ok(ifname) = name.parse::<IfName>() {
                interfaces.insert(ifname, Interface::default());
            }
        }
        if device == DeviceKind::Switch {
            if let Ok(vid) = Vid::new(1) {
                vlans.push(Vlan {
                    id: vid,
                    name: "default".to_owned(),
                    ports: Vec::new(),
                });
            }
        }
        Self {
            device,
            hostname: hostname.to_owned(),
            prompt: prompt_for(hostname, Mode::User),
            mode: Mode::User,
            mode_history: Vec::new(),
            current_interface: None,
            current_vlan: None,
            router_proto: None,
            interfaces,
            vlans,
            static_routes: BTreeSet::new(),
            rip: None,
            ospf: None,
            routes: Vec::new(),
        }
    }

    #[must_use]
    pub fn interface(&self, name: &IfName) -> Option<&Interface> {
        self.interfaces.get(name)
    }

    #[must_use]
    pub fn vlan(&self, id: Vid) -> Option<&Vlan> {
        self.vlans.iter().find(|v| v.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn router_factory_interfaces() {
        let state = DeviceState::initial(DeviceKind::Router, "Router");
        let names: Vec<String> = state.interfaces.keys().map(ToString::to_string).collect();
        assert_eq!(
            names,
            ["GigabitEthernet0/0", "GigabitEthernet0/1", "Serial0/0/0"]
        );
        assert!(state.vlans.is_empty());
        assert_eq!(state.prompt, "Router>");
        assert_eq!(state.mode, Mode::User);
        for iface in state.interfaces.values() {
            assert_eq!(iface.status, IfStatus::AdminDown);
            assert!(iface.ip.is_none());
        }
    }

    #[test]
    fn switch_factory_state() {
        let state = DeviceState::initial(DeviceKind::Switch, "Switch");
        assert_eq!(state.interfaces.len(), 4);
        assert_eq!(state.vlans.len(), 1);
        assert_eq!(state.vlans[0].name, "default");
        assert_eq!(state.vlans[0].id.as_u16(), 1);
    }

    #[test]
    fn default_vlan_name_is_zero_padded() {
        let vid = Vid::new(10).expect("valid vid");
        assert_eq!(Vlan::default_name(vid), "VLAN0010");
    }
}
