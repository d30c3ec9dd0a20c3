// SPDX-License-Identifier: Apache-2.0
// Copyright IosLab Authors

//! Pure state transitions.
//!
//! Every function takes a snapshot by reference and returns a new snapshot;
//! the input is never modified. A transition handed a name or id that does
//! not resolve returns the snapshot unchanged (logged at debug) rather than
//! erroring, so a half-applied edit is never observable.

use crate::mode::{Mode, prompt_for};
use crate::rib::compile_routes;
use crate::state::{
    DeviceState, IfStatus, OspfConfig, OspfNetwork, RipConfig, StaticRoute, Vlan,
};
use net::{IfName, Netmask, Vid};
use std::net::Ipv4Addr;
use tracing::debug;

/// Rebuild the derived routing table on a snapshot.
#[must_use]
pub fn recompile(state: &DeviceState) -> DeviceState {
    let mut next = state.clone();
    next.routes = compile_routes(&next);
    next
}

fn recompiled(mut next: DeviceState) -> DeviceState {
    next.routes = compile_routes(&next);
    next
}

/// Switch modes, recomputing the prompt and dropping any editing context
/// that does not survive the move.
#[must_use]
pub fn transition_mode(state: &DeviceState, mode: Mode) -> DeviceState {
    let mut next = state.clone();
    next.mode = mode;
    next.prompt = prompt_for(&next.hostname, mode);
    if mode != Mode::InterfaceConfig {
        next.current_interface = None;
    }
    if mode != Mode::VlanConfig {
        next.current_vlan = None;
    }
    if mode != Mode::RouterConfig {
        next.router_proto = None;
    }
    next
}

/// Like [`transition_mode`], but records the mode being left so `exit` can
/// return to it.
#[must_use]
pub fn enter_mode(state: &DeviceState, mode: Mode) -> DeviceState {
    let mut next = transition_mode(state, mode);
    next.mode_history.push(state.mode);
    next
}

/// Pop the mode history; fall back to the fixed parent table when empty.
#[must_use]
pub fn exit_mode(state: &DeviceState) -> DeviceState {
    let mut popped = state.clone();
    match popped.mode_history.pop() {
        Some(previous) => transition_mode(&popped, previous),
        None => transition_mode(state, state.mode.exit_parent()),
    }
}

/// `end`: straight back to privileged exec, history and contexts cleared.
#[must_use]
pub fn end_config(state: &DeviceState) -> DeviceState {
    let mut next = transition_mode(state, Mode::Privileged);
    next.mode_history.clear();
    next
}

#[must_use]
pub fn update_hostname(state: &DeviceState, hostname: &str) -> DeviceState {
    let mut next = state.clone();
    next.hostname = hostname.to_owned();
    next.prompt = prompt_for(&next.hostname, next.mode);
    next
}

#[must_use]
pub fn set_interface_ip(
    state: &DeviceState,
    ifname: &IfName,
    ip: Ipv4Addr,
    mask: Netmask,
) -> DeviceState {
    let mut next = state.clone();
    let Some(iface) = next.interfaces.get_mut(ifname) else {
        debug!(interface = %ifname, "ip address on unknown interface ignored");
        return state.clone();
    };
    iface.ip = Some(ip);
    iface.mask = Some(mask);
    recompiled(next)
}

#[must_use]
pub fn set_interface_status(
    state: &DeviceState,
    ifname: &IfName,
    status: IfStatus,
) -> DeviceState {
    let mut next = state.clone();
    let Some(iface) = next.interfaces.get_mut(ifname) else {
        debug!(interface = %ifname, "status change on unknown interface ignored");
        return state.clone();
    };
    iface.status = status;
    recompiled(next)
}

/// Insert-or-update a VLAN; the sequence stays sorted by id.
#[must_use]
pub fn configure_vlan(state: &DeviceState, id: Vid, name: Option<&str>) -> DeviceState {
    let mut next = state.clone();
    match next.vlans.iter_mut().find(|v| v.id == id) {
        Some(vlan) => {
            if let Some(name) = name {
                vlan.name = name.to_owned();
            }
        }
        None => {
            next.vlans.push(Vlan {
                id,
                name: name.map_or_else(|| Vlan::default_name(id), ToOwned::to_owned),
                ports: Vec::new(),
            });
            next.vlans.sort_by_key(|v| v.id);
        }
    }
    next
}

/// Idempotent set-insert on `(network, mask, next_hop)`.
#[must_use]
pub fn add_static_route(
    state: &DeviceState,
    network: Ipv4Addr,
    mask: Netmask,
    next_hop: Ipv4Addr,
) -> DeviceState {
    let mut next = state.clone();
    next.static_routes.insert(StaticRoute {
        network,
        mask,
        next_hop,
    });
    recompiled(next)
}

#[must_use]
pub fn remove_static_route(
    state: &DeviceState,
    network: Ipv4Addr,
    mask: Netmask,
    next_hop: Ipv4Addr,
) -> DeviceState {
    let mut next = state.clone();
    let removed = next.static_routes.remove(&StaticRoute {
        network,
        mask,
        next_hop,
    });
    if !removed {
        debug!(%network, "removal of unknown static route ignored");
        return state.clone();
    }
    recompiled(next)
}

/// Ensure a RIP process exists.
#[must_use]
pub fn configure_rip(state: &DeviceState) -> DeviceState {
    let mut next = state.clone();
    next.rip.get_or_insert_with(RipConfig::default);
    recompiled(next)
}

#[must_use]
pub fn set_rip_version(state: &DeviceState, version: u8) -> DeviceState {
    let mut next = state.clone();
    let Some(rip) = next.rip.as_mut() else {
        debug!("rip version without a rip process ignored");
        return state.clone();
    };
    rip.version = version;
    next
}

#[must_use]
pub fn set_rip_auto_summary(state: &DeviceState, auto_summary: bool) -> DeviceState {
    let mut next = state.clone();
    let Some(rip) = next.rip.as_mut() else {
        debug!("auto-summary without a rip process ignored");
        return state.clone();
    };
    rip.auto_summary = auto_summary;
    next
}

#[must_use]
pub fn add_rip_network(state: &DeviceState, network: Ipv4Addr) -> DeviceState {
    let mut next = state.clone();
    let Some(rip) = next.rip.as_mut() else {
        debug!(%network, "rip network without a rip process ignored");
        return state.clone();
    };
    rip.networks.insert(network);
    recompiled(next)
}

/// Start (or replace) an OSPF process.
#[must_use]
pub fn configure_ospf(state: &DeviceState, process_id: u16) -> DeviceState {
    let mut next = state.clone();
    match next.ospf.as_mut() {
        Some(ospf) if ospf.process_id == process_id => {}
        _ => {
            next.ospf = Some(OspfConfig {
                process_id,
                networks: Vec::new(),
            });
        }
    }
    recompiled(next)
}

#[must_use]
pub fn add_ospf_network(
    state: &DeviceState,
    network: Ipv4Addr,
    wildcard: Ipv4Addr,
    area: u32,
) -> DeviceState {
    let mut next = state.clone();
    let Some(ospf) = next.ospf.as_mut() else {
        debug!(%network, "ospf network without an ospf process ignored");
        return state.clone();
    };
    let statement = OspfNetwork {
        network,
        wildcard,
        area,
    };
    if !ospf.networks.contains(&statement) {
        ospf.networks.push(statement);
    }
    recompiled(next)
}
