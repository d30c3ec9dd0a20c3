// SPDX-License-Identifier: Apache-2.0
// Copyright IosLab Authors

//! The compiled routing table and its full-rebuild compiler.
//!
//! The table is never patched incrementally: every topology-touching
//! mutation triggers [`compile_routes`], which rebuilds it from scratch in
//! ascending administrative-distance order and suppresses higher-distance
//! duplicates of a destination already placed.

use crate::state::{DeviceState, OspfNetwork, RouterProto};
use net::{IfName, Netmask, network_of};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::Display;
use std::net::Ipv4Addr;
use strum::AsRefStr;

/// Where a routing entry came from. The order of the variants encodes the
/// administrative-distance precedence used when compiling the table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, AsRefStr, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RouteOrigin {
    Connected,
    Static,
    Ospf,
    Rip,
}

impl RouteOrigin {
    /// Administrative distance implied by the origin.
    #[must_use]
    pub fn distance(self) -> u8 {
        match self {
            RouteOrigin::Connected => 0,
            RouteOrigin::Static => 1,
            RouteOrigin::Ospf => 110,
            RouteOrigin::Rip => 120,
        }
    }

    /// Single-letter code used by `show ip route`.
    #[must_use]
    pub fn code(self) -> char {
        match self {
            RouteOrigin::Connected => 'C',
            RouteOrigin::Static => 'S',
            RouteOrigin::Ospf => 'O',
            RouteOrigin::Rip => 'R',
        }
    }
}

/// How a destination is reached: directly out an interface, or via a
/// gateway address.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NextHop {
    Interface(IfName),
    Gateway(Ipv4Addr),
}

impl Display for NextHop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NextHop::Interface(ifname) => ifname.fmt(f),
            NextHop::Gateway(addr) => addr.fmt(f),
        }
    }
}

/// One entry of the compiled table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEntry {
    pub network: Ipv4Addr,
    pub mask: Netmask,
    pub next_hop: NextHop,
    pub origin: RouteOrigin,
    pub metric: u32,
}

/// Classful mask a RIP network statement implies for its address.
fn classful_mask(addr: Ipv4Addr) -> Netmask {
    match addr.octets()[0] {
        0..=127 => Netmask::CLASS_A,
        128..=191 => Netmask::CLASS_B,
        _ => Netmask::CLASS_C,
    }
}

/// Does a RIP `network` statement cover a connected network?
fn rip_covers(statement: Ipv4Addr, connected: Ipv4Addr) -> bool {
    statement == connected
        || statement == network_of(connected, classful_mask(statement).as_addr())
}

/// Does an OSPF `network <addr> <wildcard>` statement cover a connected
/// network? Wildcard bits are "don't care" bits.
fn ospf_covers(statement: &OspfNetwork, connected: Ipv4Addr) -> bool {
    let care = !u32::from(statement.wildcard);
    (u32::from(connected) & care) == (u32::from(statement.network) & care)
}

/// A deterministic mock route "learned" over a matched connected subnet:
/// the neighbor advertises the adjacent network (third octet bumped) from a
/// peer address inside the connected subnet. Intentionally approximate; the
/// simulator teaches table mechanics, not protocol convergence.
fn learned_route(connected: &RouteEntry, origin: RouteOrigin) -> RouteEntry {
    let mut network = connected.network.octets();
    network[2] = network[2].wrapping_add(1);
    let mut peer = connected.network.octets();
    peer[3] = peer[3].wrapping_add(2);
    RouteEntry {
        network: Ipv4Addr::from(network),
        mask: connected.mask,
        next_hop: NextHop::Gateway(Ipv4Addr::from(peer)),
        origin,
        metric: match origin {
            RouteOrigin::Rip => 1,  // hop count
            RouteOrigin::Ospf => 2, // stand-in cost
            _ => 0,
        },
    }
}

fn push_unique(
    table: &mut Vec<RouteEntry>,
    seen: &mut BTreeSet<(Ipv4Addr, Netmask)>,
    entry: RouteEntry,
) {
    if seen.insert((entry.network, entry.mask)) {
        table.push(entry);
    }
}

/// Full, deterministic rebuild of the routing table from `(interfaces,
/// static_routes, rip, ospf)`. Idempotent: compiling the same snapshot
/// twice yields the same table.
#[must_use]
pub fn compile_routes(state: &DeviceState) -> Vec<RouteEntry> {
    let mut table = Vec::new();
    let mut seen = BTreeSet::new();

    // connected first (distance 0)
    let mut connected = Vec::new();
    for (name, iface) in &state.interfaces {
        if let Some((ip, mask)) = iface.addressed_up() {
            let entry = RouteEntry {
                network: network_of(ip, mask.as_addr()),
                mask,
                next_hop: NextHop::Interface(name.clone()),
                origin: RouteOrigin::Connected,
                metric: 0,
            };
            connected.push(entry.clone());
            push_unique(&mut table, &mut seen, entry);
        }
    }

    // static intent, verbatim (distance 1)
    for route in &state.static_routes {
        push_unique(
            &mut table,
            &mut seen,
            RouteEntry {
                network: route.network,
                mask: route.mask,
                next_hop: NextHop::Gateway(route.next_hop),
                origin: RouteOrigin::Static,
                metric: 0,
            },
        );
    }

    // synthetic learned routes, OSPF (110) before RIP (120)
    if let Some(ospf) = &state.ospf {
        for statement in &ospf.networks {
            for conn in connected
                .iter()
                .filter(|c| ospf_covers(statement, c.network))
            {
                push_unique(&mut table, &mut seen, learned_route(conn, RouteOrigin::Ospf));
            }
        }
    }
    if let Some(rip) = &state.rip {
        for statement in &rip.networks {
            for conn in connected.iter().filter(|c| rip_covers(*statement, c.network)) {
                push_unique(&mut table, &mut seen, learned_route(conn, RouteOrigin::Rip));
            }
        }
    }

    table
}

/// `router_config` protocol context equivalent of a route origin.
impl From<RouterProto> for RouteOrigin {
    fn from(proto: RouterProto) -> Self {
        match proto {
            RouterProto::Rip => RouteOrigin::Rip,
            RouterProto::Ospf => RouteOrigin::Ospf,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{DeviceKind, IfStatus, RipConfig, StaticRoute};
    use std::str::FromStr;

    fn addr(s: &str) -> Ipv4Addr {
        Ipv4Addr::from_str(s).expect("test address")
    }

    fn mask(s: &str) -> Netmask {
        Netmask::from_str(s).expect("test mask")
    }

    fn state_with_g00_up() -> DeviceState {
        let mut state = DeviceState::initial(DeviceKind::Router, "Router");
        let ifname: IfName = "g0/0".parse().expect("ifname");
        let iface = state
            .interfaces
            .get_mut(&ifname)
            .expect("seeded interface");
        iface.ip = Some(addr("192.168.1.1"));
        iface.mask = Some(mask("255.255.255.0"));
        iface.status = IfStatus::Up;
        state
    }

    #[test]
    fn connected_route_from_up_interface() {
        let state = state_with_g00_up();
        let table = compile_routes(&state);
        assert_eq!(table.len(), 1);
        assert_eq!(table[0].network, addr("192.168.1.0"));
        assert_eq!(table[0].origin, RouteOrigin::Connected);
        assert_eq!(
            table[0].next_hop,
            NextHop::Interface("g0/0".parse().expect("ifname"))
        );
    }

    #[test]
    fn admin_down_contributes_nothing() {
        let mut state = state_with_g00_up();
        let ifname: IfName = "g0/0".parse().expect("ifname");
        state
            .interfaces
            .get_mut(&ifname)
            .expect("seeded interface")
            .status = IfStatus::AdminDown;
        assert!(compile_routes(&state).is_empty());
    }

    #[test]
    fn compile_is_idempotent() {
        let mut state = state_with_g00_up();
        state.static_routes.insert(StaticRoute {
            network: addr("10.0.0.0"),
            mask: mask("255.0.0.0"),
            next_hop: addr("192.168.1.254"),
        });
        let first = compile_routes(&state);
        state.routes = first.clone();
        let second = compile_routes(&state);
        assert_eq!(first, second);
    }

    #[test]
    fn lower_distance_wins_for_duplicate_destination() {
        // a static route to the connected subnet must lose to connected
        let mut state = state_with_g00_up();
        state.static_routes.insert(StaticRoute {
            network: addr("192.168.1.0"),
            mask: mask("255.255.255.0"),
            next_hop: addr("10.0.0.1"),
        });
        let table = compile_routes(&state);
        assert_eq!(table.len(), 1);
        assert_eq!(table[0].origin, RouteOrigin::Connected);
    }

    #[test]
    fn rip_network_statement_emits_learned_route() {
        let mut state = state_with_g00_up();
        let mut rip = RipConfig::default();
        rip.networks.insert(addr("192.168.1.0"));
        state.rip = Some(rip);

        let table = compile_routes(&state);
        assert_eq!(table.len(), 2);
        assert_eq!(table[1].origin, RouteOrigin::Rip);
        assert_eq!(table[1].network, addr("192.168.2.0"));
        assert_eq!(table[1].next_hop, NextHop::Gateway(addr("192.168.1.2")));
        assert_eq!(table[1].metric, 1);
    }

    #[test]
    fn rip_classful_statement_matches_subnet() {
        // `network 192.168.1.0` is classful; it must also cover the /24
        assert!(rip_covers(addr("192.168.1.0"), addr("192.168.1.0")));
        // class A statement covers any 10.x subnet
        assert!(rip_covers(addr("10.0.0.0"), addr("10.1.2.0")));
        assert!(!rip_covers(addr("10.0.0.0"), addr("172.16.0.0")));
    }

    #[test]
    fn ospf_statement_emits_learned_route() {
        let mut state = state_with_g00_up();
        state.ospf = Some(crate::state::OspfConfig {
            process_id: 1,
            networks: vec![OspfNetwork {
                network: addr("192.168.1.0"),
                wildcard: addr("0.0.0.255"),
                area: 0,
            }],
        });
        let table = compile_routes(&state);
        assert_eq!(table.len(), 2);
        assert_eq!(table[1].origin, RouteOrigin::Ospf);
        assert_eq!(table[1].metric, 2);
    }

    #[test]
    fn unmatched_protocol_network_emits_nothing() {
        let mut state = state_with_g00_up();
        let mut rip = RipConfig::default();
        rip.networks.insert(addr("172.16.0.0"));
        state.rip = Some(rip);
        let table = compile_routes(&state);
        assert_eq!(table.len(), 1);
        assert_eq!(table[0].origin, RouteOrigin::Connected);
    }

    #[test]
    fn distances() {
        assert!(RouteOrigin::Connected.distance() < RouteOrigin::Static.distance());
        assert!(RouteOrigin::Static.distance() < RouteOrigin::Ospf.distance());
        assert!(RouteOrigin::Ospf.distance() < RouteOrigin::Rip.distance());
    }
}
