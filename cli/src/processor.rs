// SPDX-License-Identifier: Apache-2.0
// Copyright IosLab Authors

//! The command processor: tokenize a line, walk the mode's tree through the
//! resolver, validate captured values, dispatch the matched action against
//! the state engine, and render output.
//!
//! Validation happens before dispatch, so a rejected line never leaves a
//! partially-applied snapshot behind.

use crate::cmdtree::Node;
use crate::grammar::Grammar;
use crate::proto::{Action, CliResponse, FallbackInterpreter, merge_fallback};
use crate::resolve::{Resolution, resolve};
use device::display::{IfaceBrief, RouteTable, RunningConfig, VlanTable};
use device::{DeviceState, IfStatus, Mode, RouterProto, engine};
use net::{AclNumber, IfName, Netmask, Vid, parse_ipv4};
use std::collections::BTreeMap;
use std::net::Ipv4Addr;
use tracing::debug;

type Args = BTreeMap<&'static str, String>;

/// Owns the grammar and processes lines against snapshots. Stateless
/// otherwise; one processor can serve any number of sessions.
pub struct Processor {
    grammar: Grammar,
}

impl Default for Processor {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of walking a line through a mode's tree, before dispatch.
enum Walk {
    Complete(Action, Args),
    /// The very first token matched nothing. The only case a fallback
    /// interpreter may take over.
    RootMiss,
    Reject(String),
    Empty,
}

impl Processor {
    #[must_use]
    pub fn new() -> Self {
        Self {
            grammar: Grammar::build(),
        }
    }

    /// Process one line. Always returns a structured result; errors are
    /// `%`-prefixed text, never panics or partial state.
    pub fn process(&self, state: &DeviceState, line: &str) -> CliResponse {
        match self.walk(state, line) {
            Walk::Complete(action, args) => self.dispatch(state, action, &args),
            Walk::Empty => CliResponse::accepted(state, state.clone(), ""),
            Walk::RootMiss => {
                CliResponse::rejected(state, "% Invalid input detected at '^' marker.")
            }
            Walk::Reject(message) => CliResponse::rejected(state, message),
        }
    }

    /// Like [`Self::process`], but hands lines the grammar has no root
    /// keyword for to `fallback` instead of rejecting them outright.
    /// Validation failures and mid-command errors never reach the fallback.
    pub fn process_with_fallback(
        &self,
        state: &DeviceState,
        line: &str,
        fallback: &dyn FallbackInterpreter,
    ) -> CliResponse {
        match self.walk(state, line) {
            Walk::RootMiss => {
                let reply = fallback.interpret(state.mode.label(), &state.hostname, line.trim());
                merge_fallback(state, reply)
            }
            Walk::Complete(action, args) => self.dispatch(state, action, &args),
            Walk::Empty => CliResponse::accepted(state, state.clone(), ""),
            Walk::Reject(message) => CliResponse::rejected(state, message),
        }
    }

    fn walk(&self, state: &DeviceState, line: &str) -> Walk {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Walk::Empty;
        }

        let tree = self.grammar.tree(state.mode);
        let mut args = Args::new();
        let mut current: Option<&Node> = None;

        for (index, token) in trimmed.split_whitespace().enumerate() {
            let level = match current {
                None => &tree.children,
                Some(node) if !node.children.is_empty() => &node.children,
                Some(_) => {
                    // complete command with tokens left over
                    return Walk::Reject(format!("% Invalid input detected at '{token}'"));
                }
            };
            match resolve(level, token) {
                Resolution::Matched { node, .. } => {
                    if let Some(arg) = node.arg_name {
                        args.insert(arg, token.to_owned());
                    }
                    current = Some(node);
                }
                Resolution::Ambiguous(candidates) => {
                    debug!(token, ?candidates, "ambiguous token");
                    return Walk::Reject(format!("% Ambiguous command: \"{token}\""));
                }
                Resolution::NoMatch if index == 0 => return Walk::RootMiss,
                Resolution::NoMatch => {
                    return Walk::Reject(format!("% Invalid input detected at '{token}'"));
                }
            }
        }

        match current.and_then(|node| node.action) {
            Some(action) => Walk::Complete(action, args),
            None => Walk::Reject("% Incomplete command.".to_owned()),
        }
    }

    fn dispatch(&self, state: &DeviceState, action: Action, args: &Args) -> CliResponse {
        match action {
            Action::Enable => {
                let next = engine::transition_mode(state, Mode::Privileged);
                CliResponse::accepted(state, next, "")
            }
            Action::Exit => CliResponse::accepted(state, engine::exit_mode(state), ""),
            Action::End => CliResponse::accepted(state, engine::end_config(state), ""),
            Action::ConfigureTerminal => {
                let next = engine::enter_mode(state, Mode::GlobalConfig);
                CliResponse::accepted(
                    state,
                    next,
                    "Enter configuration commands, one per line.  End with CNTL/Z.",
                )
            }
            Action::SetHostname => {
                let next = engine::update_hostname(state, arg(args, "name"));
                CliResponse::accepted(state, next, "")
            }
            Action::EnterInterface => enter_interface(state, args),
            Action::EnterVlan => enter_vlan(state, args),
            Action::VlanName => vlan_name(state, args),
            Action::IpAddress => ip_address(state, args),
            Action::Shutdown => set_status(state, IfStatus::AdminDown),
            Action::NoShutdown => set_status(state, IfStatus::Up),
            Action::IpRouteAdd | Action::IpRouteDel => ip_route(state, action, args),
            Action::RouterRip => {
                let mut next = engine::enter_mode(&engine::configure_rip(state), Mode::RouterConfig);
                next.router_proto = Some(RouterProto::Rip);
                CliResponse::accepted(state, next, "")
            }
            Action::RouterOspf => router_ospf(state, args),
            Action::RipVersion => rip_version(state, args),
            Action::RouterNetwork => router_network(state, args),
            Action::NoAutoSummary => match state.router_proto {
                Some(RouterProto::Rip) => {
                    let next = engine::set_rip_auto_summary(state, false);
                    CliResponse::accepted(state, next, "")
                }
                _ => CliResponse::rejected(state, "% Invalid input detected at '^' marker."),
            },
            Action::AccessList => access_list(state, args),
            Action::ShowIpIntBrief => {
                CliResponse::accepted(state, state.clone(), IfaceBrief(state).to_string())
            }
            Action::ShowIpRoute => {
                CliResponse::accepted(state, state.clone(), RouteTable(state).to_string())
            }
            Action::ShowRunningConfig => {
                CliResponse::accepted(state, state.clone(), RunningConfig(state).to_string())
            }
            Action::ShowVlan => {
                CliResponse::accepted(state, state.clone(), VlanTable(state).to_string())
            }
        }
    }
}

/// Grammar walks only dispatch an action when its argument nodes were
/// consumed, so lookups cannot miss; the empty string keeps this total.
fn arg<'a>(args: &'a Args, name: &str) -> &'a str {
    args.get(name).map_or("", String::as_str)
}

fn want_ipv4(args: &Args, name: &str, label: &str) -> Result<Ipv4Addr, String> {
    let token = arg(args, name);
    parse_ipv4(token).map_err(|_| format!("% Invalid {label}: {token}"))
}

fn want_mask(args: &Args, name: &str) -> Result<Netmask, String> {
    let token = arg(args, name);
    token
        .parse::<Netmask>()
        .map_err(|_| format!("% Invalid input detected at '{token}'."))
}

fn enter_interface(state: &DeviceState, args: &Args) -> CliResponse {
    let token = arg(args, "iface");
    let Ok(ifname) = token.parse::<IfName>() else {
        return CliResponse::rejected(
            state,
            format!("% Invalid input detected at '{token}'"),
        );
    };
    let mut next = engine::enter_mode(state, Mode::InterfaceConfig);
    next.current_interface = Some(ifname);
    CliResponse::accepted(state, next, "")
}

fn enter_vlan(state: &DeviceState, args: &Args) -> CliResponse {
    let token = arg(args, "id");
    let parsed = token.parse::<u16>().map_err(|_| ()).and_then(|id| {
        Vid::new(id).map_err(|_| ())
    });
    let Ok(vid) = parsed else {
        return CliResponse::rejected(state, "% VLAN ID must be between 1 and 4094");
    };
    let mut next = engine::enter_mode(&engine::configure_vlan(state, vid, None), Mode::VlanConfig);
    next.current_vlan = Some(vid);
    CliResponse::accepted(state, next, "")
}

fn vlan_name(state: &DeviceState, args: &Args) -> CliResponse {
    let Some(vid) = state.current_vlan else {
        debug!("vlan name outside a vlan context ignored");
        return CliResponse::accepted(state, state.clone(), "");
    };
    let next = engine::configure_vlan(state, vid, Some(arg(args, "name")));
    CliResponse::accepted(state, next, "")
}

fn ip_address(state: &DeviceState, args: &Args) -> CliResponse {
    let ip = match want_ipv4(args, "ip", "IP address") {
        Ok(ip) => ip,
        Err(message) => return CliResponse::rejected(state, message),
    };
    let mask_token = arg(args, "mask");
    let Ok(mask) = mask_token.parse::<Netmask>() else {
        return CliResponse::rejected(
            state,
            format!("% Invalid input detected at '{mask_token}'.\n% Bad mask /xx for address {ip}"),
        );
    };
    let Some(ifname) = state.current_interface.clone() else {
        debug!("ip address outside an interface context ignored");
        return CliResponse::accepted(state, state.clone(), "");
    };
    let next = engine::set_interface_ip(state, &ifname, ip, mask);
    CliResponse::accepted(state, next, "")
}

fn set_status(state: &DeviceState, status: IfStatus) -> CliResponse {
    let Some(ifname) = state.current_interface.clone() else {
        debug!("shutdown outside an interface context ignored");
        return CliResponse::accepted(state, state.clone(), "");
    };
    let next = engine::set_interface_status(state, &ifname, status);
    CliResponse::accepted(state, next, "")
}

fn ip_route(state: &DeviceState, action: Action, args: &Args) -> CliResponse {
    let network = match want_ipv4(args, "network", "network address") {
        Ok(addr) => addr,
        Err(message) => return CliResponse::rejected(state, message),
    };
    let mask = match want_mask(args, "mask") {
        Ok(mask) => mask,
        Err(message) => return CliResponse::rejected(state, message),
    };
    let next_hop = match want_ipv4(args, "nexthop", "next hop address") {
        Ok(addr) => addr,
        Err(message) => return CliResponse::rejected(state, message),
    };
    let next = if action == Action::IpRouteAdd {
        engine::add_static_route(state, network, mask, next_hop)
    } else {
        engine::remove_static_route(state, network, mask, next_hop)
    };
    CliResponse::accepted(state, next, "")
}

fn router_ospf(state: &DeviceState, args: &Args) -> CliResponse {
    let token = arg(args, "pid");
    let pid = match token.parse::<u32>() {
        Ok(pid) if (1..=65535).contains(&pid) => pid as u16,
        _ => {
            return CliResponse::rejected(
                state,
                "% OSPF process ID must be between 1 and 65535",
            );
        }
    };
    let mut next = engine::enter_mode(&engine::configure_ospf(state, pid), Mode::RouterConfig);
    next.router_proto = Some(RouterProto::Ospf);
    CliResponse::accepted(state, next, "")
}

fn rip_version(state: &DeviceState, args: &Args) -> CliResponse {
    if state.router_proto != Some(RouterProto::Rip) {
        return CliResponse::rejected(state, "% Invalid input detected at '^' marker.");
    }
    let token = arg(args, "version");
    match token.parse::<u8>() {
        Ok(version @ (1 | 2)) => {
            let next = engine::set_rip_version(state, version);
            CliResponse::accepted(state, next, "")
        }
        _ => CliResponse::rejected(state, format!("% Invalid input detected at '{token}'")),
    }
}

fn router_network(state: &DeviceState, args: &Args) -> CliResponse {
    let network = match want_ipv4(args, "network", "network address") {
        Ok(addr) => addr,
        Err(message) => return CliResponse::rejected(state, message),
    };
    match state.router_proto {
        Some(RouterProto::Rip) => {
            if args.contains_key("wildcard") {
                // `network <net> <wildcard> area <n>` is OSPF syntax
                return CliResponse::rejected(
                    state,
                    format!("% Invalid input detected at '{}'", arg(args, "wildcard")),
                );
            }
            let next = engine::add_rip_network(state, network);
            CliResponse::accepted(state, next, "")
        }
        Some(RouterProto::Ospf) => {
            if !args.contains_key("wildcard") || !args.contains_key("area") {
                return CliResponse::rejected(state, "% Incomplete command.");
            }
            let wildcard = match want_ipv4(args, "wildcard", "wildcard mask") {
                Ok(addr) => addr,
                Err(message) => return CliResponse::rejected(state, message),
            };
            let area_token = arg(args, "area");
            let Ok(area) = area_token.parse::<u32>() else {
                return CliResponse::rejected(
                    state,
                    format!("% Invalid input detected at '{area_token}'"),
                );
            };
            let next = engine::add_ospf_network(state, network, wildcard, area);
            CliResponse::accepted(state, next, "")
        }
        None => {
            debug!("network statement outside a router context ignored");
            CliResponse::accepted(state, state.clone(), "")
        }
    }
}

fn access_list(state: &DeviceState, args: &Args) -> CliResponse {
    let token = arg(args, "aclnum");
    let number = match token.parse::<u16>().map_err(|_| ()).and_then(|n| {
        AclNumber::new(n).map_err(|_| ())
    }) {
        Ok(number) => number,
        Err(()) => {
            return CliResponse::rejected(
                state,
                format!("% Access list number {token} is out of range"),
            );
        }
    };
    let source = arg(args, "source");
    if source != "any" && parse_ipv4(source).is_err() {
        return CliResponse::rejected(state, format!("% Invalid IP address: {source}"));
    }
    // value validation only; ACL rules are not modeled
    debug!(number = number.as_u16(), source, "access-list accepted");
    CliResponse::accepted(state, state.clone(), "")
}
