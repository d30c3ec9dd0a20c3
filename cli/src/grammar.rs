// SPDX-License-Identifier: Apache-2.0
// Copyright IosLab Authors

//! Builds the per-mode command trees.
//!
//! Pure data: every legal command path and argument slot, with the dispatch
//! action attached to the node that completes the command. The processor
//! walks these trees; nothing here has behavior.

use crate::cmdtree::Node;
use crate::proto::Action;
use device::Mode;
use std::collections::BTreeMap;
use strum::IntoEnumIterator;

fn cmd_exit() -> Node {
    Node::new("exit").action(Action::Exit)
}

fn cmd_end() -> Node {
    Node::new("end").action(Action::End)
}

fn cmd_show() -> Node {
    let mut root = Node::new("show");

    let mut ip = Node::new("ip");
    let mut interface = Node::new("interface");
    interface += Node::new("brief").action(Action::ShowIpIntBrief);
    ip += interface;
    ip += Node::new("route").action(Action::ShowIpRoute);
    root += ip;

    let mut vlan = Node::new("vlan").action(Action::ShowVlan);
    vlan += Node::new("brief").action(Action::ShowVlan);
    root += vlan;

    root += Node::new("running-config").action(Action::ShowRunningConfig);
    root
}

fn user_tree() -> Node {
    let mut root = Node::new("");
    root += Node::new("enable").action(Action::Enable);
    root += cmd_exit();
    root
}

fn privileged_tree() -> Node {
    let mut root = Node::new("");
    let mut configure = Node::new("configure");
    configure += Node::new("terminal").action(Action::ConfigureTerminal);
    root += configure;
    root += cmd_show();
    root += cmd_exit();
    root += cmd_end();
    root
}

fn cmd_ip_route(action: Action) -> Node {
    let mut route = Node::new("route");
    let mut network = Node::arg("network");
    let mut mask = Node::arg("mask");
    mask += Node::arg("nexthop").action(action);
    network += mask;
    route += network;
    route
}

fn global_config_tree() -> Node {
    let mut root = Node::new("");

    let mut hostname = Node::new("hostname");
    hostname += Node::arg("name").action(Action::SetHostname);
    root += hostname;

    let mut interface = Node::new("interface");
    interface += Node::arg("iface").action(Action::EnterInterface);
    root += interface;

    let mut vlan = Node::new("vlan");
    vlan += Node::arg("id").action(Action::EnterVlan);
    root += vlan;

    let mut ip = Node::new("ip");
    ip += cmd_ip_route(Action::IpRouteAdd);
    root += ip;

    let mut no = Node::new("no");
    let mut no_ip = Node::new("ip");
    no_ip += cmd_ip_route(Action::IpRouteDel);
    no += no_ip;
    root += no;

    let mut router = Node::new("router");
    router += Node::new("rip").action(Action::RouterRip);
    let mut ospf = Node::new("ospf");
    ospf += Node::arg("pid").action(Action::RouterOspf);
    router += ospf;
    root += router;

    let mut access_list = Node::new("access-list");
    let mut number = Node::arg("aclnum");
    for verb in ["permit", "deny"] {
        let mut rule = Node::new(verb);
        rule += Node::arg("source").action(Action::AccessList);
        number += rule;
    }
    access_list += number;
    root += access_list;

    root += cmd_exit();
    root += cmd_end();
    root
}

fn interface_config_tree() -> Node {
    let mut root = Node::new("");

    let mut ip = Node::new("ip");
    let mut address = Node::new("address");
    let mut addr = Node::arg("ip");
    addr += Node::arg("mask").action(Action::IpAddress);
    address += addr;
    ip += address;
    root += ip;

    root += Node::new("shutdown").action(Action::Shutdown);
    let mut no = Node::new("no");
    no += Node::new("shutdown").action(Action::NoShutdown);
    root += no;

    root += cmd_exit();
    root += cmd_end();
    root
}

fn vlan_config_tree() -> Node {
    let mut root = Node::new("");
    let mut name = Node::new("name");
    name += Node::arg("name").action(Action::VlanName);
    root += name;
    root += cmd_exit();
    root += cmd_end();
    root
}

fn router_config_tree() -> Node {
    let mut root = Node::new("");

    let mut version = Node::new("version");
    version += Node::arg("version").action(Action::RipVersion);
    root += version;

    // `network <net>` completes a RIP statement; OSPF keeps walking into
    // `<wildcard> area <area>`
    let mut network = Node::new("network");
    let mut net_arg = Node::arg("network").action(Action::RouterNetwork);
    let mut wildcard = Node::arg("wildcard");
    let mut area = Node::new("area");
    area += Node::arg("area").action(Action::RouterNetwork);
    wildcard += area;
    net_arg += wildcard;
    network += net_arg;
    root += network;

    let mut no = Node::new("no");
    no += Node::new("auto-summary").action(Action::NoAutoSummary);
    root += no;

    root += cmd_exit();
    root += cmd_end();
    root
}

/// Modes with no commands of their own (reachable only through an external
/// interpreter's mode change) still honor `exit`/`end`.
fn bare_config_tree() -> Node {
    let mut root = Node::new("");
    root += cmd_exit();
    root += cmd_end();
    root
}

/// The full grammar: one tree per mode, built once per session (or shared,
/// it is immutable after construction).
pub struct Grammar {
    trees: BTreeMap<Mode, Node>,
}

impl Default for Grammar {
    fn default() -> Self {
        Self::build()
    }
}

impl Grammar {
    #[must_use]
    pub fn build() -> Self {
        let trees = Mode::iter()
            .map(|mode| {
                let tree = match mode {
                    Mode::User => user_tree(),
                    Mode::Privileged => privileged_tree(),
                    Mode::GlobalConfig => global_config_tree(),
                    Mode::InterfaceConfig => interface_config_tree(),
                    Mode::VlanConfig => vlan_config_tree(),
                    Mode::RouterConfig => router_config_tree(),
                    Mode::LineConfig | Mode::DhcpConfig | Mode::AclConfig => bare_config_tree(),
                };
                (mode, tree)
            })
            .collect();
        Self { trees }
    }

    /// The tree gated by `mode`. Every mode has one.
    #[must_use]
    pub fn tree(&self, mode: Mode) -> &Node {
        self.trees.get(&mode).unwrap_or_else(|| {
            // Grammar::build seeds every Mode variant
            unreachable!("no grammar for mode {mode:?}")
        })
    }
}
