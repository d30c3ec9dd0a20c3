// SPDX-License-Identifier: Apache-2.0
// Copyright IosLab Authors

//! Display implementations for the `show` command family. Output is
//! templated from the snapshot, never generated.

use crate::rib::{NextHop, RouteOrigin};
use crate::state::{DeviceState, IfStatus};
use std::fmt::Display;

/// `show ip interface brief`
pub struct IfaceBrief<'a>(pub &'a DeviceState);

impl Display for IfaceBrief<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Interface              IP-Address      OK? Method Status                Protocol"
        )?;
        for (name, iface) in &self.0.interfaces {
            let ip = iface
                .ip
                .map_or_else(|| "unassigned".to_owned(), |a| a.to_string());
            let method = if iface.ip.is_some() { "manual" } else { "unset" };
            writeln!(
                f,
                "{:<23}{:<16}YES {:<7}{:<22}{}",
                name.to_string(),
                ip,
                method,
                iface.status.as_str(),
                iface.status.protocol()
            )?;
        }
        Ok(())
    }
}

/// `show vlan [brief]`
pub struct VlanTable<'a>(pub &'a DeviceState);

impl Display for VlanTable<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "VLAN Name                             Status    Ports")?;
        writeln!(
            f,
            "---- -------------------------------- --------- -------------------------------"
        )?;
        for vlan in &self.0.vlans {
            let ports = vlan
                .ports
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(
                f,
                "{:<4} {:<32} active    {}",
                vlan.id.as_u16(),
                vlan.name,
                ports
            )?;
        }
        Ok(())
    }
}

/// `show ip route`
pub struct RouteTable<'a>(pub &'a DeviceState);

impl Display for RouteTable<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.routes.is_empty() {
            return Ok(());
        }
        writeln!(
            f,
            "Codes: C - connected, S - static, R - RIP, O - OSPF"
        )?;
        writeln!(f)?;
        writeln!(f, "Gateway of last resort is not set")?;
        writeln!(f)?;
        for route in &self.0.routes {
            let prefix = format!("{}/{}", route.network, route.mask.prefix_len());
            match (&route.next_hop, route.origin) {
                (NextHop::Interface(ifname), RouteOrigin::Connected) => {
                    writeln!(f, "C    {prefix} is directly connected, {ifname}")?;
                }
                (next_hop, origin) => {
                    writeln!(
                        f,
                        "{}    {prefix} [{}/{}] via {next_hop}",
                        origin.code(),
                        origin.distance(),
                        route.metric
                    )?;
                }
            }
        }
        Ok(())
    }
}

/// `show running-config`: a plausible config dump reconstructed from state.
pub struct RunningConfig<'a>(pub &'a DeviceState);

impl Display for RunningConfig<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.0;
        writeln!(f, "Building configuration...")?;
        writeln!(f)?;
        writeln!(f, "Current configuration : 1024 bytes")?;
        writeln!(f, "!")?;
        writeln!(f, "version 15.1")?;
        writeln!(f, "hostname {}", state.hostname)?;
        writeln!(f, "!")?;
        for (name, iface) in &state.interfaces {
            writeln!(f, "interface {name}")?;
            if let (Some(ip), Some(mask)) = (iface.ip, iface.mask) {
                writeln!(f, " ip address {ip} {mask}")?;
            }
            if iface.status == IfStatus::AdminDown {
                writeln!(f, " shutdown")?;
            }
            writeln!(f, "!")?;
        }
        for vlan in &state.vlans {
            writeln!(f, "vlan {}", vlan.id)?;
            writeln!(f, " name {}", vlan.name)?;
            writeln!(f, "!")?;
        }
        if let Some(rip) = &state.rip {
            writeln!(f, "router rip")?;
            writeln!(f, " version {}", rip.version)?;
            for network in &rip.networks {
                writeln!(f, " network {network}")?;
            }
            if !rip.auto_summary {
                writeln!(f, " no auto-summary")?;
            }
            writeln!(f, "!")?;
        }
        if let Some(ospf) = &state.ospf {
            writeln!(f, "router ospf {}", ospf.process_id)?;
            for statement in &ospf.networks {
                writeln!(
                    f,
                    " network {} {} area {}",
                    statement.network, statement.wildcard, statement.area
                )?;
            }
            writeln!(f, "!")?;
        }
        for route in state.routes.iter().filter(|r| r.origin == RouteOrigin::Static) {
            writeln!(
                f,
                "ip route {} {} {}",
                route.network,
                route.mask,
                route.next_hop
            )?;
        }
        write!(f, "end")
    }
}
