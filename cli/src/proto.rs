// SPDX-License-Identifier: Apache-2.0
// Copyright IosLab Authors

//! The dispatch actions, the structured processing result, and the seam to
//! an external interpreter the host application may consult when the
//! grammar has no match. The deterministic core never calls out; it only
//! defines the shape such a collaborator must return.

use device::{DeviceState, Mode, engine};
use serde::{Deserialize, Serialize};

/// Everything a grammar leaf can dispatch. Resolved once at grammar
/// construction; the processor never re-parses matched paths.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    // mode navigation
    Enable,
    Exit,
    End,
    ConfigureTerminal,

    // global configuration
    SetHostname,
    EnterInterface,
    EnterVlan,
    IpRouteAdd,
    IpRouteDel,
    RouterRip,
    RouterOspf,
    AccessList,

    // interface configuration
    IpAddress,
    Shutdown,
    NoShutdown,

    // vlan configuration
    VlanName,

    // router configuration
    RipVersion,
    RouterNetwork,
    NoAutoSummary,

    // show family
    ShowIpIntBrief,
    ShowIpRoute,
    ShowRunningConfig,
    ShowVlan,
}

/// Result of processing one line against one snapshot.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CliResponse {
    pub valid: bool,
    pub output: String,
    /// Equal to the input snapshot when nothing mutated.
    pub new_state: DeviceState,
    /// Present iff the mode changed.
    pub mode_change: Option<Mode>,
    /// Present iff the hostname changed.
    pub hostname_change: Option<String>,
    pub error: Option<String>,
}

impl CliResponse {
    pub fn accepted(state: &DeviceState, next: DeviceState, output: impl Into<String>) -> Self {
        Self {
            valid: true,
            output: output.into(),
            mode_change: (next.mode != state.mode).then_some(next.mode),
            hostname_change: (next.hostname != state.hostname)
                .then(|| next.hostname.clone()),
            new_state: next,
            error: None,
        }
    }

    /// A rejected line: `%`-prefixed message, snapshot untouched.
    pub fn rejected(state: &DeviceState, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            valid: false,
            output: message.clone(),
            new_state: state.clone(),
            mode_change: None,
            hostname_change: None,
            error: Some(message),
        }
    }
}

/// Verdict from an external interpreter, in the same shape a
/// grammar-resolved result carries.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FallbackReply {
    pub valid: bool,
    pub output: String,
    pub mode_change: Option<Mode>,
    pub hostname_change: Option<String>,
    pub error: Option<String>,
}

/// Seam for an interpreter consulted only when the grammar yields no match
/// for a line. Implementations live in the host application; the core
/// treats the reply as opaque text plus optional mode/hostname effects.
pub trait FallbackInterpreter {
    fn interpret(&self, mode_label: &str, hostname: &str, line: &str) -> FallbackReply;
}

/// Merge a fallback verdict into the session exactly as a grammar-resolved
/// result would be.
#[must_use]
pub fn merge_fallback(state: &DeviceState, reply: FallbackReply) -> CliResponse {
    if !reply.valid {
        let mut response = CliResponse::rejected(state, reply.output);
        response.error = reply.error;
        return response;
    }
    let mut next = state.clone();
    if let Some(mode) = reply.mode_change {
        next = engine::transition_mode(&next, mode);
    }
    if let Some(hostname) = &reply.hostname_change {
        next = engine::update_hostname(&next, hostname);
    }
    let mut response = CliResponse::accepted(state, next, reply.output);
    response.error = reply.error;
    response
}
