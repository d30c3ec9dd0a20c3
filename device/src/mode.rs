// SPDX-License-Identifier: Apache-2.0
// Copyright IosLab Authors

//! CLI modes and prompt derivation.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter};

/// The finite CLI contexts. The active mode gates which grammar subtree is
/// live and determines the prompt suffix.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    AsRefStr,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[default]
    User,
    Privileged,
    GlobalConfig,
    InterfaceConfig,
    RouterConfig,
    LineConfig,
    DhcpConfig,
    VlanConfig,
    AclConfig,
}

impl Mode {
    /// Suffix appended to the hostname to form the prompt.
    #[must_use]
    pub fn prompt_suffix(self) -> &'static str {
        match self {
            Mode::User => ">",
            Mode::Privileged => "#",
            Mode::GlobalConfig => "(config)#",
            Mode::InterfaceConfig => "(config-if)#",
            Mode::RouterConfig => "(config-router)#",
            Mode::LineConfig => "(config-line)#",
            Mode::DhcpConfig => "(dhcp-config)#",
            Mode::VlanConfig => "(config-vlan)#",
            Mode::AclConfig => "(config-ext-nacl)#",
        }
    }

    /// Where `exit` lands when the mode history stack is empty.
    #[must_use]
    pub fn exit_parent(self) -> Mode {
        match self {
            Mode::User | Mode::Privileged => Mode::User,
            Mode::GlobalConfig => Mode::Privileged,
            _ => Mode::GlobalConfig,
        }
    }

    #[must_use]
    pub fn is_config(self) -> bool {
        !matches!(self, Mode::User | Mode::Privileged)
    }

    /// Human label handed to an external interpreter along with a line the
    /// grammar could not match.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Mode::User => "User EXEC mode",
            Mode::Privileged => "Privileged EXEC mode",
            Mode::GlobalConfig => "Global Configuration mode",
            Mode::InterfaceConfig => "Interface Configuration mode",
            Mode::RouterConfig => "Router Configuration mode",
            Mode::LineConfig => "Line Configuration mode",
            Mode::DhcpConfig => "DHCP Pool Configuration mode",
            Mode::VlanConfig => "VLAN Configuration mode",
            Mode::AclConfig => "ACL Configuration mode",
        }
    }
}

/// The prompt is always a pure function of `(hostname, mode)`.
#[must_use]
pub fn prompt_for(hostname: &str, mode: Mode) -> String {
    format!("{hostname}{}", mode.prompt_suffix())
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn prompts() {
        assert_eq!(prompt_for("Router", Mode::User), "Router>");
        assert_eq!(prompt_for("Router", Mode::Privileged), "Router#");
        assert_eq!(prompt_for("R1", Mode::GlobalConfig), "R1(config)#");
        assert_eq!(prompt_for("R1", Mode::InterfaceConfig), "R1(config-if)#");
        assert_eq!(prompt_for("R1", Mode::VlanConfig), "R1(config-vlan)#");
    }

    #[test]
    fn only_user_mode_prompts_with_angle() {
        for mode in Mode::iter() {
            let suffix = mode.prompt_suffix();
            if mode == Mode::User {
                assert!(suffix.ends_with('>'));
            } else {
                assert!(suffix.ends_with('#'));
            }
        }
    }

    #[test]
    fn exit_parents_terminate_at_user() {
        // every chain of exit_parent() must reach User
        for mode in Mode::iter() {
            let mut current = mode;
            for _ in 0..Mode::iter().count() {
                current = current.exit_parent();
            }
            assert_eq!(current, Mode::User);
        }
    }
}
