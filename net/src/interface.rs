// SPDX-License-Identifier: Apache-2.0
// Copyright IosLab Authors

//! Canonical interface naming.
//!
//! The CLI accepts heavily abbreviated interface spellings (`g0/0`, `gi0/0`,
//! `Fa0/1`, `GigabitEthernet0/0`). All of them normalize to one canonical
//! [`IfName`], which is what keys the interface table.

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use strum::{AsRefStr, EnumIter, IntoEnumIterator};
use thiserror::Error;

/// Hardware kinds the simulator knows how to canonicalize.
#[derive(
    Copy,
    Clone,
    Debug,
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
pub enum IfKind {
    FastEthernet,
    GigabitEthernet,
    Loopback,
    Serial,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvalidIfName {
    #[error("Unknown interface type in '{0}'")]
    UnknownKind(String),
    #[error("Ambiguous interface type in '{0}'")]
    AmbiguousKind(String),
    #[error("Bad interface number in '{0}'")]
    BadPosition(String),
}

/// A canonical interface name: kind plus slot/port position, e.g.
/// `GigabitEthernet0/0`.
#[derive(
    Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct IfName {
    kind: IfKind,
    position: String,
}

impl IfName {
    pub fn new(kind: IfKind, position: &str) -> Result<Self, InvalidIfName> {
        if !valid_position(position) {
            return Err(InvalidIfName::BadPosition(position.to_owned()));
        }
        Ok(Self {
            kind,
            position: position.to_owned(),
        })
    }

    #[must_use]
    pub fn kind(&self) -> IfKind {
        self.kind
    }

    /// The slot/port part, e.g. `0/0`.
    #[must_use]
    pub fn position(&self) -> &str {
        &self.position
    }
}

fn valid_position(position: &str) -> bool {
    !position.is_empty()
        && position.chars().all(|c| c.is_ascii_digit() || c == '/')
        && position.chars().any(|c| c.is_ascii_digit())
}

impl FromStr for IfName {
    type Err = InvalidIfName;

    /// Normalize an interface token. The alphabetic prefix picks the kind by
    /// unambiguous case-insensitive abbreviation; the rest is the position.
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let split = token
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(token.len());
        let (prefix, position) = token.split_at(split);
        if prefix.is_empty() {
            return Err(InvalidIfName::UnknownKind(token.to_owned()));
        }

        let lowered = prefix.to_lowercase();
        let candidates: Vec<IfKind> = IfKind::iter()
            .filter(|kind| kind.as_ref().to_lowercase().starts_with(&lowered))
            .collect();
        match candidates.as_slice() {
            [kind] => IfName::new(*kind, position)
                .map_err(|_| InvalidIfName::BadPosition(token.to_owned())),
            [] => Err(InvalidIfName::UnknownKind(token.to_owned())),
            _ => Err(InvalidIfName::AmbiguousKind(token.to_owned())),
        }
    }
}

impl Display for IfName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.kind.as_ref(), self.position)
    }
}
