// SPDX-License-Identifier: Apache-2.0
// Copyright IosLab Authors

//! Numbered access-list ranges.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which flavor of numbered ACL a number denotes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AclKind {
    Standard,
    Extended,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum InvalidAclNumber {
    #[error("Access list number {0} is out of range (1-99, 1300-1999 standard; 100-199, 2000-2699 extended)")]
    OutOfRange(u16),
}

/// A validated numbered-ACL identifier.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct AclNumber(u16);

impl AclNumber {
    pub fn new(number: u16) -> Result<Self, InvalidAclNumber> {
        match number {
            1..=99 | 100..=199 | 1300..=1999 | 2000..=2699 => Ok(Self(number)),
            _ => Err(InvalidAclNumber::OutOfRange(number)),
        }
    }

    #[must_use]
    pub fn kind(self) -> AclKind {
        match self.0 {
            1..=99 | 1300..=1999 => AclKind::Standard,
            _ => AclKind::Extended,
        }
    }

    #[must_use]
    pub fn as_u16(self) -> u16 {
        self.0
    }
}
