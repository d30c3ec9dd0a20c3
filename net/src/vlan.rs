// SPDX-License-Identifier: Apache-2.0
// Copyright IosLab Authors

//! VLAN id validation.

use core::num::NonZero;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A validated 802.1Q VLAN identifier.
///
/// Backed by a [`NonZero<u16>`] so `Option<Vid>` costs the same as a bare
/// `u16`; 0 and anything above [`Vid::MAX`] never construct.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[repr(transparent)]
pub struct Vid(NonZero<u16>);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
#[must_use]
pub enum InvalidVid {
    #[error("VLAN ID must be between 1 and 4094")]
    OutOfRange,
}

impl Vid {
    pub const MIN: u16 = 1;
    pub const MAX: u16 = 4094;

    pub fn new(id: u16) -> Result<Self, InvalidVid> {
        match NonZero::new(id) {
            Some(val) if val.get() <= Vid::MAX => Ok(Vid(val)),
            _ => Err(InvalidVid::OutOfRange),
        }
    }

    #[must_use]
    pub fn as_u16(self) -> u16 {
        self.0.get()
    }
}

impl TryFrom<u16> for Vid {
    type Error = InvalidVid;

    fn try_from(id: u16) -> Result<Vid, Self::Error> {
        Vid::new(id)
    }
}

impl core::fmt::Display for Vid {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legal_range() {
        assert_eq!(Vid::new(1).expect("min vid").as_u16(), 1);
        assert_eq!(Vid::new(4094).expect("max vid").as_u16(), 4094);
        assert_eq!(Vid::new(0), Err(InvalidVid::OutOfRange));
        assert_eq!(Vid::new(4095), Err(InvalidVid::OutOfRange));
        assert_eq!(Vid::new(u16::MAX), Err(InvalidVid::OutOfRange));
    }

    #[test]
    fn error_text_is_cisco_like() {
        let err = Vid::new(4095).expect_err("out of range");
        assert_eq!(err.to_string(), "VLAN ID must be between 1 and 4094");
    }
}
