// SPDX-License-Identifier: Apache-2.0
// Copyright IosLab Authors

//! Canonical IPv4 subnet masks.

use crate::ipv4::parse_ipv4;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::net::Ipv4Addr;
use std::str::FromStr;
use thiserror::Error;

/// A left-contiguous-ones netmask, stored as its prefix length. Arbitrary
/// bit salads like `255.255.255.3` never construct.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Netmask(u8);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidNetmask {
    #[error("'{0}' is not a dotted-quad mask")]
    Malformed(String),
    #[error("mask bits are not left-contiguous")]
    NotContiguous,
    #[error("prefix length {0} exceeds 32")]
    TooLong(u8),
}

impl Netmask {
    /// Classful defaults, used by the routing table compiler to interpret
    /// RIP network statements.
    pub const CLASS_A: Netmask = Netmask(8);
    pub const CLASS_B: Netmask = Netmask(16);
    pub const CLASS_C: Netmask = Netmask(24);

    pub fn new(prefix_len: u8) -> Result<Self, InvalidNetmask> {
        if prefix_len > 32 {
            return Err(InvalidNetmask::TooLong(prefix_len));
        }
        Ok(Self(prefix_len))
    }

    #[must_use]
    pub fn prefix_len(self) -> u8 {
        self.0
    }

    /// The dotted-quad form of the mask.
    #[must_use]
    pub fn as_addr(self) -> Ipv4Addr {
        if self.0 == 0 {
            return Ipv4Addr::UNSPECIFIED;
        }
        Ipv4Addr::from(u32::MAX << (32 - u32::from(self.0)))
    }
}

impl TryFrom<Ipv4Addr> for Netmask {
    type Error = InvalidNetmask;

    fn try_from(addr: Ipv4Addr) -> Result<Self, Self::Error> {
        let bits = u32::from(addr);
        let ones = bits.leading_ones();
        if ones + bits.trailing_zeros() != 32 {
            return Err(InvalidNetmask::NotContiguous);
        }
        Ok(Self(ones as u8))
    }
}

impl FromStr for Netmask {
    type Err = InvalidNetmask;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let addr = parse_ipv4(s).map_err(|_| InvalidNetmask::Malformed(s.to_owned()))?;
        Netmask::try_from(addr)
    }
}

impl Display for Netmask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.as_addr().fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_masks() {
        let m: Netmask = "255.255.255.0".parse().expect("canonical mask");
        assert_eq!(m.prefix_len(), 24);
        assert_eq!(m.as_addr(), Ipv4Addr::new(255, 255, 255, 0));

        let m: Netmask = "0.0.0.0".parse().expect("zero mask");
        assert_eq!(m.prefix_len(), 0);

        let m: Netmask = "255.255.255.255".parse().expect("host mask");
        assert_eq!(m.prefix_len(), 32);
    }

    #[test]
    fn rejects_non_contiguous() {
        assert_eq!(
            "255.255.255.3".parse::<Netmask>(),
            Err(InvalidNetmask::NotContiguous)
        );
        assert_eq!(
            "255.0.255.0".parse::<Netmask>(),
            Err(InvalidNetmask::NotContiguous)
        );
        assert!("255.255.256.0".parse::<Netmask>().is_err());
    }

    #[test]
    fn round_trips_every_prefix_length() {
        for len in 0..=32u8 {
            let mask = Netmask::new(len).expect("in range");
            assert_eq!(Netmask::try_from(mask.as_addr()), Ok(mask));
        }
        assert!(Netmask::new(33).is_err());
    }
}
