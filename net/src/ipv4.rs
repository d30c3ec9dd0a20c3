// SPDX-License-Identifier: Apache-2.0
// Copyright IosLab Authors

//! Strict IPv4 parsing and per-octet network derivation.

use std::net::Ipv4Addr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidIpv4 {
    #[error("Invalid IPv4 address '{0}'")]
    Malformed(String),
}

/// Parse a dotted-quad address, rejecting anything the std parser would not
/// take verbatim: out-of-range octets, leading zeros, stray characters.
pub fn parse_ipv4(token: &str) -> Result<Ipv4Addr, InvalidIpv4> {
    token
        .parse::<Ipv4Addr>()
        .map_err(|_| InvalidIpv4::Malformed(token.to_owned()))
}

/// Network address of `ip` under `mask`, ANDed octet by octet.
#[must_use]
pub fn network_of(ip: Ipv4Addr, mask: Ipv4Addr) -> Ipv4Addr {
    let i = ip.octets();
    let m = mask.octets();
    Ipv4Addr::new(i[0] & m[0], i[1] & m[1], i[2] & m[2], i[3] & m[3])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_parse() {
        assert_eq!(
            parse_ipv4("192.168.1.1").expect("valid address"),
            Ipv4Addr::new(192, 168, 1, 1)
        );
        assert!(parse_ipv4("300.1.1.1").is_err());
        assert!(parse_ipv4("10.0.0").is_err());
        assert!(parse_ipv4("10.0.0.1x").is_err());
        assert!(parse_ipv4("").is_err());
    }

    #[test]
    fn network_derivation() {
        let ip = Ipv4Addr::new(192, 168, 1, 77);
        let mask = Ipv4Addr::new(255, 255, 255, 0);
        assert_eq!(network_of(ip, mask), Ipv4Addr::new(192, 168, 1, 0));

        let mask = Ipv4Addr::new(255, 255, 0, 0);
        assert_eq!(network_of(ip, mask), Ipv4Addr::new(192, 168, 0, 0));
    }
}
