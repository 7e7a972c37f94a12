//! # CIDR Enumeration
//!
//! Expands a CIDR block such as `10.0.0.0/24` into every address it covers,
//! in ascending numeric order. Network and broadcast addresses are included.

use std::net::IpAddr;

use pnet::ipnetwork::IpNetwork;

use crate::error::ScanError;

/// Largest block that will be enumerated (a /8 for IPv4, a /104 for IPv6).
pub const MAX_CIDR_HOSTS: u128 = 1 << 24;

/// Parses CIDR notation like "192.168.1.0/24" or "fd00::/120".
pub fn parse_cidr(spec: &str) -> Result<IpNetwork, ScanError> {
    let Some((ip_str, prefix_str)) = spec.split_once('/') else {
        return Err(invalid(spec, "missing '/<prefix>'"));
    };

    let ip: IpAddr = ip_str
        .trim()
        .parse()
        .map_err(|e| invalid(spec, format!("invalid address '{ip_str}': {e}")))?;

    let prefix: u8 = prefix_str
        .trim()
        .parse()
        .map_err(|e| invalid(spec, format!("invalid prefix '{prefix_str}': {e}")))?;

    IpNetwork::new(ip, prefix).map_err(|e| invalid(spec, e.to_string()))
}

/// Number of addresses in `network`.
pub fn block_size(network: &IpNetwork) -> u128 {
    let max_prefix: u32 = match network {
        IpNetwork::V4(_) => 32,
        IpNetwork::V6(_) => 128,
    };
    let host_bits: u32 = max_prefix - u32::from(network.prefix());

    // 2^128 does not fit a u128
    1u128.checked_shl(host_bits).unwrap_or(u128::MAX)
}

/// Returns every address of the CIDR block `spec`.
pub fn explode_cidr(spec: &str) -> Result<Vec<IpAddr>, ScanError> {
    let network: IpNetwork = parse_cidr(spec)?;

    let size: u128 = block_size(&network);
    if size > MAX_CIDR_HOSTS {
        return Err(ScanError::CidrTooLarge {
            spec: spec.to_string(),
            size,
            max: MAX_CIDR_HOSTS,
        });
    }

    let hosts: Vec<IpAddr> = match network {
        IpNetwork::V4(net) => net.iter().map(IpAddr::V4).collect(),
        IpNetwork::V6(net) => net.iter().map(IpAddr::V6).collect(),
    };
    Ok(hosts)
}

fn invalid(spec: &str, reason: impl Into<String>) -> ScanError {
    ScanError::InvalidCidr {
        spec: spec.to_string(),
        reason: reason.into(),
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, Ipv6Addr};

    #[test]
    fn slash_30_includes_network_and_broadcast() {
        let hosts = explode_cidr("10.0.0.0/30").unwrap();
        let expected: Vec<IpAddr> = (0..4)
            .map(|last| IpAddr::V4(Ipv4Addr::new(10, 0, 0, last)))
            .collect();
        assert_eq!(hosts, expected);
    }

    #[test]
    fn unaligned_address_enumerates_whole_block() {
        let hosts = explode_cidr("192.168.1.77/29").unwrap();
        assert_eq!(hosts.len(), 8);
        assert_eq!(hosts[0], IpAddr::V4(Ipv4Addr::new(192, 168, 1, 72)));
        assert_eq!(hosts[7], IpAddr::V4(Ipv4Addr::new(192, 168, 1, 79)));
    }

    #[test]
    fn slash_32_is_a_single_host() {
        let hosts = explode_cidr("127.0.0.1/32").unwrap();
        assert_eq!(hosts, vec![IpAddr::V4(Ipv4Addr::LOCALHOST)]);
    }

    #[test]
    fn ipv6_block_is_enumerated_in_order() {
        let hosts = explode_cidr("fd00::/126").unwrap();
        assert_eq!(hosts.len(), 4);
        assert_eq!(hosts[3], IpAddr::V6("fd00::3".parse::<Ipv6Addr>().unwrap()));
        assert!(hosts.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn invalid_blocks_are_rejected() {
        assert!(matches!(explode_cidr("10.0.0.1/33"), Err(ScanError::InvalidCidr { .. })));
        assert!(matches!(explode_cidr("10.0.0.0/"), Err(ScanError::InvalidCidr { .. })));
        assert!(matches!(explode_cidr("example.com/24"), Err(ScanError::InvalidCidr { .. })));
        assert!(matches!(explode_cidr("10.0.0.256/24"), Err(ScanError::InvalidCidr { .. })));
    }

    #[test]
    fn oversized_blocks_are_rejected() {
        assert!(matches!(explode_cidr("fd00::/64"), Err(ScanError::CidrTooLarge { .. })));
        assert!(matches!(explode_cidr("0.0.0.0/0"), Err(ScanError::CidrTooLarge { .. })));
    }

    #[test]
    fn block_size_handles_full_ipv6_space() {
        let net = parse_cidr("::/0").unwrap();
        assert_eq!(block_size(&net), u128::MAX);
    }
}
