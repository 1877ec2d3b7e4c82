//! Network arithmetic for CIDR blocks.
//!
//! Addresses of both families are widened to `u128` and masked to the
//! family's bit width, so one set of helpers serves IPv4 and IPv6.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use thiserror::Error;

/// Errors raised while interpreting a CIDR block.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CidrError {
    /// The address part is not an IPv4 or IPv6 address.
    #[error("invalid IP address: {0}")]
    InvalidAddress(String),
    /// The prefix part is not a number.
    #[error("invalid prefix length: {0}")]
    InvalidPrefix(String),
    /// The prefix is wider than the address family allows.
    #[error("prefix length {prefix} out of range for {family} (max {max})")]
    PrefixOutOfRange {
        /// Supplied prefix length.
        prefix: u32,
        /// Address family name.
        family: &'static str,
        /// Largest valid prefix for the family.
        max: u32,
    },
    /// The combined notation has no `/`.
    #[error("expected <address>/<prefix>, got: {0}")]
    MissingPrefix(String),
    /// The resolved arguments hold neither alternative.
    #[error("no CIDR block supplied")]
    NoBlock,
}

/// An address together with a prefix length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CidrBlock {
    address: IpAddr,
    prefix: u8,
}

impl CidrBlock {
    /// Builds a block from a separate address and prefix length.
    pub fn from_parts(address: &str, prefix: &str) -> Result<Self, CidrError> {
        let address: IpAddr = address
            .trim()
            .parse()
            .map_err(|_| CidrError::InvalidAddress(address.trim().to_string()))?;
        let prefix: u32 = prefix
            .trim()
            .parse()
            .map_err(|_| CidrError::InvalidPrefix(prefix.trim().to_string()))?;

        let max = width(&address);
        if prefix > max {
            return Err(CidrError::PrefixOutOfRange {
                prefix,
                family: family(&address),
                max,
            });
        }

        Ok(Self {
            address,
            prefix: prefix as u8,
        })
    }

    /// Parses the combined `<address>/<prefix>` notation.
    pub fn parse(notation: &str) -> Result<Self, CidrError> {
        let (address, prefix) = notation
            .trim()
            .split_once('/')
            .ok_or_else(|| CidrError::MissingPrefix(notation.trim().to_string()))?;
        Self::from_parts(address, prefix)
    }

    /// Computes the network details of this block.
    pub fn summarize(&self) -> NetworkSummary {
        let bits = width(&self.address);
        let full = full_mask(bits);
        let mask = prefix_mask(bits, self.prefix);
        let raw = to_bits(&self.address);

        let network = raw & mask;
        let last = network | (!mask & full);
        let host_bits = bits - u32::from(self.prefix);

        let is_v4 = self.address.is_ipv4();
        let (first_host, last_host, usable) = if is_v4 && host_bits >= 2 {
            (network + 1, last - 1, Count::Exact((1u128 << host_bits) - 2))
        } else {
            (network, last, Count::from_host_bits(host_bits))
        };

        let rebuild = |value: u128| from_bits(is_v4, value);
        NetworkSummary {
            address: self.address,
            prefix: self.prefix,
            network: rebuild(network),
            netmask: rebuild(mask),
            wildcard: rebuild(!mask & full),
            broadcast: (is_v4 && host_bits >= 2).then(|| rebuild(last)),
            last_address: rebuild(last),
            first_host: rebuild(first_host),
            last_host: rebuild(last_host),
            total_addresses: Count::from_host_bits(host_bits),
            usable_hosts: usable,
        }
    }
}

impl fmt::Display for CidrBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.address, self.prefix)
    }
}

/// A number of addresses, which for IPv6 `/0` does not fit in `u128`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Count {
    /// Exact count.
    Exact(u128),
    /// `2^n` too large to represent.
    PowerOfTwo(u32),
}

impl Count {
    fn from_host_bits(host_bits: u32) -> Self {
        match 1u128.checked_shl(host_bits) {
            Some(n) if host_bits < 128 => Self::Exact(n),
            _ => Self::PowerOfTwo(host_bits),
        }
    }
}

impl fmt::Display for Count {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(n) => write!(f, "{n}"),
            Self::PowerOfTwo(bits) => write!(f, "2^{bits}"),
        }
    }
}

/// Network details of a [`CidrBlock`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkSummary {
    pub address: IpAddr,
    pub prefix: u8,
    pub network: IpAddr,
    pub netmask: IpAddr,
    pub wildcard: IpAddr,
    /// IPv4 broadcast address; absent for IPv6 and for /31, /32.
    pub broadcast: Option<IpAddr>,
    pub last_address: IpAddr,
    pub first_host: IpAddr,
    pub last_host: IpAddr,
    pub total_addresses: Count,
    pub usable_hosts: Count,
}

impl fmt::Display for NetworkSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rows: Vec<(&str, String)> = vec![
            ("Address", self.address.to_string()),
            ("Prefix", format!("/{}", self.prefix)),
            ("Network", format!("{}/{}", self.network, self.prefix)),
            ("Netmask", self.netmask.to_string()),
            ("Wildcard", self.wildcard.to_string()),
        ];
        match self.broadcast {
            Some(broadcast) => rows.push(("Broadcast", broadcast.to_string())),
            None => rows.push(("Last address", self.last_address.to_string())),
        }
        rows.push(("First host", self.first_host.to_string()));
        rows.push(("Last host", self.last_host.to_string()));
        rows.push(("Addresses", self.total_addresses.to_string()));
        rows.push(("Usable hosts", self.usable_hosts.to_string()));

        for (label, value) in rows {
            writeln!(f, "{:<14}{value}", format!("{label}:"))?;
        }
        Ok(())
    }
}

fn width(address: &IpAddr) -> u32 {
    match address {
        IpAddr::V4(_) => 32,
        IpAddr::V6(_) => 128,
    }
}

fn family(address: &IpAddr) -> &'static str {
    match address {
        IpAddr::V4(_) => "IPv4",
        IpAddr::V6(_) => "IPv6",
    }
}

fn full_mask(bits: u32) -> u128 {
    if bits >= 128 {
        u128::MAX
    } else {
        (1u128 << bits) - 1
    }
}

fn prefix_mask(bits: u32, prefix: u8) -> u128 {
    if prefix == 0 {
        return 0;
    }
    let full = full_mask(bits);
    (full << (bits - u32::from(prefix))) & full
}

fn to_bits(address: &IpAddr) -> u128 {
    match address {
        IpAddr::V4(v4) => u128::from(u32::from(*v4)),
        IpAddr::V6(v6) => u128::from(*v6),
    }
}

fn from_bits(is_v4: bool, value: u128) -> IpAddr {
    if is_v4 {
        IpAddr::V4(Ipv4Addr::from(value as u32))
    } else {
        IpAddr::V6(Ipv6Addr::from(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ip(s: &str) -> IpAddr {
        s.parse().unwrap()
    }

    #[test]
    fn test_ipv4_slash_24() {
        let summary = CidrBlock::parse("10.0.0.77/24").unwrap().summarize();
        assert_eq!(summary.network, ip("10.0.0.0"));
        assert_eq!(summary.netmask, ip("255.255.255.0"));
        assert_eq!(summary.wildcard, ip("0.0.0.255"));
        assert_eq!(summary.broadcast, Some(ip("10.0.0.255")));
        assert_eq!(summary.first_host, ip("10.0.0.1"));
        assert_eq!(summary.last_host, ip("10.0.0.254"));
        assert_eq!(summary.total_addresses, Count::Exact(256));
        assert_eq!(summary.usable_hosts, Count::Exact(254));
    }

    #[test]
    fn test_ipv4_point_to_point_and_host_routes() {
        let p2p = CidrBlock::from_parts("192.168.1.6", "31").unwrap().summarize();
        assert_eq!(p2p.broadcast, None);
        assert_eq!(p2p.first_host, ip("192.168.1.6"));
        assert_eq!(p2p.last_host, ip("192.168.1.7"));
        assert_eq!(p2p.usable_hosts, Count::Exact(2));

        let host = CidrBlock::parse("192.168.1.6/32").unwrap().summarize();
        assert_eq!(host.network, ip("192.168.1.6"));
        assert_eq!(host.usable_hosts, Count::Exact(1));
    }

    #[test]
    fn test_ipv4_slash_zero() {
        let summary = CidrBlock::parse("8.8.8.8/0").unwrap().summarize();
        assert_eq!(summary.network, ip("0.0.0.0"));
        assert_eq!(summary.broadcast, Some(ip("255.255.255.255")));
        assert_eq!(summary.total_addresses, Count::Exact(1 << 32));
    }

    #[test]
    fn test_ipv6_block() {
        let summary = CidrBlock::parse("2001:db8::1/64").unwrap().summarize();
        assert_eq!(summary.network, ip("2001:db8::"));
        assert_eq!(summary.last_address, ip("2001:db8::ffff:ffff:ffff:ffff"));
        assert_eq!(summary.netmask, ip("ffff:ffff:ffff:ffff::"));
        assert_eq!(summary.broadcast, None);
        assert_eq!(summary.total_addresses, Count::Exact(1 << 64));
    }

    #[test]
    fn test_ipv6_slash_zero_does_not_overflow() {
        let summary = CidrBlock::parse("::/0").unwrap().summarize();
        assert_eq!(summary.total_addresses, Count::PowerOfTwo(128));
        assert_eq!(summary.total_addresses.to_string(), "2^128");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            CidrBlock::parse("10.0.0.0").unwrap_err(),
            CidrError::MissingPrefix("10.0.0.0".to_string())
        );
        assert_eq!(
            CidrBlock::parse("10.0.0.300/8").unwrap_err(),
            CidrError::InvalidAddress("10.0.0.300".to_string())
        );
        assert_eq!(
            CidrBlock::from_parts("10.0.0.0", "33").unwrap_err(),
            CidrError::PrefixOutOfRange {
                prefix: 33,
                family: "IPv4",
                max: 32
            }
        );
    }

    #[test]
    fn test_display_lists_fields() {
        let text = CidrBlock::parse("10.0.0.0/30").unwrap().summarize().to_string();
        assert!(text.contains("Network:      10.0.0.0/30"));
        assert!(text.contains("Broadcast:    10.0.0.3"));
        assert!(text.contains("Usable hosts: 2"));
    }
}
