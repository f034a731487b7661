//! IPv4 network math and CIDR notation.
//!
//! Provides the [`Network`] type (base address plus prefix length) along with
//! the pure bit-level functions used to describe and divide networks.

use crate::error::SubnetError;
use crate::parser;
use serde::{Serialize, Serializer};
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Maximum length for an IPv4 subnet mask (32 bits).
pub const MAX_LENGTH: u8 = 32;

fn check_prefix(len: u8) -> Result<u8, SubnetError> {
    if len > MAX_LENGTH {
        Err(SubnetError::mask(
            format!("/{len}"),
            "Network length is too long",
        ))
    } else {
        Ok(len)
    }
}

/// Mask bits for a prefix already known to be in range.
fn mask_bits(len: u8) -> u32 {
    let right_len = MAX_LENGTH.saturating_sub(len);
    let all_bits = u32::MAX as u64;
    ((all_bits >> right_len) << right_len) as u32
}

fn usable(len: u8) -> u64 {
    match len {
        32 => 1,
        31 => 2,
        _ => (1u64 << (MAX_LENGTH - len)) - 2,
    }
}

/// Convert a CIDR prefix length to a subnet mask as u32.
///
/// # Examples
/// ```
/// use ipmentor::models::prefix_to_mask;
/// assert_eq!(prefix_to_mask(24).unwrap(), 0xFFFFFF00);
/// ```
pub fn prefix_to_mask(len: u8) -> Result<u32, SubnetError> {
    Ok(mask_bits(check_prefix(len)?))
}

/// Convert a subnet mask to its prefix length.
///
/// Fails unless the mask is a run of 1-bits followed by a run of 0-bits.
pub fn mask_to_prefix(mask: u32) -> Result<u8, SubnetError> {
    let len = mask.leading_ones() as u8;
    if mask_bits(len) != mask {
        return Err(SubnetError::mask(
            Ipv4Addr::from(mask),
            "mask bits are not contiguous",
        ));
    }
    Ok(len)
}

/// Get the network address for a given IP and prefix length.
pub fn network_address(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr, SubnetError> {
    let mask = prefix_to_mask(len)?;
    Ok(Ipv4Addr::from(u32::from(addr) & mask))
}

/// Calculate the broadcast address for a given IP and prefix length.
pub fn broadcast_address(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr, SubnetError> {
    let mask = prefix_to_mask(len)?;
    let network_bits = u32::from(addr) & mask;
    Ok(Ipv4Addr::from(network_bits | !mask))
}

/// The inverse of the subnet mask, as used in ACLs.
pub fn wildcard_mask(len: u8) -> Result<Ipv4Addr, SubnetError> {
    Ok(Ipv4Addr::from(!prefix_to_mask(len)?))
}

/// Number of addresses in a block of the given prefix length.
pub fn total_hosts(len: u8) -> Result<u64, SubnetError> {
    let len = check_prefix(len)?;
    Ok(1u64 << (MAX_LENGTH - len))
}

/// Number of usable host addresses for a prefix length.
///
/// Network and broadcast are reserved up to /30. A /31 is a point-to-point
/// link with both addresses usable (RFC 3021) and a /32 is a single host route.
pub fn usable_hosts(len: u8) -> Result<u64, SubnetError> {
    Ok(usable(check_prefix(len)?))
}

/// First and last usable host address of the block containing `addr`.
pub fn usable_host_range(addr: Ipv4Addr, len: u8) -> Result<(Ipv4Addr, Ipv4Addr), SubnetError> {
    let lo = u32::from(network_address(addr, len)?);
    let hi = u32::from(broadcast_address(addr, len)?);
    let (first, last) = match len {
        31 | 32 => (lo, hi),
        _ => (lo + 1, hi - 1),
    };
    Ok((Ipv4Addr::from(first), Ipv4Addr::from(last)))
}

/// Longest prefix whose usable host count still covers `hosts`.
///
/// Returns `None` when not even a /0 is big enough.
pub fn required_prefix(hosts: u64) -> Option<u8> {
    (0..=MAX_LENGTH).rev().find(|&len| usable(len) >= hosts)
}

/// Calculate the minimum mask for an IP address based on trailing zeros.
///
/// This is the shortest prefix for which `ip` is a valid network address.
pub fn lo_mask(ip: Ipv4Addr) -> u8 {
    let trailing_zeros = u32::from(ip).trailing_zeros() as u8;
    MAX_LENGTH - trailing_zeros.min(MAX_LENGTH)
}

/// Render an address as four dotted groups of 8 bits.
pub fn to_dotted_binary(addr: Ipv4Addr) -> String {
    let [a, b, c, d] = addr.octets();
    format!("{a:08b}.{b:08b}.{c:08b}.{d:08b}")
}

/// An IPv4 network: a base address with all host bits cleared plus its prefix length.
#[derive(Eq, Ord, PartialEq, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct Network {
    addr: Ipv4Addr,
    prefix: u8,
}

impl Network {
    /// Create a network from any address inside it; host bits are masked off.
    pub fn new(addr: Ipv4Addr, prefix: u8) -> Result<Network, SubnetError> {
        let base = network_address(addr, prefix)?;
        if base != addr {
            log::debug!("Masked host bits off {addr}/{prefix} -> {base}/{prefix}");
        }
        Ok(Network { addr: base, prefix })
    }

    /// Build from a block start that is already aligned; callers guarantee `prefix <= 32`.
    pub(crate) fn from_bits(base: u32, prefix: u8) -> Network {
        debug_assert!(prefix <= MAX_LENGTH);
        Network {
            addr: Ipv4Addr::from(base & mask_bits(prefix)),
            prefix,
        }
    }

    /// The network (base) address.
    pub fn addr(&self) -> Ipv4Addr {
        self.addr
    }

    /// The prefix length (0-32).
    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    /// Dotted-decimal subnet mask.
    pub fn netmask(&self) -> Ipv4Addr {
        Ipv4Addr::from(mask_bits(self.prefix))
    }

    /// Get the lowest (network) address in the subnet.
    pub fn lo(&self) -> Ipv4Addr {
        self.addr
    }

    /// Get the highest (broadcast) address in the subnet.
    pub fn hi(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.addr) | !mask_bits(self.prefix))
    }

    /// Number of addresses in the block.
    pub fn size(&self) -> u64 {
        1u64 << (MAX_LENGTH - self.prefix)
    }

    pub fn usable_hosts(&self) -> u64 {
        usable(self.prefix)
    }

    pub fn usable_range(&self) -> (Ipv4Addr, Ipv4Addr) {
        let lo = u32::from(self.lo());
        let hi = u32::from(self.hi());
        match self.prefix {
            31 | 32 => (self.lo(), self.hi()),
            _ => (Ipv4Addr::from(lo + 1), Ipv4Addr::from(hi - 1)),
        }
    }

    /// First address of the block as a u64 cursor position.
    pub(crate) fn start(&self) -> u64 {
        u32::from(self.addr) as u64
    }

    /// One past the last address of the block.
    pub(crate) fn end(&self) -> u64 {
        self.start() + self.size()
    }

    pub fn contains(&self, ip: Ipv4Addr) -> bool {
        self.lo() <= ip && ip <= self.hi()
    }

    /// True when `other` lies entirely inside this network.
    pub fn contains_network(&self, other: &Network) -> bool {
        self.start() <= other.start() && other.end() <= self.end()
    }

    pub fn overlaps(&self, other: &Network) -> bool {
        self.start() < other.end() && other.start() < self.end()
    }
}

impl FromStr for Network {
    type Err = SubnetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parser::parse_network(s)
    }
}

impl Serialize for Network {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.prefix)
    }
}
