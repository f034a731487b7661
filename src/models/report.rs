//! Address analysis report.

use serde::Serialize;
use std::fmt;
use std::net::Ipv4Addr;

/// Historical classful addressing category, kept for teaching purposes.
#[derive(Serialize, Debug, Copy, Clone, PartialEq, Eq)]
pub enum AddressClass {
    A,
    B,
    C,
    /// Multicast.
    D,
    /// Reserved.
    E,
}

impl AddressClass {
    /// Classify by the leading bits of the first octet.
    pub fn of(addr: Ipv4Addr) -> AddressClass {
        match addr.octets()[0] {
            0..=127 => AddressClass::A,
            128..=191 => AddressClass::B,
            192..=223 => AddressClass::C,
            224..=239 => AddressClass::D,
            _ => AddressClass::E,
        }
    }
}

impl fmt::Display for AddressClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            AddressClass::A => "A",
            AddressClass::B => "B",
            AddressClass::C => "C",
            AddressClass::D => "D",
            AddressClass::E => "E",
        };
        write!(f, "{c}")
    }
}

/// Everything worth knowing about one address/mask pair.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct IpReport {
    pub ip_decimal: Ipv4Addr,
    pub ip_binary: String,
    pub address_class: AddressClass,
    pub is_private: bool,
    pub subnet_mask_decimal: Ipv4Addr,
    pub subnet_mask_binary: String,
    pub subnet_mask_cidr: String,
    pub prefix_length: u8,
    pub wildcard_mask: Ipv4Addr,
    pub network_address: Ipv4Addr,
    pub broadcast_address: Ipv4Addr,
    pub first_host: Ipv4Addr,
    pub last_host: Ipv4Addr,
    /// Usable host count.
    pub usable_hosts: u64,
    /// All addresses in the block, reserved ones included.
    pub total_addresses: u64,
    pub is_network_address: bool,
    pub is_broadcast_address: bool,
}
