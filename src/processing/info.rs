//! Single address analysis.
//!
//! Combines the parser and the network math into one [`IpReport`].

use crate::error::SubnetError;
use crate::models::{to_dotted_binary, wildcard_mask, AddressClass, IpReport, Network};
use crate::parser::{parse_address, parse_address_with_mask, parse_mask};
use std::net::Ipv4Addr;

/// Analyze an address together with its mask.
///
/// # Arguments
/// * `address_text` - Dotted-decimal or binary address. May carry "/mask" when `mask_text` is empty.
/// * `mask_text` - Mask as "/24", "24" or "255.255.255.0".
pub fn analyze(address_text: &str, mask_text: &str) -> Result<IpReport, SubnetError> {
    let (ip, prefix) = if mask_text.trim().is_empty() && address_text.contains('/') {
        parse_address_with_mask(address_text)?
    } else {
        (parse_address(address_text)?, parse_mask(mask_text)?)
    };
    log::debug!("analyze({ip}/{prefix})");
    describe(ip, prefix)
}

/// Build the report for an already parsed address and prefix.
pub fn describe(ip: Ipv4Addr, prefix: u8) -> Result<IpReport, SubnetError> {
    let network = Network::new(ip, prefix)?;
    let netmask = network.netmask();
    let (first_host, last_host) = network.usable_range();

    // /31 and /32 have no reserved addresses
    let has_reserved = prefix <= 30;

    Ok(IpReport {
        ip_decimal: ip,
        ip_binary: to_dotted_binary(ip),
        address_class: AddressClass::of(ip),
        is_private: ip.is_private(),
        subnet_mask_decimal: netmask,
        subnet_mask_binary: to_dotted_binary(netmask),
        subnet_mask_cidr: format!("/{prefix}"),
        prefix_length: prefix,
        wildcard_mask: wildcard_mask(prefix)?,
        network_address: network.lo(),
        broadcast_address: network.hi(),
        first_host,
        last_host,
        usable_hosts: network.usable_hosts(),
        total_addresses: network.size(),
        is_network_address: has_reserved && ip == network.lo(),
        is_broadcast_address: has_reserved && ip == network.hi(),
    })
}
