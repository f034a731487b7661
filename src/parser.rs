//! Parsing of address, mask, network and host-list text.
//!
//! Addresses are accepted in dotted-decimal ("192.168.1.1") or binary form
//! ("11000000.10101000.00000001.00000001", dots optional). Masks are accepted
//! as "/24", "24" or a dotted mask ("255.255.255.0").

use crate::error::SubnetError;
use crate::models::{mask_to_prefix, Network, MAX_LENGTH};
use lazy_static::lazy_static;
use regex::Regex;
use std::net::Ipv4Addr;

lazy_static! {
    static ref BINARY_RE: Regex =
        Regex::new(r"^[01]{8}(?:[.\s]?[01]{8}){3}$").expect("Invalid Regex?");
    static ref BINARY_LIKE_RE: Regex = Regex::new(r"^[01][01.\s]*$").expect("Invalid Regex?");
}

/// Parse an IPv4 address in dotted-decimal or binary form.
pub fn parse_address(text: &str) -> Result<Ipv4Addr, SubnetError> {
    let input = text.trim();
    if input.is_empty() {
        return Err(SubnetError::address(text, "address is empty"));
    }
    if looks_binary(input) {
        parse_binary(input)
    } else {
        parse_dotted_decimal(input)
    }
}

/// Parse a mask given as "/24", "24" or a dotted mask, returning the prefix length.
pub fn parse_mask(text: &str) -> Result<u8, SubnetError> {
    let input = text.trim();
    let bare = input.strip_prefix('/').unwrap_or(input).trim();
    if bare.is_empty() {
        return Err(SubnetError::mask(text, "mask is empty"));
    }

    if bare.contains('.') || looks_binary(bare) {
        let mask = parse_address(bare).map_err(|e| SubnetError::mask(input, e.reason()))?;
        return mask_to_prefix(u32::from(mask))
            .map_err(|_| SubnetError::mask(input, "mask bits are not contiguous"));
    }

    if !bare.chars().all(|c| c.is_ascii_digit()) {
        return Err(SubnetError::mask(input, "expected a prefix length 0-32 or a dotted mask"));
    }
    let len: u8 = bare
        .parse()
        .map_err(|_| SubnetError::mask(input, "expected a prefix length 0-32 or a dotted mask"))?;
    if len > MAX_LENGTH {
        return Err(SubnetError::mask(input, "prefix length must be between 0 and 32"));
    }
    Ok(len)
}

/// Split "address/mask" text into its address and prefix length.
pub fn parse_address_with_mask(text: &str) -> Result<(Ipv4Addr, u8), SubnetError> {
    let input = text.trim();
    let (addr_text, mask_text) = input
        .split_once('/')
        .ok_or_else(|| SubnetError::address(input, "expected address/prefix, e.g. 192.168.1.0/24"))?;
    if mask_text.contains('/') {
        return Err(SubnetError::address(input, "more than one '/' separator"));
    }
    Ok((parse_address(addr_text)?, parse_mask(mask_text)?))
}

/// Parse "address/mask" into a [`Network`]; host bits in the address are cleared.
pub fn parse_network(text: &str) -> Result<Network, SubnetError> {
    let (addr, prefix) = parse_address_with_mask(text)?;
    Network::new(addr, prefix)
}

/// Parse a positive whole number such as a subnet or host count.
pub fn parse_count(text: &str) -> Result<u64, SubnetError> {
    let item = text.trim();
    if item.starts_with('+') {
        return Err(SubnetError::requirement(item, "expected a whole number"));
    }
    let value: i128 = item
        .parse()
        .map_err(|_| SubnetError::requirement(item, "expected a whole number"))?;
    if value <= 0 {
        return Err(SubnetError::requirement(item, "must be at least 1"));
    }
    u64::try_from(value).map_err(|_| SubnetError::requirement(item, "number is too large"))
}

/// Parse a comma-separated host list, e.g. "100,50,25,10".
///
/// Empty text gives an empty list.
pub fn parse_requirements(text: &str) -> Result<Vec<u64>, SubnetError> {
    let input = text.trim();
    if input.is_empty() {
        return Ok(vec![]);
    }
    input.split(',').map(parse_count).collect()
}

/// Only 0/1 digits and separators, with at least one group too long to be a decimal octet.
fn looks_binary(input: &str) -> bool {
    BINARY_LIKE_RE.is_match(input)
        && input
            .split(|c: char| c == '.' || c.is_whitespace())
            .any(|group| group.len() > 3)
}

fn parse_binary(input: &str) -> Result<Ipv4Addr, SubnetError> {
    if !BINARY_RE.is_match(input) {
        return Err(SubnetError::address(
            input,
            "malformed binary address, expected four groups of 8 bits",
        ));
    }
    let bits: String = input.chars().filter(|c| *c == '0' || *c == '1').collect();
    let value = u32::from_str_radix(&bits, 2)
        .map_err(|e| SubnetError::address(input, format!("malformed binary address: {e}")))?;
    Ok(Ipv4Addr::from(value))
}

fn parse_dotted_decimal(input: &str) -> Result<Ipv4Addr, SubnetError> {
    let parts: Vec<&str> = input.split('.').collect();
    if parts.len() != 4 {
        return Err(SubnetError::address(
            input,
            format!("expected 4 octets, found {}", parts.len()),
        ));
    }

    let mut octets = [0u8; 4];
    for (octet, part) in octets.iter_mut().zip(parts) {
        *octet = parse_octet(input, part)?;
    }
    Ok(Ipv4Addr::from(octets))
}

fn parse_octet(input: &str, part: &str) -> Result<u8, SubnetError> {
    if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
        return Err(SubnetError::address(
            input,
            format!("octet '{part}' is not a number"),
        ));
    }
    if part.len() > 1 && part.starts_with('0') {
        return Err(SubnetError::address(
            input,
            format!("octet '{part}' has a leading zero"),
        ));
    }
    if part.len() > 3 {
        return Err(SubnetError::address(
            input,
            format!("octet '{part}' is out of range 0-255"),
        ));
    }
    let value: u16 = part
        .parse()
        .map_err(|_| SubnetError::address(input, format!("octet '{part}' is not a number")))?;
    u8::try_from(value)
        .map_err(|_| SubnetError::address(input, format!("octet '{part}' is out of range 0-255")))
}
