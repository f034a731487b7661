//! Domain models for IPv4 subnetting.
//!
//! This module contains the core data structures used throughout the engine:
//! - [`Network`] - IPv4 network in CIDR notation, plus the network math functions
//! - [`AllocatedSubnet`] and [`SubnetPlan`] - results of dividing a network
//! - [`IpReport`] - analysis of a single address/mask pair

mod ipv4;
mod report;
mod subnet;

// Re-export public types
pub use ipv4::{
    broadcast_address, lo_mask, mask_to_prefix, network_address, prefix_to_mask,
    required_prefix, to_dotted_binary, total_hosts, usable_host_range, usable_hosts,
    wildcard_mask, Network, MAX_LENGTH,
};
pub use report::{AddressClass, IpReport};
pub use subnet::{AllocatedSubnet, SubnetPlan};
