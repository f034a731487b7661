//! Allocated subnet and subnet plan data models.

use super::Network;
use serde::Serialize;
use std::net::Ipv4Addr;

/// One child subnet produced by a division of a parent network.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct AllocatedSubnet {
    /// Subnet in CIDR notation.
    #[serde(rename = "network_cidr")]
    pub network: Network,
    /// Dotted-decimal subnet mask.
    pub mask: Ipv4Addr,
    /// Broadcast (highest) address of the block.
    pub broadcast: Ipv4Addr,
    /// First and last usable host address.
    pub usable_range: (Ipv4Addr, Ipv4Addr),
    /// Number of usable host addresses.
    pub usable_count: u64,
    /// Host count asked for (VLSM only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_hosts: Option<u64>,
}

impl AllocatedSubnet {
    pub fn new(network: Network, requested_hosts: Option<u64>) -> AllocatedSubnet {
        AllocatedSubnet {
            network,
            mask: network.netmask(),
            broadcast: network.hi(),
            usable_range: network.usable_range(),
            usable_count: network.usable_hosts(),
            requested_hosts,
        }
    }

    pub fn first_usable(&self) -> Ipv4Addr {
        self.usable_range.0
    }

    pub fn last_usable(&self) -> Ipv4Addr {
        self.usable_range.1
    }
}

/// Full result of dividing a parent network.
#[derive(Serialize, Debug, Clone)]
pub struct SubnetPlan {
    /// Human readable strategy name.
    pub method: String,
    /// The parent network that was divided.
    pub parent: Network,
    /// Child subnets, in output order.
    pub subnets: Vec<AllocatedSubnet>,
    /// Bits taken from the host part (equal-size strategies).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bits_borrowed: Option<u8>,
    /// Usable hosts in each subnet (equal-size strategies).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hosts_per_subnet: Option<u64>,
    /// How many subnets of the new prefix fit in the parent (equal-size strategies).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_subnets: Option<u64>,
    /// Sum of requested hosts (VLSM).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_hosts_requested: Option<u64>,
    /// Sum of usable hosts over the allocated blocks (VLSM).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_hosts_allocated: Option<u64>,
    /// Unallocated space left in the parent.
    pub free_blocks: Vec<Network>,
}
