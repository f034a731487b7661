//! Gap finding inside a divided network.
//!
//! Identifies unused address ranges between allocated subnets and expresses
//! them as the largest CIDR blocks that fit.

use crate::models::{lo_mask, AllocatedSubnet, Network, MAX_LENGTH};
use std::net::Ipv4Addr;

/// List the free space of `parent` not covered by `allocated`, in address order.
///
/// Subnets outside the parent are ignored.
pub fn free_blocks(parent: &Network, allocated: &[AllocatedSubnet]) -> Vec<Network> {
    let mut used: Vec<Network> = allocated
        .iter()
        .map(|s| s.network)
        .filter(|n| parent.contains_network(n))
        .collect();
    used.sort();

    let mut blocks = Vec::new();
    let mut next_ip = parent.start();
    for net in used {
        if net.start() > next_ip {
            fill_gap(next_ip, net.start(), &mut blocks);
        }
        next_ip = next_ip.max(net.end());
    }
    fill_gap(next_ip, parent.end(), &mut blocks);

    log::debug!("free_blocks({parent}) found {} block(s)", blocks.len());
    blocks
}

/// Cover [start, end) with aligned blocks.
fn fill_gap(mut start: u64, end: u64, blocks: &mut Vec<Network>) {
    while start < end {
        let mask = find_biggest_subnet(start, end);
        let block = Network::from_bits(start as u32, mask);
        blocks.push(block);
        start = block.end();
    }
}

/// Find the biggest subnet that starts at `start_ip` and ends before `end`.
///
/// The returned mask is constrained by:
/// 1. The IP alignment - `start_ip` must be a valid network address for the mask
/// 2. The subnet must not reach `end`
fn find_biggest_subnet(start_ip: u64, end: u64) -> u8 {
    assert!(start_ip < end, "start_ip[{start_ip}] >= end[{end}] should never happen.");

    let mut next_mask = lo_mask(Ipv4Addr::from(start_ip as u32));
    while start_ip + (1u64 << (MAX_LENGTH - next_mask)) > end {
        next_mask += 1;
    }
    next_mask
}
