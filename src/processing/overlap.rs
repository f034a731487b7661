//! Overlap detection and partition validation.
//!
//! CIDR blocks either nest or are disjoint, so once sorted by start address
//! any overlap shows up between neighbours.

use crate::error::SubnetError;
use crate::models::{AllocatedSubnet, Network};
use itertools::Itertools;

/// Two subnets sharing address space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlapConflict {
    pub first: Network,
    pub second: Network,
}

/// Find overlapping subnets.
///
/// # Returns
/// The conflicting neighbour pairs in address order, empty when none overlap.
pub fn find_overlaps(subnets: &[AllocatedSubnet]) -> Vec<OverlapConflict> {
    let mut nets: Vec<Network> = subnets.iter().map(|s| s.network).collect();
    nets.sort();

    nets.into_iter()
        .tuple_windows()
        .filter(|(a, b)| a.overlaps(b))
        .map(|(first, second)| OverlapConflict { first, second })
        .collect()
}

/// Log overlapping subnets as warnings.
pub fn log_overlaps(conflicts: &[OverlapConflict]) {
    if conflicts.is_empty() {
        log::debug!("No overlapping subnets found.");
        return;
    }

    log::warn!("Found {} overlapping subnet pair(s):", conflicts.len());
    for conflict in conflicts {
        log::warn!("  {} overlaps {}", conflict.first, conflict.second);
    }
}

/// Check that every subnet lies inside `parent` and that no two subnets overlap.
pub fn verify_partition(parent: &Network, subnets: &[AllocatedSubnet]) -> Result<(), SubnetError> {
    if let Some(outside) = subnets.iter().find(|s| !parent.contains_network(&s.network)) {
        return Err(SubnetError::capacity(
            outside.network,
            format!("subnet lies outside {parent}"),
        ));
    }

    let conflicts = find_overlaps(subnets);
    log_overlaps(&conflicts);
    match conflicts.first() {
        Some(conflict) => Err(SubnetError::capacity(
            conflict.second,
            format!("subnet overlaps {}", conflict.first),
        )),
        None => Ok(()),
    }
}
