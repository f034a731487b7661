//! Subnetting logic.
//!
//! This module contains the computations built on top of the models:
//! - [`info`] - Analysis of a single address/mask pair
//! - [`allocator`] - Division of a network into subnets
//! - [`gap_finder`] - Free space left after a division
//! - [`overlap`] - Overlap detection and partition validation

mod allocator;
mod gap_finder;
mod info;
mod overlap;

// Re-export public functions
pub use allocator::{
    divide, max_hosts_per_subnet, max_subnets, plan, vlsm, Division, DivisionType,
};
pub use gap_finder::free_blocks;
pub use info::{analyze, describe};
pub use overlap::{find_overlaps, log_overlaps, verify_partition, OverlapConflict};
