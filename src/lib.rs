//! IPv4 addressing and subnetting engine.
//!
//! Parses addresses and masks, describes a single address/mask pair, and
//! divides networks into equal-size or variable-size (VLSM) subnets. All
//! engine functions are pure; the [`config`] and [`logging`] modules exist for
//! the hosting binary only.

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod parser;
pub mod processing;

pub use error::SubnetError;
pub use models::{AllocatedSubnet, IpReport, Network, SubnetPlan};
pub use processing::{Division, DivisionType};

/// Analyze an IPv4 address with its subnet mask.
///
/// # Arguments
/// * `ip` - Address in decimal (192.168.1.10) or binary form, optionally with "/mask"
/// * `subnet_mask` - Mask as 255.255.255.0, /24 or 24; may be empty when `ip` carries it
///
/// # Examples
/// ```
/// let report = ipmentor::ip_info("192.168.1.100", "/24").unwrap();
/// assert_eq!(report.usable_hosts, 254);
/// ```
pub fn ip_info(ip: &str, subnet_mask: &str) -> Result<IpReport, SubnetError> {
    processing::analyze(ip, subnet_mask)
}

/// Divide a network into subnets.
///
/// # Arguments
/// * `network` - Parent network in CIDR form, e.g. "192.168.1.0/24"
/// * `division_type` - "max_subnets", "max_hosts_per_subnet" or "vlsm"
/// * `number` - Subnet count or hosts per subnet; for vlsm, optional count check
/// * `hosts_per_subnet` - Comma separated host counts (vlsm only)
///
/// Every input is validated before any subnet is allocated.
pub fn subnet_calculator(
    network: &str,
    division_type: &str,
    number: Option<&str>,
    hosts_per_subnet: Option<&str>,
) -> Result<SubnetPlan, SubnetError> {
    let parent = parser::parse_network(network)?;
    let division_type: DivisionType = division_type.parse()?;
    let division = Division::from_request(division_type, number, hosts_per_subnet)?;
    processing::plan(&parent, &division)
}
