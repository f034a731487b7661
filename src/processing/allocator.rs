//! Division of a parent network into child subnets.
//!
//! Three strategies are supported, selected by [`Division`]:
//! - [`Division::MaxSubnets`] - exactly `n` equal-size subnets
//! - [`Division::MaxHostsPerSubnet`] - as many equal-size subnets as fit, each holding `h` hosts
//! - [`Division::Vlsm`] - one right-sized subnet per host requirement

use super::gap_finder::free_blocks;
use super::overlap::verify_partition;
use crate::error::SubnetError;
use crate::models::{required_prefix, AllocatedSubnet, Network, SubnetPlan, MAX_LENGTH};
use crate::parser::{parse_count, parse_requirements};
use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

/// Name of a division strategy, as given by callers.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DivisionType {
    MaxSubnets,
    MaxHostsPerSubnet,
    Vlsm,
}

impl DivisionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DivisionType::MaxSubnets => "max_subnets",
            DivisionType::MaxHostsPerSubnet => "max_hosts_per_subnet",
            DivisionType::Vlsm => "vlsm",
        }
    }
}

impl FromStr for DivisionType {
    type Err = SubnetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "max_subnets" => Ok(DivisionType::MaxSubnets),
            "max_hosts_per_subnet" => Ok(DivisionType::MaxHostsPerSubnet),
            "vlsm" => Ok(DivisionType::Vlsm),
            _ => Err(SubnetError::requirement(
                s,
                "division type must be max_subnets, max_hosts_per_subnet or vlsm",
            )),
        }
    }
}

impl fmt::Display for DivisionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A division strategy together with its parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Division {
    /// Split into exactly this many equal subnets.
    MaxSubnets(u64),
    /// Split into equal subnets of at least this many usable hosts each.
    MaxHostsPerSubnet(u64),
    /// One subnet per host requirement, in the given order.
    Vlsm(Vec<u64>),
}

impl Division {
    /// Build a division from the loosely typed tool arguments.
    ///
    /// `number` is required for the equal-size strategies. For VLSM the host
    /// list is required and `number`, when given, must match its length.
    pub fn from_request(
        division_type: DivisionType,
        number: Option<&str>,
        hosts_per_subnet: Option<&str>,
    ) -> Result<Division, SubnetError> {
        let number = number
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(parse_count)
            .transpose()?;

        match division_type {
            DivisionType::MaxSubnets => number.map(Division::MaxSubnets).ok_or_else(|| {
                SubnetError::requirement("number", "number of subnets is required for max_subnets")
            }),
            DivisionType::MaxHostsPerSubnet => {
                number.map(Division::MaxHostsPerSubnet).ok_or_else(|| {
                    SubnetError::requirement(
                        "number",
                        "hosts per subnet is required for max_hosts_per_subnet",
                    )
                })
            }
            DivisionType::Vlsm => {
                let text = hosts_per_subnet.ok_or_else(|| {
                    SubnetError::requirement("hosts_per_subnet", "host list is required for vlsm")
                })?;
                let hosts = parse_requirements(text)?;
                if let Some(n) = number {
                    if n != hosts.len() as u64 {
                        return Err(SubnetError::requirement(
                            text,
                            format!("need exactly {n} host values, got {}", hosts.len()),
                        ));
                    }
                }
                Ok(Division::Vlsm(hosts))
            }
        }
    }

    pub fn division_type(&self) -> DivisionType {
        match self {
            Division::MaxSubnets(_) => DivisionType::MaxSubnets,
            Division::MaxHostsPerSubnet(_) => DivisionType::MaxHostsPerSubnet,
            Division::Vlsm(_) => DivisionType::Vlsm,
        }
    }

    /// Display name of the strategy.
    pub fn name(&self) -> &'static str {
        match self {
            Division::MaxSubnets(_) => "Max Subnets",
            Division::MaxHostsPerSubnet(_) => "Max Hosts per Subnet",
            Division::Vlsm(_) => "VLSM",
        }
    }
}

/// Divide `parent` according to `division`.
///
/// Returns the child subnets in output order: address order for the equal-size
/// strategies, input order for VLSM. Fails without partial results.
///
/// The equal-size strategies return one row per child block, 2^(child prefix -
/// parent prefix) rows in total. A /0 split into /32 hosts is 2^32 rows, so
/// adapters taking untrusted input should cap the prefix difference before
/// calling this.
pub fn divide(parent: &Network, division: &Division) -> Result<Vec<AllocatedSubnet>, SubnetError> {
    log::info!("divide({parent}) using {}", division.name());
    let subnets = match division {
        Division::MaxSubnets(n) => max_subnets(parent, *n)?,
        Division::MaxHostsPerSubnet(h) => max_hosts_per_subnet(parent, *h)?,
        Division::Vlsm(requirements) => vlsm(parent, requirements)?,
    };
    debug_assert!(verify_partition(parent, &subnets).is_ok());
    Ok(subnets)
}

/// Divide `parent` and add the summary figures and the free space left over.
pub fn plan(parent: &Network, division: &Division) -> Result<SubnetPlan, SubnetError> {
    let subnets = divide(parent, division)?;
    let free = free_blocks(parent, &subnets);

    let mut plan = SubnetPlan {
        method: division.name().to_string(),
        parent: *parent,
        subnets,
        bits_borrowed: None,
        hosts_per_subnet: None,
        total_subnets: None,
        total_hosts_requested: None,
        total_hosts_allocated: None,
        free_blocks: free,
    };

    match division {
        Division::MaxSubnets(_) | Division::MaxHostsPerSubnet(_) => {
            if let Some(first) = plan.subnets.first() {
                let bits = first.network.prefix() - parent.prefix();
                plan.bits_borrowed = Some(bits);
                plan.hosts_per_subnet = Some(first.usable_count);
                plan.total_subnets = Some(1u64 << bits);
            }
        }
        Division::Vlsm(requirements) => {
            plan.total_hosts_requested = Some(requirements.iter().sum());
            plan.total_hosts_allocated = Some(plan.subnets.iter().map(|s| s.usable_count).sum());
        }
    }

    Ok(plan)
}

/// Number of prefix bits needed to number `n` subnets, i.e. ceil(log2(n)).
fn bits_for_count(n: u64) -> u32 {
    if n <= 1 {
        0
    } else {
        u64::BITS - (n - 1).leading_zeros()
    }
}

/// All blocks of `new_prefix` inside `parent`, in address order.
fn equal_blocks(parent: &Network, new_prefix: u8) -> impl Iterator<Item = Network> {
    let size = 1u64 << (MAX_LENGTH - new_prefix);
    let count = 1u64 << (new_prefix - parent.prefix());
    let base = parent.start();
    (0..count).map(move |i| Network::from_bits((base + i * size) as u32, new_prefix))
}

/// Split into exactly `n` equal subnets.
pub fn max_subnets(parent: &Network, n: u64) -> Result<Vec<AllocatedSubnet>, SubnetError> {
    if n == 0 {
        return Err(SubnetError::requirement(
            n,
            "number of subnets must be at least 1",
        ));
    }
    let bits = bits_for_count(n);
    let new_prefix = u32::from(parent.prefix()) + bits;
    if new_prefix > u32::from(MAX_LENGTH) {
        log::warn!("{n} subnets of {parent} would need /{new_prefix}");
        return Err(SubnetError::capacity(
            parent,
            format!("{n} subnets need a /{new_prefix} prefix, longer than /32"),
        ));
    }
    let new_prefix = new_prefix as u8;
    log::debug!("max_subnets: {n} x /{new_prefix} ({bits} bits borrowed)");

    Ok(equal_blocks(parent, new_prefix)
        .take(usize::try_from(n).unwrap_or(usize::MAX))
        .map(|net| AllocatedSubnet::new(net, None))
        .collect())
}

/// Split into the most equal subnets that each hold at least `h` usable hosts.
pub fn max_hosts_per_subnet(parent: &Network, h: u64) -> Result<Vec<AllocatedSubnet>, SubnetError> {
    if h == 0 {
        return Err(SubnetError::requirement(
            h,
            "hosts per subnet must be at least 1",
        ));
    }
    let new_prefix = required_prefix(h)
        .filter(|len| *len >= parent.prefix())
        .ok_or_else(|| {
            log::warn!("{h} hosts do not fit in {parent}");
            SubnetError::capacity(
                parent,
                format!(
                    "{h} hosts per subnet exceed the {} usable hosts of the network",
                    parent.usable_hosts()
                ),
            )
        })?;
    log::debug!("max_hosts_per_subnet: {h} hosts -> /{new_prefix}");

    Ok(equal_blocks(parent, new_prefix)
        .map(|net| AllocatedSubnet::new(net, None))
        .collect())
}

/// A VLSM host requirement tagged with its input position.
#[derive(Debug)]
struct Requirement {
    index: usize,
    hosts: u64,
    prefix: u8,
}

/// Allocate one subnet per requirement, largest first, returned in input order.
pub fn vlsm(parent: &Network, requirements: &[u64]) -> Result<Vec<AllocatedSubnet>, SubnetError> {
    if requirements.is_empty() {
        return Ok(vec![]);
    }

    let mut pending = Vec::with_capacity(requirements.len());
    for (index, &hosts) in requirements.iter().enumerate() {
        if hosts == 0 {
            return Err(SubnetError::requirement(
                hosts,
                format!("requirement #{} must be at least 1 host", index + 1),
            ));
        }
        let prefix = required_prefix(hosts).ok_or_else(|| {
            SubnetError::capacity(hosts, "more hosts than the whole IPv4 address space")
        })?;
        pending.push(Requirement {
            index,
            hosts,
            prefix,
        });
    }
    // sort is stable: equal requests keep their input order
    pending.sort_by_key(|r| Reverse(r.hosts));

    let mut slots: Vec<Option<AllocatedSubnet>> = vec![None; requirements.len()];
    let mut cursor = parent.start();
    for req in &pending {
        let size = 1u64 << (MAX_LENGTH - req.prefix);
        let start = cursor.div_ceil(size) * size;
        if start + size > parent.end() {
            log::warn!(
                "vlsm: no room for {} hosts (/{}) in {parent}",
                req.hosts,
                req.prefix
            );
            return Err(SubnetError::capacity(
                parent,
                format!(
                    "no room left for requirement #{} ({} hosts needs a /{})",
                    req.index + 1,
                    req.hosts,
                    req.prefix
                ),
            ));
        }
        let network = Network::from_bits(start as u32, req.prefix);
        log::debug!("vlsm: #{} {} hosts -> {network}", req.index + 1, req.hosts);
        slots[req.index] = Some(AllocatedSubnet::new(network, Some(req.hosts)));
        cursor = start + size;
    }

    Ok(slots.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    fn net(s: &str) -> Network {
        s.parse().unwrap()
    }

    fn cidrs(subnets: &[AllocatedSubnet]) -> Vec<String> {
        subnets.iter().map(|s| s.network.to_string()).collect()
    }

    #[test]
    fn test_bits_for_count() {
        assert_eq!(bits_for_count(1), 0);
        assert_eq!(bits_for_count(2), 1);
        assert_eq!(bits_for_count(3), 2);
        assert_eq!(bits_for_count(4), 2);
        assert_eq!(bits_for_count(5), 3);
        assert_eq!(bits_for_count(8), 3);
        assert_eq!(bits_for_count(1 << 32), 32);
    }

    #[test]
    fn test_division_type_from_str() {
        assert_eq!(
            "max_subnets".parse::<DivisionType>().unwrap(),
            DivisionType::MaxSubnets
        );
        assert_eq!(
            " Max-Hosts-Per-Subnet ".parse::<DivisionType>().unwrap(),
            DivisionType::MaxHostsPerSubnet
        );
        assert_eq!("VLSM".parse::<DivisionType>().unwrap(), DivisionType::Vlsm);
        assert!(matches!(
            "random".parse::<DivisionType>(),
            Err(SubnetError::InvalidRequirement { .. })
        ));
        assert_eq!(DivisionType::Vlsm.to_string(), "vlsm");
    }

    #[test]
    fn test_from_request() {
        assert_eq!(
            Division::from_request(DivisionType::MaxSubnets, Some("8"), None).unwrap(),
            Division::MaxSubnets(8)
        );
        assert_eq!(
            Division::from_request(DivisionType::Vlsm, Some("4"), Some("100,50,25,10")).unwrap(),
            Division::Vlsm(vec![100, 50, 25, 10])
        );
        assert_eq!(
            Division::from_request(DivisionType::Vlsm, None, Some("")).unwrap(),
            Division::Vlsm(vec![])
        );
        for (t, number, hosts) in [
            (DivisionType::MaxSubnets, None, None),
            (DivisionType::MaxSubnets, Some(" "), None),
            (DivisionType::MaxHostsPerSubnet, Some("0"), None),
            (DivisionType::Vlsm, None, None),
            (DivisionType::Vlsm, Some("3"), Some("100,50")),
            (DivisionType::Vlsm, None, Some("100,0")),
        ] {
            assert!(
                matches!(
                    Division::from_request(t, number, hosts),
                    Err(SubnetError::InvalidRequirement { .. })
                ),
                "{t} {number:?} {hosts:?}"
            );
        }
    }

    #[test]
    fn test_max_subnets_16_by_8() {
        let subnets = max_subnets(&net("10.0.0.0/16"), 8).unwrap();
        assert_eq!(subnets.len(), 8);
        assert!(subnets.iter().all(|s| s.network.prefix() == 19));
        assert_eq!(subnets[0].network.to_string(), "10.0.0.0/19");
        assert_eq!(subnets[1].network.to_string(), "10.0.32.0/19");
        assert_eq!(subnets[7].network.to_string(), "10.0.224.0/19");
        assert_eq!(subnets[7].broadcast, Ipv4Addr::new(10, 0, 255, 255));
    }

    #[test]
    fn test_max_subnets_not_power_of_two() {
        let subnets = max_subnets(&net("192.168.10.0/24"), 5).unwrap();
        assert_eq!(
            cidrs(&subnets),
            vec![
                "192.168.10.0/27",
                "192.168.10.32/27",
                "192.168.10.64/27",
                "192.168.10.96/27",
                "192.168.10.128/27"
            ]
        );
        assert_eq!(subnets[4].usable_count, 30);
    }

    #[test]
    fn test_max_subnets_one_is_parent() {
        let parent = net("172.16.0.0/12");
        let subnets = max_subnets(&parent, 1).unwrap();
        assert_eq!(subnets.len(), 1);
        assert_eq!(subnets[0].network, parent);
    }

    #[test]
    fn test_max_subnets_capacity() {
        assert!(matches!(
            max_subnets(&net("192.168.0.0/30"), 8),
            Err(SubnetError::CapacityExceeded { .. })
        ));
        assert!(matches!(
            max_subnets(&net("192.168.0.0/24"), 512),
            Err(SubnetError::CapacityExceeded { .. })
        ));
        assert_eq!(max_subnets(&net("192.168.0.0/24"), 256).unwrap().len(), 256);
        assert!(matches!(
            max_subnets(&net("192.168.0.0/24"), 0),
            Err(SubnetError::InvalidRequirement { .. })
        ));
    }

    #[test]
    fn test_max_hosts_per_subnet() {
        let subnets = max_hosts_per_subnet(&net("192.168.0.0/24"), 50).unwrap();
        assert_eq!(
            cidrs(&subnets),
            vec![
                "192.168.0.0/26",
                "192.168.0.64/26",
                "192.168.0.128/26",
                "192.168.0.192/26"
            ]
        );
        assert!(subnets.iter().all(|s| s.usable_count == 62));

        let subnets = max_hosts_per_subnet(&net("10.0.0.0/29"), 2).unwrap();
        assert_eq!(subnets.len(), 4);
        assert!(subnets.iter().all(|s| s.network.prefix() == 31));

        let subnets = max_hosts_per_subnet(&net("10.0.0.0/30"), 1).unwrap();
        assert_eq!(subnets.len(), 4);
        assert_eq!(subnets[3].network.to_string(), "10.0.0.3/32");
    }

    #[test]
    fn test_divide_row_count_grows_with_prefix_difference() {
        let parent = net("10.20.0.0/16");
        let subnets = divide(&parent, &Division::MaxHostsPerSubnet(1)).unwrap();
        assert_eq!(subnets.len(), 1 << 16);
        assert_eq!(subnets[0].network.to_string(), "10.20.0.0/32");
        assert_eq!(subnets[65535].network.to_string(), "10.20.255.255/32");
    }

    #[test]
    fn test_max_hosts_per_subnet_whole_parent() {
        let parent = net("192.168.0.0/24");
        let subnets = max_hosts_per_subnet(&parent, 254).unwrap();
        assert_eq!(subnets.len(), 1);
        assert_eq!(subnets[0].network, parent);

        assert!(matches!(
            max_hosts_per_subnet(&parent, 255),
            Err(SubnetError::CapacityExceeded { .. })
        ));
        assert!(matches!(
            max_hosts_per_subnet(&parent, 0),
            Err(SubnetError::InvalidRequirement { .. })
        ));
    }

    #[test]
    fn test_vlsm_keeps_input_order() {
        let subnets = vlsm(&net("192.168.0.0/24"), &[10, 100, 25, 50]).unwrap();
        assert_eq!(
            cidrs(&subnets),
            vec![
                "192.168.0.224/28",
                "192.168.0.0/25",
                "192.168.0.192/27",
                "192.168.0.128/26"
            ]
        );
        let requested: Vec<u64> = subnets.iter().filter_map(|s| s.requested_hosts).collect();
        assert_eq!(requested, vec![10, 100, 25, 50]);
    }

    #[test]
    fn test_vlsm_ties_keep_input_order() {
        let subnets = vlsm(&net("10.0.0.0/24"), &[20, 60, 20, 20]).unwrap();
        assert_eq!(
            cidrs(&subnets),
            vec!["10.0.0.64/27", "10.0.0.0/26", "10.0.0.96/27", "10.0.0.128/27"]
        );
    }

    #[test]
    fn test_vlsm_small_requirements() {
        let subnets = vlsm(&net("10.0.0.0/28"), &[1, 2, 3]).unwrap();
        assert_eq!(
            cidrs(&subnets),
            vec!["10.0.0.10/32", "10.0.0.8/31", "10.0.0.0/29"]
        );
        assert!(matches!(
            vlsm(&net("10.0.0.0/29"), &[1, 2, 3]),
            Err(SubnetError::CapacityExceeded { .. })
        ));
    }

    #[test]
    fn test_vlsm_empty_and_invalid() {
        assert!(vlsm(&net("10.0.0.0/24"), &[]).unwrap().is_empty());
        assert!(matches!(
            vlsm(&net("10.0.0.0/24"), &[10, 0]),
            Err(SubnetError::InvalidRequirement { .. })
        ));
        assert!(matches!(
            vlsm(&net("10.0.0.0/24"), &[200, 100]),
            Err(SubnetError::CapacityExceeded { .. })
        ));
        assert!(matches!(
            vlsm(&net("10.0.0.0/24"), &[300]),
            Err(SubnetError::CapacityExceeded { .. })
        ));
        assert!(matches!(
            vlsm(&net("0.0.0.0/0"), &[u64::MAX]),
            Err(SubnetError::CapacityExceeded { .. })
        ));
    }

    #[test]
    fn test_vlsm_fills_parent_exactly() {
        let subnets = vlsm(&net("10.0.0.0/24"), &[126, 62, 30, 14, 6, 2, 2, 2, 1, 1]).unwrap();
        assert_eq!(subnets.len(), 10);
        assert_eq!(subnets[5].network.to_string(), "10.0.0.248/31");
        assert_eq!(subnets[9].network.to_string(), "10.0.0.255/32");
        assert!(verify_partition(&net("10.0.0.0/24"), &subnets).is_ok());
    }

    #[test]
    fn test_plan_summary() {
        let p = plan(&net("10.0.0.0/16"), &Division::MaxSubnets(5)).unwrap();
        assert_eq!(p.method, "Max Subnets");
        assert_eq!(p.subnets.len(), 5);
        assert_eq!(p.bits_borrowed, Some(3));
        assert_eq!(p.total_subnets, Some(8));
        assert_eq!(p.hosts_per_subnet, Some(8190));
        assert_eq!(
            p.free_blocks.iter().map(|n| n.to_string()).collect::<Vec<_>>(),
            vec!["10.0.160.0/19", "10.0.192.0/18"]
        );

        let p = plan(&net("192.168.0.0/24"), &Division::Vlsm(vec![100, 50, 25, 10])).unwrap();
        assert_eq!(p.total_hosts_requested, Some(185));
        assert_eq!(p.total_hosts_allocated, Some(126 + 62 + 30 + 14));
        assert_eq!(p.bits_borrowed, None);
        assert_eq!(
            p.free_blocks.iter().map(|n| n.to_string()).collect::<Vec<_>>(),
            vec!["192.168.0.240/28"]
        );
    }
}
