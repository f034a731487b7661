//! CSV output formatting for subnet plans.

use crate::models::{AllocatedSubnet, SubnetPlan};
use colored::Colorize;
use itertools::Itertools;

use super::terminal::format_field;

/// Render a subnet plan as CSV rows with a header and a summary footer.
pub fn render_plan(plan: &SubnetPlan) -> String {
    log::debug!(
        "render_plan() {} with {} subnet(s)",
        plan.parent,
        plan.subnets.len()
    );

    let mut out = vec![
        r#"   "cnt",       "subnet_cidr",             "mask",      "broadcast",                     "usable_range", "usable_count", "requested""#
            .to_string(),
    ];
    out.extend(
        plan.subnets
            .iter()
            .enumerate()
            .map(|(i, s)| csv_row(i + 1, s)),
    );

    out.push(format!(
        "#{}# {} of {}: {} subnet(s)",
        "NOTE".on_blue(),
        plan.method,
        plan.parent,
        plan.subnets.len()
    ));
    if let Some(bits) = plan.bits_borrowed {
        out.push(format!("# bits borrowed: {bits}"));
    }
    if let (Some(requested), Some(allocated)) =
        (plan.total_hosts_requested, plan.total_hosts_allocated)
    {
        out.push(format!(
            "# hosts requested: {requested}, hosts allocated: {allocated}"
        ));
    }
    if !plan.free_blocks.is_empty() {
        out.push(format!("# free: {}", plan.free_blocks.iter().join(",")));
    }

    out.join("\n")
}

/// Format a single CSV row.
fn csv_row(j: usize, s: &AllocatedSubnet) -> String {
    format!(
        r#"{j},{subnet_cidr},{mask},{broadcast},{usable_range},{usable_count},{requested}"#,
        j = format_field(j, 8),
        subnet_cidr = format_field(s.network, 20),
        mask = format_field(s.mask, 17),
        broadcast = format_field(s.broadcast, 17),
        usable_range = format_field(
            format!("{}-{}", s.first_usable(), s.last_usable()),
            33
        ),
        usable_count = format_field(s.usable_count, 15),
        requested = format_field(
            s.requested_hosts
                .map(|h| h.to_string())
                .unwrap_or_else(|| "-".to_string()),
            12
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::{plan, Division};

    #[test]
    fn test_csv_row() {
        let s = AllocatedSubnet::new("10.0.0.0/30".parse().unwrap(), Some(2));
        let expected = [
            format!("{}\"1\"", " ".repeat(5)),
            format!("{}\"10.0.0.0/30\"", " ".repeat(7)),
            "\"255.255.255.252\"".to_string(),
            format!("{}\"10.0.0.3\"", " ".repeat(7)),
            format!("{}\"10.0.0.1-10.0.0.2\"", " ".repeat(14)),
            format!("{}\"2\"", " ".repeat(12)),
            format!("{}\"2\"", " ".repeat(9)),
        ]
        .join(",");
        assert_eq!(csv_row(1, &s), expected);
    }

    #[test]
    fn test_render_plan_vlsm() {
        colored::control::set_override(false);
        let p = plan(
            &"192.168.0.0/24".parse().unwrap(),
            &Division::Vlsm(vec![100, 50, 25, 10]),
        )
        .unwrap();
        let text = render_plan(&p);
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].contains("subnet_cidr"));
        assert!(lines[1].contains("\"192.168.0.0/25\""));
        assert!(lines[4].contains("\"192.168.0.224/28\""));
        assert!(text.contains("# hosts requested: 185, hosts allocated: 232"));
        assert!(text.contains("# free: 192.168.0.240/28"));
    }
}
