//! Terminal output utilities.
//!
//! Provides formatting helpers and the colored report view.

use crate::models::IpReport;
use colored::Colorize;

/// Format a value as a quoted, right-aligned field.
///
/// # Arguments
/// * `value` - The value to format
/// * `width` - The minimum width of the field
///
/// # Returns
/// A quoted, right-aligned string
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let value_str = value.to_string();
    let quoted = format!("\"{value_str}\"");
    let quoted_len = quoted.len();

    if quoted_len >= width {
        quoted
    } else {
        format!("{quoted:>width$}")
    }
}

/// Render an [`IpReport`] as aligned "label: value" lines.
pub fn render_report(report: &IpReport) -> String {
    let flags = match (report.is_network_address, report.is_broadcast_address) {
        (true, _) => " (network address)",
        (_, true) => " (broadcast address)",
        _ => "",
    };
    let lines = [
        (
            "IP address",
            format!("{}{flags}", report.ip_decimal),
        ),
        ("IP binary", report.ip_binary.clone()),
        (
            "Class",
            format!(
                "{}{}",
                report.address_class,
                if report.is_private { " (private)" } else { "" }
            ),
        ),
        (
            "Subnet mask",
            format!("{} {}", report.subnet_mask_decimal, report.subnet_mask_cidr),
        ),
        ("Mask binary", report.subnet_mask_binary.clone()),
        ("Wildcard", report.wildcard_mask.to_string()),
        ("Network", report.network_address.to_string()),
        ("Broadcast", report.broadcast_address.to_string()),
        (
            "Host range",
            format!("{} - {}", report.first_host, report.last_host),
        ),
        (
            "Usable hosts",
            format!("{} of {}", report.usable_hosts, report.total_addresses),
        ),
    ];

    lines
        .iter()
        .map(|(label, value)| format!("{:>13}: {}", label.bold(), value))
        .collect::<Vec<String>>()
        .join("\n")
}
