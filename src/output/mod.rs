//! Output formatting for reports and subnet plans.
//!
//! This module handles formatting results for display:
//! - [`csv`] - CSV table of a subnet plan
//! - [`json`] - JSON output, the format tool callers consume
//! - [`terminal`] - Terminal helpers and the colored report view

mod csv;
mod json;
mod terminal;

pub use csv::render_plan;
pub use json::{error_json, to_json};
pub use terminal::{format_field, render_report};
