// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Console formatting shared by the report and show commands.

use std::fmt;

use chrono::{DateTime, FixedOffset};
use tally_core::time::seconds_to_human;

/// Unit budget for humanized durations: "1d 1h", never "1d 1h 1m 1s".
pub const DURATION_UNITS: usize = 2;

/// Section title with an underline matching its length.
pub fn title(text: &str) -> String {
    format!("\n{}\n{}", text, "-".repeat(text.len()))
}

/// Top-level list entry.
pub fn bullet(label: &str, value: impl fmt::Display) -> String {
    format!("- {}: {}", label, value)
}

/// Group heading within a section.
pub fn group(label: impl fmt::Display) -> String {
    format!("+ {}", label)
}

/// Indented entry under a group heading.
pub fn sub_bullet(label: &str, value: impl fmt::Display) -> String {
    format!(" - {}: {}", label, value)
}

/// Humanized duration under the report's unit budget. A zero duration
/// renders as the empty string, matching the formatter.
pub fn duration(seconds: i64) -> String {
    seconds_to_human(seconds, DURATION_UNITS)
}

/// Timestamp in the compact display format.
pub fn timestamp(at: &DateTime<FixedOffset>) -> String {
    at.format("%Y-%m-%d %H:%M").to_string()
}

#[cfg(test)]
#[path = "display_tests.rs"]
mod tests;
