// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Temporal helpers: export timestamp parsing, adjacent-pair traversal, and
//! human-readable durations.

use chrono::{DateTime, FixedOffset, Utc};

use crate::error::{Error, Result};

/// Timestamp layout used throughout the export, e.g.
/// `2021-03-01T09:30:00.000+0100`.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

/// Duration units for [`seconds_to_human`], largest first. Years and months
/// are the 365-day / 30-day approximations, not calendar arithmetic.
const UNITS: &[(&str, i64)] = &[
    ("Y", 365 * 86_400),
    ("M", 30 * 86_400),
    ("w", 7 * 86_400),
    ("d", 86_400),
    ("h", 3_600),
    ("m", 60),
    ("s", 1),
];

/// Parses an export timestamp, keeping its UTC offset.
pub fn parse_timestamp(s: &str) -> Result<DateTime<FixedOffset>> {
    DateTime::parse_from_str(s, TIMESTAMP_FORMAT).map_err(|_| Error::InvalidTimestamp(s.to_string()))
}

/// The current instant as an offset-aware timestamp, comparable with parsed
/// export timestamps.
pub fn now_fixed() -> DateTime<FixedOffset> {
    Utc::now().fixed_offset()
}

/// Yields `(items[i], Some(items[i + 1]))` for each adjacent pair, then a
/// final `(items[last], None)` so the terminal element is still visited.
/// An empty slice yields nothing.
pub fn pairwise<T>(items: &[T]) -> impl Iterator<Item = (&T, Option<&T>)> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| (item, items.get(i + 1)))
}

/// Renders a duration as up to `max_units` of its largest non-zero units,
/// e.g. `seconds_to_human(90_061, 2) == "1d 1h"`. A zero duration renders
/// as the empty string.
pub fn seconds_to_human(seconds: i64, max_units: usize) -> String {
    let mut remaining = seconds;
    let mut parts = Vec::new();

    for (unit, value) in UNITS {
        let count = remaining / value;
        if count != 0 {
            remaining -= count * value;
            parts.push(format!("{count}{unit}"));
        }
        if parts.len() == max_units {
            break;
        }
    }

    parts.join(" ")
}

#[cfg(test)]
#[path = "time_tests.rs"]
mod tests;
