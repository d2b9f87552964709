// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Serde image of one exported ticket.
//!
//! Every nested level is optional and defaults when absent or null, so a
//! sparse record deserializes cleanly: a missing key resolves to an empty
//! value instead of failing the whole file.
//!
//! Timestamps inside comments and changelog entries stay raw strings here;
//! they are parsed by the analytics that consume them, so one malformed
//! entry surfaces from the operation that touches it.

use serde::Deserialize;

/// One exported ticket, as found in a `*.json` file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub fields: RawFields,
    #[serde(default)]
    pub changelog: Option<RawChangelog>,
}

/// The `fields` object of an exported ticket.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFields {
    #[serde(default)]
    pub issuetype: Option<NamedValue>,
    #[serde(default)]
    pub priority: Option<NamedValue>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub status: Option<NamedValue>,
    #[serde(default)]
    pub creator: Option<UserRef>,
    #[serde(default)]
    pub assignee: Option<UserRef>,
    #[serde(default)]
    pub description: Option<String>,
    /// Acceptance criteria body (a custom field in the export).
    #[serde(default, rename = "customfield_10741")]
    pub acceptance_criteria: Option<String>,
    /// How-to-test body (a custom field in the export).
    #[serde(default, rename = "customfield_10693")]
    pub how_to_test: Option<String>,
    #[serde(default)]
    pub comment: Option<RawCommentList>,
}

/// A `{ "name": ... }` wrapper (issue type, priority, status).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NamedValue {
    #[serde(default)]
    pub name: Option<String>,
}

/// A `{ "displayName": ... }` user reference (creator, assignee).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserRef {
    #[serde(default, rename = "displayName")]
    pub display_name: Option<String>,
}

/// The `fields.comment` wrapper around the comment list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCommentList {
    #[serde(default)]
    pub comments: Vec<RawComment>,
}

/// One comment; only its timestamp matters to the analytics.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawComment {
    #[serde(default)]
    pub created: String,
}

/// The `changelog` wrapper around the history list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawChangelog {
    #[serde(default)]
    pub histories: Vec<RawChangeEntry>,
}

/// One changelog entry: a timestamp and the field changes made at it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawChangeEntry {
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub items: Vec<RawChangeItem>,
}

/// One field change within a changelog entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawChangeItem {
    #[serde(default)]
    pub field: String,
    #[serde(default, rename = "fromString")]
    pub from: Option<String>,
    #[serde(default, rename = "toString")]
    pub to: Option<String>,
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
