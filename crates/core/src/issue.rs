// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Core issue types for the tally analytics tool.
//!
//! This module contains the taxonomy enums ([`IssueType`], [`Status`]), the
//! [`Issue`] itself, and the changelog-derived views: status intervals,
//! status flow, rejections, and per-status activity distributions.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::record::RawRecord;
use crate::time;

/// Changelog field name for status transitions.
pub const STATUS_FIELD: &str = "status";
/// Changelog field name for assignee changes.
pub const ASSIGNEE_FIELD: &str = "assignee";
/// Changelog field name for description edits.
pub const DESCRIPTION_FIELD: &str = "description";
/// Changelog field name for acceptance criteria edits.
pub const ACCEPTANCE_CRITERIA_FIELD: &str = "Acceptance Criteria";
/// Changelog field name for how-to-test edits.
pub const HOW_TO_TEST_FIELD: &str = "How to test";

/// Bucket for activity whose timestamp falls outside every reconstructed
/// status interval (clock skew, entries predating creation). Not part of
/// the canonical status taxonomy; the closed-world sorters reject it.
pub const UNKNOWN_STATUS: &str = "Unknown";

/// Classification of issues by their nature and scope.
///
/// Variant order is the canonical report order; grouped output is sorted by
/// it, not alphabetically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IssueType {
    /// Large initiative containing multiple stories.
    Epic,
    /// Feature work described from the user's perspective.
    UserStory,
    /// Standard unit of work.
    Task,
    /// Subdivision of a story or task.
    SubTask,
    /// Defect caught before release.
    DevBug,
    /// Defect found in production.
    ProdBug,
}

impl IssueType {
    /// Returns the string representation used in the export and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueType::Epic => "Epic",
            IssueType::UserStory => "User Story",
            IssueType::Task => "Task",
            IssueType::SubTask => "Sub-Task",
            IssueType::DevBug => "Dev Bug",
            IssueType::ProdBug => "Prod Bug",
        }
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for IssueType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Epic" => Ok(IssueType::Epic),
            "User Story" => Ok(IssueType::UserStory),
            "Task" => Ok(IssueType::Task),
            "Sub-Task" => Ok(IssueType::SubTask),
            "Dev Bug" => Ok(IssueType::DevBug),
            "Prod Bug" => Ok(IssueType::ProdBug),
            _ => Err(Error::UnknownIssueType(s.to_string())),
        }
    }
}

/// Workflow status of an issue.
///
/// Variant order is the canonical flow order used to sort grouped output.
/// "Todo" and "To Do" are distinct data values in the export and keep
/// distinct ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Status {
    Open,
    OnHold,
    Backlog,
    Todo,
    ToDo,
    InProgress,
    Blocked,
    ReadyForReview,
    InReview,
    Approval,
    Rejected,
    Done,
    Closed,
}

impl Status {
    /// Returns the string representation used in the export and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Open => "Open",
            Status::OnHold => "On Hold",
            Status::Backlog => "Backlog",
            Status::Todo => "Todo",
            Status::ToDo => "To Do",
            Status::InProgress => "In Progress",
            Status::Blocked => "Blocked",
            Status::ReadyForReview => "Ready for Review",
            Status::InReview => "In Review",
            Status::Approval => "Approval",
            Status::Rejected => "Rejected",
            Status::Done => "Done",
            Status::Closed => "Closed",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Status {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Open" => Ok(Status::Open),
            "On Hold" => Ok(Status::OnHold),
            "Backlog" => Ok(Status::Backlog),
            "Todo" => Ok(Status::Todo),
            "To Do" => Ok(Status::ToDo),
            "In Progress" => Ok(Status::InProgress),
            "Blocked" => Ok(Status::Blocked),
            "Ready for Review" => Ok(Status::ReadyForReview),
            "In Review" => Ok(Status::InReview),
            "Approval" => Ok(Status::Approval),
            "Rejected" => Ok(Status::Rejected),
            "Done" => Ok(Status::Done),
            "Closed" => Ok(Status::Closed),
            _ => Err(Error::UnknownStatus(s.to_string())),
        }
    }
}

/// One comment on an issue. Only the timestamp matters to the analytics;
/// it stays raw and is parsed where consumed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comment {
    pub created: String,
}

/// One field change within a changelog entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeItem {
    pub field: String,
    pub from: Option<String>,
    pub to: Option<String>,
}

/// One changelog entry: a raw timestamp and the field changes made at it.
/// Entries are assumed chronologically ordered as exported.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeEntry {
    pub created: String,
    pub items: Vec<ChangeItem>,
}

/// A single field's change at a point in time, flattened out of a changelog
/// entry by [`Issue::changes_for_field`].
#[derive(Debug, Clone, PartialEq)]
pub struct FieldChange {
    /// Raw entry timestamp; parsed by the analytics that need it.
    pub at: String,
    pub from: Option<String>,
    pub to: Option<String>,
}

/// The contiguous time span an issue spent in a single status value.
///
/// Derived, never stored: intervals for one issue are contiguous,
/// non-overlapping, and cover `[created, now]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusInterval {
    pub status: String,
    pub from: DateTime<FixedOffset>,
    pub to: DateTime<FixedOffset>,
}

impl StatusInterval {
    /// Length of the interval in whole seconds.
    pub fn seconds(&self) -> i64 {
        (self.to - self.from).num_seconds()
    }
}

/// How often an issue bounced from a review-like status back into
/// "In Progress".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Rejections {
    pub in_review: usize,
    pub approval: usize,
}

/// One ticket, constructed once from a raw export record at load time and
/// immutable thereafter. Derived views are computed on demand, not cached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Issue {
    /// Ticket identifier, e.g. `PROJ-123`.
    pub key: String,
    /// Issue type name as exported. Open string; the canonical taxonomy is
    /// enforced when grouped output is sorted, not here.
    pub issue_type: String,
    pub priority: String,
    pub created: DateTime<FixedOffset>,
    /// Current status name as exported. Open string, like `issue_type`.
    pub status: String,
    pub creator: Option<String>,
    pub assignee: Option<String>,
    pub description: String,
    pub acceptance_criteria: String,
    pub how_to_test: String,
    pub comments: Vec<Comment>,
    pub changelog: Vec<ChangeEntry>,
}

impl Issue {
    /// Builds an issue from a raw export record.
    ///
    /// Missing keys resolve to empty values; only an unparseable creation
    /// timestamp fails construction (and gets the file skipped at load).
    pub fn from_record(record: RawRecord) -> Result<Self> {
        let fields = record.fields;
        let created = time::parse_timestamp(fields.created.as_deref().unwrap_or_default())?;

        let comments = fields
            .comment
            .map(|list| list.comments)
            .unwrap_or_default()
            .into_iter()
            .map(|comment| Comment {
                created: comment.created,
            })
            .collect();

        let changelog = record
            .changelog
            .map(|log| log.histories)
            .unwrap_or_default()
            .into_iter()
            .map(|entry| ChangeEntry {
                created: entry.created,
                items: entry
                    .items
                    .into_iter()
                    .map(|item| ChangeItem {
                        field: item.field,
                        from: item.from,
                        to: item.to,
                    })
                    .collect(),
            })
            .collect();

        Ok(Issue {
            key: record.key.unwrap_or_default(),
            issue_type: fields
                .issuetype
                .and_then(|value| value.name)
                .unwrap_or_default(),
            priority: fields
                .priority
                .and_then(|value| value.name)
                .unwrap_or_default(),
            created,
            status: fields
                .status
                .and_then(|value| value.name)
                .unwrap_or_default(),
            creator: fields.creator.and_then(|user| user.display_name),
            assignee: fields.assignee.and_then(|user| user.display_name),
            description: fields.description.unwrap_or_default(),
            acceptance_criteria: fields.acceptance_criteria.unwrap_or_default(),
            how_to_test: fields.how_to_test.unwrap_or_default(),
            comments,
            changelog,
        })
    }

    /// The changelog filtered to entries touching `field`, each entry
    /// contributing its first matching item.
    pub fn changes_for_field(&self, field: &str) -> Vec<FieldChange> {
        self.changelog
            .iter()
            .filter_map(|entry| {
                entry
                    .items
                    .iter()
                    .find(|item| item.field == field)
                    .map(|item| FieldChange {
                        at: entry.created.clone(),
                        from: item.from.clone(),
                        to: item.to.clone(),
                    })
            })
            .collect()
    }

    /// Reconstructs the status timeline from the changelog.
    ///
    /// Each status change closes the interval of the status it moved *from*
    /// and opens the next; the last change's target status runs to `now`.
    /// With no status changelog the issue has spent its whole lifetime in
    /// its current status, `[created, now)`.
    pub fn status_intervals(&self, now: DateTime<FixedOffset>) -> Result<Vec<StatusInterval>> {
        let changes = self.changes_for_field(STATUS_FIELD);
        if changes.is_empty() {
            return Ok(vec![StatusInterval {
                status: self.status.clone(),
                from: self.created,
                to: now,
            }]);
        }

        let mut intervals = Vec::with_capacity(changes.len() + 1);
        let mut running_from = self.created;

        for change in &changes {
            let at = time::parse_timestamp(&change.at)?;
            intervals.push(StatusInterval {
                status: change.from.clone().unwrap_or_default(),
                from: running_from,
                to: at,
            });
            running_from = at;
        }

        if let Some(last) = changes.last() {
            intervals.push(StatusInterval {
                status: last.to.clone().unwrap_or_default(),
                from: running_from,
                to: now,
            });
        }

        Ok(intervals)
    }

    /// The reconstructed intervals grouped by status.
    pub fn status_time_distribution(
        &self,
        now: DateTime<FixedOffset>,
    ) -> Result<BTreeMap<String, Vec<(DateTime<FixedOffset>, DateTime<FixedOffset>)>>> {
        let mut distribution: BTreeMap<String, Vec<_>> = BTreeMap::new();
        for interval in self.status_intervals(now)? {
            let StatusInterval { status, from, to } = interval;
            distribution.entry(status).or_default().push((from, to));
        }
        Ok(distribution)
    }

    /// Total seconds spent in each status.
    pub fn status_seconds(&self, now: DateTime<FixedOffset>) -> Result<BTreeMap<String, i64>> {
        Ok(self
            .status_time_distribution(now)?
            .into_iter()
            .map(|(status, spans)| {
                let total = spans.iter().map(|(from, to)| (*to - *from).num_seconds()).sum();
                (status, total)
            })
            .collect())
    }

    /// The ordered sequence of statuses the issue passed through, repeats
    /// included: the `from` of every status change plus the final `to`.
    /// Empty when the issue has no status changelog.
    pub fn status_flow(&self) -> Vec<String> {
        let changes = self.changes_for_field(STATUS_FIELD);
        let mut flow: Vec<String> = changes
            .iter()
            .map(|change| change.from.clone().unwrap_or_default())
            .collect();
        if let Some(last) = changes.last() {
            flow.push(last.to.clone().unwrap_or_default());
        }
        flow
    }

    /// Number of `status -> "In Progress"` transitions in the flow: how
    /// often work was sent back from `status` for rework.
    pub fn rejection_count_from(&self, status: &str) -> usize {
        let flow = self.status_flow();
        time::pairwise(&flow)
            .filter(|(from, to)| {
                from.as_str() == status
                    && to.map(String::as_str) == Some(Status::InProgress.as_str())
            })
            .count()
    }

    /// Rejection counts out of the two review gates.
    pub fn rejections(&self) -> Rejections {
        Rejections {
            in_review: self.rejection_count_from(Status::InReview.as_str()),
            approval: self.rejection_count_from(Status::Approval.as_str()),
        }
    }

    /// The status the issue was in at `at`: the first interval (in
    /// chronological order) whose `[from, to]` contains it, bounds
    /// inclusive. `None` when `at` falls outside the recorded lifetime.
    pub fn status_at(
        &self,
        at: DateTime<FixedOffset>,
        now: DateTime<FixedOffset>,
    ) -> Result<Option<String>> {
        for interval in self.status_intervals(now)? {
            if interval.from <= at && at <= interval.to {
                return Ok(Some(interval.status));
            }
        }
        Ok(None)
    }

    /// Number of times `field` was updated in each status. Updates whose
    /// timestamp matches no interval are counted under [`UNKNOWN_STATUS`].
    pub fn field_update_distribution(
        &self,
        field: &str,
        now: DateTime<FixedOffset>,
    ) -> Result<BTreeMap<String, usize>> {
        let mut distribution = BTreeMap::new();
        for change in self.changes_for_field(field) {
            let at = time::parse_timestamp(&change.at)?;
            let status = self
                .status_at(at, now)?
                .unwrap_or_else(|| UNKNOWN_STATUS.to_string());
            *distribution.entry(status).or_insert(0) += 1;
        }
        Ok(distribution)
    }

    /// Description updates per status.
    pub fn description_update_distribution(
        &self,
        now: DateTime<FixedOffset>,
    ) -> Result<BTreeMap<String, usize>> {
        self.field_update_distribution(DESCRIPTION_FIELD, now)
    }

    /// Acceptance criteria updates per status.
    pub fn acceptance_criteria_update_distribution(
        &self,
        now: DateTime<FixedOffset>,
    ) -> Result<BTreeMap<String, usize>> {
        self.field_update_distribution(ACCEPTANCE_CRITERIA_FIELD, now)
    }

    /// How-to-test updates per status.
    pub fn how_to_test_update_distribution(
        &self,
        now: DateTime<FixedOffset>,
    ) -> Result<BTreeMap<String, usize>> {
        self.field_update_distribution(HOW_TO_TEST_FIELD, now)
    }

    /// Comments posted per status, by the status active at each comment's
    /// timestamp. Same [`UNKNOWN_STATUS`] rule as field updates.
    pub fn comment_distribution(
        &self,
        now: DateTime<FixedOffset>,
    ) -> Result<BTreeMap<String, usize>> {
        let mut distribution = BTreeMap::new();
        for comment in &self.comments {
            let at = time::parse_timestamp(&comment.created)?;
            let status = self
                .status_at(at, now)?
                .unwrap_or_else(|| UNKNOWN_STATUS.to_string());
            *distribution.entry(status).or_insert(0) += 1;
        }
        Ok(distribution)
    }

    /// Everyone the issue has been assigned to, in changelog order.
    /// Reassignment history, so duplicates are possible.
    pub fn assignees(&self) -> Vec<String> {
        self.changes_for_field(ASSIGNEE_FIELD)
            .into_iter()
            .map(|change| change.to.unwrap_or_default())
            .collect()
    }

    /// Description length in CRLF line breaks. An empty body reports -1,
    /// not 0; per-type averages depend on that exact value.
    pub fn description_lines(&self) -> i64 {
        crlf_lines(&self.description)
    }

    /// Acceptance criteria length in CRLF line breaks (same -1 rule).
    pub fn acceptance_criteria_lines(&self) -> i64 {
        crlf_lines(&self.acceptance_criteria)
    }

    /// How-to-test length in CRLF line breaks (same -1 rule).
    pub fn how_to_test_lines(&self) -> i64 {
        crlf_lines(&self.how_to_test)
    }
}

/// CRLF-delimited segment count minus one. The empty body has no segments
/// and reports -1.
fn crlf_lines(body: &str) -> i64 {
    if body.is_empty() {
        return -1;
    }
    body.split("\r\n").count() as i64 - 1
}

#[cfg(test)]
#[path = "issue_tests.rs"]
mod tests;
