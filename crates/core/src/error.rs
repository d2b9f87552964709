// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for tally-core operations.

use thiserror::Error;

/// All possible errors that can occur in tally-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid timestamp: '{0}'\n  hint: expected an offset timestamp like 2021-03-01T09:30:00.000+0100")]
    InvalidTimestamp(String),

    #[error("unknown issue type: '{0}'\n  hint: known types are: Epic, User Story, Task, Sub-Task, Dev Bug, Prod Bug")]
    UnknownIssueType(String),

    #[error("unknown status: '{0}'\n  hint: known statuses are: Open, On Hold, Backlog, Todo, To Do, In Progress, Blocked, Ready for Review, In Review, Approval, Rejected, Done, Closed")]
    UnknownStatus(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for tally-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
