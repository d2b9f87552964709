// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! tally-core: Shared library for the tally issue analytics tool
//!
//! This crate provides the raw export record model, the typed [`Issue`] with
//! its changelog-derived views (status timeline, status flow, per-status
//! activity), and the [`Project`] aggregator used by the tally CLI.

pub mod error;
pub mod issue;
pub mod project;
pub mod record;
pub mod time;

pub use error::{Error, Result};
pub use issue::{
    FieldChange, Issue, IssueType, Rejections, Status, StatusInterval, UNKNOWN_STATUS,
};
pub use project::{ActivitySummary, BodyStats, LoadReport, Project, SkippedFile};
pub use record::RawRecord;
pub use time::{now_fixed, pairwise, parse_timestamp, seconds_to_human};
