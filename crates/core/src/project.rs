// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The loaded issue collection and portfolio-level aggregation.
//!
//! A [`Project`] owns its issues (per instance, never shared) and folds
//! their derived series into the figures the report renders: per-type body
//! sizes, status distributions, per-status activity, and average
//! time-in-status.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::error::Result;
use crate::issue::{Issue, IssueType, Status};
use crate::record::RawRecord;

/// Outcome of a bulk load: how many files became issues, and which files
/// were skipped with why. Skipping is per-file and best-effort; a bad
/// record never aborts the load and never produces a partial issue.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: Vec<SkippedFile>,
}

/// One file the loader gave up on.
#[derive(Debug, Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// The full issue collection plus the grouping/ordering policy.
#[derive(Debug, Default)]
pub struct Project {
    pub issues: Vec<Issue>,
}

/// Per-type body size figures. The -1 empty-body quirk of the line
/// counters flows into these averages unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BodyStats {
    pub issues: usize,
    pub avg_description_lines: f64,
    pub avg_acceptance_criteria_lines: f64,
    pub avg_how_to_test_lines: f64,
}

/// Per-status update and comment counts summed across the whole project.
#[derive(Debug, Default, PartialEq, Serialize)]
pub struct ActivitySummary {
    pub description: BTreeMap<String, usize>,
    pub acceptance_criteria: BTreeMap<String, usize>,
    pub how_to_test: BTreeMap<String, usize>,
    pub comments: BTreeMap<String, usize>,
}

impl Project {
    /// A project over an already-constructed issue collection.
    pub fn from_issues(issues: Vec<Issue>) -> Self {
        Project { issues }
    }

    /// Loads every `*.json` file directly under `dir` (one level deep, not
    /// recursive). Files that fail to read, parse, or construct are
    /// recorded in the returned [`LoadReport`] and skipped whole. An
    /// unreadable directory is a hard error.
    pub fn load(dir: &Path) -> Result<(Self, LoadReport)> {
        let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|entry| entry.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .collect();
        // read_dir order is platform-dependent
        paths.sort();

        let mut issues = Vec::new();
        let mut report = LoadReport::default();

        for path in paths {
            match load_one(&path) {
                Ok(issue) => {
                    issues.push(issue);
                    report.loaded += 1;
                }
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                    report.skipped.push(SkippedFile {
                        path,
                        reason: e.to_string(),
                    });
                }
            }
        }

        Ok((Project { issues }, report))
    }

    /// Per-type issue counts and mean body sizes, canonically ordered.
    pub fn body_size_stats(&self) -> Result<Vec<(String, BodyStats)>> {
        let refs: Vec<&Issue> = self.issues.iter().collect();
        Ok(group_by_type(&refs)?
            .into_iter()
            .map(|(issue_type, group)| {
                let stats = BodyStats {
                    issues: group.len(),
                    avg_description_lines: mean_by(&group, Issue::description_lines),
                    avg_acceptance_criteria_lines: mean_by(&group, Issue::acceptance_criteria_lines),
                    avg_how_to_test_lines: mean_by(&group, Issue::how_to_test_lines),
                };
                (issue_type, stats)
            })
            .collect())
    }

    /// Overall issue count per status, canonically ordered.
    pub fn status_counts(&self) -> Result<Vec<(String, usize)>> {
        let refs: Vec<&Issue> = self.issues.iter().collect();
        Ok(group_by_status(&refs)?
            .into_iter()
            .map(|(status, group)| (status, group.len()))
            .collect())
    }

    /// Issue count per status within each type, both levels canonically
    /// ordered.
    pub fn type_status_counts(&self) -> Result<Vec<(String, Vec<(String, usize)>)>> {
        let refs: Vec<&Issue> = self.issues.iter().collect();
        group_by_type(&refs)?
            .into_iter()
            .map(|(issue_type, group)| {
                let counts = group_by_status(&group)?
                    .into_iter()
                    .map(|(status, status_group)| (status, status_group.len()))
                    .collect();
                Ok((issue_type, counts))
            })
            .collect()
    }

    /// Update and comment counts per status, summed over every issue.
    pub fn activity_by_status(&self, now: DateTime<FixedOffset>) -> Result<ActivitySummary> {
        let mut summary = ActivitySummary::default();
        for issue in &self.issues {
            merge_counts(&mut summary.description, issue.description_update_distribution(now)?);
            merge_counts(
                &mut summary.acceptance_criteria,
                issue.acceptance_criteria_update_distribution(now)?,
            );
            merge_counts(&mut summary.how_to_test, issue.how_to_test_update_distribution(now)?);
            merge_counts(&mut summary.comments, issue.comment_distribution(now)?);
        }
        Ok(summary)
    }

    /// Mean seconds-in-status per issue type, restricted to issues whose
    /// status flow passed through "Todo" (work that was actually queued
    /// before being picked up). Statuses are canonically ordered.
    pub fn time_in_status_by_type(
        &self,
        now: DateTime<FixedOffset>,
    ) -> Result<Vec<(String, Vec<(String, i64)>)>> {
        let todo = Status::Todo.as_str();
        let queued: Vec<&Issue> = self
            .issues
            .iter()
            .filter(|issue| issue.status_flow().iter().any(|status| status == todo))
            .collect();

        group_by_type(&queued)?
            .into_iter()
            .map(|(issue_type, group)| {
                let mut per_status: BTreeMap<String, Vec<i64>> = BTreeMap::new();
                for issue in &group {
                    for (status, total) in issue.status_seconds(now)? {
                        per_status.entry(status).or_default().push(total);
                    }
                }
                let averaged: Vec<(String, i64)> = per_status
                    .into_iter()
                    .map(|(status, totals)| (status, mean(&totals) as i64))
                    .collect();
                Ok((issue_type, sort_by_status_order(averaged)?))
            })
            .collect()
    }
}

fn load_one(path: &Path) -> Result<Issue> {
    let contents = fs::read_to_string(path)?;
    let record: RawRecord = serde_json::from_str(&contents)?;
    Issue::from_record(record)
}

/// Stable sort-then-group: equal keys become one contiguous bucket, and
/// the key function decides both the sort key and the bucket key.
pub fn group_issues<'a, K, F>(issues: &[&'a Issue], key: F) -> Vec<(K, Vec<&'a Issue>)>
where
    K: Ord + Clone,
    F: Fn(&Issue) -> K,
{
    let mut sorted: Vec<&Issue> = issues.to_vec();
    sorted.sort_by_key(|issue| key(issue));

    let mut groups: Vec<(K, Vec<&Issue>)> = Vec::new();
    for issue in sorted {
        let k = key(issue);
        let start_new = groups.last().map(|(current, _)| *current != k).unwrap_or(true);
        if start_new {
            groups.push((k, Vec::new()));
        }
        if let Some((_, bucket)) = groups.last_mut() {
            bucket.push(issue);
        }
    }
    groups
}

/// Groups issues by type name, in canonical type order.
pub fn group_by_type<'a>(issues: &[&'a Issue]) -> Result<Vec<(String, Vec<&'a Issue>)>> {
    sort_by_type_order(group_issues(issues, |issue| issue.issue_type.clone()))
}

/// Groups issues by status name, in canonical flow order.
pub fn group_by_status<'a>(issues: &[&'a Issue]) -> Result<Vec<(String, Vec<&'a Issue>)>> {
    sort_by_status_order(group_issues(issues, |issue| issue.status.clone()))
}

/// Reorders `(type, value)` entries into canonical type order. A key
/// outside the fixed taxonomy is a hard error, never silently dropped or
/// moved to the end.
pub fn sort_by_type_order<V>(entries: Vec<(String, V)>) -> Result<Vec<(String, V)>> {
    let mut ranked: Vec<(IssueType, String, V)> = entries
        .into_iter()
        .map(|(key, value)| {
            let rank = key.parse::<IssueType>()?;
            Ok((rank, key, value))
        })
        .collect::<Result<_>>()?;
    ranked.sort_by_key(|(rank, _, _)| *rank);
    Ok(ranked
        .into_iter()
        .map(|(_, key, value)| (key, value))
        .collect())
}

/// Reorders `(status, value)` entries into canonical flow order, with the
/// same closed-world contract as [`sort_by_type_order`].
pub fn sort_by_status_order<V>(entries: Vec<(String, V)>) -> Result<Vec<(String, V)>> {
    let mut ranked: Vec<(Status, String, V)> = entries
        .into_iter()
        .map(|(key, value)| {
            let rank = key.parse::<Status>()?;
            Ok((rank, key, value))
        })
        .collect::<Result<_>>()?;
    ranked.sort_by_key(|(rank, _, _)| *rank);
    Ok(ranked
        .into_iter()
        .map(|(_, key, value)| (key, value))
        .collect())
}

fn merge_counts(into: &mut BTreeMap<String, usize>, from: BTreeMap<String, usize>) {
    for (status, count) in from {
        *into.entry(status).or_insert(0) += count;
    }
}

fn mean(values: &[i64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<i64>() as f64 / values.len() as f64
}

fn mean_by<F>(issues: &[&Issue], value: F) -> f64
where
    F: Fn(&Issue) -> i64,
{
    if issues.is_empty() {
        return 0.0;
    }
    issues.iter().map(|issue| value(issue)).sum::<i64>() as f64 / issues.len() as f64
}

#[cfg(test)]
#[path = "project_tests.rs"]
mod tests;
