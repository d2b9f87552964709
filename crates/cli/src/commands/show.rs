// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The `show` command: one issue's reconstructed timeline.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use tally_core::{time, Issue, Project, Rejections};

use crate::cli::OutputFormat;
use crate::display;
use crate::error::{Error, Result};

/// JSON representation of one reconstructed interval.
#[derive(Serialize)]
struct IntervalJson {
    status: String,
    from: String,
    to: String,
    seconds: i64,
}

/// JSON output structure for the show command.
#[derive(Serialize)]
struct ShowJson {
    key: String,
    issue_type: String,
    status: String,
    priority: String,
    created: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    creator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    assignee: Option<String>,
    status_flow: Vec<String>,
    intervals: Vec<IntervalJson>,
    time_in_status: BTreeMap<String, i64>,
    rejections: Rejections,
    assignees: Vec<String>,
}

pub fn run(project_dir: &Path, key: &str, output: OutputFormat) -> Result<()> {
    let (project, _) = Project::load(project_dir)?;
    let issue = project
        .issues
        .iter()
        .find(|issue| issue.key == key)
        .ok_or_else(|| Error::IssueNotFound(key.to_string()))?;

    let now = time::now_fixed();
    let rendered = match output {
        OutputFormat::Text => render_text(issue, now)?,
        OutputFormat::Json => render_json(issue, now)?,
    };
    println!("{}", rendered);
    Ok(())
}

fn render_text(issue: &Issue, now: DateTime<FixedOffset>) -> Result<String> {
    let mut out: Vec<String> = Vec::new();

    out.push(format!("[{}] {}", issue.issue_type, issue.key));
    out.push(format!("Status: {}", issue.status));
    out.push(format!("Priority: {}", issue.priority));
    out.push(format!("Created: {}", display::timestamp(&issue.created)));
    if let Some(creator) = &issue.creator {
        out.push(format!("Creator: {}", creator));
    }
    if let Some(assignee) = &issue.assignee {
        out.push(format!("Assignee: {}", assignee));
    }

    let flow = issue.status_flow();
    if !flow.is_empty() {
        out.push(display::title("Status flow"));
        out.push(flow.join(" -> "));
    }

    out.push(display::title("Status intervals"));
    for interval in issue.status_intervals(now)? {
        out.push(format!(
            "{}  ->  {}  {} ({})",
            display::timestamp(&interval.from),
            display::timestamp(&interval.to),
            interval.status,
            display::duration(interval.seconds())
        ));
    }

    out.push(display::title("Time in status"));
    for (status, seconds) in issue.status_seconds(now)? {
        out.push(display::bullet(&status, display::duration(seconds)));
    }

    let rejections = issue.rejections();
    out.push(display::title("Rejections"));
    out.push(display::bullet("In Review", rejections.in_review));
    out.push(display::bullet("Approval", rejections.approval));

    let assignees = issue.assignees();
    if !assignees.is_empty() {
        out.push(display::title("Assignee history"));
        for name in assignees {
            out.push(format!("- {}", name));
        }
    }

    Ok(out.join("\n"))
}

fn render_json(issue: &Issue, now: DateTime<FixedOffset>) -> Result<String> {
    let intervals = issue
        .status_intervals(now)?
        .into_iter()
        .map(|interval| IntervalJson {
            seconds: interval.seconds(),
            status: interval.status,
            from: interval.from.to_rfc3339(),
            to: interval.to.to_rfc3339(),
        })
        .collect();

    let view = ShowJson {
        key: issue.key.clone(),
        issue_type: issue.issue_type.clone(),
        status: issue.status.clone(),
        priority: issue.priority.clone(),
        created: issue.created.to_rfc3339(),
        creator: issue.creator.clone(),
        assignee: issue.assignee.clone(),
        status_flow: issue.status_flow(),
        intervals,
        time_in_status: issue.status_seconds(now)?,
        rejections: issue.rejections(),
        assignees: issue.assignees(),
    };

    Ok(serde_json::to_string_pretty(&view)?)
}

#[cfg(test)]
#[path = "show_tests.rs"]
mod tests;
