// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The `report` command: the full portfolio analytics report.

use std::path::Path;

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use tally_core::project::{ActivitySummary, BodyStats, LoadReport};
use tally_core::{time, Project};

use crate::cli::OutputFormat;
use crate::display;
use crate::error::Result;

/// JSON representation of one type's body size figures.
#[derive(Serialize)]
struct TypeSizesJson {
    issue_type: String,
    #[serde(flatten)]
    stats: BodyStats,
}

/// JSON representation of one status count.
#[derive(Serialize)]
struct StatusCountJson {
    status: String,
    count: usize,
}

/// JSON representation of one type's status breakdown.
#[derive(Serialize)]
struct TypeStatusJson {
    issue_type: String,
    total: usize,
    statuses: Vec<StatusCountJson>,
}

/// JSON representation of one averaged time-in-status figure.
#[derive(Serialize)]
struct StatusDurationJson {
    status: String,
    avg_seconds: i64,
    human: String,
}

/// JSON representation of one type's time-in-status averages.
#[derive(Serialize)]
struct TypeTimeJson {
    issue_type: String,
    statuses: Vec<StatusDurationJson>,
}

/// JSON representation of one skipped input file.
#[derive(Serialize)]
struct SkippedFileJson {
    path: String,
    reason: String,
}

/// JSON output structure for the report command.
#[derive(Serialize)]
struct ReportJson {
    generated_at: String,
    loaded: usize,
    body_sizes: Vec<TypeSizesJson>,
    status_distribution: Vec<StatusCountJson>,
    type_status_distribution: Vec<TypeStatusJson>,
    activity: ActivitySummary,
    time_in_status: Vec<TypeTimeJson>,
    #[serde(skip_serializing_if = "Option::is_none")]
    skipped: Option<Vec<SkippedFileJson>>,
}

pub fn run(project_dir: &Path, output: OutputFormat, show_skipped: bool) -> Result<()> {
    let (project, load) = Project::load(project_dir)?;
    tracing::info!(
        "loaded {} issues from {} ({} skipped)",
        load.loaded,
        project_dir.display(),
        load.skipped.len()
    );

    let now = time::now_fixed();
    let rendered = match output {
        OutputFormat::Text => render_text(&project, &load, now, show_skipped)?,
        OutputFormat::Json => render_json(&project, &load, now, show_skipped)?,
    };
    println!("{}", rendered);
    Ok(())
}

fn render_text(
    project: &Project,
    load: &LoadReport,
    now: DateTime<FixedOffset>,
    show_skipped: bool,
) -> Result<String> {
    let mut out: Vec<String> = Vec::new();

    // Level of detail per type
    for (issue_type, stats) in project.body_size_stats()? {
        out.push(display::title(&format!("{} ({})", issue_type, stats.issues)));
        out.push(format!(
            "Average description size: {:.2} lines",
            stats.avg_description_lines
        ));
        out.push(format!(
            "Average acceptance criteria size: {:.2} lines",
            stats.avg_acceptance_criteria_lines
        ));
        out.push(format!(
            "Average how to test size: {:.2} lines",
            stats.avg_how_to_test_lines
        ));
    }

    out.push(display::title("Issue distribution by status (overall)"));
    for (status, count) in project.status_counts()? {
        out.push(display::bullet(&status, count));
    }

    out.push(display::title("Issue distribution by type and status"));
    for (issue_type, statuses) in project.type_status_counts()? {
        let total: usize = statuses.iter().map(|(_, count)| count).sum();
        out.push(format!("+ {}: {}", issue_type, total));
        for (status, count) in statuses {
            out.push(display::sub_bullet(&status, count));
        }
    }

    let activity = project.activity_by_status(now)?;
    out.push(display::title("Number of updates in status"));
    push_activity(&mut out, "Description", &activity.description);
    push_activity(&mut out, "Acceptance criteria", &activity.acceptance_criteria);
    push_activity(&mut out, "How to test", &activity.how_to_test);
    push_activity(&mut out, "Comments", &activity.comments);

    out.push(display::title("Average time spent in status"));
    for (issue_type, statuses) in project.time_in_status_by_type(now)? {
        out.push(display::group(&issue_type));
        for (status, seconds) in statuses {
            out.push(display::sub_bullet(&status, display::duration(seconds)));
        }
    }

    if show_skipped {
        out.push(display::title("Skipped files"));
        if load.skipped.is_empty() {
            out.push("(none)".to_string());
        }
        for skip in &load.skipped {
            out.push(display::bullet(&skip.path.display().to_string(), &skip.reason));
        }
    }

    Ok(out.join("\n"))
}

fn push_activity(
    out: &mut Vec<String>,
    label: &str,
    counts: &std::collections::BTreeMap<String, usize>,
) {
    out.push(display::group(label));
    for (status, count) in counts {
        out.push(display::sub_bullet(status, count));
    }
}

fn render_json(
    project: &Project,
    load: &LoadReport,
    now: DateTime<FixedOffset>,
    show_skipped: bool,
) -> Result<String> {
    let body_sizes = project
        .body_size_stats()?
        .into_iter()
        .map(|(issue_type, stats)| TypeSizesJson { issue_type, stats })
        .collect();

    let status_distribution = project
        .status_counts()?
        .into_iter()
        .map(|(status, count)| StatusCountJson { status, count })
        .collect();

    let type_status_distribution = project
        .type_status_counts()?
        .into_iter()
        .map(|(issue_type, statuses)| {
            let statuses: Vec<StatusCountJson> = statuses
                .into_iter()
                .map(|(status, count)| StatusCountJson { status, count })
                .collect();
            TypeStatusJson {
                issue_type,
                total: statuses.iter().map(|entry| entry.count).sum(),
                statuses,
            }
        })
        .collect();

    let time_in_status = project
        .time_in_status_by_type(now)?
        .into_iter()
        .map(|(issue_type, statuses)| TypeTimeJson {
            issue_type,
            statuses: statuses
                .into_iter()
                .map(|(status, avg_seconds)| StatusDurationJson {
                    status,
                    avg_seconds,
                    human: display::duration(avg_seconds),
                })
                .collect(),
        })
        .collect();

    let skipped = show_skipped.then(|| {
        load.skipped
            .iter()
            .map(|skip| SkippedFileJson {
                path: skip.path.display().to_string(),
                reason: skip.reason.clone(),
            })
            .collect()
    });

    let report = ReportJson {
        generated_at: now.to_rfc3339(),
        loaded: load.loaded,
        body_sizes,
        status_distribution,
        type_status_distribution,
        activity: project.activity_by_status(now)?,
        time_in_status,
        skipped,
    };

    Ok(serde_json::to_string_pretty(&report)?)
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
