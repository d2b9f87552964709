// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// Output format for commands supporting structured output.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Descriptive statistics and time-in-status analytics for issue-tracker exports")]
#[command(
    long_about = "Descriptive statistics and time-in-status analytics for issue-tracker exports.\n\n\
    Point it at a directory of exported *.json tickets; it reconstructs each issue's\n\
    status timeline from its changelog and reports portfolio-level figures."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the full analytics report for a project export
    #[command(after_help = "Examples:\n  \
        tally report                       Report over ./project\n  \
        tally report -p ./export           Report over a specific directory\n  \
        tally report -o json               Machine-readable report\n  \
        tally report --show-skipped        Include files the loader gave up on")]
    Report {
        /// Directory containing the exported *.json issue files
        #[arg(long, short, default_value = "./project")]
        project: PathBuf,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        output: OutputFormat,

        /// List files that were skipped during loading
        #[arg(long)]
        show_skipped: bool,
    },

    /// Show one issue's reconstructed timeline
    #[command(after_help = "Examples:\n  \
        tally show PROJ-123                Inspect one issue\n  \
        tally show PROJ-123 -o json        Machine-readable view")]
    Show {
        /// Issue key, e.g. PROJ-123
        key: String,

        /// Directory containing the exported *.json issue files
        #[arg(long, short, default_value = "./project")]
        project: PathBuf,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        shell: Shell,
    },
}
