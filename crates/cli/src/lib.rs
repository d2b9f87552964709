// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! tallyrs - Analytics reports over issue-tracker exports.
//!
//! This crate provides the functionality behind the `tally` CLI: it loads a
//! directory of exported tickets through [`tally_core`] and renders the
//! portfolio report and per-issue timeline views.
//!
//! # Main Components
//!
//! - [`Cli`] / [`Command`] - clap argument surface
//! - [`run`] - command dispatch, the testable entry point
//! - [`error`] - error types for all operations

mod cli;
mod commands;
mod display;

pub mod error;

pub use cli::{Cli, Command, OutputFormat};
pub use error::{Error, Result};

use clap::CommandFactory;
use clap_complete::generate;

/// Execute a CLI command. This is the main entry point for library users
/// and provides a testable way to run commands without process execution.
pub fn run(command: Command) -> Result<()> {
    match command {
        Command::Report {
            project,
            output,
            show_skipped,
        } => commands::report::run(&project, output, show_skipped),
        Command::Show {
            key,
            project,
            output,
        } => commands::show::run(&project, &key, output),
        Command::Completion { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "tally", &mut std::io::stdout());
            Ok(())
        }
    }
}
