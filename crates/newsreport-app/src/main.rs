// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Newsreport — PDF activity report for a news-reader data export
//
// Entry point. Initialises logging, resolves configuration, runs the pipeline,
// and turns any failure into a plain-English diagnostic on stderr.

mod cli;
mod pipeline;

use std::process::ExitCode;

use clap::Parser;
use newsreport_core::ReportError;
use newsreport_core::human_errors::{Severity, humanize_error};

use cli::Cli;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "Run failed");
            report_failure(&err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), ReportError> {
    let config = cli.resolve_config()?;
    let outcome = pipeline::run(
        &config,
        cli.summary_json.as_deref(),
        &mut std::io::stdout().lock(),
    )?;
    tracing::info!(
        pages = outcome.pages,
        articles = outcome.summary.total_articles,
        path = %outcome.output_path.display(),
        "Report complete"
    );
    Ok(())
}

fn report_failure(err: &ReportError) {
    let human = humanize_error(err);
    let label = match human.severity {
        Severity::InputProblem => "error",
        Severity::Environment => "error (environment)",
        Severity::Internal => "internal error",
    };
    eprintln!("{label}: {}", human.message);
    eprintln!("  hint: {}", human.suggestion);
    eprintln!("  detail: {err}");
    if err.is_input_error() {
        eprintln!("  No report was written.");
    }
}
