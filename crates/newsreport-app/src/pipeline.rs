// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Load -> analyze -> render, with one progress line per stage.

use std::io::Write;
use std::path::{Path, PathBuf};

use newsreport_core::error::Result;
use newsreport_core::{ReportConfig, Summary};
use newsreport_document::ReportRenderer;
use tracing::{info, instrument};

/// What a successful run produced.
#[derive(Debug)]
pub struct Outcome {
    pub output_path: PathBuf,
    pub pages: usize,
    pub summary: Summary,
}

/// Run the whole pipeline, writing progress lines to `progress`.
#[instrument(skip_all, fields(input = %config.input_path.display()))]
pub fn run(
    config: &ReportConfig,
    summary_json: Option<&Path>,
    progress: &mut impl Write,
) -> Result<Outcome> {
    writeln!(progress, "Loading data...")?;
    let export = newsreport_analysis::load_export(&config.input_path)?;

    writeln!(progress, "Analyzing data...")?;
    let summary = newsreport_analysis::analyze(&export);
    info!(
        articles = summary.total_articles,
        categories = summary.category_counts.len(),
        "Summary computed"
    );

    if let Some(path) = summary_json {
        write_summary_json(&summary, path)?;
    }

    writeln!(progress, "Generating PDF report...")?;
    let pages = ReportRenderer::new(config).write_to_file(&summary, &config.output_path)?;

    writeln!(
        progress,
        "Report generated successfully: {}",
        config.output_path.display()
    )?;

    Ok(Outcome {
        output_path: config.output_path.clone(),
        pages,
        summary,
    })
}

fn write_summary_json(summary: &Summary, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(summary)?;
    std::fs::write(path, json)?;
    info!(path = %path.display(), "Summary JSON written");
    Ok(())
}
