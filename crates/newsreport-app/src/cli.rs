// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line arguments and their merge onto `ReportConfig`.
//
// Precedence: flag > config file > built-in default.

use std::path::PathBuf;

use clap::Parser;
use newsreport_core::error::Result;
use newsreport_core::{LogoSource, PaperSize, ReportConfig};

#[derive(Debug, Parser)]
#[command(
    name = "newsreport",
    version,
    about = "Generate a PDF activity report from a news-reader data export"
)]
pub struct Cli {
    /// News-reader export to read [default: sample_news_data.json]
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Where to write the PDF [default: news_report.pdf]
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// JSON config file; flags override its values
    #[arg(short, long, value_name = "PATH", env = "NEWSREPORT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Title-page logo as an http(s) URL or a local file
    #[arg(long, value_name = "URL|PATH", conflicts_with = "no_logo")]
    pub logo: Option<String>,

    /// Skip the logo and draw an empty frame in its place
    #[arg(long)]
    pub no_logo: bool,

    /// Give up on the logo fetch after this many seconds
    #[arg(long, value_name = "SECS")]
    pub logo_timeout: Option<u64>,

    /// Page size: letter, a4, or legal
    #[arg(long, value_name = "SIZE")]
    pub paper: Option<PaperSize>,

    /// Also write the computed summary as pretty-printed JSON
    #[arg(long, value_name = "PATH")]
    pub summary_json: Option<PathBuf>,
}

impl Cli {
    /// Build the effective configuration for this run.
    pub fn resolve_config(&self) -> Result<ReportConfig> {
        let mut config = match &self.config {
            Some(path) => ReportConfig::load(path)?,
            None => ReportConfig::default(),
        };

        if let Some(input) = &self.input {
            config.input_path = input.clone();
        }
        if let Some(output) = &self.output {
            config.output_path = output.clone();
        }
        if let Some(logo) = &self.logo {
            config.logo = Some(LogoSource::parse(logo));
        }
        if self.no_logo {
            config.logo = None;
        }
        if let Some(secs) = self.logo_timeout {
            config.logo_timeout_secs = secs;
        }
        if let Some(paper) = self.paper {
            config.paper_size = paper;
        }

        config.validate()?;
        Ok(config)
    }
}
