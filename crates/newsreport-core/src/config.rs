// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Report configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ReportError, Result};
use crate::types::{LogoSource, PaperSize};

/// Settings for a single report run.
///
/// Every field has a default, so a config file only needs to name the values it
/// changes. Command-line flags are applied on top by the binary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// News-reader export to read.
    pub input_path: PathBuf,
    /// Destination of the generated PDF (overwritten if present).
    pub output_path: PathBuf,
    /// Title embedded in the PDF /Info dictionary.
    pub title: String,
    /// Page size for every page of the report.
    pub paper_size: PaperSize,
    /// Title-page logo; `None` renders the placeholder frame without fetching.
    pub logo: Option<LogoSource>,
    /// Upper bound on the logo fetch, in seconds.
    pub logo_timeout_secs: u64,
    /// Largest logo body accepted, in bytes.
    pub logo_max_bytes: u64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("sample_news_data.json"),
            output_path: PathBuf::from("news_report.pdf"),
            title: "News Content Reader Report".to_string(),
            paper_size: PaperSize::Letter,
            logo: Some(LogoSource::default()),
            logo_timeout_secs: 10,
            logo_max_bytes: 5 * 1024 * 1024,
        }
    }
}

impl ReportConfig {
    /// Read a JSON config file. Missing keys keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|err| {
            ReportError::Config(format!("cannot read {}: {err}", path.display()))
        })?;
        let config: Self = serde_json::from_str(&raw).map_err(|err| {
            ReportError::Config(format!("cannot parse {}: {err}", path.display()))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.logo_timeout_secs == 0 {
            return Err(ReportError::Config(
                "logo_timeout_secs must be greater than zero".into(),
            ));
        }
        if self.logo_max_bytes == 0 {
            return Err(ReportError::Config(
                "logo_max_bytes must be greater than zero".into(),
            ));
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(ReportError::Config("output_path must not be empty".into()));
        }
        Ok(())
    }
}
