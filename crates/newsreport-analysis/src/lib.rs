// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// newsreport-analysis — the first two pipeline stages.
//
// `loader` turns a JSON export on disk into a `NewsExport`; `analyzer` reduces
// that export to the fixed-shape `Summary` the PDF renderer consumes.

pub mod analyzer;
pub mod loader;

pub use analyzer::{TOP_ARTICLE_LIMIT, analyze};
pub use loader::{load_export, parse_export};
