// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// newsreport-document — the rendering stage of the Newsreport pipeline.
//
// Provides flow layout and grid tables over printpdf operation lists, the
// report renderer that lays out a `Summary`, logo fetching and image
// preparation, and a lopdf-based reader used to verify generated output.

pub mod image;
pub mod pdf;
pub mod report;

// Re-export the primary structs so callers can use `newsreport_document::ReportRenderer` etc.
pub use self::image::{ImageProcessor, LogoLoader};
pub use pdf::reader::PdfReader;
pub use report::ReportRenderer;
