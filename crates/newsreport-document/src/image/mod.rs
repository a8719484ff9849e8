// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image module — fetch the title-page logo and prepare it for embedding.

pub mod logo;
pub mod processor;

pub use logo::LogoLoader;
pub use processor::ImageProcessor;
