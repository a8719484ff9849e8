// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF module — page flow, tables, builtin-font text encoding, and reading
// generated documents back.

pub mod encoding;
pub mod layout;
pub mod reader;
pub mod table;

pub use layout::PageComposer;
pub use reader::PdfReader;
pub use table::{Table, TableStyle};
