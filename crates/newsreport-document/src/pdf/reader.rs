// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF reader — reopen a generated report with `lopdf` to confirm it is a
// well-formed document and to inspect its page tree and metadata.

use std::path::Path;

use lopdf::{Document, Object};
use newsreport_core::error::ReportError;
use tracing::{debug, instrument};

/// Read-only view of an existing PDF.
pub struct PdfReader {
    document: Document,
}

impl PdfReader {
    /// Open a PDF from the filesystem.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ReportError> {
        let path_ref = path.as_ref();
        let document = Document::load(path_ref).map_err(|err| {
            ReportError::Pdf(format!("failed to open {}: {}", path_ref.display(), err))
        })?;
        debug!(pages = document.get_pages().len(), "PDF loaded");
        Ok(Self { document })
    }

    /// Create a reader from raw PDF bytes already in memory.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self, ReportError> {
        let document = Document::load_mem(data).map_err(|err| {
            ReportError::Pdf(format!("failed to load PDF from memory: {}", err))
        })?;
        debug!(pages = document.get_pages().len(), "PDF loaded from bytes");
        Ok(Self { document })
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    /// Text of every page in page order, decoded through each font's encoding.
    pub fn text(&self) -> Result<String, ReportError> {
        let pages: Vec<u32> = self.document.get_pages().keys().copied().collect();
        self.document
            .extract_text(&pages)
            .map_err(|err| ReportError::Pdf(format!("failed to extract text: {err}")))
    }

    /// `/Title` from the document information dictionary, if present.
    pub fn title(&self) -> Option<String> {
        let info = match self.document.trailer.get(b"Info").ok()? {
            Object::Reference(id) => self.document.get_dictionary(*id).ok()?,
            Object::Dictionary(dict) => dict,
            _ => return None,
        };
        match info.get(b"Title").ok()? {
            Object::String(bytes, _) => Some(decode_text_string(bytes)),
            _ => None,
        }
    }
}

/// Decode a PDF text string: UTF-16BE when it carries a byte-order mark,
/// otherwise treated as single-byte text.
fn decode_text_string(bytes: &[u8]) -> String {
    if let Some(utf16) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = utf16
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16_lossy(&units)
    } else {
        bytes.iter().map(|&b| b as char).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_is_rejected() {
        let result = PdfReader::from_bytes(b"not a pdf at all");
        assert!(matches!(result, Err(ReportError::Pdf(_))));
    }

    #[test]
    fn decodes_utf16_titles() {
        let bytes = [0xFE, 0xFF, 0x00, 0x4E, 0x00, 0x65, 0x00, 0x77, 0x00, 0x73];
        assert_eq!(decode_text_string(&bytes), "News");
    }

    #[test]
    fn decodes_single_byte_titles() {
        assert_eq!(decode_text_string(b"News Report"), "News Report");
    }
}
