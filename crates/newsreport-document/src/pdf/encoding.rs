// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// WinAnsi text encoding for the builtin (standard 14) fonts.
//
// printpdf writes builtin-font text operands as raw UTF-8, while viewers decode
// them with the font's single-byte encoding. `encode_builtin_text` rewrites
// every text-showing operand of a saved document into WinAnsi bytes and pins
// `/Encoding /WinAnsiEncoding` on each Type1 font so the two agree.

use lopdf::content::Content;
use lopdf::{Document, Object};
use newsreport_core::error::{ReportError, Result};
use tracing::{debug, instrument};

/// Byte written for characters WinAnsi cannot represent.
pub const UNMAPPABLE: u8 = b'?';

/// Encode `text` as WinAnsi (Windows-1252). Characters outside the code page
/// become [`UNMAPPABLE`].
pub fn to_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_byte).collect()
}

fn win_ansi_byte(c: char) -> u8 {
    match c as u32 {
        0x20..=0x7E | 0xA0..=0xFF => c as u8,
        0x09 | 0x0A | 0x0D => c as u8,
        _ => match c {
            '€' => 0x80,
            '‚' => 0x82,
            'ƒ' => 0x83,
            '„' => 0x84,
            '…' => 0x85,
            '†' => 0x86,
            '‡' => 0x87,
            'ˆ' => 0x88,
            '‰' => 0x89,
            'Š' => 0x8A,
            '‹' => 0x8B,
            'Œ' => 0x8C,
            'Ž' => 0x8E,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '˜' => 0x98,
            '™' => 0x99,
            'š' => 0x9A,
            '›' => 0x9B,
            'œ' => 0x9C,
            'ž' => 0x9E,
            'Ÿ' => 0x9F,
            _ => UNMAPPABLE,
        },
    }
}

/// Re-encode the text of a saved PDF for its builtin fonts.
#[instrument(skip_all, fields(bytes_len = pdf.len()))]
pub fn encode_builtin_text(pdf: &[u8]) -> Result<Vec<u8>> {
    let mut doc = Document::load_mem(pdf).map_err(pdf_error)?;

    let mut rewritten = 0usize;
    for (_, page_id) in doc.get_pages() {
        let mut content = doc.get_and_decode_page_content(page_id).map_err(pdf_error)?;
        rewritten += transcode_operations(&mut content);
        let encoded = content.encode().map_err(pdf_error)?;
        doc.change_page_content(page_id, encoded).map_err(pdf_error)?;
    }

    for object in doc.objects.values_mut() {
        if let Object::Dictionary(dict) = object
            && dict.get(b"Type").and_then(Object::as_name).is_ok_and(|n| n == b"Font")
            && dict.get(b"Subtype").and_then(Object::as_name).is_ok_and(|n| n == b"Type1")
        {
            dict.set("Encoding", Object::Name(b"WinAnsiEncoding".to_vec()));
        }
    }

    doc.compress();
    let mut output = Vec::with_capacity(pdf.len());
    doc.save_to(&mut output)
        .map_err(|err| ReportError::Pdf(format!("failed to re-save PDF: {err}")))?;
    debug!(operands = rewritten, "Text re-encoded as WinAnsi");
    Ok(output)
}

/// Rewrite the string operands of `Tj`, `TJ`, `'` and `"`. Returns how many
/// strings were touched.
fn transcode_operations(content: &mut Content) -> usize {
    let mut count = 0;
    for op in &mut content.operations {
        if !matches!(op.operator.as_str(), "Tj" | "TJ" | "'" | "\"") {
            continue;
        }
        for operand in &mut op.operands {
            count += transcode_object(operand);
        }
    }
    count
}

fn transcode_object(object: &mut Object) -> usize {
    match object {
        Object::String(bytes, _) => {
            let text = String::from_utf8_lossy(bytes).into_owned();
            *bytes = to_win_ansi(&text);
            1
        }
        Object::Array(items) => items.iter_mut().map(transcode_object).sum(),
        _ => 0,
    }
}

fn pdf_error(err: lopdf::Error) -> ReportError {
    ReportError::Pdf(format!("failed to re-encode text: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::StringFormat;
    use lopdf::content::Operation;

    #[test]
    fn ascii_passes_through() {
        assert_eq!(to_win_ansi("Total Articles"), b"Total Articles".to_vec());
    }

    #[test]
    fn latin1_letters_are_single_bytes() {
        assert_eq!(to_win_ansi("Économie"), b"\xC9conomie".to_vec());
        assert_eq!(to_win_ansi("Café"), b"Caf\xE9".to_vec());
    }

    #[test]
    fn typographic_punctuation_uses_the_c1_block() {
        assert_eq!(to_win_ansi("“quoted” — €"), b"\x93quoted\x94 \x97 \x80".to_vec());
    }

    #[test]
    fn characters_outside_the_code_page_are_replaced() {
        assert_eq!(to_win_ansi("日本語"), b"???".to_vec());
        // C1 control characters have no glyph either.
        assert_eq!(to_win_ansi("\u{0085}"), b"?".to_vec());
    }

    #[test]
    fn only_text_operators_are_rewritten() {
        let utf8 = |s: &str| Object::String(s.as_bytes().to_vec(), StringFormat::Literal);
        let mut content = Content {
            operations: vec![
                Operation::new("Tj", vec![utf8("Économie")]),
                Operation::new("TJ", vec![Object::Array(vec![utf8("é"), Object::Integer(120), utf8("€")])]),
                Operation::new("Tf", vec![Object::Name(b"F1".to_vec()), Object::Integer(12)]),
            ],
        };

        assert_eq!(transcode_operations(&mut content), 3);

        let bytes = |object: &Object| match object {
            Object::String(bytes, _) => bytes.clone(),
            other => panic!("expected a string operand, got {other:?}"),
        };
        assert_eq!(bytes(&content.operations[0].operands[0]), b"\xC9conomie".to_vec());
        match &content.operations[1].operands[0] {
            Object::Array(items) => {
                assert_eq!(bytes(&items[0]), vec![0xE9]);
                assert!(matches!(items[1], Object::Integer(120)));
                assert_eq!(bytes(&items[2]), vec![0x80]);
            }
            other => panic!("expected an array operand, got {other:?}"),
        }
        assert!(matches!(&content.operations[2].operands[0], Object::Name(name) if name == b"F1"));
    }

    #[test]
    fn garbage_input_is_pdf_error() {
        assert!(matches!(encode_builtin_text(b"not a pdf"), Err(ReportError::Pdf(_))));
    }
}
