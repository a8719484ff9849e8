// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Flow layout on top of printpdf 0.8 operation lists.
//
// `PageComposer` keeps a vertical cursor measured from the top edge of the
// page and appends `Op`s for the current page. When an element does not fit in
// the remaining space a new page is started. PDF coordinates have their origin
// at the bottom-left, so every draw call converts from top-relative positions.

use printpdf::graphics::{LinePoint, PaintMode, Polygon, PolygonRing, WindingOrder};
use printpdf::{BuiltinFont, Mm, Op, PdfPage, Point, Pt, Rgb, TextItem, XObjectId, XObjectTransform};
use tracing::debug;

use newsreport_core::PaperSize;

/// An 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);
    pub const GREY: Self = Self::new(128, 128, 128);
    pub const WHITESMOKE: Self = Self::new(245, 245, 245);
    /// Accent used for table header rows (#0891b2).
    pub const ACCENT: Self = Self::new(0x08, 0x91, 0xb2);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    fn to_pdf(self) -> printpdf::color::Color {
        printpdf::color::Color::Rgb(Rgb::new(
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            None,
        ))
    }
}

/// Horizontal placement of a line of text within its box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Font, size, and spacing for a run of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: BuiltinFont,
    pub size: f32,
    /// Baseline-to-baseline distance.
    pub leading: f32,
    /// Vertical gap after a paragraph in this style.
    pub space_after: f32,
    pub color: RgbColor,
    pub align: Align,
}

impl TextStyle {
    pub const fn new(font: BuiltinFont, size: f32, leading: f32) -> Self {
        Self {
            font,
            size,
            leading,
            space_after: 0.0,
            color: RgbColor::BLACK,
            align: Align::Left,
        }
    }

    pub const fn space_after(mut self, space_after: f32) -> Self {
        self.space_after = space_after;
        self
    }

    pub const fn color(mut self, color: RgbColor) -> Self {
        self.color = color;
        self
    }

    pub const fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub const fn font(mut self, font: BuiltinFont) -> Self {
        self.font = font;
        self
    }

    /// Offset from the top of a line box to the text baseline.
    fn baseline_offset(&self) -> f32 {
        (self.leading - self.size) / 2.0 + self.size * 0.78
    }
}

/// Approximate rendered width of `text` in points.
///
/// Builtin fonts are not embedded, so no glyph metrics are available here.
/// Average Helvetica glyph width is roughly half the font size; the bold face
/// runs about ten percent wider.
pub fn text_width(text: &str, font: BuiltinFont, size: f32) -> f32 {
    text.chars().count() as f32 * average_glyph_width(font, size)
}

fn average_glyph_width(font: BuiltinFont, size: f32) -> f32 {
    let factor = match font {
        BuiltinFont::HelveticaBold | BuiltinFont::HelveticaBoldOblique => 0.55,
        _ => 0.50,
    };
    factor * size
}

/// Wrap `text` so every line fits within `max_width` points.
pub fn wrap_to_width(text: &str, font: BuiltinFont, size: f32, max_width: f32) -> Vec<String> {
    let max_chars = (max_width / average_glyph_width(font, size)).floor().max(1.0) as usize;
    wrap_text(text, max_chars)
}

/// Wrap a multi-line string so that no line exceeds `max_width` characters.
///
/// Splits on existing newlines first, then performs simple word-wrap within each
/// paragraph. Words longer than `max_width` are force-broken.
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let max_width = max_width.max(1);
    let mut result = Vec::new();

    for paragraph in text.split('\n') {
        let words: Vec<&str> = paragraph.split_whitespace().collect();
        if words.is_empty() {
            result.push(String::new());
            continue;
        }

        let mut current_line = String::new();
        let mut current_len = 0usize;

        for word in words {
            let word_len = word.chars().count();
            if word_len > max_width {
                if !current_line.is_empty() {
                    result.push(std::mem::take(&mut current_line));
                }
                let chars: Vec<char> = word.chars().collect();
                let mut chunks = chars.chunks(max_width).peekable();
                while let Some(chunk) = chunks.next() {
                    if chunks.peek().is_some() {
                        result.push(chunk.iter().collect());
                    } else {
                        current_line = chunk.iter().collect();
                        current_len = chunk.len();
                    }
                }
            } else if current_line.is_empty() {
                current_line.push_str(word);
                current_len = word_len;
            } else if current_len + 1 + word_len <= max_width {
                current_line.push(' ');
                current_line.push_str(word);
                current_len += 1 + word_len;
            } else {
                result.push(std::mem::replace(&mut current_line, word.to_string()));
                current_len = word_len;
            }
        }

        if !current_line.is_empty() {
            result.push(current_line);
        }
    }

    result
}

/// Accumulates pages of printpdf operations with a top-down flow cursor.
pub struct PageComposer {
    width_pt: f32,
    height_pt: f32,
    margin_pt: f32,
    /// Distance from the top edge to the next free position.
    cursor_pt: f32,
    ops: Vec<Op>,
    pages: Vec<PdfPage>,
}

impl PageComposer {
    pub fn new(paper_size: PaperSize, margin_pt: f32) -> Self {
        let (width_pt, height_pt) = paper_size.dimensions_pt();
        Self {
            width_pt,
            height_pt,
            margin_pt,
            cursor_pt: margin_pt,
            ops: Vec::new(),
            pages: Vec::new(),
        }
    }

    pub fn page_width(&self) -> f32 {
        self.width_pt
    }

    pub fn left(&self) -> f32 {
        self.margin_pt
    }

    pub fn content_width(&self) -> f32 {
        self.width_pt - 2.0 * self.margin_pt
    }

    /// Vertical space left on the current page.
    pub fn remaining(&self) -> f32 {
        self.height_pt - self.margin_pt - self.cursor_pt
    }

    /// Distance of the cursor from the top edge of the page.
    pub fn cursor(&self) -> f32 {
        self.cursor_pt
    }

    /// Pages finished so far plus the one in progress.
    pub fn page_count(&self) -> usize {
        self.pages.len() + 1
    }

    fn at_page_top(&self) -> bool {
        self.cursor_pt <= self.margin_pt
    }

    /// Start a new page unless `height` still fits on this one. An element
    /// taller than a whole page is placed at the top of a fresh page.
    pub fn ensure_space(&mut self, height: f32) {
        if height > self.remaining() && !self.at_page_top() {
            self.page_break();
        }
    }

    /// Finish the current page and continue at the top of a new one.
    pub fn page_break(&mut self) {
        let ops = std::mem::take(&mut self.ops);
        self.pages.push(PdfPage::new(
            pt_to_mm(self.width_pt),
            pt_to_mm(self.height_pt),
            ops,
        ));
        self.cursor_pt = self.margin_pt;
        debug!(pages = self.pages.len(), "Page finished");
    }

    /// Advance the cursor. Spacing never carries over onto a new page.
    pub fn space(&mut self, height: f32) {
        if height >= self.remaining() {
            self.cursor_pt = self.height_pt - self.margin_pt;
        } else {
            self.cursor_pt += height;
        }
    }

    /// Lay out a wrapped paragraph across the content width.
    pub fn paragraph(&mut self, text: &str, style: &TextStyle) {
        let width = self.content_width();
        for line in wrap_to_width(text, style.font, style.size, width) {
            self.ensure_space(style.leading);
            let x = match style.align {
                Align::Left => self.left(),
                Align::Center => {
                    self.left() + (width - text_width(&line, style.font, style.size)) / 2.0
                }
                Align::Right => {
                    self.left() + width - text_width(&line, style.font, style.size)
                }
            };
            let top = self.cursor_pt;
            self.text_at(x, top, &line, style);
            self.cursor_pt += style.leading;
        }
        self.space(style.space_after);
    }

    /// Draw a single line of text whose line box starts `top` points below the
    /// top edge. Does not move the cursor.
    pub fn text_at(&mut self, x: f32, top: f32, text: &str, style: &TextStyle) {
        if text.is_empty() {
            return;
        }
        let baseline = self.height_pt - top - style.baseline_offset();
        self.ops.push(Op::SetFillColor {
            col: style.color.to_pdf(),
        });
        self.ops.push(Op::StartTextSection);
        self.ops.push(Op::SetTextCursor {
            pos: Point {
                x: Pt(x),
                y: Pt(baseline),
            },
        });
        self.ops.push(Op::SetFontSizeBuiltinFont {
            size: Pt(style.size),
            font: style.font,
        });
        self.ops.push(Op::WriteTextBuiltinFont {
            items: vec![TextItem::Text(text.to_string())],
            font: style.font,
        });
        self.ops.push(Op::EndTextSection);
    }

    /// Fill a rectangle given its top-left corner relative to the page top.
    pub fn fill_rect(&mut self, x: f32, top: f32, width: f32, height: f32, color: RgbColor) {
        let polygon = self.rect_polygon(x, top, width, height, PaintMode::Fill);
        self.ops.push(Op::SetFillColor { col: color.to_pdf() });
        self.ops.push(Op::DrawPolygon { polygon });
    }

    /// Outline a rectangle given its top-left corner relative to the page top.
    pub fn stroke_rect(
        &mut self,
        x: f32,
        top: f32,
        width: f32,
        height: f32,
        color: RgbColor,
        thickness: f32,
    ) {
        let polygon = self.rect_polygon(x, top, width, height, PaintMode::Stroke);
        self.ops.push(Op::SetOutlineThickness { pt: Pt(thickness) });
        self.ops.push(Op::SetOutlineColor { col: color.to_pdf() });
        self.ops.push(Op::DrawPolygon { polygon });
    }

    /// Place an image XObject so it covers the given box. The image is assumed
    /// to have been rasterised for `dpi`.
    pub fn image_at(&mut self, id: XObjectId, x: f32, top: f32, height: f32, dpi: f32) {
        self.ops.push(Op::UseXobject {
            id,
            transform: XObjectTransform {
                translate_x: Some(Pt(x)),
                translate_y: Some(Pt(self.height_pt - top - height)),
                scale_x: None,
                scale_y: None,
                dpi: Some(dpi),
                rotate: None,
            },
        });
    }

    /// Close the last page and hand back every page in order.
    pub fn finish(mut self) -> Vec<PdfPage> {
        if !self.ops.is_empty() || self.pages.is_empty() {
            self.page_break();
        }
        self.pages
    }

    fn rect_polygon(&self, x: f32, top: f32, width: f32, height: f32, mode: PaintMode) -> Polygon {
        let y = self.height_pt - top - height;
        let corner = |px: f32, py: f32| LinePoint {
            p: Point { x: Pt(px), y: Pt(py) },
            bezier: false,
        };
        Polygon {
            rings: vec![PolygonRing {
                points: vec![
                    corner(x, y),
                    corner(x + width, y),
                    corner(x + width, y + height),
                    corner(x, y + height),
                ],
            }],
            mode,
            winding_order: WindingOrder::NonZero,
        }
    }
}

fn pt_to_mm(pt: f32) -> Mm {
    Mm(pt * 25.4 / 72.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: TextStyle = TextStyle::new(BuiltinFont::Helvetica, 12.0, 16.0).space_after(12.0);

    #[test]
    fn wrap_respects_width() {
        let lines = wrap_text("the quick brown fox jumps over the lazy dog", 10);
        assert!(lines.iter().all(|l| l.chars().count() <= 10));
        assert_eq!(lines.join(" "), "the quick brown fox jumps over the lazy dog");
    }

    #[test]
    fn wrap_breaks_long_multibyte_words() {
        let lines = wrap_text("ééééééé ok", 3);
        assert_eq!(lines, vec!["ééé", "ééé", "é", "ok"]);
    }

    #[test]
    fn wrap_keeps_blank_lines() {
        assert_eq!(wrap_text("a\n\nb", 5), vec!["a", "", "b"]);
    }

    #[test]
    fn letter_content_width_with_inch_margins() {
        let page = PageComposer::new(PaperSize::Letter, 72.0);
        assert_eq!(page.content_width(), 468.0);
        assert_eq!(page.remaining(), 648.0);
    }

    #[test]
    fn ensure_space_breaks_when_full() {
        let mut page = PageComposer::new(PaperSize::Letter, 72.0);
        page.paragraph("first", &BODY);
        page.space(600.0);
        assert_eq!(page.page_count(), 1);

        page.ensure_space(50.0);
        assert_eq!(page.page_count(), 2);
        assert_eq!(page.cursor(), 72.0);
    }

    #[test]
    fn ensure_space_at_top_never_breaks() {
        let mut page = PageComposer::new(PaperSize::Letter, 72.0);
        page.ensure_space(10_000.0);
        assert_eq!(page.page_count(), 1);
    }

    #[test]
    fn finish_drops_trailing_empty_page() {
        let mut page = PageComposer::new(PaperSize::A4, 72.0);
        page.paragraph("title", &BODY);
        page.page_break();
        assert_eq!(page.finish().len(), 1);
    }

    #[test]
    fn empty_document_still_has_a_page() {
        let page = PageComposer::new(PaperSize::A4, 72.0);
        assert_eq!(page.finish().len(), 1);
    }
}
