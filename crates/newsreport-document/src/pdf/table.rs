// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Grid tables drawn onto a `PageComposer`.
//
// The first row always takes the header styling. Cell text is word-wrapped to
// the column width and each row grows to fit its tallest cell. Tables split
// between rows when they reach the bottom of a page.

use printpdf::BuiltinFont;
use tracing::debug;

use super::layout::{Align, PageComposer, RgbColor, TextStyle, text_width, wrap_to_width};

/// Colours, fonts, and padding shared by every table in a report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableStyle {
    pub header_fill: RgbColor,
    pub header_text: TextStyle,
    pub body_fill: RgbColor,
    pub body_text: TextStyle,
    pub grid_color: RgbColor,
    pub grid_width: f32,
    pub padding_x: f32,
    pub padding_top: f32,
    pub padding_bottom: f32,
    /// Extra room under the header row text.
    pub header_padding_bottom: f32,
}

impl Default for TableStyle {
    fn default() -> Self {
        Self {
            header_fill: RgbColor::ACCENT,
            header_text: TextStyle::new(BuiltinFont::HelveticaBold, 12.0, 14.4)
                .color(RgbColor::WHITE),
            body_fill: RgbColor::WHITESMOKE,
            body_text: TextStyle::new(BuiltinFont::Helvetica, 10.0, 12.0),
            grid_color: RgbColor::GREY,
            grid_width: 0.5,
            padding_x: 6.0,
            padding_top: 3.0,
            padding_bottom: 3.0,
            header_padding_bottom: 12.0,
        }
    }
}

/// A table of text cells with fixed column widths.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    column_widths: Vec<f32>,
    rows: Vec<Vec<String>>,
    /// Alignment of body cells per column; header cells are always left-aligned.
    body_alignment: Vec<Align>,
}

impl Table {
    pub fn new(column_widths: Vec<f32>) -> Self {
        let body_alignment = vec![Align::Left; column_widths.len()];
        Self {
            column_widths,
            rows: Vec::new(),
            body_alignment,
        }
    }

    /// Append a row. Short rows are padded with empty cells, extra cells dropped.
    pub fn push_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut row: Vec<String> = cells
            .into_iter()
            .take(self.column_widths.len())
            .map(Into::into)
            .collect();
        row.resize(self.column_widths.len(), String::new());
        self.rows.push(row);
    }

    /// Align body cells of `column` (header excluded).
    pub fn align_body_column(mut self, column: usize, align: Align) -> Self {
        if let Some(slot) = self.body_alignment.get_mut(column) {
            *slot = align;
        }
        self
    }

    pub fn width(&self) -> f32 {
        self.column_widths.iter().sum()
    }

    /// Draw the table at the cursor, horizontally centred in the content area,
    /// and advance the cursor past it.
    pub fn draw(&self, page: &mut PageComposer, style: &TableStyle) {
        let x0 = page.left() + (page.content_width() - self.width()) / 2.0;

        for (index, row) in self.rows.iter().enumerate() {
            let is_header = index == 0;
            let (text_style, fill, padding_bottom) = if is_header {
                (&style.header_text, style.header_fill, style.header_padding_bottom)
            } else {
                (&style.body_text, style.body_fill, style.padding_bottom)
            };

            let wrapped: Vec<Vec<String>> = row
                .iter()
                .zip(&self.column_widths)
                .map(|(cell, width)| {
                    wrap_to_width(cell, text_style.font, text_style.size, width - 2.0 * style.padding_x)
                })
                .collect();
            let max_lines = wrapped.iter().map(Vec::len).max().unwrap_or(1).max(1);
            let row_height =
                style.padding_top + max_lines as f32 * text_style.leading + padding_bottom;

            page.ensure_space(row_height);
            let top = page.cursor();
            page.fill_rect(x0, top, self.width(), row_height, fill);

            let mut x = x0;
            for (column, (lines, width)) in wrapped.iter().zip(&self.column_widths).enumerate() {
                let align = if is_header {
                    Align::Left
                } else {
                    self.body_alignment[column]
                };
                for (line_no, line) in lines.iter().enumerate() {
                    let line_x = match align {
                        Align::Left => x + style.padding_x,
                        Align::Center => {
                            x + (width - text_width(line, text_style.font, text_style.size)) / 2.0
                        }
                        Align::Right => {
                            x + width
                                - style.padding_x
                                - text_width(line, text_style.font, text_style.size)
                        }
                    };
                    let line_top = top + style.padding_top + line_no as f32 * text_style.leading;
                    page.text_at(line_x, line_top, line, text_style);
                }
                page.stroke_rect(x, top, *width, row_height, style.grid_color, style.grid_width);
                x += width;
            }

            page.space(row_height);
        }

        debug!(rows = self.rows.len(), columns = self.column_widths.len(), "Table drawn");
    }
}
