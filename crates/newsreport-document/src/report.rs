// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Report renderer — lay out a `Summary` as a paginated PDF.
//
// Section order is fixed: title page (followed by a page break), summary
// table, articles per category, top articles by views, and the user
// preferences overview. The textual content of each section is produced by
// the `*_rows` / `preference_lines` helpers so it can be checked without
// parsing the PDF.

use std::path::Path;

use chrono::{DateTime, Local};
use newsreport_core::error::Result;
use newsreport_core::{LogoSource, PaperSize, ReportConfig, Summary, UserPreferences};
use printpdf::{BuiltinFont, PdfDocument, PdfSaveOptions, PdfWarnMsg, XObjectId};
use tracing::{debug, info, instrument, warn};

use crate::image::LogoLoader;
use crate::pdf::encoding::encode_builtin_text;
use crate::pdf::layout::{Align, PageComposer, RgbColor, TextStyle, text_width, wrap_to_width};
use crate::pdf::reader::PdfReader;
use crate::pdf::table::{Table, TableStyle};

/// Heading on the title page.
pub const REPORT_HEADING: &str = "Automated News Content Reader Report";

const PAGE_MARGIN_PT: f32 = 72.0;
const SECTION_GAP_PT: f32 = 24.0;
/// Room needed below a heading so it is never stranded at the foot of a page.
const HEADING_KEEP_WITH_NEXT_PT: f32 = 80.0;

/// Logo box on the title page: 2.5in x 1in.
const LOGO_WIDTH_PT: f32 = 180.0;
const LOGO_HEIGHT_PT: f32 = 72.0;
const LOGO_DPI: f32 = 150.0;

const TITLE_STYLE: TextStyle = TextStyle::new(BuiltinFont::Helvetica, 24.0, 28.0)
    .space_after(24.0)
    .align(Align::Center);
const HEADING_STYLE: TextStyle = TextStyle::new(BuiltinFont::Helvetica, 18.0, 22.0).space_after(12.0);
const BODY_STYLE: TextStyle = TextStyle::new(BuiltinFont::Helvetica, 12.0, 16.0).space_after(12.0);
const SMALL_STYLE: TextStyle = TextStyle::new(BuiltinFont::Helvetica, 10.0, 12.0)
    .space_after(8.0)
    .color(RgbColor::GREY);

// -- Section content ----------------------------------------------------------

/// Render-time timestamp, e.g. `March 05, 2024 09:07`.
pub fn format_timestamp(at: &DateTime<Local>) -> String {
    at.format("%B %d, %Y %H:%M").to_string()
}

/// The six label/value rows of the summary table.
pub fn summary_rows(summary: &Summary) -> Vec<[String; 2]> {
    vec![
        ["Total Articles".into(), summary.total_articles.to_string()],
        ["Total Bookmarks".into(), summary.total_bookmarks.to_string()],
        [
            "Total Reading List Items".into(),
            format!("{} subscribed categories", summary.subscribed_category_count()),
        ],
        [
            "Reading List Completion".into(),
            format!("{:.1}%", summary.reading_list_progress),
        ],
        [
            "Total Reading History Entries".into(),
            summary.total_reading_history.to_string(),
        ],
        [
            "Total Time Spent Reading (seconds)".into(),
            summary.total_time_spent.to_string(),
        ],
    ]
}

/// Header plus one row per category, in stored order.
pub fn category_rows(summary: &Summary) -> Vec<[String; 2]> {
    std::iter::once(["Category".to_string(), "Article Count".to_string()])
        .chain(
            summary
                .category_counts
                .iter()
                .map(|(name, count)| [name.clone(), count.to_string()]),
        )
        .collect()
}

/// Header plus one row per top article.
pub fn top_article_rows(summary: &Summary) -> Vec<[String; 5]> {
    let header = ["Title", "Author", "Category", "Views", "Read Time (mins)"].map(String::from);
    std::iter::once(header)
        .chain(summary.top_articles.iter().map(|article| {
            [
                article.title_or_na().to_string(),
                article.author_or_na().to_string(),
                article.category_or_na().to_string(),
                article.views.to_string(),
                article.read_time.to_string(),
            ]
        }))
        .collect()
}

/// Label/value lines of the preferences block, in display order.
pub fn preference_lines(prefs: &UserPreferences) -> Vec<(&'static str, String)> {
    vec![
        ("Subscribed Categories:", prefs.categories_display()),
        ("Subscribed Sources:", prefs.sources_display()),
        ("Font Size:", prefs.font_size_display().to_string()),
        ("Theme:", prefs.theme_display().to_string()),
        ("Notifications Enabled:", prefs.notifications_display().to_string()),
    ]
}

// -- Renderer -----------------------------------------------------------------

/// Turns a [`Summary`] into PDF bytes.
pub struct ReportRenderer {
    paper_size: PaperSize,
    /// Title metadata embedded in the PDF /Info dictionary.
    title: String,
    logo: Option<LogoSource>,
    loader: LogoLoader,
    /// Fixed render time; `None` means "now".
    generated_at: Option<DateTime<Local>>,
    table_style: TableStyle,
}

impl ReportRenderer {
    pub fn new(config: &ReportConfig) -> Self {
        Self {
            paper_size: config.paper_size,
            title: config.title.clone(),
            logo: config.logo.clone(),
            loader: LogoLoader::from_config(config),
            generated_at: None,
            table_style: TableStyle::default(),
        }
    }

    /// Stamp the report with a fixed time instead of the current one.
    pub fn with_timestamp(mut self, at: DateTime<Local>) -> Self {
        self.generated_at = Some(at);
        self
    }

    /// Build the complete PDF document in memory.
    #[instrument(skip_all, fields(paper = ?self.paper_size))]
    pub fn render(&self, summary: &Summary) -> Result<Vec<u8>> {
        info!(title = %self.title, "Rendering report");

        let mut doc = PdfDocument::new(&self.title);
        let mut page = PageComposer::new(self.paper_size, PAGE_MARGIN_PT);

        let logo = self.embed_logo(&mut doc);
        self.title_page(&mut page, logo);
        self.summary_section(&mut page, summary);
        self.category_section(&mut page, summary);
        self.top_articles_section(&mut page, summary);
        self.preferences_section(&mut page, &summary.user_preferences);

        doc.with_pages(page.finish());
        debug!(pages = doc.pages.len(), "Layout complete");

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let output = doc.save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            debug!(count = warnings.len(), "printpdf reported warnings while saving");
        }

        encode_builtin_text(&output)
    }

    /// Render, verify the result parses back, and write it to `path`,
    /// replacing any existing file. Returns the page count.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn write_to_file(&self, summary: &Summary, path: impl AsRef<Path>) -> Result<usize> {
        let bytes = self.render(summary)?;
        let reader = PdfReader::from_bytes(&bytes)?;
        let pages = reader.page_count();
        debug!(title = ?reader.title(), pages, "Rendered PDF verified");

        std::fs::write(path.as_ref(), &bytes)?;
        info!(pages, bytes = bytes.len(), "Wrote report PDF to {}", path.as_ref().display());
        Ok(pages)
    }

    fn embed_logo(&self, doc: &mut PdfDocument) -> Option<XObjectId> {
        let Some(source) = self.logo.as_ref() else {
            debug!("Logo disabled, drawing placeholder");
            return None;
        };
        let width_px = (LOGO_WIDTH_PT / 72.0 * LOGO_DPI).round() as u32;
        let height_px = (LOGO_HEIGHT_PT / 72.0 * LOGO_DPI).round() as u32;

        match self.loader.load(source) {
            Ok(processor) => {
                let raw = processor
                    .resize_exact(width_px, height_px)
                    .flatten([255, 255, 255])
                    .to_raw_image();
                Some(doc.add_image(&raw))
            }
            Err(err) => {
                warn!(error = %err, source = %source, "Logo unavailable, drawing placeholder");
                None
            }
        }
    }

    fn title_page(&self, page: &mut PageComposer, logo: Option<XObjectId>) {
        page.paragraph(REPORT_HEADING, &TITLE_STYLE);
        page.space(12.0);

        let x = (page.page_width() - LOGO_WIDTH_PT) / 2.0;
        let top = page.cursor();
        match logo {
            Some(id) => page.image_at(id, x, top, LOGO_HEIGHT_PT, LOGO_DPI),
            None => page.stroke_rect(x, top, LOGO_WIDTH_PT, LOGO_HEIGHT_PT, RgbColor::GREY, 0.5),
        }
        page.space(LOGO_HEIGHT_PT);
        page.space(SECTION_GAP_PT);

        let stamp = format_timestamp(&self.generated_at.unwrap_or_else(Local::now));
        page.paragraph(&format!("Report generated on: {stamp}"), &SMALL_STYLE);
        page.page_break();
    }

    fn heading(&self, page: &mut PageComposer, text: &str) {
        page.ensure_space(HEADING_KEEP_WITH_NEXT_PT);
        page.paragraph(text, &HEADING_STYLE);
    }

    fn summary_section(&self, page: &mut PageComposer, summary: &Summary) {
        self.heading(page, "Summary");
        let mut table = Table::new(vec![200.0, 200.0]);
        for row in summary_rows(summary) {
            table.push_row(row);
        }
        table.draw(page, &self.table_style);
        page.space(SECTION_GAP_PT);
    }

    fn category_section(&self, page: &mut PageComposer, summary: &Summary) {
        self.heading(page, "Articles Per Category");
        let mut table = Table::new(vec![250.0, 150.0]);
        for row in category_rows(summary) {
            table.push_row(row);
        }
        table.draw(page, &self.table_style);
        page.space(SECTION_GAP_PT);
    }

    fn top_articles_section(&self, page: &mut PageComposer, summary: &Summary) {
        self.heading(page, "Top 5 Articles by Views");
        let mut table = Table::new(vec![200.0, 100.0, 80.0, 50.0, 80.0])
            .align_body_column(3, Align::Right)
            .align_body_column(4, Align::Right);
        for row in top_article_rows(summary) {
            table.push_row(row);
        }
        table.draw(page, &self.table_style);
        page.space(SECTION_GAP_PT);
    }

    fn preferences_section(&self, page: &mut PageComposer, prefs: &UserPreferences) {
        self.heading(page, "User Preferences Overview");

        let label_style = BODY_STYLE.font(BuiltinFont::HelveticaBold);
        for (label, value) in preference_lines(prefs) {
            let label_width = text_width(label, label_style.font, label_style.size)
                + text_width(" ", BODY_STYLE.font, BODY_STYLE.size);
            let value_width = (page.content_width() - label_width).max(BODY_STYLE.size);
            let lines = wrap_to_width(&value, BODY_STYLE.font, BODY_STYLE.size, value_width);

            for (index, line) in lines.iter().enumerate() {
                page.ensure_space(BODY_STYLE.leading);
                let top = page.cursor();
                if index == 0 {
                    page.text_at(page.left(), top, label, &label_style);
                }
                page.text_at(page.left() + label_width, top, line, &BODY_STYLE);
                page.space(BODY_STYLE.leading);
            }
        }
        page.space(BODY_STYLE.space_after);
    }
}

impl Default for ReportRenderer {
    fn default() -> Self {
        Self::new(&ReportConfig::default())
    }
}
