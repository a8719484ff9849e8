// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for Newsreport: the news-reader export as it arrives on
// disk, and the summary record derived from it.
//
// Every field of the export is optional. Absent or `null` values are replaced
// with their documented defaults while deserialising, so code downstream of the
// loader always sees fully populated records.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ReportError;

/// Logo shown on the title page when no other source is configured.
pub const DEFAULT_LOGO_URL: &str = "https://storage.googleapis.com/workspace-0f70711f-8b4e-4d94-86f1-2a93ccde5887/image/47fa8e44-44af-4d68-9a3a-c26113e981f1.png";

/// Placeholder rendered for missing article text fields.
pub const NOT_AVAILABLE: &str = "N/A";

// -- Input document -----------------------------------------------------------

/// The complete news-reader export.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsExport {
    #[serde(default, deserialize_with = "lenient::list")]
    pub articles: Vec<Article>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub categories: Vec<Category>,
    /// Only the number of bookmarks matters, so their contents stay opaque.
    #[serde(default, deserialize_with = "lenient::list")]
    pub bookmarks: Vec<serde_json::Value>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub reading_list: Vec<ReadingListItem>,
    #[serde(default, deserialize_with = "lenient::record")]
    pub user_preferences: UserPreferences,
    #[serde(default, deserialize_with = "lenient::list")]
    pub reading_history: Vec<HistoryEntry>,
}

/// A single article.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub views: i64,
    /// Estimated reading time in minutes.
    #[serde(default, deserialize_with = "lenient::count")]
    pub read_time: i64,
}

impl Article {
    pub fn title_or_na(&self) -> &str {
        self.title.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn author_or_na(&self) -> &str {
        self.author.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn category_or_na(&self) -> &str {
        self.category.as_deref().unwrap_or(NOT_AVAILABLE)
    }
}

/// A category with its published article count.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(default = "not_available", deserialize_with = "lenient::name")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::count")]
    pub article_count: i64,
}

fn not_available() -> String {
    NOT_AVAILABLE.to_string()
}

/// An entry on the user's reading list.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingListItem {
    /// Completion marker; any truthy value counts as completed.
    #[serde(default)]
    pub completed_at: Option<serde_json::Value>,
}

impl ReadingListItem {
    pub fn is_completed(&self) -> bool {
        self.completed_at.as_ref().is_some_and(lenient::is_truthy)
    }
}

/// A reading-history entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Seconds spent reading. Negative values are clamped to zero.
    #[serde(default, deserialize_with = "lenient::duration_secs")]
    pub time_spent: u64,
}

/// The user's stored preferences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub categories: Vec<String>,
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub sources: Vec<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub font_size: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub theme: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub notifications: bool,
}

impl UserPreferences {
    /// Subscribed categories, comma-joined, or `None`.
    pub fn categories_display(&self) -> String {
        join_or_none(&self.categories)
    }

    /// Subscribed sources, comma-joined, or `None`.
    pub fn sources_display(&self) -> String {
        join_or_none(&self.sources)
    }

    pub fn font_size_display(&self) -> &str {
        self.font_size.as_deref().unwrap_or("Default")
    }

    pub fn theme_display(&self) -> &str {
        self.theme.as_deref().unwrap_or("Not set")
    }

    pub fn notifications_display(&self) -> &'static str {
        if self.notifications { "Yes" } else { "No" }
    }
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "None".to_string()
    } else {
        items.join(", ")
    }
}

// -- Derived summary ----------------------------------------------------------

/// Aggregates computed once from a [`NewsExport`] and consumed by the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total_articles: usize,
    /// Up to five most-viewed articles, highest first.
    pub top_articles: Vec<Article>,
    /// Category name to article count, in input order.
    pub category_counts: IndexMap<String, i64>,
    pub total_bookmarks: usize,
    /// Percentage of reading-list entries completed, in `0.0..=100.0`.
    pub reading_list_progress: f64,
    pub user_preferences: UserPreferences,
    pub total_reading_history: usize,
    /// Total reading time in seconds.
    pub total_time_spent: u64,
}

impl Summary {
    pub fn subscribed_category_count(&self) -> usize {
        self.user_preferences.categories.len()
    }
}

// -- Page geometry ------------------------------------------------------------

/// Supported paper sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaperSize {
    #[default]
    Letter,
    A4,
    Legal,
}

impl PaperSize {
    /// Dimensions in PDF points (width, height).
    pub fn dimensions_pt(&self) -> (f32, f32) {
        match self {
            Self::Letter => (612.0, 792.0),
            Self::A4 => (595.28, 841.89),
            Self::Legal => (612.0, 1008.0),
        }
    }
}

impl FromStr for PaperSize {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "letter" => Ok(Self::Letter),
            "a4" => Ok(Self::A4),
            "legal" => Ok(Self::Legal),
            other => Err(ReportError::Config(format!(
                "unknown paper size '{other}' (expected letter, a4, or legal)"
            ))),
        }
    }
}

// -- Logo ---------------------------------------------------------------------

/// Where the title-page logo comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LogoSource {
    Url(String),
    File(PathBuf),
}

impl LogoSource {
    /// Classify a location: `http://` and `https://` are URLs, anything else a path.
    pub fn parse(location: &str) -> Self {
        let trimmed = location.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Url(trimmed.to_string())
        } else {
            Self::File(PathBuf::from(trimmed))
        }
    }
}

impl Default for LogoSource {
    fn default() -> Self {
        Self::Url(DEFAULT_LOGO_URL.to_string())
    }
}

impl From<String> for LogoSource {
    fn from(location: String) -> Self {
        Self::parse(&location)
    }
}

impl From<LogoSource> for String {
    fn from(source: LogoSource) -> Self {
        source.to_string()
    }
}

impl fmt::Display for LogoSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => write!(f, "{url}"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

// -- Lenient field decoding ---------------------------------------------------

/// Deserialisers that substitute defaults instead of failing on absent, `null`,
/// or oddly typed scalar fields.
pub mod lenient {
    use serde::de::{self, DeserializeOwned};
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Sequences: `null` or any non-array value becomes empty. Elements are
    /// still decoded strictly, so a malformed element is an error.
    pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        match Value::deserialize(deserializer)? {
            Value::Array(items) => items
                .into_iter()
                .map(|item| serde_json::from_value(item).map_err(de::Error::custom))
                .collect(),
            _ => Ok(Vec::new()),
        }
    }

    /// Records: anything other than an object becomes `T::default()`.
    pub fn record<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned + Default,
    {
        match Value::deserialize(deserializer)? {
            value @ Value::Object(_) => serde_json::from_value(value).map_err(de::Error::custom),
            _ => Ok(T::default()),
        }
    }

    /// Integer counters: floats truncate, numeric strings parse, anything else is 0.
    pub fn count<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.as_ref().map(as_count).unwrap_or(0))
    }

    /// Like [`count`], clamped to be non-negative.
    pub fn duration_secs<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(count(deserializer)?.max(0) as u64)
    }

    pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.as_ref().and_then(as_text))
    }

    pub fn name<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(text(deserializer)?.unwrap_or_else(super::not_available))
    }

    /// Lists of labels; `null` items are dropped.
    pub fn text_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let items = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
        Ok(items.iter().filter_map(as_text).collect())
    }

    pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.as_ref().is_some_and(is_truthy))
    }

    /// Truthiness of a JSON value: empty strings, zero, `false`, `null`, and
    /// empty containers are false.
    pub fn is_truthy(value: &Value) -> bool {
        match value {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
            Value::String(s) => !s.is_empty(),
            Value::Array(items) => !items.is_empty(),
            Value::Object(map) => !map.is_empty(),
        }
    }

    fn as_count(value: &Value) -> i64 {
        match value {
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    i
                } else if n.as_u64().is_some() {
                    i64::MAX
                } else {
                    n.as_f64().map(|f| f.trunc() as i64).unwrap_or(0)
                }
            }
            Value::String(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
                    .unwrap_or(0)
            }
            _ => 0,
        }
    }

    fn as_text(value: &Value) -> Option<String> {
        match value {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}
