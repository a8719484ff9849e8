// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Export loader — read a news-reader JSON export from disk.
//
// No schema validation happens here beyond what parsing requires. Missing and
// unknown fields are resolved by the default-substituting deserialisers in
// `newsreport_core::types`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use newsreport_core::NewsExport;
use newsreport_core::error::{ReportError, Result};
use serde::de::Error as _;
use tracing::{debug, info, instrument};

/// Load and parse the export at `path`.
///
/// A missing file is reported as [`ReportError::NotFound`], malformed JSON as
/// [`ReportError::Parse`].
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_export(path: impl AsRef<Path>) -> Result<NewsExport> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|err| match err.kind() {
        ErrorKind::NotFound => ReportError::NotFound {
            path: path.to_path_buf(),
        },
        _ => ReportError::Io(err),
    })?;

    info!(bytes = raw.len(), "Export read");

    let export = decode(&raw).map_err(|source| ReportError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    log_shape(&export);
    Ok(export)
}

/// Parse an export already held in memory.
pub fn parse_export(raw: &str) -> Result<NewsExport> {
    let export = decode(raw).map_err(|source| ReportError::Parse {
        path: PathBuf::from("<memory>"),
        source,
    })?;
    log_shape(&export);
    Ok(export)
}

fn decode(raw: &str) -> std::result::Result<NewsExport, serde_json::Error> {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let value: serde_json::Value = serde_json::from_str(raw)?;
    if !value.is_object() {
        return Err(serde_json::Error::custom(
            "top-level value of a news export must be a JSON object",
        ));
    }
    serde_json::from_value(value)
}

fn log_shape(export: &NewsExport) {
    debug!(
        articles = export.articles.len(),
        categories = export.categories.len(),
        bookmarks = export.bookmarks.len(),
        reading_list = export.reading_list.len(),
        reading_history = export.reading_history.len(),
        "Export parsed"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_export_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"articles": [{{"title": "A", "views": 3}}], "bookmarks": [1, 2]}}"#
        )
        .unwrap();

        let export = load_export(file.path()).unwrap();
        assert_eq!(export.articles.len(), 1);
        assert_eq!(export.bookmarks.len(), 2);
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");

        let err = load_export(&path).unwrap_err();
        assert!(matches!(err, ReportError::NotFound { path: ref p } if *p == path));
        assert!(err.is_input_error());
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"articles": [}}"#).unwrap();

        let err = load_export(file.path()).unwrap_err();
        assert!(matches!(err, ReportError::Parse { .. }));
    }

    #[test]
    fn non_object_document_is_parse_error() {
        let err = parse_export("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, ReportError::Parse { .. }));
    }

    #[test]
    fn wrong_typed_collection_loads_as_empty() {
        let export = parse_export(r#"{"bookmarks": {}, "userPreferences": []}"#).unwrap();
        assert!(export.bookmarks.is_empty());
        assert_eq!(export.user_preferences, Default::default());
    }

    #[test]
    fn malformed_article_is_parse_error() {
        let err = parse_export(r#"{"articles": ["headline"]}"#).unwrap_err();
        assert!(matches!(err, ReportError::Parse { .. }));
    }

    #[test]
    fn byte_order_mark_is_skipped() {
        let export = parse_export("\u{feff}{\"bookmarks\": [{}]}").unwrap();
        assert_eq!(export.bookmarks.len(), 1);
    }

    #[test]
    fn extra_fields_are_ignored() {
        let export = parse_export(r#"{"version": 2, "articles": [], "exportedBy": "app"}"#).unwrap();
        assert!(export.articles.is_empty());
    }
}
