// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for the command line.
//
// Every technical error is mapped to plain English with a concrete suggestion.
// The severity decides how the CLI frames the diagnostic.

use crate::error::ReportError;

/// Who has to act to fix an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The input data or configuration must be corrected.
    InputProblem,
    /// Something about the machine: permissions, disk, network.
    Environment,
    /// A failure inside the report generator itself.
    Internal,
}

/// A human-readable error with a plain English message and a suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// One-line summary.
    pub message: String,
    /// What the user should try next.
    pub suggestion: String,
    pub severity: Severity,
}

/// Convert a `ReportError` into a `HumanError`.
pub fn humanize_error(err: &ReportError) -> HumanError {
    match err {
        // -- Input errors --
        ReportError::NotFound { path } => HumanError {
            message: format!("The data file {} does not exist.", path.display()),
            suggestion: "Check the path, or pass the export with --input <FILE>.".into(),
            severity: Severity::InputProblem,
        },

        ReportError::Parse { path, source } => HumanError {
            message: format!("The data file {} is not a valid news export.", path.display()),
            // Shape errors raised after parsing carry no position.
            suggestion: if source.line() == 0 {
                format!("Fix the structure of the export ({source}), then run again.")
            } else {
                format!(
                    "Fix the syntax near line {}, column {}, then run again.",
                    source.line(),
                    source.column()
                )
            },
            severity: Severity::InputProblem,
        },

        ReportError::Config(detail) => HumanError {
            message: "The configuration could not be used.".into(),
            suggestion: format!("Correct the config file or command-line flags. ({detail})"),
            severity: Severity::InputProblem,
        },

        // -- Rendering errors --
        ReportError::Pdf(_) => HumanError {
            message: "The PDF document could not be built.".into(),
            suggestion: "This is a bug in the report generator. Please report it with the input file.".into(),
            severity: Severity::Internal,
        },

        ReportError::Image(_) | ReportError::LogoFetch { .. } => HumanError {
            message: "The title-page logo could not be loaded.".into(),
            suggestion: "Check the logo location, or run with --no-logo.".into(),
            severity: Severity::Environment,
        },

        // -- Storage --
        ReportError::Io(io_err) => humanize_io(io_err),

        ReportError::Serialization(_) => HumanError {
            message: "The summary could not be written as JSON.".into(),
            suggestion: "This is a bug in the report generator. Please report it with the input file.".into(),
            severity: Severity::Internal,
        },
    }
}

fn humanize_io(err: &std::io::Error) -> HumanError {
    match err.kind() {
        std::io::ErrorKind::PermissionDenied => HumanError {
            message: "Permission denied while reading or writing a file.".into(),
            suggestion: "Choose an output location you can write to, e.g. --output ./news_report.pdf.".into(),
            severity: Severity::Environment,
        },
        std::io::ErrorKind::NotFound => HumanError {
            message: "A file or directory is missing.".into(),
            suggestion: "Make sure the output directory exists.".into(),
            severity: Severity::Environment,
        },
        _ => HumanError {
            message: "A file operation failed.".into(),
            suggestion: format!("Check free disk space and try again. (Detail: {err})"),
            severity: Severity::Environment,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn missing_input_is_input_problem() {
        let err = ReportError::NotFound {
            path: PathBuf::from("sample_news_data.json"),
        };
        let human = humanize_error(&err);
        assert_eq!(human.severity, Severity::InputProblem);
        assert!(human.message.contains("sample_news_data.json"));
    }

    #[test]
    fn parse_error_points_at_location() {
        let source = serde_json::from_str::<serde_json::Value>("{\n  \"articles\": [,]\n}")
            .unwrap_err();
        let err = ReportError::Parse {
            path: PathBuf::from("data.json"),
            source,
        };
        let human = humanize_error(&err);
        assert_eq!(human.severity, Severity::InputProblem);
        assert!(human.suggestion.contains("line 2"));
    }

    #[test]
    fn permission_denied_is_environment() {
        let err = ReportError::Io(std::io::Error::from(std::io::ErrorKind::PermissionDenied));
        assert_eq!(humanize_error(&err).severity, Severity::Environment);
    }

    #[test]
    fn logo_failure_suggests_no_logo() {
        let err = ReportError::LogoFetch {
            location: "https://example.invalid/logo.png".into(),
            reason: "timed out".into(),
        };
        assert!(humanize_error(&err).suggestion.contains("--no-logo"));
    }

    #[test]
    fn shape_error_has_no_position_hint() {
        let source = serde_json::from_value::<Vec<u32>>(serde_json::json!("text")).unwrap_err();
        let err = ReportError::Parse {
            path: PathBuf::from("data.json"),
            source,
        };
        let suggestion = humanize_error(&err).suggestion;
        assert!(suggestion.contains("structure"));
        assert!(!suggestion.contains("line 0"));
    }
}
