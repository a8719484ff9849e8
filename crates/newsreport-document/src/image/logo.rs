// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Logo loader — fetch the decorative title-page image from a URL or a local
// file, bounded in both time and size.
//
// Failures are returned as `ReportError::LogoFetch` / `ReportError::Image`;
// the report renderer decides to fall back to a placeholder frame.

use std::io::Read;
use std::path::Path;
use std::time::Duration;

use newsreport_core::error::{ReportError, Result};
use newsreport_core::{LogoSource, ReportConfig};
use tracing::{debug, info, instrument};

use super::processor::ImageProcessor;

/// Fetches logo bytes with a timeout and a body size cap.
#[derive(Debug, Clone)]
pub struct LogoLoader {
    timeout: Duration,
    max_bytes: u64,
}

impl LogoLoader {
    pub fn new(timeout: Duration, max_bytes: u64) -> Self {
        Self { timeout, max_bytes }
    }

    pub fn from_config(config: &ReportConfig) -> Self {
        Self::new(
            Duration::from_secs(config.logo_timeout_secs),
            config.logo_max_bytes,
        )
    }

    /// Fetch and decode the logo.
    pub fn load(&self, source: &LogoSource) -> Result<ImageProcessor> {
        let bytes = self.fetch(source)?;
        ImageProcessor::from_bytes(&bytes)
    }

    /// Fetch the raw encoded image bytes.
    #[instrument(skip_all, fields(source = %source))]
    pub fn fetch(&self, source: &LogoSource) -> Result<Vec<u8>> {
        let bytes = match source {
            LogoSource::Url(url) => self.fetch_url(url)?,
            LogoSource::File(path) => self.read_file(path)?,
        };
        info!(bytes = bytes.len(), "Logo fetched");
        Ok(bytes)
    }

    fn fetch_url(&self, url: &str) -> Result<Vec<u8>> {
        let agent = ureq::AgentBuilder::new().timeout(self.timeout).build();
        let response = agent
            .get(url)
            .call()
            .map_err(|err| fetch_error(url, err.to_string()))?;

        debug!(
            status = response.status(),
            content_type = response.content_type(),
            "Logo response received"
        );

        self.read_capped(response.into_reader(), url)
    }

    fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
        let location = path.display().to_string();
        let file = std::fs::File::open(path).map_err(|err| fetch_error(&location, err.to_string()))?;
        self.read_capped(file, &location)
    }

    /// Read at most `max_bytes`; a longer body is an error rather than a
    /// silently truncated image.
    fn read_capped(&self, reader: impl Read, location: &str) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        reader
            .take(self.max_bytes.saturating_add(1))
            .read_to_end(&mut bytes)
            .map_err(|err| fetch_error(location, err.to_string()))?;
        if bytes.len() as u64 > self.max_bytes {
            return Err(fetch_error(
                location,
                format!("image is larger than {} bytes", self.max_bytes),
            ));
        }
        Ok(bytes)
    }
}

impl Default for LogoLoader {
    fn default() -> Self {
        Self::from_config(&ReportConfig::default())
    }
}

fn fetch_error(location: &str, reason: String) -> ReportError {
    ReportError::LogoFetch {
        location: location.to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    #[test]
    fn reads_local_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"0123456789").unwrap();

        let loader = LogoLoader::new(Duration::from_secs(1), 64);
        let bytes = loader
            .fetch(&LogoSource::File(file.path().to_path_buf()))
            .unwrap();
        assert_eq!(bytes, b"0123456789");
    }

    #[test]
    fn oversized_file_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0u8; 32]).unwrap();

        let loader = LogoLoader::new(Duration::from_secs(1), 16);
        let err = loader
            .fetch(&LogoSource::File(file.path().to_path_buf()))
            .unwrap_err();
        assert!(matches!(err, ReportError::LogoFetch { reason, .. } if reason.contains("16 bytes")));
    }

    #[test]
    fn missing_file_is_fetch_error() {
        let loader = LogoLoader::default();
        let err = loader
            .fetch(&LogoSource::File(PathBuf::from("/nonexistent/logo.png")))
            .unwrap_err();
        assert!(matches!(err, ReportError::LogoFetch { .. }));
    }

    #[test]
    fn unreachable_url_is_fetch_error() {
        // Port 9 (discard) on localhost is closed on any sane test machine.
        let loader = LogoLoader::new(Duration::from_millis(500), 1024);
        let err = loader
            .fetch(&LogoSource::Url("http://127.0.0.1:9/logo.png".into()))
            .unwrap_err();
        assert!(matches!(err, ReportError::LogoFetch { .. }));
    }

    #[test]
    fn undecodable_file_is_image_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"definitely not a png").unwrap();

        let loader = LogoLoader::default();
        let result = loader.load(&LogoSource::File(file.path().to_path_buf()));
        assert!(matches!(result, Err(ReportError::Image(_))));
    }
}
