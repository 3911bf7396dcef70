//! Histogram sources - injectable fetch boundary for [`crate::store::TimelineStore`].
//!
//! The store never talks to the network itself; it is handed a
//! [`HistogramSource`] so tests and the demo binary can feed it in-memory
//! data while a real application wires up the HTTP source.

use std::fs;
use std::path::{Path, PathBuf};

use crate::histogram::DensityHistogram;

/// Histogram loading errors
#[derive(Debug)]
pub enum TimelineError {
    /// Network fetch failed (transport error or non-success status)
    Fetch(String),
    /// Local file read failed
    Io(std::io::Error),
    /// Response body was not a valid histogram document
    Parse(serde_json::Error),
}

impl std::fmt::Display for TimelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimelineError::Fetch(e) => write!(f, "Histogram fetch failed: {}", e),
            TimelineError::Io(e) => write!(f, "Histogram read failed: {}", e),
            TimelineError::Parse(e) => write!(f, "Histogram parse failed: {}", e),
        }
    }
}

impl std::error::Error for TimelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TimelineError::Fetch(_) => None,
            TimelineError::Io(e) => Some(e),
            TimelineError::Parse(e) => Some(e),
        }
    }
}

/// Source of the density histogram document
pub trait HistogramSource {
    fn fetch(&self) -> Result<DensityHistogram, TimelineError>;
}

/// In-memory source for tests and demos
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    histogram: DensityHistogram,
}

impl StaticSource {
    pub fn new(histogram: DensityHistogram) -> Self {
        Self { histogram }
    }
}

impl HistogramSource for StaticSource {
    fn fetch(&self) -> Result<DensityHistogram, TimelineError> {
        Ok(self.histogram.clone())
    }
}

/// Reads the histogram document from a local JSON file
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl HistogramSource for JsonFileSource {
    fn fetch(&self) -> Result<DensityHistogram, TimelineError> {
        let body = fs::read_to_string(&self.path).map_err(TimelineError::Io)?;
        DensityHistogram::parse(&body).map_err(TimelineError::Parse)
    }
}

/// Fetches the histogram from the backend REST endpoint (blocking).
#[cfg(feature = "http")]
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
}

#[cfg(feature = "http")]
impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

#[cfg(feature = "http")]
impl HistogramSource for HttpSource {
    fn fetch(&self) -> Result<DensityHistogram, TimelineError> {
        let response = reqwest::blocking::get(&self.url)
            .and_then(|r| r.error_for_status())
            .map_err(|e| TimelineError::Fetch(e.to_string()))?;
        let body = response
            .text()
            .map_err(|e| TimelineError::Fetch(e.to_string()))?;
        DensityHistogram::parse(&body).map_err(TimelineError::Parse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::histogram::DensityBucket;

    #[test]
    fn test_static_source_round_trip() {
        let source = StaticSource::new(DensityHistogram {
            density: vec![DensityBucket {
                year: 2024,
                month: 3,
                count: 9,
            }],
        });
        let hist = source.fetch().unwrap();
        assert_eq!(hist.density.len(), 1);
    }

    #[test]
    fn test_file_source_missing_file() {
        let source = JsonFileSource::new("/nonexistent/histogram.json");
        assert!(matches!(source.fetch(), Err(TimelineError::Io(_))));
    }
}
