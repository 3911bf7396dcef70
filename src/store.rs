//! Timeline store - fetched density histogram plus derived position index.
//!
//! **Why**: the slider, the heatmap, and the dropdowns all index into the
//! same sparse month list. Deriving the position array once per load keeps
//! the three surfaces consistent without any of them re-reading the backend.
//!
//! **Used by**: TimelineInputSync (index resolution), HeatmapRenderer
//! (bar geometry), widget (dropdown year list).
//!
//! Populated once per page load and immutable for the rest of the session;
//! failure to load means the whole control stays hidden - no retry.

use log::{debug, warn};

use crate::histogram::{DensityHistogram, Position};
use crate::source::{HistogramSource, TimelineError};

/// Immutable per-session snapshot of the density histogram.
#[derive(Debug, Clone, Default)]
pub struct TimelineStore {
    positions: Vec<Position>,
    max_count: u32,
}

impl TimelineStore {
    /// Fetch the histogram and derive the position index.
    ///
    /// Propagates the source failure after logging it once; the caller is
    /// expected to leave the control hidden/disabled and not retry.
    pub fn load(source: &dyn HistogramSource) -> Result<Self, TimelineError> {
        let histogram = source.fetch().map_err(|e| {
            warn!("Timeline histogram load failed: {}", e);
            e
        })?;
        Ok(Self::from_histogram(histogram))
    }

    /// Build the store from an already-parsed histogram.
    pub fn from_histogram(histogram: DensityHistogram) -> Self {
        let max_count = histogram.density.iter().map(|b| b.count).max().unwrap_or(0);
        debug!(
            "Timeline store: {} month buckets, max count {}",
            histogram.density.len(),
            max_count
        );
        Self {
            positions: histogram.density,
            max_count,
        }
    }

    /// Ordered positions; the array offset is the slider index.
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Largest bucket count, used for bar normalization.
    /// `0` means there is nothing to render.
    pub fn max_count(&self) -> u32 {
        self.max_count
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Distinct years in ascending order, for the year dropdown.
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.positions.iter().map(|p| p.year).collect();
        years.dedup();
        years
    }
}
