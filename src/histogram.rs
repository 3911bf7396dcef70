//! Wire models for the backend photo-density histogram.
//!
//! The backend answers a single JSON document with a `density` array, one
//! entry per calendar month that has at least one photo, oldest first. A
//! missing or empty array is the valid "no timeline data" state.

use serde::{Deserialize, Serialize};

/// One calendar month of photo density, as delivered by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DensityBucket {
    pub year: i32,
    /// Calendar month, 1..=12.
    pub month: u32,
    pub count: u32,
}

/// A slider position is a 1:1 projection of its bucket; the array offset is
/// the position index and defines the slider's integer domain `[0, N-1]`.
pub type Position = DensityBucket;

/// Backend histogram document: `{ "density": [ {year, month, count}, ... ] }`.
///
/// Buckets arrive in ascending `(year, month)` order with no duplicate
/// months; the renderer and index mapping rely on that precondition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DensityHistogram {
    #[serde(default)]
    pub density: Vec<DensityBucket>,
}

impl DensityHistogram {
    /// Parse the backend document. An absent `density` key yields an empty
    /// histogram rather than an error.
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
