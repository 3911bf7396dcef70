//! PHOTOLINE - Timeline density filter for photo/video library viewers
//!
//! Turns a backend-supplied per-month photo-density histogram into a
//! renderable heatmap, a continuous slider, and year/month dropdowns, all
//! kept mutually consistent, and emits a debounced date-range filter to the
//! grid/query layer.
//!
//! Collaborators (fetch, locale lookup, render surface, filter sink, clock)
//! are injected at construction, so every piece is instantiable in tests.

pub mod filter;
pub mod heatmap;
pub mod histogram;
pub mod i18n;
pub mod source;
pub mod store;
pub mod sync;
pub mod widget;

// Re-export the component surface
pub use filter::{DateFilter, FilterEmitter, TimelineFilter};
pub use heatmap::{render_heatmap, DrawSurface, PixelSurface, MIN_INTENSITY};
pub use histogram::{DensityBucket, DensityHistogram, Position};
pub use i18n::{NoTranslator, TableTranslator, Translator};
#[cfg(feature = "http")]
pub use source::HttpSource;
pub use source::{HistogramSource, JsonFileSource, StaticSource, TimelineError};
pub use store::TimelineStore;
pub use sync::{Clock, ManualClock, SystemClock, TimelineInputSync, DEBOUNCE_MS};
pub use widget::{timeline_bar, TimelineBarConfig};
