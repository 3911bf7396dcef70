//! Date-range filter value and its single hand-off point.
//!
//! `TimelineFilter` is the only value exchanged with the grid/query layer:
//! `None` means "show everything", `Some` constrains to a year or to one
//! calendar month of it. The emitter wraps a channel sender so the timeline
//! component never calls into the consumer directly.

use crossbeam_channel::Sender;
use serde::{Deserialize, Serialize};

/// Resolved date constraint; `month: None` means "whole year".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateFilter {
    pub year: i32,
    pub month: Option<u32>,
}

/// Externally visible filter value; `None` removes the constraint entirely.
pub type TimelineFilter = Option<DateFilter>;

/// Hand-off point for resolved filters.
///
/// The grid/query consumer holds the receiving end. An unwired emitter
/// (tests, or a consumer not yet attached) swallows emits silently.
#[derive(Clone, Debug, Default)]
pub struct FilterEmitter {
    sender: Option<Sender<TimelineFilter>>,
}

impl FilterEmitter {
    /// Create an emitter connected to the consumer's channel.
    pub fn new(sender: Sender<TimelineFilter>) -> Self {
        Self {
            sender: Some(sender),
        }
    }

    /// Create an unwired emitter (for tests or when no consumer exists).
    pub fn dummy() -> Self {
        Self { sender: None }
    }

    /// Hand the filter to the consumer. No transformation, no retry;
    /// silent if no receiver is attached.
    pub fn emit(&self, filter: TimelineFilter) {
        if let Some(ref tx) = self.sender {
            let _ = tx.send(filter); // Ignore send errors (receiver might be dropped)
        }
    }
}
