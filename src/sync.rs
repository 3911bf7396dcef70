//! Input synchronization - slider, dropdowns, label, and the debounce window.
//!
//! **Why**: three surfaces (continuous slider, year/month dropdowns, text
//! label) describe the same filter value. Exactly one surface drives the
//! value at a time; the others are only re-synced on explicit reset, never
//! continuously during a drag, so a scrub cannot feed back into itself.
//!
//! **Debounce**: slider moves are continuous, so their emits wait out a
//! 300 ms window (last write wins); dropdown changes and resets are discrete
//! and emit immediately, cancelling any pending slider emit first -
//! otherwise a stale slider value could fire after the selection and
//! clobber it.
//!
//! Expiry is polled via [`TimelineInputSync::tick`] from the UI update loop,
//! against an injected [`Clock`] so tests advance virtual time instead of
//! sleeping.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use log::trace;

use crate::filter::{DateFilter, FilterEmitter, TimelineFilter};
use crate::histogram::Position;
use crate::i18n::{self, KEY_ALL_DATES, NoTranslator, Translator};
use crate::store::TimelineStore;

/// Slider emit delay. Intermediate drag positions inside this window never
/// reach the consumer.
pub const DEBOUNCE_MS: u64 = 300;

/// Time source for the debounce deadline.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall-clock time (production).
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Hand-advanced clock for deterministic tests and demos.
/// Clones share the same underlying instant.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<Instant>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Arc::new(Mutex::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock().unwrap()
    }
}

/// Keeps slider, label, and dropdowns mutually consistent and produces a
/// debounced [`TimelineFilter`].
///
/// With no positions the whole control is inert: every handler is a no-op.
pub struct TimelineInputSync {
    positions: Vec<Position>,
    current_index: Option<usize>,
    current_filter: TimelineFilter,
    /// Pending debounced emit: (filter, deadline). Single in-flight window;
    /// scheduling replaces any prior one.
    pending: Option<(TimelineFilter, Instant)>,
    delay: Duration,
    year_select: Option<i32>,
    month_select: Option<u32>,
    emitter: FilterEmitter,
    translator: Box<dyn Translator>,
    clock: Box<dyn Clock>,
}

impl TimelineInputSync {
    /// Create for a loaded store. The slider starts at the rightmost
    /// position, which maps to "all dates" (no filter).
    pub fn new(store: &TimelineStore, emitter: FilterEmitter) -> Self {
        let positions = store.positions().to_vec();
        let current_index = positions.len().checked_sub(1);
        Self {
            positions,
            current_index,
            current_filter: None,
            pending: None,
            delay: Duration::from_millis(DEBOUNCE_MS),
            year_select: None,
            month_select: None,
            emitter,
            translator: Box::new(NoTranslator),
            clock: Box::new(SystemClock),
        }
    }

    /// Inject a locale provider for month names and the "all dates" label.
    pub fn with_translator(mut self, translator: Box<dyn Translator>) -> Self {
        self.translator = translator;
        self
    }

    /// Inject a time source (tests use [`ManualClock`]).
    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Whether the control accepts input at all.
    pub fn enabled(&self) -> bool {
        !self.positions.is_empty()
    }

    /// Largest valid slider index, `None` when there are no positions.
    pub fn max_index(&self) -> Option<usize> {
        self.positions.len().checked_sub(1)
    }

    pub fn slider_index(&self) -> Option<usize> {
        self.current_index
    }

    pub fn filter(&self) -> TimelineFilter {
        self.current_filter
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn year_select(&self) -> Option<i32> {
        self.year_select
    }

    pub fn month_select(&self) -> Option<u32> {
        self.month_select
    }

    /// Label for the slider surface, derived from the current index.
    pub fn label(&self) -> String {
        match (self.current_index, self.max_index()) {
            (Some(index), Some(max)) if index < max => {
                let p = self.positions[index];
                format!("{} {}", self.month_label(p.month), p.year)
            }
            _ => i18n::display(self.translator.as_ref(), KEY_ALL_DATES),
        }
    }

    /// Display name for a calendar month (1..=12), used by the month
    /// dropdown as well as the label.
    pub fn month_label(&self, month: u32) -> String {
        match i18n::month_key(month) {
            Some(key) => i18n::display(self.translator.as_ref(), key),
            None => month.to_string(),
        }
    }

    /// Slider drag handler. Clamps out-of-range indices. The rightmost
    /// index always resolves to "no filter", never to the newest bucket.
    /// (Re)starts the debounce window; only its expiry emits.
    pub fn on_slider_move(&mut self, index: usize) {
        let Some(max) = self.max_index() else {
            return;
        };
        let index = index.min(max);
        self.current_index = Some(index);
        self.current_filter = if index == max {
            None
        } else {
            let p = self.positions[index];
            Some(DateFilter {
                year: p.year,
                month: Some(p.month),
            })
        };
        let deadline = self.clock.now() + self.delay;
        self.pending = Some((self.current_filter, deadline));
        trace!(
            "Timeline slider at {}/{}, emit scheduled in {}ms",
            index,
            max,
            self.delay.as_millis()
        );
    }

    /// Dropdown handler. Values arrive as raw strings from the input layer;
    /// an unparseable field means "no constraint" for that field, and no
    /// usable year collapses the whole filter to `None`. Emits immediately,
    /// cancelling any pending slider emit first.
    pub fn on_dropdown_change(&mut self, year: &str, month: &str) {
        if !self.enabled() {
            return;
        }
        self.cancel_pending();
        let year = year.trim().parse::<i32>().ok();
        let month = month
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|m| (1..=12).contains(m));
        self.year_select = year;
        self.month_select = month;
        self.current_filter = year.map(|year| DateFilter { year, month });
        trace!("Timeline dropdown change, immediate emit: {:?}", self.current_filter);
        self.emitter.emit(self.current_filter);
    }

    /// Clear the filter: slider to the rightmost position, dropdowns empty,
    /// label back to "all dates". Emits `None` immediately.
    pub fn reset(&mut self) {
        if !self.enabled() {
            return;
        }
        self.cancel_pending();
        self.current_index = self.max_index();
        self.current_filter = None;
        self.year_select = None;
        self.month_select = None;
        trace!("Timeline reset, immediate emit");
        self.emitter.emit(None);
    }

    /// Direct-manipulation shortcut on the slider (double-click).
    pub fn on_double_activate(&mut self) {
        self.reset();
    }

    /// Debounce expiry poll; call once per UI update. Performs the emit
    /// when the window has elapsed and returns the emitted filter.
    pub fn tick(&mut self) -> Option<TimelineFilter> {
        let (filter, deadline) = self.pending?;
        if self.clock.now() < deadline {
            return None;
        }
        self.pending = None;
        trace!("Timeline debounce fired: {:?}", filter);
        self.emitter.emit(filter);
        Some(filter)
    }

    fn cancel_pending(&mut self) {
        if self.pending.take().is_some() {
            trace!("Timeline debounce cancelled");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::histogram::{DensityBucket, DensityHistogram};
    use crossbeam_channel::Receiver;

    fn store(buckets: Vec<(i32, u32, u32)>) -> TimelineStore {
        TimelineStore::from_histogram(DensityHistogram {
            density: buckets
                .into_iter()
                .map(|(year, month, count)| DensityBucket { year, month, count })
                .collect(),
        })
    }

    fn sample_store() -> TimelineStore {
        store(vec![(2023, 1, 5), (2023, 6, 2), (2024, 3, 9)])
    }

    fn rig(store: &TimelineStore) -> (TimelineInputSync, ManualClock, Receiver<TimelineFilter>) {
        let (tx, rx) = crossbeam_channel::unbounded();
        let clock = ManualClock::new();
        let sync = TimelineInputSync::new(store, FilterEmitter::new(tx))
            .with_clock(Box::new(clock.clone()));
        (sync, clock, rx)
    }

    fn advance_past_debounce(sync: &mut TimelineInputSync, clock: &ManualClock) {
        clock.advance(Duration::from_millis(DEBOUNCE_MS + 1));
        sync.tick();
    }

    #[test]
    fn test_rightmost_index_means_no_filter() {
        let store = sample_store();
        let (mut sync, clock, rx) = rig(&store);

        sync.on_slider_move(2);
        assert!(rx.try_recv().is_err()); // nothing before expiry
        advance_past_debounce(&mut sync, &clock);
        assert_eq!(rx.try_recv().unwrap(), None);
    }

    #[test]
    fn test_interior_index_resolves_position() {
        let store = sample_store();
        let (mut sync, clock, rx) = rig(&store);

        sync.on_slider_move(1);
        advance_past_debounce(&mut sync, &clock);
        assert_eq!(
            rx.try_recv().unwrap(),
            Some(DateFilter {
                year: 2023,
                month: Some(6)
            })
        );
    }

    #[test]
    fn test_max_count_round_trip() {
        let store = sample_store();
        assert_eq!(store.max_count(), 9);
        let (mut sync, clock, rx) = rig(&store);

        sync.on_slider_move(1);
        advance_past_debounce(&mut sync, &clock);
        assert_eq!(
            rx.try_recv().unwrap(),
            Some(DateFilter {
                year: 2023,
                month: Some(6)
            })
        );

        sync.on_slider_move(2); // N-1
        advance_past_debounce(&mut sync, &clock);
        assert_eq!(rx.try_recv().unwrap(), None);
    }

    #[test]
    fn test_rapid_moves_emit_once_with_last_value() {
        let store = sample_store();
        let (mut sync, clock, rx) = rig(&store);

        sync.on_slider_move(0);
        clock.advance(Duration::from_millis(100));
        assert!(sync.tick().is_none());
        sync.on_slider_move(2);
        clock.advance(Duration::from_millis(100));
        assert!(sync.tick().is_none()); // second window not elapsed yet
        sync.on_slider_move(1);
        advance_past_debounce(&mut sync, &clock);

        assert_eq!(
            rx.try_recv().unwrap(),
            Some(DateFilter {
                year: 2023,
                month: Some(6)
            })
        );
        assert!(rx.try_recv().is_err()); // exactly one emit
    }

    #[test]
    fn test_dropdown_emits_immediately_and_cancels_slider() {
        let store = sample_store();
        let (mut sync, clock, rx) = rig(&store);

        sync.on_slider_move(0);
        sync.on_dropdown_change("2024", "");
        assert_eq!(
            rx.try_recv().unwrap(),
            Some(DateFilter {
                year: 2024,
                month: None
            })
        );
        assert!(!sync.is_pending());

        // The superseded slider emit must never fire
        advance_past_debounce(&mut sync, &clock);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_dropdown_parse_rules() {
        let store = sample_store();
        let (mut sync, _clock, rx) = rig(&store);

        sync.on_dropdown_change("", "");
        assert_eq!(rx.try_recv().unwrap(), None);

        sync.on_dropdown_change("2023", "6");
        assert_eq!(
            rx.try_recv().unwrap(),
            Some(DateFilter {
                year: 2023,
                month: Some(6)
            })
        );

        // Unparseable fields are "no constraint" for that field
        sync.on_dropdown_change("banana", "6");
        assert_eq!(rx.try_recv().unwrap(), None);
        sync.on_dropdown_change("2023", "banana");
        assert_eq!(
            rx.try_recv().unwrap(),
            Some(DateFilter {
                year: 2023,
                month: None
            })
        );
    }

    #[test]
    fn test_reset_is_idempotent_and_emits_each_call() {
        let store = sample_store();
        let (mut sync, _clock, rx) = rig(&store);

        sync.on_slider_move(0);
        sync.on_dropdown_change("2024", "3");
        rx.try_recv().unwrap();

        sync.reset();
        sync.reset();

        assert_eq!(sync.filter(), None);
        assert_eq!(sync.slider_index(), Some(2));
        assert_eq!(sync.year_select(), None);
        assert_eq!(sync.month_select(), None);
        assert_eq!(sync.label(), "All Dates");

        assert_eq!(rx.try_recv().unwrap(), None);
        assert_eq!(rx.try_recv().unwrap(), None);
        assert!(rx.try_recv().is_err()); // exactly one emit per reset
    }

    #[test]
    fn test_double_activate_aliases_reset() {
        let store = sample_store();
        let (mut sync, _clock, rx) = rig(&store);

        sync.on_slider_move(0);
        sync.on_double_activate();
        assert_eq!(rx.try_recv().unwrap(), None);
        assert!(!sync.is_pending());
        assert_eq!(sync.slider_index(), Some(2));
    }

    #[test]
    fn test_empty_store_handlers_are_noops() {
        let store = store(vec![]);
        let (mut sync, clock, rx) = rig(&store);

        assert!(!sync.enabled());
        assert_eq!(sync.slider_index(), None);

        sync.on_slider_move(0);
        sync.on_dropdown_change("2024", "3");
        sync.reset();
        sync.on_double_activate();
        advance_past_debounce(&mut sync, &clock);

        assert!(rx.try_recv().is_err());
        assert_eq!(sync.filter(), None);
        assert_eq!(sync.label(), "All Dates");
    }

    #[test]
    fn test_out_of_range_index_is_clamped() {
        let store = sample_store();
        let (mut sync, clock, rx) = rig(&store);

        sync.on_slider_move(99);
        assert_eq!(sync.slider_index(), Some(2));
        advance_past_debounce(&mut sync, &clock);
        assert_eq!(rx.try_recv().unwrap(), None); // clamped to N-1 = all dates
    }

    #[test]
    fn test_label_follows_slider() {
        let store = sample_store();
        let (mut sync, _clock, _rx) = rig(&store);

        assert_eq!(sync.label(), "All Dates");
        sync.on_slider_move(1);
        assert_eq!(sync.label(), "June 2023");
        sync.on_slider_move(2);
        assert_eq!(sync.label(), "All Dates");
    }

    #[test]
    fn test_label_uses_translator() {
        let store = sample_store();
        let (tx, _rx) = crossbeam_channel::unbounded();
        let table = crate::i18n::TableTranslator::from_pairs([
            ("june", "Juni"),
            ("all-dates", "Alle Daten"),
        ]);
        let mut sync = TimelineInputSync::new(&store, FilterEmitter::new(tx))
            .with_translator(Box::new(table));

        assert_eq!(sync.label(), "Alle Daten");
        sync.on_slider_move(1);
        assert_eq!(sync.label(), "Juni 2023");
    }

    #[test]
    fn test_dropdown_does_not_move_slider_mid_drag() {
        // Display surfaces only re-sync on explicit reset
        let store = sample_store();
        let (mut sync, _clock, rx) = rig(&store);

        sync.on_slider_move(1);
        sync.on_dropdown_change("2024", "3");
        let _ = rx.try_recv();
        assert_eq!(sync.slider_index(), Some(1));
        assert_eq!(sync.label(), "June 2023");
    }
}
