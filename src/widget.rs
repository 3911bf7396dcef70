//! egui adapter for the timeline density filter.
//!
//! Thin event-binding layer: painting and pointer handling live here, all
//! filter semantics live in [`TimelineInputSync`] so they stay callable from
//! tests without a UI. Data flow per frame: draw heatmap + playhead from the
//! store, map pointer input to `on_slider_move`/`on_double_activate`, route
//! the combo boxes through `on_dropdown_change`, then pump `tick()` for the
//! debounce window.

use eframe::egui::{self, Color32, Pos2, Rect, Sense, Ui, Vec2};

use crate::filter::TimelineFilter;
use crate::heatmap::{DrawSurface, render_heatmap};
use crate::store::TimelineStore;
use crate::sync::TimelineInputSync;

/// Configuration for the timeline bar widget
#[derive(Clone, Debug)]
pub struct TimelineBarConfig {
    pub bar_height: f32,
    pub show_label: bool,
    pub show_dropdowns: bool,
    pub background: Color32,
    pub bar_color: Color32,
    pub playhead_color: Color32,
}

impl Default for TimelineBarConfig {
    fn default() -> Self {
        Self {
            bar_height: 24.0,
            show_label: true,
            show_dropdowns: true,
            background: Color32::from_rgb(40, 40, 45),
            bar_color: Color32::from_rgb(80, 200, 120),
            playhead_color: Color32::from_rgb(255, 220, 100),
        }
    }
}

/// Paints heatmap bars straight into the widget rect.
struct PainterSurface<'a> {
    painter: &'a egui::Painter,
    rect: Rect,
    color: Color32,
}

impl DrawSurface for PainterSurface<'_> {
    fn width(&self) -> f32 {
        self.rect.width()
    }

    fn height(&self) -> f32 {
        self.rect.height()
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, intensity: f32) {
        let bar = Rect::from_min_max(
            Pos2::new(self.rect.min.x + x, self.rect.min.y + y),
            Pos2::new(self.rect.min.x + x + w, self.rect.min.y + y + h),
        );
        self.painter
            .rect_filled(bar, 0.0, self.color.gamma_multiply(intensity));
    }
}

/// Timeline density filter bar: heatmap strip with playhead, label, and
/// year/month dropdowns. Renders nothing when the store is empty (the
/// control is inert until a histogram loads).
///
/// Returns the filter emitted this frame, if any.
pub fn timeline_bar(
    ui: &mut Ui,
    store: &TimelineStore,
    sync: &mut TimelineInputSync,
    config: &TimelineBarConfig,
) -> Option<TimelineFilter> {
    if store.is_empty() || !sync.enabled() {
        return None;
    }
    let n = store.len();
    let mut emitted: Option<TimelineFilter> = None;

    // Heatmap strip
    let desired_size = Vec2::new(ui.available_width(), config.bar_height);
    let (rect, response) = ui.allocate_exact_size(desired_size, Sense::click_and_drag());

    if ui.is_rect_visible(rect) {
        let painter = ui.painter();
        painter.rect_filled(rect, 0.0, config.background);
        let mut surface = PainterSurface {
            painter,
            rect,
            color: config.bar_color,
        };
        render_heatmap(store.positions(), store.max_count(), &mut surface);
        if let Some(index) = sync.slider_index() {
            draw_playhead(painter, rect, index, n, config.playhead_color);
        }
    }

    // Pointer input: double-click resets, click/drag scrubs
    if response.double_clicked() {
        sync.on_double_activate();
        emitted = Some(sync.filter());
    } else if response.dragged() || response.clicked() {
        if let Some(pos) = response.interact_pointer_pos() {
            let ratio = ((pos.x - rect.min.x) / rect.width()).clamp(0.0, 1.0);
            let index = ((ratio * n as f32) as usize).min(n - 1);
            sync.on_slider_move(index);
        }
    }

    // Label + dropdown row
    if config.show_label || config.show_dropdowns {
        ui.horizontal(|ui| {
            if config.show_label {
                ui.label(sync.label());
            }
            if config.show_dropdowns {
                ui.add_space(8.0);
                if let Some((year, month)) = dropdown_row(ui, store, sync) {
                    sync.on_dropdown_change(&year, &month);
                    emitted = Some(sync.filter());
                }
            }
        });
    }

    // Debounce pump
    if let Some(filter) = sync.tick() {
        emitted = Some(filter);
    }
    if sync.is_pending() {
        ui.ctx()
            .request_repaint_after(std::time::Duration::from_millis(16));
    }

    emitted
}

/// Year/month combo boxes. Returns the raw string values to feed to
/// `on_dropdown_change` when either selection changed.
fn dropdown_row(
    ui: &mut Ui,
    store: &TimelineStore,
    sync: &TimelineInputSync,
) -> Option<(String, String)> {
    let mut year_select = sync.year_select();
    let mut month_select = sync.month_select();
    let mut changed = false;

    let year_text = year_select
        .map(|y| y.to_string())
        .unwrap_or_else(|| "—".to_string());
    egui::ComboBox::from_id_salt("timeline_year")
        .selected_text(year_text)
        .width(70.0)
        .show_ui(ui, |ui| {
            changed |= ui.selectable_value(&mut year_select, None, "—").changed();
            for year in store.years() {
                changed |= ui
                    .selectable_value(&mut year_select, Some(year), year.to_string())
                    .changed();
            }
        });

    let month_text = month_select
        .map(|m| sync.month_label(m))
        .unwrap_or_else(|| "—".to_string());
    egui::ComboBox::from_id_salt("timeline_month")
        .selected_text(month_text)
        .width(100.0)
        .show_ui(ui, |ui| {
            changed |= ui.selectable_value(&mut month_select, None, "—").changed();
            for month in 1..=12u32 {
                changed |= ui
                    .selectable_value(&mut month_select, Some(month), sync.month_label(month))
                    .changed();
            }
        });

    changed.then(|| {
        (
            year_select.map(|y| y.to_string()).unwrap_or_default(),
            month_select.map(|m| m.to_string()).unwrap_or_default(),
        )
    })
}

/// Draw the playhead line at the center of the current index slot.
fn draw_playhead(painter: &egui::Painter, rect: Rect, index: usize, total: usize, color: Color32) {
    let x = rect.min.x + ((index as f32 + 0.5) / total as f32) * rect.width();
    painter.line_segment(
        [Pos2::new(x, rect.min.y), Pos2::new(x, rect.max.y)],
        (2.0, color),
    );
}
