//! Standalone timeline density filter window for development and testing.
//!
//! Feeds the widget from a JSON file, a backend URL (with the `http`
//! feature), or a synthetic histogram, and shows every emitted filter in a
//! bottom status panel.

use std::path::PathBuf;

use clap::Parser;
use crossbeam_channel::Receiver;
use eframe::egui;
use log::warn;

use photoline::{
    timeline_bar, DensityBucket, DensityHistogram, FilterEmitter, JsonFileSource, StaticSource,
    TimelineBarConfig, TimelineFilter, TimelineInputSync, TimelineStore,
};

/// Timeline density filter demo
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Load the histogram from a JSON file ({"density": [...]})
    #[arg(short = 'j', long = "json", value_name = "FILE")]
    json: Option<PathBuf>,

    /// Fetch the histogram from a backend URL
    #[cfg(feature = "http")]
    #[arg(short = 'u', long = "url", value_name = "URL")]
    url: Option<String>,

    /// Number of synthetic months when no input is given
    #[arg(long = "months", value_name = "N", default_value = "48")]
    months: u32,
}

fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}

fn main() -> eframe::Result<()> {
    init_logger();
    let args = Args::parse();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 160.0])
            .with_title("Photoline - Timeline Filter"),
        ..Default::default()
    };

    eframe::run_native(
        "photoline-timeline",
        options,
        Box::new(move |_cc| Ok(Box::new(TimelineApp::new(&args)))),
    )
}

struct TimelineApp {
    store: TimelineStore,
    sync: TimelineInputSync,
    config: TimelineBarConfig,
    filter_rx: Receiver<TimelineFilter>,
    last_filter: String,
    error_msg: Option<String>,
}

impl TimelineApp {
    fn new(args: &Args) -> Self {
        let (store, error_msg) = match load_store(args) {
            Ok(store) => (store, None),
            Err(e) => {
                // Control stays hidden on load failure; no retry
                warn!("{}", e);
                (TimelineStore::default(), Some(e.to_string()))
            }
        };

        let (tx, filter_rx) = crossbeam_channel::unbounded();
        let sync = TimelineInputSync::new(&store, FilterEmitter::new(tx));

        Self {
            store,
            sync,
            config: TimelineBarConfig::default(),
            filter_rx,
            last_filter: "(none yet)".to_string(),
            error_msg,
        }
    }
}

impl eframe::App for TimelineApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Error panel
        if let Some(error) = &self.error_msg {
            egui::TopBottomPanel::top("error_panel").show(ctx, |ui| {
                ui.colored_label(egui::Color32::RED, error);
            });
        }

        // Status panel: what the grid/query consumer would receive
        egui::TopBottomPanel::bottom("status_panel").show(ctx, |ui| {
            while let Ok(filter) = self.filter_rx.try_recv() {
                self.last_filter = describe(filter);
            }
            ui.horizontal(|ui| {
                ui.label(format!("Months: {}", self.store.len()));
                ui.separator();
                ui.label(format!("Max count: {}", self.store.max_count()));
                ui.separator();
                ui.label(format!("Emitted filter: {}", self.last_filter));
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.store.is_empty() {
                ui.centered_and_justified(|ui| {
                    ui.label("No timeline data");
                });
            } else {
                timeline_bar(ui, &self.store, &mut self.sync, &self.config);
            }
        });
    }
}

fn load_store(args: &Args) -> anyhow::Result<TimelineStore> {
    #[cfg(feature = "http")]
    if let Some(url) = &args.url {
        return Ok(TimelineStore::load(&photoline::HttpSource::new(url))?);
    }
    if let Some(path) = &args.json {
        return Ok(TimelineStore::load(&JsonFileSource::new(path))?);
    }
    let source = StaticSource::new(synthetic_histogram(args.months));
    Ok(TimelineStore::load(&source)?)
}

/// Deterministic fake densities, a few years ending mid-2020s.
fn synthetic_histogram(months: u32) -> DensityHistogram {
    let density = (0..months)
        .map(|i| {
            let year = 2022 + (i / 12) as i32;
            let month = i % 12 + 1;
            // Uneven but repeatable counts
            let count = (i * 37 % 97 + 1) * (1 + i % 3);
            DensityBucket { year, month, count }
        })
        .collect();
    DensityHistogram { density }
}

fn describe(filter: TimelineFilter) -> String {
    match filter {
        None => "all dates".to_string(),
        Some(f) => match f.month {
            Some(m) => format!("{}-{:02}", f.year, m),
            None => format!("{}", f.year),
        },
    }
}
