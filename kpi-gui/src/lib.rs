use eframe::egui;
use kpi_core::input::{IndicatorDraft, MeasurementDraft};
use kpi_core::settings::{save_view_settings, ViewSettings};
use kpi_core::split_pane::{ListenerRegistry, SplitPaneController};
use kpi_core::store::{FileStore, IndicatorStore};
use std::path::PathBuf;

mod chart_view;
pub mod export;
mod ui;

#[derive(Debug, Clone)]
pub struct GuiConfig {
    pub title: String,
    pub width: f32,
    pub height: f32,
    pub settings: ViewSettings,
    /// Where divider and theme changes are written back.
    pub settings_path: PathBuf,
}

impl Default for GuiConfig {
    fn default() -> Self {
        Self {
            title: "Performance indicators".to_string(),
            width: 1280.0,
            height: 720.0,
            settings: ViewSettings::default(),
            settings_path: PathBuf::from("kpi_view.json"),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum GuiError {
    #[error("gui error: {0}")]
    Gui(String),
}

/// Indicator metadata form; `indicator_id` is `None` while creating.
pub(crate) struct IndicatorEditor {
    pub(crate) indicator_id: Option<u64>,
    pub(crate) draft: IndicatorDraft,
}

pub(crate) struct KpiApp {
    pub(crate) store: FileStore,
    pub(crate) settings: ViewSettings,
    pub(crate) settings_path: PathBuf,
    pub(crate) split: SplitPaneController,
    pub(crate) selected: Option<u64>,
    pub(crate) query: String,
    pub(crate) measurement_draft: MeasurementDraft,
    pub(crate) editor: Option<IndicatorEditor>,
    pub(crate) status: String,
}

impl KpiApp {
    fn new(store: FileStore, settings: ViewSettings, settings_path: PathBuf) -> Self {
        let split = SplitPaneController::new(settings.divider_ratio, ListenerRegistry::new());
        let selected = store
            .indicators()
            .ok()
            .and_then(|indicators| indicators.first().map(|i| i.id));
        Self {
            store,
            settings,
            settings_path,
            split,
            selected,
            query: String::new(),
            measurement_draft: MeasurementDraft::default(),
            editor: None,
            status: String::new(),
        }
    }

    pub(crate) fn persist_settings(&mut self) {
        self.settings.divider_ratio = self.split.ratio();
        if let Err(err) = save_view_settings(&self.settings_path, &self.settings) {
            log::warn!("{err}");
            self.status = err;
        }
    }
}

impl eframe::App for KpiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(if self.settings.dark_theme {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        });
        self.render_toolbar(ctx);
        self.render_editor_window(ctx);
        self.render_panes(ctx);
    }
}

/// Opens the indicator screen on top of `store`.
pub fn run_gui(config: GuiConfig, store: FileStore) -> Result<(), GuiError> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([config.width, config.height]),
        ..Default::default()
    };
    let GuiConfig {
        title,
        settings,
        settings_path,
        ..
    } = config;
    log::info!("opening indicator screen on {}", store.path().display());
    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Box::new(KpiApp::new(store, settings, settings_path))),
    )
    .map_err(|err| GuiError::Gui(err.to_string()))
}
