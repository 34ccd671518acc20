use crate::split_pane::{accepts_ratio, DEFAULT_RATIO};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const MIN_CHART_WIDTH: u32 = 200;
pub const MIN_CHART_HEIGHT: u32 = 150;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewSettings {
    #[serde(default = "default_divider_ratio")]
    pub divider_ratio: f32,
    #[serde(default = "default_dark_theme")]
    pub dark_theme: bool,
    #[serde(default = "default_chart_width")]
    pub chart_width: u32,
    #[serde(default = "default_chart_height")]
    pub chart_height: u32,
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
}

fn default_divider_ratio() -> f32 {
    DEFAULT_RATIO
}

fn default_dark_theme() -> bool {
    true
}

fn default_chart_width() -> u32 {
    1200
}

fn default_chart_height() -> u32 {
    700
}

fn default_data_file() -> PathBuf {
    PathBuf::from("indicators.json")
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            divider_ratio: default_divider_ratio(),
            dark_theme: default_dark_theme(),
            chart_width: default_chart_width(),
            chart_height: default_chart_height(),
            data_file: default_data_file(),
        }
    }
}

pub fn normalize_view_settings(mut settings: ViewSettings) -> ViewSettings {
    if !accepts_ratio(settings.divider_ratio) {
        log::warn!(
            "divider ratio {} outside the allowed range; using {DEFAULT_RATIO}",
            settings.divider_ratio
        );
        settings.divider_ratio = DEFAULT_RATIO;
    }
    settings.chart_width = settings.chart_width.max(MIN_CHART_WIDTH);
    settings.chart_height = settings.chart_height.max(MIN_CHART_HEIGHT);
    settings
}

/// Reads view settings, falling back to defaults when the file is missing.
pub fn load_view_settings(path: &Path) -> Result<ViewSettings, String> {
    if !path.exists() {
        return Ok(ViewSettings::default());
    }
    let data = std::fs::read(path)
        .map_err(|e| format!("Failed to read view settings file '{}': {e}", path.display()))?;
    let settings: ViewSettings = serde_json::from_slice(&data)
        .map_err(|e| format!("Failed to parse view settings file '{}': {e}", path.display()))?;
    Ok(normalize_view_settings(settings))
}

pub fn save_view_settings(path: &Path, settings: &ViewSettings) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let data = serde_json::to_vec_pretty(settings)
        .map_err(|e| format!("Failed to serialize view settings: {e}"))?;
    std::fs::write(path, data)
        .map_err(|e| format!("Failed to write view settings file '{}': {e}", path.display()))
}
