use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub mod timestamp;
pub use timestamp::parse_timestamp;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dashboard {
    pub name: String,
    #[serde(default)]
    pub indicators: Vec<Indicator>,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self {
            name: "Indicators".to_string(),
            indicators: Vec::new(),
        }
    }
}

/// A tracked performance metric with its objective, alert threshold and
/// the measurements recorded against it.
///
/// No ordering between `objective` and `alert_threshold` is enforced here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Indicator {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub unit: String,
    pub objective: f64,
    pub alert_threshold: f64,
    #[serde(default)]
    pub measurements: Vec<Measurement>,
    #[serde(default)]
    pub risk_ids: Vec<u64>,
    #[serde(default)]
    pub control_ids: Vec<u64>,
    #[serde(default)]
    pub category_ids: Vec<u64>,
    #[serde(default)]
    pub owner_id: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub id: u64,
    pub timestamp: String,
    pub value: f64,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub mode: EntryMode,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryMode {
    #[default]
    Manual,
    Automatic,
}

impl EntryMode {
    pub fn label(self) -> &'static str {
        match self {
            EntryMode::Manual => "manual",
            EntryMode::Automatic => "automatic",
        }
    }
}

impl std::str::FromStr for EntryMode {
    type Err = IndicatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "manual" => Ok(EntryMode::Manual),
            "automatic" | "auto" => Ok(EntryMode::Automatic),
            other => Err(IndicatorError::Invalid(format!(
                "entry mode must be 'manual' or 'automatic', got '{other}'"
            ))),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum IndicatorError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid record: {0}")]
    Invalid(String),
}

impl Indicator {
    pub fn new(id: u64, name: impl Into<String>, objective: f64, alert_threshold: f64) -> Self {
        Self {
            id,
            name: name.into(),
            code: String::new(),
            unit: String::new(),
            objective,
            alert_threshold,
            measurements: Vec::new(),
            risk_ids: Vec::new(),
            control_ids: Vec::new(),
            category_ids: Vec::new(),
            owner_id: None,
        }
    }

    pub fn validate(&self) -> Result<(), IndicatorError> {
        if self.name.trim().is_empty() {
            return Err(IndicatorError::Invalid("indicator name is empty".to_string()));
        }
        if !self.objective.is_finite() {
            return Err(IndicatorError::Invalid("objective must be a finite number".to_string()));
        }
        if !self.alert_threshold.is_finite() {
            return Err(IndicatorError::Invalid(
                "alert threshold must be a finite number".to_string(),
            ));
        }
        Ok(())
    }

    pub fn measurement(&self, id: u64) -> Option<&Measurement> {
        self.measurements.iter().find(|m| m.id == id)
    }
}

impl Measurement {
    pub fn new(id: u64, timestamp: impl Into<String>, value: f64) -> Self {
        Self {
            id,
            timestamp: timestamp.into(),
            value,
            comment: None,
            mode: EntryMode::Manual,
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn with_mode(mut self, mode: EntryMode) -> Self {
        self.mode = mode;
        self
    }

    /// `None` when the stored timestamp cannot be parsed.
    pub fn parsed_timestamp(&self) -> Option<NaiveDateTime> {
        parse_timestamp(&self.timestamp)
    }

    /// Boundary check applied before a measurement is appended to a store.
    pub fn validate(&self) -> Result<(), IndicatorError> {
        if !self.value.is_finite() {
            return Err(IndicatorError::Invalid(format!(
                "measurement {} value must be a finite number",
                self.id
            )));
        }
        if self.parsed_timestamp().is_none() {
            return Err(IndicatorError::Invalid(format!(
                "measurement {} has an unreadable timestamp '{}'",
                self.id, self.timestamp
            )));
        }
        Ok(())
    }
}

impl Dashboard {
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), IndicatorError> {
        let data = serde_json::to_vec_pretty(self)?;
        fs::write(path, data)?;
        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, IndicatorError> {
        let data = fs::read(path)?;
        let dashboard = serde_json::from_slice(&data)?;
        Ok(dashboard)
    }

    pub fn indicator(&self, id: u64) -> Option<&Indicator> {
        self.indicators.iter().find(|i| i.id == id)
    }

    pub fn indicator_mut(&mut self, id: u64) -> Option<&mut Indicator> {
        self.indicators.iter_mut().find(|i| i.id == id)
    }

    pub fn next_indicator_id(&self) -> u64 {
        self.indicators.iter().map(|i| i.id).max().unwrap_or(0) + 1
    }

    /// Measurement ids are unique across the whole dashboard.
    pub fn next_measurement_id(&self) -> u64 {
        self.indicators
            .iter()
            .flat_map(|i| i.measurements.iter().map(|m| m.id))
            .max()
            .unwrap_or(0)
            + 1
    }
}
