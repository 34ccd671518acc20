use crate::scale::is_chartable;
use indicator::{Dashboard, Indicator, IndicatorError, Measurement};
use std::path::{Path, PathBuf};

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("unknown indicator {0}")]
    UnknownIndicator(u64),
    #[error("measurement id {measurement_id} is already recorded (saving to indicator {indicator_id})")]
    DuplicateMeasurement { indicator_id: u64, measurement_id: u64 },
    #[error("{0}")]
    Invalid(String),
    #[error("storage error: {0}")]
    Storage(#[from] IndicatorError),
}

/// Load/save collaborator the screen renders from.
///
/// Every read hands out an owned snapshot; callers re-render from a fresh
/// snapshot after each successful save.
pub trait IndicatorStore {
    fn indicators(&self) -> Result<Vec<Indicator>, StoreError>;
    fn indicator(&self, id: u64) -> Result<Option<Indicator>, StoreError>;
    /// Creates the indicator (with no measurements) or replaces the metadata
    /// of an existing one, keeping its recorded measurements.
    fn save_indicator(&mut self, indicator: Indicator) -> Result<(), StoreError>;
    /// Appends one measurement. Recorded measurements are never rewritten.
    fn save_measurement(&mut self, indicator_id: u64, measurement: Measurement) -> Result<(), StoreError>;
    fn next_indicator_id(&self) -> u64;
    fn next_measurement_id(&self) -> u64;
}

fn invalid(err: IndicatorError) -> StoreError {
    match err {
        IndicatorError::Invalid(message) => StoreError::Invalid(message),
        other => StoreError::Storage(other),
    }
}

fn check_chartable(what: &str, value: f64) -> Result<(), StoreError> {
    if !is_chartable(value) {
        return Err(StoreError::Invalid(format!(
            "{what} {value} is too large to chart"
        )));
    }
    Ok(())
}

fn upsert_indicator(dashboard: &mut Dashboard, mut indicator: Indicator) -> Result<(), StoreError> {
    indicator.validate().map_err(invalid)?;
    check_chartable("objective", indicator.objective)?;
    check_chartable("alert threshold", indicator.alert_threshold)?;
    match dashboard.indicator_mut(indicator.id) {
        Some(existing) => {
            indicator.measurements = std::mem::take(&mut existing.measurements);
            *existing = indicator;
        }
        None => {
            if !indicator.measurements.is_empty() {
                log::warn!(
                    "indicator {} created with {} measurement(s); dropping them",
                    indicator.id,
                    indicator.measurements.len()
                );
            }
            indicator.measurements.clear();
            dashboard.indicators.push(indicator);
        }
    }
    Ok(())
}

fn append_measurement(
    dashboard: &mut Dashboard,
    indicator_id: u64,
    measurement: Measurement,
) -> Result<(), StoreError> {
    measurement.validate().map_err(invalid)?;
    check_chartable("measurement value", measurement.value)?;
    let taken = dashboard
        .indicators
        .iter()
        .flat_map(|indicator| &indicator.measurements)
        .any(|existing| existing.id == measurement.id);
    let indicator = dashboard
        .indicator_mut(indicator_id)
        .ok_or(StoreError::UnknownIndicator(indicator_id))?;
    // Measurement ids are unique across the dashboard, not per indicator.
    if taken {
        return Err(StoreError::DuplicateMeasurement {
            indicator_id,
            measurement_id: measurement.id,
        });
    }
    indicator.measurements.push(measurement);
    Ok(())
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    dashboard: Dashboard,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IndicatorStore for MemoryStore {
    fn indicators(&self) -> Result<Vec<Indicator>, StoreError> {
        Ok(self.dashboard.indicators.clone())
    }

    fn indicator(&self, id: u64) -> Result<Option<Indicator>, StoreError> {
        Ok(self.dashboard.indicator(id).cloned())
    }

    fn save_indicator(&mut self, indicator: Indicator) -> Result<(), StoreError> {
        upsert_indicator(&mut self.dashboard, indicator)
    }

    fn save_measurement(&mut self, indicator_id: u64, measurement: Measurement) -> Result<(), StoreError> {
        append_measurement(&mut self.dashboard, indicator_id, measurement)
    }

    fn next_indicator_id(&self) -> u64 {
        self.dashboard.next_indicator_id()
    }

    fn next_measurement_id(&self) -> u64 {
        self.dashboard.next_measurement_id()
    }
}

/// Dashboard persisted as one JSON file, rewritten after every successful save.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    dashboard: Dashboard,
}

impl FileStore {
    /// Opens `path`, starting from an empty dashboard when it does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let dashboard = if path.exists() {
            Dashboard::load_from_file(&path)?
        } else {
            log::info!("{} not found; starting an empty dashboard", path.display());
            Dashboard::default()
        };
        Ok(Self { path, dashboard })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn commit(&mut self, updated: Dashboard) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(IndicatorError::from)?;
        }
        updated.save_to_file(&self.path)?;
        self.dashboard = updated;
        log::debug!("saved dashboard to {}", self.path.display());
        Ok(())
    }
}

impl IndicatorStore for FileStore {
    fn indicators(&self) -> Result<Vec<Indicator>, StoreError> {
        Ok(self.dashboard.indicators.clone())
    }

    fn indicator(&self, id: u64) -> Result<Option<Indicator>, StoreError> {
        Ok(self.dashboard.indicator(id).cloned())
    }

    fn save_indicator(&mut self, indicator: Indicator) -> Result<(), StoreError> {
        let mut updated = self.dashboard.clone();
        upsert_indicator(&mut updated, indicator)?;
        self.commit(updated)
    }

    fn save_measurement(&mut self, indicator_id: u64, measurement: Measurement) -> Result<(), StoreError> {
        let mut updated = self.dashboard.clone();
        append_measurement(&mut updated, indicator_id, measurement)?;
        self.commit(updated)
    }

    fn next_indicator_id(&self) -> u64 {
        self.dashboard.next_indicator_id()
    }

    fn next_measurement_id(&self) -> u64 {
        self.dashboard.next_measurement_id()
    }
}
