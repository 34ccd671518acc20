use crate::normalize::normalize_series;
use crate::status::{classify, Band};
use indicator::Indicator;
use serde::Serialize;

/// One row of the indicator list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorSummary {
    pub id: u64,
    pub name: String,
    pub code: String,
    pub unit: String,
    pub latest_value: Option<f64>,
    pub latest_band: Option<Band>,
    pub is_under_alert: bool,
    pub measurement_count: usize,
}

pub fn summarize(indicator: &Indicator) -> IndicatorSummary {
    let series = normalize_series(&indicator.measurements);
    let latest_value = series.last().map(|p| p.value());
    IndicatorSummary {
        id: indicator.id,
        name: indicator.name.clone(),
        code: indicator.code.clone(),
        unit: indicator.unit.clone(),
        latest_value,
        latest_band: latest_value
            .map(|v| classify(v, indicator.objective, indicator.alert_threshold)),
        is_under_alert: latest_value.is_some_and(|v| v < indicator.alert_threshold),
        measurement_count: series.len(),
    }
}

pub fn matches_query(indicator: &Indicator, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    query.is_empty()
        || indicator.name.to_lowercase().contains(&query)
        || indicator.code.to_lowercase().contains(&query)
}

/// Summaries for every indicator matching `query` (name or code, case
/// insensitive), in input order.
pub fn summarize_all(indicators: &[Indicator], query: &str) -> Vec<IndicatorSummary> {
    indicators
        .iter()
        .filter(|indicator| matches_query(indicator, query))
        .map(summarize)
        .collect()
}
