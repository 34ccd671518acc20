use crate::input::format_scale_label;
use crate::normalize::{normalize_series, SeriesPoint};
use crate::scale::{compute_scale, Scale};
use crate::status::{classify, Band, Rgb};
use indicator::Indicator;
use serde::Serialize;

/// Renderable description of an indicator chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartLayout {
    Placeholder { reason: PlaceholderReason },
    Chart(ChartView),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderReason {
    EmptySeries,
    DegenerateScale,
}

impl PlaceholderReason {
    pub fn message(self) -> &'static str {
        match self {
            PlaceholderReason::EmptySeries => "No measurements recorded yet",
            PlaceholderReason::DegenerateScale => "No positive finite scale for these values",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartView {
    pub unit: String,
    pub max_scale: f64,
    pub gridlines: [GridLine; 3],
    pub bars: Vec<Bar>,
    pub objective_line: ReferenceLine,
    pub alert_line: ReferenceLine,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridLine {
    pub value: f64,
    pub position: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceLine {
    pub value: f64,
    pub position: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub measurement_id: u64,
    pub value: f64,
    /// Fraction of the plot height, `value / max_scale`.
    pub height: f64,
    pub band: Band,
    pub color: Rgb,
    /// `%b %y`, empty when the timestamp is unreadable.
    pub axis_label: String,
    pub tooltip: String,
}

impl ChartLayout {
    pub fn view(&self) -> Option<&ChartView> {
        match self {
            ChartLayout::Chart(view) => Some(view),
            ChartLayout::Placeholder { .. } => None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, ChartLayout::Placeholder { .. })
    }
}

/// Projects an ordered series onto the given scale.
///
/// Pure: the same inputs always give the same layout. Empty series and
/// degenerate scales produce a placeholder and no division happens.
pub fn render_chart(
    series: &[SeriesPoint<'_>],
    objective: f64,
    alert_threshold: f64,
    scale: Scale,
    unit: &str,
) -> ChartLayout {
    if series.is_empty() {
        return ChartLayout::Placeholder {
            reason: PlaceholderReason::EmptySeries,
        };
    }
    if scale.is_degenerate() {
        log::debug!("max scale {} is not usable; rendering placeholder", scale.max_scale);
        return ChartLayout::Placeholder {
            reason: PlaceholderReason::DegenerateScale,
        };
    }

    let bars = series
        .iter()
        .map(|point| {
            let value = point.value();
            let band = classify(value, objective, alert_threshold);
            Bar {
                measurement_id: point.measurement.id,
                value,
                height: scale.fraction(value),
                band,
                color: band.color(),
                axis_label: point
                    .timestamp
                    .map(|ts| ts.format("%b %y").to_string())
                    .unwrap_or_default(),
                tooltip: value.to_string(),
            }
        })
        .collect();

    let gridlines = scale.gridlines().map(|value| GridLine {
        value,
        position: scale.fraction(value),
        label: format_scale_label(value),
    });

    ChartLayout::Chart(ChartView {
        unit: unit.to_string(),
        max_scale: scale.max_scale,
        gridlines,
        bars,
        objective_line: ReferenceLine {
            value: objective,
            position: scale.fraction(objective),
        },
        alert_line: ReferenceLine {
            value: alert_threshold,
            position: scale.fraction(alert_threshold),
        },
    })
}

/// Runs normalize, scale and render over a fresh indicator snapshot.
pub fn render_indicator(indicator: &Indicator) -> ChartLayout {
    let series = normalize_series(&indicator.measurements);
    if series.is_empty() {
        return ChartLayout::Placeholder {
            reason: PlaceholderReason::EmptySeries,
        };
    }
    let scale = compute_scale(
        series.iter().map(SeriesPoint::value),
        indicator.objective,
        indicator.alert_threshold,
    );
    log::debug!(
        "indicator {} recomputed: {} points, max scale {}",
        indicator.id,
        series.len(),
        scale.max_scale
    );
    render_chart(
        &series,
        indicator.objective,
        indicator.alert_threshold,
        scale,
        &indicator.unit,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use indicator::Measurement;

    #[test]
    fn gridlines_carry_positions_and_trimmed_labels() {
        let mut indicator = Indicator::new(1, "Closure", 50.0, 20.0);
        indicator.measurements = vec![Measurement::new(1, "2024-01", 100.0)];
        let layout = render_indicator(&indicator);
        let view = layout.view().expect("chart");
        assert_eq!(view.gridlines[0].position, 1.0);
        assert_eq!(view.gridlines[1].position, 0.5);
        assert_eq!(view.gridlines[2].position, 0.0);
        assert_eq!(view.gridlines[2].label, "0");
        assert_eq!(view.gridlines[1].label, "55");
    }

    #[test]
    fn malformed_timestamp_renders_with_blank_label() {
        let mut indicator = Indicator::new(1, "Closure", 50.0, 20.0);
        indicator.measurements = vec![
            Measurement::new(1, "2024-02", 30.0),
            Measurement::new(2, "??", 10.0),
        ];
        let layout = render_indicator(&indicator);
        let view = layout.view().expect("chart");
        assert_eq!(view.bars.len(), 2);
        assert_eq!(view.bars[0].measurement_id, 2);
        assert_eq!(view.bars[0].axis_label, "");
        assert_eq!(view.bars[1].axis_label, "Feb 24");
    }

    #[test]
    fn tooltip_keeps_full_precision() {
        let mut indicator = Indicator::new(1, "Closure", 1.0, 0.5);
        indicator.measurements = vec![Measurement::new(1, "2024-01", 0.123456789)];
        let layout = render_indicator(&indicator);
        assert_eq!(layout.view().unwrap().bars[0].tooltip, "0.123456789");
    }

    #[test]
    fn overflowing_values_render_a_placeholder() {
        let mut indicator = Indicator::new(1, "Closure", 90.0, 70.0);
        indicator.measurements = vec![
            Measurement::new(1, "2024-01", 1.7e308),
            Measurement::new(2, "2024-02", 1.0e308),
        ];
        assert_eq!(
            render_indicator(&indicator),
            ChartLayout::Placeholder {
                reason: PlaceholderReason::DegenerateScale
            }
        );
    }

    #[test]
    fn layout_serializes_with_kind_tag() {
        let indicator = Indicator::new(1, "Closure", 1.0, 0.5);
        let json = serde_json::to_value(render_indicator(&indicator)).unwrap();
        assert_eq!(json["kind"], "placeholder");
        assert_eq!(json["reason"], "empty_series");
    }
}
