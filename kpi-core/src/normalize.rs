use chrono::NaiveDateTime;
use indicator::Measurement;

/// A measurement paired with its parsed timestamp, in chart order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint<'a> {
    pub measurement: &'a Measurement,
    /// `None` when the stored timestamp is unreadable.
    pub timestamp: Option<NaiveDateTime>,
}

impl SeriesPoint<'_> {
    pub fn value(&self) -> f64 {
        self.measurement.value
    }
}

/// Orders measurements ascending by timestamp without touching the input.
///
/// The sort is stable: equal timestamps keep their input order. Entries with
/// an unreadable timestamp sort before every readable one, again in input
/// order.
pub fn normalize_series(measurements: &[Measurement]) -> Vec<SeriesPoint<'_>> {
    let mut points: Vec<SeriesPoint<'_>> = measurements
        .iter()
        .map(|measurement| SeriesPoint {
            measurement,
            timestamp: measurement.parsed_timestamp(),
        })
        .collect();
    let malformed = points.iter().filter(|p| p.timestamp.is_none()).count();
    if malformed > 0 {
        log::warn!("{malformed} measurement(s) have unreadable timestamps; ordering them first");
    }
    points.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
    points
}
