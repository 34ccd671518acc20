use crate::normalize::normalize_series;
use indicator::Indicator;
use serde::Serialize;

/// Position of a value relative to the alert threshold and the objective.
///
/// Variants are ordered from worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Band {
    BelowAlert,
    BetweenAlertAndObjective,
    AtOrAboveObjective,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Band {
    pub fn label(self) -> &'static str {
        match self {
            Band::BelowAlert => "below-alert",
            Band::BetweenAlertAndObjective => "between-alert-and-objective",
            Band::AtOrAboveObjective => "at-or-above-objective",
        }
    }

    pub fn color(self) -> Rgb {
        match self {
            Band::BelowAlert => Rgb { r: 220, g: 76, b: 70 },
            Band::BetweenAlertAndObjective => Rgb { r: 255, g: 176, b: 59 },
            Band::AtOrAboveObjective => Rgb { r: 78, g: 201, b: 120 },
        }
    }
}

/// Three-way comparison, alert check first.
///
/// The threshold order is not validated: with `alert_threshold > objective`
/// the checks still run in this order and a value between the two lands in
/// `BelowAlert`.
pub fn classify(value: f64, objective: f64, alert_threshold: f64) -> Band {
    if value < alert_threshold {
        Band::BelowAlert
    } else if value < objective {
        Band::BetweenAlertAndObjective
    } else {
        Band::AtOrAboveObjective
    }
}

/// True when the most recent measurement (by timestamp) is below the alert
/// threshold. An indicator without measurements is never under alert.
pub fn is_under_alert(indicator: &Indicator) -> bool {
    normalize_series(&indicator.measurements)
        .last()
        .is_some_and(|latest| latest.value() < indicator.alert_threshold)
}

#[cfg(test)]
mod tests {
    use super::{classify, is_under_alert, Band};
    use indicator::{Indicator, Measurement};

    #[test]
    fn boundaries_belong_to_the_upper_band() {
        assert_eq!(classify(69.9, 90.0, 70.0), Band::BelowAlert);
        assert_eq!(classify(70.0, 90.0, 70.0), Band::BetweenAlertAndObjective);
        assert_eq!(classify(89.9, 90.0, 70.0), Band::BetweenAlertAndObjective);
        assert_eq!(classify(90.0, 90.0, 70.0), Band::AtOrAboveObjective);
    }

    #[test]
    fn inverted_thresholds_keep_the_literal_check_order() {
        // alert 90 above objective 70
        assert_eq!(classify(80.0, 70.0, 90.0), Band::BelowAlert);
        assert_eq!(classify(95.0, 70.0, 90.0), Band::AtOrAboveObjective);
        assert_eq!(classify(60.0, 70.0, 90.0), Band::BelowAlert);
    }

    #[test]
    fn under_alert_uses_latest_by_timestamp_not_position() {
        let mut indicator = Indicator::new(1, "Closure", 90.0, 70.0);
        indicator.measurements = vec![
            Measurement::new(1, "2024-06", 60.0),
            Measurement::new(2, "2024-02", 95.0),
        ];
        assert!(is_under_alert(&indicator));

        indicator.measurements.push(Measurement::new(3, "2024-07", 75.0));
        assert!(!is_under_alert(&indicator));
    }

    #[test]
    fn no_measurements_no_alert() {
        assert!(!is_under_alert(&Indicator::new(1, "Empty", 90.0, 70.0)));
    }

    #[test]
    fn bands_are_ordered_worst_first() {
        assert!(Band::BelowAlert < Band::BetweenAlertAndObjective);
        assert!(Band::BetweenAlertAndObjective < Band::AtOrAboveObjective);
    }
}
