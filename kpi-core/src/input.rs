use indicator::{parse_timestamp, EntryMode, Indicator, Measurement};

/// Parses a value typed into a form field.
///
/// Both `.` and `,` are accepted as decimal separators. Half-typed input
/// such as `-`, `1.` or `1,` is rejected.
pub fn parse_value_input(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed == "-" || trimmed.ends_with('.') || trimmed.ends_with(',') {
        return None;
    }
    trimmed
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Formats a scale value with at most 6 decimals and no trailing zeros.
pub fn format_scale_label(value: f64) -> String {
    let truncated = (value * 1_000_000.0).trunc() / 1_000_000.0;
    let mut text = format!("{truncated:.6}");
    while text.contains('.') && text.ends_with('0') {
        text.pop();
    }
    if text.ends_with('.') {
        text.pop();
    }
    if text == "-0" {
        text = "0".to_string();
    }
    text
}

/// Text state of the measurement entry form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeasurementDraft {
    pub value_text: String,
    pub timestamp_text: String,
    pub comment: String,
    pub mode: EntryMode,
}

impl MeasurementDraft {
    pub fn into_measurement(&self, id: u64) -> Result<Measurement, String> {
        let value = parse_value_input(&self.value_text)
            .ok_or_else(|| format!("'{}' is not a number", self.value_text.trim()))?;
        let timestamp = self.timestamp_text.trim();
        if parse_timestamp(timestamp).is_none() {
            return Err(format!("'{timestamp}' is not a date (use YYYY-MM-DD)"));
        }
        let comment = self.comment.trim();
        Ok(Measurement {
            id,
            timestamp: timestamp.to_string(),
            value,
            comment: (!comment.is_empty()).then(|| comment.to_string()),
            mode: self.mode,
        })
    }
}

/// Text state of the indicator metadata form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndicatorDraft {
    pub name: String,
    pub code: String,
    pub unit: String,
    pub objective_text: String,
    pub alert_text: String,
}

impl IndicatorDraft {
    pub fn from_indicator(indicator: &Indicator) -> Self {
        Self {
            name: indicator.name.clone(),
            code: indicator.code.clone(),
            unit: indicator.unit.clone(),
            objective_text: indicator.objective.to_string(),
            alert_text: indicator.alert_threshold.to_string(),
        }
    }

    /// Applies the draft onto `base`, keeping identity, links and measurements.
    pub fn apply_to(&self, base: &Indicator) -> Result<Indicator, String> {
        let objective = parse_value_input(&self.objective_text)
            .ok_or_else(|| format!("objective '{}' is not a number", self.objective_text.trim()))?;
        let alert_threshold = parse_value_input(&self.alert_text).ok_or_else(|| {
            format!("alert threshold '{}' is not a number", self.alert_text.trim())
        })?;
        let name = self.name.trim();
        if name.is_empty() {
            return Err("name is required".to_string());
        }
        Ok(Indicator {
            name: name.to_string(),
            code: self.code.trim().to_string(),
            unit: self.unit.trim().to_string(),
            objective,
            alert_threshold,
            ..base.clone()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_value_accepts_comma_and_rejects_partial_input() {
        assert_eq!(parse_value_input("1.25"), Some(1.25));
        assert_eq!(parse_value_input(" 2,5 "), Some(2.5));
        assert_eq!(parse_value_input("-3"), Some(-3.0));
        assert_eq!(parse_value_input(""), None);
        assert_eq!(parse_value_input("-"), None);
        assert_eq!(parse_value_input("1."), None);
        assert_eq!(parse_value_input("abc"), None);
        assert_eq!(parse_value_input("inf"), None);
    }

    #[test]
    fn scale_labels_trim_zeros() {
        assert_eq!(format_scale_label(104.5), "104.5");
        assert_eq!(format_scale_label(52.25), "52.25");
        assert_eq!(format_scale_label(0.0), "0");
        assert_eq!(format_scale_label(1.23456789), "1.234567");
    }

    #[test]
    fn measurement_draft_validates_fields() {
        let mut draft = MeasurementDraft {
            value_text: "87,5".to_string(),
            timestamp_text: "2024-04-02".to_string(),
            comment: "  ".to_string(),
            mode: EntryMode::Manual,
        };
        let measurement = draft.into_measurement(4).unwrap();
        assert_eq!(measurement.value, 87.5);
        assert_eq!(measurement.comment, None);

        draft.timestamp_text = "April".to_string();
        assert!(draft.into_measurement(4).is_err());
        draft.timestamp_text = "2024-04".to_string();
        draft.value_text = "x".to_string();
        assert!(draft.into_measurement(4).is_err());
    }

    #[test]
    fn indicator_draft_keeps_measurements() {
        let mut base = Indicator::new(3, "Old", 90.0, 70.0);
        base.measurements.push(Measurement::new(1, "2024-01", 80.0));
        let mut draft = IndicatorDraft::from_indicator(&base);
        draft.name = "New".to_string();
        draft.alert_text = "65".to_string();
        let updated = draft.apply_to(&base).unwrap();
        assert_eq!(updated.id, 3);
        assert_eq!(updated.name, "New");
        assert_eq!(updated.alert_threshold, 65.0);
        assert_eq!(updated.measurements.len(), 1);

        draft.objective_text = String::new();
        assert!(draft.apply_to(&base).is_err());
    }
}
