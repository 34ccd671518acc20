use serde::Serialize;

/// Headroom applied on top of the tallest value so nothing touches the top edge.
pub const HEADROOM: f64 = 1.10;

/// Common vertical scale shared by bars and reference lines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Scale {
    pub max_scale: f64,
}

impl Scale {
    /// Only a positive finite scale can be used as a denominator.
    pub fn is_degenerate(&self) -> bool {
        !(self.max_scale > 0.0 && self.max_scale.is_finite())
    }

    /// Gridline values from top to bottom: `max`, `max / 2` and the zero baseline.
    pub fn gridlines(&self) -> [f64; 3] {
        [self.max_scale, self.max_scale / 2.0, 0.0]
    }

    pub fn fraction(&self, value: f64) -> f64 {
        value / self.max_scale
    }
}

/// True when `value` keeps a finite scale once headroom is applied.
pub fn is_chartable(value: f64) -> bool {
    (value.abs() * HEADROOM).is_finite()
}

pub fn compute_scale(
    values: impl IntoIterator<Item = f64>,
    objective: f64,
    alert_threshold: f64,
) -> Scale {
    let peak = values
        .into_iter()
        .chain([objective, alert_threshold])
        .fold(f64::NEG_INFINITY, f64::max);
    Scale {
        max_scale: peak * HEADROOM,
    }
}

#[cfg(test)]
mod tests {
    use super::{compute_scale, is_chartable, Scale};

    #[test]
    fn thresholds_take_part_in_the_max() {
        let scale = compute_scale([10.0, 20.0], 50.0, 30.0);
        assert!((scale.max_scale - 55.0).abs() < 1e-9);
        let scale = compute_scale([10.0], 5.0, 40.0);
        assert!((scale.max_scale - 44.0).abs() < 1e-9);
    }

    #[test]
    fn all_negative_is_degenerate() {
        let scale = compute_scale([-3.0, -1.0], -2.0, -5.0);
        assert!(scale.is_degenerate());
        assert!(compute_scale([0.0], 0.0, 0.0).is_degenerate());
        assert!(Scale { max_scale: f64::NAN }.is_degenerate());
    }

    #[test]
    fn overflowing_scale_is_degenerate() {
        let scale = compute_scale([1.7e308, 1.0e308], 90.0, 70.0);
        assert!(scale.max_scale.is_infinite());
        assert!(scale.is_degenerate());
        assert!(!is_chartable(1.7e308));
        assert!(is_chartable(1.0e308));
        assert!(!compute_scale([1.0e308], 0.0, 0.0).is_degenerate());
    }

    #[test]
    fn three_gridlines_top_down() {
        let scale = Scale { max_scale: 110.0 };
        assert_eq!(scale.gridlines(), [110.0, 55.0, 0.0]);
    }
}
