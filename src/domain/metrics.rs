// Percentage helpers shared by the quota displays
use serde::Serialize;

pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// A percentage carried in two forms: `display` is clamped to 0..=100 for
/// geometry (bar widths, gauge arcs), `actual` keeps the true value so
/// numeric readouts can honestly report overage past 100%.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundedPercent {
    pub actual: f64,
    pub display: f64,
}

impl BoundedPercent {
    pub fn new(actual: f64) -> Self {
        Self {
            actual,
            display: clamp(actual, 0.0, 100.0),
        }
    }
}

/// Sum the per-unit values and express each as a percentage of the total.
/// An all-zero total yields all-zero percentages rather than NaN, so an
/// empty plant still renders.
pub fn share_percentages(values: &[f64]) -> (f64, Vec<f64>) {
    let sum: f64 = values.iter().sum();
    let shares = values
        .iter()
        .map(|v| if sum == 0.0 { 0.0 } else { v / sum * 100.0 })
        .collect();
    (sum, shares)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round1(v: f64) -> f64 {
        (v * 10.0).round() / 10.0
    }

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(-5.0, 0.0, 100.0), 0.0);
        assert_eq!(clamp(150.0, 0.0, 100.0), 100.0);
        assert_eq!(clamp(42.0, 0.0, 100.0), 42.0);
    }

    #[test]
    fn test_bounded_percent_keeps_true_value() {
        let p = BoundedPercent::new(150.0);
        assert_eq!(p.display, 100.0);
        assert_eq!(p.actual, 150.0);

        let p = BoundedPercent::new(-5.0);
        assert_eq!(p.display, 0.0);
        assert_eq!(p.actual, -5.0);
    }

    #[test]
    fn test_share_percentages() {
        let (sum, shares) = share_percentages(&[10.0, 20.0, 30.0]);
        assert_eq!(sum, 60.0);
        let rounded: Vec<f64> = shares.iter().cloned().map(round1).collect();
        assert_eq!(rounded, vec![16.7, 33.3, 50.0]);
        let total: f64 = shares.iter().sum();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_share_percentages_zero_sum() {
        let (sum, shares) = share_percentages(&[0.0, 0.0, 0.0]);
        assert_eq!(sum, 0.0);
        assert_eq!(shares, vec![0.0, 0.0, 0.0]);
    }
}
