// Time series value objects
use serde::{Deserialize, Serialize};

use super::pollutant::Pollutant;

/// One measurement of one pollutant at one point in time. Timestamps stay
/// in the backend's string form; index position is the only ordering key,
/// so duplicate timestamps are tolerated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub time: String,
    pub value: f64,
}

impl Sample {
    pub fn new(time: impl Into<String>, value: f64) -> Self {
        Self {
            time: time.into(),
            value,
        }
    }
}

/// One point of the plant-wide trend, all three pollutants at once.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub time: String,
    pub nox: f64,
    pub so2: f64,
    pub dust: f64,
}

impl TrendPoint {
    pub fn new(time: impl Into<String>, nox: f64, so2: f64, dust: f64) -> Self {
        Self {
            time: time.into(),
            nox,
            so2,
            dust,
        }
    }

    /// Build a trend point carrying a single pollutant's value, zeros for
    /// the others. The history-detail dialog reuses the trend chart this
    /// way so only the selected line gets drawn.
    pub fn single(kind: Pollutant, sample: &Sample) -> Self {
        let mut point = Self::new(sample.time.clone(), 0.0, 0.0, 0.0);
        match kind {
            Pollutant::Nox => point.nox = sample.value,
            Pollutant::So2 => point.so2 = sample.value,
            Pollutant::Dust => point.dust = sample.value,
        }
        point
    }

    pub fn value(&self, kind: Pollutant) -> f64 {
        match kind {
            Pollutant::Nox => self.nox,
            Pollutant::So2 => self.so2,
            Pollutant::Dust => self.dust,
        }
    }
}

/// Axis label form of a backend timestamp: the `HH:MM` part of
/// `YYYY-MM-DD HH:MM:SS`, or the input unchanged when it is already a
/// bare time label.
pub fn display_time(time: &str) -> String {
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(time, "%Y-%m-%d %H:%M:%S") {
        return dt.format("%H:%M").to_string();
    }
    match time.split_once(' ') {
        Some((_, clock)) => clock.chars().take(5).collect(),
        None => time.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_time() {
        assert_eq!(display_time("2026-01-15 09:54:00"), "09:54");
        assert_eq!(display_time("09:00"), "09:00");
        assert_eq!(display_time("bad 123456"), "12345");
    }

    #[test]
    fn test_single_pollutant_point() {
        let sample = Sample::new("09:20", 42.5);
        let point = TrendPoint::single(Pollutant::So2, &sample);
        assert_eq!(point.nox, 0.0);
        assert_eq!(point.so2, 42.5);
        assert_eq!(point.dust, 0.0);
        assert_eq!(point.value(Pollutant::So2), 42.5);
    }
}
