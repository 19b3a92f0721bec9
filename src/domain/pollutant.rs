// Pollutant kinds, severity levels and threshold classification
use serde::{Deserialize, Serialize};

/// The three monitored pollutant kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pollutant {
    Nox,
    So2,
    Dust,
}

impl Pollutant {
    pub const ALL: [Pollutant; 3] = [Pollutant::Nox, Pollutant::So2, Pollutant::Dust];

    pub fn label(&self) -> &'static str {
        match self {
            Pollutant::Nox => "NOx",
            Pollutant::So2 => "SO2",
            Pollutant::Dust => "Dust",
        }
    }

    /// Parse the `param` query value the backend and frontend pass around
    /// (`nox`, `so2`, `dust`, any casing).
    pub fn from_param(param: &str) -> Option<Pollutant> {
        match param.to_ascii_lowercase().as_str() {
            "nox" => Some(Pollutant::Nox),
            "so2" => Some(Pollutant::So2),
            "dust" => Some(Pollutant::Dust),
            _ => None,
        }
    }
}

/// Severity of a single reading, derived on demand and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Normal,
    Warning,
    Exceeded,
}

/// Threshold band for one pollutant kind. `warning_low` is only set for
/// kinds with an under-dosing band (NOx).
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ThresholdBand {
    #[serde(default)]
    pub warning_low: Option<f64>,
    pub exceeded_high: f64,
}

/// Per-kind threshold table. The cutoffs were hard-coded in several places
/// of the original dashboard; here they live in one configurable table.
#[derive(Debug, Clone, Deserialize)]
pub struct Thresholds {
    #[serde(default = "Thresholds::default_nox")]
    pub nox: ThresholdBand,
    #[serde(default = "Thresholds::default_so2")]
    pub so2: ThresholdBand,
    #[serde(default = "Thresholds::default_dust")]
    pub dust: ThresholdBand,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            nox: Self::default_nox(),
            so2: Self::default_so2(),
            dust: Self::default_dust(),
        }
    }
}

impl Thresholds {
    fn default_nox() -> ThresholdBand {
        ThresholdBand {
            warning_low: Some(20.0),
            exceeded_high: 50.0,
        }
    }

    fn default_so2() -> ThresholdBand {
        ThresholdBand {
            warning_low: None,
            exceeded_high: 30.0,
        }
    }

    fn default_dust() -> ThresholdBand {
        ThresholdBand {
            warning_low: None,
            exceeded_high: 30.0,
        }
    }

    pub fn band(&self, kind: Pollutant) -> ThresholdBand {
        match kind {
            Pollutant::Nox => self.nox,
            Pollutant::So2 => self.so2,
            Pollutant::Dust => self.dust,
        }
    }

    /// Classify a reading. Values exactly on a threshold stay on the
    /// normal/lower side (strict comparisons only) — the alarm flashing
    /// behavior at the margin depends on this. A value of zero or below is
    /// Normal even for NOx: a true zero is ambiguous between "healthy" and
    /// "no data" and there is no separate liveness signal here.
    pub fn classify(&self, kind: Pollutant, value: f64) -> Severity {
        let band = self.band(kind);
        if value > band.exceeded_high {
            return Severity::Exceeded;
        }
        if let Some(low) = band.warning_low {
            if value > 0.0 && value < low {
                return Severity::Warning;
            }
        }
        Severity::Normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nox_classification() {
        let t = Thresholds::default();
        assert_eq!(t.classify(Pollutant::Nox, 51.0), Severity::Exceeded);
        assert_eq!(t.classify(Pollutant::Nox, 50.0), Severity::Normal);
        assert_eq!(t.classify(Pollutant::Nox, 35.0), Severity::Normal);
        assert_eq!(t.classify(Pollutant::Nox, 19.0), Severity::Warning);
        assert_eq!(t.classify(Pollutant::Nox, 20.0), Severity::Normal);
    }

    #[test]
    fn test_nox_zero_is_normal() {
        let t = Thresholds::default();
        assert_eq!(t.classify(Pollutant::Nox, 0.0), Severity::Normal);
        assert_eq!(t.classify(Pollutant::Nox, -3.0), Severity::Normal);
    }

    #[test]
    fn test_single_sided_kinds() {
        let t = Thresholds::default();
        assert_eq!(t.classify(Pollutant::So2, 31.0), Severity::Exceeded);
        assert_eq!(t.classify(Pollutant::So2, 30.0), Severity::Normal);
        // No low-end warning band for SO2/Dust
        assert_eq!(t.classify(Pollutant::So2, 1.0), Severity::Normal);
        assert_eq!(t.classify(Pollutant::Dust, 31.0), Severity::Exceeded);
        assert_eq!(t.classify(Pollutant::Dust, 0.0), Severity::Normal);
    }

    #[test]
    fn test_custom_bands() {
        let t = Thresholds {
            nox: ThresholdBand {
                warning_low: Some(6.0),
                exceeded_high: 100.0,
            },
            ..Thresholds::default()
        };
        assert_eq!(t.classify(Pollutant::Nox, 5.0), Severity::Warning);
        assert_eq!(t.classify(Pollutant::Nox, 60.0), Severity::Normal);
    }

    #[test]
    fn test_param_parsing() {
        assert_eq!(Pollutant::from_param("NOx"), Some(Pollutant::Nox));
        assert_eq!(Pollutant::from_param("so2"), Some(Pollutant::So2));
        assert_eq!(Pollutant::from_param("DUST"), Some(Pollutant::Dust));
        assert_eq!(Pollutant::from_param("co2"), None);
    }
}
