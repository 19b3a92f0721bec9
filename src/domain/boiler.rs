// Boiler domain records, normalized from the backend payloads
use serde::{Deserialize, Serialize};

/// Points carried per sparkline when the backend sends no history.
pub const HISTORY_FALLBACK_LEN: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoilerStatus {
    Online,
    Warning,
    Offline,
    Maintenance,
}

impl Default for BoilerStatus {
    fn default() -> Self {
        BoilerStatus::Online
    }
}

/// Recent per-pollutant history for one boiler's sparklines.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoilerHistory {
    pub nox: Vec<f64>,
    pub so2: Vec<f64>,
    pub dust: Vec<f64>,
    pub times: Vec<String>,
}

impl Default for BoilerHistory {
    fn default() -> Self {
        // Flat zero series so cards without history still draw a line.
        Self {
            nox: vec![0.0; HISTORY_FALLBACK_LEN],
            so2: vec![0.0; HISTORY_FALLBACK_LEN],
            dust: vec![0.0; HISTORY_FALLBACK_LEN],
            times: Vec::new(),
        }
    }
}

/// Latest converted concentrations for one boiler.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoilerRealtime {
    pub name: String,
    pub nox: f64,
    pub so2: f64,
    pub dust: f64,
    pub status: BoilerStatus,
    pub update_time: String,
    pub history: BoilerHistory,
}

/// Today's accumulated emission totals for one boiler.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoilerTotals {
    pub name: String,
    pub nox: f64,
    pub so2: f64,
    pub dust: f64,
}

/// Compact display form of a boiler name: "NORTH_1" -> "N1",
/// "SOUTH_2" -> "S2".
pub fn short_name(name: &str) -> String {
    name.replace("NORTH_", "N").replace("SOUTH_", "S")
}
