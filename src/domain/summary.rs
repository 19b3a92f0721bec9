// Plant-wide summary and limit configuration records
use serde::{Deserialize, Serialize};

/// The flat summary payload from `/api/v1/dashboard/summary`. Every
/// numeric field defaults to 0 when absent so a thin backend response
/// never breaks the view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmissionSummary {
    pub nox_flowed: f64,
    pub so2_flowed: f64,
    pub dust_flowed: f64,
    pub nox_flow_limit: f64,
    pub so2_flow_limit: f64,
    pub dust_flow_limit: f64,
    pub total_flow_limit: f64,
    pub nox_percent: f64,
    pub so2_percent: f64,
    pub dust_percent: f64,
    pub total_percent: f64,
    pub advice_nox_hourly_limit: f64,
    pub advice_so2_hourly_limit: f64,
    pub advice_dust_hourly_limit: f64,
    pub total_flow_advice_limit: f64,
    pub unit: String,
    pub update_time: String,
}

/// The full limit set, daily quotas plus converted-concentration cutoffs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitConfig {
    pub total_flow: f64,
    pub nox_flow: f64,
    pub so2_flow: f64,
    pub dust_flow: f64,
    pub nox_rate_high: f64,
    pub nox_rate_low: f64,
    pub so2_rate_high: f64,
    pub dust_rate_high: f64,
}

/// Single-key limit update, fire-and-forget per field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitUpdate {
    pub key: String,
    pub value: f64,
}
