// Port to the emissions backend REST API
use async_trait::async_trait;

use crate::domain::boiler::{BoilerRealtime, BoilerTotals};
use crate::domain::pollutant::Pollutant;
use crate::domain::series::{Sample, TrendPoint};
use crate::domain::summary::{EmissionSummary, LimitConfig};

/// Everything the dashboard needs from the backend, already normalized to
/// canonical records. Implementations own the wire-shape tolerance
/// (array-or-map payloads, `value` fallbacks, missing fields).
#[async_trait]
pub trait EmissionBackend: Send + Sync {
    /// Today's plant-wide totals, limits and hourly quota advice.
    async fn fetch_summary(&self) -> anyhow::Result<EmissionSummary>;

    /// Latest converted concentrations plus recent history per boiler.
    async fn fetch_realtime(&self) -> anyhow::Result<Vec<BoilerRealtime>>;

    /// Today's accumulated emission totals per boiler.
    async fn fetch_daily_totals(&self) -> anyhow::Result<Vec<BoilerTotals>>;

    /// Plant-wide trend over the last `hours` hours.
    async fn fetch_trend(&self, hours: u32) -> anyhow::Result<Vec<TrendPoint>>;

    /// Single-pollutant history detail for one boiler.
    async fn fetch_history_detail(
        &self,
        boiler: &str,
        param: Pollutant,
        hours: u32,
    ) -> anyhow::Result<Vec<Sample>>;

    /// The full limit configuration set.
    async fn fetch_limits(&self) -> anyhow::Result<LimitConfig>;

    /// Replace the full limit configuration set.
    async fn update_limits(&self, limits: &LimitConfig) -> anyhow::Result<()>;

    /// Fire-and-forget single-key limit update.
    async fn update_limit(&self, key: &str, value: f64) -> anyhow::Result<()>;
}
