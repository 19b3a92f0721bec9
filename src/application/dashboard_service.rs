// Dashboard service - assembles the full view-model snapshot
use std::sync::Arc;

use crate::application::backend::EmissionBackend;
use crate::domain::boiler::{short_name, BoilerRealtime};
use crate::domain::dashboard::{
    BoilerCard, DashboardSnapshot, DetailChart, Gauge, PollutantBreakdown, PollutantReading,
    QuotaBar, SparklineView, TrendChart,
};
use crate::domain::pollutant::{Pollutant, Severity, Thresholds};
use crate::domain::series::TrendPoint;
use crate::domain::summary::{LimitConfig, LimitUpdate};

const TREND_HOURS: u32 = 24;
const DETAIL_HOURS: u32 = 8;
const TREND_WIDTH: f64 = 1000.0;
const TREND_HEIGHT: f64 = 200.0;
const SPARKLINE_WIDTH: f64 = 48.0;
const SPARKLINE_HEIGHT: f64 = 16.0;
const SPARKLINE_PADDING: f64 = 2.0;

#[derive(Clone)]
pub struct DashboardService {
    backend: Arc<dyn EmissionBackend>,
    thresholds: Thresholds,
}

impl DashboardService {
    pub fn new(backend: Arc<dyn EmissionBackend>, thresholds: Thresholds) -> Self {
        Self {
            backend,
            thresholds,
        }
    }

    /// Fetch the four dashboard payloads concurrently and compute one
    /// immutable snapshot. Any fetch failure fails the whole refresh; the
    /// poller keeps the previous snapshot in that case.
    pub async fn build_snapshot(&self) -> anyhow::Result<DashboardSnapshot> {
        let (summary, totals, trend, realtime) = tokio::try_join!(
            self.backend.fetch_summary(),
            self.backend.fetch_daily_totals(),
            self.backend.fetch_trend(TREND_HOURS),
            self.backend.fetch_realtime(),
        )?;

        let gauges = vec![
            Gauge::new(
                Pollutant::Nox,
                summary.nox_percent,
                summary.nox_flowed,
                summary.nox_flow_limit,
                summary.advice_nox_hourly_limit,
            ),
            Gauge::new(
                Pollutant::So2,
                summary.so2_percent,
                summary.so2_flowed,
                summary.so2_flow_limit,
                summary.advice_so2_hourly_limit,
            ),
            Gauge::new(
                Pollutant::Dust,
                summary.dust_percent,
                summary.dust_flowed,
                summary.dust_flow_limit,
                summary.advice_dust_hourly_limit,
            ),
        ];

        let quota = QuotaBar::new(summary.total_percent, summary.total_flow_limit);

        let breakdowns = Pollutant::ALL
            .iter()
            .map(|kind| PollutantBreakdown::build(*kind, &totals))
            .collect();

        let boilers = realtime.iter().map(|b| self.build_card(b)).collect();

        let trend = TrendChart::build(&trend, TREND_WIDTH, TREND_HEIGHT);

        Ok(DashboardSnapshot {
            summary,
            gauges,
            quota,
            breakdowns,
            boilers,
            trend,
        })
    }

    fn build_card(&self, boiler: &BoilerRealtime) -> BoilerCard {
        let readings = [
            (Pollutant::Nox, boiler.nox, &boiler.history.nox),
            (Pollutant::So2, boiler.so2, &boiler.history.so2),
            (Pollutant::Dust, boiler.dust, &boiler.history.dust),
        ]
        .into_iter()
        .map(|(kind, value, history)| PollutantReading {
            kind,
            value,
            severity: self.thresholds.classify(kind, value),
            sparkline: SparklineView::build(
                history,
                SPARKLINE_WIDTH,
                SPARKLINE_HEIGHT,
                SPARKLINE_PADDING,
            ),
        })
        .collect::<Vec<_>>();

        let alarm = readings
            .iter()
            .any(|r| r.kind == Pollutant::Nox && r.severity == Severity::Exceeded);

        BoilerCard {
            name: boiler.name.clone(),
            display_name: short_name(&boiler.name),
            status: boiler.status,
            update_time: boiler.update_time.clone(),
            readings,
            alarm,
        }
    }

    /// Single-pollutant history detail, rendered through the trend chart
    /// with the selected pollutant's values and zeros elsewhere so only
    /// one line gets drawn.
    pub async fn history_detail(
        &self,
        boiler: &str,
        param: Pollutant,
        hours: Option<u32>,
    ) -> anyhow::Result<DetailChart> {
        let hours = hours.unwrap_or(DETAIL_HOURS);
        let samples = self
            .backend
            .fetch_history_detail(boiler, param, hours)
            .await?;
        let points: Vec<TrendPoint> = samples
            .iter()
            .map(|s| TrendPoint::single(param, s))
            .collect();
        Ok(DetailChart {
            boiler: boiler.to_string(),
            pollutant: param,
            chart: TrendChart::build(&points, TREND_WIDTH, TREND_HEIGHT),
            samples,
        })
    }

    pub async fn limits(&self) -> anyhow::Result<LimitConfig> {
        self.backend.fetch_limits().await
    }

    pub async fn update_limits(&self, limits: &LimitConfig) -> anyhow::Result<()> {
        self.backend.update_limits(limits).await
    }

    pub async fn update_limit(&self, update: &LimitUpdate) -> anyhow::Result<()> {
        tracing::info!(key = %update.key, value = update.value, "updating limit");
        self.backend.update_limit(&update.key, update.value).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::boiler::{BoilerHistory, BoilerStatus, BoilerTotals};
    use crate::domain::dashboard::QuotaBand;
    use crate::domain::series::Sample;
    use crate::domain::summary::EmissionSummary;
    use async_trait::async_trait;

    struct FixtureBackend;

    #[async_trait]
    impl EmissionBackend for FixtureBackend {
        async fn fetch_summary(&self) -> anyhow::Result<EmissionSummary> {
            Ok(EmissionSummary {
                nox_flowed: 50.97,
                so2_flowed: 112.23,
                dust_flowed: 52.78,
                nox_flow_limit: 478.0,
                so2_flow_limit: 230.0,
                dust_flow_limit: 70.0,
                total_flow_limit: 678.0,
                nox_percent: 10.66,
                so2_percent: 48.79,
                dust_percent: 130.0,
                total_percent: 95.0,
                unit: "m³".into(),
                update_time: "2026-01-15 09:54:00".into(),
                ..EmissionSummary::default()
            })
        }

        async fn fetch_realtime(&self) -> anyhow::Result<Vec<BoilerRealtime>> {
            Ok(vec![BoilerRealtime {
                name: "NORTH_1".into(),
                nox: 55.0,
                so2: 12.0,
                dust: 8.0,
                status: BoilerStatus::Online,
                update_time: "2026-01-15 09:54:00".into(),
                history: BoilerHistory::default(),
            }])
        }

        async fn fetch_daily_totals(&self) -> anyhow::Result<Vec<BoilerTotals>> {
            Ok(vec![
                BoilerTotals {
                    name: "NORTH_1".into(),
                    nox: 10.0,
                    so2: 5.0,
                    dust: 1.0,
                },
                BoilerTotals {
                    name: "SOUTH_1".into(),
                    nox: 30.0,
                    so2: 15.0,
                    dust: 3.0,
                },
            ])
        }

        async fn fetch_trend(&self, _hours: u32) -> anyhow::Result<Vec<TrendPoint>> {
            Ok(vec![
                TrendPoint::new("2026-01-15 00:00:00", 10.0, 5.0, 1.0),
                TrendPoint::new("2026-01-15 12:00:00", 40.0, 8.0, 2.0),
                TrendPoint::new("2026-01-15 23:00:00", 5.0, 3.0, 1.5),
            ])
        }

        async fn fetch_history_detail(
            &self,
            _boiler: &str,
            _param: Pollutant,
            _hours: u32,
        ) -> anyhow::Result<Vec<Sample>> {
            Ok(vec![
                Sample::new("09:00", 10.0),
                Sample::new("09:20", 40.0),
                Sample::new("09:40", 5.0),
            ])
        }

        async fn fetch_limits(&self) -> anyhow::Result<LimitConfig> {
            Ok(LimitConfig::default())
        }

        async fn update_limits(&self, _limits: &LimitConfig) -> anyhow::Result<()> {
            Ok(())
        }

        async fn update_limit(&self, _key: &str, _value: f64) -> anyhow::Result<()> {
            Ok(())
        }
    }

    fn service() -> DashboardService {
        DashboardService::new(Arc::new(FixtureBackend), Thresholds::default())
    }

    #[tokio::test]
    async fn test_snapshot_assembly() {
        let snapshot = service().build_snapshot().await.unwrap();

        assert_eq!(snapshot.gauges.len(), 3);
        // Dust is over quota: display clamps, actual survives, alarm set.
        let dust = &snapshot.gauges[2];
        assert_eq!(dust.percent.display, 100.0);
        assert_eq!(dust.percent.actual, 130.0);
        assert!(dust.alarm);

        assert_eq!(snapshot.quota.band, QuotaBand::Danger);

        let nox_breakdown = &snapshot.breakdowns[0];
        assert_eq!(nox_breakdown.total, 40.0);
        assert_eq!(nox_breakdown.units[0].percent, 25.0);

        assert_eq!(snapshot.trend.series.len(), 3);
        assert!(!snapshot.trend.series[0].path.is_empty());
    }

    #[tokio::test]
    async fn test_snapshot_boiler_cards() {
        let snapshot = service().build_snapshot().await.unwrap();
        let card = &snapshot.boilers[0];
        assert_eq!(card.display_name, "N1");
        // 55 mg/m³ NOx is over the default 50 cutoff.
        assert_eq!(card.readings[0].severity, Severity::Exceeded);
        assert!(card.alarm);
        assert_eq!(card.readings[1].severity, Severity::Normal);
        // Fallback history still yields drawable sparklines.
        assert!(card.readings.iter().all(|r| r.sparkline.is_some()));
    }

    #[tokio::test]
    async fn test_history_detail_draws_one_line() {
        let detail = service()
            .history_detail("NORTH_1", Pollutant::So2, None)
            .await
            .unwrap();
        assert_eq!(detail.boiler, "NORTH_1");
        assert_eq!(detail.samples.len(), 3);
        let by_kind = |kind: Pollutant| {
            detail
                .chart
                .series
                .iter()
                .find(|s| s.kind == kind)
                .unwrap()
        };
        assert!(!by_kind(Pollutant::So2).path.is_empty());
        // The other lines are flat zero along the baseline.
        assert!(by_kind(Pollutant::Nox).path.ends_with("200 L 1000 200"));
    }
}
