// Dashboard view model: everything the frontend needs for one render,
// recomputed wholesale on every poll tick.
use serde::Serialize;

use super::boiler::{BoilerStatus, BoilerTotals};
use super::chart::{self, Span};
use super::metrics::{share_percentages, BoundedPercent};
use super::pollutant::{Pollutant, Severity};
use super::series::{display_time, Sample, TrendPoint};
use super::summary::EmissionSummary;

/// True-percent cutoff past which a gauge flags its alarm color.
const GAUGE_ALARM_PERCENT: f64 = 90.0;
/// Trend chart never scales below this y-max, so tiny values stay legible.
const TREND_MIN_Y_MAX: f64 = 50.0;
/// Headroom multiplier above the highest trend value.
const TREND_HEADROOM: f64 = 1.2;
const TREND_GRID_FRACTIONS: [f64; 5] = [0.0, 0.25, 0.5, 0.75, 1.0];

/// One per-pollutant quota gauge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Gauge {
    pub kind: Pollutant,
    pub percent: BoundedPercent,
    pub flowed: f64,
    pub limit: f64,
    pub hourly_advice: f64,
    pub alarm: bool,
}

impl Gauge {
    pub fn new(kind: Pollutant, percent: f64, flowed: f64, limit: f64, hourly_advice: f64) -> Self {
        Self {
            kind,
            percent: BoundedPercent::new(percent),
            flowed,
            limit,
            hourly_advice,
            alarm: percent > GAUGE_ALARM_PERCENT,
        }
    }
}

/// Color band of the total quota bar, judged on the clamped display
/// percentage so an over-quota plant pins at Danger instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuotaBand {
    Safe,
    Caution,
    Danger,
}

impl QuotaBand {
    pub fn for_percent(display_percent: f64) -> Self {
        if display_percent >= 90.0 {
            QuotaBand::Danger
        } else if display_percent >= 80.0 {
            QuotaBand::Caution
        } else {
            QuotaBand::Safe
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuotaBar {
    pub percent: BoundedPercent,
    pub limit: f64,
    pub band: QuotaBand,
}

impl QuotaBar {
    pub fn new(percent: f64, limit: f64) -> Self {
        let percent = BoundedPercent::new(percent);
        let band = QuotaBand::for_percent(percent.display);
        Self {
            percent,
            limit,
            band,
        }
    }
}

/// One unit's slice of a pollutant's plant-wide total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitShare {
    pub name: String,
    pub value: f64,
    pub percent: f64,
}

/// Per-pollutant contribution breakdown across all boilers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PollutantBreakdown {
    pub kind: Pollutant,
    pub total: f64,
    pub units: Vec<UnitShare>,
}

impl PollutantBreakdown {
    pub fn build(kind: Pollutant, totals: &[BoilerTotals]) -> Self {
        let pick = |t: &BoilerTotals| match kind {
            Pollutant::Nox => t.nox,
            Pollutant::So2 => t.so2,
            Pollutant::Dust => t.dust,
        };
        let values: Vec<f64> = totals.iter().map(&pick).collect();
        let (total, shares) = share_percentages(&values);
        let units = totals
            .iter()
            .zip(shares)
            .map(|(t, percent)| UnitShare {
                name: t.name.clone(),
                value: pick(t),
                percent,
            })
            .collect();
        Self { kind, total, units }
    }
}

/// Serialized sparkline geometry for one pollutant row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SparklineView {
    pub line: String,
    pub area: String,
    pub end_x: f64,
    pub end_y: f64,
}

impl SparklineView {
    pub fn build(values: &[f64], width: f64, height: f64, padding: f64) -> Option<Self> {
        chart::sparkline(values, width, height, padding).map(|s| Self {
            line: s.path.line_d(),
            area: s.path.area_d(),
            end_x: s.end_x,
            end_y: s.end_y,
        })
    }
}

/// One classified reading on a boiler card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PollutantReading {
    pub kind: Pollutant,
    pub value: f64,
    pub severity: Severity,
    pub sparkline: Option<SparklineView>,
}

/// Realtime monitoring card for one boiler. `alarm` follows the NOx
/// severity, which drives the card highlight and ALARM badge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoilerCard {
    pub name: String,
    pub display_name: String,
    pub status: BoilerStatus,
    pub update_time: String,
    pub readings: Vec<PollutantReading>,
    pub alarm: bool,
}

/// One drawable line of the trend chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendSeries {
    pub kind: Pollutant,
    pub path: String,
}

/// The 24-hour plant-wide trend chart (also reused for history detail).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendChart {
    pub width: f64,
    pub height: f64,
    pub y_max: f64,
    pub series: Vec<TrendSeries>,
    pub gridlines: Vec<f64>,
    pub x_labels: Vec<String>,
}

impl TrendChart {
    /// All three lines share one domain `(0, y_max)` where y_max gives
    /// headroom above the highest value but never drops below a floor.
    pub fn build(points: &[TrendPoint], width: f64, height: f64) -> Self {
        let highest = points
            .iter()
            .flat_map(|p| [p.nox, p.so2, p.dust])
            .fold(0.0_f64, f64::max);
        let y_max = (highest * TREND_HEADROOM).max(TREND_MIN_Y_MAX);
        let domain = Span::new(0.0, y_max);

        let series = Pollutant::ALL
            .iter()
            .map(|kind| {
                let samples: Vec<Sample> = points
                    .iter()
                    .map(|p| Sample::new(p.time.clone(), p.value(*kind)))
                    .collect();
                // A single point cannot form a line; leave the path empty.
                let path = if samples.len() < 2 {
                    String::new()
                } else {
                    chart::build_path(&samples, domain, width, height).line_d()
                };
                TrendSeries { kind: *kind, path }
            })
            .collect();

        let gridlines = TREND_GRID_FRACTIONS.iter().map(|f| f * height).collect();

        let x_labels = if points.is_empty() {
            Vec::new()
        } else {
            vec![
                display_time(&points[0].time),
                display_time(&points[points.len() / 2].time),
                display_time(&points[points.len() - 1].time),
            ]
        };

        Self {
            width,
            height,
            y_max,
            series,
            gridlines,
            x_labels,
        }
    }
}

/// History-detail view for one boiler and pollutant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailChart {
    pub boiler: String,
    pub pollutant: Pollutant,
    pub samples: Vec<Sample>,
    pub chart: TrendChart,
}

/// Everything on screen, built from one poll cycle. Immutable once built;
/// each refresh replaces the previous snapshot wholesale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub summary: EmissionSummary,
    pub gauges: Vec<Gauge>,
    pub quota: QuotaBar,
    pub breakdowns: Vec<PollutantBreakdown>,
    pub boilers: Vec<BoilerCard>,
    pub trend: TrendChart,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gauge_alarm_threshold() {
        let gauge = Gauge::new(Pollutant::Nox, 90.0, 10.0, 100.0, 1.0);
        assert!(!gauge.alarm);
        let gauge = Gauge::new(Pollutant::Nox, 90.1, 10.0, 100.0, 1.0);
        assert!(gauge.alarm);
    }

    #[test]
    fn test_gauge_overage_is_clamped_for_display_only() {
        let gauge = Gauge::new(Pollutant::So2, 150.0, 300.0, 200.0, 0.0);
        assert_eq!(gauge.percent.display, 100.0);
        assert_eq!(gauge.percent.actual, 150.0);
        assert!(gauge.alarm);
    }

    #[test]
    fn test_quota_bands() {
        assert_eq!(QuotaBar::new(10.0, 500.0).band, QuotaBand::Safe);
        assert_eq!(QuotaBar::new(80.0, 500.0).band, QuotaBand::Caution);
        assert_eq!(QuotaBar::new(90.0, 500.0).band, QuotaBand::Danger);
        // Over-quota pins at Danger through the clamp.
        assert_eq!(QuotaBar::new(130.0, 500.0).band, QuotaBand::Danger);
    }

    #[test]
    fn test_breakdown_shares() {
        let totals = vec![
            BoilerTotals {
                name: "NORTH_1".into(),
                nox: 10.0,
                so2: 0.0,
                dust: 0.0,
            },
            BoilerTotals {
                name: "NORTH_2".into(),
                nox: 30.0,
                so2: 0.0,
                dust: 0.0,
            },
        ];
        let breakdown = PollutantBreakdown::build(Pollutant::Nox, &totals);
        assert_eq!(breakdown.total, 40.0);
        assert_eq!(breakdown.units[0].percent, 25.0);
        assert_eq!(breakdown.units[1].percent, 75.0);

        let empty = PollutantBreakdown::build(Pollutant::So2, &totals);
        assert_eq!(empty.total, 0.0);
        assert!(empty.units.iter().all(|u| u.percent == 0.0));
    }

    #[test]
    fn test_trend_chart_y_max_floor() {
        let points = vec![
            TrendPoint::new("2026-01-15 00:00:00", 5.0, 3.0, 1.0),
            TrendPoint::new("2026-01-15 12:00:00", 8.0, 2.0, 4.0),
        ];
        let chart = TrendChart::build(&points, 1000.0, 200.0);
        assert_eq!(chart.y_max, 50.0);
        assert_eq!(chart.x_labels, vec!["00:00", "12:00", "12:00"]);
    }

    #[test]
    fn test_trend_chart_headroom() {
        let points = vec![
            TrendPoint::new("00:00", 100.0, 3.0, 1.0),
            TrendPoint::new("12:00", 80.0, 2.0, 4.0),
            TrendPoint::new("23:00", 90.0, 2.0, 4.0),
        ];
        let chart = TrendChart::build(&points, 1000.0, 200.0);
        assert!((chart.y_max - 120.0).abs() < 1e-9);
        assert_eq!(chart.series.len(), 3);
        assert!(chart.series.iter().all(|s| !s.path.is_empty()));
        assert_eq!(chart.x_labels, vec!["00:00", "12:00", "23:00"]);
    }

    #[test]
    fn test_trend_chart_empty_and_degenerate() {
        let chart = TrendChart::build(&[], 1000.0, 200.0);
        assert!(chart.x_labels.is_empty());
        assert!(chart.series.iter().all(|s| s.path.is_empty()));

        let one = vec![TrendPoint::new("09:00", 10.0, 10.0, 10.0)];
        let chart = TrendChart::build(&one, 1000.0, 200.0);
        assert!(chart.series.iter().all(|s| s.path.is_empty()));
    }
}
