// REST client for the emissions backend and wire-shape normalization.
// The backend is tolerant about shapes (arrays vs. maps keyed by boiler
// name, `value` vs. pollutant-named fields); everything is converted to
// canonical domain records here so the rest of the service never sees a
// union shape.
use std::collections::BTreeMap;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::application::backend::EmissionBackend;
use crate::domain::boiler::{BoilerHistory, BoilerRealtime, BoilerStatus, BoilerTotals};
use crate::domain::pollutant::Pollutant;
use crate::domain::series::{Sample, TrendPoint};
use crate::domain::summary::{EmissionSummary, LimitConfig};

#[derive(Debug, Clone)]
pub struct EmissionApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl EmissionApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to send request to {}", url))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Backend request {} failed with status {}: {}", url, status, body);
        }

        response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to parse response from {}", url))
    }

    async fn post_json<B: Serialize>(&self, path: &str, body: &B) -> Result<()> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to send request to {}", url))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Backend request {} failed with status {}: {}", url, status, body);
        }

        Ok(())
    }
}

#[async_trait]
impl EmissionBackend for EmissionApiClient {
    async fn fetch_summary(&self) -> Result<EmissionSummary> {
        self.get_json("/api/v1/dashboard/summary").await
    }

    async fn fetch_realtime(&self) -> Result<Vec<BoilerRealtime>> {
        let payload: KeyedList<RawRealtimeBoiler> = self.get_json("/api/v1/boilers/realtime").await?;
        Ok(normalize_realtime(payload))
    }

    async fn fetch_daily_totals(&self) -> Result<Vec<BoilerTotals>> {
        let payload: KeyedList<RawBoilerTotals> =
            self.get_json("/api/v1/boilers/singleflowed").await?;
        Ok(normalize_totals(payload))
    }

    async fn fetch_trend(&self, hours: u32) -> Result<Vec<TrendPoint>> {
        let response: RawTrendResponse = self
            .get_json(&format!("/api/v1/analytics/trend?hours={}", hours))
            .await?;
        Ok(response.data.into_iter().map(RawTrendPoint::normalize).collect())
    }

    async fn fetch_history_detail(
        &self,
        boiler: &str,
        param: Pollutant,
        hours: u32,
    ) -> Result<Vec<Sample>> {
        let path = format!(
            "/api/v1/boilers/history-detail?boiler={}&param={}&hours={}",
            urlencoding::encode(boiler),
            param.label().to_ascii_lowercase(),
            hours
        );
        let points: Vec<RawDetailPoint> = self.get_json(&path).await?;
        Ok(points.into_iter().map(|p| p.normalize(param)).collect())
    }

    async fn fetch_limits(&self) -> Result<LimitConfig> {
        self.get_json("/api/v1/config/emission-limits").await
    }

    async fn update_limits(&self, limits: &LimitConfig) -> Result<()> {
        self.post_json("/api/v1/config/emission-limits", limits).await
    }

    async fn update_limit(&self, key: &str, value: f64) -> Result<()> {
        #[derive(Serialize)]
        struct LimitUpdateBody<'a> {
            key: &'a str,
            value: f64,
        }
        self.post_json("/api/v1/config/updatelimit", &LimitUpdateBody { key, value })
            .await
    }
}

/// A payload the backend serves either as a list or as a map keyed by
/// boiler name. The map variant uses a BTreeMap so normalization is
/// deterministic.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum KeyedList<T> {
    List(Vec<T>),
    Map(BTreeMap<String, T>),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawHistory {
    nox: Vec<f64>,
    so2: Vec<f64>,
    dust: Vec<f64>,
    times: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawRealtimeBoiler {
    boiler_name: String,
    nox_zs: f64,
    so2_zs: f64,
    dust_zs: f64,
    status: BoilerStatus,
    update_time: String,
    history: Option<RawHistory>,
}

impl RawRealtimeBoiler {
    fn normalize(self, fallback_name: Option<String>) -> BoilerRealtime {
        let name = if self.boiler_name.is_empty() {
            fallback_name.unwrap_or_default()
        } else {
            self.boiler_name
        };
        let history = match self.history {
            // An empty history record is as good as a missing one.
            Some(h) if !(h.nox.is_empty() && h.so2.is_empty() && h.dust.is_empty()) => {
                BoilerHistory {
                    nox: h.nox,
                    so2: h.so2,
                    dust: h.dust,
                    times: h.times,
                }
            }
            _ => BoilerHistory::default(),
        };
        BoilerRealtime {
            name,
            nox: self.nox_zs,
            so2: self.so2_zs,
            dust: self.dust_zs,
            status: self.status,
            update_time: self.update_time,
            history,
        }
    }
}

fn normalize_realtime(payload: KeyedList<RawRealtimeBoiler>) -> Vec<BoilerRealtime> {
    match payload {
        KeyedList::List(list) => list.into_iter().map(|b| b.normalize(None)).collect(),
        KeyedList::Map(map) => map
            .into_iter()
            .map(|(name, b)| b.normalize(Some(name)))
            .collect(),
    }
}

/// Daily totals arrive as `total_nox`/... in list form but may use bare
/// `nox`/... field names in map form.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawBoilerTotals {
    boiler_name: String,
    total_nox: Option<f64>,
    total_so2: Option<f64>,
    total_dust: Option<f64>,
    nox: Option<f64>,
    so2: Option<f64>,
    dust: Option<f64>,
}

impl RawBoilerTotals {
    fn normalize(self, fallback_name: Option<String>) -> BoilerTotals {
        let name = if self.boiler_name.is_empty() {
            fallback_name.unwrap_or_default()
        } else {
            self.boiler_name
        };
        BoilerTotals {
            name,
            nox: self.total_nox.or(self.nox).unwrap_or(0.0),
            so2: self.total_so2.or(self.so2).unwrap_or(0.0),
            dust: self.total_dust.or(self.dust).unwrap_or(0.0),
        }
    }
}

fn normalize_totals(payload: KeyedList<RawBoilerTotals>) -> Vec<BoilerTotals> {
    match payload {
        KeyedList::List(list) => list.into_iter().map(|b| b.normalize(None)).collect(),
        KeyedList::Map(map) => map
            .into_iter()
            .map(|(name, b)| b.normalize(Some(name)))
            .collect(),
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawTrendResponse {
    data: Vec<RawTrendPoint>,
}

/// Each pollutant field falls back to the generic `value` column so the
/// single-pollutant SQL shape plots as well as the three-column one.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawTrendPoint {
    time: String,
    nox: Option<f64>,
    so2: Option<f64>,
    dust: Option<f64>,
    value: Option<f64>,
}

impl RawTrendPoint {
    fn normalize(self) -> TrendPoint {
        TrendPoint {
            time: self.time,
            nox: self.nox.or(self.value).unwrap_or(0.0),
            so2: self.so2.or(self.value).unwrap_or(0.0),
            dust: self.dust.or(self.value).unwrap_or(0.0),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawDetailPoint {
    time: String,
    value: Option<f64>,
    nox: Option<f64>,
    so2: Option<f64>,
    dust: Option<f64>,
}

impl RawDetailPoint {
    fn normalize(self, kind: Pollutant) -> Sample {
        let named = match kind {
            Pollutant::Nox => self.nox,
            Pollutant::So2 => self.so2,
            Pollutant::Dust => self.dust,
        };
        Sample {
            time: self.time,
            value: self.value.or(named).unwrap_or(0.0),
        }
    }
}
