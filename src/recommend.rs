//! Client for the external recommendation service
//!
//! The service ranks loads for a demo driver given a current position. Rows
//! come back in a looser shape than the board's `Load` (`load_id` instead of
//! `id`, a single `revenue_per_mile` figure), so each row is normalized
//! before use. Responses are cached with a jittered TTL so a fleet of
//! drivers does not expire in lockstep.

use std::time::Duration;

use rand::RngExt;
use serde::Deserialize;
use serde_json::Value;
use tracing::instrument;

use crate::error::LoadBoardError;
use crate::models::Load;
use crate::{API_CLIENT, config, storage};

pub struct RecommendClient {
    base_url: String,
    cache_ttl: Duration,
}

#[derive(Debug, Deserialize)]
struct RecommendResponse {
    #[serde(default)]
    recommendations: Vec<Value>,
}

impl RecommendClient {
    #[must_use]
    pub fn new(base_url: impl Into<String>, cache_ttl: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            cache_ttl,
        }
    }

    /// Client configured from the process-wide configuration
    #[must_use]
    pub fn from_config() -> Self {
        let cfg = &config::get().recommend;
        Self::new(
            cfg.base_url.clone(),
            Duration::from_secs(u64::from(cfg.cache_ttl_hours) * 3600),
        )
    }

    /// Ranked loads for a driver at a position, cache-first.
    #[instrument(skip(self))]
    pub async fn recommended_loads(
        &self,
        user_id: &str,
        lat: f64,
        lon: f64,
        limit: u32,
    ) -> Result<Vec<Load>, LoadBoardError> {
        let key = format!("recommend:{user_id}:{lat:.4}:{lon:.4}:{limit}");

        let cached: Option<Vec<Load>> = storage::cache_get(&key)
            .await
            .map_err(|e| LoadBoardError::store(e.to_string()))?;
        if let Some(loads) = cached {
            return Ok(loads);
        }

        let loads = self
            .recommended_loads_call(user_id, lat, lon, limit)
            .await?;

        let jitter: f32 = rand::rng().random_range(0.9..1.1);
        let ttl = Duration::from_secs((self.cache_ttl.as_secs() as f32 * jitter) as u64);
        storage::cache_put(&key, loads.clone(), ttl)
            .await
            .map_err(|e| LoadBoardError::store(e.to_string()))?;

        Ok(loads)
    }

    async fn recommended_loads_call(
        &self,
        user_id: &str,
        lat: f64,
        lon: f64,
        limit: u32,
    ) -> Result<Vec<Load>, LoadBoardError> {
        tracing::debug!("Calling the recommendation service");
        let url = format!(
            "{}/recommend/{}?current_lat={lat}&current_lon={lon}&limit={limit}",
            self.base_url,
            urlencoding::encode(user_id)
        );

        let response = API_CLIENT
            .get(url)
            .send()
            .await
            .map_err(|e| LoadBoardError::api(e.to_string()))?;
        let response: RecommendResponse = response
            .json()
            .await
            .map_err(|e| LoadBoardError::api(e.to_string()))?;

        Ok(response
            .recommendations
            .into_iter()
            .filter_map(normalize_recommendation)
            .collect())
    }

    /// Look up a single backend load by id.
    #[instrument(skip(self))]
    pub async fn fetch_load(&self, id: &str) -> Result<Load, LoadBoardError> {
        let url = format!("{}/load/{}", self.base_url, urlencoding::encode(id));

        let response = API_CLIENT
            .get(url)
            .send()
            .await
            .map_err(|e| LoadBoardError::api(e.to_string()))?;

        if !response.status().is_success() {
            return Err(LoadBoardError::not_found(format!(
                "load \"{id}\" not found"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| LoadBoardError::api(e.to_string()))
    }
}

fn ensure_number(stop: &mut serde_json::Map<String, Value>, field: &str) {
    if !stop.get(field).is_some_and(Value::is_number) {
        stop.insert(field.to_string(), Value::from(0));
    }
}

/// Map one recommendation row onto a `Load`.
///
/// `load_id` backfills a missing `id`, `revenue_per_mile` backfills both RPM
/// figures, stops get zeroed empty miles and an empty instruction list when
/// absent. Rows that still do not form a load are dropped with a warning.
fn normalize_recommendation(mut raw: Value) -> Option<Load> {
    let obj = raw.as_object_mut()?;

    if !obj.contains_key("id") {
        let load_id = obj.get("load_id").cloned()?;
        obj.insert("id".to_string(), load_id);
    }

    let revenue_per_mile = obj
        .get("revenue_per_mile")
        .and_then(Value::as_f64)
        .unwrap_or(0.0);
    for rpm_field in ["loadedRPM", "estTotalRPM"] {
        if !obj.get(rpm_field).is_some_and(Value::is_number) {
            obj.insert(rpm_field.to_string(), Value::from(revenue_per_mile));
        }
    }

    if let Some(pickup) = obj.get_mut("pickup").and_then(Value::as_object_mut) {
        ensure_number(pickup, "emptyMiles");
    }
    if let Some(delivery) = obj.get_mut("delivery").and_then(Value::as_object_mut) {
        ensure_number(delivery, "emptyMiles");
        if !delivery.get("instructions").is_some_and(Value::is_array) {
            delivery.insert("instructions".to_string(), Value::Array(Vec::new()));
        }
    }

    match serde_json::from_value(raw) {
        Ok(load) => Some(load),
        Err(e) => {
            tracing::warn!("Dropping malformed recommendation row: {e}");
            None
        }
    }
}
