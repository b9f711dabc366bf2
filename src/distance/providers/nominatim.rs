use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};
use tracing::{debug, error, info, trace, warn};

use super::Geocoder;
use crate::config::constant::NOMINATIM_MIN_INTERVAL_MS;
use crate::config::Settings;
use crate::domain::types::Coordinates;
use crate::error::{CalcError, Result};

const SERVICE: &str = "Nominatim";

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: Option<String>,
}

/// Place-name lookup against an OpenStreetMap Nominatim search endpoint.
///
/// Requests are spaced at least `min_interval` apart, also across clones
/// and concurrent lookups.
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    client: Client,
    base_url: String,
    min_interval: Duration,
    last_request: Arc<Mutex<Option<Instant>>>,
}

impl NominatimGeocoder {
    pub fn new(base_url: &str, user_agent: &str, timeout_secs: u64) -> Result<Self> {
        // Nominatim's usage policy rejects requests without an identifying User-Agent.
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            min_interval: Duration::from_millis(NOMINATIM_MIN_INTERVAL_MS),
            last_request: Arc::new(Mutex::new(None)),
        })
    }

    pub fn with_min_interval(mut self, min_interval: Duration) -> Self {
        self.min_interval = min_interval;
        self
    }

    /// Wait until `min_interval` has passed since the previous request.
    /// The lock is held while sleeping so waiting callers queue up.
    async fn wait_turn(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                let wait = self.min_interval - elapsed;
                debug!("Waiting {:?} before the next Nominatim request", wait);
                sleep(wait).await;
            }
        }
        *last = Some(Instant::now());
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(
            &settings.nominatim_base_url,
            &settings.user_agent,
            settings.http_timeout_secs,
        )
    }

    async fn lookup(&self, place: &str) -> Result<Option<Coordinates>> {
        self.wait_turn().await;
        let url = format!("{}/search", self.base_url);
        trace!("Sending GET to {} for '{}'", url, place);

        let response = self
            .client
            .get(&url)
            .query(&[("q", place), ("format", "jsonv2"), ("limit", "1")])
            .send()
            .await
            .map_err(|e| {
                error!("Nominatim request failed for '{}': {}", place, e);
                e
            })?;

        let status = response.status();
        if !status.is_success() {
            error!("Nominatim returned HTTP {} for '{}'", status, place);
            return Err(CalcError::BadResponse {
                service: SERVICE,
                message: format!("HTTP {status}"),
            });
        }

        let text = response.text().await?;
        debug!("Received {} bytes from Nominatim", text.len());
        parse_search_response(place, &text)
    }
}

impl Geocoder for NominatimGeocoder {
    async fn geocode(&self, place: &str) -> Result<Option<Coordinates>> {
        self.lookup(place).await
    }
}

/// Parse a `format=jsonv2` search body. An empty result list means "not found".
pub(crate) fn parse_search_response(place: &str, body: &str) -> Result<Option<Coordinates>> {
    let places: Vec<NominatimPlace> = serde_json::from_str(body).map_err(|e| {
        error!(
            "Failed to parse Nominatim JSON: {} (first 200 chars: {})",
            e,
            body.chars().take(200).collect::<String>()
        );
        CalcError::BadResponse {
            service: SERVICE,
            message: e.to_string(),
        }
    })?;

    let Some(first) = places.into_iter().next() else {
        warn!("No results found for '{}'", place);
        return Ok(None);
    };

    let parse = |raw: &str| {
        raw.parse::<f64>().map_err(|_| CalcError::BadResponse {
            service: SERVICE,
            message: format!("invalid coordinate '{raw}'"),
        })
    };
    let coords = Coordinates {
        lat: parse(&first.lat)?,
        lon: parse(&first.lon)?,
    };

    info!(
        "Resolved '{}' to ({:.5}, {:.5}) {}",
        place,
        coords.lat,
        coords.lon,
        first.display_name.unwrap_or_default()
    );
    Ok(Some(coords))
}
