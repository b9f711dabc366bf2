use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, error, info, trace, warn};

use crate::config::Settings;
use crate::domain::types::Coordinates;
use crate::error::{CalcError, Result};

const SERVICE: &str = "OSRM";

/// Driving distances from an OSRM `table` service.
#[derive(Debug, Clone)]
pub struct OsrmClient {
    client: Client,
    base_url: String,
}

impl OsrmClient {
    pub fn new(base_url: &str, user_agent: &str, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(
            &settings.osrm_base_url,
            &settings.user_agent,
            settings.http_timeout_secs,
        )
    }

    fn table_url(&self, from: Coordinates, to: Coordinates) -> String {
        // OSRM wants longitude,latitude
        format!(
            "{}/{},{};{},{}?annotations=distance",
            self.base_url, from.lon, from.lat, to.lon, to.lat
        )
    }

    /// Road distance in km, or `None` when OSRM reports no route.
    pub async fn driving_distance_km(
        &self,
        from: Coordinates,
        to: Coordinates,
    ) -> Result<Option<f64>> {
        let url = self.table_url(from, to);
        trace!("Built OSRM URL: {}", url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            error!("OSRM request failed: {}", e);
            if e.to_string().contains("handshake") || e.to_string().contains("TLS") {
                warn!("TLS/handshake failure; the public OSRM server may be blocking requests");
            }
            e
        })?;

        let status = response.status();
        if !status.is_success() {
            error!(
                "OSRM returned HTTP {}: {}",
                status,
                status.canonical_reason().unwrap_or("Unknown")
            );
            return Err(CalcError::BadResponse {
                service: SERVICE,
                message: format!("HTTP {status}"),
            });
        }

        let text = response.text().await?;
        debug!("Received {} bytes from OSRM", text.len());
        parse_table_response(&text)
    }
}

/// Pull `distances[0][1]` (metres) out of a two-point table response.
pub(crate) fn parse_table_response(body: &str) -> Result<Option<f64>> {
    let json: Value = serde_json::from_str(body).map_err(|e| CalcError::BadResponse {
        service: SERVICE,
        message: e.to_string(),
    })?;

    if let Some(code) = json["code"].as_str() {
        if code != "Ok" {
            return Err(CalcError::BadResponse {
                service: SERVICE,
                message: format!("code {code}"),
            });
        }
    }

    let Some(distances) = json["distances"].as_array() else {
        error!(
            "No 'distances' array in OSRM response. Keys: {:?}",
            json.as_object().map(|o| o.keys().collect::<Vec<_>>())
        );
        return Err(CalcError::BadResponse {
            service: SERVICE,
            message: "missing distances".to_string(),
        });
    };

    let metres = distances
        .first()
        .and_then(|row| row.as_array())
        .and_then(|row| row.get(1))
        .ok_or_else(|| CalcError::BadResponse {
            service: SERVICE,
            message: "distance table smaller than 1x2".to_string(),
        })?;

    // null marks an unreachable pair
    let km = metres.as_f64().map(|m| m / 1000.0);
    match km {
        Some(km) => info!("OSRM driving distance: {:.2} km", km),
        None => warn!("OSRM found no route between the two points"),
    }
    Ok(km)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn builds_lon_lat_url() {
        let client = OsrmClient::new("http://localhost:5000/table/v1/driving/", "test", 5).unwrap();
        let url = client.table_url(
            Coordinates { lat: 1.5, lon: 103.8 },
            Coordinates { lat: 1.3, lon: 103.9 },
        );
        assert_eq!(
            url,
            "http://localhost:5000/table/v1/driving/103.8,1.5;103.9,1.3?annotations=distance"
        );
    }

    #[test]
    fn converts_metres_to_km() {
        let body = r#"{"code":"Ok","distances":[[0,12345.6],[12001.2,0]]}"#;
        let km = parse_table_response(body).unwrap().unwrap();
        assert_relative_eq!(km, 12.3456);
    }

    #[test]
    fn null_distance_is_unreachable() {
        let body = r#"{"code":"Ok","distances":[[0,null],[null,0]]}"#;
        assert_eq!(parse_table_response(body).unwrap(), None);
    }

    #[test]
    fn error_codes_and_missing_tables_fail() {
        assert!(parse_table_response(r#"{"code":"InvalidQuery"}"#).is_err());
        assert!(parse_table_response(r#"{"code":"Ok"}"#).is_err());
        assert!(parse_table_response(r#"{"code":"Ok","distances":[[0]]}"#).is_err());
    }
}
