pub mod nominatim;
pub mod osrm;

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use crate::config::Settings;
use crate::domain::types::Coordinates;
use crate::error::Result;

use super::geodesic::great_circle_km;

pub use nominatim::NominatimGeocoder;
pub use osrm::OsrmClient;

/// Resolves a place name to coordinates. `Ok(None)` means the place is unknown.
pub trait Geocoder {
    fn geocode(&self, place: &str) -> impl Future<Output = Result<Option<Coordinates>>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceSource {
    #[default]
    Geodesic,
    Osrm,
}

impl FromStr for DistanceSource {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "geodesic" => Ok(Self::Geodesic),
            "osrm" => Ok(Self::Osrm),
            other => Err(format!(
                "unknown distance source '{other}' (expected 'geodesic' or 'osrm')"
            )),
        }
    }
}

impl fmt::Display for DistanceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Geodesic => write!(f, "geodesic"),
            Self::Osrm => write!(f, "osrm"),
        }
    }
}

/// Distance between two resolved points.
#[derive(Debug, Clone)]
pub enum DistanceProvider {
    Geodesic,
    Osrm(OsrmClient),
}

impl DistanceProvider {
    pub fn from_settings(source: DistanceSource, settings: &Settings) -> Result<Self> {
        Ok(match source {
            DistanceSource::Geodesic => Self::Geodesic,
            DistanceSource::Osrm => Self::Osrm(OsrmClient::from_settings(settings)?),
        })
    }

    /// Kilometres, or `None` when the provider has no distance for the pair.
    pub async fn distance_km(&self, from: Coordinates, to: Coordinates) -> Result<Option<f64>> {
        match self {
            Self::Geodesic => Ok(Some(great_circle_km(from, to))),
            Self::Osrm(client) => client.driving_distance_km(from, to).await,
        }
    }
}
