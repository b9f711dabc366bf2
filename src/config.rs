use std::env;
use std::str::FromStr;

use dotenv::dotenv;
use tracing::debug;

use crate::error::{CalcError, Result};
use crate::evaluation::cost::CostModel;

pub mod constant {
    pub const MAX_RESULTS: usize = 10;
    pub const MAX_CANDIDATES: u64 = 2_000_000;
    pub const NEAR_LIMIT_RATIO: f64 = 0.95;

    pub const DEFAULT_TRUCK_LENGTH_FT: f64 = 24.0833;
    pub const DEFAULT_TRUCK_WIDTH_FT: f64 = 8.0;
    pub const DEFAULT_TRUCK_HEIGHT_FT: f64 = 9.5;
    pub const DEFAULT_TRUCK_WEIGHT_KG: f64 = 29_600.0;

    pub const MILEAGE_KM_PER_UNIT: f64 = 4.0;
    pub const WEIGHT_FACTOR: f64 = 0.1;
    pub const BASE_WEIGHT_KG: f64 = 6000.0;
    pub const UNIT_FUEL_PRICE: f64 = 94.97;

    pub const NOMINATIM_BASE_URL: &str = "https://nominatim.openstreetmap.org";
    pub const OSRM_BASE_URL: &str = "https://router.project-osrm.org/table/v1/driving";
    pub const USER_AGENT: &str = "truckload/0.1 (load-calculator)";
    pub const HTTP_TIMEOUT_SECS: u64 = 30;
    /// Nominatim's usage policy allows one request per second.
    pub const NOMINATIM_MIN_INTERVAL_MS: u64 = 1000;

    pub(crate) const SEED: u64 = 12345;
}

/// Caps applied to a single combination search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    pub max_results: usize,
    /// Refuse to enumerate when the candidate space is larger than this.
    pub max_candidates: u64,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_results: constant::MAX_RESULTS,
            max_candidates: constant::MAX_CANDIDATES,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub limits: SearchLimits,
    pub cost_model: CostModel,
    pub nominatim_base_url: String,
    pub osrm_base_url: String,
    pub user_agent: String,
    pub http_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            limits: SearchLimits::default(),
            cost_model: CostModel::default(),
            nominatim_base_url: constant::NOMINATIM_BASE_URL.to_string(),
            osrm_base_url: constant::OSRM_BASE_URL.to_string(),
            user_agent: constant::USER_AGENT.to_string(),
            http_timeout_secs: constant::HTTP_TIMEOUT_SECS,
        }
    }
}

impl Settings {
    /// Load settings from the process environment (and `.env` if present),
    /// falling back to the built-in constants for anything unset.
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        let defaults = Self::default();

        let settings = Self {
            limits: SearchLimits {
                max_results: env_or("TRUCKLOAD_MAX_RESULTS", defaults.limits.max_results)?,
                max_candidates: env_or(
                    "TRUCKLOAD_MAX_CANDIDATES",
                    defaults.limits.max_candidates,
                )?,
            },
            cost_model: CostModel::new(
                env_or("MILEAGE_KM_PER_UNIT", defaults.cost_model.mileage_km_per_unit)?,
                env_or("WEIGHT_FACTOR", defaults.cost_model.weight_factor)?,
                env_or("BASE_WEIGHT_KG", defaults.cost_model.base_weight)?,
                env_or("FUEL_PRICE", defaults.cost_model.unit_fuel_price)?,
            )?,
            nominatim_base_url: env::var("NOMINATIM_BASE_URL")
                .unwrap_or(defaults.nominatim_base_url),
            osrm_base_url: env::var("OSRM_BASE_URL").unwrap_or(defaults.osrm_base_url),
            user_agent: env::var("GEOCODER_USER_AGENT").unwrap_or(defaults.user_agent),
            http_timeout_secs: env_or("HTTP_TIMEOUT_SECS", defaults.http_timeout_secs)?,
        };

        if settings.limits.max_results == 0 {
            return Err(CalcError::Config(
                "TRUCKLOAD_MAX_RESULTS must be at least 1".to_string(),
            ));
        }

        debug!("Loaded settings: {:?}", settings);
        Ok(settings)
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> Result<T> {
    match env::var(key) {
        Ok(raw) => parse_setting(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_setting<T: FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| CalcError::Config(format!("{key}={raw:?} is not a valid value")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_calculator_constants() {
        let settings = Settings::default();
        assert_eq!(settings.limits.max_results, 10);
        assert_eq!(settings.cost_model.unit_fuel_price, 94.97);
        assert_eq!(settings.cost_model.base_weight, 6000.0);
    }

    #[test]
    fn parse_setting_trims_and_rejects_garbage() {
        let parsed: u64 = parse_setting("TRUCKLOAD_MAX_CANDIDATES", " 500 ").unwrap();
        assert_eq!(parsed, 500);

        let err = parse_setting::<f64>("FUEL_PRICE", "cheap").unwrap_err();
        assert!(matches!(err, CalcError::Config(msg) if msg.contains("FUEL_PRICE")));
    }
}
