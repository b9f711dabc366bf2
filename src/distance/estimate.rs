use futures::future::try_join;
use serde::Serialize;
use tracing::{info, warn};

use super::providers::{DistanceProvider, Geocoder};
use crate::domain::types::Coordinates;
use crate::error::{CalcError, Result};
use crate::evaluation::cost::{estimate_cost, CostModel};

/// Distance and fuel cost of moving a load between two named places.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteEstimate {
    pub from: String,
    pub to: String,
    pub from_coords: Coordinates,
    pub to_coords: Coordinates,
    pub distance_km: f64,
    pub total_weight: f64,
    pub fuel_needed: f64,
    pub cost: f64,
}

/// Geocode both places and measure the distance between them.
///
/// Both lookups are issued together; a rate-limited geocoder such as
/// [`NominatimGeocoder`](super::NominatimGeocoder) queues the second one.
///
/// Either place failing to resolve is [`CalcError::GeocodeNotFound`].
pub async fn distance_between_places<G: Geocoder>(
    geocoder: &G,
    provider: &DistanceProvider,
    from: &str,
    to: &str,
) -> Result<(Coordinates, Coordinates, f64)> {
    let (from_coords, to_coords) = try_join(geocoder.geocode(from), geocoder.geocode(to)).await?;

    let from_coords = from_coords.ok_or_else(|| {
        warn!("Could not find coordinates for '{}'", from);
        CalcError::GeocodeNotFound(from.to_string())
    })?;
    let to_coords = to_coords.ok_or_else(|| {
        warn!("Could not find coordinates for '{}'", to);
        CalcError::GeocodeNotFound(to.to_string())
    })?;

    let distance_km = provider
        .distance_km(from_coords, to_coords)
        .await?
        .ok_or_else(|| CalcError::DistanceUnavailable {
            from: from.to_string(),
            to: to.to_string(),
        })?;

    Ok((from_coords, to_coords, distance_km))
}

/// Distance plus the fuel cost for carrying `total_weight` over it.
/// No cost is computed unless both places resolve.
pub async fn estimate_route<G: Geocoder>(
    geocoder: &G,
    provider: &DistanceProvider,
    from: &str,
    to: &str,
    total_weight: f64,
    model: &CostModel,
) -> Result<RouteEstimate> {
    let (from_coords, to_coords, distance_km) =
        distance_between_places(geocoder, provider, from, to).await?;

    let estimate = RouteEstimate {
        from: from.to_string(),
        to: to.to_string(),
        from_coords,
        to_coords,
        distance_km,
        total_weight,
        fuel_needed: model.fuel_needed(distance_km),
        cost: estimate_cost(distance_km, total_weight, model),
    };

    info!(
        "{} -> {}: {:.2} km, {:.2} fuel units, cost {:.2}",
        from, to, estimate.distance_km, estimate.fuel_needed, estimate.cost
    );
    Ok(estimate)
}
