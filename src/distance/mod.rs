pub mod estimate;
pub mod geodesic;
pub mod providers;

pub use estimate::{distance_between_places, estimate_route, RouteEstimate};
pub use providers::{DistanceProvider, DistanceSource, Geocoder, NominatimGeocoder};
