//! Route pricing with an in-memory geocoder.

use std::collections::HashMap;

use approx::assert_relative_eq;
use truckload::distance::geodesic::great_circle_km;
use truckload::distance::{distance_between_places, DistanceProvider};
use truckload::{
    estimate_route, BoxSpec, CalcError, Coordinates, CostModel, Dimensions, Geocoder,
    LoadingSession, Result, SearchLimits, TruckSpec,
};

struct FakeGeocoder {
    places: HashMap<&'static str, Coordinates>,
}

impl FakeGeocoder {
    fn new() -> Self {
        let places = HashMap::from([
            ("Mumbai", Coordinates { lat: 19.0760, lon: 72.8777 }),
            ("Pune", Coordinates { lat: 18.5204, lon: 73.8567 }),
        ]);
        Self { places }
    }
}

impl Geocoder for FakeGeocoder {
    async fn geocode(&self, place: &str) -> Result<Option<Coordinates>> {
        Ok(self.places.get(place).copied())
    }
}

#[tokio::test]
async fn prices_a_resolved_route() {
    let geocoder = FakeGeocoder::new();
    let model = CostModel::default();

    let estimate = estimate_route(
        &geocoder,
        &DistanceProvider::Geodesic,
        "Mumbai",
        "Pune",
        3000.0,
        &model,
    )
    .await
    .unwrap();

    let expected_km = great_circle_km(geocoder.places["Mumbai"], geocoder.places["Pune"]);
    assert_relative_eq!(estimate.distance_km, expected_km);
    assert!(estimate.distance_km > 110.0 && estimate.distance_km < 130.0);
    assert_relative_eq!(estimate.fuel_needed, expected_km / 4.0);
    assert_relative_eq!(estimate.cost, expected_km / 4.0 * 94.97 * 1.05);
}

#[tokio::test]
async fn unknown_place_is_reported_not_priced() {
    let geocoder = FakeGeocoder::new();

    let err = estimate_route(
        &geocoder,
        &DistanceProvider::Geodesic,
        "Mumbai",
        "Atlantis",
        100.0,
        &CostModel::default(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, CalcError::GeocodeNotFound(place) if place == "Atlantis"));

    let err = distance_between_places(&geocoder, &DistanceProvider::Geodesic, "Atlantis", "Pune")
        .await
        .unwrap_err();
    assert!(matches!(err, CalcError::GeocodeNotFound(place) if place == "Atlantis"));
}

#[tokio::test]
async fn adjusted_selection_weight_drives_the_cost() {
    let truck = TruckSpec {
        dimensions: Dimensions::new(10.0, 10.0, 10.0),
        max_weight_kg: 12_000.0,
    };
    let boxes = vec![BoxSpec {
        name: "pallet".to_string(),
        dimensions: Dimensions::new(5.0, 5.0, 5.0),
        weight_kg: 1500.0,
    }];
    let mut session = LoadingSession::new(truck, boxes).unwrap();
    session.calculate(&SearchLimits::default()).unwrap();
    session.select(0).unwrap();
    session.adjust(0, -2).unwrap();

    let weight = session.selected().unwrap().total_weight;
    assert_eq!(weight, 9000.0);

    let geocoder = FakeGeocoder::new();
    let estimate = estimate_route(
        &geocoder,
        &DistanceProvider::Geodesic,
        "Mumbai",
        "Pune",
        weight,
        &CostModel::default(),
    )
    .await
    .unwrap();
    assert_relative_eq!(
        estimate.cost,
        estimate.distance_km / 4.0 * 94.97 * (1.0 + 0.1 * 1.5)
    );
}
