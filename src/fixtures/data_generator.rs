use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::domain::types::{BoxSpec, Dimensions, TruckSpec};

/// A truck plus the box types offered for it.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub truck: TruckSpec,
    pub boxes: Vec<BoxSpec>,
}

/// Generates a random truck between a small van and a 32 ft container
fn random_truck(rng: &mut ChaCha8Rng) -> TruckSpec {
    TruckSpec {
        dimensions: Dimensions::new(
            rng.gen_range(10.0..=32.0),
            rng.gen_range(6.0..=8.5),
            rng.gen_range(6.0..=9.5),
        ),
        max_weight_kg: rng.gen_range(2_000.0..=30_000.0),
    }
}

/// Generates box types large enough relative to the truck to keep the
/// candidate space small (each side at least a quarter of the truck's).
fn random_boxes(rng: &mut ChaCha8Rng, truck: &TruckSpec, count: usize) -> Vec<BoxSpec> {
    let t = truck.dimensions;
    (0..count)
        .map(|i| BoxSpec {
            name: format!("Box {}", i + 1),
            dimensions: Dimensions::new(
                rng.gen_range(t.length / 4.0..=t.length / 2.0),
                rng.gen_range(t.width / 4.0..=t.width / 2.0),
                rng.gen_range(t.height / 4.0..=t.height / 2.0),
            ),
            weight_kg: rng.gen_range(50.0..=truck.max_weight_kg / 4.0),
        })
        .collect()
}

/// Deterministic scenario for `seed` with `box_types` box types.
pub fn generate_scenario(seed: u64, box_types: usize) -> Scenario {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let truck = random_truck(&mut rng);
    let boxes = random_boxes(&mut rng, &truck, box_types);

    info!(
        "Generated scenario (seed {}): truck {} / {:.0} kg, {} box types",
        seed,
        truck.dimensions,
        truck.max_weight_kg,
        boxes.len()
    );
    Scenario { truck, boxes }
}
