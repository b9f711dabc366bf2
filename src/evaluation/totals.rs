use crate::domain::types::BoxType;

/// Total volume and weight of `counts[i]` boxes of each `box_types[i]`.
pub fn load_totals(counts: &[u64], box_types: &[BoxType]) -> (f64, f64) {
    counts
        .iter()
        .zip(box_types)
        .fold((0.0, 0.0), |(volume, weight), (&count, bt)| {
            let n = count as f64;
            (volume + n * bt.unit_volume, weight + n * bt.unit_weight)
        })
}
