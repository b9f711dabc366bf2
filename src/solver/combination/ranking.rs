use std::cmp::Ordering;

use rayon::prelude::*;

use crate::domain::types::Combination;

/// Most volume first, then most weight. Purely lexicographic.
pub fn by_utilization(a: &Combination, b: &Combination) -> Ordering {
    b.total_volume
        .total_cmp(&a.total_volume)
        .then_with(|| b.total_weight.total_cmp(&a.total_weight))
}

/// Sort by utilization and keep the first `max_results`.
///
/// The sort is stable, so equal keys keep enumeration order.
pub fn rank(mut combinations: Vec<Combination>, max_results: usize) -> Vec<Combination> {
    combinations.par_sort_by(by_utilization);
    combinations.truncate(max_results);
    combinations
}
