use itertools::Itertools;
use tracing::{debug, info, span, warn, Level};

use super::bounds::{candidate_space, max_counts, validate_inputs};
use super::ranking::rank;
use crate::config::SearchLimits;
use crate::domain::types::{BoxType, Capacity, Combination};
use crate::error::{CalcError, Result};

/// Every feasible combination within the per-type volume bounds, in
/// enumeration order (last box type varies fastest).
pub fn feasible_combinations(
    capacity: &Capacity,
    box_types: &[BoxType],
    limits: &SearchLimits,
) -> Result<Vec<Combination>> {
    validate_inputs(capacity, box_types)?;

    let bounds = max_counts(capacity, box_types);
    let candidates = candidate_space(&bounds);
    if candidates > u128::from(limits.max_candidates) {
        warn!(
            "Refusing to enumerate {} candidates (limit {})",
            candidates, limits.max_candidates
        );
        return Err(CalcError::ExplosiveEnumeration {
            candidates,
            limit: limits.max_candidates,
        });
    }
    debug!("Enumerating {} candidates", candidates);

    let feasible: Vec<Combination> = bounds
        .iter()
        .map(|&bound| 0..=bound)
        .multi_cartesian_product()
        .map(|counts| Combination::from_counts(counts, box_types))
        .filter(|combination| combination.fits(capacity))
        .collect();

    debug!(
        "{} of {} candidates are feasible",
        feasible.len(),
        candidates
    );
    Ok(feasible)
}

/// Up to `limits.max_results` feasible combinations, highest volume
/// utilization first and highest weight utilization among equal volumes.
pub fn best_combination_with_constraints(
    capacity: &Capacity,
    box_types: &[BoxType],
    limits: &SearchLimits,
) -> Result<Vec<Combination>> {
    let search_span = span!(Level::INFO, "combination_search", box_types = box_types.len());
    let _guard = search_span.enter();

    let feasible = feasible_combinations(capacity, box_types, limits)?;
    let best = rank(feasible, limits.max_results);

    if let Some(top) = best.first() {
        info!(
            "Best of {} combinations: {:?} ({:.2} volume, {:.2} weight)",
            best.len(),
            top.counts,
            top.total_volume,
            top.total_weight
        );
    }
    Ok(best)
}

/// [`best_combination_with_constraints`] with the default limits.
pub fn search(capacity: &Capacity, box_types: &[BoxType]) -> Result<Vec<Combination>> {
    best_combination_with_constraints(capacity, box_types, &SearchLimits::default())
}
