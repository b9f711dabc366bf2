use tracing::debug;

use crate::domain::types::{BoxType, Capacity};
use crate::error::{CalcError, Result};

/// Reject inputs the enumeration cannot handle before any work is done.
pub fn validate_inputs(capacity: &Capacity, box_types: &[BoxType]) -> Result<()> {
    let capacity_ok = |v: f64| v.is_finite() && v >= 0.0;
    if !capacity_ok(capacity.volume) || !capacity_ok(capacity.weight) {
        return Err(CalcError::InvalidCapacity {
            volume: capacity.volume,
            weight: capacity.weight,
        });
    }

    if box_types.is_empty() {
        return Err(CalcError::NoBoxTypes);
    }

    for (index, bt) in box_types.iter().enumerate() {
        if !(bt.unit_volume.is_finite() && bt.unit_volume > 0.0) {
            return Err(CalcError::InvalidBoxType {
                index,
                reason: format!("unit volume must be > 0, got {}", bt.unit_volume),
            });
        }
        if !(bt.unit_weight.is_finite() && bt.unit_weight >= 0.0) {
            return Err(CalcError::InvalidBoxType {
                index,
                reason: format!("unit weight must be >= 0, got {}", bt.unit_weight),
            });
        }
    }

    Ok(())
}

/// Per-type upper bound on the count, from volume alone.
///
/// Weight is filtered afterwards, so the bound is loose when a box is heavy
/// for its size. Expects validated inputs.
pub fn max_counts(capacity: &Capacity, box_types: &[BoxType]) -> Vec<u64> {
    let bounds: Vec<u64> = box_types
        .iter()
        .map(|bt| (capacity.volume / bt.unit_volume).floor() as u64)
        .collect();
    debug!("Per-type count bounds: {:?}", bounds);
    bounds
}

/// Number of candidates the Cartesian product over `0..=bound` will visit.
pub fn candidate_space(bounds: &[u64]) -> u128 {
    bounds.iter().fold(1u128, |acc, &bound| {
        acc.saturating_mul(u128::from(bound).saturating_add(1))
    })
}
