use serde::Serialize;

use crate::config::constant::NEAR_LIMIT_RATIO;
use crate::domain::types::{Capacity, Combination};

/// How close a load comes to the truck's limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LoadAssessment {
    pub feasible: bool,
    pub volume_limit_reached: bool,
    pub weight_limit_reached: bool,
    pub volume_utilization: f64,
    pub weight_utilization: f64,
}

pub fn assess(combination: &Combination, capacity: &Capacity) -> LoadAssessment {
    LoadAssessment {
        feasible: combination.fits(capacity),
        volume_limit_reached: combination.total_volume >= capacity.volume * NEAR_LIMIT_RATIO,
        weight_limit_reached: combination.total_weight >= capacity.weight * NEAR_LIMIT_RATIO,
        volume_utilization: utilization(combination.total_volume, capacity.volume),
        weight_utilization: utilization(combination.total_weight, capacity.weight),
    }
}

fn utilization(used: f64, available: f64) -> f64 {
    if available > 0.0 {
        used / available
    } else {
        0.0
    }
}

impl LoadAssessment {
    pub fn volume_status(&self) -> &'static str {
        if self.volume_limit_reached {
            "Volume limit reached!"
        } else {
            "Volume OK"
        }
    }

    pub fn weight_status(&self) -> &'static str {
        if self.weight_limit_reached {
            "Weight limit reached!"
        } else {
            "Weight OK"
        }
    }
}

/// One-line summary: `Box 1: 10, Total Volume: ... (Volume OK), Total Weight: ... (Weight OK)`.
pub fn format_combination(combination: &Combination, capacity: &Capacity) -> String {
    let assessment = assess(combination, capacity);
    let counts = combination
        .counts
        .iter()
        .enumerate()
        .map(|(i, count)| format!("Box {}: {}", i + 1, count))
        .collect::<Vec<String>>()
        .join(", ");

    format!(
        // weight keeps a decimal point even when whole: 500.0, 12.25
        "{}, Total Volume: {:.2} cubic feet ({}), Total Weight: {:?} kg ({})",
        counts,
        combination.total_volume,
        assessment.volume_status(),
        combination.total_weight,
        assessment.weight_status()
    )
}
