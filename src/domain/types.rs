use serde::{Deserialize, Serialize};

use crate::config::constant::{
    DEFAULT_TRUCK_HEIGHT_FT, DEFAULT_TRUCK_LENGTH_FT, DEFAULT_TRUCK_WEIGHT_KG,
    DEFAULT_TRUCK_WIDTH_FT,
};
use crate::evaluation::totals::load_totals;

/// Truck volume and weight limits for one search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Capacity {
    pub volume: f64,
    pub weight: f64,
}

/// A category of cargo item. Identified by its position in the box type list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxType {
    pub unit_volume: f64,
    pub unit_weight: f64,
}

/// One count per box type plus the totals those counts add up to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combination {
    pub counts: Vec<u64>,
    pub total_volume: f64,
    pub total_weight: f64,
}

impl Combination {
    pub fn from_counts(counts: Vec<u64>, box_types: &[BoxType]) -> Self {
        let (total_volume, total_weight) = load_totals(&counts, box_types);
        Self {
            counts,
            total_volume,
            total_weight,
        }
    }

    pub fn fits(&self, capacity: &Capacity) -> bool {
        self.total_volume <= capacity.volume && self.total_weight <= capacity.weight
    }

    pub fn total_boxes(&self) -> u64 {
        self.counts.iter().sum()
    }
}

/// Side lengths in feet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

/// Whole feet plus whole inches of a single side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeetInches {
    pub feet: i64,
    pub inches: i64,
}

impl Dimensions {
    pub fn new(length: f64, width: f64, height: f64) -> Self {
        Self {
            length,
            width,
            height,
        }
    }

    /// Cubic feet.
    pub fn volume(&self) -> f64 {
        self.length * self.width * self.height
    }

    pub fn to_feet_and_inches(&self) -> [FeetInches; 3] {
        [self.length, self.width, self.height].map(|side| {
            let feet = side.trunc();
            FeetInches {
                feet: feet as i64,
                inches: ((side - feet) * 12.0).trunc() as i64,
            }
        })
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [l, w, h] = self.to_feet_and_inches();
        write!(
            f,
            "{}' {}\" x {}' {}\" x {}' {}\"",
            l.feet, l.inches, w.feet, w.inches, h.feet, h.inches
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TruckSpec {
    pub dimensions: Dimensions,
    pub max_weight_kg: f64,
}

impl TruckSpec {
    pub fn capacity(&self) -> Capacity {
        Capacity {
            volume: self.dimensions.volume(),
            weight: self.max_weight_kg,
        }
    }
}

impl Default for TruckSpec {
    fn default() -> Self {
        Self {
            dimensions: Dimensions::new(
                DEFAULT_TRUCK_LENGTH_FT,
                DEFAULT_TRUCK_WIDTH_FT,
                DEFAULT_TRUCK_HEIGHT_FT,
            ),
            max_weight_kg: DEFAULT_TRUCK_WEIGHT_KG,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxSpec {
    pub name: String,
    pub dimensions: Dimensions,
    pub weight_kg: f64,
}

impl BoxSpec {
    pub fn box_type(&self) -> BoxType {
        BoxType {
            unit_volume: self.dimensions.volume(),
            unit_weight: self.weight_kg,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn feet_and_inches_split() {
        let dims = Dimensions::new(24.0833, 8.0, 9.5);
        let [l, w, h] = dims.to_feet_and_inches();
        assert_eq!(l, FeetInches { feet: 24, inches: 0 });
        assert_eq!(w, FeetInches { feet: 8, inches: 0 });
        assert_eq!(h, FeetInches { feet: 9, inches: 6 });
        assert_eq!(dims.to_string(), "24' 0\" x 8' 0\" x 9' 6\"");
    }

    #[test]
    fn default_truck_capacity() {
        let capacity = TruckSpec::default().capacity();
        assert_relative_eq!(capacity.volume, 24.0833 * 8.0 * 9.5);
        assert_eq!(capacity.weight, 29_600.0);
    }

    #[test]
    fn combination_totals_follow_counts() {
        let types = [
            BoxType { unit_volume: 2.0, unit_weight: 5.0 },
            BoxType { unit_volume: 3.0, unit_weight: 1.0 },
        ];
        let combo = Combination::from_counts(vec![2, 3], &types);
        assert_eq!(combo.total_volume, 13.0);
        assert_eq!(combo.total_weight, 13.0);
        assert_eq!(combo.total_boxes(), 5);
        assert!(combo.fits(&Capacity { volume: 13.0, weight: 13.0 }));
        assert!(!combo.fits(&Capacity { volume: 13.0, weight: 12.9 }));
    }
}
