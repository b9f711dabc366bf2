use serde::Serialize;

use crate::config::constant::{BASE_WEIGHT_KG, MILEAGE_KM_PER_UNIT, UNIT_FUEL_PRICE, WEIGHT_FACTOR};
use crate::error::{CalcError, Result};

/// Fixed fuel-cost model:
///
/// ```text
/// fuel_needed       = distance_km / mileage_km_per_unit
/// weight_adjustment = 1 + weight_factor * (total_weight / base_weight)
/// cost              = fuel_needed * unit_fuel_price * weight_adjustment
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostModel {
    pub mileage_km_per_unit: f64,
    pub weight_factor: f64,
    pub base_weight: f64,
    pub unit_fuel_price: f64,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            mileage_km_per_unit: MILEAGE_KM_PER_UNIT,
            weight_factor: WEIGHT_FACTOR,
            base_weight: BASE_WEIGHT_KG,
            unit_fuel_price: UNIT_FUEL_PRICE,
        }
    }
}

impl CostModel {
    pub fn new(
        mileage_km_per_unit: f64,
        weight_factor: f64,
        base_weight: f64,
        unit_fuel_price: f64,
    ) -> Result<Self> {
        if !(mileage_km_per_unit.is_finite() && mileage_km_per_unit > 0.0) {
            return Err(CalcError::Config(format!(
                "mileage must be > 0, got {mileage_km_per_unit}"
            )));
        }
        if !(base_weight.is_finite() && base_weight > 0.0) {
            return Err(CalcError::Config(format!(
                "base weight must be > 0, got {base_weight}"
            )));
        }
        if !weight_factor.is_finite() || !unit_fuel_price.is_finite() {
            return Err(CalcError::Config(
                "weight factor and fuel price must be finite".to_string(),
            ));
        }
        Ok(Self {
            mileage_km_per_unit,
            weight_factor,
            base_weight,
            unit_fuel_price,
        })
    }

    pub fn fuel_needed(&self, distance_km: f64) -> f64 {
        distance_km / self.mileage_km_per_unit
    }

    pub fn weight_adjustment(&self, total_weight: f64) -> f64 {
        1.0 + self.weight_factor * (total_weight / self.base_weight)
    }
}

pub fn estimate_cost(distance_km: f64, total_weight: f64, model: &CostModel) -> f64 {
    model.fuel_needed(distance_km) * model.unit_fuel_price * model.weight_adjustment(total_weight)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_model_cost() {
        let model = CostModel::default();
        // 100 km at 4 km/unit = 25 units; 6000 kg adds 10%.
        assert_relative_eq!(estimate_cost(100.0, 6000.0, &model), 25.0 * 94.97 * 1.1);
        assert_relative_eq!(estimate_cost(100.0, 0.0, &model), 25.0 * 94.97);
    }

    #[test]
    fn zero_distance_costs_nothing() {
        assert_eq!(estimate_cost(0.0, 12_000.0, &CostModel::default()), 0.0);
    }

    #[test]
    fn rejects_zero_mileage_and_base_weight() {
        assert!(CostModel::new(0.0, 0.1, 6000.0, 94.97).is_err());
        assert!(CostModel::new(4.0, 0.1, 0.0, 94.97).is_err());
        assert!(CostModel::new(4.0, 0.1, 6000.0, 94.97).is_ok());
    }
}
