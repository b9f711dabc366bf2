use tracing::{debug, info, warn};

use super::types::{BoxSpec, BoxType, Capacity, Combination, TruckSpec};
use crate::config::SearchLimits;
use crate::distance::RouteEstimate;
use crate::error::{CalcError, Result};
use crate::evaluation::status::{assess, LoadAssessment};
use crate::solver::combination::bounds::validate_inputs;
use crate::solver::combination::best_combination_with_constraints;

/// State of one loading plan, owned by whoever drives the calculator.
///
/// Holds the last ranked results and the combination picked from them.
/// Adjusting the picked combination never touches the ranked results.
#[derive(Debug, Clone)]
pub struct LoadingSession {
    truck: TruckSpec,
    boxes: Vec<BoxSpec>,
    box_types: Vec<BoxType>,
    results: Vec<Combination>,
    selected: Option<Combination>,
    pub route: Option<RouteEstimate>,
}

impl LoadingSession {
    pub fn new(truck: TruckSpec, boxes: Vec<BoxSpec>) -> Result<Self> {
        let box_types: Vec<BoxType> = boxes.iter().map(BoxSpec::box_type).collect();
        validate_inputs(&truck.capacity(), &box_types)?;

        Ok(Self {
            truck,
            boxes,
            box_types,
            results: Vec::new(),
            selected: None,
            route: None,
        })
    }

    pub fn truck(&self) -> &TruckSpec {
        &self.truck
    }

    pub fn boxes(&self) -> &[BoxSpec] {
        &self.boxes
    }

    pub fn capacity(&self) -> Capacity {
        self.truck.capacity()
    }

    pub fn results(&self) -> &[Combination] {
        &self.results
    }

    pub fn selected(&self) -> Option<&Combination> {
        self.selected.as_ref()
    }

    /// Run the ranked search. Replaces earlier results and drops the selection.
    pub fn calculate(&mut self, limits: &SearchLimits) -> Result<&[Combination]> {
        let results = best_combination_with_constraints(&self.capacity(), &self.box_types, limits)?;
        self.results = results;
        self.selected = None;
        self.route = None;
        Ok(&self.results)
    }

    /// Pick the ranked result at `index` (0-based) as the working load.
    pub fn select(&mut self, index: usize) -> Result<&Combination> {
        let chosen = self
            .results
            .get(index)
            .cloned()
            .ok_or(CalcError::SelectionOutOfRange {
                rank: index + 1,
                len: self.results.len(),
            })?;
        info!("Selected combination {}: {:?}", index + 1, chosen.counts);
        self.route = None;
        Ok(&*self.selected.insert(chosen))
    }

    /// Pick by rank as listed to the user (1 = best). Rank 0 is an error.
    pub fn select_rank(&mut self, rank: usize) -> Result<&Combination> {
        let index = rank.checked_sub(1).ok_or(CalcError::SelectionOutOfRange {
            rank,
            len: self.results.len(),
        })?;
        self.select(index)
    }

    /// Add `delta` boxes of one type to the selection (count stops at zero).
    ///
    /// The result may no longer fit; check the returned assessment.
    pub fn adjust(&mut self, box_index: usize, delta: i64) -> Result<LoadAssessment> {
        let len = self.box_types.len();
        let capacity = self.capacity();
        let selected = self.selected.as_mut().ok_or(CalcError::NoSelection)?;
        if box_index >= len {
            return Err(CalcError::BoxIndexOutOfRange {
                index: box_index,
                len,
            });
        }

        let mut counts = selected.counts.clone();
        let count = &mut counts[box_index];
        *count = if delta < 0 {
            count.saturating_sub(delta.unsigned_abs())
        } else {
            count.saturating_add(delta.unsigned_abs())
        };
        debug!("Adjusted box {} by {} to {:?}", box_index + 1, delta, counts);

        *selected = Combination::from_counts(counts, &self.box_types);
        let assessment = assess(selected, &capacity);
        if !assessment.feasible {
            warn!(
                "Adjusted load {:?} exceeds the truck ({:.2} / {:.2} volume, {:.2} / {:.2} weight)",
                selected.counts,
                selected.total_volume,
                capacity.volume,
                selected.total_weight,
                capacity.weight
            );
        }
        self.route = None;
        Ok(assessment)
    }

    /// Assessment of the current selection, if any.
    pub fn assessment(&self) -> Option<LoadAssessment> {
        self.selected
            .as_ref()
            .map(|combination| assess(combination, &self.capacity()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::Dimensions;

    fn session() -> LoadingSession {
        // 10 x 10 x 10 truck holding up to 500 kg
        let truck = TruckSpec {
            dimensions: Dimensions::new(10.0, 10.0, 10.0),
            max_weight_kg: 500.0,
        };
        let boxes = vec![BoxSpec {
            name: "crate".to_string(),
            dimensions: Dimensions::new(10.0, 10.0, 1.0),
            weight_kg: 50.0,
        }];
        LoadingSession::new(truck, boxes).unwrap()
    }

    #[test]
    fn select_requires_results() {
        let mut s = session();
        assert!(matches!(
            s.select(0),
            Err(CalcError::SelectionOutOfRange { rank: 1, len: 0 })
        ));
        assert!(matches!(s.adjust(0, 1), Err(CalcError::NoSelection)));
    }

    #[test]
    fn adjust_recomputes_totals_and_feasibility() {
        let mut s = session();
        s.calculate(&SearchLimits::default()).unwrap();
        assert_eq!(s.select(0).unwrap().counts, vec![10]);

        let over = s.adjust(0, 1).unwrap();
        assert!(!over.feasible);
        assert_eq!(s.selected().unwrap().total_volume, 1100.0);
        assert_eq!(s.selected().unwrap().total_weight, 550.0);

        let back = s.adjust(0, -3).unwrap();
        assert!(back.feasible);
        assert_eq!(s.selected().unwrap().counts, vec![8]);

        // ranked results are untouched
        assert_eq!(s.results()[0].counts, vec![10]);
    }

    #[test]
    fn decrement_stops_at_zero() {
        let mut s = session();
        s.calculate(&SearchLimits::default()).unwrap();
        s.select(9).unwrap();
        s.adjust(0, -100).unwrap();
        let selected = s.selected().unwrap();
        assert_eq!(selected.counts, vec![0]);
        assert_eq!(selected.total_volume, 0.0);
    }

    #[test]
    fn rank_zero_is_rejected_not_treated_as_best() {
        let mut s = session();
        s.calculate(&SearchLimits::default()).unwrap();
        assert!(matches!(
            s.select_rank(0),
            Err(CalcError::SelectionOutOfRange { rank: 0, len: 10 })
        ));
        assert!(s.selected().is_none());

        assert_eq!(s.select_rank(2).unwrap().counts, vec![9]);
        assert!(matches!(
            s.select_rank(11),
            Err(CalcError::SelectionOutOfRange { rank: 11, len: 10 })
        ));
    }

    #[test]
    fn adjust_rejects_unknown_box_type() {
        let mut s = session();
        s.calculate(&SearchLimits::default()).unwrap();
        s.select(0).unwrap();
        assert!(matches!(
            s.adjust(3, 1),
            Err(CalcError::BoxIndexOutOfRange { index: 3, len: 1 })
        ));
    }

    #[test]
    fn recalculating_clears_selection() {
        let mut s = session();
        s.calculate(&SearchLimits::default()).unwrap();
        s.select(0).unwrap();
        s.calculate(&SearchLimits::default()).unwrap();
        assert!(s.selected().is_none());
        assert!(s.assessment().is_none());
    }

    #[test]
    fn invalid_boxes_are_rejected_up_front() {
        let boxes = vec![BoxSpec {
            name: "flat".to_string(),
            dimensions: Dimensions::new(1.0, 1.0, 0.0),
            weight_kg: 1.0,
        }];
        assert!(matches!(
            LoadingSession::new(TruckSpec::default(), boxes),
            Err(CalcError::InvalidBoxType { index: 0, .. })
        ));
    }
}
