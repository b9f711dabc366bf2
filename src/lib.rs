//! Truck loading calculator: ranks the box-count combinations that fit a
//! truck's volume and weight limits, and estimates the fuel cost of moving
//! a chosen load between two places.

pub mod cli;
pub mod config;
pub mod distance;
pub mod domain;
pub mod error;
pub mod evaluation;
pub mod fixtures;
pub mod report;
pub mod setup;
pub mod solver;

pub use config::{SearchLimits, Settings};
pub use distance::{estimate_route, Geocoder, RouteEstimate};
pub use domain::types::{BoxSpec, BoxType, Capacity, Combination, Coordinates, Dimensions, TruckSpec};
pub use domain::LoadingSession;
pub use error::{CalcError, Result};
pub use evaluation::cost::{estimate_cost, CostModel};
pub use solver::combination::{best_combination_with_constraints, feasible_combinations, search};
