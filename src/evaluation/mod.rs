pub mod cost;
pub mod status;
pub mod totals;
