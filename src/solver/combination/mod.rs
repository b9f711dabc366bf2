pub mod bounds;
pub mod ranking;
pub mod search;

pub use search::*;
