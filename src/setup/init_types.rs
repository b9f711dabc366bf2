use serde::Deserialize;

/// One row of a box-type CSV file.
#[derive(Debug, Deserialize)]
pub struct BoxRow {
    pub name: String,
    pub length_ft: f64,
    pub width_ft: f64,
    pub height_ft: f64,
    pub weight_kg: f64,
}

/// `I:±D` from the command line: change box type `index` by `delta`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Adjustment {
    /// 0-based box type index.
    pub index: usize,
    pub delta: i64,
}
