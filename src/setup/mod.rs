pub mod init;
pub mod init_types;

pub use init::{name_unnamed, parse_adjustment, parse_box_spec, read_box_specs_from_csv};
pub use init_types::Adjustment;
