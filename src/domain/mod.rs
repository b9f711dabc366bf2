pub mod session;
pub mod types;

pub use session::LoadingSession;
pub use types::*;
