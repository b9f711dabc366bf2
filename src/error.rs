use thiserror::Error;

/// Everything that can go wrong between reading inputs and printing a load plan.
#[derive(Debug, Error)]
pub enum CalcError {
    #[error("invalid truck capacity (volume: {volume}, weight: {weight}); both must be finite and >= 0")]
    InvalidCapacity { volume: f64, weight: f64 },

    #[error("invalid box type {}: {}", .index + 1, .reason)]
    InvalidBoxType { index: usize, reason: String },

    #[error("at least one box type is required")]
    NoBoxTypes,

    /// The Cartesian product of per-type counts is too large to enumerate.
    #[error(
        "search space of {candidates} candidates exceeds the limit of {limit}; \
         use fewer box types or a smaller truck volume"
    )]
    ExplosiveEnumeration { candidates: u128, limit: u64 },

    #[error("could not find coordinates for '{0}'")]
    GeocodeNotFound(String),

    #[error("no distance available between '{from}' and '{to}'")]
    DistanceUnavailable { from: String, to: String },

    #[error("no combination has been selected")]
    NoSelection,

    /// `rank` is 1-based, as shown in the result list.
    #[error("rank {rank} is out of range ({len} combinations available)")]
    SelectionOutOfRange { rank: usize, len: usize },

    #[error("box type {index} is out of range ({len} box types)")]
    BoxIndexOutOfRange { index: usize, len: usize },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("unexpected response from {service}: {message}")]
    BadResponse {
        service: &'static str,
        message: String,
    },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CalcError>;
