use crate::spot::SpotId;
use thiserror::Error;

/// Which scalar failed magnitude validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Magnitude {
    Cost,
    CostThreshold,
}

impl std::fmt::Display for Magnitude {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Magnitude::Cost => write!(f, "linking cost"),
            Magnitude::CostThreshold => write!(f, "cost threshold"),
        }
    }
}

#[derive(Debug, Error)]
pub enum LinkError {
    /// Square root is undefined for this value in the real domain.
    #[error("invalid magnitude for {quantity}: {value}")]
    InvalidMagnitude { quantity: Magnitude, value: f64 },

    #[error("spot {spot} has no feature {feature}")]
    MissingFeature { spot: SpotId, feature: String },

    #[error("invalid linking config: {0}")]
    InvalidConfig(String),

    #[error("cannot merge gate reports from different runs (threshold {ours} vs {theirs})")]
    ReportMismatch { ours: f64, theirs: f64 },

    #[error("failed to parse linking config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("failed to read linking config: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LinkError>;
