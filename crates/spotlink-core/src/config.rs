use crate::error::{LinkError, Magnitude, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Settings fixed for the duration of one tracking run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinkingConfig {
    /// Squared maximum base distance between linked spots, before radii
    /// are added.
    pub cost_threshold: f64,
    /// Reject negative or NaN magnitudes with an error instead of passing
    /// them through the comparison.
    #[serde(default = "default_validate")]
    pub validate_magnitudes: bool,
}

fn default_validate() -> bool {
    true
}

const DEFAULT_MAX_DISTANCE: f64 = 15.0;

impl Default for LinkingConfig {
    fn default() -> Self {
        Self {
            cost_threshold: DEFAULT_MAX_DISTANCE * DEFAULT_MAX_DISTANCE,
            validate_magnitudes: default_validate(),
        }
    }
}

impl LinkingConfig {
    /// Threshold from a linear distance. The distance is checked before
    /// squaring, which would otherwise hide its sign.
    pub fn from_max_distance(max_distance: f64) -> Result<Self> {
        if max_distance.is_nan() || max_distance < 0.0 {
            return Err(LinkError::InvalidMagnitude {
                quantity: Magnitude::CostThreshold,
                value: max_distance,
            });
        }
        let config = Self {
            cost_threshold: max_distance * max_distance,
            validate_magnitudes: default_validate(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn max_distance(&self) -> f64 {
        self.cost_threshold.sqrt()
    }

    pub fn validate(&self) -> Result<()> {
        if self.cost_threshold.is_nan() || self.cost_threshold < 0.0 {
            return Err(LinkError::InvalidMagnitude {
                quantity: Magnitude::CostThreshold,
                value: self.cost_threshold,
            });
        }
        if self.cost_threshold.is_infinite() {
            return Err(LinkError::InvalidConfig(
                "cost_threshold must be finite".into(),
            ));
        }
        Ok(())
    }

    /// Parses a config. The threshold is only checked when
    /// `validate_magnitudes` is set, the same policy `RadiusGate` applies.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(s)?;
        if config.validate_magnitudes {
            config.validate()?;
        }
        debug!(
            cost_threshold = config.cost_threshold,
            validate_magnitudes = config.validate_magnitudes,
            "loaded linking config"
        );
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }
}
