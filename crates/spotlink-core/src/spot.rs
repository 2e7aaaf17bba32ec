use crate::error::{LinkError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const POSITION_X: &str = "POSITION_X";
pub const POSITION_Y: &str = "POSITION_Y";
pub const POSITION_Z: &str = "POSITION_Z";
pub const RADIUS: &str = "RADIUS";
pub const QUALITY: &str = "QUALITY";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SpotId(pub u64);

impl std::fmt::Display for SpotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ID{}", self.0)
    }
}

/// Named numeric features, looked up by the linking rule.
///
/// Hosts with their own spot types implement this instead of converting
/// into [`Spot`].
pub trait FeatureSource {
    fn feature(&self, name: &str) -> Option<f64>;

    fn id(&self) -> SpotId;

    fn require(&self, name: &str) -> Result<f64> {
        self.feature(name).ok_or_else(|| LinkError::MissingFeature {
            spot: self.id(),
            feature: name.to_string(),
        })
    }
}

/// A detected object at one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spot {
    pub id: SpotId,
    pub frame: u32,
    pub features: BTreeMap<String, f64>,
}

impl Spot {
    pub fn new(id: u64, frame: u32) -> Self {
        Self {
            id: SpotId(id),
            frame,
            features: BTreeMap::new(),
        }
    }

    /// Spot at `(x, y)` with the given radius, z left unset.
    pub fn at(id: u64, frame: u32, x: f64, y: f64, radius: f64) -> Self {
        Self::new(id, frame)
            .with_feature(POSITION_X, x)
            .with_feature(POSITION_Y, y)
            .with_feature(RADIUS, radius)
    }

    pub fn with_feature(mut self, name: impl Into<String>, value: f64) -> Self {
        self.features.insert(name.into(), value);
        self
    }

    pub fn set_feature(&mut self, name: impl Into<String>, value: f64) {
        self.features.insert(name.into(), value);
    }

    pub fn radius(&self) -> Result<f64> {
        self.require(RADIUS)
    }

    /// Position as `[x, y, z]`; a missing z is treated as a 2-D spot.
    pub fn position(&self) -> Result<[f64; 3]> {
        Ok([
            self.require(POSITION_X)?,
            self.require(POSITION_Y)?,
            self.feature(POSITION_Z).unwrap_or(0.0),
        ])
    }
}

impl FeatureSource for Spot {
    fn feature(&self, name: &str) -> Option<f64> {
        self.features.get(name).copied()
    }

    fn id(&self) -> SpotId {
        self.id
    }
}
