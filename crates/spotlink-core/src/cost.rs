use crate::error::Result;
use crate::spot::{FeatureSource, Spot, POSITION_X, POSITION_Y, POSITION_Z};

/// Cost capability supplied by the host for an ordered (source, target) pair.
///
/// Costs are squared-distance-like: the admissibility rule takes their
/// square root before comparing against radii.
pub trait LinkingCost<S: ?Sized = Spot> {
    fn linking_cost(&self, source: &S, target: &S) -> Result<f64>;
}

impl<S: ?Sized, F> LinkingCost<S> for F
where
    F: Fn(&S, &S) -> Result<f64>,
{
    fn linking_cost(&self, source: &S, target: &S) -> Result<f64> {
        self(source, target)
    }
}

/// Squared Euclidean distance between spot positions.
#[derive(Debug, Clone, Copy, Default)]
pub struct SquaredDistanceCost;

impl<S: FeatureSource + ?Sized> LinkingCost<S> for SquaredDistanceCost {
    fn linking_cost(&self, source: &S, target: &S) -> Result<f64> {
        let dx = target.require(POSITION_X)? - source.require(POSITION_X)?;
        let dy = target.require(POSITION_Y)? - source.require(POSITION_Y)?;
        let dz = target.feature(POSITION_Z).unwrap_or(0.0)
            - source.feature(POSITION_Z).unwrap_or(0.0);
        Ok(dx * dx + dy * dy + dz * dz)
    }
}
