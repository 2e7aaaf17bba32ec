use serde::{Deserialize, Serialize};
use spotlink_core::{FeatureSource, LinkError, LinkingConfig, LinkingCost, Magnitude, Result};

/// Upper bound on the linear distance between two spots: both radii plus
/// the base maximum distance.
pub fn admissibility_bound(source_radius: f64, target_radius: f64, cost_threshold: f64) -> f64 {
    source_radius + target_radius + cost_threshold.sqrt()
}

/// Decides whether a candidate link may be kept.
///
/// `cost` and `cost_threshold` are squared-distance-like. A pair is
/// rejected only when `sqrt(cost)` strictly exceeds the bound, so equality
/// admits. Negative magnitudes are the caller's problem here: the square
/// root turns them into NaN, which never compares greater and therefore
/// admits. Use [`check_link`] to fail fast instead.
pub fn is_link_admissible(
    cost: f64,
    source_radius: f64,
    target_radius: f64,
    cost_threshold: f64,
) -> bool {
    !(cost.sqrt() > admissibility_bound(source_radius, target_radius, cost_threshold))
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum LinkDecision {
    Admit { distance: f64, bound: f64 },
    Reject { distance: f64, bound: f64 },
}

impl LinkDecision {
    fn from_parts(distance: f64, bound: f64) -> Self {
        if distance > bound {
            LinkDecision::Reject { distance, bound }
        } else {
            LinkDecision::Admit { distance, bound }
        }
    }

    pub fn is_admitted(&self) -> bool {
        matches!(self, LinkDecision::Admit { .. })
    }

    /// Linear distance, `sqrt(cost)`.
    pub fn distance(&self) -> f64 {
        match *self {
            LinkDecision::Admit { distance, .. } | LinkDecision::Reject { distance, .. } => distance,
        }
    }

    pub fn bound(&self) -> f64 {
        match *self {
            LinkDecision::Admit { bound, .. } | LinkDecision::Reject { bound, .. } => bound,
        }
    }

    /// How far inside the bound the pair sits; negative when rejected.
    pub fn slack(&self) -> f64 {
        self.bound() - self.distance()
    }
}

fn ensure_magnitude(quantity: Magnitude, value: f64) -> Result<()> {
    if value.is_nan() || value < 0.0 {
        return Err(LinkError::InvalidMagnitude { quantity, value });
    }
    Ok(())
}

/// Same rule as [`is_link_admissible`], but negative or NaN magnitudes are
/// an error rather than a silent admit.
pub fn check_link(
    cost: f64,
    source_radius: f64,
    target_radius: f64,
    cost_threshold: f64,
) -> Result<LinkDecision> {
    ensure_magnitude(Magnitude::Cost, cost)?;
    ensure_magnitude(Magnitude::CostThreshold, cost_threshold)?;
    Ok(LinkDecision::from_parts(
        cost.sqrt(),
        admissibility_bound(source_radius, target_radius, cost_threshold),
    ))
}

/// The radius-aware linking rule bound to one run's configuration.
#[derive(Debug, Clone, Copy)]
pub struct RadiusGate {
    config: LinkingConfig,
}

impl RadiusGate {
    pub fn new(config: LinkingConfig) -> Result<Self> {
        if config.validate_magnitudes {
            config.validate()?;
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &LinkingConfig {
        &self.config
    }

    pub fn cost_threshold(&self) -> f64 {
        self.config.cost_threshold
    }

    /// Decision for precomputed inputs.
    pub fn decide(&self, cost: f64, source_radius: f64, target_radius: f64) -> Result<LinkDecision> {
        if self.config.validate_magnitudes {
            check_link(cost, source_radius, target_radius, self.config.cost_threshold)
        } else {
            Ok(LinkDecision::from_parts(
                cost.sqrt(),
                admissibility_bound(source_radius, target_radius, self.config.cost_threshold),
            ))
        }
    }

    /// Computes the pair's cost with the host capability, reads both radii
    /// and applies the rule.
    pub fn evaluate<S, C>(&self, source: &S, target: &S, cost_fn: &C) -> Result<LinkDecision>
    where
        S: FeatureSource + ?Sized,
        C: LinkingCost<S> + ?Sized,
    {
        self.evaluate_pair(source, target, cost_fn)
            .map(|(_, decision)| decision)
    }

    /// As [`evaluate`](Self::evaluate), also returning the raw cost.
    pub fn evaluate_pair<S, C>(&self, source: &S, target: &S, cost_fn: &C) -> Result<(f64, LinkDecision)>
    where
        S: FeatureSource + ?Sized,
        C: LinkingCost<S> + ?Sized,
    {
        let cost = cost_fn.linking_cost(source, target)?;
        let source_radius = source.require(spotlink_core::RADIUS)?;
        let target_radius = target.require(spotlink_core::RADIUS)?;
        Ok((cost, self.decide(cost, source_radius, target_radius)?))
    }
}
