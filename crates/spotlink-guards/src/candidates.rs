use crate::radius_gate::{LinkDecision, RadiusGate};
use serde::{Deserialize, Serialize};
use spotlink_core::{FeatureSource, LinkingCost, Result, SpotId};
use tracing::{debug, info};

/// A (source, target) pair that passed the radius gate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinkCandidate {
    pub source: SpotId,
    pub target: SpotId,
    pub cost: f64,
    pub bound: f64,
}

impl LinkCandidate {
    pub fn slack(&self) -> f64 {
        self.bound - self.cost.sqrt()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateSet {
    /// Sorted by cost, then source id, then target id.
    pub admitted: Vec<LinkCandidate>,
    pub evaluated: usize,
    pub rejected: usize,
}

impl CandidateSet {
    pub fn admitted_count(&self) -> usize {
        self.admitted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.admitted.is_empty()
    }

    /// Admitted targets for one source, cheapest first.
    pub fn for_source(&self, source: SpotId) -> impl Iterator<Item = &LinkCandidate> {
        self.admitted.iter().filter(move |c| c.source == source)
    }
}

/// Applies the gate to every ordered pair between two frames.
///
/// Rejected pairs are skipped without recording a link. Choosing among the
/// admitted candidates is left to the caller's assignment step.
pub fn gate_candidates<S, C>(
    gate: &RadiusGate,
    sources: &[S],
    targets: &[S],
    cost_fn: &C,
) -> Result<CandidateSet>
where
    S: FeatureSource,
    C: LinkingCost<S> + ?Sized,
{
    let mut set = CandidateSet::default();

    for source in sources {
        for target in targets {
            set.evaluated += 1;
            let (cost, decision) = gate.evaluate_pair(source, target, cost_fn)?;
            match decision {
                LinkDecision::Admit { bound, .. } => set.admitted.push(LinkCandidate {
                    source: source.id(),
                    target: target.id(),
                    cost,
                    bound,
                }),
                LinkDecision::Reject { distance, bound } => {
                    debug!(
                        source = %source.id(),
                        target = %target.id(),
                        distance,
                        bound,
                        "link rejected"
                    );
                    set.rejected += 1;
                }
            }
        }
    }

    set.admitted.sort_by(|a, b| {
        a.cost
            .total_cmp(&b.cost)
            .then(a.source.cmp(&b.source))
            .then(a.target.cmp(&b.target))
    });

    info!(
        evaluated = set.evaluated,
        admitted = set.admitted.len(),
        rejected = set.rejected,
        "gated frame pair"
    );
    Ok(set)
}
