use anyhow::{Context, Result};
use prometheus::{Histogram, HistogramOpts, IntCounterVec, Opts, Registry};
use spotlink_core::{FeatureSource, LinkingCost};
use spotlink_guards::{gate_candidates, CandidateSet, LinkDecision, RadiusGate};

pub struct GateMetrics {
    pub link_decisions_total: IntCounterVec,
    pub link_slack: Histogram,
}

impl GateMetrics {
    pub fn register(registry: &Registry) -> Result<Self> {
        let link_decisions_total = IntCounterVec::new(
            Opts::new(
                "spotlink_link_decisions_total",
                "Candidate links evaluated by the radius gate",
            ),
            &["decision"],
        )?;
        registry
            .register(Box::new(link_decisions_total.clone()))
            .context("registering spotlink_link_decisions_total")?;

        let link_slack = Histogram::with_opts(
            HistogramOpts::new(
                "spotlink_link_slack",
                "Distance left between admitted links and the gate bound",
            )
            .buckets(vec![0.0, 0.5, 1.0, 2.0, 5.0, 10.0, 20.0, 50.0]),
        )?;
        registry
            .register(Box::new(link_slack.clone()))
            .context("registering spotlink_link_slack")?;

        Ok(Self {
            link_decisions_total,
            link_slack,
        })
    }

    pub fn observe(&self, decision: &LinkDecision) {
        if decision.is_admitted() {
            self.link_decisions_total.with_label_values(&["admit"]).inc();
            self.link_slack.observe(decision.slack());
        } else {
            self.link_decisions_total.with_label_values(&["reject"]).inc();
        }
    }

    pub fn observe_candidates(&self, set: &CandidateSet) {
        self.link_decisions_total
            .with_label_values(&["admit"])
            .inc_by(set.admitted_count() as u64);
        self.link_decisions_total
            .with_label_values(&["reject"])
            .inc_by(set.rejected as u64);
        for candidate in &set.admitted {
            self.link_slack.observe(candidate.slack());
        }
    }

    pub fn admitted(&self) -> u64 {
        self.link_decisions_total.with_label_values(&["admit"]).get()
    }

    pub fn rejected(&self) -> u64 {
        self.link_decisions_total.with_label_values(&["reject"]).get()
    }
}

/// Gates one frame pair and records the outcome.
pub fn gate_and_observe<S, C>(
    metrics: &GateMetrics,
    gate: &RadiusGate,
    sources: &[S],
    targets: &[S],
    cost_fn: &C,
) -> Result<CandidateSet>
where
    S: FeatureSource,
    C: LinkingCost<S> + ?Sized,
{
    let set = gate_candidates(gate, sources, targets, cost_fn).context("gating frame pair")?;
    metrics.observe_candidates(&set);
    Ok(set)
}
