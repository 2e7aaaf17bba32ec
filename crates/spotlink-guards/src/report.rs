use crate::candidates::CandidateSet;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use spotlink_core::{LinkError, LinkingConfig, Result};

/// Summary of one gating pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateReport {
    pub date: String,
    pub config: LinkingConfig,
    pub max_distance: f64,
    pub evaluated: usize,
    pub admitted: usize,
    pub rejected: usize,
}

impl GateReport {
    pub fn new(config: &LinkingConfig, candidates: &CandidateSet) -> Self {
        Self {
            date: Utc::now().format("%Y-%m-%d").to_string(),
            config: *config,
            max_distance: config.max_distance(),
            evaluated: candidates.evaluated,
            admitted: candidates.admitted_count(),
            rejected: candidates.rejected,
        }
    }

    pub fn admitted_fraction(&self) -> f64 {
        if self.evaluated == 0 {
            return 0.0;
        }
        self.admitted as f64 / self.evaluated as f64
    }

    /// Folds another pass of the same run into this one, e.g. the next
    /// frame pair. Reports built under a different config are refused and
    /// leave `self` untouched. The earlier of the two dates is kept.
    pub fn merge(&mut self, other: &GateReport) -> Result<()> {
        if self.config != other.config {
            return Err(LinkError::ReportMismatch {
                ours: self.config.cost_threshold,
                theirs: other.config.cost_threshold,
            });
        }
        if other.date < self.date {
            self.date = other.date.clone();
        }
        self.evaluated += other.evaluated;
        self.admitted += other.admitted;
        self.rejected += other.rejected;
        Ok(())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
