mod candidates;
mod radius_gate;
mod report;

pub use candidates::{gate_candidates, CandidateSet, LinkCandidate};
pub use radius_gate::{admissibility_bound, check_link, is_link_admissible, LinkDecision, RadiusGate};
pub use report::GateReport;
