mod metrics;

pub use metrics::{gate_and_observe, GateMetrics};
