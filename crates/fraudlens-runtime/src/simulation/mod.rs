//! Policy simulation over labelled history
//!
//! Replays a candidate configuration against transactions whose model
//! confidence and true label are already known, so thresholds and weights
//! can be tuned offline before they are applied to the live engine.

mod dataset;
mod simulator;

pub use dataset::{SimulationDataset, SimulationRecord};
pub use simulator::{
    CaseKind, ConfusionMatrix, PolicySimulator, SimulatedDecision, SimulationReport,
};
