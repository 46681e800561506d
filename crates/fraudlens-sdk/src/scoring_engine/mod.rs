//! Scoring engine

mod engine;
mod types;

pub use engine::ScoringEngine;
pub use types::ScoringResponse;
