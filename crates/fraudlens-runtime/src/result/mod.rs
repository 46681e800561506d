//! Decision records and where they go

mod persistence;
mod sink;

pub use persistence::DecisionRecord;
#[cfg(feature = "sqlx")]
pub use persistence::{connect, ensure_schema, DecisionResultWriter};
pub use sink::{InMemoryResultSink, ResultSink};
