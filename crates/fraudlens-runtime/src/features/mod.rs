//! Feature reconciliation

mod reconciler;

pub use reconciler::{AlignedFeatureVector, FeatureReconciler, MISSING_FEATURE_VALUE};
