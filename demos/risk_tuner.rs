//! Policy tuning example
//!
//! Replays labelled historical decisions under a few candidate policies and
//! prints precision, recall and F1 for each. The CSV needs `time_step`,
//! `Hybrid_Confidence` and `True_Label` columns; every other column is a
//! feature.
//!
//! ```text
//! cargo run --example risk_tuner -- hybrid_simulation_data.csv
//! ```
//!
//! A small inline sample is used when no path is given.

use fraudlens_core::{RuleId, ScoringConfig};
use fraudlens_runtime::{PolicySimulator, SimulationDataset};
use tracing_subscriber::EnvFilter;

const SAMPLE: &str = "\
time_step,feat_3,feat_4,feat_10,feat_15,feat_20,feat_100,Hybrid_Confidence,True_Label
2,80000,0,15,4,1,1.4,0.91,1
3,60000,0,4,1,1,0.9,0.35,1
12,9.5,0,11,,,0.2,0.62,1
40,1200,0.4,2,1,3,0.1,0.05,0
41,30,0.2,1,,,0.3,0.12,0
8,700,0,12,0,1,0.85,0.44,0
9,55000,0.1,3,5,2,0.2,0.20,1
50,25,0,0,,,0,0.08,0
";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let dataset = match std::env::args().nth(1) {
        Some(path) => SimulationDataset::from_path(path)?,
        None => SimulationDataset::from_reader(SAMPLE.as_bytes())?,
    };

    println!("=== Risk Tuner ({} records) ===\n", dataset.len());

    let candidates = vec![
        ("reference", ScoringConfig::default()),
        ("strict model", ScoringConfig::new().with_ml_threshold(0.3)),
        ("lenient rules", ScoringConfig::new().with_rule_threshold(55.0)),
        (
            "no early-step rule",
            ScoringConfig::new().with_rule_enabled(RuleId::R3, false),
        ),
    ];

    for (label, config) in &candidates {
        let report = PolicySimulator::new(config).run(dataset.records());

        println!("--- {} ---", label);
        println!(
            "ml_threshold={} rule_threshold={}",
            config.ml_threshold, config.rule_threshold
        );
        println!(
            "rejected {}/{}  precision {:.3}  recall {:.3}  f1 {:.3}",
            report.rejected, report.total, report.precision, report.recall, report.f1
        );
        println!(
            "TP {}  FP {}  TN {}  FN {}",
            report.matrix.tp, report.matrix.fp, report.matrix.tn, report.matrix.fn_
        );
        println!("{}\n", serde_json::to_string(&report.rule_fire_counts)?);
    }

    Ok(())
}
