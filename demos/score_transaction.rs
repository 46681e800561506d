//! Transaction scoring example
//!
//! Scores a few hand-built transactions and prints each decision with its
//! rule breakdown. Pass a model file to score with the classifier:
//!
//! ```text
//! cargo run --example score_transaction -- elliptic_xgb_hybrid_model.json
//! ```
//!
//! Without one the engine runs in rules-only mode.

use fraudlens_core::TransactionInput;
use fraudlens_runtime::RuleEvaluator;
use fraudlens_sdk::ScoringEngineBuilder;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    println!("=== Transaction Scoring Example ===\n");

    let mut builder = ScoringEngineBuilder::new();
    if let Some(model_path) = std::env::args().nth(1) {
        builder = builder.with_model_path(model_path);
    }
    let engine = builder.build().await?;

    println!(
        "Engine ready (model: {}, loaded: {})\n",
        engine.classifier().name(),
        engine.model_loaded()
    );

    let transactions = vec![
        (
            "Ordinary transfer",
            TransactionInput::new(101, "tx_ordinary", 30)
                .with_feature("feat_3", 1_200.0)
                .with_feature("feat_4", 0.4)
                .with_feature("feat_10", 2.0)
                .with_feature("feat_20", 3.0)
                .with_feature("feat_100", 0.1),
        ),
        (
            "Whale with no fee",
            TransactionInput::new(102, "tx_whale", 2)
                .with_feature("feat_3", 80_000.0)
                .with_feature("feat_4", 0.0)
                .with_feature("feat_10", 15.0)
                .with_feature("feat_15", 4.0)
                .with_feature("feat_20", 1.0)
                .with_feature("feat_100", 1.4),
        ),
        (
            "Dust structuring",
            TransactionInput::new(103, "tx_dust", 12)
                .with_feature("feat_3", 9.5)
                .with_feature("feat_4", 0.0)
                .with_feature("feat_10", 11.0),
        ),
    ];

    for (label, tx) in &transactions {
        println!("--- {} ---", label);

        let response = engine.process(tx);
        println!("{}", serde_json::to_string_pretty(&response)?);

        let config = engine.config_snapshot();
        let evaluation = RuleEvaluator::new(&config).evaluate(&tx.features, tx.time_step);
        for item in evaluation.contributions(&config.weights) {
            println!(
                "  {} {:<22} fired={:<5} +{}",
                item.rule,
                item.rule.name(),
                item.fired,
                item.contribution
            );
        }
        println!();
    }

    let metrics = engine.metrics();
    println!("=== Metrics ===");
    println!("{}", serde_json::to_string_pretty(&metrics)?);

    Ok(())
}
