//! Labelled simulation data

use crate::error::{Result, RuntimeError};
use fraudlens_core::features::TIME_STEP;
use fraudlens_core::FeatureMap;
use std::io::Read;
use std::path::Path;

/// Column holding the stored model confidence
pub const CONFIDENCE_COLUMN: &str = "Hybrid_Confidence";

/// Column holding the ground truth (`1` illicit, `0` licit)
pub const LABEL_COLUMN: &str = "True_Label";

/// One labelled transaction
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationRecord {
    pub features: FeatureMap,
    pub time_step: i64,
    /// Classifier probability recorded when the row was produced
    pub model_confidence: f64,
    /// Whether the transaction was actually fraudulent
    pub label: bool,
}

/// Rows loaded from a CSV file
#[derive(Debug, Clone, Default)]
pub struct SimulationDataset {
    records: Vec<SimulationRecord>,
}

impl SimulationDataset {
    pub fn new(records: Vec<SimulationRecord>) -> Self {
        Self { records }
    }

    /// Load a dataset from a CSV file with a header row
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let dataset = Self::from_reader(file)?;
        tracing::info!(
            path = %path.display(),
            rows = dataset.len(),
            "Loaded simulation dataset"
        );
        Ok(dataset)
    }

    /// Load a dataset from CSV text
    ///
    /// `time_step`, `Hybrid_Confidence` and `True_Label` are required. Every
    /// other column is read as a feature; empty cells are left out so the
    /// rule defaults apply.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers = csv_reader.headers()?.clone();

        let column = |name: &str| {
            headers.iter().position(|h| h == name).ok_or_else(|| {
                RuntimeError::SimulationData(format!("missing required column {}", name))
            })
        };
        let time_step_col = column(TIME_STEP)?;
        let confidence_col = column(CONFIDENCE_COLUMN)?;
        let label_col = column(LABEL_COLUMN)?;

        let mut records = Vec::new();
        for (row, result) in csv_reader.records().enumerate() {
            let record = result?;
            let line = row + 2;

            let cell = |index: usize| record.get(index).unwrap_or("");
            let number = |index: usize| -> Result<f64> {
                let raw = cell(index);
                raw.parse::<f64>().map_err(|_| {
                    RuntimeError::SimulationData(format!(
                        "line {}: {} is not a number: {:?}",
                        line, &headers[index], raw
                    ))
                })
            };

            let time_step = match number(time_step_col)? {
                v if v.fract() == 0.0 && v.abs() < i64::MAX as f64 => v as i64,
                other => {
                    return Err(RuntimeError::SimulationData(format!(
                        "line {}: time_step must be a whole number, got {}",
                        line, other
                    )))
                }
            };
            let model_confidence = number(confidence_col)?;
            let label = match number(label_col)? {
                v if v == 0.0 => false,
                v if v == 1.0 => true,
                other => {
                    return Err(RuntimeError::SimulationData(format!(
                        "line {}: label must be 0 or 1, got {}",
                        line, other
                    )))
                }
            };

            let mut features = FeatureMap::new();
            for (index, name) in headers.iter().enumerate() {
                if index == time_step_col || index == confidence_col || index == label_col {
                    continue;
                }
                if cell(index).is_empty() {
                    continue;
                }
                features.insert(name.to_string(), number(index)?);
            }

            records.push(SimulationRecord {
                features,
                time_step,
                model_confidence,
                label,
            });
        }

        Ok(Self { records })
    }

    pub fn records(&self) -> &[SimulationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
