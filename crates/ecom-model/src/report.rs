use serde::{Deserialize, Serialize};

/// Why a downstream report did not run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The binary target column is absent.
    MissingTarget,
    /// No numeric or boolean feature column survived exclusion.
    NoNumericFeatures,
    /// The training partition holds only one target class.
    SingleClass,
    /// The table has no numeric column to plot.
    NoNumericColumns,
}

impl SkipReason {
    pub fn message(self) -> &'static str {
        match self {
            SkipReason::MissingTarget => "missing target",
            SkipReason::NoNumericFeatures => "no numeric features",
            SkipReason::SingleClass => "single class in training partition",
            SkipReason::NoNumericColumns => "no numeric columns",
        }
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Metrics of a trained baseline classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainedModel {
    /// Held-out accuracy in `[0, 1]`.
    pub accuracy: f64,
    pub n_features: usize,
    pub feature_columns: Vec<String>,
    /// Rows with a usable target.
    pub rows: usize,
    pub train_rows: usize,
    pub test_rows: usize,
}

/// Result of a baseline classifier run.
///
/// A missing target is reported as `Skipped`, never as an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ModelOutcome {
    Trained(TrainedModel),
    Skipped { reason: SkipReason },
}

impl ModelOutcome {
    pub fn is_trained(&self) -> bool {
        matches!(self, ModelOutcome::Trained(_))
    }

    pub fn accuracy(&self) -> Option<f64> {
        match self {
            ModelOutcome::Trained(model) => Some(model.accuracy),
            ModelOutcome::Skipped { .. } => None,
        }
    }

    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            ModelOutcome::Trained(_) => None,
            ModelOutcome::Skipped { reason } => Some(*reason),
        }
    }
}
