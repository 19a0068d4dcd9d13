//! Report and classifier options.

use std::path::PathBuf;

/// Default directory for report artifacts.
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

/// Where reports are written.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub artifacts_dir: PathBuf,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            artifacts_dir: PathBuf::from(DEFAULT_ARTIFACTS_DIR),
        }
    }
}

impl ReportOptions {
    pub fn new(artifacts_dir: impl Into<PathBuf>) -> Self {
        Self {
            artifacts_dir: artifacts_dir.into(),
        }
    }
}

/// Hyperparameters of the baseline classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierOptions {
    /// Share of each class held out for evaluation.
    pub test_fraction: f64,
    /// Seed for the stratified split.
    pub seed: u64,
    pub max_iter: usize,
    pub learning_rate: f64,
    /// L2 penalty strength, `1 / C`; the intercept is not penalized.
    pub l2: f64,
    /// Stop once the gradient norm falls below this value.
    pub tolerance: f64,
}

impl Default for ClassifierOptions {
    fn default() -> Self {
        Self {
            test_fraction: 0.25,
            seed: 42,
            max_iter: 1000,
            learning_rate: 0.1,
            l2: 1.0,
            tolerance: 1e-6,
        }
    }
}
