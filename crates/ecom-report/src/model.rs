//! Baseline classifier predicting `Discount_Used` from numeric columns.
//!
//! Logistic regression with an L2 penalty, trained by batch gradient descent on
//! standardized features. The split is stratified and seeded, so a given table
//! always produces the same accuracy.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use ecom_common::column_f64_values;
use ecom_model::columns::{DISCOUNT_USED, MODEL_EXCLUDED_COLUMNS};
use ecom_model::{ModelOutcome, SkipReason, TrainedModel};
use polars::prelude::DataFrame;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{debug, info, info_span, warn};

use crate::common::{lines_to_text, median, numeric_columns, write_text_artifact};
use crate::options::{ClassifierOptions, ReportOptions};

pub const MODEL_REPORT_FILE: &str = "model_report.txt";
pub const MODEL_RESULT_FILE: &str = "model_result.json";

/// Dense feature matrix with its binary target.
#[derive(Debug, Clone)]
struct Dataset {
    feature_columns: Vec<String>,
    rows: Vec<Vec<f64>>,
    target: Vec<u8>,
}

/// Fitted weights over standardized features.
#[derive(Debug, Clone)]
pub struct LogisticModel {
    means: Vec<f64>,
    scales: Vec<f64>,
    weights: Vec<f64>,
    intercept: f64,
}

impl LogisticModel {
    /// Fits on raw rows; standardization is learned from these rows.
    pub fn fit(rows: &[Vec<f64>], target: &[u8], options: &ClassifierOptions) -> Self {
        let n_features = rows.first().map_or(0, Vec::len);
        let (means, scales) = standardization(rows, n_features);
        let x: Vec<Vec<f64>> = rows.iter().map(|row| scale_row(row, &means, &scales)).collect();
        let n = x.len().max(1) as f64;

        let mut weights = vec![0.0; n_features];
        let mut intercept = 0.0;
        for iteration in 0..options.max_iter {
            let mut grad_w = vec![0.0; n_features];
            let mut grad_b = 0.0;
            for (row, &label) in x.iter().zip(target) {
                let err = sigmoid(dot(&weights, row) + intercept) - f64::from(label);
                for (g, value) in grad_w.iter_mut().zip(row) {
                    *g += err * value;
                }
                grad_b += err;
            }
            for (g, w) in grad_w.iter_mut().zip(&weights) {
                *g = (*g + options.l2 * w) / n;
            }
            grad_b /= n;

            let norm = (grad_w.iter().map(|g| g * g).sum::<f64>() + grad_b * grad_b).sqrt();
            if norm < options.tolerance {
                debug!(iteration, "gradient descent converged");
                break;
            }
            for (w, g) in weights.iter_mut().zip(&grad_w) {
                *w -= options.learning_rate * g;
            }
            intercept -= options.learning_rate * grad_b;
        }

        Self {
            means,
            scales,
            weights,
            intercept,
        }
    }

    fn predict_proba(&self, row: &[f64]) -> f64 {
        let x = scale_row(row, &self.means, &self.scales);
        sigmoid(dot(&self.weights, &x) + self.intercept)
    }

    pub fn predict(&self, row: &[f64]) -> u8 {
        u8::from(self.predict_proba(row) >= 0.5)
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Per-feature mean and population standard deviation; zero spread scales by 1.
fn standardization(rows: &[Vec<f64>], n_features: usize) -> (Vec<f64>, Vec<f64>) {
    let n = rows.len().max(1) as f64;
    let means: Vec<f64> = (0..n_features)
        .map(|j| rows.iter().map(|row| row[j]).sum::<f64>() / n)
        .collect();
    let scales = (0..n_features)
        .map(|j| {
            let var = rows.iter().map(|row| (row[j] - means[j]).powi(2)).sum::<f64>() / n;
            let std = var.sqrt();
            if std > 0.0 { std } else { 1.0 }
        })
        .collect();
    (means, scales)
}

fn scale_row(row: &[f64], means: &[f64], scales: &[f64]) -> Vec<f64> {
    row.iter()
        .zip(means.iter().zip(scales))
        .map(|(value, (mean, scale))| (value - mean) / scale)
        .collect()
}

/// Numeric and boolean columns usable as features, in frame order.
pub fn feature_columns(df: &DataFrame) -> Vec<String> {
    numeric_columns(df)
        .into_iter()
        .filter(|name| !MODEL_EXCLUDED_COLUMNS.contains(&name.as_str()))
        .collect()
}

/// Builds the dataset: drops rows without a target and all-missing columns,
/// then fills remaining gaps with the column median.
fn build_dataset(df: &DataFrame, candidates: &[String]) -> Result<Dataset> {
    let target_values = column_f64_values(df.column(DISCOUNT_USED)?);
    let keep: Vec<usize> = target_values
        .iter()
        .enumerate()
        .filter_map(|(idx, value)| value.map(|_| idx))
        .collect();
    let target: Vec<u8> = keep
        .iter()
        .filter_map(|&idx| target_values[idx])
        .map(|value| u8::from(value != 0.0))
        .collect();

    let mut feature_columns = Vec::new();
    let mut columns: Vec<Vec<f64>> = Vec::new();
    for name in candidates {
        let values = column_f64_values(df.column(name)?);
        let kept: Vec<Option<f64>> = keep.iter().map(|&idx| values[idx]).collect();
        let present: Vec<f64> = kept.iter().flatten().copied().collect();
        let Some(fill) = median(&present) else {
            debug!(column = %name, "dropping feature without values");
            continue;
        };
        columns.push(kept.into_iter().map(|v| v.unwrap_or(fill)).collect());
        feature_columns.push(name.clone());
    }

    let rows = (0..keep.len())
        .map(|i| columns.iter().map(|column| column[i]).collect())
        .collect();
    Ok(Dataset {
        feature_columns,
        rows,
        target,
    })
}

/// Spreads `ceil(total * test_fraction)` held-out rows across classes.
///
/// Each class gets the floor of its proportional share; leftover rows go to
/// the classes with the largest fractional remainder (lower label first on
/// ties). A class never gives up its last row.
fn held_out_per_class(counts: &[usize], test_fraction: f64) -> Vec<usize> {
    let total: usize = counts.iter().sum();
    if total == 0 {
        return vec![0; counts.len()];
    }
    let n_test = ((total as f64 * test_fraction).ceil() as usize).min(total);
    let caps: Vec<usize> = counts.iter().map(|&c| c.saturating_sub(1)).collect();

    let shares: Vec<f64> = counts
        .iter()
        .map(|&c| c as f64 * n_test as f64 / total as f64)
        .collect();
    let mut held: Vec<usize> = shares
        .iter()
        .zip(&caps)
        .map(|(share, &cap)| (share.floor() as usize).min(cap))
        .collect();

    let mut order: Vec<usize> = (0..counts.len()).collect();
    order.sort_by(|&a, &b| {
        let frac_a = shares[a] - shares[a].floor();
        let frac_b = shares[b] - shares[b].floor();
        frac_b.total_cmp(&frac_a).then(a.cmp(&b))
    });
    let mut remaining = n_test.saturating_sub(held.iter().sum());
    while remaining > 0 {
        let mut placed = false;
        for &class in &order {
            if remaining > 0 && held[class] < caps[class] {
                held[class] += 1;
                remaining -= 1;
                placed = true;
            }
        }
        if !placed {
            break;
        }
    }
    held
}

/// Seeded stratified split; returns `(train, test)` row indices.
///
/// The held-out size is `ceil(rows * test_fraction)` over the whole table,
/// spread across classes in proportion to their counts. Every class keeps at
/// least one row for training.
pub fn stratified_split(
    target: &[u8],
    test_fraction: f64,
    seed: u64,
) -> (Vec<usize>, Vec<usize>) {
    let mut by_class: BTreeMap<u8, Vec<usize>> = BTreeMap::new();
    for (idx, &label) in target.iter().enumerate() {
        by_class.entry(label).or_default().push(idx);
    }
    let counts: Vec<usize> = by_class.values().map(Vec::len).collect();
    let held_out = held_out_per_class(&counts, test_fraction);

    let mut rng = StdRng::seed_from_u64(seed);
    let mut train = Vec::new();
    let mut test = Vec::new();
    for (indices, &n_held) in by_class.values_mut().zip(&held_out) {
        indices.shuffle(&mut rng);
        test.extend_from_slice(&indices[..n_held]);
        train.extend_from_slice(&indices[n_held..]);
    }
    train.sort_unstable();
    test.sort_unstable();
    (train, test)
}

/// Trains the baseline classifier on a cleaned table. Writes nothing.
///
/// A missing target, no usable feature, or a single-class training partition
/// yields [`ModelOutcome::Skipped`]; only frame access errors fail.
pub fn train_on_df(df: &DataFrame, options: &ClassifierOptions) -> Result<ModelOutcome> {
    if df.column(DISCOUNT_USED).is_err() {
        return Ok(skipped(SkipReason::MissingTarget));
    }
    let candidates = feature_columns(df);
    if candidates.is_empty() {
        return Ok(skipped(SkipReason::NoNumericFeatures));
    }

    let data = build_dataset(df, &candidates)?;
    if data.feature_columns.is_empty() {
        return Ok(skipped(SkipReason::NoNumericFeatures));
    }

    let (train, test) = stratified_split(&data.target, options.test_fraction, options.seed);
    let train_rows: Vec<Vec<f64>> = train.iter().map(|&i| data.rows[i].clone()).collect();
    let train_target: Vec<u8> = train.iter().map(|&i| data.target[i]).collect();
    if !(train_target.contains(&0) && train_target.contains(&1)) {
        return Ok(skipped(SkipReason::SingleClass));
    }

    let model = LogisticModel::fit(&train_rows, &train_target, options);

    let eval = if test.is_empty() {
        warn!("held-out partition is empty; scoring on the training partition");
        &train
    } else {
        &test
    };
    let correct = eval
        .iter()
        .filter(|&&i| model.predict(&data.rows[i]) == data.target[i])
        .count();
    let accuracy = correct as f64 / eval.len() as f64;

    Ok(ModelOutcome::Trained(TrainedModel {
        accuracy,
        n_features: data.feature_columns.len(),
        feature_columns: data.feature_columns,
        rows: data.target.len(),
        train_rows: train.len(),
        test_rows: test.len(),
    }))
}

fn skipped(reason: SkipReason) -> ModelOutcome {
    warn!(%reason, "model skipped");
    ModelOutcome::Skipped { reason }
}

/// Human-readable report for `model_report.txt`.
pub fn model_report_text(outcome: &ModelOutcome, options: &ClassifierOptions) -> String {
    let lines = match outcome {
        ModelOutcome::Trained(model) => vec![
            "Baseline model: logistic regression (numeric features)".to_string(),
            format!("Rows: {}  |  Features used: {}", model.rows, model.n_features),
            format!("Target: {DISCOUNT_USED} (binary)"),
            format!(
                "Train/Test: {}/{} (stratified, {:.0}% held out, seed {})",
                model.train_rows,
                model.test_rows,
                options.test_fraction * 100.0,
                options.seed
            ),
            format!("Accuracy: {:.3}", model.accuracy),
            format!("Feature columns: {}", model.feature_columns.join(", ")),
        ],
        ModelOutcome::Skipped { reason } => vec![format!("Model skipped: {reason}")],
    };
    lines_to_text(&lines)
}

/// Writes `model_report.txt` and `model_result.json`.
pub fn write_model_artifacts(
    outcome: &ModelOutcome,
    options: &ClassifierOptions,
    artifacts_dir: &Path,
) -> Result<Vec<PathBuf>> {
    let report = write_text_artifact(
        artifacts_dir,
        MODEL_REPORT_FILE,
        &model_report_text(outcome, options),
    )?;
    let json = serde_json::to_string_pretty(outcome).context("serialize model outcome")?;
    let result = write_text_artifact(artifacts_dir, MODEL_RESULT_FILE, &json)?;
    Ok(vec![report, result])
}

/// Loads and cleans `path`, trains the classifier and writes its artifacts.
pub fn run_baseline(
    path: &Path,
    report: &ReportOptions,
    options: &ClassifierOptions,
) -> Result<ModelOutcome> {
    let span = info_span!("model", path = %path.display());
    let _guard = span.enter();
    let start = Instant::now();

    let df = ecom_transform::load_and_clean(path, false)?;
    let outcome = train_on_df(&df, options)?;
    write_model_artifacts(&outcome, options, &report.artifacts_dir)?;

    info!(
        trained = outcome.is_trained(),
        accuracy = outcome.accuracy(),
        duration_ms = start.elapsed().as_millis(),
        "model complete"
    );
    Ok(outcome)
}
