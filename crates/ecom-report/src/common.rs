//! Shared statistics and artifact helpers.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ecom_common::is_numeric_dtype;
use ecom_ingest::ensure_dir;
use polars::prelude::DataFrame;

/// Names of the numeric and boolean columns, in frame order.
pub fn numeric_columns(df: &DataFrame) -> Vec<String> {
    df.get_columns()
        .iter()
        .filter(|column| is_numeric_dtype(column.dtype()))
        .map(|column| column.name().to_string())
        .collect()
}

/// Rounds to a fixed number of decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1 denominator).
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some((ss / (values.len() - 1) as f64).sqrt())
}

/// Quantile with linear interpolation between closest ranks.
///
/// `sorted` must be ascending and free of NaN.
pub fn quantile_linear(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * frac)
}

/// Quantile taking the value at the nearest rank; ties round half to even.
///
/// `sorted` must be ascending and free of NaN.
pub fn quantile_nearest(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let idx = pos.round_ties_even() as usize;
    sorted.get(idx.min(sorted.len() - 1)).copied()
}

pub fn median(values: &[f64]) -> Option<f64> {
    quantile_linear(&sorted(values), 0.5)
}

/// Ascending copy with NaN removed.
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut out: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    out.sort_by(f64::total_cmp);
    out
}

/// Joins report lines, each terminated by a newline.
pub fn lines_to_text(lines: &[String]) -> String {
    lines.iter().map(|line| format!("{line}\n")).collect()
}

/// Writes a text artifact, creating the directory on first use.
pub fn write_text_artifact(dir: &Path, name: &str, contents: &str) -> Result<PathBuf> {
    ensure_dir(dir).with_context(|| format!("create {}", dir.display()))?;
    let path = dir.join(name);
    std::fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
    Ok(path)
}

/// Writes a tabular artifact as CSV.
pub fn write_csv_artifact(dir: &Path, name: &str, df: &mut DataFrame) -> Result<PathBuf> {
    let path = dir.join(name);
    ecom_ingest::write_csv_table(df, &path).with_context(|| format!("write {name}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantile_linear() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile_linear(&values, 0.0), Some(1.0));
        assert_eq!(quantile_linear(&values, 0.5), Some(2.5));
        assert_eq!(quantile_linear(&values, 0.25), Some(1.75));
        assert_eq!(quantile_linear(&values, 1.0), Some(4.0));
        assert_eq!(quantile_linear(&[], 0.5), None);
    }

    #[test]
    fn test_quantile_nearest() {
        let values: Vec<f64> = (1..=10).map(|v| f64::from(v) * 10.0).collect();
        assert_eq!(quantile_nearest(&values, 0.9), Some(90.0));
        assert_eq!(quantile_nearest(&values, 0.1), Some(20.0));
        // rank 0.5 rounds to even
        assert_eq!(quantile_nearest(&[1.0, 2.0], 0.5), Some(1.0));
    }

    #[test]
    fn test_mean_and_std() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(mean(&values), Some(5.0));
        let std = sample_std(&values).unwrap();
        assert!((std - 2.138_089_935).abs() < 1e-6);
        assert_eq!(sample_std(&[1.0]), None);
    }

    #[test]
    fn test_median_ignores_nan() {
        assert_eq!(median(&[3.0, f64::NAN, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(3.14159, 2), 3.14);
        assert_eq!(round_to(0.66666, 4), 0.6667);
    }

    #[test]
    fn test_lines_to_text() {
        let lines = vec!["a".to_string(), String::new(), "b".to_string()];
        assert_eq!(lines_to_text(&lines), "a\n\nb\n");
        assert_eq!(lines_to_text(&[]), "");
    }

    #[test]
    fn test_write_text_artifact_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let artifacts = dir.path().join("nested").join("artifacts");

        let path = write_text_artifact(&artifacts, "note.txt", "hello\n").unwrap();

        assert_eq!(path, artifacts.join("note.txt"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "hello\n");
    }
}
