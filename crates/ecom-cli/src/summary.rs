//! Terminal summaries for each subcommand.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use ecom_common::any_to_string;
use ecom_model::ModelOutcome;
use ecom_model::columns::{PURCHASE_AMOUNT, TIME_OF_PURCHASE};
use ecom_report::{EdaReport, HistogramOutcome, render_bars};
use ecom_transform::{CleanOutput, CleanSummary};
use polars::prelude::{AnyValue, DataFrame};

/// Rows shown in the cleaned table preview.
pub const PREVIEW_ROWS: usize = 5;

/// Width of the longest histogram bar.
const BAR_WIDTH: usize = 40;

pub fn print_clean_summary(output: &CleanOutput) {
    println!("{}", clean_summary_table(&output.summary));
    println!();
    println!("Preview:");
    println!("{}", preview_table(&output.frame, PREVIEW_ROWS));
}

pub fn clean_summary_table(summary: &CleanSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Item"), header_cell("Value")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);

    table.add_row(vec![Cell::new("Rows"), Cell::new(summary.rows)]);
    table.add_row(vec![
        Cell::new(PURCHASE_AMOUNT),
        detected_cell(summary.detected.amount),
    ]);
    table.add_row(vec![
        Cell::new(TIME_OF_PURCHASE),
        detected_cell(summary.detected.purchase_time),
    ]);
    table.add_row(vec![
        Cell::new("Missing amounts"),
        count_cell(summary.missing_amounts, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Missing dates"),
        count_cell(summary.missing_dates, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Checkpoint"),
        match &summary.checkpoint {
            Some(path) => Cell::new(path.display()).fg(Color::Green),
            None => dim_cell("-"),
        },
    ]);
    table
}

/// First `rows` rows of a frame, every cell rendered as text.
pub fn preview_table(df: &DataFrame, rows: usize) -> Table {
    let mut table = Table::new();
    table.set_header(
        df.get_column_names()
            .iter()
            .map(|name| header_cell(name.as_str()))
            .collect::<Vec<_>>(),
    );
    apply_table_style(&mut table);
    let head = df.head(Some(rows));
    for idx in 0..head.height() {
        let cells: Vec<Cell> = head
            .get_columns()
            .iter()
            .map(|column| match column.get(idx) {
                Ok(AnyValue::Null) | Err(_) => dim_cell("-"),
                Ok(value) => Cell::new(any_to_string(value)),
            })
            .collect();
        table.add_row(cells);
    }
    table
}

pub fn print_eda_summary(report: &EdaReport) {
    println!("{}", eda_summary_table(report));
    for path in &report.artifacts {
        println!("Wrote {}", path.display());
    }
}

pub fn eda_summary_table(report: &EdaReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Item"), header_cell("Value")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);

    table.add_row(vec![Cell::new("Rows"), Cell::new(report.rows)]);
    table.add_row(vec![Cell::new("Columns"), Cell::new(report.columns)]);
    table.add_row(vec![
        Cell::new("Duplicate rows"),
        count_cell(Some(report.duplicates), Color::Yellow),
    ]);
    match &report.filter {
        Some(stats) => {
            table.add_row(vec![
                Cell::new(format!("{} threshold", stats.percentile)),
                match stats.threshold {
                    Some(value) => Cell::new(format!("{value:.2}")),
                    None => dim_cell("-"),
                },
            ]);
            table.add_row(vec![
                Cell::new("Rows kept"),
                Cell::new(format!(
                    "{} / {} ({:.1}%)",
                    stats.rows_kept,
                    stats.rows_total,
                    stats.kept_share * 100.0
                )),
            ]);
        }
        None => {
            table.add_row(vec![Cell::new("High-value filter"), dim_cell("-")]);
        }
    }
    table.add_row(vec![
        Cell::new("Artifacts"),
        Cell::new(report.artifacts.len()),
    ]);
    table
}

pub fn print_histogram(outcome: &HistogramOutcome) {
    match outcome {
        HistogramOutcome::Written { histogram, path } => {
            print!("{}", render_bars(histogram, BAR_WIDTH));
            println!("Wrote {}", path.display());
        }
        HistogramOutcome::Skipped { reason } => {
            println!("Histogram skipped: {reason}");
        }
    }
}

pub fn model_summary_line(outcome: &ModelOutcome) -> String {
    match outcome {
        ModelOutcome::Trained(model) => format!(
            "Model OK: accuracy {:.3}, features {}",
            model.accuracy, model.n_features
        ),
        ModelOutcome::Skipped { reason } => format!("Model skipped: {reason}"),
    }
}

pub fn print_model_summary(outcome: &ModelOutcome) {
    println!("{}", model_summary_line(outcome));
}

fn detected_cell(present: bool) -> Cell {
    if present {
        Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else {
        dim_cell("-")
    }
}

fn count_cell(count: Option<usize>, color: Color) -> Cell {
    match count {
        Some(value) if value > 0 => Cell::new(value).fg(color).add_attribute(Attribute::Bold),
        Some(value) => dim_cell(value),
        None => dim_cell("-"),
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(160);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
