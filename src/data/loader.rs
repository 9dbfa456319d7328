use std::path::Path;

use anyhow::{bail, Context, Result};

use super::analysis::{AnalysisResult, Insights};
use super::model::{parse_number, CellValue, Dataset, Row};
use super::stats;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load an analysis result from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.json` – a full analysis-service response (insights + preview rows)
/// * `.csv`  – a cleaned export; insights are derived locally
pub fn load_file(path: &Path) -> Result<AnalysisResult> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "json" => load_json(path),
        "csv" => load_csv(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

fn load_json(path: &Path) -> Result<AnalysisResult> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

pub fn parse_json(text: &str) -> Result<AnalysisResult> {
    let result: AnalysisResult =
        serde_json::from_str(text).context("parsing analysis result JSON")?;
    if result.cleaned_rows.is_empty() && result.original_rows.is_empty() {
        log::warn!("analysis result '{}' carries no preview rows", result.request_id);
    }
    Ok(result)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// A cleaned CSV export: header row with column names, one record per row.
fn load_csv(path: &Path) -> Result<AnalysisResult> {
    let reader = csv::Reader::from_path(path).context("opening CSV")?;
    let dataset = read_csv(reader)?;
    let request_id = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("local")
        .to_string();
    Ok(result_from_dataset(request_id, dataset))
}

pub fn read_csv<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Dataset> {
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let row: Row = headers
            .iter()
            .zip(record.iter())
            .map(|(col, value)| (col.clone(), guess_cell_type(value)))
            .collect();
        rows.push(row);
    }

    Ok(Dataset::with_columns(headers, rows))
}

fn guess_cell_type(s: &str) -> CellValue {
    let s = s.trim();
    if s.is_empty() {
        return CellValue::Null;
    }
    if let Some(f) = parse_number(s) {
        return CellValue::Number(f);
    }
    if s == "true" || s == "false" {
        return CellValue::Bool(s == "true");
    }
    CellValue::String(s.to_string())
}

/// Wrap a bare dataset into an analysis result with locally derived insights.
pub fn result_from_dataset(request_id: String, dataset: Dataset) -> AnalysisResult {
    let column_stats = stats::profile_columns(&dataset);
    let numeric_columns: Vec<String> = column_stats
        .iter()
        .filter(|s| s.kind == super::model::ColumnKind::Numeric)
        .map(|s| s.name.clone())
        .collect();
    let correlations = stats::correlate(&dataset, &numeric_columns);
    let quality = stats::completeness_score(&dataset);

    let insights = Insights {
        rows_original: dataset.len(),
        rows_cleaned: dataset.len(),
        quality_score: quality as f64,
        summary: format!(
            "Loaded {} rows across {} columns. {}% of cells are filled.",
            dataset.len(),
            dataset.columns.len(),
            quality
        ),
        logs: vec![
            format!("Profiled {} columns locally", column_stats.len()),
            format!("Correlated {} numeric columns", numeric_columns.len()),
        ],
        numeric_columns,
        column_stats,
        correlations,
        ..Default::default()
    };

    AnalysisResult {
        request_id,
        insights,
        cleaned_rows: dataset.to_json_records(),
        original_rows: Vec::new(),
    }
}
