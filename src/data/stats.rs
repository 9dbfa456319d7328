use std::collections::{BTreeMap, HashMap, HashSet};

use super::model::{CellValue, ColumnKind, ColumnStat, CorrelationEntry, Dataset};

const TOP_VALUES: usize = 5;

// ---------------------------------------------------------------------------
// Column profiling
// ---------------------------------------------------------------------------

/// Derive a [`ColumnStat`] for every column, in column order.
pub fn profile_columns(dataset: &Dataset) -> Vec<ColumnStat> {
    dataset
        .columns
        .iter()
        .map(|col| profile_column(dataset, col))
        .collect()
}

fn profile_column(dataset: &Dataset, column: &str) -> ColumnStat {
    let present: Vec<&CellValue> = dataset
        .rows
        .iter()
        .filter_map(|r| r.get(column))
        .filter(|v| !v.is_missing())
        .collect();

    let kind = classify(&present);
    let unique: HashSet<String> = present.iter().map(|v| v.search_text().into_owned()).collect();

    let top_values = (kind == ColumnKind::Categorical).then(|| {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for v in &present {
            *counts.entry(v.search_text().into_owned()).or_default() += 1;
        }
        let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.into_iter().take(TOP_VALUES).collect::<BTreeMap<_, _>>()
    });

    ColumnStat {
        name: column.to_string(),
        kind,
        missing_count: dataset.len() - present.len(),
        unique_count: unique.len(),
        sample_value: present.first().map(|v| (*v).clone()).unwrap_or(CellValue::Null),
        top_values,
    }
}

fn classify(present: &[&CellValue]) -> ColumnKind {
    if present.is_empty() {
        return ColumnKind::Categorical;
    }
    if present.iter().all(|v| v.as_number().is_some()) {
        return ColumnKind::Numeric;
    }
    if present
        .iter()
        .all(|v| matches!(v, CellValue::String(s) if looks_like_date(s)))
    {
        return ColumnKind::Date;
    }
    ColumnKind::Categorical
}

/// `YYYY-MM-DD` prefix.
fn looks_like_date(s: &str) -> bool {
    let b = s.trim().as_bytes();
    b.len() >= 10
        && b[..4].iter().all(u8::is_ascii_digit)
        && b[4] == b'-'
        && b[5..7].iter().all(u8::is_ascii_digit)
        && b[7] == b'-'
        && b[8..10].iter().all(u8::is_ascii_digit)
}

// ---------------------------------------------------------------------------
// Correlation
// ---------------------------------------------------------------------------

/// Pearson correlation for every ordered pair of `columns`, row-major.
pub fn correlate(dataset: &Dataset, columns: &[String]) -> Vec<CorrelationEntry> {
    let mut out = Vec::with_capacity(columns.len() * columns.len());
    for x in columns {
        for y in columns {
            out.push(CorrelationEntry {
                x: x.clone(),
                y: y.clone(),
                value: pearson(dataset, x, y),
            });
        }
    }
    out
}

/// Pairwise-complete Pearson coefficient; 0 when undefined.
fn pearson(dataset: &Dataset, x: &str, y: &str) -> f64 {
    let pairs: Vec<(f64, f64)> = dataset
        .rows
        .iter()
        .filter_map(|r| Some((r.get(x)?.as_number()?, r.get(y)?.as_number()?)))
        .collect();
    if pairs.len() < 2 {
        return 0.0;
    }
    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (a, b) in &pairs {
        let (dx, dy) = (a - mean_x, b - mean_y);
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    let denom = (var_x * var_y).sqrt();
    if denom < f64::EPSILON {
        return 0.0;
    }
    (cov / denom).clamp(-1.0, 1.0)
}

/// Share of non-missing cells, 0–100.
pub fn completeness_score(dataset: &Dataset) -> u8 {
    let total = dataset.len() * dataset.columns.len();
    if total == 0 {
        return 0;
    }
    let filled = dataset
        .rows
        .iter()
        .flat_map(|r| r.values())
        .filter(|v| !v.is_missing())
        .count();
    ((filled as f64 / total as f64) * 100.0).floor() as u8
}
