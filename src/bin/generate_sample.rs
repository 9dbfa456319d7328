//! Writes a demo analysis result (`sample_result.json` by default) with a
//! noisy "original" sales table, its cleaned counterpart and the insights a
//! cleaning service would attach.

use anyhow::{Context, Result};
use serde_json::{json, Map, Value};

use rusty_lens::data::analysis::{AnalysisResult, Insights, JsonRecord};
use rusty_lens::data::model::Dataset;
use rusty_lens::data::stats;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_f64() * n as f64) as usize % n
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

const PRODUCTS: [(&str, &str, f64); 6] = [
    ("Laptop", "Electronics", 950.0),
    ("Headphones", "Electronics", 120.0),
    ("Desk", "Furniture", 310.0),
    ("Chair", "Furniture", 145.0),
    ("Notebook", "Stationery", 4.5),
    ("Pen", "Stationery", 1.2),
];

const CLEAN_ROWS: usize = 120;

fn record(value: Value) -> JsonRecord {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn clean_row(rng: &mut SimpleRng, day: usize) -> JsonRecord {
    let (product, category, price) = PRODUCTS[rng.below(PRODUCTS.len())];
    let quantity = 1 + rng.below(8);
    let unit = (rng.gauss(price, price * 0.05) * 100.0).round() / 100.0;
    let amount = ((unit * quantity as f64) * 100.0).round() / 100.0;
    record(json!({
        "Date": format!("2024-{:02}-{:02}", 1 + (day / 28) % 12, 1 + day % 28),
        "Product": product,
        "Category": category,
        "Quantity": quantity,
        "Amount": amount,
    }))
}

/// The row as it might have looked before cleaning.
fn dirty(rng: &mut SimpleRng, row: &JsonRecord) -> JsonRecord {
    let mut row = row.clone();
    match rng.below(6) {
        0 => {
            if let Some(Value::String(p)) = row.get("Product").cloned() {
                row.insert("Product".into(), Value::String(format!("  {} ", p.to_lowercase())));
            }
        }
        1 => {
            row.insert("Amount".into(), Value::String("N/A".into()));
        }
        2 => {
            row.insert("Quantity".into(), Value::Null);
        }
        _ => {}
    }
    row
}

fn main() -> Result<()> {
    let output_path = std::env::args().nth(1).unwrap_or_else(|| "sample_result.json".into());
    let mut rng = SimpleRng::new(42);

    let cleaned_rows: Vec<JsonRecord> = (0..CLEAN_ROWS).map(|day| clean_row(&mut rng, day)).collect();

    let mut original_rows = Vec::new();
    let mut duplicates = 0;
    for row in &cleaned_rows {
        original_rows.push(dirty(&mut rng, row));
        if rng.below(10) == 0 {
            original_rows.push(row.clone());
            duplicates += 1;
        }
    }
    let anomalies = 3;
    for _ in 0..anomalies {
        let mut outlier = cleaned_rows[rng.below(cleaned_rows.len())].clone();
        outlier.insert("Amount".into(), json!(250_000.0));
        original_rows.push(outlier);
    }

    let cleaned = Dataset::from_json_records(&cleaned_rows);
    let column_stats = stats::profile_columns(&cleaned);
    let numeric_columns: Vec<String> = column_stats
        .iter()
        .filter(|s| s.kind == rusty_lens::data::model::ColumnKind::Numeric)
        .map(|s| s.name.clone())
        .collect();
    let correlations = stats::correlate(&cleaned, &numeric_columns);

    let rows_original = original_rows.len();
    let rows_cleaned = cleaned_rows.len();
    let quality_score = rows_cleaned as f64 / rows_original as f64 * 100.0;

    let result = AnalysisResult {
        request_id: "sample-0001".into(),
        insights: Insights {
            rows_original,
            rows_cleaned,
            anomalies_detected: anomalies,
            duplicates_removed: duplicates,
            pii_masked: 0,
            quality_score,
            summary: format!(
                "Removed {duplicates} duplicate rows and {anomalies} outliers; trimmed and re-cased product names."
            ),
            logs: vec![
                format!("Loaded {rows_original} rows"),
                format!("Dropped {duplicates} exact duplicates"),
                format!("Flagged {anomalies} amount outliers"),
                "Filled missing quantities with the column median".into(),
            ],
            numeric_columns,
            column_stats,
            correlations,
        },
        cleaned_rows,
        original_rows,
    };

    let file = std::fs::File::create(&output_path)
        .with_context(|| format!("Failed to create {output_path}"))?;
    serde_json::to_writer_pretty(file, &result).context("Failed to write analysis result")?;

    println!("Wrote {rows_cleaned} cleaned / {rows_original} original rows to {output_path}");
    Ok(())
}
