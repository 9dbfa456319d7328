use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use super::model::{ColumnStat, CorrelationEntry, Dataset};

/// Record-oriented row as it travels over the wire.
pub type JsonRecord = Map<String, JsonValue>;

/// Precomputed insights returned with every successful analysis run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Insights {
    #[serde(default)]
    pub rows_original: usize,
    #[serde(default)]
    pub rows_cleaned: usize,
    #[serde(default)]
    pub anomalies_detected: usize,
    #[serde(default)]
    pub duplicates_removed: usize,
    #[serde(default)]
    pub pii_masked: usize,
    /// The service may send a fractional score; see [`Insights::quality`].
    #[serde(default)]
    pub quality_score: f64,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub logs: Vec<String>,
    #[serde(default)]
    pub numeric_columns: Vec<String>,
    #[serde(default, alias = "columnStats")]
    pub column_stats: Vec<ColumnStat>,
    #[serde(default, alias = "correlation")]
    pub correlations: Vec<CorrelationEntry>,
}

impl Insights {
    /// Quality score rounded and clamped to 0–100.
    pub fn quality(&self) -> u8 {
        if self.quality_score.is_nan() {
            return 0;
        }
        self.quality_score.round().clamp(0.0, 100.0) as u8
    }
}

/// One analysis run as delivered by the analysis service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default)]
    pub request_id: String,
    #[serde(default)]
    pub insights: Insights,
    /// Preview of the cleaned rows.
    #[serde(default, alias = "chart_data", alias = "cleaned_data")]
    pub cleaned_rows: Vec<JsonRecord>,
    /// Preview of the rows before cleaning.
    #[serde(default, alias = "original_data")]
    pub original_rows: Vec<JsonRecord>,
}

impl AnalysisResult {
    pub fn cleaned_dataset(&self) -> Dataset {
        Dataset::from_json_records(&self.cleaned_rows)
    }

    pub fn original_dataset(&self) -> Dataset {
        Dataset::from_json_records(&self.original_rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;

    #[test]
    fn decodes_minimal_service_response() {
        // shape of the plain upload endpoint: no stats, no original rows
        let json = r#"{
            "request_id": "20240101120000_1234",
            "insights": {
                "request_id": "20240101120000_1234",
                "rows_original": 10,
                "rows_cleaned": 8,
                "anomalies_detected": 1,
                "duplicates_removed": 1,
                "quality_score": 80,
                "summary": "ok",
                "logs": ["[12:00:00] Starting date cleaning"],
                "numeric_columns": ["Amount"]
            },
            "chart_data": [
                {"index": 0, "Product": "Mango", "Amount": 12.5},
                {"index": 1, "Product": "Apple", "Amount": null}
            ]
        }"#;
        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.insights.quality(), 80);
        assert!(result.original_rows.is_empty());
        let ds = result.cleaned_dataset();
        assert_eq!(ds.columns, vec!["index", "Product", "Amount"]);
        assert_eq!(ds.value(1, "Amount"), Some(&CellValue::Null));
    }

    #[test]
    fn fractional_scores_round_and_clamp() {
        let mut insights = Insights {
            quality_score: 87.49,
            ..Default::default()
        };
        assert_eq!(insights.quality(), 87);
        insights.quality_score = 140.0;
        assert_eq!(insights.quality(), 100);
        insights.quality_score = -3.0;
        assert_eq!(insights.quality(), 0);
    }
}
