use std::borrow::Cow;
use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

// ---------------------------------------------------------------------------
// CellValue – a single cell of a row
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value as delivered by the analysis service.
///
/// Coercion between variants never happens implicitly; comparisons go
/// through [`CellValue::as_number`] / [`CellValue::search_text`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Number(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => Ok(()),
        }
    }
}

impl CellValue {
    /// Numeric view of the cell. Strings count when they hold a finite number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(v) if v.is_finite() => Some(*v),
            CellValue::String(s) => parse_number(s),
            _ => None,
        }
    }

    /// String form used for text matching. Null is the empty string.
    pub fn search_text(&self) -> Cow<'_, str> {
        match self {
            CellValue::String(s) => Cow::Borrowed(s.as_str()),
            CellValue::Null => Cow::Borrowed(""),
            other => Cow::Owned(other.to_string()),
        }
    }

    /// Null or a blank string.
    pub fn is_missing(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::String(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    pub fn from_json(val: &JsonValue) -> Self {
        match val {
            JsonValue::String(s) => CellValue::String(s.clone()),
            JsonValue::Number(n) => match n.as_f64() {
                Some(f) => CellValue::Number(f),
                None => CellValue::String(n.to_string()),
            },
            JsonValue::Bool(b) => CellValue::Bool(*b),
            JsonValue::Null => CellValue::Null,
            other => CellValue::String(other.to_string()),
        }
    }
}

/// Parse a literal as a finite number. Empty input, `NaN` and `inf` are rejected.
pub fn parse_number(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

// ---------------------------------------------------------------------------
// Row / Dataset
// ---------------------------------------------------------------------------

/// One row: column name → value.
pub type Row = BTreeMap<String, CellValue>;

/// An ordered sequence of rows sharing one column set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    /// Column names in order of first appearance.
    pub columns: Vec<String>,
    /// Rows in ingestion order.
    pub rows: Vec<Row>,
}

impl Dataset {
    /// Build a dataset, filling cells a row does not carry with `Null`.
    pub fn from_rows(rows: Vec<Row>) -> Self {
        let mut seen = HashSet::new();
        let columns: Vec<String> = rows
            .iter()
            .flat_map(|r| r.keys())
            .filter(|c| seen.insert(c.as_str()))
            .cloned()
            .collect();
        Self::with_columns(columns, rows)
    }

    /// Build a dataset with an explicit column order.
    pub fn with_columns(columns: Vec<String>, mut rows: Vec<Row>) -> Self {
        for row in &mut rows {
            for col in &columns {
                row.entry(col.clone()).or_insert(CellValue::Null);
            }
        }
        Dataset { columns, rows }
    }

    /// Decode records-oriented JSON (`[{col: value, ...}, ...]`), keeping
    /// the document's key order as the column order.
    pub fn from_json_records(records: &[serde_json::Map<String, JsonValue>]) -> Self {
        let mut seen = HashSet::new();
        let mut columns = Vec::new();
        let rows: Vec<Row> = records
            .iter()
            .map(|obj| {
                obj.iter()
                    .map(|(key, val)| {
                        if seen.insert(key.clone()) {
                            columns.push(key.clone());
                        }
                        (key.clone(), CellValue::from_json(val))
                    })
                    .collect::<Row>()
            })
            .collect();
        Self::with_columns(columns, rows)
    }

    /// Records-oriented JSON in column order.
    pub fn to_json_records(&self) -> Vec<serde_json::Map<String, JsonValue>> {
        self.rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .map(|col| {
                        let val = row
                            .get(col)
                            .and_then(|v| serde_json::to_value(v).ok())
                            .unwrap_or(JsonValue::Null);
                        (col.clone(), val)
                    })
                    .collect()
            })
            .collect()
    }

    /// Case-insensitive column lookup returning the declared name.
    pub fn resolve_column(&self, name: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|c| c.eq_ignore_ascii_case(name))
            .map(String::as_str)
    }

    /// Materialise a view (row indices) into a new dataset.
    pub fn select(&self, indices: &[usize]) -> Dataset {
        Dataset {
            columns: self.columns.clone(),
            rows: indices.iter().map(|&i| self.rows[i].clone()).collect(),
        }
    }

    pub fn value(&self, row: usize, column: &str) -> Option<&CellValue> {
        self.rows.get(row).and_then(|r| r.get(column))
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Column statistics / correlations (as produced by the analysis service)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    #[serde(alias = "Numeric")]
    Numeric,
    #[serde(alias = "Date")]
    Date,
    #[serde(alias = "Categorical")]
    Categorical,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ColumnKind::Numeric => "numeric",
            ColumnKind::Date => "date",
            ColumnKind::Categorical => "categorical",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnStat {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ColumnKind,
    #[serde(alias = "missingCount", default)]
    pub missing_count: usize,
    #[serde(alias = "uniqueCount", default)]
    pub unique_count: usize,
    #[serde(alias = "sampleValue", default = "null_cell")]
    pub sample_value: CellValue,
    #[serde(alias = "topValues", default, skip_serializing_if = "Option::is_none")]
    pub top_values: Option<BTreeMap<String, usize>>,
}

fn null_cell() -> CellValue {
    CellValue::Null
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationEntry {
    pub x: String,
    pub y: String,
    pub value: f64,
}
