use std::fmt;

use crate::data::model::{ColumnKind, ColumnStat, Dataset};
use crate::error::ConfigurationError;

// ---------------------------------------------------------------------------
// Chart configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartKind {
    #[default]
    Bar,
    Line,
    Scatter,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [ChartKind::Bar, ChartKind::Line, ChartKind::Scatter];

    pub fn needs_two_columns(self) -> bool {
        self == ChartKind::Scatter
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ChartKind::Bar => "Bar",
            ChartKind::Line => "Line",
            ChartKind::Scatter => "Scatter",
        };
        f.write_str(s)
    }
}

/// Which chart to draw and from which columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartConfig {
    pub kind: ChartKind,
    /// Value column for bar/line, x column for scatter.
    pub primary: Option<String>,
    /// y column for scatter.
    pub secondary: Option<String>,
}

/// Columns a chart may use: those profiled as numeric.
pub fn numeric_columns(stats: &[ColumnStat]) -> Vec<String> {
    stats
        .iter()
        .filter(|s| s.kind == ColumnKind::Numeric)
        .map(|s| s.name.clone())
        .collect()
}

// ---------------------------------------------------------------------------
// Projection
// ---------------------------------------------------------------------------

/// One plotted point. `index` is the position within the current view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartPoint {
    pub index: usize,
    pub x: Option<f64>,
    pub y: Option<f64>,
    /// `None` when the cell is not numeric; rendered as a gap.
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub kind: ChartKind,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    /// An empty view is a valid chart with nothing to show.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Plottable `[x, y]` pairs, skipping gaps.
    pub fn xy(&self) -> Vec<[f64; 2]> {
        self.points
            .iter()
            .filter_map(|p| match self.kind {
                ChartKind::Scatter => Some([p.x?, p.y?]),
                ChartKind::Bar | ChartKind::Line => Some([p.index as f64, p.value?]),
            })
            .collect()
    }
}

/// Reshape a view (row indices, already filtered and sorted) into a series.
///
/// Returns `Ok(None)` when the dataset has no numeric column at all; that is
/// a terminal state, not a misconfiguration.
pub fn build_series(
    dataset: &Dataset,
    view: &[usize],
    config: &ChartConfig,
    eligible: &[String],
) -> Result<Option<ChartSeries>, ConfigurationError> {
    if eligible.is_empty() {
        return Ok(None);
    }

    let primary = config
        .primary
        .as_deref()
        .ok_or(ConfigurationError::NoColumnSelected)?;
    ensure_numeric(primary, eligible)?;

    let number_at = |row: usize, col: &str| dataset.value(row, col).and_then(|v| v.as_number());

    let series = match config.kind {
        ChartKind::Bar | ChartKind::Line => ChartSeries {
            kind: config.kind,
            x_label: "Row".to_string(),
            y_label: primary.to_string(),
            points: view
                .iter()
                .enumerate()
                .map(|(index, &row)| ChartPoint {
                    index,
                    x: None,
                    y: None,
                    value: number_at(row, primary),
                })
                .collect(),
        },
        ChartKind::Scatter => {
            let secondary = config
                .secondary
                .as_deref()
                .ok_or(ConfigurationError::MissingSecondColumn)?;
            if secondary == primary {
                return Err(ConfigurationError::SameColumn(primary.to_string()));
            }
            ensure_numeric(secondary, eligible)?;
            ChartSeries {
                kind: ChartKind::Scatter,
                x_label: primary.to_string(),
                y_label: secondary.to_string(),
                points: view
                    .iter()
                    .enumerate()
                    .map(|(index, &row)| {
                        let x = number_at(row, primary);
                        let y = number_at(row, secondary);
                        ChartPoint {
                            index,
                            x,
                            y,
                            value: y,
                        }
                    })
                    .collect(),
            }
        }
    };
    Ok(Some(series))
}

fn ensure_numeric(column: &str, eligible: &[String]) -> Result<(), ConfigurationError> {
    if eligible.iter().any(|c| c == column) {
        Ok(())
    } else {
        Err(ConfigurationError::NotNumeric(column.to_string()))
    }
}
