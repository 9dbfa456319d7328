use std::sync::Arc;

use crate::data::analysis::{AnalysisResult, Insights};
use crate::data::filter::filtered_indices;
use crate::data::model::{ColumnStat, Dataset};
use crate::data::sort::{sort_indices, SortSpec};
use crate::data::stats;
use crate::error::ConfigurationError;
use crate::view::chart::{self, build_series, ChartConfig, ChartKind, ChartSeries};
use crate::view::correlation::CorrelationMatrix;
use crate::view::gauge::{classify, GaugeReading};

/// Which of the two preview row sets is being explored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DatasetKind {
    #[default]
    Cleaned,
    Original,
}

// ---------------------------------------------------------------------------
// ExplorationSession – one analysis result, never mutated
// ---------------------------------------------------------------------------

/// Everything derived once from an analysis result. A new result builds a
/// new session; nothing here changes afterwards.
#[derive(Debug, Clone)]
pub struct ExplorationSession {
    pub request_id: String,
    pub insights: Insights,
    cleaned: Arc<Dataset>,
    original: Arc<Dataset>,
    pub column_stats: Vec<ColumnStat>,
    pub correlation: CorrelationMatrix,
    pub gauge: GaugeReading,
}

impl ExplorationSession {
    pub fn new(result: AnalysisResult) -> Self {
        let cleaned = result.cleaned_dataset();
        let original = result.original_dataset();
        let mut insights = result.insights;

        let column_stats = if insights.column_stats.is_empty() {
            log::info!("result carries no column stats, profiling {} columns", cleaned.columns.len());
            stats::profile_columns(&cleaned)
        } else {
            std::mem::take(&mut insights.column_stats)
        };

        let correlation = if insights.correlations.is_empty() {
            let numeric: Vec<String> = chart::numeric_columns(&column_stats)
                .into_iter()
                .filter(|c| cleaned.columns.contains(c))
                .collect();
            CorrelationMatrix::build(&stats::correlate(&cleaned, &numeric))
        } else {
            CorrelationMatrix::build(&std::mem::take(&mut insights.correlations))
        };

        let gauge = classify(insights.quality());
        log::info!(
            "session '{}': {} cleaned rows, {} original rows, quality {} ({})",
            result.request_id,
            cleaned.len(),
            original.len(),
            gauge.score,
            gauge.band
        );

        ExplorationSession {
            request_id: result.request_id,
            insights,
            cleaned: Arc::new(cleaned),
            original: Arc::new(original),
            column_stats,
            correlation,
            gauge,
        }
    }

    pub fn dataset(&self, kind: DatasetKind) -> &Dataset {
        match kind {
            DatasetKind::Cleaned => &self.cleaned,
            DatasetKind::Original => &self.original,
        }
    }

    pub fn has_original(&self) -> bool {
        !self.original.is_empty()
    }

    /// Numeric columns present in the chosen row set. Falls back to the
    /// service's own list when no column stat is numeric.
    pub fn numeric_columns(&self, kind: DatasetKind) -> Vec<String> {
        let dataset = self.dataset(kind);
        let mut candidates = chart::numeric_columns(&self.column_stats);
        if candidates.is_empty() {
            candidates = self.insights.numeric_columns.clone();
        }
        candidates
            .into_iter()
            .filter(|c| dataset.columns.contains(c))
            .collect()
    }

    /// A sensible first chart: bars of the first numeric column, scatter
    /// against the second when there is one.
    pub fn default_chart(&self, kind: DatasetKind) -> ChartConfig {
        let numeric = self.numeric_columns(kind);
        ChartConfig {
            kind: ChartKind::Bar,
            primary: numeric.first().cloned(),
            secondary: numeric.get(1).cloned(),
        }
    }

    /// Recompute every row-dependent view from scratch.
    pub fn derive(&self, settings: &ViewSettings) -> DerivedViews {
        let dataset = self.dataset(settings.dataset);
        let filtered = filtered_indices(dataset, &settings.query);
        let sorted = sort_indices(dataset, filtered.clone(), settings.sort.as_ref());
        let eligible = self.numeric_columns(settings.dataset);
        let chart = build_series(dataset, &sorted, &settings.chart, &eligible);
        DerivedViews {
            filtered,
            sorted,
            chart,
        }
    }
}

// ---------------------------------------------------------------------------
// View settings / derived views
// ---------------------------------------------------------------------------

/// User-controlled inputs to the derived views.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewSettings {
    pub dataset: DatasetKind,
    pub query: String,
    pub sort: Option<SortSpec>,
    pub chart: ChartConfig,
}

impl ViewSettings {
    pub fn for_session(session: &ExplorationSession) -> Self {
        ViewSettings {
            chart: session.default_chart(DatasetKind::Cleaned),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DerivedViews {
    /// Rows passing the query, in dataset order.
    pub filtered: Vec<usize>,
    /// `filtered` reordered by the active sort.
    pub sorted: Vec<usize>,
    pub chart: Result<Option<ChartSeries>, ConfigurationError>,
}

impl Default for DerivedViews {
    fn default() -> Self {
        DerivedViews {
            filtered: Vec::new(),
            sorted: Vec::new(),
            chart: Ok(None),
        }
    }
}
