/// Data layer: core types, loading, filtering and sorting.
///
/// Architecture:
/// ```text
///  analysis result (.json) / cleaned export (.csv)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → AnalysisResult (stats filled in if absent)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<Row>, ordered column list
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐      ┌──────────┐
///   │  filter   │ ───► │   sort    │  query → indices → ordered indices
///   └──────────┘      └──────────┘
/// ```

pub mod analysis;
pub mod filter;
pub mod loader;
pub mod model;
pub mod query;
pub mod sort;
pub mod stats;
