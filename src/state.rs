use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::data::analysis::AnalysisResult;
use crate::data::model::Dataset;
use crate::data::sort::{SortDirection, SortSpec};
use crate::error::TranslationError;
use crate::session::{DatasetKind, DerivedViews, ExplorationSession, ViewSettings};
use crate::translator::{should_delegate, Delegator, QueryTranslator, Resolution};
use crate::view::chart::ChartKind;

// ---------------------------------------------------------------------------
// Transient notices
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Warning,
}

/// A message that clears itself after a while.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub text: String,
    pub kind: NoticeKind,
    pub expires_at: Instant,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Current analysis result (None until the user opens one).
    pub session: Option<ExplorationSession>,

    /// Query, sort, chart and row-set selection.
    pub settings: ViewSettings,

    /// Views derived from `session` + `settings` (recomputed on change).
    pub views: DerivedViews,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,

    /// Auto-clearing message from query translation.
    pub notice: Option<Notice>,

    delegator: Option<Delegator>,
    notice_ttl: Duration,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(None, Duration::from_secs(4))
    }
}

impl AppState {
    pub fn new(translator: Option<Arc<dyn QueryTranslator>>, notice_ttl: Duration) -> Self {
        Self {
            session: None,
            settings: ViewSettings::default(),
            views: DerivedViews::default(),
            status_message: None,
            notice: None,
            delegator: translator.map(Delegator::new),
            notice_ttl,
        }
    }

    /// Replace the session wholesale with a newly loaded analysis result.
    pub fn set_result(&mut self, result: AnalysisResult) {
        let session = ExplorationSession::new(result);
        self.settings = ViewSettings::for_session(&session);
        self.session = Some(session);
        self.status_message = None;
        self.notice = None;
        self.recompute();
    }

    /// Recompute every derived view.
    pub fn recompute(&mut self) {
        self.views = match &self.session {
            Some(session) => session.derive(&self.settings),
            None => DerivedViews::default(),
        };
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.session
            .as_ref()
            .map(|s| s.dataset(self.settings.dataset))
    }

    // -- query --

    /// Live filtering on every edit.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.settings.query = query.into();
        self.recompute();
    }

    pub fn can_delegate(&self) -> bool {
        self.delegator.is_some() && should_delegate(&self.settings.query)
    }

    pub fn translation_in_flight(&self) -> bool {
        self.delegator.as_ref().is_some_and(Delegator::in_flight)
    }

    /// Explicit submit: hand free text to the translator.
    pub fn submit_query(&mut self, now: Instant) {
        if !should_delegate(&self.settings.query) {
            return;
        }
        let columns = match self.dataset() {
            Some(ds) => ds.columns.clone(),
            None => return,
        };
        match self.delegator.as_mut() {
            Some(delegator) => {
                delegator.submit(&self.settings.query, &columns);
            }
            None => {
                let text = TranslationError::NotConfigured.to_string();
                self.show_notice(text, NoticeKind::Info, now);
            }
        }
    }

    /// Drain translator answers; called once per frame.
    pub fn poll_translation(&mut self, now: Instant) {
        let resolution = self.delegator.as_mut().and_then(Delegator::poll);
        if let Some(resolution) = resolution {
            self.apply_resolution(resolution, now);
        }
    }

    pub fn apply_resolution(&mut self, resolution: Resolution, now: Instant) {
        match resolution {
            Resolution::Apply {
                filter,
                explanation,
            } => {
                log::info!("translator produced filter {filter:?}");
                self.set_query(filter);
                if !explanation.trim().is_empty() {
                    self.show_notice(explanation, NoticeKind::Info, now);
                }
            }
            Resolution::Explain(explanation) => {
                let text = if explanation.trim().is_empty() {
                    "The query could not be translated into a filter.".to_string()
                } else {
                    explanation
                };
                self.show_notice(text, NoticeKind::Info, now);
            }
            Resolution::Failed(err) => {
                log::warn!("query translation failed: {err}");
                self.show_notice(
                    "Query translator unavailable; showing text matches instead.".to_string(),
                    NoticeKind::Warning,
                    now,
                );
            }
        }
    }

    fn show_notice(&mut self, text: String, kind: NoticeKind, now: Instant) {
        self.notice = Some(Notice {
            text,
            kind,
            expires_at: now + self.notice_ttl,
        });
    }

    /// Drop the notice once it has expired.
    pub fn expire_notice(&mut self, now: Instant) {
        if self.notice.as_ref().is_some_and(|n| n.expires_at <= now) {
            self.notice = None;
        }
    }

    // -- sort --

    /// Header click: none → ascending → descending → none.
    pub fn cycle_sort(&mut self, column: &str) {
        self.settings.sort = match &self.settings.sort {
            Some(spec) if spec.column == column && spec.direction == SortDirection::Descending => None,
            current => Some(SortSpec::toggle(current.as_ref(), column)),
        };
        self.recompute();
    }

    // -- row set / chart --

    /// Switch row sets. The original rows are only selectable when the
    /// result carried them.
    pub fn set_dataset_kind(&mut self, kind: DatasetKind) {
        let Some(session) = &self.session else {
            return;
        };
        if self.settings.dataset == kind || (kind == DatasetKind::Original && !session.has_original()) {
            return;
        }
        self.settings.dataset = kind;
        self.settings.chart = session.default_chart(kind);
        self.recompute();
    }

    pub fn set_chart_kind(&mut self, kind: ChartKind) {
        self.settings.chart.kind = kind;
        self.recompute();
    }

    pub fn set_chart_primary(&mut self, column: String) {
        self.settings.chart.primary = Some(column);
        self.recompute();
    }

    pub fn set_chart_secondary(&mut self, column: String) {
        self.settings.chart.secondary = Some(column);
        self.recompute();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::result_from_dataset;
    use crate::data::model::{CellValue, Row};
    use crate::translator::MockQueryTranslator;

    fn result() -> AnalysisResult {
        let rows = [("Mango", 30.0), ("Apple", 10.0), ("Pear", 20.0)]
            .into_iter()
            .map(|(p, a)| {
                Row::from([
                    ("Product".to_string(), CellValue::String(p.into())),
                    ("Amount".to_string(), CellValue::Number(a)),
                ])
            })
            .collect();
        let ds = Dataset::with_columns(vec!["Product".into(), "Amount".into()], rows);
        result_from_dataset("run".into(), ds)
    }

    fn loaded() -> AppState {
        let mut state = AppState::default();
        state.set_result(result());
        state
    }

    #[test]
    fn new_result_shows_every_row() {
        let state = loaded();
        assert_eq!(state.views.sorted, vec![0, 1, 2]);
        assert_eq!(state.settings.chart.primary.as_deref(), Some("Amount"));
    }

    #[test]
    fn query_edits_refilter() {
        let mut state = loaded();
        state.set_query("amount>15");
        assert_eq!(state.views.filtered, vec![0, 2]);
        state.set_query("");
        assert_eq!(state.views.filtered, vec![0, 1, 2]);
    }

    #[test]
    fn header_clicks_cycle_three_states() {
        let mut state = loaded();
        state.cycle_sort("Amount");
        assert_eq!(state.views.sorted, vec![1, 2, 0]);
        state.cycle_sort("Amount");
        assert_eq!(state.views.sorted, vec![0, 2, 1]);
        state.cycle_sort("Amount");
        assert_eq!(state.settings.sort, None);
        assert_eq!(state.views.sorted, vec![0, 1, 2]);
    }

    #[test]
    fn translated_filter_replaces_query() {
        let mut state = loaded();
        state.set_query("cheap stuff");
        let now = Instant::now();
        state.apply_resolution(
            Resolution::Apply {
                filter: "Amount<15".into(),
                explanation: "amounts under 15".into(),
            },
            now,
        );
        assert_eq!(state.settings.query, "Amount<15");
        assert_eq!(state.views.filtered, vec![1]);
        assert_eq!(state.notice.as_ref().map(|n| n.text.as_str()), Some("amounts under 15"));
    }

    #[test]
    fn explanation_leaves_filter_untouched_and_expires() {
        let mut state = loaded();
        state.set_query("pea");
        let before = state.views.clone();
        let now = Instant::now();
        state.apply_resolution(Resolution::Explain("no column for that".into()), now);
        assert_eq!(state.views, before);
        assert_eq!(state.settings.query, "pea");

        state.expire_notice(now + Duration::from_secs(1));
        assert!(state.notice.is_some());
        state.expire_notice(now + Duration::from_secs(4));
        assert!(state.notice.is_none());
    }

    #[test]
    fn failures_never_empty_the_view() {
        let mut state = loaded();
        state.apply_resolution(
            Resolution::Failed(TranslationError::Transport("timed out".into())),
            Instant::now(),
        );
        assert_eq!(state.views.filtered, vec![0, 1, 2]);
        assert_eq!(state.notice.as_ref().map(|n| n.kind), Some(NoticeKind::Warning));
    }

    #[test]
    fn original_rows_require_a_preview() {
        let mut state = loaded();
        state.set_dataset_kind(DatasetKind::Original);
        assert_eq!(state.settings.dataset, DatasetKind::Cleaned);
        assert_eq!(state.views.sorted.len(), 3);
    }

    #[test]
    fn submit_without_translator_reports_notice() {
        let mut state = loaded();
        state.set_query("something vague");
        state.submit_query(Instant::now());
        assert!(state.notice.is_some());
        assert!(!state.translation_in_flight());
    }

    #[test]
    fn submit_sends_columns_to_translator() {
        let mut mock = MockQueryTranslator::new();
        mock.expect_translate()
            .withf(|req| req.columns == vec!["Product".to_string(), "Amount".to_string()])
            .returning(|_| Err(TranslationError::Transport("offline".into())));
        let mut state = AppState::new(Some(Arc::new(mock)), Duration::from_secs(4));
        state.set_result(result());
        state.set_query("fruit");
        assert!(state.can_delegate());
        state.submit_query(Instant::now());
        assert!(state.translation_in_flight());
    }

    #[test]
    fn comparisons_are_never_submitted() {
        let mut mock = MockQueryTranslator::new();
        mock.expect_translate().never();
        let mut state = AppState::new(Some(Arc::new(mock)), Duration::from_secs(4));
        state.set_result(result());
        state.set_query("Amount>1");
        assert!(!state.can_delegate());
        state.submit_query(Instant::now());
        assert!(!state.translation_in_flight());
    }
}
