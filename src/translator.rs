//! Delegation of free-text queries to an external query translator.
//!
//! ```text
//!   submit(query)  ──token n──►  worker thread ──► translator (HTTP)
//!                                      │
//!   poll() ◄── mpsc ◄──── Completion { token, result }
//!     └─ drops every completion whose token != latest issued
//! ```

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::data::query::contains_operator;
use crate::error::TranslationError;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationRequest {
    pub query: String,
    pub columns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationResponse {
    #[serde(default, alias = "filterString", skip_serializing_if = "Option::is_none")]
    pub filter_string: Option<String>,
    #[serde(default)]
    pub explanation: String,
}

/// Anything that can turn a natural-language query into a filter string.
#[cfg_attr(test, mockall::automock)]
pub trait QueryTranslator: Send + Sync {
    fn translate(&self, request: &TranslationRequest) -> Result<TranslationResponse, TranslationError>;
}

// ---------------------------------------------------------------------------
// HTTP client
// ---------------------------------------------------------------------------

/// POSTs the request as JSON and expects a JSON [`TranslationResponse`].
pub struct HttpTranslator {
    agent: ureq::Agent,
    url: String,
}

impl HttpTranslator {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        HttpTranslator {
            agent,
            url: url.into(),
        }
    }
}

impl QueryTranslator for HttpTranslator {
    fn translate(&self, request: &TranslationRequest) -> Result<TranslationResponse, TranslationError> {
        let response = self
            .agent
            .post(&self.url)
            .send_json(request)
            .map_err(|e| TranslationError::Transport(e.to_string()))?;
        response
            .into_json::<TranslationResponse>()
            .map_err(|e| TranslationError::Malformed(e.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Delegator
// ---------------------------------------------------------------------------

/// Monotonically increasing id attached to every submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

struct Completion {
    token: RequestToken,
    result: Result<TranslationResponse, TranslationError>,
}

/// What the caller should do with the latest translator answer.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Use `filter` as the new query.
    Apply { filter: String, explanation: String },
    /// No filter; show the explanation and leave the filter alone.
    Explain(String),
    /// The call failed; show a notice and leave the filter alone.
    Failed(TranslationError),
}

impl Resolution {
    fn from_result(result: Result<TranslationResponse, TranslationError>) -> Self {
        match result {
            Ok(TranslationResponse {
                filter_string: Some(filter),
                explanation,
            }) if !filter.trim().is_empty() => Resolution::Apply {
                filter: filter.trim().to_string(),
                explanation,
            },
            Ok(resp) => Resolution::Explain(resp.explanation),
            Err(e) => Resolution::Failed(e),
        }
    }
}

/// Whether a submitted query should be handed to the translator. A
/// comparison needs an operator character, so operator-free text can never
/// be one.
pub fn should_delegate(query: &str) -> bool {
    let query = query.trim();
    !query.is_empty() && !contains_operator(query)
}

pub struct Delegator {
    translator: Arc<dyn QueryTranslator>,
    tx: Sender<Completion>,
    rx: Receiver<Completion>,
    issued: u64,
    /// Token still awaiting an answer, if any.
    pending: Option<RequestToken>,
}

impl Delegator {
    pub fn new(translator: Arc<dyn QueryTranslator>) -> Self {
        let (tx, rx) = mpsc::channel();
        Delegator {
            translator,
            tx,
            rx,
            issued: 0,
            pending: None,
        }
    }

    /// Start a translation for `query`. Returns `None` when the query is not
    /// eligible for delegation.
    pub fn submit(&mut self, query: &str, columns: &[String]) -> Option<RequestToken> {
        if !should_delegate(query) {
            return None;
        }
        self.issued += 1;
        let token = RequestToken(self.issued);
        self.pending = Some(token);

        let request = TranslationRequest {
            query: query.trim().to_string(),
            columns: columns.to_vec(),
        };
        let translator = Arc::clone(&self.translator);
        let tx = self.tx.clone();
        log::info!("delegating query {:?} to translator ({token:?})", request.query);

        thread::spawn(move || {
            let result = translator.translate(&request);
            // receiver gone means the session was dropped
            let _ = tx.send(Completion { token, result });
        });
        Some(token)
    }

    /// Whether the latest submission is still waiting for an answer.
    pub fn in_flight(&self) -> bool {
        self.pending.is_some()
    }

    /// Non-blocking: the latest submission's resolution if it has arrived.
    pub fn poll(&mut self) -> Option<Resolution> {
        while let Ok(completion) = self.rx.try_recv() {
            if let Some(resolution) = self.accept(completion) {
                return Some(resolution);
            }
        }
        None
    }

    /// Blocking variant of [`Delegator::poll`].
    #[cfg(test)]
    fn wait(&mut self, timeout: Duration) -> Option<Resolution> {
        let deadline = std::time::Instant::now() + timeout;
        while self.pending.is_some() {
            let remaining = deadline.saturating_duration_since(std::time::Instant::now());
            match self.rx.recv_timeout(remaining) {
                Ok(completion) => {
                    if let Some(resolution) = self.accept(completion) {
                        return Some(resolution);
                    }
                }
                Err(_) => return None,
            }
        }
        None
    }

    fn accept(&mut self, completion: Completion) -> Option<Resolution> {
        if self.pending != Some(completion.token) {
            log::debug!("discarding stale translator response {:?}", completion.token);
            return None;
        }
        self.pending = None;
        Some(Resolution::from_result(completion.result))
    }
}
