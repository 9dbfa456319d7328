use thiserror::Error;

/// A chart was requested with a column selection it cannot plot.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("no column selected")]
    NoColumnSelected,

    #[error("column '{0}' is not numeric")]
    NotNumeric(String),

    #[error("scatter needs a second numeric column")]
    MissingSecondColumn,

    #[error("scatter needs two distinct columns, got '{0}' twice")]
    SameColumn(String),
}

/// The query translator could not provide a filter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslationError {
    #[error("no query translator configured")]
    NotConfigured,

    #[error("translator request failed: {0}")]
    Transport(String),

    #[error("translator returned a malformed response: {0}")]
    Malformed(String),
}
