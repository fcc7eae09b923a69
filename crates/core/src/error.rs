//! Error types for sketch compilation and page analysis.

use std::fmt;

use itertools::Itertools;
use thiserror::Error;

/// Classification of a [`DossierError`], used for membership tests on
/// wrapped and aggregated errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    IncompleteConfig,
    BadConfig,
    InvalidRect,
    NodeFeatureUnavailable,
    NodePositionUnknown,
    InvalidUnit,
    InvalidTags,
    InvalidPageRange,
    Pattern,
    Document,
    Cancelled,
    DeadlineExceeded,
    ThreadPool,
    Io,
    Json,
    Multiple,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::IncompleteConfig => "incomplete configuration",
            Self::BadConfig => "bad configuration",
            Self::InvalidRect => "rectangle is invalid",
            Self::NodeFeatureUnavailable => "node feature unavailable",
            Self::NodePositionUnknown => "node position unknown",
            Self::InvalidUnit => "invalid length unit",
            Self::InvalidTags => "invalid tags",
            Self::InvalidPageRange => "invalid page range",
            Self::Pattern => "invalid pattern",
            Self::Document => "document error",
            Self::Cancelled => "operation cancelled",
            Self::DeadlineExceeded => "deadline exceeded",
            Self::ThreadPool => "thread pool error",
            Self::Io => "io error",
            Self::Json => "json error",
            Self::Multiple => "multiple errors",
        };
        f.write_str(name)
    }
}

/// Primary error type for sketch and document operations.
#[derive(Error, Debug)]
pub enum DossierError {
    #[error("incomplete configuration: {0}")]
    IncompleteConfig(String),

    #[error("bad configuration: {0}")]
    BadConfig(String),

    #[error("rectangle is invalid: {0}")]
    InvalidRect(String),

    #[error("node feature unavailable: {0}")]
    NodeFeatureUnavailable(String),

    #[error("node position unknown: {0}")]
    NodePositionUnknown(String),

    #[error("invalid length unit {0:?}")]
    InvalidUnit(String),

    #[error("invalid tags: {0}")]
    InvalidTags(String),

    #[error("invalid page range: {0}")]
    InvalidPageRange(String),

    #[error("compiling pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("document: {0}")]
    Document(String),

    #[error("operation cancelled")]
    Cancelled,

    #[error("deadline exceeded")]
    DeadlineExceeded,

    #[error("thread pool: {0}")]
    ThreadPool(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Independent failures collected in one pass.
    #[error("{}", .0.iter().join("; "))]
    Multiple(Vec<DossierError>),

    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<DossierError>,
    },

    /// An error of `kind` caused by `source`.
    #[error("{kind}: {context}: {source}")]
    Classified {
        kind: ErrorKind,
        context: String,
        #[source]
        source: Box<DossierError>,
    },
}

impl DossierError {
    /// Returns the kind of the outermost classified error. Context wrappers
    /// are transparent.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::IncompleteConfig(_) => ErrorKind::IncompleteConfig,
            Self::BadConfig(_) => ErrorKind::BadConfig,
            Self::InvalidRect(_) => ErrorKind::InvalidRect,
            Self::NodeFeatureUnavailable(_) => ErrorKind::NodeFeatureUnavailable,
            Self::NodePositionUnknown(_) => ErrorKind::NodePositionUnknown,
            Self::InvalidUnit(_) => ErrorKind::InvalidUnit,
            Self::InvalidTags(_) => ErrorKind::InvalidTags,
            Self::InvalidPageRange(_) => ErrorKind::InvalidPageRange,
            Self::Pattern { .. } => ErrorKind::Pattern,
            Self::Document(_) => ErrorKind::Document,
            Self::Cancelled => ErrorKind::Cancelled,
            Self::DeadlineExceeded => ErrorKind::DeadlineExceeded,
            Self::ThreadPool(_) => ErrorKind::ThreadPool,
            Self::Io(_) => ErrorKind::Io,
            Self::Json(_) => ErrorKind::Json,
            Self::Multiple(_) => ErrorKind::Multiple,
            Self::Context { source, .. } => source.kind(),
            Self::Classified { kind, .. } => *kind,
        }
    }

    /// Reports whether this error, any error it wraps or any member of an
    /// aggregate is of the given kind.
    pub fn is(&self, kind: ErrorKind) -> bool {
        match self {
            Self::Multiple(errors) => {
                kind == ErrorKind::Multiple || errors.iter().any(|e| e.is(kind))
            }
            Self::Context { source, .. } => source.is(kind),
            Self::Classified {
                kind: outer,
                source,
                ..
            } => *outer == kind || source.is(kind),
            other => other.kind() == kind,
        }
    }

    /// Wraps the error with a description of where it happened.
    pub fn context(self, context: impl Into<String>) -> Self {
        Self::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Wraps the error so it also counts as an error of `kind`.
    pub fn classify(self, kind: ErrorKind, context: impl Into<String>) -> Self {
        Self::Classified {
            kind,
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Collapses a list of errors: `None` when empty, the error itself when
    /// there is exactly one and [`DossierError::Multiple`] otherwise.
    pub fn combine(mut errors: Vec<DossierError>) -> Option<DossierError> {
        match errors.len() {
            0 => None,
            1 => errors.pop(),
            _ => Some(Self::Multiple(errors)),
        }
    }

    /// Like [`DossierError::combine`] but returning a `Result`.
    pub fn check_all(errors: Vec<DossierError>) -> Result<()> {
        match Self::combine(errors) {
            None => Ok(()),
            Some(err) => Err(err),
        }
    }
}

/// Convenience Result type alias for DossierError.
pub type Result<T> = std::result::Result<T, DossierError>;
