//! Unified error handling for domroute
//!
//! This module provides a centralized error type system so that the router,
//! resolver, and configuration modules do not depend on each other for error
//! handling.

use std::fmt;

/// Boxed error returned by a route's lifecycle functions.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Lifecycle phase during which a handler error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Init,
    Finalize,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Init => write!(f, "init"),
            Phase::Finalize => write!(f, "finalize"),
        }
    }
}

/// Unified error types for the dispatch system
#[derive(Debug)]
pub enum RouterError {
    /// Configuration-related errors: missing reserved route, duplicate route
    /// keys, unreadable or invalid configuration files, unknown route names
    Configuration(String),

    /// A route lifecycle function returned an error; dispatch stops at the
    /// failing handler and the remaining sequence is skipped
    Handler {
        route: String,
        phase: Phase,
        source: HandlerError,
    },

    /// File I/O errors (document and configuration reads)
    Io(std::io::Error),
}

impl fmt::Display for RouterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouterError::Configuration(msg) => write!(f, "Configuration error: {msg}"),
            RouterError::Handler {
                route,
                phase,
                source,
            } => write!(f, "Route '{route}' {phase} failed: {source}"),
            RouterError::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for RouterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RouterError::Handler { source, .. } => Some(source.as_ref()),
            RouterError::Io(err) => Some(err),
            _ => None,
        }
    }
}

// Error conversions
impl From<std::io::Error> for RouterError {
    fn from(err: std::io::Error) -> Self {
        RouterError::Io(err)
    }
}

/// Result type alias for dispatch operations
pub type RouterResult<T> = std::result::Result<T, RouterError>;

/// Helper trait for adding context to errors
pub trait ErrorContext<T> {
    fn with_context(self, context: &str) -> RouterResult<T>;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: fmt::Display,
{
    fn with_context(self, context: &str) -> RouterResult<T> {
        self.map_err(|e| RouterError::Configuration(format!("{context}: {e}")))
    }
}
