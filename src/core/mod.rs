//! Core types shared across domroute
//!
//! This module provides the error types and result aliases that form the
//! backbone of the dispatch engine.

pub mod error;

// Re-export commonly used types
pub use error::{ErrorContext, HandlerError, Phase, RouterError, RouterResult};
