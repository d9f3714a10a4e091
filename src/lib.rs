//! This module contains the core logic of the domroute page dispatcher.
//!
//! It defines the main modules for configuration, page identifier
//! resolution, and route dispatch.

pub mod config;
pub mod core;
pub mod logging;
pub mod resolver;
pub mod router;
pub mod routes;
