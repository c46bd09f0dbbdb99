//! Core module - shared infrastructure for Swarm
//!
//! This module contains foundational types, configuration, and error handling
//! used throughout the crate.

pub mod config;
pub mod error;
pub mod types;

pub use config::{Config, ToolErrorPolicy};
pub use error::{Result, SwarmError};
pub use types::*;
