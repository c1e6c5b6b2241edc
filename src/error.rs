//! Error types for cache and workload configuration.
//!
//! Cache and generator operations are total: a miss is `None`, evicting an
//! empty cache is a no-op. Errors only arise when configuration input is
//! parsed or validated, so that an unknown strategy or pattern name fails
//! fast instead of silently falling back to a default.

use thiserror::Error;

/// Errors raised while configuring a cache or access-pattern generator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// An eviction strategy name was not recognised.
    #[error("Unknown eviction strategy: {0}")]
    UnknownStrategy(String),

    /// An access pattern name was not recognised.
    #[error("Unknown access pattern: {0}")]
    UnknownPattern(String),

    /// A configuration value is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result alias used by configuration parsing.
pub type Result<T> = core::result::Result<T, CacheError>;
