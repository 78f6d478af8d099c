//! Unified error types for pathtint.
//!
//! This module provides a unified error type that encompasses errors from the
//! package layer, the tabular readers, the colormap builder and the legend
//! renderer, presenting a consistent API to callers.

// Submodule declarations
pub mod conversions;
pub mod types;

// Re-exports
pub use types::{Error, Result};
