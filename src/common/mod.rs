//! Common types and utilities shared across the package, tabular and legend layers.

// Submodule declarations
pub mod error;
pub mod style;
pub mod unit;

// Re-exports for convenience
pub use error::{Error, Result};
pub use style::RGBColor;
