//! Style primitives.

pub mod color;

pub use color::RGBColor;
