//! Office Open XML (OOXML) format implementation.
//!
//! The module is organized into layers:
//!
//! 1. **OPC Layer** (`opc`): package handling (ZIP, parts, relationships)
//! 2. **Format-Specific Modules**:
//!    - `pptx`: PowerPoint presentations (slide enumeration, shape fills, pictures)
//!    - `xlsx`: Excel workbooks (first worksheet as a table of cells)
//!
//! # Example
//!
//! ```rust,no_run
//! use pathtint::ooxml::pptx::Package;
//!
//! let pkg = Package::open("pathway.pptx")?;
//! println!("{} slides", pkg.slide_partnames()?.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
pub mod error;
pub mod opc;
pub mod pptx;
pub(crate) mod text;
pub mod xlsx;

// Re-export commonly used types from OPC layer
pub use opc::{OpcPackage, PackURI};

// Re-export error types
pub use error::{OoxmlError, Result};
