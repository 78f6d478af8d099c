//! pathtint - color the shapes of a pathway diagram by measured values
//!
//! Reads a table of entity values (`.csv` or `.xlsx`), maps each value
//! through a colormap, fills every shape of a `.pptx` presentation whose text
//! names an entity, and places a colorbar legend on each slide.
//!
//! # Features
//!
//! - **Tables**: CSV and the first worksheet of an XLSX workbook, with
//!   missing-value markers (`NA`, `NaN`, `#N/A`, ...) recognized
//! - **Colormaps**: 38 named palettes (`_r` reverses them) or explicit color stops
//! - **Legends**: vertical and horizontal colorbar PNGs with tick labels
//! - **Presentations**: in-place shape fills and picture insertion that keep
//!   everything else in the package untouched
//!
//! # Example
//!
//! ```no_run
//! use pathtint::annotate::{RunOptions, run};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let options = RunOptions::new("expression.csv", "pathway.pptx", "annotated.pptx");
//! let report = run(&options)?;
//! println!("{} shapes colored on {} slides", report.shapes_colored, report.slides);
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Coloring by hand
//!
//! ```no_run
//! use pathtint::colormap::{Colormap, GradientSpec, map_color};
//! use pathtint::ooxml::pptx::{LabelMatch, Package, ShapeScope};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cmap = Colormap::from_spec(&GradientSpec::Named("plasma".into()), 100)?;
//! let mut pkg = Package::open("pathway.pptx")?;
//!
//! for slide in pkg.slide_partnames()? {
//!     pkg.recolor_slide(&slide, ShapeScope::TopLevel, |label: &str| {
//!         if label == "EGFR" {
//!             map_color(Some(2.5), 0.0, 5.0, &cmap).map_or(LabelMatch::NoColor, LabelMatch::Color)
//!         } else {
//!             LabelMatch::Unmatched
//!         }
//!     })?;
//! }
//! pkg.save("annotated.pptx")?;
//! # Ok(())
//! # }
//! ```

/// End-to-end pipeline and its report
pub mod annotate;

/// Named palettes, explicit gradients and value normalization
pub mod colormap;

/// Shared error type, colors and unit conversion
pub mod common;

/// YAML configuration
pub mod config;

/// Colorbar rendering
pub mod legend;

/// OOXML packages: presentations and workbooks
///
/// The presentation side edits slides as XML event streams; the workbook side
/// only reads the first worksheet.
pub mod ooxml;

/// Tabular input and the entity-value lookup
pub mod sheet;

// Re-export commonly used types for convenience
pub use annotate::{AnnotationReport, RunOptions, run};
pub use common::{Error, RGBColor, Result};
