//! PowerPoint (.pptx) presentation support.
//!
//! Enough of PresentationML to recolor labeled shapes and add pictures to
//! slides, on top of the OPC package layer:
//!
//! - `Package`: the .pptx package, slide enumeration, image and picture insertion
//! - `parts`: the presentation part (`p:sldIdLst`, `p:sldSz`) and slide parts
//! - `shapes`: shape summaries, text frames, solid fills and picture elements
//!
//! # Example
//!
//! ```rust,no_run
//! use pathtint::common::RGBColor;
//! use pathtint::ooxml::pptx::{LabelMatch, Package, ShapeScope};
//!
//! let mut pkg = Package::open("pathway.pptx")?;
//! for slide in pkg.slide_partnames()? {
//!     pkg.recolor_slide(&slide, ShapeScope::TopLevel, |label| match label {
//!         "EGFR" => LabelMatch::Color(RGBColor::new(0x44, 0x01, 0x54)),
//!         _ => LabelMatch::Unmatched,
//!     })?;
//! }
//! pkg.save("pathway-colored.pptx")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod package;
pub mod parts;
pub mod shapes;

pub use package::{ImageRef, Package};
pub use parts::{LabelMatch, RecolorStats, ShapeScope, SlidePart};
pub use shapes::{BaseShape, PictureShape, ShapeType};
