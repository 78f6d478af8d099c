/// Parts for PowerPoint presentation documents.
///
/// Wrapper types over the XML parts of a .pptx package.
pub mod presentation;
pub mod slide;

pub use presentation::PresentationPart;
pub use slide::{LabelMatch, RecolorStats, ShapeScope, SlidePart};
