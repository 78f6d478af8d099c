/// Open Packaging Conventions (OPC) implementation.
///
/// This module reads an OPC package (the ZIP container behind .pptx and .xlsx
/// files) into an in-memory graph of parts and relationships, lets callers
/// replace part content or add new parts, and serializes the graph back into a
/// ZIP archive. It includes:
///
/// - Package structure (parts, relationships)
/// - Content type management
/// - ZIP-based physical packaging through the `zip` crate
pub mod constants;
pub mod error;
pub mod package;
pub mod packuri;
pub mod part;
pub mod phys_pkg;
pub mod pkgreader;
pub mod pkgwriter;
pub mod rel;

// Re-export commonly used types
pub use package::OpcPackage;
pub use packuri::PackURI;
pub use part::{BlobPart, Part, XmlPart};
pub use rel::{Relationship, Relationships};
