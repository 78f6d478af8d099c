//! Shape-level PresentationML helpers.
//!
//! Slides are edited as streams of quick-xml events. A shape is buffered as the
//! owned events of its subtree, inspected (label, fill), optionally rewritten,
//! and written back. Everything outside the buffered shapes is copied through
//! untouched.

pub mod base;
pub mod fill;
pub mod picture;
pub mod textframe;

pub use base::{BaseShape, ShapeType};
pub use picture::PictureShape;
pub use textframe::TextFrame;

use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::constants::namespace;
use quick_xml::events::{BytesStart, Event};

/// An event that owns its content, used for buffered shape subtrees.
pub(crate) type OwnedEvent = Event<'static>;

/// Prefixes bound to the DrawingML, PresentationML and relationships
/// namespaces on a part's root element.
///
/// Namespaces the root does not declare fall back to the conventional `a`,
/// `p` and `r` prefixes and are declared locally on each inserted element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespacePrefixes {
    a: String,
    p: String,
    r: String,
    undeclared: Vec<(&'static str, &'static str)>,
}

impl Default for NamespacePrefixes {
    fn default() -> Self {
        Self {
            a: "a".to_string(),
            p: "p".to_string(),
            r: "r".to_string(),
            undeclared: Vec::new(),
        }
    }
}

impl NamespacePrefixes {
    /// Resolve prefixes from the `xmlns` declarations on `root`.
    pub fn from_root(root: &BytesStart<'_>) -> Result<Self> {
        let mut a = None;
        let mut p = None;
        let mut r = None;

        for attr in root.attributes() {
            let attr = attr?;
            let key = attr.key.as_ref();
            let prefix = if key == b"xmlns" {
                ""
            } else if let Some(prefix) = key.strip_prefix(b"xmlns:") {
                std::str::from_utf8(prefix)?
            } else {
                continue;
            };

            match attr.value.as_ref() {
                v if v == namespace::DML_MAIN.as_bytes() => a = Some(prefix.to_string()),
                v if v == namespace::PML_MAIN.as_bytes() => p = Some(prefix.to_string()),
                // Attributes never take the default namespace
                v if v == namespace::OFC_RELATIONSHIPS.as_bytes() && !prefix.is_empty() => {
                    r = Some(prefix.to_string())
                },
                _ => {},
            }
        }

        let mut undeclared = Vec::new();
        let mut resolve = |found: Option<String>, fallback: &'static str, uri: &'static str| {
            found.unwrap_or_else(|| {
                undeclared.push((fallback, uri));
                fallback.to_string()
            })
        };
        let a = resolve(a, "a", namespace::DML_MAIN);
        let p = resolve(p, "p", namespace::PML_MAIN);
        let r = resolve(r, "r", namespace::OFC_RELATIONSHIPS);

        Ok(Self { a, p, r, undeclared })
    }

    /// Find the root element of `xml` and resolve its prefixes.
    pub fn from_xml(xml: &[u8]) -> Result<Self> {
        let mut reader = quick_xml::Reader::from_reader(xml);
        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => return Self::from_root(e),
                Ok(Event::Eof) => {
                    return Err(OoxmlError::InvalidFormat("part has no root element".to_string()));
                },
                Err(e) => return Err(OoxmlError::Xml(e.to_string())),
                _ => {},
            }
        }
    }

    /// DrawingML qualified name, e.g. `a:solidFill`.
    pub fn a(&self, local: &str) -> String {
        qualify(&self.a, local)
    }

    /// PresentationML qualified name, e.g. `p:pic`.
    pub fn p(&self, local: &str) -> String {
        qualify(&self.p, local)
    }

    /// Relationships-namespace attribute name, e.g. `r:embed`.
    pub fn r(&self, local: &str) -> String {
        qualify(&self.r, local)
    }

    /// ` xmlns:x="..."` declarations for namespaces missing from the root.
    pub fn local_declarations(&self) -> String {
        self.undeclared
            .iter()
            .map(|(prefix, uri)| format!(r#" xmlns:{}="{}""#, prefix, uri))
            .collect()
    }

    /// Local declaration for the DrawingML namespace only, if it is missing from the root.
    pub(crate) fn dml_declaration(&self) -> Option<(String, &'static str)> {
        self.undeclared
            .iter()
            .find(|(_, uri)| *uri == namespace::DML_MAIN)
            .map(|(prefix, uri)| (format!("xmlns:{}", prefix), *uri))
    }
}

#[inline]
fn qualify(prefix: &str, local: &str) -> String {
    if prefix.is_empty() {
        local.to_string()
    } else {
        format!("{}:{}", prefix, local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixes_from_conventional_root() {
        let xml = br#"<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"/>"#;
        let ns = NamespacePrefixes::from_xml(xml).unwrap();
        assert_eq!(ns, NamespacePrefixes::default());
        assert_eq!(ns.a("solidFill"), "a:solidFill");
        assert_eq!(ns.local_declarations(), "");
    }

    #[test]
    fn test_prefixes_custom_and_missing() {
        let xml = br#"<sld xmlns="http://schemas.openxmlformats.org/presentationml/2006/main" xmlns:d="http://schemas.openxmlformats.org/drawingml/2006/main"/>"#;
        let ns = NamespacePrefixes::from_xml(xml).unwrap();
        assert_eq!(ns.p("pic"), "pic");
        assert_eq!(ns.a("blip"), "d:blip");
        assert_eq!(ns.r("embed"), "r:embed");
        assert_eq!(
            ns.local_declarations(),
            r#" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships""#
        );
        assert!(ns.dml_declaration().is_none());
    }
}
