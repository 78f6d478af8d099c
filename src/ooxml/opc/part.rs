use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::PackURI;
use crate::ooxml::opc::rel::Relationships;
use quick_xml::Reader;
/// Open Packaging Convention (OPC) objects related to package parts.
///
/// Parts are the units of content in an OPC package, each with a unique
/// partname, a content type, content bytes, and optional relationships.
use std::fmt::Debug;

/// Trait representing a part in an OPC package.
pub trait Part: Debug {
    /// Get the partname of this part.
    fn partname(&self) -> &PackURI;

    /// Get the content type of this part.
    fn content_type(&self) -> &str;

    /// Get the binary content of this part.
    fn blob(&self) -> &[u8];

    /// Replace the content of this part.
    fn set_blob(&mut self, blob: Vec<u8>);

    /// Get the relationships for this part.
    fn rels(&self) -> &Relationships;

    /// Get mutable access to the relationships for this part.
    fn rels_mut(&mut self) -> &mut Relationships;

    /// Relate this part to `target`, reusing an existing relationship of the
    /// same type. Returns the rId.
    fn relate_to(&mut self, target: &PackURI, reltype: &str) -> String {
        let target_ref = target.relative_ref(self.partname().base_uri());
        self.rels_mut().get_or_add(reltype, &target_ref)
    }

    /// Absolute partname behind the relationship `r_id`.
    fn related_partname(&self, r_id: &str) -> Result<PackURI> {
        self.rels()
            .get(r_id)
            .ok_or_else(|| {
                OpcError::RelationshipNotFound(format!("{} in {}", r_id, self.partname()))
            })?
            .target_partname()
    }
}

/// A part holding opaque binary content, such as an image.
#[derive(Debug)]
pub struct BlobPart {
    partname: PackURI,
    content_type: String,
    blob: Vec<u8>,
    rels: Relationships,
}

impl BlobPart {
    pub fn new(partname: PackURI, content_type: String, blob: Vec<u8>) -> Self {
        let rels = Relationships::new(partname.base_uri().to_string());
        Self {
            partname,
            content_type,
            blob,
            rels,
        }
    }
}

impl Part for BlobPart {
    fn partname(&self) -> &PackURI {
        &self.partname
    }

    fn content_type(&self) -> &str {
        &self.content_type
    }

    fn blob(&self) -> &[u8] {
        &self.blob
    }

    fn set_blob(&mut self, blob: Vec<u8>) {
        self.blob = blob;
    }

    fn rels(&self) -> &Relationships {
        &self.rels
    }

    fn rels_mut(&mut self) -> &mut Relationships {
        &mut self.rels
    }
}

/// An XML part. The content is validated as UTF-8 when loaded and parsed
/// on demand with quick-xml.
#[derive(Debug)]
pub struct XmlPart {
    partname: PackURI,
    content_type: String,
    xml_bytes: Vec<u8>,
    rels: Relationships,
}

impl XmlPart {
    pub fn new(partname: PackURI, content_type: String, xml_bytes: Vec<u8>) -> Self {
        let rels = Relationships::new(partname.base_uri().to_string());
        Self {
            partname,
            content_type,
            xml_bytes,
            rels,
        }
    }

    /// Load an XML part, rejecting content that is not UTF-8.
    pub fn load(partname: PackURI, content_type: String, xml_bytes: Vec<u8>) -> Result<Self> {
        std::str::from_utf8(&xml_bytes)
            .map_err(|e| OpcError::XmlError(format!("Invalid UTF-8 in {}: {}", partname, e)))?;

        Ok(Self::new(partname, content_type, xml_bytes))
    }

    /// A quick-xml reader over the part content.
    pub fn reader(&self) -> Reader<&[u8]> {
        Reader::from_reader(self.xml_bytes.as_slice())
    }
}

impl Part for XmlPart {
    fn partname(&self) -> &PackURI {
        &self.partname
    }

    fn content_type(&self) -> &str {
        &self.content_type
    }

    fn blob(&self) -> &[u8] {
        &self.xml_bytes
    }

    fn set_blob(&mut self, blob: Vec<u8>) {
        self.xml_bytes = blob;
    }

    fn rels(&self) -> &Relationships {
        &self.rels
    }

    fn rels_mut(&mut self) -> &mut Relationships {
        &mut self.rels
    }
}

/// Selects the Part implementation for a content type.
pub struct PartFactory;

impl PartFactory {
    /// Load a part, as an XmlPart for XML content types and a BlobPart otherwise.
    pub fn load(partname: PackURI, content_type: String, blob: Vec<u8>) -> Result<Box<dyn Part>> {
        if Self::is_xml_content_type(&content_type) {
            Ok(Box::new(XmlPart::load(partname, content_type, blob)?))
        } else {
            Ok(Box::new(BlobPart::new(partname, content_type, blob)))
        }
    }

    #[inline]
    fn is_xml_content_type(content_type: &str) -> bool {
        content_type.ends_with("+xml") || content_type.ends_with("/xml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::constants::relationship_type;

    #[test]
    fn test_part_factory_dispatch() {
        let png = PartFactory::load(
            PackURI::new("/ppt/media/image1.png").unwrap(),
            "image/png".to_string(),
            vec![0x89, b'P', b'N', b'G'],
        )
        .unwrap();
        assert_eq!(png.blob(), &[0x89, b'P', b'N', b'G']);

        let bad_xml = PartFactory::load(
            PackURI::new("/ppt/slides/slide1.xml").unwrap(),
            "application/xml".to_string(),
            vec![0xff, 0xfe],
        );
        assert!(bad_xml.is_err());
    }

    #[test]
    fn test_relate_to_uses_relative_target() {
        let mut slide = XmlPart::new(
            PackURI::new("/ppt/slides/slide1.xml").unwrap(),
            "application/xml".to_string(),
            b"<p:sld/>".to_vec(),
        );
        let image = PackURI::new("/ppt/media/image1.png").unwrap();

        let r_id = slide.relate_to(&image, relationship_type::IMAGE);
        assert_eq!(slide.rels().get(&r_id).unwrap().target_ref(), "../media/image1.png");
        assert_eq!(slide.related_partname(&r_id).unwrap(), image);
        assert_eq!(slide.relate_to(&image, relationship_type::IMAGE), r_id);
    }

    #[test]
    fn test_set_blob_replaces_content() {
        let mut part = XmlPart::new(
            PackURI::new("/ppt/slides/slide1.xml").unwrap(),
            "application/xml".to_string(),
            b"<a/>".to_vec(),
        );
        part.set_blob(b"<b/>".to_vec());
        assert_eq!(part.blob(), b"<b/>");
    }
}
