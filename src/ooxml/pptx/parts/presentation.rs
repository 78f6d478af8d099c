/// Presentation part - the main part in a .pptx package.
///
/// Corresponds to `/ppt/presentation.xml` in the package.
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::part::Part;
use quick_xml::Reader;
use quick_xml::events::Event;

/// The main presentation part.
///
/// Holds the ordered slide list (`p:sldIdLst`) and the slide size.
pub struct PresentationPart<'a> {
    part: &'a dyn Part,
}

impl<'a> PresentationPart<'a> {
    pub fn from_part(part: &'a dyn Part) -> Self {
        Self { part }
    }

    /// Relationship IDs of the slides, in presentation order.
    ///
    /// These are the `r:id` attributes of `p:sldId` elements; the unprefixed
    /// `id` attribute is the slide's numeric identifier and is skipped.
    pub fn slide_rids(&self) -> Result<Vec<String>> {
        let mut reader = Reader::from_reader(self.part.blob());
        let mut rids = Vec::new();

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) | Ok(Event::Empty(e)) if e.local_name().as_ref() == b"sldId" => {
                    for attr in e.attributes() {
                        let attr = attr?;
                        if attr.key.prefix().is_some() && attr.key.local_name().as_ref() == b"id" {
                            rids.push(attr.unescape_value()?.into_owned());
                            break;
                        }
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(OoxmlError::Xml(e.to_string())),
                _ => {},
            }
        }

        Ok(rids)
    }

    /// Slide width and height in EMUs (`p:sldSz`), None if not declared.
    pub fn slide_size(&self) -> Result<Option<(i64, i64)>> {
        let mut reader = Reader::from_reader(self.part.blob());

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) | Ok(Event::Empty(e)) if e.local_name().as_ref() == b"sldSz" => {
                    let mut cx = None;
                    let mut cy = None;
                    for attr in e.attributes() {
                        let attr = attr?;
                        let value = || {
                            atoi_simd::parse::<i64>(&attr.value).map_err(|e| {
                                OoxmlError::Xml(format!("Invalid slide size: {}", e))
                            })
                        };
                        match attr.key.as_ref() {
                            b"cx" => cx = Some(value()?),
                            b"cy" => cy = Some(value()?),
                            _ => {},
                        }
                    }
                    return Ok(cx.zip(cy));
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(OoxmlError::Xml(e.to_string())),
                _ => {},
            }
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::PackURI;
    use crate::ooxml::opc::part::XmlPart;

    fn presentation_part(xml: &str) -> XmlPart {
        XmlPart::new(
            PackURI::new("/ppt/presentation.xml").unwrap(),
            "application/xml".to_string(),
            xml.as_bytes().to_vec(),
        )
    }

    #[test]
    fn test_slide_rids_in_order() {
        let part = presentation_part(
            r#"<p:presentation xmlns:p="p" xmlns:r="r"><p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst>
            <p:sldIdLst><p:sldId id="257" r:id="rId7"/><p:sldId id="256" r:id="slideB"/></p:sldIdLst>
            <p:sldSz cx="12192000" cy="6858000"/></p:presentation>"#,
        );
        let pres = PresentationPart::from_part(&part);

        assert_eq!(pres.slide_rids().unwrap(), vec!["rId7", "slideB"]);
        assert_eq!(pres.slide_size().unwrap(), Some((12_192_000, 6_858_000)));
    }

    #[test]
    fn test_empty_presentation() {
        let part = presentation_part(r#"<p:presentation xmlns:p="p"/>"#);
        let pres = PresentationPart::from_part(&part);
        assert!(pres.slide_rids().unwrap().is_empty());
        assert_eq!(pres.slide_size().unwrap(), None);
    }
}
