/// Slide part: shape enumeration, fill recoloring and picture insertion.
///
/// Slides are processed as quick-xml event streams. Shapes that sit directly
/// in `p:spTree` (and, on request, inside group shapes) are buffered one at a
/// time; everything else is copied to the output unchanged.
use crate::common::RGBColor;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::part::Part;
use crate::ooxml::pptx::shapes::fill::set_solid_fill;
use crate::ooxml::pptx::shapes::{
    BaseShape, NamespacePrefixes, OwnedEvent, PictureShape, ShapeType, TextFrame,
};
use quick_xml::events::Event;
use quick_xml::{Reader, Writer};
use tracing::{debug, warn};

/// Which shapes are visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShapeScope {
    /// Only shapes that are direct children of `p:spTree`
    #[default]
    TopLevel,
    /// Top-level shapes and shapes nested in group shapes at any depth
    IncludeGroups,
}

/// Outcome of looking up a shape label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelMatch {
    /// The label is not a known key
    Unmatched,
    /// The label is a known key without a color (missing value)
    NoColor,
    /// The label is a known key mapped to this color
    Color(RGBColor),
}

/// Counters from one recoloring pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecolorStats {
    /// Shapes with a text body whose label was looked up
    pub examined: usize,
    /// Shapes whose fill was replaced
    pub colored: usize,
    /// Shapes whose label matched a key that has no color
    pub matched_without_color: usize,
}

impl std::ops::AddAssign for RecolorStats {
    fn add_assign(&mut self, rhs: Self) {
        self.examined += rhs.examined;
        self.colored += rhs.colored;
        self.matched_without_color += rhs.matched_without_color;
    }
}

/// Kind of the element an event stream is currently inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
    ShapeTree,
    Group,
    Other,
}

/// A slide part's XML.
pub struct SlidePart<'a> {
    xml: &'a [u8],
}

impl<'a> SlidePart<'a> {
    pub fn from_part(part: &'a dyn Part) -> Self {
        Self { xml: part.blob() }
    }

    pub fn from_xml(xml: &'a [u8]) -> Self {
        Self { xml }
    }

    /// Summaries of the shapes directly in `p:spTree`, in document order.
    pub fn shapes(&self) -> Result<Vec<BaseShape>> {
        let mut shapes = Vec::new();
        let is_shape = |shape_type: ShapeType| shape_type != ShapeType::Unknown;
        self.walk_shapes(ShapeScope::TopLevel, is_shape, None, |shape_type, events| {
            shapes.push(BaseShape::from_events(shape_type, &events)?);
            Ok(events)
        })?;
        Ok(shapes)
    }

    /// Next free shape id: one more than the largest numeric `id` attribute in the slide.
    pub fn next_shape_id(&self) -> Result<u32> {
        let mut reader = Reader::from_reader(self.xml);
        let mut max_id = 0u32;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                    for attr in e.attributes().flatten() {
                        if attr.key.as_ref() == b"id"
                            && let Ok(id) = atoi_simd::parse::<u32>(&attr.value)
                        {
                            max_id = max_id.max(id);
                        }
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(OoxmlError::Xml(e.to_string())),
                _ => {},
            }
        }

        Ok(max_id + 1)
    }

    /// Set a solid fill on every `p:sp` whose label `lookup` maps to a color.
    ///
    /// Shapes without a text body are not looked up. Returns the rewritten
    /// slide XML, which is byte-identical to the input when nothing matched.
    pub fn recolor_shapes<F>(&self, scope: ShapeScope, mut lookup: F) -> Result<(Vec<u8>, RecolorStats)>
    where
        F: FnMut(&str) -> LabelMatch,
    {
        let ns = NamespacePrefixes::from_xml(self.xml)?;
        let mut stats = RecolorStats::default();
        let writer = Writer::new(Vec::with_capacity(self.xml.len() + 256));

        let xml = self.walk_shapes(
            scope,
            |shape_type| shape_type == ShapeType::Shape,
            Some(writer),
            |_, events| {
                let Some(frame) = TextFrame::from_shape_events(&events)? else {
                    return Ok(events);
                };
                let label = frame.label();
                stats.examined += 1;

                match lookup(&label) {
                    LabelMatch::Unmatched => Ok(events),
                    LabelMatch::NoColor => {
                        debug!(%label, "label matched a key without a value, fill unchanged");
                        stats.matched_without_color += 1;
                        Ok(events)
                    },
                    LabelMatch::Color(color) => match set_solid_fill(&events, color, &ns) {
                        Some(filled) => {
                            debug!(%label, %color, "shape filled");
                            stats.colored += 1;
                            Ok(filled)
                        },
                        None => {
                            warn!(%label, "shape has no shape properties, fill unchanged");
                            Ok(events)
                        },
                    },
                }
            },
        )?;

        Ok((xml.unwrap_or_default(), stats))
    }

    /// Slide XML with `picture` appended to the shape tree, before `p:extLst` if present.
    pub fn with_picture(&self, picture: &PictureShape) -> Result<Vec<u8>> {
        let ns = NamespacePrefixes::from_xml(self.xml)?;
        let pic_xml = picture.to_xml(&ns)?;

        let mut reader = Reader::from_reader(self.xml);
        let mut writer = Writer::new(Vec::with_capacity(self.xml.len() + pic_xml.len()));
        let mut stack: Vec<Container> = Vec::new();
        let mut inserted = false;

        loop {
            let event = reader
                .read_event()
                .map_err(|e| OoxmlError::Xml(e.to_string()))?;

            match &event {
                Event::Start(e) | Event::Empty(e)
                    if !inserted
                        && stack.last() == Some(&Container::ShapeTree)
                        && e.local_name().as_ref() == b"extLst" =>
                {
                    writer.get_mut().extend_from_slice(pic_xml.as_bytes());
                    inserted = true;
                },
                Event::End(_) if !inserted && stack.last() == Some(&Container::ShapeTree) => {
                    writer.get_mut().extend_from_slice(pic_xml.as_bytes());
                    inserted = true;
                },
                Event::Eof => break,
                _ => {},
            }

            match &event {
                Event::Start(e) => stack.push(if e.local_name().as_ref() == b"spTree" {
                    Container::ShapeTree
                } else {
                    Container::Other
                }),
                Event::End(_) => {
                    stack.pop();
                },
                _ => {},
            }

            writer
                .write_event(event)
                .map_err(|e| OoxmlError::Xml(e.to_string()))?;
        }

        if !inserted {
            return Err(OoxmlError::InvalidFormat("slide has no p:spTree".to_string()));
        }

        Ok(writer.into_inner())
    }

    /// Stream the slide, handing the buffered subtree of every shape that
    /// `buffer` selects (within `scope`) to `visit`, and writing the events it
    /// returns to `sink` in place of the original.
    fn walk_shapes<B, V>(
        &self,
        scope: ShapeScope,
        buffer: B,
        mut sink: Option<Writer<Vec<u8>>>,
        mut visit: V,
    ) -> Result<Option<Vec<u8>>>
    where
        B: Fn(ShapeType) -> bool,
        V: FnMut(ShapeType, Vec<OwnedEvent>) -> Result<Vec<OwnedEvent>>,
    {
        let mut reader = Reader::from_reader(self.xml);
        let mut stack: Vec<Container> = Vec::new();

        let in_scope = |stack: &[Container]| match stack.last() {
            Some(Container::ShapeTree) => true,
            Some(Container::Group) => scope == ShapeScope::IncludeGroups,
            _ => false,
        };

        loop {
            let event = reader
                .read_event()
                .map_err(|e| OoxmlError::Xml(e.to_string()))?;

            let replacement = match &event {
                Event::Eof => break,
                Event::Start(e) | Event::Empty(e) => {
                    let local = e.local_name();
                    let shape_type = ShapeType::from_local_name(local.as_ref());
                    if in_scope(&stack) && buffer(shape_type) {
                        let is_empty = matches!(event, Event::Empty(_));
                        let mut events = vec![event.clone().into_owned()];
                        if !is_empty {
                            Self::buffer_subtree(&mut reader, &mut events)?;
                        }
                        Some(visit(shape_type, events)?)
                    } else {
                        if matches!(event, Event::Start(_)) {
                            stack.push(match local.as_ref() {
                                b"spTree" => Container::ShapeTree,
                                b"grpSp" if in_scope(&stack) => Container::Group,
                                _ => Container::Other,
                            });
                        }
                        None
                    }
                },
                Event::End(_) => {
                    stack.pop();
                    None
                },
                _ => None,
            };

            if let Some(writer) = sink.as_mut() {
                match replacement {
                    Some(events) => {
                        for e in events {
                            writer
                                .write_event(e)
                                .map_err(|e| OoxmlError::Xml(e.to_string()))?;
                        }
                    },
                    None => writer
                        .write_event(event)
                        .map_err(|e| OoxmlError::Xml(e.to_string()))?,
                }
            }
        }

        Ok(sink.map(Writer::into_inner))
    }

    /// Read events up to and including the end tag matching an already
    /// buffered start tag.
    fn buffer_subtree(reader: &mut Reader<&[u8]>, events: &mut Vec<OwnedEvent>) -> Result<()> {
        let mut depth = 1usize;
        while depth > 0 {
            let event = reader
                .read_event()
                .map_err(|e| OoxmlError::Xml(e.to_string()))?;
            match event {
                Event::Start(_) => depth += 1,
                Event::End(_) => depth -= 1,
                Event::Eof => {
                    return Err(OoxmlError::InvalidFormat("unterminated shape element".to_string()));
                },
                _ => {},
            }
            events.push(event.into_owned());
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const SLIDE: &str = concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        "\n",
        r#"<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">"#,
        r#"<p:cSld><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/>"#,
        r#"<p:sp><p:nvSpPr><p:cNvPr id="2" name="A"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr><p:spPr><a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr><p:txBody><a:bodyPr/><a:p><a:r><a:t>GeneA</a:t></a:r></a:p></p:txBody></p:sp>"#,
        r#"<p:sp><p:nvSpPr><p:cNvPr id="3" name="B"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr><p:spPr/><p:txBody><a:bodyPr/><a:p><a:r><a:t> GeneB </a:t></a:r></a:p></p:txBody></p:sp>"#,
        r#"<p:grpSp><p:nvGrpSpPr><p:cNvPr id="10" name="Group"/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/>"#,
        r#"<p:sp><p:nvSpPr><p:cNvPr id="11" name="Inner"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr><p:spPr/><p:txBody><a:p><a:r><a:t>GeneA</a:t></a:r></a:p></p:txBody></p:sp>"#,
        r#"</p:grpSp>"#,
        r#"<p:cxnSp><p:nvCxnSpPr><p:cNvPr id="4" name="Line"/><p:cNvCxnSpPr/><p:nvPr/></p:nvCxnSpPr><p:spPr/></p:cxnSp>"#,
        r#"</p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>"#
    );

    fn lookup(label: &str) -> LabelMatch {
        match label {
            "GeneA" => LabelMatch::Color(RGBColor::new(0x44, 0x01, 0x54)),
            "GeneB" => LabelMatch::NoColor,
            _ => LabelMatch::Unmatched,
        }
    }

    #[test]
    fn test_shapes_lists_top_level() {
        let shapes = SlidePart::from_xml(SLIDE.as_bytes()).shapes().unwrap();
        let kinds: Vec<ShapeType> = shapes.iter().map(|s| s.shape_type).collect();
        assert_eq!(
            kinds,
            vec![ShapeType::Shape, ShapeType::Shape, ShapeType::GroupShape, ShapeType::Connector]
        );
        assert_eq!(shapes[1].label.as_deref(), Some("GeneB"));
        assert_eq!(shapes[3].label, None);
    }

    #[test]
    fn test_next_shape_id() {
        assert_eq!(SlidePart::from_xml(SLIDE.as_bytes()).next_shape_id().unwrap(), 12);
    }

    #[test]
    fn test_recolor_top_level_only() {
        let slide = SlidePart::from_xml(SLIDE.as_bytes());
        let (xml, stats) = slide.recolor_shapes(ShapeScope::TopLevel, lookup).unwrap();

        assert_eq!(
            stats,
            RecolorStats {
                examined: 2,
                colored: 1,
                matched_without_color: 1
            }
        );

        let shapes = SlidePart::from_xml(&xml).shapes().unwrap();
        assert_eq!(shapes[0].fill, Some(RGBColor::new(0x44, 0x01, 0x54)));
        assert_eq!(shapes[1].fill, None);

        let text = String::from_utf8(xml).unwrap();
        assert_eq!(text.matches("440154").count(), 1);
        assert!(text.starts_with(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#));
    }

    #[test]
    fn test_recolor_includes_groups() {
        let slide = SlidePart::from_xml(SLIDE.as_bytes());
        let (xml, stats) = slide.recolor_shapes(ShapeScope::IncludeGroups, lookup).unwrap();

        assert_eq!(stats.examined, 3);
        assert_eq!(stats.colored, 2);
        assert_eq!(String::from_utf8(xml).unwrap().matches("440154").count(), 2);
    }

    #[test]
    fn test_recolor_without_match_is_identity() {
        let slide = SlidePart::from_xml(SLIDE.as_bytes());
        let (xml, stats) = slide
            .recolor_shapes(ShapeScope::IncludeGroups, |_| LabelMatch::Unmatched)
            .unwrap();
        assert_eq!(stats.colored, 0);
        assert_eq!(xml, SLIDE.as_bytes());
    }

    #[test]
    fn test_with_picture_appends_to_shape_tree() {
        let slide = SlidePart::from_xml(SLIDE.as_bytes());
        let pic = PictureShape::new(12, "rId2".to_string(), "legend.png".to_string());
        let xml = String::from_utf8(slide.with_picture(&pic).unwrap()).unwrap();

        let pic_at = xml.find("<p:pic>").unwrap();
        let tree_end = xml.find("</p:spTree>").unwrap();
        assert!(pic_at < tree_end);
        assert!(pic_at > xml.find("</p:cxnSp>").unwrap());

        let shapes = SlidePart::from_xml(xml.as_bytes()).shapes().unwrap();
        let last = shapes.last().unwrap();
        assert_eq!(last.shape_type, ShapeType::Picture);
        assert_eq!(last.id, Some(12));
        assert_eq!(last.name, "Picture 11");
    }

    #[test]
    fn test_with_picture_before_ext_lst() {
        let xml = r#"<p:sld xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cSld><p:spTree><p:grpSpPr/><p:extLst><p:ext uri="x"/></p:extLst></p:spTree></p:cSld></p:sld>"#;
        let pic = PictureShape::new(2, "rId1".to_string(), "legend.png".to_string());
        let out = String::from_utf8(SlidePart::from_xml(xml.as_bytes()).with_picture(&pic).unwrap())
            .unwrap();

        assert!(out.find("<p:pic").unwrap() < out.find("<p:extLst>").unwrap());
        // DrawingML and relationships prefixes are declared on the picture itself
        assert!(out.contains(r#"<p:pic xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main""#));
    }

    #[test]
    fn test_with_picture_requires_shape_tree() {
        let pic = PictureShape::new(2, "rId1".to_string(), "legend.png".to_string());
        let result = SlidePart::from_xml(
            br#"<p:sld xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"/>"#,
        ).with_picture(&pic);
        assert!(matches!(result, Err(OoxmlError::InvalidFormat(_))));
    }
}
