/// Read-only summary of the shapes on a slide.
use crate::common::RGBColor;
use crate::ooxml::error::Result;
use crate::ooxml::pptx::shapes::fill::solid_fill_color;
use crate::ooxml::pptx::shapes::textframe::TextFrame;
use crate::ooxml::pptx::shapes::OwnedEvent;
use quick_xml::events::Event;

/// Shape type enumeration, from the element name under `p:spTree`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeType {
    /// An autoshape or text box (p:sp)
    Shape,
    /// A picture shape (p:pic)
    Picture,
    /// A graphic frame containing a table or chart (p:graphicFrame)
    GraphicFrame,
    /// A group shape (p:grpSp)
    GroupShape,
    /// A connector shape (p:cxnSp)
    Connector,
    /// Unknown or unsupported shape type
    Unknown,
}

impl ShapeType {
    pub fn from_local_name(local: &[u8]) -> Self {
        match local {
            b"sp" => ShapeType::Shape,
            b"pic" => ShapeType::Picture,
            b"graphicFrame" => ShapeType::GraphicFrame,
            b"grpSp" => ShapeType::GroupShape,
            b"cxnSp" => ShapeType::Connector,
            _ => ShapeType::Unknown,
        }
    }
}

/// A shape's identity, label, and solid fill color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseShape {
    pub shape_type: ShapeType,
    /// `cNvPr/@id`
    pub id: Option<u32>,
    /// `cNvPr/@name`
    pub name: String,
    /// Stripped text of the shape's text body, None without a text body
    pub label: Option<String>,
    /// Color of a `solidFill/srgbClr` in the shape's `spPr`
    pub fill: Option<RGBColor>,
}

impl BaseShape {
    /// Summarize the shape whose subtree is `events`.
    pub fn from_events(shape_type: ShapeType, events: &[OwnedEvent]) -> Result<Self> {
        let mut id = None;
        let mut name = String::new();

        let c_nv_pr = events.iter().find_map(|event| match event {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"cNvPr" => Some(e),
            _ => None,
        });
        if let Some(e) = c_nv_pr {
            for attr in e.attributes() {
                let attr = attr?;
                match attr.key.as_ref() {
                    b"id" => id = atoi_simd::parse::<u32>(&attr.value).ok(),
                    b"name" => name = attr.unescape_value()?.into_owned(),
                    _ => {},
                }
            }
        }

        let label = TextFrame::from_shape_events(events)?.map(|frame| frame.label());

        Ok(Self {
            shape_type,
            id,
            name,
            label,
            fill: solid_fill_color(events),
        })
    }
}
