/// Text frame reading for shapes.
///
/// A shape's label is the text of its `p:txBody`: paragraphs joined by `\n`,
/// line breaks (`a:br`) rendered as vertical tab, run and field text
/// concatenated within a paragraph.
use crate::ooxml::error::Result;
use crate::ooxml::pptx::shapes::OwnedEvent;
use crate::ooxml::text::push_reference;
use quick_xml::events::Event;

/// Line break inside a paragraph.
const LINE_BREAK: char = '\x0b';

/// The text frame of a single shape, built from its buffered events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFrame {
    paragraphs: Vec<String>,
}

impl TextFrame {
    /// Read the text frame of the shape whose subtree is `events`.
    ///
    /// `events[0]` is the shape's own start tag. Returns None when the shape
    /// has no `txBody` child.
    pub fn from_shape_events(events: &[OwnedEvent]) -> Result<Option<Self>> {
        let mut depth = 0usize;
        let mut in_body = false;
        let mut in_para = false;
        let mut in_text = false;
        let mut found = false;
        let mut paragraphs = Vec::new();
        let mut current = String::new();

        for event in events {
            match event {
                Event::Start(e) => {
                    match (depth, e.local_name().as_ref()) {
                        (1, b"txBody") => {
                            in_body = true;
                            found = true;
                        },
                        (2, b"p") if in_body => in_para = true,
                        (_, b"t") if in_para => in_text = true,
                        _ => {},
                    }
                    depth += 1;
                },
                Event::Empty(e) => match (depth, e.local_name().as_ref()) {
                    (1, b"txBody") => found = true,
                    (2, b"p") if in_body => paragraphs.push(String::new()),
                    (_, b"br") if in_para => current.push(LINE_BREAK),
                    _ => {},
                },
                Event::End(e) => {
                    depth = depth.saturating_sub(1);
                    match (depth, e.local_name().as_ref()) {
                        (1, b"txBody") => in_body = false,
                        (2, b"p") if in_body => {
                            in_para = false;
                            paragraphs.push(std::mem::take(&mut current));
                        },
                        (_, b"t") => in_text = false,
                        _ => {},
                    }
                },
                Event::Text(t) if in_text => current.push_str(std::str::from_utf8(t)?),
                Event::CData(t) if in_text => current.push_str(std::str::from_utf8(t)?),
                Event::GeneralRef(r) if in_text => push_reference(&mut current, r)?,
                _ => {},
            }
        }

        Ok(found.then_some(Self { paragraphs }))
    }

    /// Paragraph texts in document order.
    pub fn paragraphs(&self) -> &[String] {
        &self.paragraphs
    }

    /// Full text of the frame, paragraphs separated by newlines.
    pub fn text(&self) -> String {
        self.paragraphs.join("\n")
    }

    /// The text with surrounding whitespace removed; this is what shape
    /// labels are matched on.
    pub fn label(&self) -> String {
        self.text().trim().to_string()
    }
}
