//! Shared strings table for Excel files.
//!
//! Excel stores most cell text once in `xl/sharedStrings.xml` and refers to
//! it by index. Rich-text items (`<r>` runs) are flattened to their plain
//! text; phonetic hints (`<rPh>`) are skipped.

use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::text::push_reference;
use quick_xml::Reader;
use quick_xml::events::Event;

/// Shared strings table.
#[derive(Debug, Default)]
pub struct SharedStrings {
    strings: Vec<String>,
}

impl SharedStrings {
    /// Create a new empty shared strings table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse shared strings from `xl/sharedStrings.xml` content.
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        let mut strings = Vec::new();
        let mut current: Option<String> = None;
        let mut in_text = false;
        let mut in_phonetic = false;

        loop {
            let event = reader
                .read_event()
                .map_err(|e| OoxmlError::Xml(e.to_string()))?;

            match event {
                Event::Start(ref e) => match e.local_name().as_ref() {
                    b"si" => current = Some(String::new()),
                    b"rPh" => in_phonetic = true,
                    b"t" if current.is_some() && !in_phonetic => in_text = true,
                    _ => {},
                },
                Event::Empty(ref e) if e.local_name().as_ref() == b"si" => strings.push(String::new()),
                Event::End(ref e) => match e.local_name().as_ref() {
                    b"si" => strings.extend(current.take()),
                    b"rPh" => in_phonetic = false,
                    b"t" => in_text = false,
                    _ => {},
                },
                Event::Text(ref t) if in_text => {
                    if let Some(s) = current.as_mut() {
                        s.push_str(std::str::from_utf8(t)?);
                    }
                },
                Event::CData(ref t) if in_text => {
                    if let Some(s) = current.as_mut() {
                        s.push_str(std::str::from_utf8(t)?);
                    }
                },
                Event::GeneralRef(ref r) if in_text => {
                    if let Some(s) = current.as_mut() {
                        push_reference(s, r)?;
                    }
                },
                Event::Eof => break,
                _ => {},
            }
        }

        Ok(Self { strings })
    }

    /// Get a string by its index.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.strings.get(index).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}
