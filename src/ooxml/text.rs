//! Text content helpers shared by the PresentationML and SpreadsheetML readers.

use crate::ooxml::error::{OoxmlError, Result};
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::BytesRef;

/// Append the character an entity or character reference stands for.
///
/// quick-xml reports `&amp;`, `&#x41;` and friends as separate events
/// between the text chunks around them.
pub(crate) fn push_reference(out: &mut String, reference: &BytesRef<'_>) -> Result<()> {
    if let Some(ch) = reference.resolve_char_ref()? {
        out.push(ch);
        return Ok(());
    }

    let name = std::str::from_utf8(reference)?;
    let resolved = resolve_predefined_entity(name)
        .ok_or_else(|| OoxmlError::Xml(format!("unknown entity reference &{};", name)))?;
    out.push_str(resolved);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quick_xml::Reader;
    use quick_xml::events::Event;

    fn resolve(xml: &str) -> Result<String> {
        let mut reader = Reader::from_reader(xml.as_bytes());
        let mut out = String::new();
        loop {
            match reader.read_event()? {
                Event::Text(t) => out.push_str(std::str::from_utf8(&t)?),
                Event::GeneralRef(r) => push_reference(&mut out, &r)?,
                Event::Eof => break,
                _ => {},
            }
        }
        Ok(out)
    }

    #[test]
    fn test_predefined_and_char_refs() {
        assert_eq!(resolve("<t>A &amp; B &#x3b1;&#946;</t>").unwrap(), "A & B αβ");
    }

    #[test]
    fn test_unknown_entity_is_error() {
        assert!(matches!(resolve("<t>&nbsp;</t>"), Err(OoxmlError::Xml(_))));
    }
}
