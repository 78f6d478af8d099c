/// Solid fill replacement inside a shape's `p:spPr`.
use crate::common::RGBColor;
use crate::ooxml::pptx::shapes::{NamespacePrefixes, OwnedEvent};
use quick_xml::events::{BytesEnd, BytesStart, Event};

/// Children of `spPr` that select how the shape is filled.
#[inline]
fn is_fill(local: &[u8]) -> bool {
    matches!(
        local,
        b"noFill" | b"solidFill" | b"gradFill" | b"blipFill" | b"pattFill" | b"grpFill"
    )
}

/// Children of `spPr` that must follow the fill choice.
#[inline]
fn is_fill_successor(local: &[u8]) -> bool {
    matches!(
        local,
        b"ln" | b"effectLst" | b"effectDag" | b"scene3d" | b"sp3d" | b"extLst"
    )
}

/// The `a:solidFill/a:srgbClr` events for `color`.
pub(crate) fn solid_fill_events(color: RGBColor, ns: &NamespacePrefixes) -> [OwnedEvent; 3] {
    let mut fill = BytesStart::new(ns.a("solidFill"));
    if let Some((key, uri)) = ns.dml_declaration() {
        fill.push_attribute((key.as_str(), uri));
    }

    let mut clr = BytesStart::new(ns.a("srgbClr"));
    clr.push_attribute(("val", color.to_hex().as_str()));

    [
        Event::Start(fill),
        Event::Empty(clr),
        Event::End(BytesEnd::new(ns.a("solidFill"))),
    ]
}

/// Replace the fill of the shape whose subtree is `events` with a solid `color`.
///
/// Any existing fill choice in the shape's `spPr` is dropped with its subtree
/// and the new `solidFill` is placed before the first of `ln`, `effectLst`,
/// `effectDag`, `scene3d`, `sp3d`, `extLst`, or at the end of `spPr`. An empty
/// `<p:spPr/>` is expanded. Returns None when the shape has no `spPr`.
pub fn set_solid_fill(
    events: &[OwnedEvent],
    color: RGBColor,
    ns: &NamespacePrefixes,
) -> Option<Vec<OwnedEvent>> {
    let mut out = Vec::with_capacity(events.len() + 3);
    let mut depth = 0usize;
    let mut in_sppr = false;
    let mut inserted = false;
    let mut skipping = 0usize;

    for event in events.iter().cloned() {
        if skipping > 0 {
            match event {
                Event::Start(_) => skipping += 1,
                Event::End(_) => skipping -= 1,
                _ => {},
            }
            continue;
        }

        match event {
            Event::Start(e) => {
                let local = e.local_name();
                let local = local.as_ref();
                if in_sppr && depth == 2 {
                    if is_fill(local) {
                        skipping = 1;
                        continue;
                    }
                    if !inserted && is_fill_successor(local) {
                        out.extend(solid_fill_events(color, ns));
                        inserted = true;
                    }
                }
                if depth == 1 && local == b"spPr" {
                    in_sppr = true;
                }
                depth += 1;
                out.push(Event::Start(e));
            },
            Event::Empty(e) => {
                let local = e.local_name();
                let local = local.as_ref();
                if in_sppr && depth == 2 {
                    if is_fill(local) {
                        continue;
                    }
                    if !inserted && is_fill_successor(local) {
                        out.extend(solid_fill_events(color, ns));
                        inserted = true;
                    }
                }
                if depth == 1 && local == b"spPr" && !inserted {
                    let end = BytesEnd::new(String::from_utf8_lossy(e.name().as_ref()).into_owned());
                    out.push(Event::Start(e));
                    out.extend(solid_fill_events(color, ns));
                    out.push(Event::End(end));
                    inserted = true;
                    continue;
                }
                out.push(Event::Empty(e));
            },
            Event::End(e) => {
                depth = depth.saturating_sub(1);
                if in_sppr && depth == 1 {
                    if !inserted {
                        out.extend(solid_fill_events(color, ns));
                        inserted = true;
                    }
                    in_sppr = false;
                }
                out.push(Event::End(e));
            },
            other => out.push(other),
        }
    }

    inserted.then_some(out)
}

/// The `srgbClr` value of the solid fill in a shape's `spPr`, if any.
pub fn solid_fill_color(events: &[OwnedEvent]) -> Option<RGBColor> {
    let mut depth = 0usize;
    let mut in_sppr = false;
    let mut in_fill = false;

    for event in events {
        match event {
            Event::Empty(e) | Event::Start(e) if in_fill && e.local_name().as_ref() == b"srgbClr" => {
                let val = e.try_get_attribute("val").ok()??;
                return std::str::from_utf8(&val.value).ok().and_then(RGBColor::from_hex);
            },
            Event::Start(e) => {
                match (depth, e.local_name().as_ref()) {
                    (1, b"spPr") => in_sppr = true,
                    (2, b"solidFill") if in_sppr => in_fill = true,
                    _ => {},
                }
                depth += 1;
            },
            Event::End(_) => {
                depth = depth.saturating_sub(1);
                if depth <= 2 {
                    in_fill = false;
                }
                if depth <= 1 {
                    in_sppr = false;
                }
            },
            _ => {},
        }
    }

    None
}
