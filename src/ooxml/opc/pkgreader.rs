//! Read-only view of a serialized OPC package.
//!
//! Parses `[Content_Types].xml` and the `.rels` members, then walks the
//! relationship graph from the package root to collect every reachable part.

use crate::ooxml::opc::constants::target_mode;
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::{CONTENT_TYPES_URI, PACKAGE_URI, PackURI};
use crate::ooxml::opc::phys_pkg::PhysPkgReader;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use smallvec::SmallVec;
use std::collections::{HashMap, HashSet};
use tracing::warn;

/// A part as loaded from the archive, before it becomes a [`Part`](crate::ooxml::opc::Part).
#[derive(Debug)]
pub struct SerializedPart {
    pub partname: PackURI,
    pub content_type: String,
    pub blob: Vec<u8>,
    pub srels: SmallVec<[SerializedRelationship; 8]>,
}

/// A relationship as read from a `.rels` member.
#[derive(Debug, Clone)]
pub struct SerializedRelationship {
    /// Directory of the source, for resolving `target_ref`
    pub base_uri: String,
    pub r_id: String,
    pub reltype: String,
    pub target_ref: String,
    pub target_mode: String,
}

impl SerializedRelationship {
    #[inline]
    pub fn is_external(&self) -> bool {
        self.target_mode == target_mode::EXTERNAL
    }

    pub fn target_partname(&self) -> Result<PackURI> {
        if self.is_external() {
            return Err(OpcError::InvalidRelationship(format!(
                "{} is external and has no target partname",
                self.r_id
            )));
        }
        PackURI::from_rel_ref(&self.base_uri, &self.target_ref).map_err(OpcError::InvalidPackUri)
    }
}

/// Content type lookup built from `[Content_Types].xml`.
///
/// Overrides are matched on the partname (case-insensitively, as partnames are
/// ASCII case-insensitive) before Defaults are matched on the extension.
#[derive(Debug, Default)]
pub(crate) struct ContentTypeMap {
    defaults: HashMap<String, String>,
    overrides: HashMap<String, String>,
}

impl ContentTypeMap {
    pub(crate) fn from_xml(xml: &[u8]) -> Result<Self> {
        let mut map = Self::default();
        let mut reader = Reader::from_reader(xml);

        loop {
            match reader.read_event() {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) => {
                    match e.local_name().as_ref() {
                        b"Default" => {
                            if let (Some(ext), Some(ct)) =
                                (attr(e, b"Extension")?, attr(e, b"ContentType")?)
                            {
                                map.defaults.insert(ext.to_ascii_lowercase(), ct);
                            }
                        },
                        b"Override" => {
                            if let (Some(pn), Some(ct)) =
                                (attr(e, b"PartName")?, attr(e, b"ContentType")?)
                            {
                                map.overrides.insert(pn.to_ascii_lowercase(), ct);
                            }
                        },
                        _ => {},
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(OpcError::XmlError(format!("Content types parse error: {}", e)));
                },
                _ => {},
            }
        }

        Ok(map)
    }

    pub(crate) fn get(&self, partname: &PackURI) -> Result<&str> {
        self.overrides
            .get(&partname.as_str().to_ascii_lowercase())
            .or_else(|| self.defaults.get(&partname.ext().to_ascii_lowercase()))
            .map(String::as_str)
            .ok_or_else(|| OpcError::ContentTypeNotFound(partname.to_string()))
    }
}

/// Unescaped value of the attribute `name`, if present.
fn attr(e: &BytesStart<'_>, name: &[u8]) -> Result<Option<String>> {
    for a in e.attributes() {
        let a = a?;
        if a.key.as_ref() == name {
            return Ok(Some(a.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

/// Parse a `.rels` member into serialized relationships whose targets resolve
/// against `base_uri`.
pub(crate) fn parse_rels_xml(
    rels_xml: &[u8],
    base_uri: &str,
) -> Result<SmallVec<[SerializedRelationship; 8]>> {
    let mut srels = SmallVec::new();
    let mut reader = Reader::from_reader(rels_xml);

    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if e.local_name().as_ref() == b"Relationship" =>
            {
                let (Some(r_id), Some(reltype), Some(target_ref)) =
                    (attr(e, b"Id")?, attr(e, b"Type")?, attr(e, b"Target")?)
                else {
                    continue;
                };
                let target_mode = attr(e, b"TargetMode")?
                    .unwrap_or_else(|| target_mode::INTERNAL.to_string());

                srels.push(SerializedRelationship {
                    base_uri: base_uri.to_string(),
                    r_id,
                    reltype,
                    target_ref,
                    target_mode,
                });
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(OpcError::XmlError(format!("Rels parse error: {}", e))),
            _ => {},
        }
    }

    Ok(srels)
}

/// Every part reachable from the package relationships, plus those relationships.
pub struct PackageReader {
    pkg_srels: SmallVec<[SerializedRelationship; 8]>,
    sparts: Vec<SerializedPart>,
}

impl PackageReader {
    pub fn from_phys_reader(mut phys_reader: PhysPkgReader) -> Result<Self> {
        let content_types_uri = PackURI::new(CONTENT_TYPES_URI).map_err(OpcError::InvalidPackUri)?;
        let content_types = ContentTypeMap::from_xml(phys_reader.blob_for(&content_types_uri)?)?;

        let package_uri = PackURI::new(PACKAGE_URI).map_err(OpcError::InvalidPackUri)?;
        let pkg_srels = Self::load_rels(&phys_reader, &package_uri)?;

        let mut sparts = Vec::with_capacity(phys_reader.len());
        let mut visited: HashSet<PackURI> = HashSet::with_capacity(phys_reader.len());
        let mut work_queue: Vec<PackURI> = Vec::new();

        Self::enqueue_targets(&pkg_srels, &mut visited, &mut work_queue);

        while let Some(partname) = work_queue.pop() {
            if !phys_reader.contains(&partname) {
                warn!(%partname, "relationship target is missing from the package, skipping");
                continue;
            }

            let srels = Self::load_rels(&phys_reader, &partname)?;
            Self::enqueue_targets(&srels, &mut visited, &mut work_queue);

            let content_type = content_types.get(&partname)?.to_string();
            let blob = phys_reader.take_blob(&partname)?;
            sparts.push(SerializedPart {
                partname,
                content_type,
                blob,
                srels,
            });
        }

        Ok(Self { pkg_srels, sparts })
    }

    fn load_rels(
        phys_reader: &PhysPkgReader,
        source_uri: &PackURI,
    ) -> Result<SmallVec<[SerializedRelationship; 8]>> {
        match phys_reader.rels_xml_for(source_uri)? {
            Some(xml) => parse_rels_xml(xml, source_uri.base_uri()),
            None => Ok(SmallVec::new()),
        }
    }

    fn enqueue_targets(
        srels: &[SerializedRelationship],
        visited: &mut HashSet<PackURI>,
        work_queue: &mut Vec<PackURI>,
    ) {
        for srel in srels.iter().filter(|srel| !srel.is_external()) {
            if let Ok(partname) = srel.target_partname()
                && visited.insert(partname.clone())
            {
                work_queue.push(partname);
            }
        }
    }

    /// Split into package relationships and parts.
    pub fn into_parts(
        self,
    ) -> (SmallVec<[SerializedRelationship; 8]>, Vec<SerializedPart>) {
        (self.pkg_srels, self.sparts)
    }
}
