use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::PackURI;
/// Relationship objects for OPC packages.
///
/// A relationship connects a source (the package or a part) to a target part
/// or external URL under an `rId`.
use quick_xml::escape::escape;
use std::collections::HashMap;

/// A single relationship from a source part to a target.
#[derive(Debug, Clone)]
pub struct Relationship {
    /// Relationship ID (e.g., "rId1")
    r_id: String,

    /// Relationship type URI
    reltype: String,

    /// Target reference - either a relative part reference or external URL
    target_ref: String,

    /// Directory of the source part, for resolving `target_ref`
    base_uri: String,

    is_external: bool,
}

impl Relationship {
    pub fn new(
        r_id: String,
        reltype: String,
        target_ref: String,
        base_uri: String,
        is_external: bool,
    ) -> Self {
        Self {
            r_id,
            reltype,
            target_ref,
            base_uri,
            is_external,
        }
    }

    #[inline]
    pub fn r_id(&self) -> &str {
        &self.r_id
    }

    #[inline]
    pub fn reltype(&self) -> &str {
        &self.reltype
    }

    #[inline]
    pub fn target_ref(&self) -> &str {
        &self.target_ref
    }

    #[inline]
    pub fn is_external(&self) -> bool {
        self.is_external
    }

    /// Absolute partname of the target for internal relationships.
    pub fn target_partname(&self) -> Result<PackURI> {
        if self.is_external {
            return Err(OpcError::InvalidRelationship(format!(
                "{} is external and has no target partname",
                self.r_id
            )));
        }
        PackURI::from_rel_ref(&self.base_uri, &self.target_ref).map_err(OpcError::InvalidPackUri)
    }
}

/// Collection of relationships from a single source, keyed by rId.
#[derive(Debug)]
pub struct Relationships {
    base_uri: String,
    rels: HashMap<String, Relationship>,
}

impl Relationships {
    /// Create an empty collection whose targets resolve against `base_uri`.
    pub fn new(base_uri: String) -> Self {
        Self {
            base_uri,
            rels: HashMap::new(),
        }
    }

    /// Insert a relationship, replacing any existing one with the same rId.
    pub fn add_relationship(
        &mut self,
        reltype: String,
        target_ref: String,
        r_id: String,
        is_external: bool,
    ) -> &Relationship {
        let rel = Relationship::new(
            r_id.clone(),
            reltype,
            target_ref,
            self.base_uri.clone(),
            is_external,
        );
        self.rels.entry(r_id).insert_entry(rel).into_mut()
    }

    #[inline]
    pub fn get(&self, r_id: &str) -> Option<&Relationship> {
        self.rels.get(r_id)
    }

    /// Return the rId of an internal relationship of `reltype` to `target_ref`,
    /// creating one with the next free rId when none exists yet.
    pub fn get_or_add(&mut self, reltype: &str, target_ref: &str) -> String {
        let existing = self.rels.values().find(|rel| {
            !rel.is_external() && rel.reltype() == reltype && rel.target_ref() == target_ref
        });
        if let Some(rel) = existing {
            return rel.r_id().to_string();
        }

        let r_id = self.next_r_id();
        self.add_relationship(reltype.to_string(), target_ref.to_string(), r_id.clone(), false);
        r_id
    }

    /// Lowest unused `rIdN`, filling gaps left by removed relationships.
    fn next_r_id(&self) -> String {
        let mut used: Vec<u32> = self
            .rels
            .keys()
            .filter_map(|r_id| r_id.strip_prefix("rId"))
            .filter_map(|n| atoi_simd::parse::<u32>(n.as_bytes()).ok())
            .filter(|&n| n > 0)
            .collect();
        used.sort_unstable();
        used.dedup();

        let next = used
            .iter()
            .zip(1u32..)
            .find(|(used, expected)| **used != *expected)
            .map_or(used.len() as u32 + 1, |(_, expected)| expected);

        format!("rId{}", next)
    }

    /// The single relationship of `reltype`.
    ///
    /// Fails when there is none or more than one.
    pub fn part_with_reltype(&self, reltype: &str) -> Result<&Relationship> {
        let mut matching = self.rels.values().filter(|rel| rel.reltype() == reltype);
        match (matching.next(), matching.next()) {
            (Some(rel), None) => Ok(rel),
            (None, _) => Err(OpcError::RelationshipNotFound(format!(
                "No relationship of type '{}'",
                reltype
            ))),
            (Some(_), Some(_)) => Err(OpcError::InvalidRelationship(format!(
                "Multiple relationships of type '{}'",
                reltype
            ))),
        }
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.rels.values()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rels.is_empty()
    }

    /// Serialize to `.rels` XML, sorted by rId for stable output.
    pub fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(256 + self.rels.len() * 160);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(r#"<Relationships xmlns=""#);
        xml.push_str(crate::ooxml::opc::constants::namespace::OPC_RELATIONSHIPS);
        xml.push_str(r#"">"#);

        let mut rels: Vec<&Relationship> = self.rels.values().collect();
        rels.sort_by_key(|rel| (rel.r_id().len(), rel.r_id()));

        for rel in rels {
            xml.push_str(&format!(
                r#"<Relationship Id="{}" Type="{}" Target="{}"{}/>"#,
                escape(rel.r_id()),
                escape(rel.reltype()),
                escape(rel.target_ref()),
                if rel.is_external() {
                    r#" TargetMode="External""#
                } else {
                    ""
                }
            ));
        }

        xml.push_str("</Relationships>");
        xml
    }
}

impl Default for Relationships {
    fn default() -> Self {
        Self::new("/".to_string())
    }
}
