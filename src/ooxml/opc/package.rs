/// The in-memory OPC package.
///
/// OpcPackage holds every reachable part of a package together with the
/// package-level relationships, supports replacing part content and adding new
/// parts, and writes itself back out through [`PackageWriter`].
use crate::ooxml::opc::constants::relationship_type;
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::{PACKAGE_URI, PackURI};
use crate::ooxml::opc::part::{Part, PartFactory};
use crate::ooxml::opc::phys_pkg::PhysPkgReader;
use crate::ooxml::opc::pkgreader::PackageReader;
use crate::ooxml::opc::pkgwriter::PackageWriter;
use crate::ooxml::opc::rel::Relationships;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug)]
pub struct OpcPackage {
    /// Package-level relationships
    rels: Relationships,

    /// All parts, ordered by partname so that saving is deterministic
    parts: BTreeMap<PackURI, Box<dyn Part>>,
}

impl OpcPackage {
    /// Create a new empty OPC package.
    pub fn new() -> Self {
        Self {
            rels: Relationships::new(PACKAGE_URI.to_string()),
            parts: BTreeMap::new(),
        }
    }

    /// Open an OPC package from a file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_phys_reader(PhysPkgReader::open(path)?)
    }

    /// Load an OPC package from its ZIP bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Self::from_phys_reader(PhysPkgReader::from_bytes(data)?)
    }

    fn from_phys_reader(phys_reader: PhysPkgReader) -> Result<Self> {
        Self::unmarshal(PackageReader::from_phys_reader(phys_reader)?)
    }

    /// Turn serialized parts and relationships into the in-memory graph.
    fn unmarshal(pkg_reader: PackageReader) -> Result<Self> {
        let mut package = Self::new();
        let (pkg_srels, sparts) = pkg_reader.into_parts();

        for srel in pkg_srels {
            let is_external = srel.is_external();
            package
                .rels
                .add_relationship(srel.reltype, srel.target_ref, srel.r_id, is_external);
        }

        for spart in sparts {
            let mut part = PartFactory::load(spart.partname, spart.content_type, spart.blob)?;
            for srel in spart.srels {
                let is_external = srel.is_external();
                part.rels_mut()
                    .add_relationship(srel.reltype, srel.target_ref, srel.r_id, is_external);
            }
            package.add_part(part);
        }

        Ok(package)
    }

    /// The part the package-level officeDocument relationship points at
    /// (presentation.xml, workbook.xml, ...).
    pub fn main_document_part(&self) -> Result<&dyn Part> {
        let partname = self.main_document_partname()?;
        self.get_part(&partname)
    }

    pub fn main_document_partname(&self) -> Result<PackURI> {
        self.rels
            .part_with_reltype(relationship_type::OFFICE_DOCUMENT)?
            .target_partname()
    }

    pub fn get_part(&self, partname: &PackURI) -> Result<&dyn Part> {
        self.parts
            .get(partname)
            .map(|b| &**b as &dyn Part)
            .ok_or_else(|| OpcError::PartNotFound(partname.to_string()))
    }

    pub fn get_part_mut(&mut self, partname: &PackURI) -> Result<&mut dyn Part> {
        self.parts
            .get_mut(partname)
            .map(|b| &mut **b as &mut dyn Part)
            .ok_or_else(|| OpcError::PartNotFound(partname.to_string()))
    }

    /// Add a part, replacing any part with the same partname.
    pub fn add_part(&mut self, part: Box<dyn Part>) {
        self.parts.insert(part.partname().clone(), part);
    }

    pub fn contains_part(&self, partname: &PackURI) -> bool {
        self.parts.contains_key(partname)
    }

    /// Iterate over all parts in partname order.
    pub fn iter_parts(&self) -> impl Iterator<Item = &dyn Part> {
        self.parts.values().map(|b| &**b as &dyn Part)
    }

    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    pub fn rels(&self) -> &Relationships {
        &self.rels
    }

    /// First free partname for `template`, where `%d` stands for 1, 2, 3, ...
    /// (e.g. `/ppt/media/image%d.png`).
    pub fn next_partname(&self, template: &str) -> Result<PackURI> {
        (1..=self.parts.len() + 1)
            .map(|n| template.replace("%d", &n.to_string()))
            .map(|candidate| PackURI::new(candidate).map_err(OpcError::InvalidPackUri))
            .find(|candidate| !matches!(candidate, Ok(uri) if self.parts.contains_key(uri)))
            .unwrap_or_else(|| {
                Err(OpcError::InvalidPackUri(format!(
                    "no free partname for template '{}'",
                    template
                )))
            })
    }

    /// Serialize the package to a file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        PackageWriter::write(path, self)
    }

    /// Serialize the package to ZIP bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        PackageWriter::to_bytes(self)
    }
}

impl Default for OpcPackage {
    fn default() -> Self {
        Self::new()
    }
}
