//! Physical OPC package access (the ZIP container).
//!
//! The reader inflates every member up front so the relationship walk in
//! [`PackageReader`](crate::ooxml::opc::pkgreader::PackageReader) can take
//! ownership of part content without touching the archive again.

use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::PackURI;
use std::collections::HashMap;
use std::io::{Cursor, Read, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// All members of a ZIP-based OPC package, keyed by member name.
pub struct PhysPkgReader {
    members: HashMap<String, Vec<u8>>,
}

impl PhysPkgReader {
    /// Open an OPC package file (.pptx, .xlsx, ...).
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(OpcError::PackageNotFound(path.display().to_string()));
        }

        Self::from_bytes(std::fs::read(path)?)
    }

    /// Read an OPC package from its ZIP bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let mut archive = ZipArchive::new(Cursor::new(data))?;
        let mut members = HashMap::with_capacity(archive.len());

        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            if file.is_dir() {
                continue;
            }
            let mut content = Vec::with_capacity(file.size() as usize);
            file.read_to_end(&mut content)?;
            members.insert(file.name().to_string(), content);
        }

        Ok(Self { members })
    }

    /// Borrow the content of the member behind `pack_uri`.
    pub fn blob_for(&self, pack_uri: &PackURI) -> Result<&[u8]> {
        self.members
            .get(pack_uri.membername())
            .map(Vec::as_slice)
            .ok_or_else(|| OpcError::PartNotFound(pack_uri.to_string()))
    }

    /// Take ownership of the member behind `pack_uri`, removing it from the reader.
    pub fn take_blob(&mut self, pack_uri: &PackURI) -> Result<Vec<u8>> {
        self.members
            .remove(pack_uri.membername())
            .ok_or_else(|| OpcError::PartNotFound(pack_uri.to_string()))
    }

    /// Relationships XML for `source_uri`, or None when the source has no `.rels` member.
    pub fn rels_xml_for(&self, source_uri: &PackURI) -> Result<Option<&[u8]>> {
        let rels_uri = source_uri.rels_uri().map_err(OpcError::InvalidPackUri)?;
        Ok(self.members.get(rels_uri.membername()).map(Vec::as_slice))
    }

    #[inline]
    pub fn contains(&self, pack_uri: &PackURI) -> bool {
        self.members.contains_key(pack_uri.membername())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Writes parts into a new in-memory ZIP archive.
pub struct PhysPkgWriter {
    archive: ZipWriter<Cursor<Vec<u8>>>,
}

impl PhysPkgWriter {
    pub fn new() -> Self {
        Self {
            archive: ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    /// Write a part with Deflate compression.
    pub fn write(&mut self, pack_uri: &PackURI, blob: &[u8]) -> Result<()> {
        self.write_with(pack_uri, blob, CompressionMethod::Deflated)
    }

    /// Write a part without compression, for content that is already compressed (PNG, JPEG).
    pub fn write_stored(&mut self, pack_uri: &PackURI, blob: &[u8]) -> Result<()> {
        self.write_with(pack_uri, blob, CompressionMethod::Stored)
    }

    fn write_with(&mut self, pack_uri: &PackURI, blob: &[u8], method: CompressionMethod) -> Result<()> {
        let options = SimpleFileOptions::default().compression_method(method);
        self.archive.start_file(pack_uri.membername(), options)?;
        self.archive.write_all(blob)?;
        Ok(())
    }

    /// Finish the archive and return its bytes.
    pub fn finish(self) -> Result<Vec<u8>> {
        Ok(self.archive.finish()?.into_inner())
    }
}

impl Default for PhysPkgWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let mut writer = PhysPkgWriter::new();
        let slide = PackURI::new("/ppt/slides/slide1.xml").unwrap();
        let image = PackURI::new("/ppt/media/image1.png").unwrap();
        writer.write(&slide, b"<p:sld/>").unwrap();
        writer.write_stored(&image, &[0x89, b'P', b'N', b'G']).unwrap();
        let zip_data = writer.finish().unwrap();

        let mut reader = PhysPkgReader::from_bytes(zip_data).unwrap();
        assert_eq!(reader.len(), 2);
        assert_eq!(reader.blob_for(&slide).unwrap(), b"<p:sld/>");
        assert_eq!(reader.take_blob(&image).unwrap(), vec![0x89, b'P', b'N', b'G']);
        assert!(!reader.contains(&image));
    }

    #[test]
    fn test_rels_xml_for_missing_is_none() {
        let mut writer = PhysPkgWriter::new();
        let slide = PackURI::new("/ppt/slides/slide1.xml").unwrap();
        writer.write(&slide, b"<p:sld/>").unwrap();
        let reader = PhysPkgReader::from_bytes(writer.finish().unwrap()).unwrap();

        assert!(reader.rels_xml_for(&slide).unwrap().is_none());
    }

    #[test]
    fn test_open_missing_file() {
        let result = PhysPkgReader::open("/definitely/not/here.pptx");
        assert!(matches!(result, Err(OpcError::PackageNotFound(_))));
    }

    #[test]
    fn test_rejects_non_zip() {
        assert!(PhysPkgReader::from_bytes(b"not a zip".to_vec()).is_err());
    }
}
