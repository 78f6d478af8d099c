/// Package implementation for PowerPoint presentations.
use crate::common::unit::scaled_width;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::constants::{content_type as ct, relationship_type};
use crate::ooxml::opc::{BlobPart, OpcPackage, PackURI, Part};
use crate::ooxml::pptx::parts::{LabelMatch, PresentationPart, RecolorStats, ShapeScope, SlidePart};
use crate::ooxml::pptx::shapes::PictureShape;
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

/// Main-part content types accepted as presentations.
const PRESENTATION_CONTENT_TYPES: [&str; 4] = [
    ct::PML_PRESENTATION_MAIN,
    ct::PML_PRES_MACRO_MAIN,
    ct::PML_SLIDESHOW_MAIN,
    ct::PML_TEMPLATE_MAIN,
];

/// An image part added to the package, ready to be placed on slides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    pub partname: PackURI,
    /// Pixel width and height of the image
    pub px_width: u32,
    pub px_height: u32,
    /// File name recorded as the picture description
    pub filename: String,
}

/// A PowerPoint (.pptx) package.
///
/// Wraps an OPC package and exposes the slide-level edits: recoloring
/// labeled shapes and placing pictures.
///
/// # Examples
///
/// ```rust,no_run
/// use pathtint::ooxml::pptx::Package;
///
/// let pkg = Package::open("pathway.pptx")?;
/// println!("Presentation has {} slides", pkg.slide_partnames()?.len());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Package {
    opc: OpcPackage,
}

impl Package {
    /// Open a .pptx package from a file path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_opc(OpcPackage::open(path)?)
    }

    /// Load a .pptx package from its bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Self::from_opc(OpcPackage::from_bytes(data)?)
    }

    fn from_opc(opc: OpcPackage) -> Result<Self> {
        // Verify it's a PowerPoint presentation by checking the main part's content type
        let main_part = opc
            .main_document_part()
            .map_err(|e| OoxmlError::PartNotFound(format!("main presentation part: {}", e)))?;

        let content_type = main_part.content_type();
        if !PRESENTATION_CONTENT_TYPES.contains(&content_type) {
            return Err(OoxmlError::InvalidContentType {
                expected: PRESENTATION_CONTENT_TYPES.join(" or "),
                got: content_type.to_string(),
            });
        }

        Ok(Self { opc })
    }

    fn presentation_part(&self) -> Result<&dyn Part> {
        self.opc
            .main_document_part()
            .map_err(|e| OoxmlError::PartNotFound(format!("main presentation part: {}", e)))
    }

    /// Partnames of the slides, in presentation order.
    pub fn slide_partnames(&self) -> Result<Vec<PackURI>> {
        let part = self.presentation_part()?;
        PresentationPart::from_part(part)
            .slide_rids()?
            .iter()
            .map(|r_id| part.related_partname(r_id).map_err(OoxmlError::from))
            .collect()
    }

    /// Slide width and height in EMUs, if the presentation declares them.
    pub fn slide_size(&self) -> Result<Option<(i64, i64)>> {
        PresentationPart::from_part(self.presentation_part()?).slide_size()
    }

    /// Read access to one slide.
    pub fn slide(&self, partname: &PackURI) -> Result<SlidePart<'_>> {
        Ok(SlidePart::from_part(self.opc.get_part(partname)?))
    }

    /// Fill the labeled shapes of one slide. The slide is left untouched when
    /// no shape was colored.
    pub fn recolor_slide<F>(&mut self, partname: &PackURI, scope: ShapeScope, lookup: F) -> Result<RecolorStats>
    where
        F: FnMut(&str) -> LabelMatch,
    {
        let (xml, stats) = self.slide(partname)?.recolor_shapes(scope, lookup)?;
        if stats.colored > 0 {
            self.opc.get_part_mut(partname)?.set_blob(xml);
        }
        Ok(stats)
    }

    /// Add a PNG image part. Adding the same bytes twice returns the existing part.
    pub fn add_image(&mut self, blob: Vec<u8>, filename: &str) -> Result<ImageRef> {
        let (px_width, px_height) = image::ImageReader::new(Cursor::new(blob.as_slice()))
            .with_guessed_format()?
            .into_dimensions()
            .map_err(|e| OoxmlError::InvalidFormat(format!("image {}: {}", filename, e)))?;

        let existing = self
            .opc
            .iter_parts()
            .find(|part| part.content_type() == ct::PNG && part.blob() == blob.as_slice())
            .map(|part| part.partname().clone());

        let partname = match existing {
            Some(partname) => partname,
            None => {
                let partname = self.opc.next_partname("/ppt/media/image%d.png")?;
                debug!(%partname, px_width, px_height, "adding image part");
                self.opc
                    .add_part(Box::new(BlobPart::new(partname.clone(), ct::PNG.to_string(), blob)));
                partname
            },
        };

        Ok(ImageRef {
            partname,
            px_width,
            px_height,
            filename: filename.to_string(),
        })
    }

    /// Place `image` on a slide at `left`/`top` with the given height (EMU);
    /// the width follows the image's aspect ratio. Returns the new shape id.
    pub fn add_picture(
        &mut self,
        slide: &PackURI,
        image: &ImageRef,
        left: i64,
        top: i64,
        height: i64,
    ) -> Result<u32> {
        let part = self.opc.get_part_mut(slide)?;
        let r_id = part.relate_to(&image.partname, relationship_type::IMAGE);

        let slide_part = SlidePart::from_part(&*part);
        let id = slide_part.next_shape_id()?;
        let width = scaled_width(height, image.px_width, image.px_height);
        let picture = PictureShape::new(id, r_id, image.filename.clone())
            .with_position(left, top)
            .with_size(width, height);
        let xml = slide_part.with_picture(&picture)?;

        part.set_blob(xml);
        Ok(id)
    }

    /// Save the package to a file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        Ok(self.opc.save(path)?)
    }

    /// Serialize the package to bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.opc.to_bytes()?)
    }

    /// Get the underlying OPC package.
    #[inline]
    pub fn opc_package(&self) -> &OpcPackage {
        &self.opc
    }
}
