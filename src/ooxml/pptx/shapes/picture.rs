/// Picture shapes (`p:pic`) added to slides.
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::pptx::shapes::NamespacePrefixes;
use quick_xml::escape::escape;
use std::fmt::Write;

/// A picture referencing an image part through the slide relationship `r_id`.
///
/// Position and size are in EMUs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PictureShape {
    pub id: u32,
    pub name: String,
    /// Alternative text, conventionally the image's file name
    pub description: String,
    pub r_id: String,
    pub left: i64,
    pub top: i64,
    pub width: i64,
    pub height: i64,
}

impl PictureShape {
    /// Picture with the conventional name `Picture {id - 1}`.
    pub fn new(id: u32, r_id: String, description: String) -> Self {
        Self {
            id,
            name: format!("Picture {}", id.saturating_sub(1)),
            description,
            r_id,
            left: 0,
            top: 0,
            width: 0,
            height: 0,
        }
    }

    pub fn with_position(mut self, left: i64, top: i64) -> Self {
        self.left = left;
        self.top = top;
        self
    }

    pub fn with_size(mut self, width: i64, height: i64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Serialize as a `p:pic` element using the slide's namespace prefixes.
    pub fn to_xml(&self, ns: &NamespacePrefixes) -> Result<String> {
        let a = |local: &str| ns.a(local);
        let p = |local: &str| ns.p(local);
        let mut xml = String::with_capacity(640);

        write!(xml, "<{}{}>", p("pic"), ns.local_declarations())
            .map_err(|e| OoxmlError::Xml(e.to_string()))?;
        write!(xml, "<{}>", p("nvPicPr")).map_err(|e| OoxmlError::Xml(e.to_string()))?;
        write!(
            xml,
            r#"<{} id="{}" name="{}" descr="{}"/>"#,
            p("cNvPr"),
            self.id,
            escape(self.name.as_str()),
            escape(self.description.as_str())
        )
        .map_err(|e| OoxmlError::Xml(e.to_string()))?;
        write!(
            xml,
            r#"<{}><{} noChangeAspect="1"/></{}><{}/></{}>"#,
            p("cNvPicPr"),
            a("picLocks"),
            p("cNvPicPr"),
            p("nvPr"),
            p("nvPicPr")
        )
        .map_err(|e| OoxmlError::Xml(e.to_string()))?;

        write!(
            xml,
            r#"<{}><{} {}="{}"/><{}><{}/></{}></{}>"#,
            p("blipFill"),
            a("blip"),
            ns.r("embed"),
            escape(self.r_id.as_str()),
            a("stretch"),
            a("fillRect"),
            a("stretch"),
            p("blipFill")
        )
        .map_err(|e| OoxmlError::Xml(e.to_string()))?;

        write!(
            xml,
            r#"<{}><{}><{} x="{}" y="{}"/><{} cx="{}" cy="{}"/></{}>"#,
            p("spPr"),
            a("xfrm"),
            a("off"),
            self.left,
            self.top,
            a("ext"),
            self.width,
            self.height,
            a("xfrm")
        )
        .map_err(|e| OoxmlError::Xml(e.to_string()))?;
        write!(
            xml,
            r#"<{} prst="rect"><{}/></{}></{}></{}>"#,
            a("prstGeom"),
            a("avLst"),
            a("prstGeom"),
            p("spPr"),
            p("pic")
        )
        .map_err(|e| OoxmlError::Xml(e.to_string()))?;

        Ok(xml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_picture_xml() {
        let pic = PictureShape::new(5, "rId3".to_string(), "colorbar_vertical.png".to_string())
            .with_position(8_686_800, 2_743_200)
            .with_size(457_200, 1_828_800);

        let xml = pic.to_xml(&NamespacePrefixes::default()).unwrap();
        assert_eq!(
            xml,
            concat!(
                r#"<p:pic><p:nvPicPr><p:cNvPr id="5" name="Picture 4" descr="colorbar_vertical.png"/>"#,
                r#"<p:cNvPicPr><a:picLocks noChangeAspect="1"/></p:cNvPicPr><p:nvPr/></p:nvPicPr>"#,
                r#"<p:blipFill><a:blip r:embed="rId3"/><a:stretch><a:fillRect/></a:stretch></p:blipFill>"#,
                r#"<p:spPr><a:xfrm><a:off x="8686800" y="2743200"/><a:ext cx="457200" cy="1828800"/></a:xfrm>"#,
                r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr></p:pic>"#
            )
        );
    }

    #[test]
    fn test_description_is_escaped() {
        let pic = PictureShape::new(2, "rId1".to_string(), "a<b>&\"c\".png".to_string());
        let xml = pic.to_xml(&NamespacePrefixes::default()).unwrap();
        assert!(xml.contains(r#"descr="a&lt;b&gt;&amp;&quot;c&quot;.png""#));
    }
}
