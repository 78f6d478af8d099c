/// The PackURI value type.
///
/// A PackURI is a part name within an OPC package: an absolute, slash-separated
/// path such as `/ppt/slides/slide1.xml`. The ZIP member name is the same path
/// without its leading slash.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackURI {
    uri: String,
}

/// The package pseudo-partname, representing the package itself
pub const PACKAGE_URI: &str = "/";

/// The URI for the [Content_Types].xml part
pub const CONTENT_TYPES_URI: &str = "/[Content_Types].xml";

impl PackURI {
    /// Create a new PackURI, which must begin with a forward slash.
    pub fn new<S: Into<String>>(uri: S) -> Result<Self, String> {
        let uri = uri.into();
        if !uri.starts_with('/') {
            return Err(format!("PackURI must begin with slash, got '{}'", uri));
        }
        Ok(PackURI { uri })
    }

    /// Build the PackURI for a ZIP member name (`ppt/slides/slide1.xml`).
    pub fn from_membername(membername: &str) -> Result<Self, String> {
        Self::new(format!("/{}", membername.trim_start_matches('/')))
    }

    /// Resolve a relationship target such as `../media/image1.png` against
    /// the directory `base_uri` of the source part.
    ///
    /// Absolute targets (leading slash) are taken as-is.
    pub fn from_rel_ref(base_uri: &str, relative_ref: &str) -> Result<Self, String> {
        let joined = if relative_ref.starts_with('/') {
            relative_ref.to_string()
        } else {
            format!("{}/{}", base_uri.trim_end_matches('/'), relative_ref)
        };

        let mut segments: Vec<&str> = Vec::new();
        for segment in joined.split('/') {
            match segment {
                "" | "." => {},
                ".." => {
                    segments.pop();
                },
                other => segments.push(other),
            }
        }

        Self::new(format!("/{}", segments.join("/")))
    }

    /// Directory portion, e.g. `/ppt/slides` for `/ppt/slides/slide1.xml`.
    ///
    /// The package pseudo-partname and top-level parts return `/`.
    pub fn base_uri(&self) -> &str {
        match self.uri.rfind('/') {
            Some(0) | None => "/",
            Some(pos) => &self.uri[..pos],
        }
    }

    /// Filename portion, e.g. `slide1.xml`. Empty for the package pseudo-partname.
    pub fn filename(&self) -> &str {
        self.uri.rsplit_once('/').map_or("", |(_, name)| name)
    }

    /// Extension without the leading period.
    pub fn ext(&self) -> &str {
        self.filename().rsplit_once('.').map_or("", |(_, ext)| ext)
    }

    /// Trailing number of a tuple partname (21 for `/ppt/slides/slide21.xml`),
    /// or None for singleton partnames such as `/ppt/presentation.xml`.
    pub fn idx(&self) -> Option<u32> {
        let filename = self.filename();
        let stem = filename.rsplit_once('.').map_or(filename, |(stem, _)| stem);
        let digits = stem.len() - stem.trim_end_matches(|c: char| c.is_ascii_digit()).len();
        if digits == 0 || digits == stem.len() {
            return None;
        }
        atoi_simd::parse::<u32>(&stem.as_bytes()[stem.len() - digits..]).ok()
    }

    /// The ZIP member name (URI without its leading slash).
    pub fn membername(&self) -> &str {
        &self.uri[1..]
    }

    /// Relative reference from the directory `base_uri` to this part, as written
    /// into a `.rels` Target attribute.
    ///
    /// For example `/ppt/media/image1.png` seen from `/ppt/slides` is
    /// `../media/image1.png`.
    pub fn relative_ref(&self, base_uri: &str) -> String {
        if base_uri == "/" {
            return self.membername().to_string();
        }

        let from: Vec<&str> = base_uri.split('/').filter(|s| !s.is_empty()).collect();
        let to: Vec<&str> = self.uri.split('/').filter(|s| !s.is_empty()).collect();
        let common = from.iter().zip(&to).take_while(|(a, b)| a == b).count();

        let mut parts: Vec<&str> = std::iter::repeat_n("..", from.len() - common).collect();
        parts.extend_from_slice(&to[common..]);
        parts.join("/")
    }

    /// PackURI of the `.rels` part holding this part's relationships,
    /// e.g. `/ppt/slides/_rels/slide1.xml.rels`.
    pub fn rels_uri(&self) -> Result<PackURI, String> {
        let base = self.base_uri().trim_end_matches('/');
        Self::new(format!("{}/_rels/{}.rels", base, self.filename()))
    }

    /// Get the full URI string.
    pub fn as_str(&self) -> &str {
        &self.uri
    }
}

impl std::fmt::Display for PackURI {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.uri)
    }
}

impl AsRef<str> for PackURI {
    fn as_ref(&self) -> &str {
        &self.uri
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packuri_new() {
        assert!(PackURI::new("/ppt/presentation.xml").is_ok());
        assert!(PackURI::new("ppt/presentation.xml").is_err());
    }

    #[test]
    fn test_components() {
        let uri = PackURI::new("/ppt/slides/slide21.xml").unwrap();
        assert_eq!(uri.base_uri(), "/ppt/slides");
        assert_eq!(uri.filename(), "slide21.xml");
        assert_eq!(uri.ext(), "xml");
        assert_eq!(uri.idx(), Some(21));
        assert_eq!(uri.membername(), "ppt/slides/slide21.xml");

        let root = PackURI::new(PACKAGE_URI).unwrap();
        assert_eq!(root.base_uri(), "/");
        assert_eq!(root.filename(), "");
        assert_eq!(root.membername(), "");

        assert_eq!(PackURI::new("/ppt/presentation.xml").unwrap().idx(), None);
    }

    #[test]
    fn test_from_rel_ref() {
        let uri = PackURI::from_rel_ref("/ppt/slides", "../media/image1.png").unwrap();
        assert_eq!(uri.as_str(), "/ppt/media/image1.png");

        let uri = PackURI::from_rel_ref("/", "ppt/presentation.xml").unwrap();
        assert_eq!(uri.as_str(), "/ppt/presentation.xml");

        let uri = PackURI::from_rel_ref("/xl", "/xl/worksheets/sheet1.xml").unwrap();
        assert_eq!(uri.as_str(), "/xl/worksheets/sheet1.xml");
    }

    #[test]
    fn test_relative_ref() {
        let uri = PackURI::new("/ppt/media/image1.png").unwrap();
        assert_eq!(uri.relative_ref("/ppt/slides"), "../media/image1.png");
        assert_eq!(uri.relative_ref("/ppt"), "media/image1.png");
        assert_eq!(uri.relative_ref("/"), "ppt/media/image1.png");
    }

    #[test]
    fn test_rels_uri() {
        let uri = PackURI::new("/ppt/slides/slide1.xml").unwrap();
        assert_eq!(uri.rels_uri().unwrap().as_str(), "/ppt/slides/_rels/slide1.xml.rels");
        let root = PackURI::new(PACKAGE_URI).unwrap();
        assert_eq!(root.rels_uri().unwrap().as_str(), "/_rels/.rels");
    }
}
