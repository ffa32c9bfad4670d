/// Site content shared between the state layer and the UI layer
///
/// The content file plays the role of the page markup: it lists the page
/// sections, the navigation links, the gallery filter buttons and the
/// gallery items. It is read once at start-up and never mutated.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{Result, SiteError};

/// Content bundled with the binary, used when no content file is configured
const BUNDLED_CONTENT: &str = include_str!("../../assets/content.json");

/// The image shown by a gallery card and by the lightbox
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImageRef {
    /// Image path, relative to the content file's directory
    pub src: String,
    #[serde(rename = "alt")]
    pub alt_text: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// A single gallery entry
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GalleryItem {
    /// Tag used for filter matching (e.g. "history")
    pub category: String,
    pub image: ImageRef,
}

/// A gallery filter button; `filter` is a category or the "all" sentinel
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FilterButton {
    pub label: String,
    pub filter: String,
}

/// A header/drawer navigation link pointing at a section anchor ("#about")
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NavLink {
    pub label: String,
    pub href: String,
}

/// What a section renders besides its heading and body text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    #[default]
    Text,
    Gallery,
    Contact,
    Donate,
}

/// A page section; sections are laid out top to bottom at fixed heights so
/// anchor offsets are known without measuring the layout
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Section {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub kind: SectionKind,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct SiteContent {
    pub title: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub nav: Vec<NavLink>,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub filters: Vec<FilterButton>,
    #[serde(default)]
    pub gallery: Vec<GalleryItem>,
    /// Directory image sources are resolved against
    #[serde(skip)]
    pub asset_root: PathBuf,
}

impl SiteContent {
    /// Parse content from a JSON string
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The content shipped inside the binary
    pub fn bundled() -> std::result::Result<Self, serde_json::Error> {
        let mut content = Self::from_json(BUNDLED_CONTENT)?;
        content.asset_root = bundled_asset_root();
        Ok(content)
    }

    /// Load a content file; image sources resolve relative to its directory
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| SiteError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut content = Self::from_json(&raw).map_err(|source| SiteError::Json {
            path: path.to_path_buf(),
            source,
        })?;

        if content.sections.is_empty() {
            return Err(SiteError::EmptyContent(path.to_path_buf()));
        }

        content.asset_root = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Ok(content)
    }

    /// Full path of an image source
    pub fn resolve_asset(&self, src: &str) -> PathBuf {
        self.asset_root.join(src)
    }

    #[cfg(test)]
    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.id == id)
    }
}

/// Where the bundled images live at runtime.
///
/// An `assets/` directory next to the executable wins, then one in the
/// working directory, then the source tree the binary was built from.
fn bundled_asset_root() -> PathBuf {
    let beside_exe = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("assets")));
    let in_cwd = std::env::current_dir().ok().map(|dir| dir.join("assets"));

    beside_exe
        .into_iter()
        .chain(in_cwd)
        .find(|dir| dir.join("images").is_dir())
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_content_parses() {
        let content = SiteContent::bundled().unwrap();

        assert!(!content.sections.is_empty());
        assert!(!content.gallery.is_empty());
        assert!(content.filters.iter().any(|f| f.filter == "all"));
        // Every nav link targets an existing section
        for link in &content.nav {
            let id = link.href.trim_start_matches('#');
            assert!(content.section(id).is_some(), "dangling link {}", link.href);
        }
    }

    #[test]
    fn test_bundled_images_exist() {
        let content = SiteContent::bundled().unwrap();
        for item in &content.gallery {
            let path = content.resolve_asset(&item.image.src);
            assert!(path.is_file(), "missing image {}", path.display());
        }
    }

    #[test]
    fn test_optional_image_text_defaults_to_empty() {
        let item: GalleryItem = serde_json::from_str(
            r#"{ "category": "culture", "image": { "src": "a.jpg", "alt": "Dance" } }"#,
        )
        .unwrap();

        assert_eq!(item.image.alt_text, "Dance");
        assert_eq!(item.image.title, "");
        assert_eq!(item.image.description, "");
    }

    #[test]
    fn test_section_kind_defaults_to_text() {
        let section: Section =
            serde_json::from_str(r#"{ "id": "about", "title": "About", "height": 400 }"#).unwrap();
        assert_eq!(section.kind, SectionKind::Text);
    }

    #[test]
    fn test_content_file_without_sections_is_rejected() {
        let dir = std::env::temp_dir().join("heritage-site-content-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("empty.json");
        std::fs::write(&path, r#"{ "title": "Empty" }"#).unwrap();

        let err = SiteContent::from_path(&path).unwrap_err();
        assert!(matches!(err, SiteError::EmptyContent(_)));
    }

    #[test]
    fn test_assets_resolve_next_to_content_file() {
        let dir = std::env::temp_dir().join("heritage-site-content-root");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("site.json");
        std::fs::write(
            &path,
            r#"{ "title": "T", "sections": [{ "id": "home", "title": "Home", "height": 300 }] }"#,
        )
        .unwrap();

        let content = SiteContent::from_path(&path).unwrap();
        assert_eq!(content.resolve_asset("images/a.jpg"), dir.join("images/a.jpg"));
    }
}
