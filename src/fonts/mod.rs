//! Installed font enumeration
//!
//! The catalog is an owned cache: it asks its [`FontSource`] once and
//! keeps the answer until [`FontCatalog::refresh`] is called.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

const FONT_EXTENSIONS: [&str; 4] = ["ttf", "otf", "ttc", "otc"];

/// One installed font face, identified by family and style names
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct FontFace {
    pub family: String,
    /// Style qualifier, empty for the family default
    pub style: String,
    pub path: Option<PathBuf>,
}

impl FontFace {
    pub fn new(family: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            style: style.into(),
            path: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Derive a face from a font file named `Family-Style.ext`
    pub fn from_file(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        if !FONT_EXTENSIONS.contains(&extension.as_str()) {
            return None;
        }
        let stem = path.file_stem()?.to_str()?;
        let (family, style) = match stem.split_once('-') {
            Some((family, style)) => (family, style),
            None => (stem, ""),
        };
        if family.is_empty() {
            return None;
        }
        Some(Self::new(family, style).with_path(path))
    }

    /// `family` or `family-style`, the name overlays are drawn with
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for FontFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.style.is_empty() {
            write!(f, "{}", self.family)
        } else {
            write!(f, "{}-{}", self.family, self.style)
        }
    }
}

/// Anything that can list the fonts installed on the platform
pub trait FontSource: Send + Sync {
    fn faces(&self) -> Vec<FontFace>;
}

/// A fixed list of faces
#[derive(Debug, Clone, Default)]
pub struct StaticFontSource(pub Vec<FontFace>);

impl FontSource for StaticFontSource {
    fn faces(&self) -> Vec<FontFace> {
        self.0.clone()
    }
}

/// Scans font directories for font files
#[derive(Debug, Clone)]
pub struct DirectoryFontSource {
    directories: Vec<PathBuf>,
}

impl DirectoryFontSource {
    pub fn new(directories: Vec<PathBuf>) -> Self {
        Self { directories }
    }

    /// User and system font directories for the current platform
    pub fn platform() -> Self {
        let mut directories = Vec::new();
        if let Some(user_fonts) = dirs::font_dir() {
            directories.push(user_fonts);
        }
        #[cfg(target_os = "macos")]
        directories.extend([
            PathBuf::from("/Library/Fonts"),
            PathBuf::from("/System/Library/Fonts"),
        ]);
        #[cfg(target_os = "linux")]
        directories.extend([
            PathBuf::from("/usr/share/fonts"),
            PathBuf::from("/usr/local/share/fonts"),
        ]);
        #[cfg(target_os = "windows")]
        directories.push(PathBuf::from("C:\\Windows\\Fonts"));
        Self { directories }
    }

    pub fn with_directories(mut self, extra: impl IntoIterator<Item = PathBuf>) -> Self {
        self.directories.extend(extra);
        self
    }

    pub fn directories(&self) -> &[PathBuf] {
        &self.directories
    }
}

impl FontSource for DirectoryFontSource {
    fn faces(&self) -> Vec<FontFace> {
        // Keyed by label so the first file found for a name wins.
        let mut faces = BTreeMap::new();
        for directory in &self.directories {
            if !directory.is_dir() {
                continue;
            }
            for entry in WalkDir::new(directory).follow_links(true).into_iter().flatten() {
                if !entry.file_type().is_file() {
                    continue;
                }
                if let Some(face) = FontFace::from_file(entry.path()) {
                    faces.entry(face.label()).or_insert(face);
                }
            }
        }
        debug!("Found {} font faces on disk", faces.len());
        faces.into_values().collect()
    }
}

/// Owned, lazily filled cache of installed faces
pub struct FontCatalog {
    source: Box<dyn FontSource>,
    faces: Option<Vec<FontFace>>,
}

impl FontCatalog {
    pub fn new(source: impl FontSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            faces: None,
        }
    }

    /// All known faces, enumerating the source on first use
    pub fn faces(&mut self) -> &[FontFace] {
        let source = &self.source;
        self.faces.get_or_insert_with(|| {
            let mut faces = source.faces();
            faces.sort();
            info!("Font catalog holds {} faces", faces.len());
            faces
        })
    }

    /// Forget the cached list; the next query enumerates again
    pub fn refresh(&mut self) {
        debug!("Font catalog refresh requested");
        self.faces = None;
    }

    /// Find a face by its label
    pub fn resolve(&mut self, label: &str) -> Option<&FontFace> {
        self.faces().iter().find(|face| face.label() == label)
    }

    /// Labels of every known face, in catalog order
    pub fn labels(&mut self) -> Vec<String> {
        self.faces().iter().map(FontFace::label).collect()
    }
}

impl fmt::Debug for FontCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontCatalog")
            .field("cached", &self.faces.as_ref().map(Vec::len))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingSource {
        calls: Arc<AtomicUsize>,
    }

    impl FontSource for CountingSource {
        fn faces(&self) -> Vec<FontFace> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            vec![FontFace::new("Menlo", "Bold"), FontFace::new("Arial", "")]
        }
    }

    #[test]
    fn test_face_from_file_name() {
        let face = FontFace::from_file(Path::new("/fonts/HiraginoSans-W3.otf")).expect("face");
        assert_eq!(face.family, "HiraginoSans");
        assert_eq!(face.style, "W3");
        assert_eq!(face.label(), "HiraginoSans-W3");

        let plain = FontFace::from_file(Path::new("Arial.TTF")).expect("face");
        assert_eq!(plain.label(), "Arial");

        assert!(FontFace::from_file(Path::new("notes.txt")).is_none());
        assert!(FontFace::from_file(Path::new("-Bold.ttf")).is_none());
    }

    #[test]
    fn test_catalog_caches_until_refresh() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut catalog = FontCatalog::new(CountingSource {
            calls: calls.clone(),
        });

        assert_eq!(catalog.labels(), vec!["Arial", "Menlo-Bold"]);
        assert_eq!(catalog.faces().len(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        catalog.refresh();
        assert_eq!(catalog.faces().len(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_resolve_by_label() {
        let mut catalog = FontCatalog::new(StaticFontSource(vec![
            FontFace::new("Menlo", "Bold"),
            FontFace::new("Menlo", ""),
        ]));
        assert_eq!(
            catalog.resolve("Menlo-Bold").map(|face| face.style.as_str()),
            Some("Bold")
        );
        assert!(catalog.resolve("Menlo-Italic").is_none());
    }

    #[test]
    fn test_directory_source_scans_recursively() {
        let dir = tempfile::tempdir().expect("temp dir");
        let nested = dir.path().join("truetype");
        std::fs::create_dir_all(&nested).expect("mkdir");
        std::fs::write(nested.join("Inter-Bold.ttf"), b"").expect("write");
        std::fs::write(dir.path().join("Inter.otf"), b"").expect("write");
        std::fs::write(dir.path().join("readme.md"), b"").expect("write");

        let source = DirectoryFontSource::new(vec![dir.path().to_path_buf()]);
        let labels: Vec<String> = source.faces().iter().map(FontFace::label).collect();
        assert_eq!(labels, vec!["Inter", "Inter-Bold"]);
    }
}
