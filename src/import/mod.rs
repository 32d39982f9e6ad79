//! Boundary import from user-supplied files.
//!
//! Parsers follow a soft-failure contract: content that is not a usable
//! boundary (wrong format, no polygon, too few points) yields `None`. Only
//! environment failures such as an unreadable file surface as errors.

mod geojson_file;
mod kml;

pub use geojson_file::parse_geojson;
pub use kml::parse_kml;

use crate::error::Result;
use crate::geojson::{geojson_to_ring, polygon_from_positions};
use crate::validation::validate_ring_vertices;
use geojson::{Geometry, Position};
use std::path::{Path, PathBuf};

/// A named blob of text handed over by an upload dialog or the filesystem.
pub trait BoundarySource {
    /// File name used to choose a parser, e.g. `"north-field.kml"`.
    fn name(&self) -> &str;

    /// Full text content of the file. Bytes that are not UTF-8 are replaced,
    /// not reported, so a binary upload reaches the parser and soft-fails.
    fn text(&self) -> std::io::Result<String>;
}

/// A boundary file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    name: String,
}

impl FileSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BoundarySource for FileSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn text(&self) -> std::io::Result<String> {
        let bytes = std::fs::read(&self.path)?;
        match String::from_utf8(bytes) {
            Ok(text) => Ok(text),
            Err(e) => {
                log::debug!("{} is not valid UTF-8: {}", self.name, e.utf8_error());
                Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
            }
        }
    }
}

/// Boundary text already held in memory.
#[derive(Debug, Clone)]
pub struct TextSource {
    name: String,
    text: String,
}

impl TextSource {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

impl BoundarySource for TextSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn text(&self) -> std::io::Result<String> {
        Ok(self.text.clone())
    }
}

/// Supported boundary file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryFormat {
    Kml,
    GeoJson,
}

impl BoundaryFormat {
    /// Format implied by a file name's extension, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        let extension = Path::new(name).extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "kml" => Some(Self::Kml),
            "geojson" | "json" => Some(Self::GeoJson),
            _ => None,
        }
    }

    /// Format guessed from the first non-whitespace character.
    pub fn sniff(text: &str) -> Option<Self> {
        match text.trim_start().chars().next()? {
            '<' => Some(Self::Kml),
            '{' => Some(Self::GeoJson),
            _ => None,
        }
    }

    /// Run the parser for this format.
    pub fn parse(self, text: &str) -> Option<Geometry> {
        match self {
            Self::Kml => parse_kml(text),
            Self::GeoJson => parse_geojson(text),
        }
    }
}

/// Closes an imported outer ring, keeping it only if it has at least three
/// distinct vertices.
fn boundary_polygon(exterior: Vec<Position>) -> Option<Geometry> {
    let polygon = polygon_from_positions(exterior);
    let ring = match geojson_to_ring(&polygon) {
        Ok(ring) => ring,
        Err(e) => {
            log::debug!("Imported boundary is not a polygon ring: {}", e);
            return None;
        }
    };
    if let Err(e) = validate_ring_vertices(&ring) {
        log::debug!("Imported boundary is degenerate: {}", e);
        return None;
    }
    Some(polygon)
}

/// Reads a boundary source and parses it as KML or GeoJSON.
///
/// The parser is chosen from the source name's extension, falling back to the
/// content when the extension is unknown. I/O errors propagate; content that
/// is not a usable boundary is `Ok(None)`.
///
/// # Examples
///
/// ```
/// use parcel::import::{TextSource, import_boundary};
///
/// let upload = TextSource::new(
///     "orchard.kml",
///     "<coordinates>-72.0,44.0 -72.0,44.001 -71.999,44.001</coordinates>",
/// );
/// assert!(import_boundary(&upload)?.is_some());
///
/// let photo = TextSource::new("orchard.kml", "not a boundary");
/// assert!(import_boundary(&photo)?.is_none());
/// # Ok::<(), parcel::ParcelError>(())
/// ```
pub fn import_boundary(source: &dyn BoundarySource) -> Result<Option<Geometry>> {
    let text = source.text()?;

    let Some(format) =
        BoundaryFormat::from_name(source.name()).or_else(|| BoundaryFormat::sniff(&text))
    else {
        log::debug!("Unrecognized boundary file: {}", source.name());
        return Ok(None);
    };

    let geometry = format.parse(&text);
    if geometry.is_none() {
        log::info!(
            "No usable boundary in {} (parsed as {:?})",
            source.name(),
            format
        );
    }
    Ok(geometry)
}

/// Reads and parses a boundary file from disk.
pub fn import_file<P: AsRef<Path>>(path: P) -> Result<Option<Geometry>> {
    import_boundary(&FileSource::new(path.as_ref()))
}
