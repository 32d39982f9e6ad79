//! KML boundary import.

use geojson::{Geometry, Position};
use quick_xml::Reader;
use quick_xml::events::Event;

use super::boundary_polygon;

const COORDINATES: &[u8] = b"coordinates";

/// Parses the first `<coordinates>` element of a KML document into a polygon.
///
/// Each whitespace-separated `lng,lat[,alt]` tuple becomes one position; the
/// altitude is dropped and tuples that do not hold two finite numbers are
/// skipped. The ring is closed if the file left it open.
///
/// Returns `None` when the text is not well-formed XML, has no
/// `<coordinates>` element, or yields fewer than three distinct points.
///
/// # Examples
///
/// ```
/// use parcel::import::parse_kml;
///
/// let kml = "<coordinates>-72.0,44.0,0 -72.0,44.001,0 -71.999,44.001,0</coordinates>";
/// assert!(parse_kml(kml).is_some());
/// assert!(parse_kml("<Placemark/>").is_none());
/// ```
pub fn parse_kml(text: &str) -> Option<Geometry> {
    let coordinates = match first_coordinates_text(text) {
        Ok(Some(coordinates)) => coordinates,
        Ok(None) => {
            log::debug!("KML contains no <coordinates> element");
            return None;
        }
        Err(e) => {
            log::debug!("KML is not well-formed: {}", e);
            return None;
        }
    };

    let tokens: Vec<&str> = coordinates.split_whitespace().collect();
    let positions: Vec<Position> = tokens
        .iter()
        .filter_map(|token| parse_coordinate_token(token))
        .collect();

    let skipped = tokens.len() - positions.len();
    if skipped > 0 {
        log::debug!("Skipped {} unparseable KML coordinate tuple(s)", skipped);
    }

    boundary_polygon(positions)
}

/// Parses one `lng,lat[,alt]` tuple into a GeoJSON position.
fn parse_coordinate_token(token: &str) -> Option<Position> {
    let mut parts = token.split(',');
    let lng: f64 = parts.next()?.trim().parse().ok()?;
    let lat: f64 = parts.next()?.trim().parse().ok()?;
    // Anything after the altitude is not a KML tuple.
    if parts.nth(1).is_some() {
        return None;
    }

    (lng.is_finite() && lat.is_finite()).then(|| vec![lng, lat])
}

/// Text of the first `<coordinates>` element, read through to the end of the
/// document so structural errors anywhere are reported.
fn first_coordinates_text(text: &str) -> Result<Option<String>, String> {
    let mut reader = Reader::from_str(text);
    let mut depth: usize = 0;
    let mut capture: Option<String> = None;
    let mut found: Option<String> = None;

    loop {
        match reader.read_event().map_err(|e| e.to_string())? {
            Event::Start(start) => {
                depth += 1;
                if found.is_none() && capture.is_none() && start.local_name().as_ref() == COORDINATES
                {
                    capture = Some(String::new());
                }
            }
            Event::End(end) => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| "unexpected closing tag".to_string())?;
                if capture.is_some() && end.local_name().as_ref() == COORDINATES {
                    found = capture.take();
                }
            }
            Event::Empty(empty) => {
                if found.is_none() && capture.is_none() && empty.local_name().as_ref() == COORDINATES
                {
                    found = Some(String::new());
                }
            }
            Event::Text(text) => {
                if let Some(buf) = capture.as_mut() {
                    buf.push_str(&text.unescape().map_err(|e| e.to_string())?);
                }
            }
            Event::CData(data) => {
                if let Some(buf) = capture.as_mut() {
                    buf.push_str(&String::from_utf8_lossy(&data));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if depth != 0 {
        return Err(format!("{} element(s) left unclosed", depth));
    }

    Ok(found)
}
