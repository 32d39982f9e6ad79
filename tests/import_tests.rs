use geojson::{Geometry, Value};
use parcel::import::{FileSource, import_boundary, import_file, parse_geojson, parse_kml};
use parcel::{GeoPoint, Measurer, ParcelError, geojson_to_ring};
use std::io::Write;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn exterior(geometry: &Geometry) -> &Vec<Vec<f64>> {
    match &geometry.value {
        Value::Polygon(rings) => &rings[0],
        other => panic!("expected polygon, got {other:?}"),
    }
}

fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write temp file");
    file
}

const FIELD_KML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2">
  <Document>
    <Placemark>
      <name>South field</name>
      <Polygon>
        <outerBoundaryIs>
          <LinearRing>
            <coordinates>-72.0,44.0,0 -72.0,44.001,0 -71.999,44.001,0 -71.999,44.0,0</coordinates>
          </LinearRing>
        </outerBoundaryIs>
      </Polygon>
    </Placemark>
  </Document>
</kml>"#;

/// Test 1: the literal coordinates scenario yields a closed 5-position ring.
#[test]
fn test_kml_literal_scenario() {
    init_logging();
    let kml = "<coordinates>-72.0,44.0,0 -72.0,44.001,0 -71.999,44.001,0 -71.999,44.0,0</coordinates>";
    let polygon = parse_kml(kml).expect("valid boundary");
    let positions = exterior(&polygon);

    assert_eq!(positions.len(), 5);
    assert_eq!(positions.first(), Some(&vec![-72.0, 44.0]));
    assert_eq!(positions.last(), Some(&vec![-72.0, 44.0]));
}

/// Test 2: malformed KML is a soft failure.
#[test]
fn test_kml_soft_failures() {
    init_logging();
    assert!(parse_kml("<kml><Placemark><name>x</name></Placemark></kml>").is_none());
    assert!(parse_kml("<coordinates>-72.0,44.0 bogus -71.999,44.001</coordinates>").is_none());
    assert!(parse_kml("<kml><coordinates>1,1 2,1 2,2</kml>").is_none());
}

/// Test 3: a FeatureCollection returns its first polygon, or nothing.
#[test]
fn test_geojson_feature_collection() {
    init_logging();
    let with_polygon = r#"{
        "type": "FeatureCollection",
        "features": [
            { "type": "Feature", "properties": {}, "geometry": { "type": "LineString", "coordinates": [[-72.0, 44.0], [-72.0, 44.001]] } },
            { "type": "Feature", "properties": {}, "geometry": { "type": "Polygon", "coordinates": [[[-72.0, 44.0], [-72.0, 44.001], [-71.999, 44.001], [-72.0, 44.0]]] } }
        ]
    }"#;
    let polygon = parse_geojson(with_polygon).expect("polygon feature");
    assert_eq!(exterior(&polygon).len(), 4);

    let without_polygon = r#"{
        "type": "FeatureCollection",
        "features": [
            { "type": "Feature", "properties": {}, "geometry": { "type": "Point", "coordinates": [-72.0, 44.0] } }
        ]
    }"#;
    assert!(parse_geojson(without_polygon).is_none());
}

/// Test 4: importing a KML file from disk and measuring it end to end.
#[test]
fn test_import_kml_file_and_measure() {
    init_logging();
    let file = write_temp(".kml", FIELD_KML);

    let polygon = import_file(file.path())
        .expect("readable file")
        .expect("valid boundary");
    let ring = geojson_to_ring(&polygon).expect("polygon");
    assert_eq!(ring.len(), 4);
    assert_eq!(ring[0], GeoPoint::new(44.0, -72.0));

    let summary = Measurer::default().summarize(&ring).expect("valid ring");
    assert!((summary.acres - 2.2).abs() < 0.1, "got {}", summary.acres);
    assert!(summary.perimeter_ft > 1200 && summary.perimeter_ft < 1400);
}

/// Test 5: a GeoJSON file with a `.json` extension.
#[test]
fn test_import_geojson_file() {
    init_logging();
    let file = write_temp(
        ".json",
        r#"{"type":"Feature","properties":{"name":"garden"},"geometry":{"type":"Polygon","coordinates":[[[-72.0,44.0],[-72.0,44.0002],[-71.9997,44.0002],[-72.0,44.0]]]}}"#,
    );
    let source = FileSource::new(file.path());
    assert!(import_boundary(&source).expect("readable").is_some());
}

/// Test 6: bad content is `Ok(None)`, an unreadable file is an error.
#[test]
fn test_import_error_policy() {
    init_logging();
    let file = write_temp(".geojson", "this is not geojson");
    assert!(import_file(file.path()).expect("readable").is_none());

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let missing = dir.path().join("missing.kml");
    assert!(matches!(import_file(&missing), Err(ParcelError::Io(_))));
}

/// Test 7: a binary file under a boundary extension is bad content, not an I/O error.
#[test]
fn test_import_binary_file_is_soft_failure() {
    init_logging();
    let zipped = [0x50, 0x4b, 0x03, 0x04, 0xff, 0xfe, 0x00];

    for suffix in [".kml", ".json"] {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .expect("Failed to create temp file");
        file.write_all(&zipped).expect("Failed to write temp file");

        let result = import_file(file.path()).expect("readable file");
        assert!(result.is_none(), "{suffix} should not yield a boundary");
    }
}

/// Test 8: degenerate or holed boundaries come back as a single closed ring, or nothing.
#[test]
fn test_import_normalizes_boundaries() {
    init_logging();
    assert!(parse_kml("<coordinates>1,1 2,2 1,1</coordinates>").is_none());
    assert!(parse_kml("<coordinates>1,1 1,1 1,1 1,1</coordinates>").is_none());

    let holed = r#"{"type":"Polygon","coordinates":[
        [[0.0,0.0],[0.0,1.0],[1.0,1.0],[1.0,0.0]],
        [[0.2,0.2],[0.2,0.4],[0.4,0.4],[0.2,0.2]]
    ]}"#;
    let polygon = parse_geojson(holed).expect("outer ring");
    match &polygon.value {
        Value::Polygon(rings) => assert_eq!(rings.len(), 1),
        other => panic!("expected polygon, got {other:?}"),
    }
    let positions = exterior(&polygon);
    assert_eq!(positions.len(), 5);
    assert_eq!(positions.first(), positions.last());
    assert_eq!(geojson_to_ring(&polygon).expect("polygon").len(), 4);
}
