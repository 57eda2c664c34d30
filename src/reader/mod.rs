//! GeoJSON polygon reader
//!
//! Turns a GeoJSON `FeatureCollection`, `Feature` or bare geometry into
//! [`ShapeRecord`]s, one per `Polygon`, in document order. Other geometry
//! types are skipped and counted, never treated as errors.

pub mod summary;

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::document::{Document, Geometry};
use crate::domain::ShapeRecord;
use crate::error::{ReadError, Result};
pub use summary::ReadSummary;

/// Where the GeoJSON text comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Path(PathBuf),
    Text(String),
}

impl From<&Path> for Source {
    fn from(path: &Path) -> Self {
        Source::Path(path.to_path_buf())
    }
}

impl From<PathBuf> for Source {
    fn from(path: PathBuf) -> Self {
        Source::Path(path)
    }
}

impl From<&str> for Source {
    fn from(text: &str) -> Self {
        Source::Text(text.to_string())
    }
}

impl From<String> for Source {
    fn from(text: String) -> Self {
        Source::Text(text)
    }
}

/// Read every `Polygon` in `source` as a shape record
///
/// # Errors
/// * `ReadError::Parse` if the text is not valid JSON
/// * `ReadError::Schema` if it is not a recognized GeoJSON document, or a
///   `Polygon` lacks usable coordinates
/// * `ReadError::Io` if a path cannot be opened or read
pub fn read_polygons(source: impl Into<Source>) -> Result<Vec<ShapeRecord>> {
    read_polygons_with_summary(source).map(|(records, _)| records)
}

/// Same as [`read_polygons`], also reporting what was skipped
pub fn read_polygons_with_summary(
    source: impl Into<Source>,
) -> Result<(Vec<ShapeRecord>, ReadSummary)> {
    match source.into() {
        Source::Path(path) => {
            let value = parse_file(&path)?;
            let (records, summary) = extract(value)?;
            info!(path = %path.display(), %summary, "read GeoJSON file");
            Ok((records, summary))
        }
        Source::Text(text) => extract(parse_str(&text)?),
    }
}

pub fn read_polygons_from_str(text: &str) -> Result<Vec<ShapeRecord>> {
    extract(parse_str(text)?).map(|(records, _)| records)
}

pub fn read_polygons_from_slice(bytes: &[u8]) -> Result<Vec<ShapeRecord>> {
    let value = serde_json::from_slice(bytes).map_err(ReadError::Parse)?;
    extract(value).map(|(records, _)| records)
}

pub fn read_polygons_from_reader<R: Read>(reader: R) -> Result<Vec<ShapeRecord>> {
    let value = serde_json::from_reader(reader).map_err(|e| {
        if e.is_io() {
            ReadError::Stream(e.into())
        } else {
            ReadError::Parse(e)
        }
    })?;
    extract(value).map(|(records, _)| records)
}

fn parse_str(text: &str) -> Result<Value> {
    serde_json::from_str(text).map_err(ReadError::Parse)
}

/// The file handle is dropped before this returns, on success or failure
fn parse_file(path: &Path) -> Result<Value> {
    let file = File::open(path).map_err(|source| ReadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader).map_err(|e| {
        if e.is_io() {
            ReadError::Io {
                path: path.to_path_buf(),
                source: e.into(),
            }
        } else {
            ReadError::Parse(e)
        }
    })
}

/// Walk a parsed document and collect shape records
fn extract(value: Value) -> Result<(Vec<ShapeRecord>, ReadSummary)> {
    let features = Document::from_value(value)?.into_features();

    let mut summary = ReadSummary {
        features: features.len(),
        ..Default::default()
    };
    let mut records = Vec::new();

    for (index, feature) in features.into_iter().enumerate() {
        let geometry = match feature.geometry {
            Some(g) => g,
            None => {
                debug!(index, "skipping feature without geometry");
                summary.unlocated += 1;
                continue;
            }
        };

        let polygon = match geometry {
            Geometry::Polygon(p) => p,
            Geometry::Other(type_name) => {
                info!(index, geometry = type_name, "skipping non-polygon geometry");
                summary.record_skipped(type_name);
                continue;
            }
        };

        if !polygon.interiors.is_empty() {
            warn!(
                index,
                holes = polygon.interiors.len(),
                "polygon has interior rings; only the exterior ring is read"
            );
            summary.holes_dropped += polygon.interiors.len();
        }

        records.push(ShapeRecord::from_exterior(
            polygon.exterior,
            feature.properties,
        ));
    }

    summary.polygons = records.len();
    Ok((records, summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Coordinate;
    use serde_json::json;
    use std::io::Write;

    const SQUARE_COLLECTION: &str = r#"{"type":"FeatureCollection","features":[{"type":"Feature","properties":{"id":1},"geometry":{"type":"Polygon","coordinates":[[[0,0],[1,0],[1,1],[0,1],[0,0]]]}}]}"#;

    fn polygon_feature(id: u32, ring: Value) -> Value {
        json!({
            "type": "Feature",
            "properties": {"id": id},
            "geometry": {"type": "Polygon", "coordinates": [ring]}
        })
    }

    fn collection(features: Vec<Value>) -> String {
        json!({"type": "FeatureCollection", "features": features}).to_string()
    }

    #[test]
    fn test_square_example() {
        let records = read_polygons(SQUARE_COLLECTION).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].points(),
            vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]
        );
        assert_eq!(records[0].properties["id"], json!(1));
    }

    #[test]
    fn test_record_count_matches_polygon_features() {
        let features = (0..5)
            .map(|i| polygon_feature(i, json!([[0, 0], [i, 0], [i, i], [0, 0]])))
            .collect();
        let records = read_polygons(collection(features)).unwrap();
        assert_eq!(records.len(), 5);
    }

    #[test]
    fn test_closed_ring_loses_one_point() {
        let text = collection(vec![polygon_feature(
            1,
            json!([[0, 0], [4, 0], [4, 4], [2, 6], [0, 4], [0, 0]]),
        )]);
        let records = read_polygons(text).unwrap();
        assert_eq!(records[0].len(), 5);
    }

    #[test]
    fn test_unclosed_ring_unchanged() {
        let text = collection(vec![polygon_feature(1, json!([[0, 0], [4, 0], [4, 4]]))]);
        let records = read_polygons(text).unwrap();
        assert_eq!(records[0].points(), vec![(0.0, 0.0), (4.0, 0.0), (4.0, 4.0)]);
    }

    #[test]
    fn test_mixed_geometries_keep_polygon_order() {
        let text = collection(vec![
            polygon_feature(1, json!([[0, 0], [1, 0], [1, 1], [0, 0]])),
            json!({"type": "Feature", "properties": {"id": 2},
                   "geometry": {"type": "Point", "coordinates": [0, 0]}}),
            json!({"type": "Feature", "properties": {"id": 3},
                   "geometry": {"type": "LineString", "coordinates": [[0, 0], [1, 1]]}}),
            polygon_feature(4, json!([[0, 0], [2, 0], [2, 2], [0, 0]])),
            json!({"type": "Feature", "properties": {"id": 5},
                   "geometry": {"type": "MultiPolygon", "coordinates": []}}),
            polygon_feature(6, json!([[0, 0], [3, 0], [3, 3], [0, 0]])),
        ]);

        let (records, summary) = read_polygons_with_summary(text).unwrap();
        let ids: Vec<_> = records.iter().map(|r| r.properties["id"].clone()).collect();
        assert_eq!(ids, vec![json!(1), json!(4), json!(6)]);
        assert_eq!(summary.polygons, 3);
        assert_eq!(summary.features, 6);
        assert_eq!(summary.skipped_total(), 3);
        assert_eq!(summary.skipped["MultiPolygon"], 1);
    }

    #[test]
    fn test_malformed_json() {
        let err = read_polygons("{not json").unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn test_unknown_document_type() {
        let err = read_polygons(r#"{"type": "FooBar"}"#).unwrap_err();
        assert!(err.is_schema());
    }

    #[test]
    fn test_polygon_missing_coordinates_aborts_whole_read() {
        let text = collection(vec![
            polygon_feature(1, json!([[0, 0], [1, 0], [1, 1], [0, 0]])),
            json!({"type": "Feature", "geometry": {"type": "Polygon"}}),
        ]);
        let err = read_polygons(text).unwrap_err();
        assert!(err.is_schema());
    }

    #[test]
    fn test_single_feature_document() {
        let text = polygon_feature(9, json!([[0, 0], [1, 0], [1, 1], [0, 0]])).to_string();
        let records = read_polygons(text).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].properties["id"], json!(9));
    }

    #[test]
    fn test_bare_polygon_has_empty_properties() {
        let records = read_polygons_from_str(
            r#"{"type":"Polygon","coordinates":[[[0,0],[1,0],[1,1],[0,0]]]}"#,
        )
        .unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].properties.is_empty());
    }

    #[test]
    fn test_bare_point_yields_nothing() {
        let records = read_polygons(r#"{"type":"Point","coordinates":[1,2]}"#).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_missing_properties_defaults_to_empty() {
        let text = collection(vec![json!({
            "type": "Feature",
            "geometry": {"type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 0]]]}
        })]);
        let records = read_polygons(text).unwrap();
        assert!(records[0].properties.is_empty());
    }

    #[test]
    fn test_holes_are_counted() {
        let text = json!({
            "type": "Polygon",
            "coordinates": [
                [[0, 0], [10, 0], [10, 10], [0, 10], [0, 0]],
                [[2, 2], [3, 2], [3, 3], [2, 2]],
                [[5, 5], [6, 5], [6, 6], [5, 5]]
            ]
        })
        .to_string();
        let (records, summary) = read_polygons_with_summary(text).unwrap();
        assert_eq!(records[0].len(), 4);
        assert_eq!(summary.holes_dropped, 2);
    }

    #[test]
    fn test_null_geometry_is_skipped() {
        let text = collection(vec![
            json!({"type": "Feature", "properties": {"id": 1}, "geometry": null}),
            polygon_feature(2, json!([[0, 0], [1, 0], [1, 1], [0, 0]])),
        ]);
        let (records, summary) = read_polygons_with_summary(text).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(summary.unlocated, 1);
    }

    #[test]
    fn test_elevation_passes_through() {
        let records = read_polygons(
            r#"{"type":"Polygon","coordinates":[[[0,0,7],[1,0,7],[1,1,7],[0,0,7]]]}"#,
        )
        .unwrap();
        assert_eq!(records[0].ring[1], Coordinate::with_z(1.0, 0.0, 7.0));
        assert_eq!(records[0].len(), 3);
    }

    #[test]
    fn test_from_slice_and_reader() {
        let from_slice = read_polygons_from_slice(SQUARE_COLLECTION.as_bytes()).unwrap();
        let from_reader = read_polygons_from_reader(SQUARE_COLLECTION.as_bytes()).unwrap();
        assert_eq!(from_slice, from_reader);
        assert_eq!(from_slice.len(), 1);
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("disk gone"))
        }
    }

    #[test]
    fn test_stream_failure_is_io_error() {
        let err = read_polygons_from_reader(FailingReader).unwrap_err();
        assert!(matches!(err, ReadError::Stream(_)));
        assert!(err.is_io());
        assert!(!err.is_parse());
    }

    #[test]
    fn test_truncated_stream_is_parse_error() {
        let err = read_polygons_from_reader(&b"{\"type\": "[..]).unwrap_err();
        assert!(err.is_parse());
    }

    #[derive(Clone, Default)]
    struct CapturedLog(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_skipped_geometry_logged_at_info() {
        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(tracing::Level::INFO)
            .with_ansi(false)
            .finish();

        let records = tracing::subscriber::with_default(subscriber, || {
            read_polygons(r#"{"type":"Point","coordinates":[1,2]}"#).unwrap()
        });
        assert!(records.is_empty());

        let output = String::from_utf8(log.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("INFO"));
        assert!(output.contains("skipping non-polygon geometry"));
        assert!(output.contains("Point"));
    }

    #[test]
    fn test_empty_exterior_ring_is_rejected() {
        let err = read_polygons(r#"{"type":"Polygon","coordinates":[[]]}"#).unwrap_err();
        assert!(err.is_schema());
    }

    #[test]
    fn test_invalid_utf8_is_parse_error() {
        let err = read_polygons_from_slice(&[b'{', 0xff, 0xfe, b'}']).unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn test_read_from_path() {
        let mut file = tempfile::Builder::new()
            .suffix(".geojson")
            .tempfile()
            .unwrap();
        file.write_all(SQUARE_COLLECTION.as_bytes()).unwrap();

        let records = read_polygons(file.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].len(), 4);
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{\"type\": ").unwrap();

        let err = read_polygons(file.path()).unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_polygons(dir.path().join("absent.geojson")).unwrap_err();
        assert!(matches!(err, ReadError::Io { .. }));
    }
}
