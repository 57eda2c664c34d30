//! geojson-shapes - Read GeoJSON polygons into shape-layer records
//!
//! ```
//! let text = r#"{"type":"Polygon","coordinates":[[[0,0],[1,0],[1,1],[0,0]]]}"#;
//! let shapes = geojson_shapes::read_polygons(text).unwrap();
//! assert_eq!(shapes[0].points(), vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
//! ```

pub mod config;
pub mod document;
pub mod domain;
pub mod error;
pub mod geometry;
pub mod layers;
pub mod reader;

pub use domain::{Coordinate, LayerData, LayerStyle, Properties, ShapeRecord};
pub use error::ReadError;
pub use layers::{get_reader, read_layers};
pub use reader::{ReadSummary, Source, read_polygons, read_polygons_with_summary};
