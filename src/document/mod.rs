//! Typed view of a GeoJSON document
//!
//! Parsing and RFC 7946 structure checks are done by the `geojson` crate.
//! This module narrows its output to what the reader walks: features with
//! either a polygon or the name of a geometry that is skipped.

use geojson::GeoJson;
use serde_json::Value;

use crate::domain::{Coordinate, Properties};
use crate::error::{ReadError, Result};

/// Every `type` value `geojson` understands, in its canonical casing
const TYPE_NAMES: &[&str] = &[
    "FeatureCollection",
    "Feature",
    "Point",
    "MultiPoint",
    "LineString",
    "MultiLineString",
    "Polygon",
    "MultiPolygon",
    "GeometryCollection",
];

#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    FeatureCollection(Vec<Feature>),
    Feature(Feature),
    /// A bare geometry, read as a single feature without properties
    Geometry(Geometry),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    /// `None` for unlocated features (`"geometry": null`)
    pub geometry: Option<Geometry>,
    pub properties: Properties,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Polygon(PolygonGeometry),
    /// Any other geometry type, kept by name only
    Other(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PolygonGeometry {
    pub exterior: Vec<Coordinate>,
    pub interiors: Vec<Vec<Coordinate>>,
}

impl Document {
    /// Validate a parsed JSON value as a GeoJSON document
    ///
    /// `type` members are matched case-insensitively before `geojson` sees
    /// them, so `"featurecollection"` is accepted.
    pub fn from_value(mut value: Value) -> Result<Self> {
        normalize_type_names(&mut value);
        let geojson = GeoJson::try_from(value)
            .map_err(|e: geojson::Error| ReadError::schema(e.to_string()))?;

        match geojson {
            GeoJson::FeatureCollection(collection) => collection
                .features
                .into_iter()
                .enumerate()
                .map(|(i, feature)| Feature::from_geojson(feature, &format!("feature {i}")))
                .collect::<Result<Vec<_>>>()
                .map(Document::FeatureCollection),
            GeoJson::Feature(feature) => {
                Feature::from_geojson(feature, "feature").map(Document::Feature)
            }
            GeoJson::Geometry(geometry) => {
                Geometry::from_geojson(geometry.value, "geometry").map(Document::Geometry)
            }
        }
    }

    /// Flatten into features in document order
    pub fn into_features(self) -> Vec<Feature> {
        match self {
            Document::FeatureCollection(features) => features,
            Document::Feature(feature) => vec![feature],
            Document::Geometry(geometry) => vec![Feature {
                geometry: Some(geometry),
                properties: Properties::new(),
            }],
        }
    }
}

impl Feature {
    fn from_geojson(feature: geojson::Feature, what: &str) -> Result<Self> {
        let geometry = match feature.geometry {
            Some(g) => Some(Geometry::from_geojson(g.value, &format!("{what} geometry"))?),
            None => None,
        };

        Ok(Feature {
            geometry,
            properties: feature.properties.unwrap_or_default(),
        })
    }
}

impl Geometry {
    fn from_geojson(value: geojson::Value, what: &str) -> Result<Self> {
        match value {
            geojson::Value::Polygon(rings) => {
                PolygonGeometry::from_rings(rings, what).map(Geometry::Polygon)
            }
            other => Ok(Geometry::Other(type_name(&other))),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Geometry::Polygon(_) => "Polygon",
            Geometry::Other(name) => *name,
        }
    }
}

impl PolygonGeometry {
    fn from_rings(rings: Vec<Vec<geojson::Position>>, what: &str) -> Result<Self> {
        let mut rings = rings
            .iter()
            .map(|ring| {
                ring.iter()
                    .map(|position| to_coordinate(position, what))
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?
            .into_iter();

        let exterior = rings
            .next()
            .ok_or_else(|| ReadError::schema(format!("{what} is a Polygon with no rings")))?;
        if exterior.is_empty() {
            return Err(ReadError::schema(format!(
                "{what} is a Polygon with an empty exterior ring"
            )));
        }

        Ok(Self {
            exterior,
            interiors: rings.collect(),
        })
    }
}

fn to_coordinate(position: &[f64], what: &str) -> Result<Coordinate> {
    match *position {
        [x, y] => Ok(Coordinate::new(x, y)),
        // Values past elevation are allowed by RFC 7946 and ignored here
        [x, y, z, ..] => Ok(Coordinate::with_z(x, y, z)),
        _ => Err(ReadError::schema(format!(
            "{what} has a position with {} value(s), expected at least 2",
            position.len()
        ))),
    }
}

fn type_name(value: &geojson::Value) -> &'static str {
    match value {
        geojson::Value::Point(_) => "Point",
        geojson::Value::MultiPoint(_) => "MultiPoint",
        geojson::Value::LineString(_) => "LineString",
        geojson::Value::MultiLineString(_) => "MultiLineString",
        geojson::Value::Polygon(_) => "Polygon",
        geojson::Value::MultiPolygon(_) => "MultiPolygon",
        geojson::Value::GeometryCollection(_) => "GeometryCollection",
    }
}

/// Rewrite `type` members to canonical casing, recursing into the members
/// that hold nested GeoJSON objects
fn normalize_type_names(value: &mut Value) {
    let Value::Object(object) = value else {
        return;
    };

    if let Some(Value::String(type_)) = object.get_mut("type")
        && let Some(canonical) = TYPE_NAMES
            .iter()
            .find(|t| t.eq_ignore_ascii_case(type_.as_str()))
    {
        *type_ = canonical.to_string();
    }

    for key in ["features", "geometries"] {
        if let Some(Value::Array(items)) = object.get_mut(key) {
            items.iter_mut().for_each(normalize_type_names);
        }
    }
    if let Some(geometry) = object.get_mut("geometry") {
        normalize_type_names(geometry);
    }
}
