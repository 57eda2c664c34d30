use serde::Serialize;
use serde_json::{Map, Value};

/// Feature properties, passed through from the source document untouched
pub type Properties = Map<String, Value>;

/// A single vertex of a ring
///
/// No unit conversion or reprojection is applied; values are whatever the
/// document contained.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
}

impl Coordinate {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: None }
    }

    pub fn with_z(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z: Some(z) }
    }

    pub fn xy(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// One polygon handed to the shape layer
///
/// `ring` is the exterior boundary with the closing point removed, since the
/// host treats polygons as implicitly closed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapeRecord {
    pub ring: Vec<Coordinate>,
    pub properties: Properties,
}

impl ShapeRecord {
    /// Build a record from a raw exterior ring, dropping a duplicate closing point
    pub fn from_exterior(mut ring: Vec<Coordinate>, properties: Properties) -> Self {
        if is_closed_ring(&ring) {
            ring.pop();
        }
        Self { ring, properties }
    }

    pub fn len(&self) -> usize {
        self.ring.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// Vertices as plain (x, y) pairs
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.ring.iter().map(Coordinate::xy).collect()
    }
}

fn is_closed_ring(ring: &[Coordinate]) -> bool {
    if ring.len() < 2 {
        return false;
    }
    ring.first() == ring.last()
}
