use geo::{Area, BoundingRect, LineString, Polygon};

use crate::domain::ShapeRecord;

impl ShapeRecord {
    /// Planar polygon of the exterior ring; elevation is ignored
    pub fn to_polygon(&self) -> Polygon<f64> {
        let exterior: LineString<f64> = self
            .ring
            .iter()
            .map(|c| geo::coord! { x: c.x, y: c.y })
            .collect();
        // Polygon::new closes the ring again
        Polygon::new(exterior, Vec::new())
    }
}

/// Axis-aligned extent of a set of shapes, in document units
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Bounds of every vertex in `records`; `None` if there are no vertices
    pub fn from_records(records: &[ShapeRecord]) -> Option<Self> {
        records
            .iter()
            .filter_map(|r| r.to_polygon().bounding_rect())
            .map(|rect| Self {
                min_x: rect.min().x,
                max_x: rect.max().x,
                min_y: rect.min().y,
                max_y: rect.max().y,
            })
            .reduce(|a, b| a.union(&b))
    }

    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            min_x: self.min_x.min(other.min_x),
            max_x: self.max_x.max(other.max_x),
            min_y: self.min_y.min(other.min_y),
            max_y: self.max_y.max(other.max_y),
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Sum of unsigned planar areas of the exterior rings
pub fn total_area(records: &[ShapeRecord]) -> f64 {
    records
        .iter()
        .map(|r| r.to_polygon().unsigned_area())
        .sum()
}
