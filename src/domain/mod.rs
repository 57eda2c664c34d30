pub mod layer;
pub mod shape;

pub use layer::{LayerData, LayerMetadata, LayerStyle};
pub use shape::{Coordinate, Properties, ShapeRecord};
