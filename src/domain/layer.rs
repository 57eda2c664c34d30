use serde::{Deserialize, Serialize};

use super::ShapeRecord;

fn default_edge_width() -> f64 {
    100.0
}
fn default_edge_color() -> String {
    "red".to_string()
}
fn default_face_color() -> String {
    "blue".to_string()
}
fn default_opacity() -> f64 {
    0.25
}
fn default_blending() -> String {
    "opaque".to_string()
}

/// Styling applied to every shape of a layer
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LayerStyle {
    #[serde(default = "default_edge_width")]
    pub edge_width: f64,
    #[serde(default = "default_edge_color")]
    pub edge_color: String,
    #[serde(default = "default_face_color")]
    pub face_color: String,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    #[serde(default = "default_blending")]
    pub blending: String,
}

impl Default for LayerStyle {
    fn default() -> Self {
        Self {
            edge_width: default_edge_width(),
            edge_color: default_edge_color(),
            face_color: default_face_color(),
            opacity: default_opacity(),
            blending: default_blending(),
        }
    }
}

/// Keyword arguments the host passes to its "add shapes" call
///
/// The per-shape lists always have one entry per record in `LayerData::data`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerMetadata {
    pub shape_type: Vec<String>,
    pub edge_width: Vec<f64>,
    pub edge_color: Vec<String>,
    pub face_color: Vec<String>,
    pub opacity: f64,
    pub blending: String,
}

/// Everything the host needs to create one shapes layer from one file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerData {
    pub data: Vec<ShapeRecord>,
    pub metadata: LayerMetadata,
    pub layer_type: String,
}

impl LayerData {
    pub fn from_records(records: Vec<ShapeRecord>, style: &LayerStyle) -> Self {
        let n = records.len();
        let metadata = LayerMetadata {
            shape_type: vec!["polygon".to_string(); n],
            edge_width: vec![style.edge_width; n],
            edge_color: vec![style.edge_color.clone(); n],
            face_color: vec![style.face_color.clone(); n],
            opacity: style.opacity,
            blending: style.blending.clone(),
        };

        Self {
            data: records,
            metadata,
            layer_type: "shapes".to_string(),
        }
    }

    pub fn shape_count(&self) -> usize {
        self.data.len()
    }
}
