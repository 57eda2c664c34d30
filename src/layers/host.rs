//! Entry points for a shape-layer host
//!
//! A host asks [`get_reader`] whether it can open a path; if so it calls the
//! returned function and gets one shapes layer per file.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::{LayerData, LayerStyle};
use crate::error::Result;
use crate::reader::{ReadSummary, read_polygons_with_summary};

const SUPPORTED_EXTENSIONS: &[&str] = &["geojson", "json"];

/// Reader handed back to the host
pub type ReaderFn = fn(&[PathBuf]) -> Result<Vec<LayerData>>;

pub fn is_supported_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|s| s.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

/// Reader for `path`, or `None` so the host can try another plugin
pub fn get_reader(path: &Path) -> Option<ReaderFn> {
    if is_supported_path(path) {
        Some(read_layers_default as ReaderFn)
    } else {
        debug!(path = %path.display(), "not a GeoJSON path");
        None
    }
}

pub fn read_layers_default(paths: &[PathBuf]) -> Result<Vec<LayerData>> {
    read_layers(paths, &LayerStyle::default())
}

/// One layer per file, in the order given; the first failing file aborts
pub fn read_layers(paths: &[PathBuf], style: &LayerStyle) -> Result<Vec<LayerData>> {
    read_layers_with_summary(paths, style).map(|(layers, _)| layers)
}

/// Like [`read_layers`], with one summary per file
pub fn read_layers_with_summary(
    paths: &[PathBuf],
    style: &LayerStyle,
) -> Result<(Vec<LayerData>, Vec<ReadSummary>)> {
    let mut layers = Vec::with_capacity(paths.len());
    let mut summaries = Vec::with_capacity(paths.len());

    for path in paths {
        let (records, summary) = read_polygons_with_summary(path.as_path())?;
        layers.push(LayerData::from_records(records, style));
        summaries.push(summary);
    }

    Ok((layers, summaries))
}
