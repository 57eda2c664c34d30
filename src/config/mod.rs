use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::domain::LayerStyle;

const CONFIG_NAME: &str = "geojson-shapes";

fn default_verbose() -> bool {
    false
}
fn default_pretty() -> bool {
    false
}

/// Settings read from `geojson-shapes.toml`
///
/// ```toml
/// verbose = true
///
/// [style]
/// edge_color = "yellow"
/// opacity = 0.5
/// ```
#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct FileConfig {
    #[serde(default = "default_verbose")]
    pub verbose: bool,
    #[serde(default = "default_pretty")]
    pub pretty: bool,
    #[serde(default)]
    pub style: LayerStyle,
}

/// Outcome of looking through the standard config locations
#[derive(Debug, Default)]
pub struct ConfigSearch {
    pub config: Option<FileConfig>,
    /// Path the config was loaded from
    pub source: Option<PathBuf>,
    /// Files that exist but failed to read or parse, with the reason
    pub skipped: Vec<(PathBuf, String)>,
}

impl FileConfig {
    /// Load an explicitly named config file
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        use anyhow::Context;

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&contents).with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// First config found in the standard locations; broken files are skipped
    pub fn load() -> ConfigSearch {
        Self::load_from(&get_config_paths())
    }

    pub fn load_from(paths: &[PathBuf]) -> ConfigSearch {
        let mut search = ConfigSearch::default();

        for path in paths {
            if !path.exists() {
                continue;
            }
            let parsed = std::fs::read_to_string(path)
                .map_err(|e| e.to_string())
                .and_then(|contents| {
                    toml::from_str::<FileConfig>(&contents).map_err(|e| e.to_string())
                });
            match parsed {
                Ok(config) => {
                    search.config = Some(config);
                    search.source = Some(path.clone());
                    return search;
                }
                Err(reason) => search.skipped.push((path.clone(), reason)),
            }
        }
        search
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from(format!("{CONFIG_NAME}.toml")));
    paths.push(PathBuf::from(format!(".{CONFIG_NAME}.toml")));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join(CONFIG_NAME).join("config.toml"));
        paths.push(config_dir.join(format!("{CONFIG_NAME}.toml")));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(format!(".{CONFIG_NAME}.toml")));
    }

    paths
}
