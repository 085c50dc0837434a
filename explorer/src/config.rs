use std::path::{Path, PathBuf};

use log::{info, warn};
use pathway_graph::{
    layouts::{Circular, ForceDirected, ForceDirectedParams},
    LayoutAlgorithm, SettingsNavigation,
};
use serde::Deserialize;
use thiserror::Error;

use crate::loader::DataSource;

/// Path of the config file, overrides the working directory lookup.
pub const CONFIG_ENV: &str = "PATHWAY_EXPLORER_CONFIG";
/// Overrides `data.source`.
pub const DATA_ENV: &str = "PATHWAY_EXPLORER_DATA";
pub const CONFIG_FILE: &str = "pathway-explorer.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data: DataConfig,
    pub layout: LayoutConfig,
    pub view: ViewConfig,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_source")]
    pub source: String,
    #[serde(default = "default_nodes_file")]
    pub nodes_file: String,
    #[serde(default = "default_edges_file")]
    pub edges_file: String,
}

fn default_source() -> String { "app-data".to_string() }
fn default_nodes_file() -> String { "nodes.json".to_string() }
fn default_edges_file() -> String { "edges.json".to_string() }

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            nodes_file: default_nodes_file(),
            edges_file: default_edges_file(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
    #[serde(default = "default_node_repulsion")]
    pub node_repulsion: f32,
    #[serde(default = "default_ideal_edge_length")]
    pub ideal_edge_length: f32,
    #[serde(default = "default_edge_elasticity")]
    pub edge_elasticity: f32,
    #[serde(default = "default_gravity")]
    pub gravity: f32,
    #[serde(default = "default_iterations")]
    pub iterations: u32,
    #[serde(default = "default_animation_ms")]
    pub animation_ms: u64,
}

fn default_algorithm() -> String { "force-directed".to_string() }
fn default_node_repulsion() -> f32 { 8000.0 }
fn default_ideal_edge_length() -> f32 { 100.0 }
fn default_edge_elasticity() -> f32 { 0.45 }
fn default_gravity() -> f32 { 0.25 }
fn default_iterations() -> u32 { 2500 }
fn default_animation_ms() -> u64 { 1000 }

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            algorithm: default_algorithm(),
            node_repulsion: default_node_repulsion(),
            ideal_edge_length: default_ideal_edge_length(),
            edge_elasticity: default_edge_elasticity(),
            gravity: default_gravity(),
            iterations: default_iterations(),
            animation_ms: default_animation_ms(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ViewConfig {
    #[serde(default = "default_min_zoom")]
    pub min_zoom: f32,
    #[serde(default = "default_max_zoom")]
    pub max_zoom: f32,
    #[serde(default = "default_fit_padding")]
    pub fit_padding: f32,
    #[serde(default = "default_focus_zoom")]
    pub focus_zoom: f32,
    #[serde(default = "default_focus_duration_ms")]
    pub focus_duration_ms: u64,
}

fn default_min_zoom() -> f32 { 0.1 }
fn default_max_zoom() -> f32 { 4.0 }
fn default_fit_padding() -> f32 { 50.0 }
fn default_focus_zoom() -> f32 { 1.5 }
fn default_focus_duration_ms() -> u64 { 300 }

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            min_zoom: default_min_zoom(),
            max_zoom: default_max_zoom(),
            fit_padding: default_fit_padding(),
            focus_zoom: default_focus_zoom(),
            focus_duration_ms: default_focus_duration_ms(),
        }
    }
}

impl Config {
    /// Load configuration from pathway-explorer.toml.
    /// Checks PATHWAY_EXPLORER_CONFIG env var first, then current directory,
    /// then falls back to defaults. PATHWAY_EXPLORER_DATA overrides the data source.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::load_from(Path::new(&path))?,
            Err(_) if Path::new(CONFIG_FILE).exists() => Self::load_from(Path::new(CONFIG_FILE))?,
            Err(_) => Self::default(),
        };

        if let Ok(source) = std::env::var(DATA_ENV) {
            info!("data source overridden by {DATA_ENV}: {source}");
            config.data.source = source;
        }
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn data_source(&self) -> DataSource {
        DataSource::parse(&self.data.source)
    }

    /// The configured layout, or the circular fallback when the force-directed
    /// one cannot run with the given name or parameters.
    pub fn layout_algorithm(&self) -> LayoutAlgorithm {
        let l = &self.layout;
        let params = ForceDirectedParams {
            node_repulsion: l.node_repulsion,
            ideal_edge_length: l.ideal_edge_length,
            edge_elasticity: l.edge_elasticity,
            gravity: l.gravity,
            iterations: l.iterations,
        };

        match l.algorithm.as_str() {
            "force-directed" if params.is_valid() => {
                LayoutAlgorithm::ForceDirected(ForceDirected::new(params))
            }
            "circular" => LayoutAlgorithm::Circular(Circular::new()),
            other => {
                warn!("layout {other:?} unavailable with {params:?}, falling back to circular");
                LayoutAlgorithm::Circular(Circular::new())
            }
        }
    }

    pub fn layout_animation_secs(&self) -> f64 {
        self.layout.animation_ms as f64 / 1000.
    }

    /// Navigation settings. Zoom limits that are not finite and positive
    /// fall back to the defaults.
    pub fn navigation(&self) -> SettingsNavigation {
        let v = &self.view;
        let (mut min, mut max) = (v.min_zoom, v.max_zoom);
        if ![min, max].iter().all(|z| z.is_finite() && *z > 0.) {
            warn!("invalid zoom range {min}..{max}, using defaults");
            (min, max) = (default_min_zoom(), default_max_zoom());
        }

        let mut padding = v.fit_padding;
        if !padding.is_finite() || padding < 0. {
            warn!("invalid fit padding {padding}, using default");
            padding = default_fit_padding();
        }

        SettingsNavigation::new()
            .with_zoom_range(min, max)
            .with_fit_padding(padding)
    }

    pub fn focus_duration_secs(&self) -> f64 {
        self.view.focus_duration_ms as f64 / 1000.
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.data.source, "app-data");
        assert_eq!(config.view.focus_zoom, 1.5);
        assert!(matches!(
            config.layout_algorithm(),
            LayoutAlgorithm::ForceDirected(ref fd) if fd.params == ForceDirectedParams::default()
        ));
        assert_eq!(config.layout_animation_secs(), 1.);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config: Config = toml::from_str(
            r#"
            [data]
            source = "https://example.org/data"

            [layout]
            gravity = 0.5
            "#,
        )
        .unwrap();

        assert_eq!(
            config.data_source(),
            DataSource::Http("https://example.org/data".into())
        );
        assert_eq!(config.data.nodes_file, "nodes.json");
        assert_eq!(config.layout.gravity, 0.5);
        assert_eq!(config.layout.iterations, 2500);
    }

    #[test]
    fn unusable_force_layout_falls_back_to_circular() {
        let mut config = Config::default();
        config.layout.algorithm = "spectral".into();
        assert_eq!(config.layout_algorithm().name(), "circular");

        config.layout.algorithm = "force-directed".into();
        config.layout.ideal_edge_length = -1.;
        assert_eq!(config.layout_algorithm().name(), "circular");

        config.layout.algorithm = "circular".into();
        assert_eq!(config.layout_algorithm().name(), "circular");
    }

    #[test]
    fn non_finite_zoom_limits_use_defaults() {
        let config: Config = toml::from_str(
            r#"
            [view]
            min_zoom = nan
            max_zoom = inf
            fit_padding = -3.0
            "#,
        )
        .unwrap();

        let nav = config.navigation();
        assert_eq!(nav.zoom_range(), (0.1, 4.));
        assert_eq!(nav.fit_padding(), 50.);

        let mut config = Config::default();
        config.view.min_zoom = 0.5;
        config.view.max_zoom = 2.;
        let nav = config.navigation();
        assert_eq!(nav.zoom_range(), (0.5, 2.));
    }

    #[test]
    fn load_from_file_reports_parse_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[view]\nmax_zoom = \"wide\"").unwrap();

        let err = Config::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));

        let missing = Config::load_from(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(missing, ConfigError::Io { .. }));
    }
}
