use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::data::filter::WORLD_ISO_CODE;
use crate::data::domain::Scales;

/// Environment variable naming an optional JSON config file.
pub const CONFIG_ENV: &str = "ENERGY_STORY_CONFIG";

// ---------------------------------------------------------------------------
// Annotation affordances
// ---------------------------------------------------------------------------

/// Which optional annotations the scenes attach to their marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AnnotationMode {
    /// One hoverable marker per defined point.
    pub hover_markers: bool,
    /// Static callouts on each scene's point of interest.
    pub callouts: bool,
}

impl Default for AnnotationMode {
    fn default() -> Self {
        Self {
            hover_markers: true,
            callouts: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Chart geometry
// ---------------------------------------------------------------------------

/// Pixel size of the chart surface and its margins.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChartGeometry {
    pub width: f64,
    pub height: f64,
    pub margin_top: f64,
    pub margin_right: f64,
    pub margin_bottom: f64,
    pub margin_left: f64,
}

impl Default for ChartGeometry {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 500.0,
            margin_top: 40.0,
            margin_right: 30.0,
            margin_bottom: 50.0,
            margin_left: 80.0,
        }
    }
}

impl ChartGeometry {
    /// Scales covering the plot area inside the margins.
    pub fn scales(&self) -> Scales {
        Scales::for_area(
            self.margin_left,
            self.width - self.margin_right,
            self.margin_top,
            self.height - self.margin_bottom,
        )
    }
}

// ---------------------------------------------------------------------------
// StoryConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StoryConfig {
    /// Table to open at startup, if any.
    pub data_path: Option<PathBuf>,
    /// ISO code of the aggregate rows the story plots.
    pub aggregate_iso_code: String,
    /// Renewables share (percent) highlighted by the share scene's callout.
    pub milestone_share: f64,
    pub annotations: AnnotationMode,
    pub geometry: ChartGeometry,
}

impl Default for StoryConfig {
    fn default() -> Self {
        Self {
            data_path: None,
            aggregate_iso_code: WORLD_ISO_CODE.to_string(),
            milestone_share: 10.0,
            annotations: AnnotationMode::default(),
            geometry: ChartGeometry::default(),
        }
    }
}

impl StoryConfig {
    /// Read a config file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Config from the file named by [`CONFIG_ENV`], or defaults.
    pub fn from_env() -> Self {
        let Some(path) = std::env::var_os(CONFIG_ENV) else {
            return Self::default();
        };
        match Self::load(Path::new(&path)) {
            Ok(config) => {
                log::info!("Loaded config from {}", Path::new(&path).display());
                config
            }
            Err(e) => {
                log::warn!("Ignoring config: {e:#}");
                Self::default()
            }
        }
    }
}
