use std::path::{Path, PathBuf};

use crate::config::{AnnotationMode, StoryConfig};
use crate::controller::SceneController;
use crate::data::loader::load_file;
use crate::error::StoryError;
use crate::render::svg::export_svg;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: StoryConfig,

    /// Scene state machine; inert until a table with aggregate rows is loaded.
    pub controller: SceneController,

    /// File the current dataset came from.
    pub source: Option<PathBuf>,

    /// Row and entity counts of the last successfully loaded table.
    pub table_summary: Option<(usize, usize)>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a file loading operation is in progress.
    pub loading: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(StoryConfig::default())
    }
}

impl AppState {
    pub fn new(config: StoryConfig) -> Self {
        Self {
            controller: SceneController::new(&config),
            config,
            source: None,
            table_summary: None,
            status_message: None,
            loading: false,
        }
    }

    /// Load a table and start the story at its first scene.
    ///
    /// Failures are logged and reported in `status_message`; the previously
    /// shown story (if any) stays in place.
    pub fn open_path(&mut self, path: &Path) {
        self.loading = true;
        let table = match load_file(path) {
            Ok(table) => table,
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                self.status_message = Some(format!("Error: {e:#}"));
                self.loading = false;
                return;
            }
        };

        log::info!(
            "Loaded {} rows covering {} entities from {}",
            table.len(),
            table.entity_count(),
            path.display()
        );

        match self.controller.load(&table.rows) {
            Ok(_) => {
                self.source = Some(path.to_path_buf());
                self.table_summary = Some((table.len(), table.entity_count()));
                self.status_message = None;
            }
            Err(e) => {
                log::warn!("{}: {e}", path.display());
                self.status_message = Some(format!("Nothing to show: {e}"));
            }
        }
        self.loading = false;
    }

    pub fn next_scene(&mut self) {
        if self.controller.next() {
            log::info!("Scene {}: {}", self.controller.current_index(), self.controller.title());
        }
    }

    pub fn previous_scene(&mut self) {
        if self.controller.previous() {
            log::info!("Scene {}: {}", self.controller.current_index(), self.controller.title());
        }
    }

    pub fn set_annotations(&mut self, annotations: AnnotationMode) {
        self.config.annotations = annotations;
        self.controller.set_annotations(annotations);
    }

    /// Write the current scene to an SVG file.
    pub fn export_current(&mut self, path: &Path) {
        if !self.controller.is_loaded() {
            self.status_message = Some(format!("Error: {}", StoryError::NotLoaded));
            return;
        }
        let result = export_svg(
            path,
            self.controller.draw_list(),
            self.controller.scales(),
            &self.config.geometry,
            self.controller.title(),
        );
        match result {
            Ok(()) => {
                log::info!("Exported scene {} to {}", self.controller.current_index(), path.display());
                self.status_message = Some(format!("Saved {}", path.display()));
            }
            Err(e) => {
                log::error!("Failed to export: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORLD_CSV: &str = "\
country,iso_code,year,primary_energy_consumption,renewables_consumption,coal_consumption,oil_consumption,gas_consumption,nuclear_consumption
World,OWID_WRL,1965,43360,200,20000,15000,5000,2000
World,OWID_WRL,2020,170000,18000,60000,50000,40000,10000
";

    #[test]
    fn load_failure_stays_pre_render() {
        let mut state = AppState::default();
        state.open_path(Path::new("/definitely/missing/energy.csv"));
        assert!(!state.controller.is_loaded());
        assert!(!state.loading);
        assert!(state.status_message.as_deref().unwrap_or("").starts_with("Error"));
        assert_eq!(state.controller.render_count(), 0);
    }

    #[test]
    fn empty_aggregate_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("countries.csv");
        std::fs::write(&path, "country,iso_code,year,primary_energy_consumption\nFrance,FRA,2000,10\n").unwrap();

        let mut state = AppState::default();
        state.open_path(&path);
        assert!(!state.controller.is_loaded());
        assert!(state.status_message.as_deref().unwrap_or("").contains("OWID_WRL"));
    }

    #[test]
    fn failed_reload_keeps_previous_story() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("world.csv");
        std::fs::write(&good, WORLD_CSV).unwrap();

        let mut state = AppState::default();
        state.open_path(&good);
        state.next_scene();
        assert_eq!(state.controller.current_index(), 1);

        state.open_path(&dir.path().join("missing.csv"));
        assert!(state.controller.is_loaded());
        assert_eq!(state.controller.current_index(), 1);
        assert_eq!(state.source.as_deref(), Some(good.as_path()));
    }

    #[test]
    fn export_requires_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("scene.svg");
        let mut state = AppState::default();
        state.export_current(&out);
        assert!(!out.exists());
        assert_eq!(state.status_message.as_deref(), Some("Error: no dataset loaded"));
    }
}
