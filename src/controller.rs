use crate::config::{AnnotationMode, StoryConfig};
use crate::data::derive::derive_series;
use crate::data::domain::{Scales, value_domain, year_domain};
use crate::data::filter::aggregate_rows;
use crate::data::model::{DerivedRow, RawRow};
use crate::error::StoryError;
use crate::scene::draw::DrawList;
use crate::scene::{SCENE_COUNT, SCENES, SceneContext, SceneDescriptor};

// ---------------------------------------------------------------------------
// Navigation affordances
// ---------------------------------------------------------------------------

/// Disabled state of the two navigation buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavState {
    pub previous_disabled: bool,
    pub next_disabled: bool,
}

impl Default for NavState {
    /// Both inert until a dataset exists.
    fn default() -> Self {
        Self {
            previous_disabled: true,
            next_disabled: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Scene controller
// ---------------------------------------------------------------------------

/// Owns the derived dataset, the scene index and the shared scales, and
/// re-renders the current scene into its [`DrawList`] on every transition.
#[derive(Debug)]
pub struct SceneController {
    dataset: Option<Vec<DerivedRow>>,
    index: usize,
    scales: Scales,
    draw_list: DrawList,
    title: String,
    description: String,
    nav: NavState,
    aggregate_iso_code: String,
    milestone_share: f64,
    annotations: AnnotationMode,
    render_count: usize,
}

impl SceneController {
    pub fn new(config: &StoryConfig) -> Self {
        Self {
            dataset: None,
            index: 0,
            scales: config.geometry.scales(),
            draw_list: DrawList::new(),
            title: String::new(),
            description: String::new(),
            nav: NavState::default(),
            aggregate_iso_code: config.aggregate_iso_code.clone(),
            milestone_share: config.milestone_share,
            annotations: config.annotations,
            render_count: 0,
        }
    }

    /// Filter and derive `rows`, cache the result and render the first scene.
    ///
    /// When no aggregate row survives the filter the controller is left as it
    /// was and [`StoryError::EmptyDataset`] is returned. Returns the number of
    /// retained rows otherwise.
    pub fn load(&mut self, rows: &[RawRow]) -> Result<usize, StoryError> {
        let retained = aggregate_rows(rows, &self.aggregate_iso_code);
        if retained.is_empty() {
            return Err(StoryError::EmptyDataset {
                scanned: rows.len(),
                aggregate: self.aggregate_iso_code.clone(),
            });
        }

        let derived = derive_series(&retained);
        if let Some((first, last)) = year_domain(&derived) {
            self.scales.x.domain = (first, last);
            log::info!(
                "Retained {} of {} rows for {} ({first}–{last})",
                derived.len(),
                rows.len(),
                self.aggregate_iso_code
            );
        }

        let count = derived.len();
        self.dataset = Some(derived);
        self.index = 0;
        self.render();
        Ok(count)
    }

    /// Step forward. Returns whether the scene changed.
    pub fn next(&mut self) -> bool {
        if self.dataset.is_none() || self.index + 1 >= SCENE_COUNT {
            return false;
        }
        self.index += 1;
        self.render();
        true
    }

    /// Step back. Returns whether the scene changed.
    pub fn previous(&mut self) -> bool {
        if self.dataset.is_none() || self.index == 0 {
            return false;
        }
        self.index -= 1;
        self.render();
        true
    }

    /// Change annotation affordances and redraw the current scene.
    pub fn set_annotations(&mut self, annotations: AnnotationMode) {
        self.annotations = annotations;
        self.render();
    }

    fn render(&mut self) {
        let Some(rows) = self.dataset.as_deref() else {
            return;
        };
        let scene = &SCENES[self.index];

        // 1. text
        self.title = scene.title.to_string();
        self.description = scene.description.to_string();

        // 2. drop everything the previous scene drew
        self.draw_list.clear();

        // 3. y-domain for this scene's metric
        self.scales.y.domain = value_domain(rows, scene.y_domain);
        log::debug!("Scene {} y-domain {:?}", scene.index, self.scales.y.domain);

        // 4. draw
        let ctx = SceneContext {
            rows,
            scales: &self.scales,
            annotations: self.annotations,
            milestone_share: self.milestone_share,
        };
        (scene.draw)(&ctx, &mut self.draw_list);

        // 5. navigation
        self.nav = NavState {
            previous_disabled: self.index == 0,
            next_disabled: self.index + 1 >= SCENE_COUNT,
        };

        self.render_count += 1;
        log::debug!("Scene {} drew {} marks", scene.index, self.draw_list.len());
    }

    pub fn is_loaded(&self) -> bool {
        self.dataset.is_some()
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn current_scene(&self) -> Option<&'static SceneDescriptor> {
        self.dataset.as_ref().map(|_| &SCENES[self.index])
    }

    pub fn dataset(&self) -> Option<&[DerivedRow]> {
        self.dataset.as_deref()
    }

    pub fn scales(&self) -> &Scales {
        &self.scales
    }

    pub fn draw_list(&self) -> &DrawList {
        &self.draw_list
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn nav(&self) -> NavState {
        self.nav
    }

    pub fn can_go_previous(&self) -> bool {
        !self.nav.previous_disabled
    }

    pub fn can_go_next(&self) -> bool {
        !self.nav.next_disabled
    }

    pub fn annotations(&self) -> AnnotationMode {
        self.annotations
    }

    /// Number of completed renders since construction.
    pub fn render_count(&self) -> usize {
        self.render_count
    }
}
