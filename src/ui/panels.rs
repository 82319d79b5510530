use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use energy_story::config::AnnotationMode;
use energy_story::scene::SCENE_COUNT;
use energy_story::scene::format::thousands;
use energy_story::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – scene text and the derived series
// ---------------------------------------------------------------------------

/// Render the scene title, description and a table of the plotted rows.
pub fn side_panel(ui: &mut Ui, state: &AppState) {
    let controller = &state.controller;
    let Some(rows) = controller.dataset() else {
        ui.heading("Energy Story");
        ui.separator();
        ui.label("No dataset loaded.");
        return;
    };

    ui.heading(controller.title());
    ui.add_space(4.0);
    ui.label(controller.description());
    if let Some(scene) = controller.current_scene() {
        ui.small(format!("Plotted: {}", scene.metric.label()));
    }
    ui.separator();

    if let Some((n_rows, n_entities)) = state.table_summary {
        ui.small(format!(
            "{} world rows from {n_rows} rows / {n_entities} entities",
            rows.len()
        ));
    }
    ui.add_space(4.0);

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for title in ["Year", "Primary", "Renew. %", "Fossil", "Zero-carbon"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, rows.len(), |mut row| {
                let r = &rows[row.index()];
                let share = r
                    .share()
                    .map(|s| format!("{s:.1}"))
                    .unwrap_or_else(|| "–".to_string());
                for text in [
                    r.year.to_string(),
                    thousands(r.primary),
                    share,
                    thousands(r.fossil),
                    thousands(r.zero_carbon),
                ] {
                    row.col(|ui| {
                        ui.label(text);
                    });
                }
            });
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the menu, scene navigation and annotation toggles.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let loaded = state.controller.is_loaded();
            if ui.add_enabled(loaded, egui::Button::new("Export SVG…")).clicked() {
                export_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        let nav = state.controller.nav();
        if ui
            .add_enabled(!nav.previous_disabled, egui::Button::new("◀ Previous"))
            .clicked()
        {
            state.previous_scene();
        }
        if state.controller.is_loaded() {
            ui.label(format!(
                "Scene {} / {SCENE_COUNT}",
                state.controller.current_index() + 1
            ));
        }
        if ui
            .add_enabled(!nav.next_disabled, egui::Button::new("Next ▶"))
            .clicked()
        {
            state.next_scene();
        }

        ui.separator();

        let AnnotationMode {
            hover_markers,
            callouts,
        } = state.controller.annotations();
        if ui.selectable_label(hover_markers, "Points").clicked() {
            state.set_annotations(AnnotationMode {
                hover_markers: !hover_markers,
                callouts,
            });
        }
        if ui.selectable_label(callouts, "Callouts").clicked() {
            state.set_annotations(AnnotationMode {
                hover_markers,
                callouts: !callouts,
            });
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            let color = if msg.starts_with("Saved") {
                Color32::DARK_GREEN
            } else {
                Color32::RED
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open energy table")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open_path(&path);
    }
}

pub fn export_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export scene as SVG")
        .add_filter("SVG", &["svg"])
        .set_file_name(format!("scene-{}.svg", state.controller.current_index() + 1))
        .save_file();

    if let Some(path) = file {
        state.export_current(&path);
    }
}
