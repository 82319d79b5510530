use eframe::egui;

use energy_story::state::AppState;

use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct EnergyStoryApp {
    pub state: AppState,
}

impl EnergyStoryApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for EnergyStoryApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Keyboard navigation ----
        let (back, forward) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::ArrowLeft),
                i.key_pressed(egui::Key::ArrowRight),
            )
        });
        if back {
            self.state.previous_scene();
        }
        if forward {
            self.state.next_scene();
        }

        // ---- Top panel: menu bar + navigation ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: scene text + data ----
        egui::SidePanel::left("story_panel")
            .default_width(300.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &self.state);
            });

        // ---- Central panel: chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::scene_plot(ui, &self.state);
        });
    }
}
