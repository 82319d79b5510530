mod app;
mod ui;

use std::path::PathBuf;

use app::EnergyStoryApp;
use eframe::egui;
use energy_story::config::StoryConfig;
use energy_story::state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    let mut config = StoryConfig::from_env();
    if let Some(arg) = std::env::args_os().nth(1) {
        config.data_path = Some(PathBuf::from(arg));
    }

    let mut state = AppState::new(config);
    if let Some(path) = state.config.data_path.clone() {
        state.open_path(&path);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 760.0])
            .with_min_inner_size([640.0, 420.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Energy Story – World Energy in Three Scenes",
        options,
        Box::new(move |_cc| Ok(Box::new(EnergyStoryApp::new(state)))),
    )
}
