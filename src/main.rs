//! Annotation Overlay
//!
//! A chart with an annotation overlay: committed annotations render as
//! markers, and a single add-annotation session places new ones.

mod app;
mod chart;
mod constants;
mod core;
mod hotkeys;
mod logging;
mod state;

use dioxus::desktop::{Config, LogicalSize, WindowBuilder};

use crate::state::OverlaySettings;

fn main() {
    let settings_path = crate::core::paths::settings_path();
    let settings = match OverlaySettings::load(&settings_path) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("{err}; using default settings");
            OverlaySettings::default()
        }
    };
    logging::init(settings.debug_logging);
    tracing::info!(path = %settings_path.display(), "settings loaded");

    let config = Config::new()
        .with_window(
            WindowBuilder::new()
                .with_title("Annotation Overlay")
                .with_inner_size(LogicalSize::new(settings.chart_width + 64.0, 480.0))
                .with_resizable(true),
        )
        .with_menu(None); // Disable default menu bar

    dioxus::LaunchBuilder::desktop()
        .with_cfg(config)
        .with_context(settings)
        .launch(app::App);
}
