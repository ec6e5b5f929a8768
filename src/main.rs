#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use swimlane_board::app::BoardApp;
use swimlane_board::config::AppConfig;
use swimlane_board::logging::init_logging;

fn main() -> eframe::Result<()> {
    let (config, warnings) = AppConfig::load_or_init();
    if let Err(err) = init_logging(&config.log_level) {
        eprintln!("logging disabled: {err}");
    }
    for warning in warnings {
        log::warn!("{warning}");
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 800.0])
            .with_min_inner_size([900.0, 500.0])
            .with_title("Swimlane Board"),
        ..Default::default()
    };

    eframe::run_native(
        "Swimlane Board",
        options,
        Box::new(move |cc| Ok(Box::new(BoardApp::new(cc, &config)))),
    )
}
