use clap::Parser;
use eframe::egui;

use rusty_lens::app::RustyLensApp;
use rusty_lens::config::Config;

fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let config = Config::parse();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 820.0])
            .with_min_inner_size([640.0, 420.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Rusty Lens – Dataset Explorer",
        options,
        Box::new(move |_cc| Ok(Box::new(RustyLensApp::new(&config)))),
    )
}
