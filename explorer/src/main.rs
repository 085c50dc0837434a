use eframe::{run_native, NativeOptions};
use log::error;
use pathway_explorer::{Config, ExplorerApp};

const APP_NAME: &str = "Pathway Explorer";

fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::load().unwrap_or_else(|e| {
        error!("{e}, using default configuration");
        Config::default()
    });

    let native_options = NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1400., 900.]),
        ..Default::default()
    };
    run_native(
        APP_NAME,
        native_options,
        Box::new(|cc| Ok(Box::new(ExplorerApp::new(cc, config)))),
    )
}
