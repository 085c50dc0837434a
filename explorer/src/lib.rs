pub mod app;
pub mod config;
pub mod controller;
pub mod controls;
pub mod dataset;
pub mod detail;
pub mod filter;
pub mod keybindings;
pub mod loader;
pub mod model;
pub mod style;

mod ui_consts;

pub use app::ExplorerApp;
pub use config::{Config, ConfigError};
pub use controller::{Action, Controller};
pub use dataset::Dataset;
pub use loader::{DataSource, LoadError};
