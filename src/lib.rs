pub mod app;
pub mod cli;
pub mod library;
pub mod logging;
pub mod probe;
pub mod services;
pub mod tea;
pub mod terminal;
pub mod theme;
pub mod ui;

pub use app::App;
