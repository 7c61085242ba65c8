pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod inflight;
pub mod models;
pub mod notice;
pub mod page;
pub mod state;
pub mod ui;

pub use app::controller;
pub use config::PanelConfig;
pub use handlers::Outcome;
pub use state::ViewController;
