pub mod app;
pub mod classify;
pub mod client;
pub mod config;
pub mod errors;
pub mod format;
pub mod handlers;
pub mod input;
pub mod models;
pub mod state;
pub mod ui;

pub use app::router;
pub use client::CalcClient;
pub use config::Config;
pub use state::AppState;
