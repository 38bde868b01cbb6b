pub mod app;
pub mod calc_client;
pub mod calculator;
pub mod config;
pub mod document;
pub mod errors;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod preferences;
pub mod state;
pub mod storage;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use storage::JsonFileStore;
