use crate::storage::resolve_data_path;
use std::{env, path::PathBuf};

pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
    /// Base URL the BAC form posts to; `/api/calculate` is appended.
    pub backend_url: String,
}

impl Config {
    /// `PORT`, `APP_DATA_PATH` and `BACKEND_URL`. Without a backend URL the
    /// page talks to the calculation endpoint of this same process.
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let backend_url = env::var("BACKEND_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| format!("http://127.0.0.1:{port}"));

        Self {
            port,
            data_path: resolve_data_path(),
            backend_url,
        }
    }
}
