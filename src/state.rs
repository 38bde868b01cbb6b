use crate::calc_client::CalcClient;
use crate::config::Config;
use crate::metrics::Metrics;
use crate::storage::Store;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub prefs: Arc<Mutex<Store>>,
    pub client: CalcClient,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(config: &Config, store: impl Into<Store>) -> Result<Self, prometheus::Error> {
        Ok(Self {
            prefs: Arc::new(Mutex::new(store.into())),
            client: CalcClient::new(&config.backend_url),
            metrics: Metrics::new()?,
        })
    }
}
