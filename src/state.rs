use crate::config::AppConfig;
use crate::products::ProductStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ProductStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn from_parts(store: Arc<dyn ProductStore>, config: Arc<AppConfig>) -> Self {
        Self { store, config }
    }
}
