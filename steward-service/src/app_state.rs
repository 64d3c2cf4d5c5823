// steward-service/src/app_state.rs
use crate::services::visibility_gate::VisibilityGate;
use crate::utils::config::AppConfig;
use crate::utils::store::DataStore;

// Shared by every worker through web::Data
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: DataStore,
    pub gate: VisibilityGate,
}

impl AppState {
    pub fn new(store: DataStore, gate: VisibilityGate) -> Self {
        Self { store, gate }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            DataStore::new(config.storage_path.clone()),
            VisibilityGate::new(config.visibility_fallback),
        )
    }
}
