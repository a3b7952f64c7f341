//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. El almacenamiento se inyecta aquí; no hay
//! conexión global.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::repositories::RefuelingStore;
use crate::services::{RefuelingQueryService, RefuelingService};
use crate::utils::clock::{Clock, SystemClock};

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub store: Arc<dyn RefuelingStore>,
    pub refueling_service: Arc<RefuelingService>,
    pub query_service: Arc<RefuelingQueryService>,
}

impl AppState {
    pub fn new(store: Arc<dyn RefuelingStore>, config: EnvironmentConfig) -> Self {
        Self::with_clock(store, config, Arc::new(SystemClock))
    }

    pub fn with_clock(store: Arc<dyn RefuelingStore>, config: EnvironmentConfig, clock: Arc<dyn Clock>) -> Self {
        let refueling_service = RefuelingService::new(store.clone(), clock, config.enforce_identity_checksum);
        let query_service = RefuelingQueryService::new(store.clone());

        Self {
            config,
            store,
            refueling_service: Arc::new(refueling_service),
            query_service: Arc::new(query_service),
        }
    }
}
