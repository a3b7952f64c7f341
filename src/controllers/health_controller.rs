use std::sync::Arc;
use tracing::{debug, error};

use crate::dto::refueling_dto::HealthResponse;
use crate::repositories::RefuelingStore;
use crate::state::AppState;

pub struct HealthController {
    store: Arc<dyn RefuelingStore>,
}

impl HealthController {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }

    /// El estado de la base se informa en el cuerpo; nunca falla
    pub async fn check(&self) -> HealthResponse {
        let database = match self.store.ping().await {
            Ok(()) => {
                debug!("Health check: conexión a la base OK");
                "connected".to_string()
            }
            Err(e) => {
                error!("❌ Health check: conexión a la base FALLÓ - {}", e);
                format!("error: {}", e)
            }
        };

        HealthResponse {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            database,
        }
    }
}
