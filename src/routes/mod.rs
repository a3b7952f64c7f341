pub mod driver_routes;
pub mod health_routes;
pub mod refueling_routes;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::middleware::cors_middleware;
use crate::state::AppState;

/// Crear el router completo de la aplicación
pub fn create_app(state: AppState) -> Router {
    let api_v1 = Router::new()
        .merge(refueling_routes::create_refueling_router(state.clone()))
        .merge(driver_routes::create_driver_router());

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(health_routes::create_health_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors_middleware(&state.config.cors_origins))
        .with_state(state)
}
