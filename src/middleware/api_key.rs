//! Middleware de API key
//!
//! Las integraciones que registran abastecimientos se identifican con el
//! header `X-API-Key`.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::state::AppState;
use crate::utils::errors::{forbidden_error, AppError};

pub const API_KEY_HEADER: &str = "x-api-key";

/// Rechazar con 403 si la API key falta o no coincide
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let provided = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    match provided {
        Some(key) if key == state.config.api_key => Ok(next.run(request).await),
        _ => Err(forbidden_error("Invalid or missing API Key")),
    }
}
