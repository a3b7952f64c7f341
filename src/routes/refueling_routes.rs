use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Query, State},
    http::StatusCode,
    middleware::from_fn_with_state,
    routing::{get, post},
    Json, Router,
};

use crate::controllers::refueling_controller::RefuelingController;
use crate::dto::refueling_dto::{CreateRefuelingRequest, ListRefuelingsQuery, PaginatedResponse, RefuelingResponse};
use crate::middleware::require_api_key;
use crate::state::AppState;
use crate::utils::errors::{bad_request_error, AppError};

pub fn create_refueling_router(state: AppState) -> Router<AppState> {
    Router::new().route(
        "/abastecimentos",
        get(list_refuelings).merge(post(create_refueling).route_layer(from_fn_with_state(state, require_api_key))),
    )
}

async fn create_refueling(
    State(state): State<AppState>,
    payload: Result<Json<CreateRefuelingRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RefuelingResponse>), AppError> {
    let Json(request) = payload.map_err(|rejection| bad_request_error(&rejection.body_text()))?;
    let controller = RefuelingController::new(&state);
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_refuelings(
    State(state): State<AppState>,
    query: Result<Query<ListRefuelingsQuery>, QueryRejection>,
) -> Result<Json<PaginatedResponse<RefuelingResponse>>, AppError> {
    let Query(query) = query.map_err(|rejection| bad_request_error(&rejection.body_text()))?;
    let controller = RefuelingController::new(&state);
    let response = controller.list(query).await?;
    Ok(Json(response))
}
