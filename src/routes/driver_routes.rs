use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    routing::get,
    Json, Router,
};

use crate::controllers::refueling_controller::RefuelingController;
use crate::dto::refueling_dto::{PaginatedResponse, PaginationQuery, RefuelingResponse};
use crate::state::AppState;
use crate::utils::errors::{bad_request_error, AppError};

pub fn create_driver_router() -> Router<AppState> {
    Router::new().route("/motoristas/:cpf/historico", get(driver_history))
}

async fn driver_history(
    State(state): State<AppState>,
    Path(cpf): Path<String>,
    pagination: Result<Query<PaginationQuery>, QueryRejection>,
) -> Result<Json<PaginatedResponse<RefuelingResponse>>, AppError> {
    let Query(pagination) = pagination.map_err(|rejection| bad_request_error(&rejection.body_text()))?;
    let controller = RefuelingController::new(&state);
    let response = controller.driver_history(&cpf, pagination).await?;
    Ok(Json(response))
}
