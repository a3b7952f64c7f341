use std::sync::Arc;
use tracing::info;
use validator::Validate;

use crate::dto::refueling_dto::{
    CreateRefuelingRequest, ListRefuelingsQuery, PaginatedResponse, PaginationQuery, RefuelingResponse,
};
use crate::models::RefuelingFilters;
use crate::services::{RefuelingQueryService, RefuelingService};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::strip_cpf;

pub struct RefuelingController {
    refueling_service: Arc<RefuelingService>,
    query_service: Arc<RefuelingQueryService>,
}

impl RefuelingController {
    pub fn new(state: &AppState) -> Self {
        Self {
            refueling_service: state.refueling_service.clone(),
            query_service: state.query_service.clone(),
        }
    }

    pub async fn create(&self, request: CreateRefuelingRequest) -> Result<RefuelingResponse, AppError> {
        // Validar estructura (station_id positivo)
        request.validate()?;

        info!(
            "⛽ Registrando abastecimiento: estación {}, combustible {}",
            request.station_id, request.fuel_type
        );

        let refueling = self.refueling_service.admit(request).await?;
        Ok(refueling.into())
    }

    pub async fn list(&self, query: ListRefuelingsQuery) -> Result<PaginatedResponse<RefuelingResponse>, AppError> {
        let filters = RefuelingFilters {
            fuel_type: query.fuel_type,
            date: query.date,
            driver_cpf: query.driver_cpf.as_deref().map(strip_cpf),
        };

        let page = self.query_service.list(filters, query.page, query.size).await?;
        Ok(page.into())
    }

    pub async fn driver_history(
        &self,
        cpf: &str,
        pagination: PaginationQuery,
    ) -> Result<PaginatedResponse<RefuelingResponse>, AppError> {
        let driver_cpf = strip_cpf(cpf);
        info!("🧾 Histórico del motorista {} (página {})", driver_cpf, pagination.page);

        let filters = RefuelingFilters {
            driver_cpf: Some(driver_cpf),
            ..Default::default()
        };

        let page = self.query_service.list(filters, pagination.page, pagination.size).await?;
        Ok(page.into())
    }
}
