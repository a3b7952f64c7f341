use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::dto::refueling_dto::CreateRefuelingRequest;
use crate::models::{NewRefueling, Refueling};
use crate::repositories::RefuelingStore;
use crate::services::price_anomaly::{improper_threshold, is_improper, AveragePriceOracle};
use crate::services::refueling_validation::validate_refueling;
use crate::utils::clock::Clock;
use crate::utils::errors::AppResult;
use crate::utils::validation::normalize_and_validate_cpf;

/// Pipeline de admisión: validación → media → flag → persistencia
pub struct RefuelingService {
    store: Arc<dyn RefuelingStore>,
    oracle: AveragePriceOracle,
    clock: Arc<dyn Clock>,
    enforce_identity_checksum: bool,
}

impl RefuelingService {
    pub fn new(store: Arc<dyn RefuelingStore>, clock: Arc<dyn Clock>, enforce_identity_checksum: bool) -> Self {
        Self {
            oracle: AveragePriceOracle::new(store.clone()),
            store,
            clock,
            enforce_identity_checksum,
        }
    }

    /// Admitir un abastecimiento.
    ///
    /// Todos los errores de validación ocurren antes de cualquier escritura;
    /// en caso de éxito se inserta exactamente un registro.
    pub async fn admit(&self, request: CreateRefuelingRequest) -> AppResult<Refueling> {
        let validated = validate_refueling(&request)?;

        let driver_cpf = if self.enforce_identity_checksum {
            normalize_and_validate_cpf(&validated.driver_cpf)?
        } else {
            validated.driver_cpf
        };

        debug!("📊 Calculando precio medio para {}", validated.fuel_type);
        let mean_price = self.oracle.mean_price(validated.fuel_type).await?;

        let improper_data = is_improper(validated.price_per_liter, mean_price);
        if let (true, Some(mean)) = (improper_data, mean_price) {
            warn!(
                "⚠️ Precio anómalo detectado! Precio: {}, Media: {}, Umbral: {}",
                validated.price_per_liter,
                mean,
                improper_threshold(mean).unwrap_or(Decimal::MAX)
            );
        }

        let refueling = self
            .store
            .insert(NewRefueling {
                station_id: validated.station_id,
                timestamp: validated.timestamp,
                fuel_type: validated.fuel_type,
                price_per_liter: validated.price_per_liter,
                volume_liters: validated.volume_liters,
                driver_cpf,
                improper_data,
                created_at: self.clock.now(),
            })
            .await?;

        info!(
            "✅ Abastecimiento {} registrado (estación {}, improper_data: {})",
            refueling.id, refueling.station_id, refueling.improper_data
        );

        Ok(refueling)
    }
}
