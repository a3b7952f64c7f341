//! Detección de precios anómalos
//!
//! Un abastecimiento es "impróprio" cuando su precio supera en más de 25%
//! la media del tipo de combustible. Todo en aritmética decimal exacta.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;

use crate::models::FuelType;
use crate::repositories::RefuelingStore;
use crate::utils::errors::AppResult;

/// Factor sobre la media a partir del cual (estrictamente) se marca el registro
pub const IMPROPER_PRICE_FACTOR: Decimal = dec!(1.25);

/// Umbral de precio para una media dada; `None` si excede `Decimal::MAX`
pub fn improper_threshold(mean_price: Decimal) -> Option<Decimal> {
    mean_price.checked_mul(IMPROPER_PRICE_FACTOR)
}

/// `true` si `candidate_price > mean_price * 1.25`. Sin media nunca es anómalo.
pub fn is_improper(candidate_price: Decimal, mean_price: Option<Decimal>) -> bool {
    match mean_price.map(improper_threshold) {
        Some(Some(threshold)) => candidate_price > threshold,
        // Un umbral mayor que Decimal::MAX no puede ser superado
        Some(None) | None => false,
    }
}

/// Media de precios por tipo de combustible a partir del histórico
#[derive(Clone)]
pub struct AveragePriceOracle {
    store: Arc<dyn RefuelingStore>,
}

impl AveragePriceOracle {
    pub fn new(store: Arc<dyn RefuelingStore>) -> Self {
        Self { store }
    }

    /// `None` cuando todavía no hay registros de ese tipo
    pub async fn mean_price(&self, fuel_type: FuelType) -> AppResult<Option<Decimal>> {
        self.store.mean_price(fuel_type).await
    }
}
