//! Repositorios
//!
//! `RefuelingStore` es la única dependencia de almacenamiento del núcleo;
//! hay una implementación PostgreSQL y una en memoria.

pub mod memory_repository;
pub mod refueling_repository;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::models::{FuelType, NewRefueling, Refueling, RefuelingFilters};
use crate::utils::errors::AppResult;

pub use memory_repository::MemoryRefuelingRepository;
pub use refueling_repository::PgRefuelingRepository;

/// Operaciones de almacenamiento que necesita el núcleo
#[async_trait]
pub trait RefuelingStore: Send + Sync {
    /// Inserción atómica; devuelve el registro con su id asignado
    async fn insert(&self, refueling: NewRefueling) -> AppResult<Refueling>;

    /// Media de `price_per_liter` de los registros ya persistidos del tipo dado.
    /// `None` si no hay ninguno.
    async fn mean_price(&self, fuel_type: FuelType) -> AppResult<Option<Decimal>>;

    /// Registros filtrados, ordenados por `timestamp` DESC (desempate por id DESC),
    /// junto con el total de coincidencias sin paginar
    async fn query(
        &self,
        filters: &RefuelingFilters,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Refueling>, i64)>;

    /// Comprobar que el almacenamiento responde
    async fn ping(&self) -> AppResult<()>;
}
