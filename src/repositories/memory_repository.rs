//! Repositorio en memoria
//!
//! Mismas semánticas que el repositorio PostgreSQL. Se usa en modo
//! desarrollo (sin `DATABASE_URL`) y en los tests.

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

use crate::models::{FuelType, NewRefueling, Refueling, RefuelingFilters};
use crate::repositories::RefuelingStore;
use crate::utils::errors::{internal_error, AppResult};

#[derive(Default)]
struct MemoryTable {
    rows: Vec<Refueling>,
    last_id: i64,
}

#[derive(Default)]
pub struct MemoryRefuelingRepository {
    table: RwLock<MemoryTable>,
    insert_calls: AtomicUsize,
}

impl MemoryRefuelingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Número de llamadas a `insert` desde la creación
    pub fn insert_calls(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }

    /// Número de registros almacenados
    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl RefuelingStore for MemoryRefuelingRepository {
    async fn insert(&self, refueling: NewRefueling) -> AppResult<Refueling> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);

        let mut table = self.table.write().await;
        table.last_id += 1;
        let stored = Refueling::from_new(table.last_id, refueling);
        table.rows.push(stored.clone());

        Ok(stored)
    }

    async fn mean_price(&self, fuel_type: FuelType) -> AppResult<Option<Decimal>> {
        let table = self.table.read().await;

        let (sum, count) = table
            .rows
            .iter()
            .filter(|r| r.fuel_type == fuel_type)
            .try_fold((Decimal::ZERO, 0u32), |(sum, count), r| {
                sum.checked_add(r.price_per_liter).map(|sum| (sum, count + 1))
            })
            .ok_or_else(|| internal_error(&format!("Price sum overflow for {}", fuel_type)))?;

        if count == 0 {
            return Ok(None);
        }

        Ok(Some(sum / Decimal::from(count)))
    }

    async fn query(
        &self,
        filters: &RefuelingFilters,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Refueling>, i64)> {
        let table = self.table.read().await;

        let mut matching: Vec<&Refueling> = table.rows.iter().filter(|r| filters.matches(r)).collect();
        matching.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));

        let total = matching.len() as i64;
        let items = matching
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect();

        Ok((items, total))
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
