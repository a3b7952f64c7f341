use std::sync::Arc;
use tracing::info;

use crate::models::{Page, Refueling, RefuelingFilters};
use crate::repositories::RefuelingStore;
use crate::utils::errors::{AppResult, QueryParameterError};

pub const MAX_PAGE_SIZE: i64 = 100;

/// Consultas paginadas sobre el histórico
pub struct RefuelingQueryService {
    store: Arc<dyn RefuelingStore>,
}

impl RefuelingQueryService {
    pub fn new(store: Arc<dyn RefuelingStore>) -> Self {
        Self { store }
    }

    /// Listar registros filtrados, del más reciente al más antiguo.
    /// Los parámetros de paginación se validan antes de tocar el almacenamiento.
    pub async fn list(&self, filters: RefuelingFilters, page: i64, size: i64) -> AppResult<Page<Refueling>> {
        if page < 1 {
            return Err(QueryParameterError::InvalidPage(page).into());
        }
        if !(1..=MAX_PAGE_SIZE).contains(&size) {
            return Err(QueryParameterError::InvalidPageSize(size).into());
        }

        let offset = (page - 1).saturating_mul(size);
        let (items, total) = self.store.query(&filters, offset, size).await?;

        info!(
            "🔍 Filtros {:?}: {} abastecimientos en total, {} en la página {}",
            filters,
            total,
            items.len(),
            page
        );

        Ok(Page {
            total,
            page,
            size,
            items,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FuelType, NewRefueling};
    use crate::repositories::MemoryRefuelingRepository;
    use crate::utils::errors::AppError;
    use chrono::{Duration, NaiveDate, TimeZone, Utc};
    use rust_decimal_macros::dec;
    use std::collections::HashSet;

    async fn seeded(n: i64) -> (RefuelingQueryService, Arc<MemoryRefuelingRepository>) {
        let store = Arc::new(MemoryRefuelingRepository::new());
        let base = Utc.with_ymd_and_hms(2024, 12, 18, 6, 0, 0).unwrap();
        for i in 0..n {
            let ts = base + Duration::hours(7 * i);
            let fuel_type = FuelType::ALL[(i % 3) as usize];
            let cpf = if i % 2 == 0 { "11144477735" } else { "52998224725" };
            store
                .insert(NewRefueling {
                    station_id: (i + 1) as i32,
                    timestamp: ts,
                    fuel_type,
                    price_per_liter: dec!(5.00),
                    volume_liters: dec!(25.00),
                    driver_cpf: cpf.to_string(),
                    improper_data: false,
                    created_at: ts,
                })
                .await
                .unwrap();
        }
        (RefuelingQueryService::new(store.clone()), store)
    }

    #[tokio::test]
    async fn test_pages_partition_full_ordered_set() {
        let (service, _) = seeded(23).await;

        let mut all = Vec::new();
        for page in 1..=5 {
            let result = service.list(RefuelingFilters::default(), page, 5).await.unwrap();
            assert_eq!(result.total, 23);
            assert!(result.items.len() <= 5);
            all.extend(result.items);
        }

        assert_eq!(all.len(), 23);
        let ids: HashSet<i64> = all.iter().map(|r| r.id).collect();
        assert_eq!(ids.len(), 23);
        assert!(all.windows(2).all(|w| w[0].timestamp > w[1].timestamp));
    }

    #[tokio::test]
    async fn test_invalid_pagination_does_not_touch_store() {
        let (service, _) = seeded(1).await;

        let err = service.list(RefuelingFilters::default(), 0, 10).await.unwrap_err();
        assert!(matches!(err, AppError::QueryParameter(QueryParameterError::InvalidPage(0))));

        let err = service.list(RefuelingFilters::default(), 1, 0).await.unwrap_err();
        assert!(matches!(err, AppError::QueryParameter(QueryParameterError::InvalidPageSize(0))));

        let err = service.list(RefuelingFilters::default(), 1, 101).await.unwrap_err();
        assert!(matches!(err, AppError::QueryParameter(QueryParameterError::InvalidPageSize(101))));

        assert!(service.list(RefuelingFilters::default(), 1, 100).await.is_ok());
    }

    #[tokio::test]
    async fn test_filter_by_date() {
        let (service, _) = seeded(12).await;
        let date = NaiveDate::from_ymd_opt(2024, 12, 19).unwrap();

        let result = service
            .list(
                RefuelingFilters {
                    date: Some(date),
                    ..Default::default()
                },
                1,
                100,
            )
            .await
            .unwrap();

        assert!(result.total > 0);
        assert_eq!(result.total as usize, result.items.len());
        assert!(result.items.iter().all(|r| r.timestamp.date_naive() == date));
    }

    #[tokio::test]
    async fn test_date_without_records_is_empty() {
        let (service, _) = seeded(12).await;
        let result = service
            .list(
                RefuelingFilters {
                    date: NaiveDate::from_ymd_opt(2023, 1, 1),
                    ..Default::default()
                },
                1,
                10,
            )
            .await
            .unwrap();

        assert_eq!(result.total, 0);
        assert!(result.items.is_empty());
    }

    #[tokio::test]
    async fn test_filter_by_driver_and_fuel_type() {
        let (service, _) = seeded(12).await;

        let by_driver = service
            .list(
                RefuelingFilters {
                    driver_cpf: Some("52998224725".to_string()),
                    ..Default::default()
                },
                1,
                100,
            )
            .await
            .unwrap();
        assert_eq!(by_driver.total, 6);
        assert!(by_driver.items.iter().all(|r| r.driver_cpf == "52998224725"));

        let combined = service
            .list(
                RefuelingFilters {
                    fuel_type: Some(FuelType::Gasoline),
                    driver_cpf: Some("11144477735".to_string()),
                    date: None,
                },
                1,
                100,
            )
            .await
            .unwrap();
        // i par y i % 3 == 0 → 0, 6
        assert_eq!(combined.total, 2);
        assert!(combined
            .items
            .iter()
            .all(|r| r.fuel_type == FuelType::Gasoline && r.driver_cpf == "11144477735"));
    }
}
