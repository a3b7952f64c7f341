use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::refueling::utc_day_bounds;
use crate::models::{FuelType, NewRefueling, Refueling, RefuelingFilters};
use crate::repositories::RefuelingStore;
use crate::utils::errors::{AppError, AppResult};

const SELECT_COLUMNS: &str = r#"id, station_id, "timestamp", fuel_type, price_per_liter, volume_liters, driver_cpf, improper_data, created_at"#;

// Fila de la tabla refuelings tal como la devuelve PostgreSQL
#[derive(Debug, sqlx::FromRow)]
struct RefuelingRow {
    id: i64,
    station_id: i32,
    timestamp: DateTime<Utc>,
    fuel_type: String,
    price_per_liter: Decimal,
    volume_liters: Decimal,
    driver_cpf: String,
    improper_data: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<RefuelingRow> for Refueling {
    type Error = AppError;

    fn try_from(row: RefuelingRow) -> Result<Self, Self::Error> {
        let fuel_type = row
            .fuel_type
            .parse::<FuelType>()
            .map_err(|e| AppError::Internal(format!("Row {}: {}", row.id, e)))?;

        Ok(Refueling {
            id: row.id,
            station_id: row.station_id,
            timestamp: row.timestamp,
            fuel_type,
            price_per_liter: row.price_per_liter,
            volume_liters: row.volume_liters,
            driver_cpf: row.driver_cpf,
            improper_data: row.improper_data,
            created_at: row.created_at,
        })
    }
}

pub struct PgRefuelingRepository {
    pool: PgPool,
}

impl PgRefuelingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // WHERE compartido por el COUNT y por la página
    fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, filters: &RefuelingFilters) {
        builder.push(" WHERE TRUE");

        if let Some(fuel_type) = filters.fuel_type {
            builder.push(" AND fuel_type = ").push_bind(fuel_type.as_str());
        }

        if let Some(date) = filters.date {
            let (start, end) = utc_day_bounds(date);
            builder
                .push(r#" AND "timestamp" >= "#)
                .push_bind(start)
                .push(r#" AND "timestamp" < "#)
                .push_bind(end);
        }

        if let Some(cpf) = &filters.driver_cpf {
            builder.push(" AND driver_cpf = ").push_bind(cpf.clone());
        }
    }
}

#[async_trait]
impl RefuelingStore for PgRefuelingRepository {
    async fn insert(&self, refueling: NewRefueling) -> AppResult<Refueling> {
        let query = format!(
            r#"
            INSERT INTO refuelings (station_id, "timestamp", fuel_type, price_per_liter, volume_liters, driver_cpf, improper_data, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            SELECT_COLUMNS
        );

        let row = sqlx::query_as::<_, RefuelingRow>(&query)
            .bind(refueling.station_id)
            .bind(refueling.timestamp)
            .bind(refueling.fuel_type.as_str())
            .bind(refueling.price_per_liter)
            .bind(refueling.volume_liters)
            .bind(refueling.driver_cpf)
            .bind(refueling.improper_data)
            .bind(refueling.created_at)
            .fetch_one(&self.pool)
            .await?;

        Refueling::try_from(row)
    }

    async fn mean_price(&self, fuel_type: FuelType) -> AppResult<Option<Decimal>> {
        let mean = sqlx::query_scalar::<_, Option<Decimal>>(
            "SELECT AVG(price_per_liter) FROM refuelings WHERE fuel_type = $1",
        )
        .bind(fuel_type.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(mean)
    }

    async fn query(
        &self,
        filters: &RefuelingFilters,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Refueling>, i64)> {
        let mut count_query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM refuelings");
        Self::push_filters(&mut count_query, filters);
        let total: i64 = count_query.build_query_scalar().fetch_one(&self.pool).await?;

        let mut data_query = QueryBuilder::<Postgres>::new(format!("SELECT {} FROM refuelings", SELECT_COLUMNS));
        Self::push_filters(&mut data_query, filters);
        data_query
            .push(r#" ORDER BY "timestamp" DESC, id DESC"#)
            .push(" OFFSET ")
            .push_bind(offset)
            .push(" LIMIT ")
            .push_bind(limit);

        let rows = data_query
            .build_query_as::<RefuelingRow>()
            .fetch_all(&self.pool)
            .await?;

        let items = rows
            .into_iter()
            .map(Refueling::try_from)
            .collect::<AppResult<Vec<_>>>()?;

        Ok((items, total))
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
