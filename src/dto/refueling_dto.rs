use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};
use validator::Validate;

use crate::models::{FuelType, Page, Refueling};

// Request para registrar un abastecimiento
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRefuelingRequest {
    #[validate(range(min = 1))]
    pub station_id: i32,
    pub timestamp: DateTime<Utc>,
    pub fuel_type: FuelType,
    pub price_per_liter: Decimal,
    pub volume_liters: Decimal,
    pub driver_cpf: String,
}

// Response de abastecimiento
#[derive(Debug, Serialize)]
pub struct RefuelingResponse {
    pub id: i64,
    pub station_id: i32,
    pub timestamp: DateTime<Utc>,
    pub fuel_type: FuelType,
    #[serde(serialize_with = "serialize_two_places")]
    pub price_per_liter: Decimal,
    #[serde(serialize_with = "serialize_two_places")]
    pub volume_liters: Decimal,
    pub driver_cpf: String,
    pub improper_data: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Refueling> for RefuelingResponse {
    fn from(refueling: Refueling) -> Self {
        Self {
            id: refueling.id,
            station_id: refueling.station_id,
            timestamp: refueling.timestamp,
            fuel_type: refueling.fuel_type,
            price_per_liter: refueling.price_per_liter,
            volume_liters: refueling.volume_liters,
            driver_cpf: refueling.driver_cpf,
            improper_data: refueling.improper_data,
            created_at: refueling.created_at,
        }
    }
}

// Decimales siempre con 2 casas: "5.00"
fn serialize_two_places<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("{:.2}", value))
}

fn default_page() -> i64 {
    1
}

fn default_size() -> i64 {
    10
}

// Query params de paginación
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_size")]
    pub size: i64,
}

// Query params del listado de abastecimientos
#[derive(Debug, Clone, Deserialize)]
pub struct ListRefuelingsQuery {
    pub fuel_type: Option<FuelType>,
    pub date: Option<NaiveDate>,
    pub driver_cpf: Option<String>,
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_size")]
    pub size: i64,
}

// Envelope paginado
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub total: i64,
    pub page: i64,
    pub size: i64,
    pub data: Vec<T>,
}

impl<T, U: Into<T>> From<Page<U>> for PaginatedResponse<T> {
    fn from(page: Page<U>) -> Self {
        Self {
            total: page.total,
            page: page.page,
            size: page.size,
            data: page.items.into_iter().map(Into::into).collect(),
        }
    }
}

// Response del health check
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: String,
}
