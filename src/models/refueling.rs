//! Modelo de Refueling (abastecimento)
//!
//! Tipos de dominio del registro persistido, del registro listo para
//! insertar y de los filtros de consulta.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tipo de combustible. El vocabulario del wire (`GASOLINA`, `ETANOL`,
/// `DIESEL`) es parte del contrato externo y también es lo que se guarda
/// en la columna `fuel_type`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum FuelType {
    #[serde(rename = "GASOLINA")]
    Gasoline,
    #[serde(rename = "ETANOL")]
    Ethanol,
    #[serde(rename = "DIESEL")]
    Diesel,
}

impl FuelType {
    pub const ALL: [FuelType; 3] = [FuelType::Gasoline, FuelType::Ethanol, FuelType::Diesel];

    pub fn as_str(&self) -> &'static str {
        match self {
            FuelType::Gasoline => "GASOLINA",
            FuelType::Ethanol => "ETANOL",
            FuelType::Diesel => "DIESEL",
        }
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FuelType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FuelType::ALL
            .into_iter()
            .find(|fuel| fuel.as_str() == s)
            .ok_or_else(|| format!("Tipo de combustível desconhecido: '{}'", s))
    }
}

/// Abastecimiento validado y con el flag calculado, listo para persistir
#[derive(Debug, Clone, PartialEq)]
pub struct NewRefueling {
    pub station_id: i32,
    pub timestamp: DateTime<Utc>,
    pub fuel_type: FuelType,
    pub price_per_liter: Decimal,
    pub volume_liters: Decimal,
    pub driver_cpf: String,
    pub improper_data: bool,
    pub created_at: DateTime<Utc>,
}

/// Abastecimiento persistido. Inmutable una vez creado.
#[derive(Debug, Clone, PartialEq)]
pub struct Refueling {
    pub id: i64,
    pub station_id: i32,
    pub timestamp: DateTime<Utc>,
    pub fuel_type: FuelType,
    pub price_per_liter: Decimal,
    pub volume_liters: Decimal,
    pub driver_cpf: String,
    pub improper_data: bool,
    pub created_at: DateTime<Utc>,
}

impl Refueling {
    pub fn from_new(id: i64, new: NewRefueling) -> Self {
        Self {
            id,
            station_id: new.station_id,
            timestamp: new.timestamp,
            fuel_type: new.fuel_type,
            price_per_liter: new.price_per_liter,
            volume_liters: new.volume_liters,
            driver_cpf: new.driver_cpf,
            improper_data: new.improper_data,
            created_at: new.created_at,
        }
    }
}

/// Filtros de búsqueda (AND entre los presentes)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RefuelingFilters {
    pub fuel_type: Option<FuelType>,
    pub date: Option<NaiveDate>,
    pub driver_cpf: Option<String>,
}

impl RefuelingFilters {
    /// Comprobar si un registro cumple todos los filtros presentes
    pub fn matches(&self, refueling: &Refueling) -> bool {
        if let Some(fuel_type) = self.fuel_type {
            if refueling.fuel_type != fuel_type {
                return false;
            }
        }

        if let Some(date) = self.date {
            let (start, end) = utc_day_bounds(date);
            if refueling.timestamp < start || refueling.timestamp >= end {
                return false;
            }
        }

        if let Some(cpf) = &self.driver_cpf {
            if &refueling.driver_cpf != cpf {
                return false;
            }
        }

        true
    }
}

/// Rango semiabierto [00:00 del día, 00:00 del día siguiente) en UTC
pub fn utc_day_bounds(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = date.and_time(chrono::NaiveTime::MIN).and_utc();
    (start, start + Duration::days(1))
}

/// Página de resultados
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub total: i64,
    pub page: i64,
    pub size: i64,
    pub items: Vec<T>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn refueling_at(timestamp: DateTime<Utc>, fuel_type: FuelType, cpf: &str) -> Refueling {
        Refueling {
            id: 1,
            station_id: 7,
            timestamp,
            fuel_type,
            price_per_liter: dec!(5.00),
            volume_liters: dec!(30.00),
            driver_cpf: cpf.to_string(),
            improper_data: false,
            created_at: timestamp,
        }
    }

    #[test]
    fn test_fuel_type_wire_tokens() {
        assert_eq!(serde_json::to_string(&FuelType::Gasoline).unwrap(), "\"GASOLINA\"");
        assert_eq!(serde_json::to_string(&FuelType::Ethanol).unwrap(), "\"ETANOL\"");
        assert_eq!(serde_json::to_string(&FuelType::Diesel).unwrap(), "\"DIESEL\"");
        assert_eq!("ETANOL".parse::<FuelType>().unwrap(), FuelType::Ethanol);
        assert!("GASOLINE".parse::<FuelType>().is_err());
        assert!(serde_json::from_str::<FuelType>("\"gasolina\"").is_err());
    }

    #[test]
    fn test_date_filter_covers_whole_utc_day() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 20).unwrap();
        let filters = RefuelingFilters {
            date: Some(date),
            ..Default::default()
        };

        let first = Utc.with_ymd_and_hms(2024, 12, 20, 0, 0, 0).unwrap();
        let last = Utc.with_ymd_and_hms(2024, 12, 20, 23, 59, 59).unwrap()
            + Duration::microseconds(999_999);
        let next_day = Utc.with_ymd_and_hms(2024, 12, 21, 0, 0, 0).unwrap();
        let previous_day = first - Duration::microseconds(1);

        assert!(filters.matches(&refueling_at(first, FuelType::Diesel, "1")));
        assert!(filters.matches(&refueling_at(last, FuelType::Diesel, "1")));
        assert!(!filters.matches(&refueling_at(next_day, FuelType::Diesel, "1")));
        assert!(!filters.matches(&refueling_at(previous_day, FuelType::Diesel, "1")));
    }

    #[test]
    fn test_filters_are_conjunctive() {
        let ts = Utc.with_ymd_and_hms(2024, 12, 20, 10, 0, 0).unwrap();
        let filters = RefuelingFilters {
            fuel_type: Some(FuelType::Gasoline),
            date: None,
            driver_cpf: Some("11144477735".to_string()),
        };

        assert!(filters.matches(&refueling_at(ts, FuelType::Gasoline, "11144477735")));
        assert!(!filters.matches(&refueling_at(ts, FuelType::Ethanol, "11144477735")));
        assert!(!filters.matches(&refueling_at(ts, FuelType::Gasoline, "52998224725")));
        assert!(RefuelingFilters::default().matches(&refueling_at(ts, FuelType::Diesel, "x")));
    }
}
