//! Modelos del sistema
//!
//! Tipos de dominio del abastecimiento, independientes del motor de
//! almacenamiento y del formato del wire.

pub mod refueling;

pub use refueling::{FuelType, NewRefueling, Page, Refueling, RefuelingFilters};
