//! Servicios del núcleo
//!
//! Validación de abastecimientos, detección de precios anómalos,
//! pipeline de admisión y consultas paginadas.

pub mod price_anomaly;
pub mod refueling_query_service;
pub mod refueling_service;
pub mod refueling_validation;

pub use price_anomaly::{is_improper, AveragePriceOracle};
pub use refueling_query_service::RefuelingQueryService;
pub use refueling_service::RefuelingService;
