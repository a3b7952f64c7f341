//! Middleware del sistema
//!
//! Este módulo contiene el control de API key y la configuración de CORS.

pub mod api_key;
pub mod cors;

pub use api_key::require_api_key;
pub use cors::cors_middleware;
