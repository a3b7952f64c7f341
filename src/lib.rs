//! Gateway de abastecimentos
//!
//! Recibe registros de abastecimiento de estaciones e integraciones de
//! flota, los valida, marca precios anómalos y sirve consultas paginadas
//! por combustible, fecha o motorista.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_app;
pub use state::AppState;
