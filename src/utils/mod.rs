//! Utilidades compartidas
//!
//! Errores de la aplicación, validación de CPF y reloj.

pub mod clock;
pub mod errors;
pub mod validation;

pub use clock::{Clock, FixedClock, SystemClock};
pub use errors::{AppError, AppResult};
