//! Sistema de manejo de errores
//!
//! Este módulo define los errores de dominio (CPF, reglas de negocio,
//! paginación) y el error principal de la aplicación con su conversión
//! a respuestas HTTP.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;
use thiserror::Error;
use tracing::{error, warn};

/// Errores de validación del documento de identidad (CPF)
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityError {
    #[error("CPF deve conter 11 dígitos (recebidos {0})")]
    WrongLength(usize),

    #[error("CPF inválido: todos os dígitos são iguais")]
    DegenerateCode,

    #[error("CPF inválido: dígito verificador incorreto")]
    InvalidCheckDigit,
}

/// Regla de negocio violada por un abastecimiento
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordRule {
    NonPositivePrice,
    NonPositiveVolume,
    PriceOutOfRange,
    VolumeOutOfRange,
}

impl RecordRule {
    /// Código estable de la regla para el campo `details` de la respuesta
    pub fn code(&self) -> &'static str {
        match self {
            RecordRule::NonPositivePrice => "NON_POSITIVE_PRICE",
            RecordRule::NonPositiveVolume => "NON_POSITIVE_VOLUME",
            RecordRule::PriceOutOfRange => "PRICE_OUT_OF_RANGE",
            RecordRule::VolumeOutOfRange => "VOLUME_OUT_OF_RANGE",
        }
    }
}

impl fmt::Display for RecordRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordRule::NonPositivePrice => write!(f, "Preço por litro deve ser maior que zero"),
            RecordRule::NonPositiveVolume => write!(f, "Volume deve ser maior que zero"),
            RecordRule::PriceOutOfRange => write!(f, "Preço por litro deve ser menor que 100000000"),
            RecordRule::VolumeOutOfRange => write!(f, "Volume deve ser menor que 100000000"),
        }
    }
}

/// Primera regla violada por una solicitud de abastecimiento
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{reason}")]
pub struct RecordValidationError {
    pub field: &'static str,
    pub reason: RecordRule,
}

/// Parámetros de paginación fuera de rango
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryParameterError {
    #[error("Página deve ser maior ou igual a 1 (recebido {0})")]
    InvalidPage(i64),

    #[error("Tamanho da página deve estar entre 1 e 100 (recebido {0})")]
    InvalidPageSize(i64),
}

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid identity: {0}")]
    Identity(#[from] IdentityError),

    #[error("Business rule violation: {0}")]
    Record(#[from] RecordValidationError),

    #[error("Invalid pagination: {0}")]
    QueryParameter(#[from] QueryParameterError),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_response) = match self {
            AppError::Database(e) => {
                error!("❌ Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Database Error".to_string(),
                        message: "An error occurred while accessing the database".to_string(),
                        details: Some(json!({ "sql_error": e.to_string() })),
                        code: Some("DB_ERROR".to_string()),
                    },
                )
            }

            AppError::Migration(e) => {
                error!("❌ Migration error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Database Error".to_string(),
                        message: "The database schema could not be prepared".to_string(),
                        details: Some(json!({ "migration_error": e.to_string() })),
                        code: Some("DB_ERROR".to_string()),
                    },
                )
            }

            AppError::Validation(e) => {
                warn!("⚠️ Validation error: {}", e);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: "Validation Error".to_string(),
                        message: "The provided data is invalid".to_string(),
                        details: Some(json!(e)),
                        code: Some("VALIDATION_ERROR".to_string()),
                    },
                )
            }

            AppError::Identity(e) => {
                warn!("⚠️ Invalid identity: {}", e);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: "Invalid Identity".to_string(),
                        message: e.to_string(),
                        details: Some(json!({ "field": "driver_cpf" })),
                        code: Some("INVALID_IDENTITY".to_string()),
                    },
                )
            }

            AppError::Record(e) => {
                warn!("⚠️ Business rule violation on {}: {}", e.field, e.reason);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: "Business Rule Violation".to_string(),
                        message: e.reason.to_string(),
                        details: Some(json!({ "field": e.field, "rule": e.reason.code() })),
                        code: Some("BUSINESS_RULE_VIOLATION".to_string()),
                    },
                )
            }

            AppError::QueryParameter(e) => {
                warn!("⚠️ Invalid pagination: {}", e);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: "Invalid Pagination".to_string(),
                        message: e.to_string(),
                        details: None,
                        code: Some("INVALID_PAGINATION".to_string()),
                    },
                )
            }

            AppError::Forbidden(msg) => {
                warn!("🔒 Forbidden access: {}", msg);
                (
                    StatusCode::FORBIDDEN,
                    ErrorResponse {
                        error: "Forbidden".to_string(),
                        message: msg,
                        details: None,
                        code: Some("FORBIDDEN".to_string()),
                    },
                )
            }

            AppError::BadRequest(msg) => {
                warn!("⚠️ Bad request: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: "Bad Request".to_string(),
                        message: msg,
                        details: None,
                        code: Some("BAD_REQUEST".to_string()),
                    },
                )
            }

            AppError::Internal(msg) => {
                error!("❌ Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Internal Server Error".to_string(),
                        message: "An unexpected error occurred".to_string(),
                        details: Some(json!({ "internal_error": msg })),
                        code: Some("INTERNAL_ERROR".to_string()),
                    },
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de solicitud incorrecta
pub fn bad_request_error(message: &str) -> AppError {
    AppError::BadRequest(message.to_string())
}

/// Función helper para crear errores internos
pub fn internal_error(message: &str) -> AppError {
    AppError::Internal(message.to_string())
}

/// Función helper para crear errores de acceso prohibido
pub fn forbidden_error(reason: &str) -> AppError {
    AppError::Forbidden(reason.to_string())
}
