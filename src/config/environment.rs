//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use anyhow::{bail, Context, Result};
use std::env;
use std::str::FromStr;

/// API key usada cuando no se define `API_KEY` fuera de producción
pub const DEFAULT_API_KEY: &str = "vlab-secret-key";

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub api_key: String,
    /// Rechazar CPFs con dígito verificador inválido en la admisión
    pub enforce_identity_checksum: bool,
    pub cors_origins: Vec<String>,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 8000,
            host: "0.0.0.0".to_string(),
            api_key: DEFAULT_API_KEY.to_string(),
            enforce_identity_checksum: false,
            cors_origins: Vec::new(),
        }
    }
}

impl EnvironmentConfig {
    /// Leer la configuración del entorno (después de `dotenv()`)
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let mut config = Self {
            environment: env::var("ENVIRONMENT").unwrap_or(defaults.environment),
            port: parse_var("PORT", defaults.port)?,
            host: env::var("HOST").unwrap_or(defaults.host),
            api_key: defaults.api_key,
            enforce_identity_checksum: parse_bool_var("ENFORCE_IDENTITY_CHECKSUM", defaults.enforce_identity_checksum)?,
            cors_origins: env::var("CORS_ORIGINS")
                .map(|origins| split_origins(&origins))
                .unwrap_or_default(),
        };

        if let Some(key) = resolve_api_key(env::var("API_KEY").ok(), config.is_production())? {
            config.api_key = key;
        }

        Ok(config)
    }

    /// `true` si se está usando la API key por defecto
    pub fn uses_default_api_key(&self) -> bool {
        self.api_key == DEFAULT_API_KEY
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Leer y parsear una variable; si no existe se usa el valor por defecto
pub(crate) fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be a valid value, got '{}'", name, raw)),
        Err(_) => Ok(default),
    }
}

/// API key explícita; en producción es obligatoria
fn resolve_api_key(raw: Option<String>, production: bool) -> Result<Option<String>> {
    match raw {
        Some(key) if !key.trim().is_empty() => Ok(Some(key)),
        _ if production => bail!("API_KEY must be set in production"),
        _ => Ok(None),
    }
}

fn parse_bool_var(name: &str, default: bool) -> Result<bool> {
    match env::var(name) {
        Ok(raw) => parse_bool(&raw).with_context(|| format!("{} must be a boolean, got '{}'", name, raw)),
        Err(_) => Ok(default),
    }
}

fn parse_bool(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => bail!("invalid boolean '{}'", other),
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
