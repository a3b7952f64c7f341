//! Configuración de conexión a PostgreSQL
//!
//! Crea el pool, aplica las migraciones y devuelve el almacenamiento que
//! usará la aplicación.

use std::sync::Arc;
use tracing::{info, warn};

use crate::config::database::{mask_database_url, DatabaseConfig};
use crate::repositories::{MemoryRefuelingRepository, PgRefuelingRepository, RefuelingStore};
use crate::utils::errors::AppResult;

/// Conectar el almacenamiento configurado.
///
/// Sin `DATABASE_URL` se usa el repositorio en memoria (modo desarrollo).
pub async fn connect_store(config: &DatabaseConfig) -> AppResult<Arc<dyn RefuelingStore>> {
    let Some(url) = config.url.as_deref() else {
        warn!("⚠️ DATABASE_URL no definida: usando almacenamiento en memoria (los datos no persisten)");
        return Ok(Arc::new(MemoryRefuelingRepository::new()));
    };

    info!("🔗 Conectando a PostgreSQL: {}", mask_database_url(url));
    let pool = config.create_pool(url).await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("✅ Migraciones aplicadas");

    Ok(Arc::new(PgRefuelingRepository::new(pool)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_without_url_uses_memory_store() {
        let config = DatabaseConfig::default();
        let store = connect_store(&config).await.unwrap();
        assert!(store.ping().await.is_ok());
    }
}
