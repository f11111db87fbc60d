//! SeaORM storage backend
//!
//! This module provides database storage using SeaORM,
//! supporting SQLite, MySQL/MariaDB, and PostgreSQL.

mod connection;
mod converters;
pub mod retry;
mod transaction;

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, TransactionTrait};
use tracing::warn;

use super::{MappingRepository, MappingTxn};
use crate::config::DatabaseConfig;
use crate::errors::{ChoteError, Result};
use migration::entities::mapping;

pub use connection::{SQLITE_MAX_CONNECTIONS, connect_generic, connect_sqlite, run_migrations};
pub use converters::{mapping_to_active_model, model_to_mapping};
pub use transaction::SeaOrmTxn;

/// 从数据库 URL 推断存储类型
pub fn infer_backend_from_url(database_url: &str) -> Result<String> {
    if database_url.starts_with("memory://") {
        Ok("memory".to_string())
    } else if database_url.starts_with("sqlite://")
        || database_url.ends_with(".db")
        || database_url.ends_with(".sqlite")
        || database_url == ":memory:"
    {
        Ok("sqlite".to_string())
    } else if database_url.starts_with("mysql://") || database_url.starts_with("mariadb://") {
        Ok("mysql".to_string())
    } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        Ok("postgres".to_string())
    } else {
        Err(ChoteError::database_config(format!(
            "Cannot infer storage backend from URL: {}. Supported: memory://, sqlite://, mysql://, mariadb://, postgres://",
            database_url
        )))
    }
}

/// SeaORM-based storage backend
#[derive(Clone)]
pub struct SeaOrmRepository {
    db: DatabaseConnection,
    backend_name: String,
    retry_config: retry::RetryConfig,
}

impl SeaOrmRepository {
    pub async fn new(database_url: &str, backend_name: &str, config: &DatabaseConfig) -> Result<Self> {
        if database_url.is_empty() {
            return Err(ChoteError::database_config("DATABASE_URL is not set"));
        }

        let db = if backend_name == "sqlite" {
            connect_sqlite(database_url, config.timeout).await?
        } else {
            connect_generic(database_url, backend_name, config.pool_size, config.timeout).await?
        };

        let storage = SeaOrmRepository {
            db,
            backend_name: backend_name.to_string(),
            retry_config: retry::RetryConfig::from(config),
        };

        run_migrations(&storage.db).await?;

        warn!(
            "{} Storage initialized.",
            storage.backend_name.to_uppercase()
        );
        Ok(storage)
    }
}

#[async_trait]
impl MappingRepository for SeaOrmRepository {
    fn backend_name(&self) -> &str {
        &self.backend_name
    }

    async fn begin(&self) -> Result<Box<dyn MappingTxn>> {
        let db = &self.db;
        let txn = retry::with_retry("begin", self.retry_config, || async { db.begin().await })
            .await
            .map_err(|e| ChoteError::database_operation(format!("Failed to begin transaction: {}", e)))?;

        Ok(Box::new(SeaOrmTxn::new(txn)))
    }

    async fn count(&self) -> Result<u64> {
        mapping::Entity::find()
            .count(&self.db)
            .await
            .map_err(|e| ChoteError::database_operation(format!("Failed to count mappings: {}", e)))
    }
}
