//! Mapping persistence
//!
//! The core only needs a key-value store keyed by short code that supports
//! existence checks, lookups, inserts that respect code uniqueness, and
//! deletes, all composed inside a transaction. [`MappingRepository`] opens
//! transactions; [`MappingTxn`] is the transactional scope.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::info;

use crate::config::DatabaseConfig;
use crate::errors::Result;

pub mod backend;
pub mod memory;
pub mod models;

pub use backend::{SeaOrmRepository, infer_backend_from_url};
pub use memory::MemoryRepository;
pub use models::Mapping;

/// A unit of work against the store.
///
/// Nothing is visible to other transactions until [`MappingTxn::commit`]
/// succeeds. Dropping a transaction without committing rolls it back.
#[async_trait]
pub trait MappingTxn: Send {
    async fn exists(&mut self, code: &str) -> Result<bool>;

    async fn get(&mut self, code: &str) -> Result<Option<Mapping>>;

    /// Insert a new record. A record with the same code, committed or staged,
    /// fails with `ChoteError::UniquenessViolation`.
    async fn put(&mut self, mapping: &Mapping) -> Result<()>;

    /// Returns whether a record was removed.
    async fn delete(&mut self, code: &str) -> Result<bool>;

    /// Delete every record created at or before `cutoff`; returns the count.
    async fn delete_created_before(&mut self, cutoff: DateTime<Utc>) -> Result<u64>;

    async fn commit(self: Box<Self>) -> Result<()>;
}

#[async_trait]
pub trait MappingRepository: Send + Sync {
    fn backend_name(&self) -> &str;

    async fn begin(&self) -> Result<Box<dyn MappingTxn>>;

    /// Number of stored records, expired ones included.
    async fn count(&self) -> Result<u64>;
}

pub struct StorageFactory;

impl StorageFactory {
    pub async fn create(config: &DatabaseConfig) -> Result<Arc<dyn MappingRepository>> {
        // 从 URL 自动推断存储类型
        let backend_type = infer_backend_from_url(&config.database_url)?;

        if backend_type == "memory" {
            info!("Using in-memory storage, mappings are lost on restart");
            return Ok(Arc::new(MemoryRepository::new()));
        }

        let storage = SeaOrmRepository::new(&config.database_url, &backend_type, config).await?;
        Ok(Arc::new(storage))
    }
}
