//! In-memory storage backend
//!
//! A transaction takes the map's lock for its whole lifetime and works on a
//! staged copy, so transactions are fully serialized and an uncommitted one
//! leaves no trace.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, OwnedMutexGuard};

use super::{Mapping, MappingRepository, MappingTxn};
use crate::errors::{ChoteError, Result};

#[derive(Clone, Default)]
pub struct MemoryRepository {
    data: Arc<Mutex<HashMap<String, Mapping>>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MappingRepository for MemoryRepository {
    fn backend_name(&self) -> &str {
        "memory"
    }

    async fn begin(&self) -> Result<Box<dyn MappingTxn>> {
        let guard = Arc::clone(&self.data).lock_owned().await;
        let staged = guard.clone();
        Ok(Box::new(MemoryTxn { guard, staged }))
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.data.lock().await.len() as u64)
    }
}

struct MemoryTxn {
    guard: OwnedMutexGuard<HashMap<String, Mapping>>,
    staged: HashMap<String, Mapping>,
}

#[async_trait]
impl MappingTxn for MemoryTxn {
    async fn exists(&mut self, code: &str) -> Result<bool> {
        Ok(self.staged.contains_key(code))
    }

    async fn get(&mut self, code: &str) -> Result<Option<Mapping>> {
        Ok(self.staged.get(code).cloned())
    }

    async fn put(&mut self, mapping: &Mapping) -> Result<()> {
        if self.staged.contains_key(&mapping.code) {
            return Err(ChoteError::uniqueness_violation(format!(
                "Code '{}' already exists",
                mapping.code
            )));
        }
        self.staged.insert(mapping.code.clone(), mapping.clone());
        Ok(())
    }

    async fn delete(&mut self, code: &str) -> Result<bool> {
        Ok(self.staged.remove(code).is_some())
    }

    async fn delete_created_before(&mut self, cutoff: DateTime<Utc>) -> Result<u64> {
        let before = self.staged.len();
        self.staged.retain(|_, m| m.created_at > cutoff);
        Ok((before - self.staged.len()) as u64)
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        let MemoryTxn { mut guard, staged } = *self;
        *guard = staged;
        Ok(())
    }
}
