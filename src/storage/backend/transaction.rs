use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ColumnTrait, DatabaseTransaction, DbErr, EntityTrait, PaginatorTrait, QueryFilter, SqlErr,
};
use tracing::debug;

use super::converters::{mapping_to_active_model, model_to_mapping};
use crate::errors::{ChoteError, Result};
use crate::storage::{Mapping, MappingTxn};
use migration::entities::mapping;

/// Transactional scope over a SeaORM `DatabaseTransaction`.
///
/// SeaORM rolls the transaction back when it is dropped uncommitted.
pub struct SeaOrmTxn {
    txn: DatabaseTransaction,
}

impl SeaOrmTxn {
    pub fn new(txn: DatabaseTransaction) -> Self {
        Self { txn }
    }
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

#[async_trait]
impl MappingTxn for SeaOrmTxn {
    async fn exists(&mut self, code: &str) -> Result<bool> {
        let count = mapping::Entity::find_by_id(code.to_owned())
            .count(&self.txn)
            .await
            .map_err(|e| {
                ChoteError::database_operation(format!("Failed to check code '{}': {}", code, e))
            })?;
        Ok(count > 0)
    }

    async fn get(&mut self, code: &str) -> Result<Option<Mapping>> {
        let model = mapping::Entity::find_by_id(code.to_owned())
            .one(&self.txn)
            .await
            .map_err(|e| {
                ChoteError::database_operation(format!("Failed to query code '{}': {}", code, e))
            })?;
        Ok(model.map(model_to_mapping))
    }

    async fn put(&mut self, m: &Mapping) -> Result<()> {
        mapping::Entity::insert(mapping_to_active_model(m))
            .exec_without_returning(&self.txn)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    ChoteError::uniqueness_violation(format!(
                        "Code '{}' was claimed concurrently",
                        m.code
                    ))
                } else {
                    ChoteError::database_operation(format!(
                        "Failed to insert code '{}': {}",
                        m.code, e
                    ))
                }
            })?;
        debug!("Mapping inserted: {}", m.code);
        Ok(())
    }

    async fn delete(&mut self, code: &str) -> Result<bool> {
        let result = mapping::Entity::delete_by_id(code.to_owned())
            .exec(&self.txn)
            .await
            .map_err(|e| {
                ChoteError::database_operation(format!("Failed to delete code '{}': {}", code, e))
            })?;
        Ok(result.rows_affected > 0)
    }

    async fn delete_created_before(&mut self, cutoff: DateTime<Utc>) -> Result<u64> {
        let result = mapping::Entity::delete_many()
            .filter(mapping::Column::CreatedAt.lte(cutoff))
            .exec(&self.txn)
            .await
            .map_err(|e| {
                ChoteError::database_operation(format!("Failed to delete expired mappings: {}", e))
            })?;
        Ok(result.rows_affected)
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        self.txn.commit().await.map_err(|e| {
            if is_unique_violation(&e) {
                ChoteError::uniqueness_violation(format!("Commit lost a uniqueness race: {}", e))
            } else {
                ChoteError::database_operation(format!("Failed to commit transaction: {}", e))
            }
        })
    }
}
