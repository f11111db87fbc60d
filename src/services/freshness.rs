use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::info;

use crate::errors::Result;
use crate::storage::{Mapping, MappingTxn};
use crate::utils::Clock;

/// Freshness rule for stored mappings.
///
/// A record is live while `now - created_at < lifetime`. Expired records are
/// reclaimed (deleted) by whichever check first observes them; nothing runs on
/// a timer for correctness.
#[derive(Clone)]
pub struct Freshness {
    clock: Arc<dyn Clock>,
    lifetime: Duration,
}

impl Freshness {
    pub fn new(clock: Arc<dyn Clock>, lifetime: Duration) -> Self {
        Self { clock, lifetime }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// Records created at or before this instant are expired.
    pub fn cutoff(&self) -> DateTime<Utc> {
        self.now() - self.lifetime
    }

    /// Returns the live record for `code`, if any.
    ///
    /// Not a pure read: an expired record is deleted inside `txn` before
    /// `None` is returned.
    pub async fn live_mapping(
        &self,
        txn: &mut dyn MappingTxn,
        code: &str,
    ) -> Result<Option<Mapping>> {
        let Some(existing) = txn.get(code).await? else {
            return Ok(None);
        };

        if existing.is_live_at(self.now(), self.lifetime) {
            return Ok(Some(existing));
        }

        txn.delete(code).await?;
        info!(
            "Reclaimed expired code '{}' (created at {})",
            code, existing.created_at
        );
        Ok(None)
    }

    /// `true` when `code` is absent or expired. Expired records are deleted
    /// as a side effect (see [`Freshness::live_mapping`]).
    pub async fn check_free(&self, txn: &mut dyn MappingTxn, code: &str) -> Result<bool> {
        Ok(self.live_mapping(txn, code).await?.is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MappingRepository, MemoryRepository};
    use crate::utils::ManualClock;

    async fn seeded(code: &str, clock: &ManualClock) -> MemoryRepository {
        let repo = MemoryRepository::new();
        let mut txn = repo.begin().await.unwrap();
        txn.put(&Mapping::new(code, "https://t.test", clock.now()))
            .await
            .unwrap();
        txn.commit().await.unwrap();
        repo
    }

    #[tokio::test]
    async fn test_live_mapping_within_lifetime() {
        let clock = Arc::new(ManualClock::default());
        let repo = seeded("abc", &clock).await;
        let freshness = Freshness::new(clock.clone(), Duration::minutes(2));

        clock.advance(Duration::seconds(119));
        let mut txn = repo.begin().await.unwrap();
        assert!(freshness.live_mapping(txn.as_mut(), "abc").await.unwrap().is_some());
        assert!(!freshness.check_free(txn.as_mut(), "abc").await.unwrap());
    }

    #[tokio::test]
    async fn test_expired_mapping_deleted_in_transaction() {
        let clock = Arc::new(ManualClock::default());
        let repo = seeded("abc", &clock).await;
        let freshness = Freshness::new(clock.clone(), Duration::minutes(2));

        clock.advance(Duration::minutes(2));
        let mut txn = repo.begin().await.unwrap();
        assert!(freshness.check_free(txn.as_mut(), "abc").await.unwrap());
        assert!(!txn.exists("abc").await.unwrap());

        // 未提交则删除不生效
        drop(txn);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[test]
    fn test_cutoff_is_now_minus_lifetime() {
        let clock = Arc::new(ManualClock::default());
        let freshness = Freshness::new(clock.clone(), Duration::seconds(90));
        assert_eq!(freshness.cutoff(), clock.now() - Duration::seconds(90));
    }
}
