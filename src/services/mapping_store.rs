//! Short-code allocation and resolution
//!
//! [`MappingStore`] is the authoritative keeper of mappings. Every operation
//! runs inside one store transaction, and the store's uniqueness constraint on
//! the code is what finally decides between racing writers.

use std::sync::Arc;

use chrono::Duration;
use tracing::{debug, info};

use super::{Freshness, IdentifierGenerator};
use crate::errors::{ChoteError, Result};
use crate::storage::{Mapping, MappingRepository};
use crate::utils::{Clock, MAX_CODE_LENGTH, SystemClock, fallback_path, is_valid_code};

/// How long a mapping stays live after creation.
pub const DEFAULT_LIFETIME: Duration = Duration::minutes(2);

/// Message returned to callers whose preferred code is live.
pub const CODE_TAKEN_MESSAGE: &str = "oops..!! URL already exists, try another combination";

/// Outcome of resolving a code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Target(String),
    /// The code never existed or has just been reclaimed.
    NotFound,
}

impl Resolution {
    /// Where a caller should be sent: the target, or the input form with the
    /// code pre-filled.
    pub fn into_location(self, code: &str) -> String {
        match self {
            Resolution::Target(target) => target,
            Resolution::NotFound => fallback_path(code),
        }
    }
}

pub struct MappingStore {
    repository: Arc<dyn MappingRepository>,
    generator: IdentifierGenerator,
    freshness: Freshness,
}

impl MappingStore {
    pub fn new(
        repository: Arc<dyn MappingRepository>,
        generator: IdentifierGenerator,
        clock: Arc<dyn Clock>,
        lifetime: Duration,
    ) -> Self {
        Self {
            repository,
            generator,
            freshness: Freshness::new(clock, lifetime),
        }
    }

    /// System clock, thread-local CSPRNG and the two-minute lifetime.
    pub fn with_defaults(repository: Arc<dyn MappingRepository>) -> Self {
        Self::new(
            repository,
            IdentifierGenerator::default(),
            Arc::new(SystemClock),
            DEFAULT_LIFETIME,
        )
    }

    pub fn backend_name(&self) -> &str {
        self.repository.backend_name()
    }

    pub fn lifetime(&self) -> Duration {
        self.freshness.lifetime()
    }

    pub async fn count(&self) -> Result<u64> {
        self.repository.count().await
    }

    /// Whether `code` can be claimed right now.
    ///
    /// Despite the name this is not a pure query: an expired record is deleted
    /// and the deletion is committed before `true` is returned. Two rapid calls
    /// after expiry both return `true`; only the first deletes anything.
    pub async fn is_free(&self, code: &str) -> Result<bool> {
        let mut txn = self.repository.begin().await?;
        let free = self.freshness.check_free(txn.as_mut(), code).await?;
        txn.commit().await?;
        Ok(free)
    }

    /// Store `target` under `preferred_code`, or under a generated code when
    /// none (or only whitespace) is given. Returns the code.
    ///
    /// A live preferred code fails with `CodeTaken` and is never swapped for
    /// another. Losing a race at insert time fails with `UniquenessViolation`.
    pub async fn add(&self, target: &str, preferred_code: Option<&str>) -> Result<String> {
        let mut txn = self.repository.begin().await?;

        let (code, generated) = match preferred_code.filter(|c| !c.trim().is_empty()) {
            Some(code) => {
                if !is_valid_code(code) {
                    return Err(ChoteError::invalid_code(format!(
                        "Invalid short code '{}'. Use 1-{} characters from [A-Za-z0-9_-].",
                        code, MAX_CODE_LENGTH
                    )));
                }
                if !self.freshness.check_free(txn.as_mut(), code).await? {
                    debug!("Preferred code '{}' is live", code);
                    return Err(ChoteError::code_taken(CODE_TAKEN_MESSAGE));
                }
                (code.to_string(), false)
            }
            None => (
                self.generator
                    .generate(txn.as_mut(), &self.freshness)
                    .await?,
                true,
            ),
        };

        let mapping = Mapping::new(code.as_str(), target, self.freshness.now());
        txn.put(&mapping).await?;
        txn.commit().await?;

        info!(
            "MappingStore: created {} code '{}' -> '{}'",
            if generated { "generated" } else { "preferred" },
            code,
            target
        );
        Ok(code)
    }

    /// Look up the live target for `code`, reclaiming it if it has expired.
    pub async fn resolve(&self, code: &str) -> Result<Resolution> {
        let mut txn = self.repository.begin().await?;
        let live = self.freshness.live_mapping(txn.as_mut(), code).await?;
        txn.commit().await?;

        Ok(match live {
            Some(mapping) => Resolution::Target(mapping.target),
            None => {
                debug!("Code '{}' not found", code);
                Resolution::NotFound
            }
        })
    }

    /// [`MappingStore::resolve`] mapped to a redirect location.
    pub async fn redirect_location(&self, code: &str) -> Result<String> {
        Ok(self.resolve(code).await?.into_location(code))
    }

    /// Delete every expired record in one transaction. Optional: reads reclaim
    /// lazily regardless.
    pub async fn sweep_expired(&self) -> Result<u64> {
        let mut txn = self.repository.begin().await?;
        let removed = txn.delete_created_before(self.freshness.cutoff()).await?;
        txn.commit().await?;

        if removed > 0 {
            info!("MappingStore: swept {} expired mappings", removed);
        }
        Ok(removed)
    }
}
