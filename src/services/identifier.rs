use std::sync::Arc;

use tracing::debug;

use super::Freshness;
use crate::errors::Result;
use crate::storage::MappingTxn;
use crate::utils::{CODE_ALPHABET, GENERATED_CODE_LENGTH};

/// Source of uniformly distributed indices.
pub trait RandomSource: Send + Sync {
    /// A uniformly random index in `0..bound`. `bound` is never zero.
    fn index(&self, bound: usize) -> usize;
}

/// Thread-local CSPRNG from `rand`, seeded from the OS.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadRngSource;

impl RandomSource for ThreadRngSource {
    fn index(&self, bound: usize) -> usize {
        rand::random_range(0..bound)
    }
}

/// Draws random 6-character codes until one is free in the store.
#[derive(Clone)]
pub struct IdentifierGenerator {
    source: Arc<dyn RandomSource>,
}

impl IdentifierGenerator {
    pub fn new(source: Arc<dyn RandomSource>) -> Self {
        Self { source }
    }

    /// A single candidate, not checked against the store.
    pub fn draw(&self) -> String {
        (0..GENERATED_CODE_LENGTH)
            .map(|_| CODE_ALPHABET[self.source.index(CODE_ALPHABET.len())] as char)
            .collect()
    }

    /// Draw until a candidate passes the freshness check inside `txn`.
    ///
    /// There is no attempt cap: with 64^6 possible codes a live collision is
    /// rare, and a full keyspace would loop forever. An expired candidate is
    /// reclaimed by the check and returned.
    pub async fn generate(&self, txn: &mut dyn MappingTxn, freshness: &Freshness) -> Result<String> {
        let mut attempts: u64 = 0;
        loop {
            let candidate = self.draw();
            attempts += 1;

            if freshness.check_free(txn, &candidate).await? {
                if attempts > 1 {
                    debug!("Generated free code after {} draws", attempts);
                }
                return Ok(candidate);
            }

            debug!("Generated code '{}' is live, drawing again", candidate);
        }
    }
}

impl Default for IdentifierGenerator {
    fn default() -> Self {
        Self::new(Arc::new(ThreadRngSource))
    }
}
