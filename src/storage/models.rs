use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A short code and the URL it points to.
///
/// Records are never updated in place: a code is created, and later deleted
/// once it has expired and been reclaimed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mapping {
    pub code: String,
    pub target: String,
    pub created_at: DateTime<Utc>,
}

impl Mapping {
    pub fn new(code: impl Into<String>, target: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            code: code.into(),
            target: target.into(),
            created_at,
        }
    }

    /// 记录在 `now` 时刻是否仍有效（`now - created_at < lifetime`）
    pub fn is_live_at(&self, now: DateTime<Utc>, lifetime: Duration) -> bool {
        now.signed_duration_since(self.created_at) < lifetime
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_live_boundary() {
        let t0 = Utc::now();
        let mapping = Mapping::new("abc123", "https://example.com", t0);
        let lifetime = Duration::minutes(2);

        assert!(mapping.is_live_at(t0, lifetime));
        assert!(mapping.is_live_at(t0 + Duration::seconds(119), lifetime));
        assert!(!mapping.is_live_at(t0 + Duration::minutes(2), lifetime));
        assert!(!mapping.is_live_at(t0 + Duration::minutes(3), lifetime));
    }

    #[test]
    fn test_clock_skew_keeps_record_live() {
        // 创建时间在"未来"（时钟回拨）时仍视为有效
        let t0 = Utc::now();
        let mapping = Mapping::new("skew", "https://example.com", t0 + Duration::seconds(30));
        assert!(mapping.is_live_at(t0, Duration::minutes(2)));
    }
}
