//! Process-wide access-token cache.
//!
//! One cache is shared across all concurrent job executions. The mutex is
//! held across a refresh, so concurrent callers that find the token stale
//! line up behind a single fetch instead of racing (single-flight refresh).

use tokio::sync::Mutex;

/// Tokens are reused only while they have at least this much lifetime left.
pub const REUSE_MARGIN_MS: i64 = 60_000;

/// Lifetime assumed when the auth response carries no expiry at all.
pub const DEFAULT_TTL_MS: i64 = 25 * 60 * 1000;

/// A cached access token with its absolute expiry.
#[derive(Debug, Clone)]
pub struct CachedToken {
    pub value: String,
    /// Epoch milliseconds.
    pub expires_at_ms: i64,
}

impl CachedToken {
    /// Whether the token is still safely usable at `now_ms`.
    pub fn is_fresh(&self, now_ms: i64) -> bool {
        self.expires_at_ms > now_ms + REUSE_MARGIN_MS
    }
}

/// Resolve the absolute expiry from an auth response: prefer `expires_at`,
/// then `now + expires_in`, then the 25-minute default.
pub fn resolve_expiry_ms(now_ms: i64, expires_at: Option<i64>, expires_in: Option<i64>) -> i64 {
    expires_at
        .or_else(|| expires_in.map(|secs| now_ms + secs * 1000))
        .unwrap_or(now_ms + DEFAULT_TTL_MS)
}

/// Mutex-guarded token slot.
#[derive(Debug, Default)]
pub struct TokenCache {
    slot: Mutex<Option<CachedToken>>,
}

impl TokenCache {
    /// Lock the slot. The guard is held across refresh by the caller.
    pub async fn lock(&self) -> tokio::sync::MutexGuard<'_, Option<CachedToken>> {
        self.slot.lock().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_token_within_margin() {
        let token = CachedToken {
            value: "t".into(),
            expires_at_ms: 1_000_000,
        };
        assert!(token.is_fresh(1_000_000 - REUSE_MARGIN_MS - 1));
        assert!(!token.is_fresh(1_000_000 - REUSE_MARGIN_MS));
        assert!(!token.is_fresh(1_000_000));
    }

    #[test]
    fn expiry_prefers_absolute() {
        assert_eq!(resolve_expiry_ms(100, Some(5_000), Some(60)), 5_000);
    }

    #[test]
    fn expiry_falls_back_to_relative() {
        assert_eq!(resolve_expiry_ms(100, None, Some(60)), 100 + 60_000);
    }

    #[test]
    fn expiry_defaults_to_25_minutes() {
        assert_eq!(resolve_expiry_ms(100, None, None), 100 + DEFAULT_TTL_MS);
    }
}
