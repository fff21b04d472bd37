//! Repository for the `usage_daily` quota counters.
//!
//! Reservation is a single atomic increment-or-create keyed by
//! `(user_id, date)`. A read-then-write pair would let two concurrent
//! admissions both pass when one slot remains; the conditional upsert
//! below cannot oversell capacity.

use sqlx::PgPool;
use storyforge_core::types::{DbId, Timestamp};

/// Atomic per-business-day usage counters.
pub struct UsageRepo;

impl UsageRepo {
    /// Number of generations the user has admitted on the given business
    /// day. Zero when no counter row exists yet.
    pub async fn used_on(
        pool: &PgPool,
        user_id: DbId,
        day: Timestamp,
    ) -> Result<i32, sqlx::Error> {
        let count: Option<i32> = sqlx::query_scalar(
            "SELECT count FROM usage_daily WHERE user_id = $1 AND date = $2",
        )
        .bind(user_id)
        .bind(day)
        .fetch_optional(pool)
        .await?;
        Ok(count.unwrap_or(0))
    }

    /// Atomically take one generation slot for the business day.
    ///
    /// With `cap = Some(n)` the increment only applies while the counter is
    /// below `n`; `Ok(false)` means the day's quota is exhausted and
    /// nothing was written. With `cap = None` (unlimited plans) the
    /// increment is unconditional.
    pub async fn reserve(
        pool: &PgPool,
        user_id: DbId,
        day: Timestamp,
        cap: Option<i32>,
    ) -> Result<bool, sqlx::Error> {
        let taken: Option<i32> = match cap {
            Some(cap) => {
                sqlx::query_scalar(
                    "INSERT INTO usage_daily (user_id, date, count) \
                     VALUES ($1, $2, 1) \
                     ON CONFLICT (user_id, date) \
                     DO UPDATE SET count = usage_daily.count + 1 \
                     WHERE usage_daily.count < $3 \
                     RETURNING count",
                )
                .bind(user_id)
                .bind(day)
                .bind(cap)
                .fetch_optional(pool)
                .await?
            }
            None => {
                sqlx::query_scalar(
                    "INSERT INTO usage_daily (user_id, date, count) \
                     VALUES ($1, $2, 1) \
                     ON CONFLICT (user_id, date) \
                     DO UPDATE SET count = usage_daily.count + 1 \
                     RETURNING count",
                )
                .bind(user_id)
                .bind(day)
                .fetch_optional(pool)
                .await?
            }
        };
        Ok(taken.is_some())
    }
}
