//! Quota plan constants and business-day computation.
//!
//! The accounting period is bounded by midnight in a fixed UTC+3 offset,
//! independent of server or caller timezone. The atomic counter itself
//! lives in the db crate; this module owns the math.

use chrono::{Duration, NaiveTime, Utc};
use serde::Serialize;

use crate::error::CoreError;
use crate::types::Timestamp;

/// Daily generation cap for FREE-plan users.
pub const FREE_DAILY_LIMIT: i32 = 5;

/// Sentinel encoding "no cap" in quota responses.
pub const UNLIMITED: i32 = -1;

/// Fixed business-day offset (UTC+3).
const BUSINESS_DAY_OFFSET_HOURS: i64 = 3;

/// Subscription plan gating generation quota.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Plan {
    Free,
    Pro,
}

impl Plan {
    /// Database `plan` column value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Free => "FREE",
            Self::Pro => "PRO",
        }
    }

    /// Parse from the database `plan` column.
    pub fn from_str(value: &str) -> Result<Self, CoreError> {
        match value {
            "FREE" => Ok(Self::Free),
            "PRO" => Ok(Self::Pro),
            other => Err(CoreError::Validation(format!("Unknown plan '{other}'"))),
        }
    }

    /// Daily cap for this plan, [`UNLIMITED`] for PRO.
    pub fn daily_limit(self) -> i32 {
        match self {
            Self::Free => FREE_DAILY_LIMIT,
            Self::Pro => UNLIMITED,
        }
    }
}

/// Snapshot of a user's quota for the current business day.
#[derive(Debug, Clone, Serialize)]
pub struct QuotaStatus {
    pub plan: Plan,
    pub used: i32,
    pub total: i32,
    pub remaining: i32,
}

impl QuotaStatus {
    /// Build the status for a plan and a used count.
    pub fn new(plan: Plan, used: i32) -> Self {
        let total = plan.daily_limit();
        let remaining = if total == UNLIMITED {
            UNLIMITED
        } else {
            (total - used).max(0)
        };
        Self {
            plan,
            used,
            total,
            remaining,
        }
    }
}

/// Start of the business day containing `now`.
///
/// Shift by the fixed +3h offset, truncate to midnight, shift back. The
/// result is a UTC instant stable across server timezones.
pub fn business_day(now: Timestamp) -> Timestamp {
    let offset = Duration::hours(BUSINESS_DAY_OFFSET_HOURS);
    let shifted = now + offset;
    let midnight = shifted.date_naive().and_time(NaiveTime::MIN).and_utc();
    midnight - offset
}

/// Start of the current business day.
pub fn current_business_day() -> Timestamp {
    business_day(Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn at(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn boundary_is_2100_utc() {
        // 00:00 UTC+3 == 21:00 UTC of the previous calendar day.
        assert_eq!(
            business_day(at("2025-06-10T12:00:00Z")),
            at("2025-06-09T21:00:00Z")
        );
    }

    #[test]
    fn one_second_straddle_at_business_midnight() {
        let before = business_day(at("2025-06-10T20:59:59Z"));
        let after = business_day(at("2025-06-10T21:00:00Z"));
        assert_ne!(before, after);
        assert_eq!(after - before, Duration::hours(24));
    }

    #[test]
    fn other_hour_boundaries_share_a_bucket() {
        let before = business_day(at("2025-06-10T13:59:59Z"));
        let after = business_day(at("2025-06-10T14:00:00Z"));
        assert_eq!(before, after);
    }

    #[test]
    fn utc_midnight_does_not_split_the_bucket() {
        let before = business_day(at("2025-06-10T23:59:59Z"));
        let after = business_day(at("2025-06-11T00:00:01Z"));
        assert_eq!(before, after);
    }

    #[test]
    fn free_plan_counts_down() {
        let status = QuotaStatus::new(Plan::Free, 3);
        assert_eq!(status.total, 5);
        assert_eq!(status.remaining, 2);
    }

    #[test]
    fn free_plan_never_goes_negative() {
        let status = QuotaStatus::new(Plan::Free, 9);
        assert_eq!(status.remaining, 0);
    }

    #[test]
    fn pro_plan_is_unlimited_regardless_of_usage() {
        let status = QuotaStatus::new(Plan::Pro, 1000);
        assert_eq!(status.total, UNLIMITED);
        assert_eq!(status.remaining, UNLIMITED);
    }

    #[test]
    fn plan_round_trip() {
        assert_eq!(Plan::from_str("FREE").unwrap(), Plan::Free);
        assert_eq!(Plan::from_str("PRO").unwrap(), Plan::Pro);
        assert!(Plan::from_str("TRIAL").is_err());
    }
}
