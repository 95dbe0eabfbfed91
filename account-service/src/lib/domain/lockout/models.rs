//! Failed-login tracking and the lock state machine.
//!
//! Per username: Unlocked while the failure count is below the limit, Locked
//! once it reaches the limit and until `duration` has passed since the last
//! failure. An expired lock goes back to Unlocked only through
//! [`LockoutPolicy::maybe_unlock`], which the caller must persist.

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

/// Persisted failure counter for one username.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockoutRecord {
    pub username: String,
    pub failed_attempts: u32,
    pub last_failure_at: DateTime<Utc>,
}

impl LockoutRecord {
    /// A record with no failures: count 0, timestamp at the Unix epoch.
    pub fn cleared(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            failed_attempts: 0,
            last_failure_at: DateTime::<Utc>::default(),
        }
    }
}

/// Lock state reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockStatus {
    Unlocked,
    Locked { remaining_seconds: i64 },
}

impl LockStatus {
    pub fn is_locked(&self) -> bool {
        matches!(self, LockStatus::Locked { .. })
    }

    /// Seconds until the lock lifts; 0 when unlocked.
    pub fn remaining_seconds(&self) -> i64 {
        match self {
            LockStatus::Unlocked => 0,
            LockStatus::Locked { remaining_seconds } => *remaining_seconds,
        }
    }
}

/// Lockout thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockoutPolicy {
    /// Consecutive failures that lock the account
    pub max_failed_attempts: u32,
    /// How long the lock lasts, measured from the last failure
    pub duration: Duration,
}

impl Default for LockoutPolicy {
    fn default() -> Self {
        Self {
            max_failed_attempts: 3,
            duration: Duration::seconds(300),
        }
    }
}

impl LockoutPolicy {
    pub fn new(max_failed_attempts: u32, duration: Duration) -> Self {
        Self {
            max_failed_attempts,
            duration,
        }
    }

    fn reached_limit(&self, record: &LockoutRecord) -> bool {
        record.failed_attempts >= self.max_failed_attempts
    }

    fn window_elapsed(&self, record: &LockoutRecord, now: DateTime<Utc>) -> bool {
        now - record.last_failure_at >= self.duration
    }

    /// Whether the record locks its username at `now`. Pure.
    pub fn is_locked(&self, record: &LockoutRecord, now: DateTime<Utc>) -> bool {
        self.reached_limit(record) && !self.window_elapsed(record, now)
    }

    /// Whole seconds left on the lock, rounded up. 0 when not locked.
    pub fn remaining_seconds(&self, record: &LockoutRecord, now: DateTime<Utc>) -> i64 {
        if !self.is_locked(record, now) {
            return 0;
        }

        let remaining = record.last_failure_at + self.duration - now;
        let whole_seconds = remaining.num_seconds();
        if remaining > Duration::seconds(whole_seconds) {
            whole_seconds + 1
        } else {
            whole_seconds
        }
    }

    /// Lock state of the record at `now`. Pure.
    pub fn status(&self, record: &LockoutRecord, now: DateTime<Utc>) -> LockStatus {
        if self.is_locked(record, now) {
            LockStatus::Locked {
                remaining_seconds: self.remaining_seconds(record, now),
            }
        } else {
            LockStatus::Unlocked
        }
    }

    /// The Locked -> Unlocked transition.
    ///
    /// Returns the cleared record when the record reached the limit and its
    /// window has elapsed; `None` when nothing should change.
    pub fn maybe_unlock(&self, record: &LockoutRecord, now: DateTime<Utc>) -> Option<LockoutRecord> {
        if self.reached_limit(record) && self.window_elapsed(record, now) {
            Some(LockoutRecord::cleared(record.username.clone()))
        } else {
            None
        }
    }
}
