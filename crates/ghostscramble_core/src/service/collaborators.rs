//! External collaborators driven by the lifecycle service.
//!
//! # Responsibility
//! - Abstract blocking user confirmations and alerts.
//! - Abstract wall-clock reads used for ids and calendar dates.

use chrono::{Local, Utc};

/// Blocking yes/no confirmation and fire-and-forget alerts.
pub trait UserPrompter {
    /// Returns `true` when the user agrees to proceed.
    fn confirm(&mut self, message: &str) -> bool;
    fn alert(&mut self, message: &str);
}

impl<T: UserPrompter + ?Sized> UserPrompter for &mut T {
    fn confirm(&mut self, message: &str) -> bool {
        (**self).confirm(message)
    }

    fn alert(&mut self, message: &str) {
        (**self).alert(message)
    }
}

/// Source of save timestamps and calendar dates.
pub trait Clock {
    /// Unix epoch milliseconds.
    fn now_ms(&self) -> i64;
    /// Local calendar date, `YYYY-MM-DD`.
    fn today(&self) -> String;
}

/// Clock backed by the system time and local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }

    fn today(&self) -> String {
        Local::now().date_naive().format("%Y-%m-%d").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::{Clock, SystemClock};
    use chrono::NaiveDate;

    #[test]
    fn system_clock_today_is_iso_date() {
        let today = SystemClock.today();
        assert!(NaiveDate::parse_from_str(&today, "%Y-%m-%d").is_ok());
        assert!(SystemClock.now_ms() > 0);
    }
}
