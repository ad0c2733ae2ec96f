use chrono::{DateTime, Utc};

use crate::domain::repository::Clock;

/// Wall-clock time. The only `Clock` used outside of tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
