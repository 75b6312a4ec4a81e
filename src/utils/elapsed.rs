use std::fmt::Display;

use chrono::{DateTime, TimeZone};

/// Time spent on a task, split the way it is shown on the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct ElapsedTime {
    minutes: u32,
    seconds: u32,
}

impl ElapsedTime {
    /// Whole seconds between `start` and `end`. A span going backwards is treated as empty.
    pub fn between<Tz: TimeZone>(start: &DateTime<Tz>, end: &DateTime<Tz>) -> Self {
        let total = (end.clone() - start.clone()).num_seconds().max(0);
        Self::from_seconds(u64::try_from(total).unwrap_or_default())
    }

    pub fn from_seconds(total: u64) -> Self {
        Self {
            minutes: u32::try_from(total / 60).unwrap_or(u32::MAX),
            seconds: (total % 60) as u32,
        }
    }

    /// Minutes that end up on disk. Leftover seconds are dropped, never rounded up.
    pub fn persisted_minutes(&self) -> u32 {
        self.minutes
    }
}

impl Display for ElapsedTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{:02}", self.minutes, self.seconds)
    }
}
