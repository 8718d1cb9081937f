use std::fmt::{Display, Formatter};

use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// Half-open interval `[start, end)` of Unix seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeWindow {
    pub start: i64,
    pub end: i64,
}

impl TimeWindow {
    /// The `width_secs` seconds ending (exclusively) at `now`.
    ///
    /// The start saturates at `i64::MIN` instead of wrapping.
    pub fn trailing(now: i64, width_secs: u32) -> Self {
        Self {
            start: now.saturating_sub(i64::from(width_secs)),
            end: now,
        }
    }

    pub fn contains(&self, time: i64) -> bool {
        self.start <= time && time < self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

fn format_seconds(seconds: i64) -> String {
    OffsetDateTime::from_unix_timestamp(seconds)
        .ok()
        .and_then(|value| value.format(&Rfc3339).ok())
        .unwrap_or_else(|| seconds.to_string())
}

impl Display for TimeWindow {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}, {})",
            format_seconds(self.start),
            format_seconds(self.end)
        )
    }
}
