use chrono::{DateTime, Duration, FixedOffset, NaiveTime, Utc};

/// Half-open calendar day `[start, end)` expressed in UTC.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DayWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DayWindow {
    /// The calendar day containing `now`, with day boundaries taken in `offset`.
    pub fn containing(now: DateTime<Utc>, offset: FixedOffset) -> Self {
        let local_midnight = now.with_timezone(&offset).date_naive().and_time(NaiveTime::MIN);
        let start = (local_midnight - Duration::seconds(i64::from(offset.local_minus_utc())))
            .and_utc();
        Self {
            start,
            end: start + Duration::days(1),
        }
    }

    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        self.start <= *instant && *instant < self.end
    }
}
