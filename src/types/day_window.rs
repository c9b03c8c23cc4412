use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use std::fmt;

/// The request window for one calendar day: local midnight up to and including the last
/// microsecond of the day, expressed as UTC instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub date: NaiveDate,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DayWindow {
    /// Window for `date` using the machine's local clock.
    pub fn local(date: NaiveDate) -> Option<Self> {
        Self::in_timezone(date, &Local)
    }

    /// Window for `date` with midnight taken in `tz`.
    ///
    /// Ambiguous times resolve to the widest window. When midnight falls in a DST gap the
    /// window starts at the first local time after the gap (and an end of day in a gap moves
    /// back to the last time before it). Returns `None` only when no such time exists within
    /// a few hours of the boundary.
    pub fn in_timezone<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> Option<Self> {
        let start_naive = date.and_hms_opt(0, 0, 0)?;
        let end_naive = date.and_hms_micro_opt(23, 59, 59, 999_999)?;

        let start = resolve_near(tz, start_naive, true)?;
        let end = resolve_near(tz, end_naive, false)?;

        Some(Self {
            date,
            start: start.with_timezone(&Utc),
            end: end.with_timezone(&Utc),
        })
    }

    /// Start of the window in whole epoch seconds.
    pub fn start_epoch(&self) -> i64 {
        self.start.timestamp()
    }

    /// End of the window in whole epoch seconds (the trailing microseconds are truncated).
    pub fn end_epoch(&self) -> i64 {
        self.end.timestamp()
    }

    /// Object key of the artifact this window produces, e.g. `2024-03-09.csv`.
    pub fn artifact_key(&self) -> String {
        artifact_key(self.date)
    }
}

impl fmt::Display for DayWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{} .. {}]", self.date, self.start, self.end)
    }
}

const GAP_STEP_MINUTES: i64 = 15;
const MAX_GAP_STEPS: i32 = 12;

/// Resolves `local` in `tz`, stepping in quarter hours (forward for a start, backward for an
/// end) while it falls in a DST gap.
fn resolve_near<Tz: TimeZone>(
    tz: &Tz,
    local: NaiveDateTime,
    forward: bool,
) -> Option<DateTime<Tz>> {
    let step = Duration::minutes(GAP_STEP_MINUTES);
    (0..=MAX_GAP_STEPS).find_map(|i| {
        let candidate = if forward {
            local + step * i
        } else {
            local - step * i
        };
        let resolved = tz.from_local_datetime(&candidate);
        if forward {
            resolved.earliest()
        } else {
            resolved.latest()
        }
    })
}

pub fn artifact_key(date: NaiveDate) -> String {
    format!("{}.csv", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, LocalResult, NaiveTime, Timelike};

    #[test]
    fn test_window_in_utc_spans_whole_day() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let window = DayWindow::in_timezone(date, &Utc).unwrap();

        assert_eq!(window.start_epoch(), 1_704_067_200);
        assert_eq!(window.end_epoch(), 1_704_067_200 + 86_399);
        assert_eq!(window.end.nanosecond(), 999_999_000);
    }

    #[test]
    fn test_window_uses_local_midnight() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let brazil = FixedOffset::west_opt(3 * 3600).unwrap();
        let window = DayWindow::in_timezone(date, &brazil).unwrap();

        // 00:00 at UTC-3 is 03:00 UTC
        assert_eq!(window.start_epoch(), 1_704_067_200 + 3 * 3600);
        assert_eq!(window.end_epoch() - window.start_epoch(), 86_399);
    }

    /// UTC-3 that jumps to UTC-2 at local midnight on 2024-11-03, so 00:00..01:00 does not exist.
    #[derive(Debug, Clone, Copy)]
    struct MidnightGap;

    impl MidnightGap {
        fn before() -> FixedOffset {
            FixedOffset::west_opt(3 * 3600).unwrap()
        }

        fn after() -> FixedOffset {
            FixedOffset::west_opt(2 * 3600).unwrap()
        }

        fn switch_utc() -> NaiveDateTime {
            NaiveDate::from_ymd_opt(2024, 11, 3)
                .unwrap()
                .and_hms_opt(3, 0, 0)
                .unwrap()
        }
    }

    impl TimeZone for MidnightGap {
        type Offset = FixedOffset;

        fn from_offset(_: &FixedOffset) -> Self {
            MidnightGap
        }

        fn offset_from_local_date(&self, local: &NaiveDate) -> LocalResult<FixedOffset> {
            self.offset_from_local_datetime(&local.and_time(NaiveTime::MIN))
        }

        fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> LocalResult<FixedOffset> {
            let gap_start = NaiveDate::from_ymd_opt(2024, 11, 3)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap();
            if *local < gap_start {
                LocalResult::Single(Self::before())
            } else if *local < gap_start + Duration::hours(1) {
                LocalResult::None
            } else {
                LocalResult::Single(Self::after())
            }
        }

        fn offset_from_utc_date(&self, utc: &NaiveDate) -> FixedOffset {
            self.offset_from_utc_datetime(&utc.and_time(NaiveTime::MIN))
        }

        fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> FixedOffset {
            if *utc < Self::switch_utc() {
                Self::before()
            } else {
                Self::after()
            }
        }
    }

    #[test]
    fn test_midnight_in_dst_gap_starts_after_gap() {
        let date = NaiveDate::from_ymd_opt(2024, 11, 3).unwrap();
        let window = DayWindow::in_timezone(date, &MidnightGap).unwrap();

        // 01:00 at UTC-2, the first local time that exists
        assert_eq!(window.start, Utc.with_ymd_and_hms(2024, 11, 3, 3, 0, 0).unwrap());
        assert_eq!(window.end_epoch() - window.start_epoch(), 23 * 3600 - 1);

        // Neighbouring days are untouched
        let before = DayWindow::in_timezone(date.pred_opt().unwrap(), &MidnightGap).unwrap();
        assert_eq!(before.end_epoch() - before.start_epoch(), 86_399);
    }

    #[test]
    fn test_artifact_key_is_iso_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(artifact_key(date), "2024-03-09.csv");
        assert_eq!(
            DayWindow::in_timezone(date, &Utc).unwrap().artifact_key(),
            "2024-03-09.csv"
        );
    }
}
