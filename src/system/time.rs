//! Time keeping module for the watch face

use chrono::{DateTime, Datelike, NaiveDateTime, Timelike};
use embassy_time::Instant;

/// Wall clock fields shown on the face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayTime {
    /// 0-23
    pub hour: u8,
    /// 0-59
    pub minute: u8,
    /// 0-6, Sunday is 0
    pub weekday: u8,
    /// 1-31
    pub month_day: u8,
    /// 1-12
    pub month: u8,
}

impl DisplayTime {
    /// Take the displayed fields from a local date and time
    pub fn from_datetime(time: &NaiveDateTime) -> Self {
        Self {
            hour: time.hour() as u8,
            minute: time.minute() as u8,
            weekday: time.weekday().num_days_from_sunday() as u8,
            month_day: time.day() as u8,
            month: time.month() as u8,
        }
    }
}

pub struct TimeReference {
    /// Clock time
    time: NaiveDateTime,
    /// Related system time
    instant: Instant,
}

impl Default for TimeReference {
    fn default() -> Self {
        Self {
            time: NaiveDateTime::UNIX_EPOCH,
            instant: Instant::from_ticks(0),
        }
    }
}

impl TimeReference {
    /// Create new time reference from NaiveDateTime
    pub fn from_datetime(time: NaiveDateTime, instant: Instant) -> Self {
        Self { time, instant }
    }

    /// Create new time reference from seconds since the UNIX epoch
    pub fn from_epoch_secs(secs: i64, instant: Instant) -> Option<Self> {
        let time = DateTime::from_timestamp(secs, 0)?.naive_utc();
        Some(Self { time, instant })
    }
}

pub struct TimeManager {
    reference: TimeReference,
    /// Offset of local time to UTC in seconds
    utc_offset_secs: i32,
}

impl TimeManager {
    /// Initialize time measurement on boot
    pub fn init(utc_offset_secs: i32) -> Self {
        Self {
            reference: TimeReference::default(),
            utc_offset_secs,
        }
    }

    /// Get current UTC time
    pub fn get_time(&self, now: Instant) -> NaiveDateTime {
        let elapsed = now
            .checked_duration_since(self.reference.instant)
            .map(|d| d.as_micros() as i64)
            .unwrap_or(0);
        self.reference
            .time
            .checked_add_signed(chrono::Duration::microseconds(elapsed))
            .unwrap_or(self.reference.time)
    }

    /// Get current local time
    pub fn get_local_time(&self, now: Instant) -> NaiveDateTime {
        let utc = self.get_time(now);
        utc.checked_add_signed(chrono::Duration::seconds(self.utc_offset_secs.into()))
            .unwrap_or(utc)
    }

    /// Update time reference
    pub fn set_time(&mut self, reference: TimeReference) {
        self.reference = reference;
    }
}

/// Turns a stream of clock readings into minute boundary notifications
#[derive(Default)]
pub struct MinuteTicker {
    last: Option<(u8, u8)>,
}

impl MinuteTicker {
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Returns the new display time when `local` is in a different minute than
    /// the previous reading. The first reading always counts as a boundary.
    pub fn poll(&mut self, local: &NaiveDateTime) -> Option<DisplayTime> {
        let time = DisplayTime::from_datetime(local);
        let key = (time.hour, time.minute);
        if self.last == Some(key) {
            return None;
        }
        self.last = Some(key);
        Some(time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use embassy_time::Duration;

    fn datetime(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn display_time_takes_calendar_fields() {
        // 2024-03-03 was a Sunday
        let time = DisplayTime::from_datetime(&datetime(2024, 3, 3, 21, 7, 0));
        assert_eq!(
            time,
            DisplayTime {
                hour: 21,
                minute: 7,
                weekday: 0,
                month_day: 3,
                month: 3,
            }
        );
    }

    #[test]
    fn saturday_is_weekday_six() {
        let time = DisplayTime::from_datetime(&datetime(2024, 3, 9, 0, 0, 0));
        assert_eq!(time.weekday, 6);
    }

    #[test]
    fn time_manager_adds_uptime_and_offset() {
        let start = Instant::from_secs(10);
        let mut manager = TimeManager::init(3_600);
        manager.set_time(TimeReference::from_datetime(
            datetime(2024, 1, 31, 23, 59, 0),
            start,
        ));

        let now = start + Duration::from_secs(90);
        assert_eq!(manager.get_time(now), datetime(2024, 2, 1, 0, 0, 30));
        assert_eq!(manager.get_local_time(now), datetime(2024, 2, 1, 1, 0, 30));
    }

    #[test]
    fn time_manager_ignores_instants_before_reference() {
        let mut manager = TimeManager::init(0);
        manager.set_time(TimeReference::from_datetime(
            datetime(2024, 6, 1, 12, 0, 0),
            Instant::from_secs(100),
        ));
        assert_eq!(
            manager.get_time(Instant::from_secs(5)),
            datetime(2024, 6, 1, 12, 0, 0)
        );
    }

    #[test]
    fn reference_from_epoch_seconds() {
        let reference = TimeReference::from_epoch_secs(86_400, Instant::from_ticks(0)).unwrap();
        let mut manager = TimeManager::init(0);
        manager.set_time(reference);
        assert_eq!(
            manager.get_time(Instant::from_ticks(0)),
            datetime(1970, 1, 2, 0, 0, 0)
        );
    }

    #[test]
    fn minute_ticker_fires_once_per_minute() {
        let mut ticker = MinuteTicker::new();
        assert!(ticker.poll(&datetime(2024, 5, 5, 10, 14, 58)).is_some());
        assert!(ticker.poll(&datetime(2024, 5, 5, 10, 14, 59)).is_none());

        let tick = ticker.poll(&datetime(2024, 5, 5, 10, 15, 0)).unwrap();
        assert_eq!((tick.hour, tick.minute), (10, 15));
        assert!(ticker.poll(&datetime(2024, 5, 5, 10, 15, 1)).is_none());
    }
}
