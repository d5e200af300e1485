//! Watch face configuration

use embassy_time::Duration;

/// Local time zone offset, CET
pub const TIMEZONE: i32 = 1 * 3_600;

/// Clock display style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockStyle {
    TwelveHour,
    TwentyFourHour,
}

/// Tunables of the flag watch face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceConfig {
    /// How long the flag keeps waving after each enable
    pub auto_disable_after: Duration,
    /// Delay before the first frame after an enable
    pub first_frame_delay: Duration,
    /// The animation restarts on every minute divisible by this
    pub enable_every_minutes: u8,
    /// 12 or 24 hour time
    pub clock_style: ClockStyle,
    /// Offset of local time to UTC in seconds
    pub utc_offset_secs: i32,
}

impl Default for FaceConfig {
    fn default() -> Self {
        Self {
            auto_disable_after: Duration::from_millis(5_000),
            first_frame_delay: Duration::from_millis(1),
            enable_every_minutes: 15,
            clock_style: ClockStyle::TwentyFourHour,
            utc_offset_secs: TIMEZONE,
        }
    }
}

impl FaceConfig {
    /// Use the given clock style
    pub fn with_clock_style(mut self, clock_style: ClockStyle) -> Self {
        self.clock_style = clock_style;
        self
    }

    /// Use the given UTC offset in seconds
    pub fn with_utc_offset(mut self, utc_offset_secs: i32) -> Self {
        self.utc_offset_secs = utc_offset_secs;
        self
    }

    /// Whether a minute tick at `minute` is a scheduled animation slot
    pub fn is_enable_minute(&self, minute: u8) -> bool {
        self.enable_every_minutes != 0 && minute % self.enable_every_minutes == 0
    }
}
