//! Fixed width text for the face

use core::fmt;

use crate::{config::ClockStyle, Error};

const BUF_LEN: usize = 9;

const WEEKDAYS: [&str; 7] = ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"];

const MONTHS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

/// Small text buffer overwritten in place
#[derive(Clone, Copy)]
pub struct TextBuffer {
    bytes: [u8; BUF_LEN],
    len: usize,
}

impl TextBuffer {
    pub const fn new() -> Self {
        Self {
            bytes: [0; BUF_LEN],
            len: 0,
        }
    }

    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.bytes[..self.len]).unwrap_or_default()
    }

    /// Replace the contents. On overflow the previous text is kept.
    pub fn set_fmt(&mut self, args: fmt::Arguments) -> Result<(), Error> {
        let mut scratch = [0u8; BUF_LEN];
        let len = format_no_std::show(&mut scratch, args)?.len();
        self.bytes = scratch;
        self.len = len;
        Ok(())
    }

    pub fn set(&mut self, text: &str) -> Result<(), Error> {
        self.set_fmt(format_args!("{}", text))
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

/// Hour as shown for the given clock style
pub fn display_hour(hour: u8, style: ClockStyle) -> u8 {
    match style {
        ClockStyle::TwentyFourHour => hour,
        ClockStyle::TwelveHour if hour == 0 => 12,
        ClockStyle::TwelveHour if hour > 12 => hour - 12,
        ClockStyle::TwelveHour => hour,
    }
}

/// Three letter weekday, Sunday is 0
pub fn weekday_abbrev(weekday: u8) -> Option<&'static str> {
    WEEKDAYS.get(usize::from(weekday)).copied()
}

/// Three letter month, January is 1
pub fn month_abbrev(month: u8) -> Option<&'static str> {
    usize::from(month)
        .checked_sub(1)
        .and_then(|index| MONTHS.get(index))
        .copied()
}

/// Owns the four text buffers shown on the face
#[derive(Debug, Default)]
pub struct TimeFormatter {
    time: TextBuffer,
    day: TextBuffer,
    month_day: TextBuffer,
    month: TextBuffer,
}

impl TimeFormatter {
    pub const fn new() -> Self {
        Self {
            time: TextBuffer::new(),
            day: TextBuffer::new(),
            month_day: TextBuffer::new(),
            month: TextBuffer::new(),
        }
    }

    /// "HH:MM" without leading zero suppression
    pub fn update_time(&mut self, hour: u8, minute: u8, style: ClockStyle) -> Result<(), Error> {
        let hour = display_hour(hour, style);
        self.time.set_fmt(format_args!(
            "{}{}:{}{}",
            hour / 10,
            hour % 10,
            minute / 10,
            minute % 10
        ))
    }

    /// Returns `false` and keeps the old text for indices outside 0-6
    pub fn update_day(&mut self, weekday: u8) -> Result<bool, Error> {
        match weekday_abbrev(weekday) {
            Some(name) => self.day.set(name).map(|_| true),
            None => Ok(false),
        }
    }

    /// Returns `false` and keeps the old text for indices outside 1-12
    pub fn update_month(&mut self, month: u8) -> Result<bool, Error> {
        match month_abbrev(month) {
            Some(name) => self.month.set(name).map(|_| true),
            None => Ok(false),
        }
    }

    /// Tens then units digit, always at least two digits
    pub fn update_month_day(&mut self, month_day: u8) -> Result<(), Error> {
        self.month_day
            .set_fmt(format_args!("{}{}", month_day / 10, month_day % 10))
    }

    pub fn time(&self) -> &str {
        self.time.as_str()
    }

    pub fn day(&self) -> &str {
        self.day.as_str()
    }

    pub fn month_day(&self) -> &str {
        self.month_day.as_str()
    }

    pub fn month(&self) -> &str {
        self.month.as_str()
    }
}
