//! LCD backlight
//!
//! Pin assignment and resistor values from https://wiki.pine64.org/wiki/PineTime.

use embassy_nrf::gpio::{AnyPin, Output};

/// Highest brightness level
pub const MAX_LEVEL: u8 = 7;

/// Three active-low FET switches (2.2 kΩ, 100 Ω and 30 Ω) whose on/off
/// pattern selects one of eight levels, 0 being off.
pub struct Backlight {
    switches: [Output<'static, AnyPin>; 3],
}

impl Backlight {
    /// Take the low, mid and high switch pins, starting with the light off
    pub fn init(
        low: Output<'static, AnyPin>,
        mid: Output<'static, AnyPin>,
        high: Output<'static, AnyPin>,
    ) -> Self {
        let mut backlight = Self {
            switches: [low, mid, high],
        };
        backlight.apply(0);
        backlight
    }

    pub fn set(&mut self, level: u8) -> Result<(), Error> {
        if level > MAX_LEVEL {
            return Err(Error::OutOfBounds);
        }
        defmt::debug!("Backlight level {}", level);
        self.apply(level);
        Ok(())
    }

    fn apply(&mut self, level: u8) {
        for (bit, switch) in self.switches.iter_mut().enumerate() {
            if level & (1 << bit) != 0 {
                switch.set_low();
            } else {
                switch.set_high();
            }
        }
    }
}

#[derive(Debug, defmt::Format)]
pub enum Error {
    OutOfBounds,
}
