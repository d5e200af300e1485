//! Touch controller module for PineTime

use cst816s::{TouchGesture, CST816S};
use embassy_nrf::{
    gpio::{Input, Output},
    peripherals::{P0_10, P0_28, TWISPI1},
    twim::Twim,
};
use embassy_time::Delay;
use flag_watchface::system::event::{Axis, TapEvent};

pub struct TouchController {
    touchpad: CST816S<Twim<'static, TWISPI1>, Input<'static, P0_28>, Output<'static, P0_10>>,
}

impl TouchController {
    /// Reset and configure the touch controller
    pub fn init(
        twim: Twim<'static, TWISPI1>,
        interrupt_pin: Input<'static, P0_28>,
        reset_pin: Output<'static, P0_10>,
    ) -> Result<Self, Error> {
        let mut touchpad = CST816S::new(twim, interrupt_pin, reset_pin);
        touchpad.setup(&mut Delay).map_err(|_| Error::Setup)?;
        Ok(Self { touchpad })
    }

    /// Check for a tap on the screen
    pub fn try_tap(&mut self) -> Option<TapEvent> {
        let event = self.touchpad.read_one_touch_event(true)?;
        match event.gesture {
            // The panel reports taps as clicks on the Z axis, towards the glass
            TouchGesture::SingleClick => Some(TapEvent {
                axis: Axis::Z,
                direction: 1,
            }),
            _ => None,
        }
    }
}

#[derive(Debug, defmt::Format)]
pub enum Error {
    Setup,
}
