//! nRF52832 configuration for the watch face firmware

use embassy_nrf::{
    config::{Config, Debug, HfclkSource, LfclkSource},
    interrupt::Priority,
};

pub struct SystemConfig {}

impl SystemConfig {
    /// Create the embassy-nrf configuration used at boot
    pub fn new() -> Config {
        // Config is `non_exhaustive`, start from the default
        let mut config = Config::default();

        // The RTC driven time base needs the 32.768 kHz crystal for frame timing
        config.hfclk_source = HfclkSource::ExternalXtal;
        config.lfclk_source = LfclkSource::ExternalXtal;

        // DC/DC regulator for lower runtime current
        config.dcdc.reg1 = true;

        // Frame deadlines come from the RTC time driver, the button and touch
        // lines from GPIOTE. Both only wake the thread mode executor running
        // the face, and at one priority neither ISR preempts the other, so a
        // frame deadline and an input are picked up in arrival order.
        // P0 and P1 stay free for interrupts that cannot wait on the face.
        config.gpiote_interrupt_priority = Priority::P2;
        config.time_interrupt_priority = Priority::P2;

        config.debug = Debug::Allowed;

        config
    }
}
