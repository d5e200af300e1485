#![no_std]
#![no_main]

mod flag;
mod peripherals;

// Panic handler and debugging
use defmt::unwrap;

use defmt_rtt as _;
use panic_probe as _;

// Device
use embassy_executor::Spawner;
use embassy_futures::select::{select, Either};
use embassy_nrf::{
    bind_interrupts,
    gpio::{Input, Level, Output, OutputDrive, Pin, Pull},
    peripherals::{SPI2, TWISPI1},
    spim,
    twim::{self, Twim},
};
use embassy_sync::{blocking_mutex::raw::ThreadModeRawMutex, channel::Channel};
use embassy_time::{Duration, Instant, Ticker, Timer};
use static_cell::StaticCell;

bind_interrupts!(struct Irqs {
    SPIM1_SPIS1_TWIM1_TWIS1_SPI1_TWI1 => twim::InterruptHandler<TWISPI1>;
    SPIM2_SPIS2_SPI2 => spim::InterruptHandler<SPI2>;
});

// Crate
use flag::{FlagDecoder, FLAG_HEIGHT, FLAG_WIDTH};
use flag_watchface::{
    app::EventLoop,
    config::{FaceConfig, TIMEZONE},
    system::{
        config::SystemConfig,
        event::Event,
        time::{DisplayTime, MinuteTicker, TimeManager, TimeReference},
    },
    ui::FlagWatchface,
};
use peripherals::{backlight::Backlight, button::Button, display::Display, touch::TouchController};

// Include current UTC epoch at compile time
include!(concat!(env!("OUT_DIR"), "/utc.rs"));

type Face = EventLoop<FlagDecoder, FLAG_WIDTH, FLAG_HEIGHT>;

// Communication channels
static EVENTS: Channel<ThreadModeRawMutex, Event, 8> = Channel::new();

static FACE: StaticCell<Face> = StaticCell::new();
static BACKLIGHT: StaticCell<Backlight> = StaticCell::new();

/// Polls the button state every 10ms
#[embassy_executor::task(pool_size = 1)]
async fn poll_button(mut button: Button) {
    loop {
        if let Some(id) = button.poll().await {
            defmt::debug!("Button {} pressed", id);
            EVENTS.send(Event::Button(id)).await;
        }

        // Re-schedule the timer interrupt in 10ms
        Timer::after(Duration::from_millis(10)).await;
    }
}

/// Polls the touch controller every 2ms
#[embassy_executor::task(pool_size = 1)]
async fn poll_touch(mut touch: TouchController) {
    loop {
        if let Some(tap) = touch.try_tap() {
            EVENTS.send(Event::Tap(tap)).await;
        }

        // Re-schedule the timer interrupt in 2ms
        Timer::after(Duration::from_millis(2)).await;
    }
}

/// Check the clock every second and report minute changes
#[embassy_executor::task(pool_size = 1)]
async fn update_time(time: TimeManager, mut minutes: MinuteTicker) {
    let mut tick = Ticker::every(Duration::from_secs(1));
    loop {
        let local = time.get_local_time(Instant::now());
        if let Some(display_time) = minutes.poll(&local) {
            defmt::info!("Time updated: {}", display_time);
            EVENTS.send(Event::MinuteTick(display_time)).await;
        }

        // Re-schedule the timer interrupt
        tick.next().await;
    }
}

/// Run the face: wait for the next event or timer, handle it and redraw
#[embassy_executor::task(pool_size = 1)]
async fn run_face(face: &'static mut Face, mut display: Display) {
    loop {
        if face.render(display.lcd()).is_err() {
            defmt::warn!("Drawing the face failed");
        }

        let woke = match face.next_deadline() {
            Some(deadline) => select(EVENTS.receive(), Timer::at(deadline)).await,
            None => Either::First(EVENTS.receive().await),
        };

        let now = Instant::now();
        let result = match woke {
            Either::First(event) => face.dispatch(event, now),
            Either::Second(()) => face.run_due(now).map(|_| ()),
        };
        if let Err(error) = result {
            defmt::error!("Face: {}", error);
        }
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(SystemConfig::new());
    defmt::info!("Initializing");

    // Initialize Backlight
    let backlight = BACKLIGHT.init(Backlight::init(
        Output::new(p.P0_14.degrade(), Level::High, OutputDrive::Standard),
        Output::new(p.P0_22.degrade(), Level::High, OutputDrive::Standard),
        Output::new(p.P0_23.degrade(), Level::High, OutputDrive::Standard),
    ));

    // Initialize Button
    let button = Button::init(
        Input::new(p.P0_13, Pull::None),
        Output::new(p.P0_15, Level::Low, OutputDrive::Standard),
    );

    // Initialize I2C
    let mut i2c_config = twim::Config::default();
    // Use I2C at 400KHz (the fastest clock available on the nRF52832),
    i2c_config.frequency = twim::Frequency::K400;

    let i2c = Twim::new(p.TWISPI1, Irqs, p.P0_06, p.P0_07, i2c_config);

    // Initialize SPI
    let mut spim_config = spim::Config::default();
    // Use SPI at 8MHz (the fastest clock available on the nRF52832),
    // otherwise refreshing will be super slow.
    spim_config.frequency = spim::Frequency::M8;
    // SPI must be used in mode 3. Mode 0 (the default) won't work.
    spim_config.mode = spim::MODE_3;

    let spim = spim::Spim::new(p.SPI2, Irqs, p.P0_02, p.P0_04, p.P0_03, spim_config);

    // Initialize LCD
    let display = unwrap!(Display::init(
        spim,
        Output::new(p.P0_25.degrade(), Level::Low, OutputDrive::Standard),
        Output::new(p.P0_18.degrade(), Level::Low, OutputDrive::Standard),
        Output::new(p.P0_26.degrade(), Level::Low, OutputDrive::Standard),
    ));
    unwrap!(backlight.set(2));

    // Initialize touch controller
    let touch = unwrap!(TouchController::init(
        i2c,
        // Touchpad external interrupt pin: P0.28/AIN4 (TP_INT)
        Input::new(p.P0_28, Pull::Up),
        // Touchpad reset pin: P0.10/NFC2 (TP_RESET)
        Output::new(p.P0_10, Level::High, OutputDrive::Standard),
    ));

    // Clock starts from the build time
    let mut time = TimeManager::init(TIMEZONE);
    time.set_time(unwrap!(TimeReference::from_epoch_secs(UTC_EPOCH, Instant::now())));
    let mut minutes = MinuteTicker::new();
    let local = time.get_local_time(Instant::now());
    let first = minutes
        .poll(&local)
        .unwrap_or_else(|| DisplayTime::from_datetime(&local));

    // Load the watch face
    let config = FaceConfig::default();
    let decoder = unwrap!(FlagDecoder::new());
    let watchface = unwrap!(FlagWatchface::new(config, decoder));
    let face = FACE.init(EventLoop::new(watchface, display.size(), Instant::now()));
    unwrap!(face.load(first, Instant::now()));

    defmt::info!("Initialization finished");

    // Schedule tasks
    unwrap!(spawner.spawn(poll_button(button)));
    unwrap!(spawner.spawn(poll_touch(touch)));
    unwrap!(spawner.spawn(update_time(time, minutes)));
    unwrap!(spawner.spawn(run_face(face, display)));
}
