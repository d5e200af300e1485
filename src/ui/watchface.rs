//! Flag watchface

use super::{formatter::TimeFormatter, Layer, Surface, TextField};
use crate::{
    animation::{Animation, FrameBuffer, FrameDecoder},
    config::FaceConfig,
    system::{
        event::{ButtonId, Event, TapEvent},
        time::DisplayTime,
        timer_queue::Scheduler,
    },
    Error,
};

/// Date fields cycled by the up button for checking the text layout.
///
/// The counters wrap at 7, 13 and 32, so month 0 and day 0 are reachable
/// even though they are not calendar values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DebugDate {
    pub weekday: u8,
    pub month: u8,
    pub month_day: u8,
}

impl DebugDate {
    pub fn cycle(&mut self) {
        self.weekday = (self.weekday + 1) % 7;
        self.month = (self.month + 1) % 13;
        self.month_day = (self.month_day + 1) % 32;
    }
}

/// Clock face over an animated flag
pub struct FlagWatchface<D, const W: usize, const H: usize> {
    config: FaceConfig,
    animation: Animation<D, W, H>,
    text: TimeFormatter,
    time: Option<DisplayTime>,
    debug_date: DebugDate,
}

impl<D, const W: usize, const H: usize> FlagWatchface<D, W, H>
where
    D: FrameDecoder,
{
    /// Create the face around the flag decoder
    pub fn new(config: FaceConfig, decoder: D) -> Result<Self, Error> {
        Ok(Self {
            animation: Animation::new(decoder, &config)?,
            config,
            text: TimeFormatter::new(),
            time: None,
            debug_date: DebugDate::default(),
        })
    }

    pub fn config(&self) -> &FaceConfig {
        &self.config
    }

    pub fn text(&self) -> &TimeFormatter {
        &self.text
    }

    pub fn frame(&self) -> &FrameBuffer<W, H> {
        self.animation.frame()
    }

    pub fn animation(&self) -> &Animation<D, W, H> {
        &self.animation
    }

    /// Last time shown, `None` before the face was loaded
    pub fn time(&self) -> Option<DisplayTime> {
        self.time
    }

    pub fn debug_date(&self) -> DebugDate {
        self.debug_date
    }

    /// Show the face for the first time: start the flag and display `time`
    pub fn load<S, U>(
        &mut self,
        time: DisplayTime,
        scheduler: &mut S,
        surface: &mut U,
    ) -> Result<(), Error>
    where
        S: Scheduler,
        U: Surface,
    {
        info!("Loading flag watchface");
        surface.mark_dirty(Layer::Canvas);
        self.animation.start(scheduler)?;
        self.update_time(time, scheduler, surface)
    }

    pub fn handle_event<S, U>(
        &mut self,
        event: Event,
        scheduler: &mut S,
        surface: &mut U,
    ) -> Result<(), Error>
    where
        S: Scheduler,
        U: Surface,
    {
        match event {
            Event::MinuteTick(time) => self.update_time(time, scheduler, surface),
            Event::Tap(tap) => self.on_tap(tap, scheduler),
            Event::Button(button) => self.on_button(button, surface),
            Event::Timer(timer) => self.animation.on_timer(timer, scheduler, surface),
        }
    }

    /// Refresh all text from `time`; restarts the flag on the quarter hour
    pub fn update_time<S, U>(
        &mut self,
        time: DisplayTime,
        scheduler: &mut S,
        surface: &mut U,
    ) -> Result<(), Error>
    where
        S: Scheduler,
        U: Surface,
    {
        self.time = Some(time);

        self.text
            .update_time(time.hour, time.minute, self.config.clock_style)?;
        surface.mark_dirty(Layer::Text(TextField::Time));

        if self.config.is_enable_minute(time.minute) && self.animation.trigger(scheduler)? {
            debug!("Quarter hour, waving the flag");
        }

        self.show_date(time.weekday, time.month, time.month_day, surface)
    }

    fn on_tap<S: Scheduler>(&mut self, tap: TapEvent, scheduler: &mut S) -> Result<(), Error> {
        if self.animation.trigger(scheduler)? {
            debug!("Tap on axis {}, waving the flag", tap.axis);
        }
        Ok(())
    }

    fn on_button<U: Surface>(&mut self, button: ButtonId, surface: &mut U) -> Result<(), Error> {
        if button != ButtonId::Up {
            return Ok(());
        }
        self.debug_date.cycle();
        trace!(
            "Debug date {} {} {}",
            self.debug_date.weekday,
            self.debug_date.month,
            self.debug_date.month_day
        );
        let DebugDate {
            weekday,
            month,
            month_day,
        } = self.debug_date;
        self.show_date(weekday, month, month_day, surface)
    }

    fn show_date<U: Surface>(
        &mut self,
        weekday: u8,
        month: u8,
        month_day: u8,
        surface: &mut U,
    ) -> Result<(), Error> {
        if self.text.update_day(weekday)? {
            surface.mark_dirty(Layer::Text(TextField::Day));
        }
        self.text.update_month_day(month_day)?;
        surface.mark_dirty(Layer::Text(TextField::MonthDay));
        if self.text.update_month(month)? {
            surface.mark_dirty(Layer::Text(TextField::Month));
        }
        Ok(())
    }
}
