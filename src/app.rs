//! Event loop driving the watch face
//!
//! Owns the face, its timer queue and the screen. Every handler runs to
//! completion before the next event or timer is looked at.

use embassy_time::Instant;
use embedded_graphics::{pixelcolor::Rgb565, prelude::*};

use crate::{
    animation::FrameDecoder,
    system::{event::Event, time::DisplayTime, timer_queue::TimerQueue},
    ui::{FlagWatchface, Screen},
    Error,
};

/// Pending one-shot timers the face can have at once
pub const QUEUE_DEPTH: usize = 8;

pub struct EventLoop<D, const W: usize, const H: usize> {
    face: FlagWatchface<D, W, H>,
    timers: TimerQueue<QUEUE_DEPTH>,
    screen: Screen,
}

impl<D, const W: usize, const H: usize> EventLoop<D, W, H>
where
    D: FrameDecoder,
{
    pub fn new(face: FlagWatchface<D, W, H>, screen_size: Size, now: Instant) -> Self {
        Self {
            face,
            timers: TimerQueue::new(now),
            screen: Screen::new(screen_size),
        }
    }

    pub fn face(&self) -> &FlagWatchface<D, W, H> {
        &self.face
    }

    pub fn timers(&self) -> &TimerQueue<QUEUE_DEPTH> {
        &self.timers
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Show the face with the current time
    pub fn load(&mut self, time: DisplayTime, now: Instant) -> Result<(), Error> {
        self.timers.set_now(now);
        self.face.load(time, &mut self.timers, &mut self.screen)
    }

    /// Handle an input or clock event that happened at `now`
    pub fn dispatch(&mut self, event: Event, now: Instant) -> Result<(), Error> {
        self.run_due(now)?;
        self.face.handle_event(event, &mut self.timers, &mut self.screen)
    }

    /// Fire every timer due at `now`. Returns how many fired.
    pub fn run_due(&mut self, now: Instant) -> Result<usize, Error> {
        let mut fired = 0;
        while let Some(timer) = self.timers.pop_due(now) {
            trace!("Timer {}", timer);
            self.face.handle_event(Event::Timer(timer), &mut self.timers, &mut self.screen)?;
            fired += 1;
        }
        self.timers.set_now(now);
        Ok(fired)
    }

    /// When the next timer is due
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Draw the layers changed since the last render
    pub fn render<T>(&mut self, target: &mut T) -> Result<bool, T::Error>
    where
        T: DrawTarget<Color = Rgb565>,
    {
        self.screen.render(target, self.face.text(), self.face.frame())
    }
}
