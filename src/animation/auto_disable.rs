//! Stops the flag a fixed time after it was started

use embassy_time::Duration;

use super::sequencer::{FrameDecoder, Sequencer};
use crate::{
    system::{event::TimerEvent, timer_queue::Scheduler},
    Error,
};

/// One-shot deadline armed on every enable.
///
/// Re-arming does not withdraw an earlier deadline. Several disable timers
/// may be queued at once; each just clears the enabled flag, so whichever
/// fires last leaves the same state.
pub struct AutoDisable {
    window: Duration,
}

impl AutoDisable {
    pub fn new(window: Duration) -> Self {
        Self { window }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Queue the disable timer
    pub fn arm<S: Scheduler>(&self, scheduler: &mut S) -> Result<(), Error> {
        scheduler.schedule(self.window, TimerEvent::DisableAnimation)
    }

    /// The disable timer fired
    pub fn expire<D, const W: usize, const H: usize>(&self, sequencer: &mut Sequencer<D, W, H>)
    where
        D: FrameDecoder,
    {
        if sequencer.is_enabled() {
            debug!("Animation window elapsed");
        }
        sequencer.disable();
    }
}
