//! Frame-advance loop of the animated flag

use embassy_time::Duration;
use embedded_graphics::geometry::Size;

use super::frame_buffer::FrameBuffer;
use crate::{
    system::{
        event::{Epoch, TimerEvent},
        timer_queue::Scheduler,
    },
    ui::{Layer, Surface},
    Error,
};

/// Source of animation frames
pub trait FrameDecoder {
    /// Size of every frame in the sequence
    fn frame_size(&self) -> Size;

    /// Write the next frame into `frame` and return how long it should be
    /// shown. `None` once the sequence is exhausted.
    fn next_frame<const W: usize, const H: usize>(
        &mut self,
        frame: &mut FrameBuffer<W, H>,
    ) -> Option<Duration>;

    /// Rewind to the first frame
    fn restart(&mut self);
}

/// Outcome of a single [`Sequencer::advance`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameStep {
    /// Animation disabled or timer left over from an earlier run
    Skipped,
    /// A frame was shown, the next one follows after the delay
    Shown(Duration),
    /// End of sequence, rewound and stalled
    Restarted,
}

pub struct Sequencer<D, const W: usize, const H: usize> {
    enabled: bool,
    epoch: Epoch,
    decoder: D,
    frame: FrameBuffer<W, H>,
    first_frame_delay: Duration,
}

impl<D, const W: usize, const H: usize> Sequencer<D, W, H>
where
    D: FrameDecoder,
{
    /// Take ownership of `decoder` and allocate a matching frame buffer.
    /// The sequencer starts disabled.
    pub fn new(decoder: D, first_frame_delay: Duration) -> Result<Self, Error> {
        let size = decoder.frame_size();
        let frame = FrameBuffer::new(size)?;
        debug!("Frame buffer {}x{}", size.width, size.height);

        Ok(Self {
            enabled: false,
            epoch: Epoch::default(),
            decoder,
            frame,
            first_frame_delay,
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Tag carried by the frame timers of the current run
    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub fn frame(&self) -> &FrameBuffer<W, H> {
        &self.frame
    }

    pub fn decoder(&self) -> &D {
        &self.decoder
    }

    /// Start a new run and queue its first frame
    pub fn enable<S: Scheduler>(&mut self, scheduler: &mut S) -> Result<(), Error> {
        self.enabled = true;
        self.epoch = self.epoch.next();
        scheduler.schedule(self.first_frame_delay, TimerEvent::AdvanceFrame(self.epoch))
    }

    /// Stop the current run. Queued frame timers still fire and are ignored.
    pub fn disable(&mut self) {
        self.enabled = false;
    }

    /// Handle a frame timer tagged with `epoch`
    pub fn advance<S, U>(
        &mut self,
        epoch: Epoch,
        scheduler: &mut S,
        surface: &mut U,
    ) -> Result<FrameStep, Error>
    where
        S: Scheduler,
        U: Surface,
    {
        if !self.enabled || epoch != self.epoch {
            trace!("Ignoring stale frame timer");
            return Ok(FrameStep::Skipped);
        }

        match self.decoder.next_frame(&mut self.frame) {
            Some(delay) => {
                surface.mark_dirty(Layer::FlagTopLeft);
                surface.mark_dirty(Layer::FlagBottomRight);
                scheduler.schedule(delay, TimerEvent::AdvanceFrame(epoch))?;
                Ok(FrameStep::Shown(delay))
            }
            None => {
                // Start again, but only on the next enable
                self.decoder.restart();
                debug!("Animation sequence finished");
                Ok(FrameStep::Restarted)
            }
        }
    }
}
