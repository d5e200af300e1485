//! Animated flag
//!
//! A [`Sequencer`] drives itself with chained one-shot frame timers, each
//! delay taken from the decoder, so frames keep their encoded timing. An
//! [`AutoDisable`] deadline stops it again after every start.

pub mod auto_disable;
pub mod frame_buffer;
pub mod sequencer;

pub use auto_disable::AutoDisable;
pub use frame_buffer::FrameBuffer;
pub use sequencer::{FrameDecoder, FrameStep, Sequencer};

use crate::{
    config::FaceConfig,
    system::{event::TimerEvent, timer_queue::Scheduler},
    ui::Surface,
    Error,
};

/// Sequencer plus its auto-disable deadline
pub struct Animation<D, const W: usize, const H: usize> {
    sequencer: Sequencer<D, W, H>,
    auto_disable: AutoDisable,
}

impl<D, const W: usize, const H: usize> Animation<D, W, H>
where
    D: FrameDecoder,
{
    pub fn new(decoder: D, config: &FaceConfig) -> Result<Self, Error> {
        Ok(Self {
            sequencer: Sequencer::new(decoder, config.first_frame_delay)?,
            auto_disable: AutoDisable::new(config.auto_disable_after),
        })
    }

    pub fn sequencer(&self) -> &Sequencer<D, W, H> {
        &self.sequencer
    }

    pub fn is_enabled(&self) -> bool {
        self.sequencer.is_enabled()
    }

    pub fn frame(&self) -> &FrameBuffer<W, H> {
        self.sequencer.frame()
    }

    /// Enable unconditionally and arm the auto-disable
    pub fn start<S: Scheduler>(&mut self, scheduler: &mut S) -> Result<(), Error> {
        self.sequencer.enable(scheduler)?;
        self.auto_disable.arm(scheduler)
    }

    /// Start the animation unless it is already running.
    /// Returns whether it was started.
    pub fn trigger<S: Scheduler>(&mut self, scheduler: &mut S) -> Result<bool, Error> {
        if self.sequencer.is_enabled() {
            return Ok(false);
        }
        self.start(scheduler)?;
        Ok(true)
    }

    /// Handle one of the animation's timers
    pub fn on_timer<S, U>(
        &mut self,
        event: TimerEvent,
        scheduler: &mut S,
        surface: &mut U,
    ) -> Result<(), Error>
    where
        S: Scheduler,
        U: Surface,
    {
        match event {
            TimerEvent::AdvanceFrame(epoch) => {
                self.sequencer.advance(epoch, scheduler, surface)?;
            }
            TimerEvent::DisableAnimation => self.auto_disable.expire(&mut self.sequencer),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_time::{Duration, Instant};
    use embedded_graphics::{pixelcolor::Rgb565, prelude::*};

    use crate::system::{event::Epoch, timer_queue::TimerQueue};
    use crate::ui::Layer;

    /// Decoder playing `frames` frames of 10ms each
    struct Countdown {
        frames: u32,
        position: u32,
        restarts: u32,
    }

    impl Countdown {
        fn new(frames: u32) -> Self {
            Self {
                frames,
                position: 0,
                restarts: 0,
            }
        }
    }

    impl FrameDecoder for Countdown {
        fn frame_size(&self) -> Size {
            Size::new(2, 2)
        }

        fn next_frame<const W: usize, const H: usize>(
            &mut self,
            frame: &mut FrameBuffer<W, H>,
        ) -> Option<Duration> {
            if self.position == self.frames {
                return None;
            }
            self.position += 1;
            frame.clear(Rgb565::RED).ok()?;
            Some(Duration::from_millis(10))
        }

        fn restart(&mut self) {
            self.position = 0;
            self.restarts += 1;
        }
    }

    #[derive(Default)]
    struct Dirty(Vec<Layer>);

    impl Surface for Dirty {
        fn mark_dirty(&mut self, layer: Layer) {
            self.0.push(layer);
        }
    }

    fn queue() -> TimerQueue<8> {
        TimerQueue::new(Instant::from_ticks(0))
    }

    fn sequencer(frames: u32) -> Sequencer<Countdown, 2, 2> {
        Sequencer::new(Countdown::new(frames), Duration::from_millis(1)).unwrap()
    }

    #[test]
    fn enable_queues_first_frame_after_one_millisecond() {
        let mut timers = queue();
        let mut sequencer = sequencer(3);
        assert!(!sequencer.is_enabled());

        sequencer.enable(&mut timers).unwrap();

        assert!(sequencer.is_enabled());
        let pending: Vec<_> = timers.pending().collect();
        assert_eq!(
            pending,
            vec![(
                Instant::from_millis(1),
                TimerEvent::AdvanceFrame(sequencer.epoch())
            )]
        );
    }

    #[test]
    fn shown_frame_marks_both_flags_and_schedules_next() {
        let mut timers = queue();
        let mut surface = Dirty::default();
        let mut sequencer = sequencer(3);
        sequencer.enable(&mut timers).unwrap();
        let epoch = sequencer.epoch();
        timers.pop_due(Instant::from_millis(1));

        let step = sequencer.advance(epoch, &mut timers, &mut surface).unwrap();

        assert_eq!(step, FrameStep::Shown(Duration::from_millis(10)));
        assert_eq!(surface.0, vec![Layer::FlagTopLeft, Layer::FlagBottomRight]);
        assert_eq!(timers.next_deadline(), Some(Instant::from_millis(11)));
        assert_eq!(sequencer.frame().pixel(Point::new(1, 1)), Some(Rgb565::RED));
    }

    #[test]
    fn end_of_sequence_rewinds_without_rescheduling() {
        let mut timers = queue();
        let mut surface = Dirty::default();
        let mut sequencer = sequencer(2);
        sequencer.enable(&mut timers).unwrap();

        // Two frames, then the third advance hits the end of the sequence.
        let mut steps = Vec::new();
        let mut now = Instant::from_ticks(0);
        while let Some(deadline) = timers.next_deadline() {
            now = deadline;
            let TimerEvent::AdvanceFrame(epoch) = timers.pop_due(now).unwrap() else {
                panic!("only frame timers were queued");
            };
            steps.push(sequencer.advance(epoch, &mut timers, &mut surface).unwrap());
        }

        assert_eq!(
            steps,
            vec![
                FrameStep::Shown(Duration::from_millis(10)),
                FrameStep::Shown(Duration::from_millis(10)),
                FrameStep::Restarted,
            ]
        );
        assert_eq!(now, Instant::from_millis(21));
        assert_eq!(sequencer.decoder().position, 0);
        assert_eq!(sequencer.decoder().restarts, 1);
        assert!(timers.is_empty());
        // Stalled, but still enabled until the disable timer fires
        assert!(sequencer.is_enabled());
    }

    #[test]
    fn advance_while_disabled_is_a_no_op() {
        let mut timers = queue();
        let mut surface = Dirty::default();
        let mut sequencer = sequencer(3);
        sequencer.enable(&mut timers).unwrap();
        let epoch = sequencer.epoch();
        sequencer.disable();
        timers.pop_due(Instant::from_millis(1));

        let step = sequencer.advance(epoch, &mut timers, &mut surface).unwrap();

        assert_eq!(step, FrameStep::Skipped);
        assert!(surface.0.is_empty());
        assert!(timers.is_empty());
        assert_eq!(sequencer.decoder().position, 0);
    }

    #[test]
    fn frame_timer_from_an_earlier_run_is_ignored() {
        let mut timers = queue();
        let mut surface = Dirty::default();
        let mut sequencer = sequencer(3);
        sequencer.enable(&mut timers).unwrap();
        let stale = sequencer.epoch();
        sequencer.disable();
        sequencer.enable(&mut timers).unwrap();

        assert_ne!(stale, sequencer.epoch());
        assert_eq!(
            sequencer.advance(stale, &mut timers, &mut surface).unwrap(),
            FrameStep::Skipped
        );
    }

    #[test]
    fn oversized_frames_fail_creation() {
        let result = Sequencer::<_, 2, 1>::new(Countdown::new(1), Duration::from_millis(1));
        assert!(matches!(result, Err(Error::FrameTooLarge { .. })));
    }

    #[test]
    fn trigger_only_starts_a_disabled_animation() {
        let mut timers = queue();
        let config = FaceConfig::default();
        let mut animation = Animation::<_, 2, 2>::new(Countdown::new(3), &config).unwrap();

        assert!(animation.trigger(&mut timers).unwrap());
        assert_eq!(timers.len(), 2);
        assert!(!animation.trigger(&mut timers).unwrap());
        assert_eq!(timers.len(), 2);
    }

    #[test]
    fn disable_timer_stops_the_animation() {
        let mut timers = queue();
        let mut surface = Dirty::default();
        let config = FaceConfig::default();
        let mut animation = Animation::<_, 2, 2>::new(Countdown::new(3), &config).unwrap();
        animation.start(&mut timers).unwrap();

        animation
            .on_timer(TimerEvent::DisableAnimation, &mut timers, &mut surface)
            .unwrap();
        assert!(!animation.is_enabled());

        // A duplicate disable is harmless
        animation
            .on_timer(TimerEvent::DisableAnimation, &mut timers, &mut surface)
            .unwrap();
        assert!(!animation.is_enabled());
    }

    #[test]
    fn stale_epoch_zero_never_matches_a_run() {
        let mut timers = queue();
        let mut surface = Dirty::default();
        let mut sequencer = sequencer(3);
        sequencer.enable(&mut timers).unwrap();
        assert_eq!(
            sequencer.advance(Epoch(0), &mut timers, &mut surface).unwrap(),
            FrameStep::Skipped
        );
    }
}
