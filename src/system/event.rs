//! Events delivered to the watch face by the event loop

use super::time::DisplayTime;

/// Accelerometer or touch axis a tap was detected on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    X,
    Y,
    Z,
}

/// A tap gesture. Only its occurrence matters to the face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TapEvent {
    pub axis: Axis,
    pub direction: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonId {
    Back,
    Up,
    Select,
    Down,
}

/// Generation of an animation run, used to tell stale frame timers apart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Epoch(pub u32);

impl Epoch {
    pub fn next(self) -> Self {
        Epoch(self.0.wrapping_add(1))
    }
}

/// One-shot timer payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerEvent {
    /// Show the next animation frame
    AdvanceFrame(Epoch),
    /// Stop the animation
    DisableAnimation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// A new minute started
    MinuteTick(DisplayTime),
    Tap(TapEvent),
    Button(ButtonId),
    Timer(TimerEvent),
}
