#[cfg(feature = "board")]
pub mod config;
pub mod event;
pub mod time;
pub mod timer_queue;
