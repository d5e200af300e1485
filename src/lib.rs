//! Flag watch face
//!
//! A clock face (time, weekday, date) over a waving flag. The flag plays for
//! a few seconds after the watch face loads, on every quarter hour and on a
//! tap; the up button cycles the date fields to check the layout.
//!
//! Everything here is hardware independent. The `board` feature adds the
//! PineTime firmware binary that feeds real clock, touch and button events
//! into an [`app::EventLoop`] and draws it onto the LCD.

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod animation;
pub mod app;
pub mod config;
mod error;
pub mod system;
pub mod ui;

pub use error::Error;
