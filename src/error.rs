//! Error type shared by the watch face modules

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The bundled animation could not be decoded.
    Decoder,
    /// Decoded frames do not fit the pixel buffer.
    FrameTooLarge { width: u32, height: u32 },
    /// Every one-shot timer slot is in use.
    TimerQueueFull,
    /// A text buffer was too small for the formatted value.
    Format,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Decoder => f.write_str("animation resource could not be decoded"),
            Error::FrameTooLarge { width, height } => {
                write!(f, "frame of {}x{} does not fit the frame buffer", width, height)
            }
            Error::TimerQueueFull => f.write_str("timer queue is full"),
            Error::Format => f.write_str("text buffer overflow"),
        }
    }
}

impl From<fmt::Error> for Error {
    fn from(_: fmt::Error) -> Self {
        Error::Format
    }
}
