//! UI definitions module

pub mod formatter;
pub mod layout;
pub mod watchface;

pub use formatter::TimeFormatter;
pub use layout::{FaceLayout, Screen};
pub use watchface::{DebugDate, FlagWatchface};

/// Text fields on the face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TextField {
    Time,
    Day,
    MonthDay,
    Month,
}

/// Independently redrawn parts of the face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Layer {
    /// Background stripes
    Canvas,
    /// Flag aligned to the top left corner
    FlagTopLeft,
    /// Flag aligned to the bottom right corner
    FlagBottomRight,
    Text(TextField),
}

/// Something that can be asked to redraw a layer
pub trait Surface {
    fn mark_dirty(&mut self, layer: Layer);
}
