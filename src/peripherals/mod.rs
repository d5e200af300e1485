pub(super) mod backlight;
pub(super) mod button;
pub(super) mod display;
pub(super) mod touch;
