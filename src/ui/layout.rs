//! Layout and drawing of the flag face
//!
//! A black screen split into three bands by red, white and blue stripes. The
//! time sits in the middle band, weekday bottom left, month and day of month
//! top right, and the flag is drawn into the top left and bottom right
//! corners. Geometry scales with the screen size.

use embedded_graphics::{
    geometry::{Point, Size},
    mono_font::{MonoFont, MonoTextStyle},
    pixelcolor::{Rgb565, RgbColor},
    prelude::*,
    primitives::{Line, PrimitiveStyle},
    text::{Alignment, Baseline, Text, TextStyleBuilder},
};
use profont::{PROFONT_14_POINT, PROFONT_18_POINT, PROFONT_24_POINT};

use super::{formatter::TimeFormatter, Layer, Surface, TextField};
use crate::animation::FrameBuffer;

const BACKGROUND_COLOR: Rgb565 = Rgb565::BLACK;
const TEXT_COLOR: Rgb565 = Rgb565::WHITE;
const STRIPE_WIDTH: u32 = 3;
/// Stripe colors and their distance from the band border
const STRIPES: [(Rgb565, i32); 3] = [(Rgb565::RED, 2), (Rgb565::WHITE, 4), (Rgb565::BLUE, 6)];

/// Anchor of a text field, text is centered horizontally on it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextAnchor {
    pub position: Point,
    pub baseline: Baseline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceLayout {
    size: Size,
    /// Height of the top and bottom bands
    band: i32,
}

impl FaceLayout {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            band: size.height as i32 * 9 / 28,
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn band(&self) -> i32 {
        self.band
    }

    fn width(&self) -> i32 {
        self.size.width as i32
    }

    fn height(&self) -> i32 {
        self.size.height as i32
    }

    /// Stripe segments at `offset` pixels from the band borders
    pub fn stripes(&self, offset: i32) -> [Line; 4] {
        let (w, h, band) = (self.width(), self.height(), self.band);
        [
            Line::new(Point::new(0, band + offset - 1), Point::new(w, band + offset - 1)),
            Line::new(Point::new(0, h - band - offset), Point::new(w, h - band - offset)),
            Line::new(Point::new(w / 2, offset - 1), Point::new(w, offset - 1)),
            Line::new(Point::new(0, h - offset), Point::new(w / 2, h - offset)),
        ]
    }

    pub fn anchor(&self, field: TextField) -> TextAnchor {
        let (w, h, band) = (self.width(), self.height(), self.band);
        match field {
            TextField::Time => TextAnchor {
                position: Point::new(w / 2 + w / 48, h / 2),
                baseline: Baseline::Middle,
            },
            TextField::Day => TextAnchor {
                position: Point::new(w / 4, h - band + 4),
                baseline: Baseline::Top,
            },
            TextField::Month => TextAnchor {
                position: Point::new(w * 3 / 4, 2),
                baseline: Baseline::Top,
            },
            TextField::MonthDay => TextAnchor {
                position: Point::new(w * 3 / 4 + w / 24, h / 6),
                baseline: Baseline::Top,
            },
        }
    }

    pub fn font(&self, field: TextField) -> &'static MonoFont<'static> {
        match field {
            TextField::Time => &PROFONT_24_POINT,
            TextField::Day | TextField::Month => &PROFONT_18_POINT,
            TextField::MonthDay => &PROFONT_14_POINT,
        }
    }

    /// Top left corner of the flag for the given layer
    pub fn flag_origin(&self, layer: Layer, frame: Size) -> Option<Point> {
        match layer {
            Layer::FlagTopLeft => Some(Point::zero()),
            Layer::FlagBottomRight => Some(Point::new(
                self.width() - frame.width as i32,
                self.height() - frame.height as i32,
            )),
            _ => None,
        }
    }
}

/// Set of layers waiting to be redrawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dirty(u8);

impl Dirty {
    const CANVAS: u8 = 1 << 0;
    const FLAG_TOP_LEFT: u8 = 1 << 1;
    const FLAG_BOTTOM_RIGHT: u8 = 1 << 2;
    const TEXT: u8 = 1 << 3;

    fn bit(layer: Layer) -> u8 {
        match layer {
            Layer::Canvas => Self::CANVAS,
            Layer::FlagTopLeft => Self::FLAG_TOP_LEFT,
            Layer::FlagBottomRight => Self::FLAG_BOTTOM_RIGHT,
            Layer::Text(_) => Self::TEXT,
        }
    }

    pub fn insert(&mut self, layer: Layer) {
        self.0 |= Self::bit(layer);
    }

    pub fn contains(&self, layer: Layer) -> bool {
        self.0 & Self::bit(layer) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Anything below the flags changed, so the whole face is redrawn
    pub fn needs_full_redraw(&self) -> bool {
        self.0 & (Self::CANVAS | Self::TEXT) != 0
    }
}

/// Presentation of the face: tracks dirty layers and draws them
pub struct Screen {
    layout: FaceLayout,
    dirty: Dirty,
}

impl Surface for Screen {
    fn mark_dirty(&mut self, layer: Layer) {
        self.dirty.insert(layer);
    }
}

impl Screen {
    pub fn new(size: Size) -> Self {
        Self {
            layout: FaceLayout::new(size),
            dirty: Dirty::default(),
        }
    }

    pub fn layout(&self) -> &FaceLayout {
        &self.layout
    }

    pub fn dirty(&self) -> Dirty {
        self.dirty
    }

    /// Draw whatever changed since the last call. Returns whether anything
    /// was drawn.
    pub fn render<D, const W: usize, const H: usize>(
        &mut self,
        target: &mut D,
        text: &TimeFormatter,
        frame: &FrameBuffer<W, H>,
    ) -> Result<bool, D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let dirty = core::mem::take(&mut self.dirty);
        if dirty.is_empty() {
            return Ok(false);
        }

        if dirty.needs_full_redraw() {
            self.draw_canvas(target)?;
            self.draw_text(target, text)?;
            self.draw_flag(target, Layer::FlagTopLeft, frame)?;
            self.draw_flag(target, Layer::FlagBottomRight, frame)?;
        } else {
            for layer in [Layer::FlagTopLeft, Layer::FlagBottomRight] {
                if dirty.contains(layer) {
                    self.draw_flag(target, layer, frame)?;
                }
            }
        }
        Ok(true)
    }

    fn draw_canvas<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        target.clear(BACKGROUND_COLOR)?;
        for (color, offset) in STRIPES {
            let style = PrimitiveStyle::with_stroke(color, STRIPE_WIDTH);
            for line in self.layout.stripes(offset) {
                line.into_styled(style).draw(target)?;
            }
        }
        Ok(())
    }

    fn draw_text<D>(&self, target: &mut D, text: &TimeFormatter) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let fields = [
            (TextField::Time, text.time()),
            (TextField::Day, text.day()),
            (TextField::Month, text.month()),
            (TextField::MonthDay, text.month_day()),
        ];
        for (field, content) in fields {
            let anchor = self.layout.anchor(field);
            let character_style = MonoTextStyle::new(self.layout.font(field), TEXT_COLOR);
            let text_style = TextStyleBuilder::new()
                .alignment(Alignment::Center)
                .baseline(anchor.baseline)
                .build();
            Text::with_text_style(content, anchor.position, character_style, text_style)
                .draw(target)?;
        }
        Ok(())
    }

    fn draw_flag<D, const W: usize, const H: usize>(
        &self,
        target: &mut D,
        layer: Layer,
        frame: &FrameBuffer<W, H>,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        match self.layout.flag_origin(layer, frame.size()) {
            Some(origin) => frame.blit(target, origin),
            None => Ok(()),
        }
    }
}
