//! Flag animation stored as a GIF in flash

use embassy_time::Duration;
use embedded_graphics::{geometry::Size, pixelcolor::Rgb565, Drawable};
use flag_watchface::{
    animation::{FrameBuffer, FrameDecoder},
    Error,
};
use static_cell::StaticCell;
use tinygif::{FrameIterator, Gif};

/// Largest flag the frame buffer holds
pub const FLAG_WIDTH: usize = 64;
pub const FLAG_HEIGHT: usize = 40;

/// Delay for frames that carry none
const DEFAULT_DELAY: Duration = Duration::from_millis(100);

static FLAG_GIF: &[u8] = include_bytes!("../assets/flag.gif");

static GIF: StaticCell<Gif<'static, Rgb565>> = StaticCell::new();

/// Decodes the flag frames one by one straight from flash
pub struct FlagDecoder {
    gif: &'static Gif<'static, Rgb565>,
    frames: FrameIterator<'static, Rgb565>,
    size: Size,
}

impl FlagDecoder {
    /// Parse the bundled GIF. There is only one decoder.
    pub fn new() -> Result<Self, Error> {
        let gif = Gif::from_slice(FLAG_GIF).map_err(|_| Error::Decoder)?;
        let size = Size::new(gif.width().into(), gif.height().into());
        FrameBuffer::<FLAG_WIDTH, FLAG_HEIGHT>::check_size(size)?;

        let gif: &'static Gif<'static, Rgb565> = GIF.try_init(gif).ok_or(Error::Decoder)?;
        defmt::info!("Flag animation {}x{}", size.width, size.height);
        Ok(Self {
            gif,
            frames: gif.frames(),
            size,
        })
    }
}

impl FrameDecoder for FlagDecoder {
    fn frame_size(&self) -> Size {
        self.size
    }

    fn next_frame<const W: usize, const H: usize>(
        &mut self,
        frame: &mut FrameBuffer<W, H>,
    ) -> Option<Duration> {
        let gif_frame = self.frames.next()?;
        if let Err(never) = gif_frame.draw(frame) {
            match never {}
        }

        match gif_frame.delay_centis {
            0 => Some(DEFAULT_DELAY),
            centis => Some(Duration::from_millis(u64::from(centis) * 10)),
        }
    }

    fn restart(&mut self) {
        self.frames = self.gif.frames();
    }
}
