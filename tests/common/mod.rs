#![allow(dead_code)]

use core::convert::Infallible;

use embassy_time::{Duration, Instant};
use embedded_graphics::{pixelcolor::Rgb565, prelude::*};
use flag_watchface::{
    animation::{FrameBuffer, FrameDecoder},
    app::EventLoop,
    config::FaceConfig,
    system::time::DisplayTime,
    ui::FlagWatchface,
};

pub const FLAG_WIDTH: usize = 4;
pub const FLAG_HEIGHT: usize = 4;
pub const SCREEN: Size = Size::new(240, 240);

/// Flag of `frames` solid frames, each shown for 40ms
pub struct FakeFlag {
    pub size: Size,
    pub frames: u32,
    pub position: u32,
    pub restarts: u32,
}

impl FakeFlag {
    pub fn new(frames: u32) -> Self {
        Self {
            size: Size::new(4, 4),
            frames,
            position: 0,
            restarts: 0,
        }
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }
}

impl FrameDecoder for FakeFlag {
    fn frame_size(&self) -> Size {
        self.size
    }

    fn next_frame<const W: usize, const H: usize>(
        &mut self,
        frame: &mut FrameBuffer<W, H>,
    ) -> Option<Duration> {
        if self.position == self.frames {
            return None;
        }
        let color = if self.position % 2 == 0 {
            Rgb565::RED
        } else {
            Rgb565::BLUE
        };
        frame.clear(color).ok()?;
        self.position += 1;
        Some(Duration::from_millis(40))
    }

    fn restart(&mut self) {
        self.position = 0;
        self.restarts += 1;
    }
}

pub type Face = EventLoop<FakeFlag, FLAG_WIDTH, FLAG_HEIGHT>;

pub fn face_with(config: FaceConfig) -> Face {
    let watchface = FlagWatchface::new(config, FakeFlag::new(3)).unwrap();
    EventLoop::new(watchface, SCREEN, at(0))
}

pub fn face() -> Face {
    face_with(FaceConfig::default())
}

pub fn at(millis: u64) -> Instant {
    Instant::from_millis(millis)
}

pub fn time(hour: u8, minute: u8) -> DisplayTime {
    DisplayTime {
        hour,
        minute,
        weekday: 3,
        month_day: 4,
        month: 7,
    }
}

/// Screen sized draw target remembering every pixel
pub struct Canvas {
    size: Size,
    pub pixels: Vec<Rgb565>,
    pub writes: usize,
}

impl Canvas {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            pixels: vec![Rgb565::new(1, 1, 1); (size.width * size.height) as usize],
            writes: 0,
        }
    }

    pub fn pixel(&self, point: Point) -> Rgb565 {
        self.pixels[(point.y as u32 * self.size.width + point.x as u32) as usize]
    }
}

impl OriginDimensions for Canvas {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for Canvas {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x >= 0
                && point.y >= 0
                && (point.x as u32) < self.size.width
                && (point.y as u32) < self.size.height
            {
                let index = (point.y as u32 * self.size.width + point.x as u32) as usize;
                self.pixels[index] = color;
                self.writes += 1;
            }
        }
        Ok(())
    }
}
