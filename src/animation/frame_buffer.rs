//! Offscreen canvas the animation frames are decoded into

use core::convert::Infallible;

use embedded_canvas::CCanvas;
use embedded_graphics::{pixelcolor::Rgb565, prelude::*, primitives::Rectangle};

use crate::Error;

/// One decoded frame of at most `W`x`H` pixels.
///
/// The frame size is chosen at creation and must fit into the canvas.
/// Drawing outside the frame is clipped.
pub struct FrameBuffer<const W: usize, const H: usize> {
    size: Size,
    canvas: CCanvas<Rgb565, W, H>,
}

impl<const W: usize, const H: usize> FrameBuffer<W, H> {
    /// Create a black buffer for frames of `size`
    pub fn new(size: Size) -> Result<Self, Error> {
        Self::check_size(size)?;
        let mut canvas = CCanvas::new();
        let area = Rectangle::new(Point::zero(), size);
        if let Err(never) = canvas.fill_solid(&area, Rgb565::BLACK) {
            match never {}
        }
        Ok(Self { size, canvas })
    }

    /// Whether frames of `size` fit into the canvas
    pub fn check_size(size: Size) -> Result<(), Error> {
        if size.width as usize > W || size.height as usize > H {
            return Err(Error::FrameTooLarge {
                width: size.width,
                height: size.height,
            });
        }
        Ok(())
    }

    /// Color at `point`, `None` outside the frame
    pub fn pixel(&self, point: Point) -> Option<Rgb565> {
        if !self.bounding_box().contains(point) {
            return None;
        }
        let mut sample = Sample { point, color: None };
        if let Err(never) = self.canvas.place_at(Point::zero()).draw(&mut sample) {
            match never {}
        }
        sample.color
    }

    /// Copy the frame to `target` with its top left corner at `origin`
    pub fn blit<D>(&self, target: &mut D, origin: Point) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        self.canvas.place_at(origin).draw(target)
    }
}

impl<const W: usize, const H: usize> OriginDimensions for FrameBuffer<W, H> {
    fn size(&self) -> Size {
        self.size
    }
}

impl<const W: usize, const H: usize> DrawTarget for FrameBuffer<W, H> {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let area = self.bounding_box();
        self.canvas.draw_iter(
            pixels
                .into_iter()
                .filter(|Pixel(point, _)| area.contains(*point)),
        )
    }
}

/// Draw target keeping the color of a single point
struct Sample {
    point: Point,
    color: Option<Rgb565>,
}

impl Dimensions for Sample {
    fn bounding_box(&self) -> Rectangle {
        Rectangle::new(self.point, Size::new(1, 1))
    }
}

impl DrawTarget for Sample {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point == self.point {
                self.color = Some(color);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_frames_larger_than_capacity() {
        let result = FrameBuffer::<4, 4>::new(Size::new(5, 4));
        assert_eq!(
            result.err(),
            Some(Error::FrameTooLarge {
                width: 5,
                height: 4
            })
        );
        assert!(FrameBuffer::<4, 4>::check_size(Size::new(4, 5)).is_err());
        assert!(FrameBuffer::<4, 4>::check_size(Size::new(4, 4)).is_ok());
    }

    #[test]
    fn starts_black() {
        let frame = FrameBuffer::<4, 2>::new(Size::new(4, 2)).unwrap();
        assert_eq!(frame.pixel(Point::new(0, 0)), Some(Rgb565::BLACK));
        assert_eq!(frame.pixel(Point::new(3, 1)), Some(Rgb565::BLACK));
    }

    #[test]
    fn drawing_outside_the_frame_is_clipped() {
        let mut frame = FrameBuffer::<8, 8>::new(Size::new(4, 2)).unwrap();
        frame
            .draw_iter([
                Pixel(Point::new(3, 1), Rgb565::RED),
                Pixel(Point::new(4, 0), Rgb565::BLUE),
                Pixel(Point::new(0, 5), Rgb565::BLUE),
                Pixel(Point::new(-1, 0), Rgb565::BLUE),
            ])
            .unwrap();

        assert_eq!(frame.pixel(Point::new(3, 1)), Some(Rgb565::RED));
        assert_eq!(frame.pixel(Point::new(4, 0)), None);

        // Only the 4x2 frame reaches the target
        let mut drawn = std::vec::Vec::new();
        frame.blit(&mut Collect(&mut drawn), Point::new(10, 10)).unwrap();
        assert_eq!(drawn.len(), 8);
        assert!(drawn.contains(&Pixel(Point::new(13, 11), Rgb565::RED)));
        assert!(!drawn.iter().any(|Pixel(_, color)| *color == Rgb565::BLUE));
    }

    struct Collect<'a>(&'a mut std::vec::Vec<Pixel<Rgb565>>);

    impl Dimensions for Collect<'_> {
        fn bounding_box(&self) -> Rectangle {
            Rectangle::new(Point::zero(), Size::new(64, 64))
        }
    }

    impl DrawTarget for Collect<'_> {
        type Color = Rgb565;
        type Error = Infallible;

        fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            self.0.extend(pixels);
            Ok(())
        }
    }
}
