use std::io::{Seek, Write};

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

use crate::codec::ImageWriter;
use crate::image::PixelBuffer;
use crate::Result;

const HOST_MAX_VALUE: u16 = u8::MAX as u16;

/// encodes pixels as png or jpeg, channels are rescaled to 0..=255
///
/// jpeg has no alpha channel, so it is dropped for that format
pub struct HostImageWriter<W: Write + Seek> {
    writer: W,
    format: ImageFormat,
}

impl<W: Write + Seek> HostImageWriter<W> {
    pub fn new(writer: W, format: ImageFormat) -> Self {
        Self { writer, format }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn to_rgba_image(buffer: &PixelBuffer) -> RgbaImage {
    let rescaled = buffer.rescale(HOST_MAX_VALUE);
    RgbaImage::from_fn(buffer.width() as u32, buffer.height() as u32, |x, y| {
        rescaled
            .pixel(y as usize, x as usize)
            .map(|pixel| Rgba(pixel.rgba().map(|component| component as u8)))
            .unwrap_or(Rgba([0, 0, 0, 0]))
    })
}

impl<W: Write + Seek> ImageWriter for HostImageWriter<W> {
    fn write_image(&mut self, buffer: &PixelBuffer) -> Result<()> {
        let image = DynamicImage::ImageRgba8(to_rgba_image(buffer));
        match self.format {
            ImageFormat::Jpeg => DynamicImage::ImageRgb8(image.to_rgb8()).write_to(&mut self.writer, self.format)?,
            _ => image.write_to(&mut self.writer, self.format)?,
        }
        self.writer.flush()?;
        Ok(())
    }
}
