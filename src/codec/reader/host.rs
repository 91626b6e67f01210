use std::io::{BufRead, Seek};

use image::ImageFormat;

use crate::codec::ImageReader;
use crate::image::PixelBuffer;
use crate::pixel::Pixel;
use crate::position::Position;
use crate::Result;

const HOST_MAX_VALUE: u16 = u8::MAX as u16;

/// decodes png and jpeg images into pixels with a max value of 255
pub struct HostImageReader<R: BufRead + Seek> {
    reader: R,
    format: ImageFormat,
}

impl<R: BufRead + Seek> HostImageReader<R> {
    pub fn new(reader: R, format: ImageFormat) -> Self {
        Self { reader, format }
    }
}

impl<R: BufRead + Seek> ImageReader for HostImageReader<R> {
    fn read_image(&mut self) -> Result<PixelBuffer> {
        let decoded = image::load(&mut self.reader, self.format)?.to_rgba8();
        let (width, height) = decoded.dimensions();
        let pixels = decoded
            .pixels()
            .map(|rgba| {
                let [red, green, blue, alpha] = rgba.0.map(u16::from);
                Pixel::new(red, green, blue, alpha, HOST_MAX_VALUE, Position::ORIGIN)
            })
            .collect::<Result<Vec<Pixel>>>()?;
        PixelBuffer::new(height as usize, width as usize, pixels)
    }
}
