use std::io::Write;

use crate::codec::reader::ppm::P3_HEADER;
use crate::codec::ImageWriter;
use crate::image::PixelBuffer;
use crate::Result;

/// writes plain `P3` images, alpha is dropped
pub struct PPMImageWriter<W: Write> {
    writer: W,
}

impl<W: Write> PPMImageWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ImageWriter for PPMImageWriter<W> {
    fn write_image(&mut self, buffer: &PixelBuffer) -> Result<()> {
        writeln!(self.writer, "{}", P3_HEADER)?;
        writeln!(self.writer, "{} {}", buffer.width(), buffer.height())?;
        writeln!(self.writer, "{}", buffer.max_value())?;
        for row in buffer.rows() {
            for pixel in row {
                write!(self.writer, "{} {} {} ", pixel.red(), pixel.green(), pixel.blue())?;
            }
            writeln!(self.writer)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
