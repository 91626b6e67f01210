use std::slice::Chunks;

use crate::error::Error;
use crate::pixel::Pixel;
use crate::position::Position;
use crate::Result;

/// dense row-major grid of pixels, each cell knows its own buffer position
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    height: usize,
    width: usize,
    cells: Vec<Pixel>,
}

impl PixelBuffer {
    /// builds a buffer from pixels given in row-major order
    ///
    /// the pixels are repositioned to their cell in the grid
    pub fn new(height: usize, width: usize, pixels: Vec<Pixel>) -> Result<Self> {
        if height == 0 || width == 0 {
            return Err(Error::InvalidDimension {
                height,
                width,
                max_value: pixels.first().map_or(0, Pixel::max_value),
            });
        }
        let expected = height
            .checked_mul(width)
            .ok_or(Error::DimensionTooLarge { height, width })?;
        if pixels.len() != expected {
            return Err(Error::SizeOfPixelsDoesNotMatchDimension {
                expected,
                found: pixels.len(),
            });
        }
        let cells = pixels
            .into_iter()
            .enumerate()
            .map(|(index, pixel)| pixel.with_position((index / width, index % width).into()))
            .collect();
        Ok(Self {
            height,
            width,
            cells,
        })
    }

    // dimensions must already be validated
    pub(crate) fn from_fn(height: usize, width: usize, mut f: impl FnMut(Position) -> Pixel) -> Self {
        let mut cells = Vec::with_capacity(height * width);
        for row in 0..height {
            for col in 0..width {
                let position = Position::from((row, col));
                cells.push(f(position).with_position(position));
            }
        }
        Self {
            height,
            width,
            cells,
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// the largest max channel value among all pixels
    pub fn max_value(&self) -> u16 {
        self.cells.iter().map(Pixel::max_value).max().unwrap_or(0)
    }

    pub fn pixel(&self, row: usize, col: usize) -> Option<&Pixel> {
        self.pixel_at(Position::from((row, col)))
    }

    pub fn pixel_at(&self, position: Position) -> Option<&Pixel> {
        position
            .index_in(self.height, self.width)
            .map(|index| &self.cells[index])
    }

    /// all pixels in row-major order
    pub fn pixels(&self) -> impl Iterator<Item = &Pixel> {
        self.cells.iter()
    }

    pub fn rows(&self) -> Chunks<'_, Pixel> {
        self.cells.chunks(self.width)
    }

    /// replaces the pixel at `position`, returns false when outside the grid
    pub(crate) fn replace(&mut self, position: Position, pixel: Pixel) -> bool {
        match position.index_in(self.height, self.width) {
            Some(index) => {
                self.cells[index] = pixel.with_position(position);
                true
            }
            None => false,
        }
    }

    pub fn map(&self, f: impl Fn(&Pixel) -> Pixel) -> PixelBuffer {
        Self::from_fn(self.height, self.width, |position| {
            f(&self.cells[self.index_of(position)])
        })
    }

    /// combines every cell with the cell at the same position in `other`
    ///
    /// both buffers have to share the same dimension
    pub(crate) fn zip_map(&self, other: &PixelBuffer, f: impl Fn(&Pixel, &Pixel) -> Pixel) -> PixelBuffer {
        debug_assert_eq!((self.height, self.width), (other.height, other.width));
        let cells = self
            .cells
            .iter()
            .zip(other.cells.iter())
            .map(|(a, b)| f(a, b).with_position(a.position()))
            .collect();
        Self {
            height: self.height,
            width: self.width,
            cells,
        }
    }

    /// every pixel expressed against the given max channel value
    pub fn rescale(&self, max_value: u16) -> PixelBuffer {
        self.map(|pixel| pixel.rescale(max_value))
    }

    fn index_of(&self, position: Position) -> usize {
        position.row() as usize * self.width + position.col() as usize
    }
}

/// a pixel buffer together with the top-left anchor used when placing it onto a layer
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    buffer: PixelBuffer,
    anchor: Position,
}

impl Image {
    pub fn new(buffer: PixelBuffer, anchor: Position) -> Self {
        Self { buffer, anchor }
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    pub fn anchor(&self) -> Position {
        self.anchor
    }

    /// the same image placed at another anchor
    pub fn at(self, anchor: Position) -> Self {
        Self { anchor, ..self }
    }

    pub fn height(&self) -> usize {
        self.buffer.height
    }

    pub fn width(&self) -> usize {
        self.buffer.width
    }

    pub fn max_value(&self) -> u16 {
        self.buffer.max_value()
    }
}

impl From<PixelBuffer> for Image {
    fn from(buffer: PixelBuffer) -> Self {
        Self::new(buffer, Position::ORIGIN)
    }
}
