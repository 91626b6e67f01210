use crate::error::Error;
use crate::filter::Filter;
use crate::image::{Image, PixelBuffer};
use crate::pixel::Pixel;
use crate::position::Position;
use crate::Result;

pub const BACKGROUND_LAYER_NAME: &str = "background";

/// a named canvas with a filter and the history of images placed onto it
///
/// cells of a canvas taken over from a rendered project already carry the
/// filter, they are rendered as they are until an image is placed over them
/// or the filter changes
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layer {
    name: String,
    max_value: u16,
    filter: Filter,
    canvas: PixelBuffer,
    placed_images: Vec<Image>,
    // one flag per cell in row-major order, empty when no cell is prefiltered
    prefiltered: Vec<bool>,
}

/// names are tokens in project files, so they may not be empty or contain whitespace
pub fn validate_layer_name(name: &str) -> Result<()> {
    if name.is_empty() || name.chars().any(char::is_whitespace) || name.starts_with('#') {
        return Err(Error::InvalidLayerName(name.to_owned()));
    }
    Ok(())
}

fn validate_dimension(height: usize, width: usize, max_value: u16) -> Result<()> {
    if height == 0 || width == 0 || max_value == 0 {
        return Err(Error::InvalidDimension {
            height,
            width,
            max_value,
        });
    }
    if height.checked_mul(width).is_none() {
        return Err(Error::DimensionTooLarge { height, width });
    }
    Ok(())
}

impl Layer {
    /// a layer with a fully transparent white canvas
    pub fn new(name: impl Into<String>, height: usize, width: usize, max_value: u16) -> Result<Self> {
        Self::filled(name.into(), height, width, max_value, Pixel::transparent_white)
    }

    /// the opaque white layer every project starts with
    pub fn background(height: usize, width: usize, max_value: u16) -> Result<Self> {
        Self::filled(
            BACKGROUND_LAYER_NAME.to_owned(),
            height,
            width,
            max_value,
            Pixel::opaque_white,
        )
    }

    fn filled(
        name: String,
        height: usize,
        width: usize,
        max_value: u16,
        pixel: fn(u16, Position) -> Pixel,
    ) -> Result<Self> {
        validate_layer_name(&name)?;
        validate_dimension(height, width, max_value)?;
        Ok(Self {
            name,
            max_value,
            filter: Filter::Normal,
            canvas: PixelBuffer::from_fn(height, width, |position| pixel(max_value, position)),
            placed_images: Vec::new(),
            prefiltered: Vec::new(),
        })
    }

    /// a layer taking over an already filtered canvas verbatim
    pub fn with_canvas(
        name: impl Into<String>,
        filter: Filter,
        max_value: u16,
        canvas: PixelBuffer,
    ) -> Result<Self> {
        let name = name.into();
        validate_layer_name(&name)?;
        validate_dimension(canvas.height(), canvas.width(), max_value)?;
        if let Some(pixel) = canvas.pixels().find(|pixel| pixel.max_value() > max_value) {
            return Err(Error::ChannelValueOutOfRange {
                value: pixel.max_value(),
                max_value,
            });
        }
        Ok(Self {
            name,
            max_value,
            filter,
            prefiltered: vec![true; canvas.height() * canvas.width()],
            canvas: canvas.rescale(max_value),
            placed_images: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn height(&self) -> usize {
        self.canvas.height()
    }

    pub fn width(&self) -> usize {
        self.canvas.width()
    }

    pub fn max_value(&self) -> u16 {
        self.max_value
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    /// a different filter applies to the whole canvas again, prefiltered cells included
    pub fn set_filter(&mut self, filter: Filter) {
        if filter != self.filter {
            self.prefiltered.clear();
        }
        self.filter = filter;
    }

    pub fn canvas(&self) -> &PixelBuffer {
        &self.canvas
    }

    pub fn placed_images(&self) -> &[Image] {
        &self.placed_images
    }

    pub fn pixel(&self, position: Position) -> Option<&Pixel> {
        self.canvas.pixel_at(position)
    }

    pub fn has_name(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// composites `image` onto the canvas at its anchor
    ///
    /// pixels falling outside the canvas are dropped, the image is kept in the
    /// placement history either way
    pub fn add_image(&mut self, image: Image) {
        let anchor = image.anchor();
        let source = image.buffer().rescale(self.max_value);
        let mut dropped = 0_usize;
        for pixel in source.pixels() {
            let target = anchor.offset(pixel.position().row(), pixel.position().col());
            let (target, combined) = match target
                .and_then(|target| self.canvas.pixel_at(target).map(|below| (target, below)))
            {
                Some((target, below)) => (target, pixel.combine(below)),
                None => {
                    dropped += 1;
                    continue;
                }
            };
            self.canvas.replace(target, combined);
            self.mark_unfiltered(target);
        }
        log::debug!(
            "Placed {}x{} image at {} onto layer '{}', {} pixels clipped",
            image.height(),
            image.width(),
            anchor,
            self.name,
            dropped
        );
        self.placed_images.push(image);
    }

    fn is_prefiltered(&self, position: Position) -> bool {
        position
            .index_in(self.height(), self.width())
            .and_then(|index| self.prefiltered.get(index).copied())
            .unwrap_or(false)
    }

    fn mark_unfiltered(&mut self, position: Position) {
        let index = position.index_in(self.height(), self.width());
        if let Some(flag) = index.and_then(|index| self.prefiltered.get_mut(index)) {
            *flag = false;
        }
    }

    fn filtered(&self, pixel: &Pixel, backdrop: Option<&Pixel>) -> Pixel {
        if self.is_prefiltered(pixel.position()) {
            return *pixel;
        }
        self.filter.apply(pixel, backdrop)
    }

    /// snapshot of this layer with its filter applied against `backdrop`
    ///
    /// every cell of the snapshot counts as prefiltered
    pub fn apply_filter(&self, backdrop: Option<&PixelBuffer>) -> Layer {
        let canvas = match backdrop {
            Some(backdrop) => self
                .canvas
                .zip_map(backdrop, |pixel, below| self.filtered(pixel, Some(below))),
            None => self.canvas.map(|pixel| self.filtered(pixel, None)),
        };
        Self {
            name: self.name.clone(),
            max_value: self.max_value,
            filter: self.filter,
            prefiltered: vec![true; canvas.height() * canvas.width()],
            canvas,
            placed_images: Vec::new(),
        }
    }

    /// this layer composited on top of `below`
    pub fn combine(&self, below: &PixelBuffer) -> PixelBuffer {
        self.canvas.zip_map(below, |pixel, backdrop| pixel.combine(backdrop))
    }
}
