use crate::color::{scale_component, HSLColorFormat, RGBColorFormat, RangeColorFormat};
use crate::error::Error;
use crate::position::Position;
use crate::Result;

/// one of the three color channels of a pixel
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

/// an immutable rgba value bound to a max channel value and a position
///
/// every component lies within `0..=max_value`, operations deriving a new
/// pixel keep the max value and the position of `self`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pixel {
    red: u16,
    green: u16,
    blue: u16,
    alpha: u16,
    max_value: u16,
    position: Position,
}

impl Pixel {
    pub fn new(
        red: u16,
        green: u16,
        blue: u16,
        alpha: u16,
        max_value: u16,
        position: Position,
    ) -> Result<Self> {
        if max_value == 0 {
            return Err(Error::InvalidMaxValue);
        }
        for value in [red, green, blue, alpha] {
            if value > max_value {
                return Err(Error::ChannelValueOutOfRange { value, max_value });
            }
        }
        Ok(Self {
            red,
            green,
            blue,
            alpha,
            max_value,
            position,
        })
    }

    /// a fully opaque pixel
    pub fn opaque(red: u16, green: u16, blue: u16, max_value: u16, position: Position) -> Result<Self> {
        Self::new(red, green, blue, max_value, max_value, position)
    }

    // max_value must already be known to be positive
    pub(crate) fn clamped(
        red: u16,
        green: u16,
        blue: u16,
        alpha: u16,
        max_value: u16,
        position: Position,
    ) -> Self {
        Self {
            red: red.min(max_value),
            green: green.min(max_value),
            blue: blue.min(max_value),
            alpha: alpha.min(max_value),
            max_value,
            position,
        }
    }

    pub(crate) fn transparent_white(max_value: u16, position: Position) -> Self {
        Self::clamped(max_value, max_value, max_value, 0, max_value, position)
    }

    pub(crate) fn opaque_white(max_value: u16, position: Position) -> Self {
        Self::clamped(max_value, max_value, max_value, max_value, max_value, position)
    }

    pub fn red(&self) -> u16 {
        self.red
    }

    pub fn green(&self) -> u16 {
        self.green
    }

    pub fn blue(&self) -> u16 {
        self.blue
    }

    pub fn alpha(&self) -> u16 {
        self.alpha
    }

    pub fn max_value(&self) -> u16 {
        self.max_value
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn rgba(&self) -> [u16; 4] {
        [self.red, self.green, self.blue, self.alpha]
    }

    pub fn with_position(&self, position: Position) -> Self {
        Self { position, ..*self }
    }

    /// the same color expressed against another max channel value
    pub fn rescale(&self, max_value: u16) -> Self {
        if max_value == self.max_value || max_value == 0 {
            return *self;
        }
        let from = f64::from(self.max_value);
        let scale = |value: u16| scale_component(f64::from(value) / from, max_value);
        Self::clamped(
            scale(self.red),
            scale(self.green),
            scale(self.blue),
            scale(self.alpha),
            max_value,
            self.position,
        )
    }

    fn range_color(&self) -> RangeColorFormat<u16> {
        RangeColorFormat::new(self.max_value, self.red, self.green, self.blue)
    }

    fn normalized_alpha(&self) -> f64 {
        f64::from(self.alpha) / f64::from(self.max_value)
    }

    fn with_rgb(&self, rgb: RangeColorFormat<u16>) -> Self {
        Self::clamped(
            rgb.red,
            rgb.green,
            rgb.blue,
            self.alpha,
            self.max_value,
            self.position,
        )
    }

    /// source-over compositing of `self` on top of `backdrop`
    ///
    /// a result without any coverage is fully transparent black
    pub fn combine(&self, backdrop: &Pixel) -> Pixel {
        let alpha = self.normalized_alpha();
        let backdrop_alpha = backdrop.normalized_alpha();
        let out_alpha = alpha + backdrop_alpha * (1.0 - alpha);
        if out_alpha <= 0.0 {
            return Self::clamped(0, 0, 0, 0, self.max_value, self.position);
        }

        let source = RGBColorFormat::from(self.range_color());
        let below = RGBColorFormat::from(backdrop.range_color());
        let blend = |component: f64, backdrop_component: f64| {
            (component * alpha + backdrop_component * backdrop_alpha * (1.0 - alpha)) / out_alpha
        };
        let blended = RGBColorFormat {
            red: blend(source.red, below.red),
            green: blend(source.green, below.green),
            blue: blend(source.blue, below.blue),
        };
        let rgb = blended.to_range(self.max_value);
        Self::clamped(
            rgb.red,
            rgb.green,
            rgb.blue,
            scale_component(out_alpha, self.max_value),
            self.max_value,
            self.position,
        )
    }

    /// keeps only the given channel, the other two become zero
    pub fn isolate(&self, channel: Channel) -> Pixel {
        let (red, green, blue) = match channel {
            Channel::Red => (self.red, 0, 0),
            Channel::Green => (0, self.green, 0),
            Channel::Blue => (0, 0, self.blue),
        };
        Self { red, green, blue, ..*self }
    }

    /// multiplies the lightness of both pixels, keeping hue and saturation of `self`
    pub fn darken(&self, backdrop: &Pixel) -> Pixel {
        self.blend_lightness(backdrop, |current, below| current * below)
    }

    /// screens the lightness of both pixels, keeping hue and saturation of `self`
    pub fn brighten(&self, backdrop: &Pixel) -> Pixel {
        self.blend_lightness(backdrop, |current, below| {
            1.0 - (1.0 - current) * (1.0 - below)
        })
    }

    fn blend_lightness(&self, backdrop: &Pixel, blend: impl Fn(f64, f64) -> f64) -> Pixel {
        let current = HSLColorFormat::from(&RGBColorFormat::from(self.range_color()));
        let below = HSLColorFormat::from(&RGBColorFormat::from(backdrop.range_color()));
        let mixed = HSLColorFormat {
            lightness: blend(current.lightness, below.lightness).clamp(0.0, 1.0),
            ..current
        };
        self.with_rgb(RGBColorFormat::from(&mixed).to_range(self.max_value))
    }

    /// absolute per channel difference to `backdrop`
    pub fn invert(&self, backdrop: &Pixel) -> Pixel {
        let below = backdrop.rescale(self.max_value);
        self.with_rgb(RangeColorFormat::new(
            self.max_value,
            self.red.abs_diff(below.red),
            self.green.abs_diff(below.green),
            self.blue.abs_diff(below.blue),
        ))
    }
}
