/// color components normalized to the range 0..=1
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RGBColorFormat<T> {
    pub red: T,
    pub green: T,
    pub blue: T,
}

/// integer color components scaled against a max channel value
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RangeColorFormat<T> {
    pub max: T,
    pub red: T,
    pub green: T,
    pub blue: T,
}

/// hue in degrees within 0..360, saturation and lightness within 0..=1
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HSLColorFormat<T> {
    pub hue: T,
    pub saturation: T,
    pub lightness: T,
}

impl<T> RangeColorFormat<T> {
    pub fn new(max: T, red: T, green: T, blue: T) -> Self {
        RangeColorFormat {
            max,
            red,
            green,
            blue,
        }
    }
}

impl From<&RangeColorFormat<u16>> for RGBColorFormat<f64> {
    fn from(value: &RangeColorFormat<u16>) -> Self {
        let max = f64::from(value.max);
        RGBColorFormat {
            red: f64::from(value.red) / max,
            green: f64::from(value.green) / max,
            blue: f64::from(value.blue) / max,
        }
    }
}

impl From<RangeColorFormat<u16>> for RGBColorFormat<f64> {
    fn from(value: RangeColorFormat<u16>) -> Self {
        RGBColorFormat::from(&value)
    }
}

impl RGBColorFormat<f64> {
    /// scale back to integers, rounding to nearest and clamping into 0..=max
    pub fn to_range(&self, max: u16) -> RangeColorFormat<u16> {
        RangeColorFormat {
            max,
            red: scale_component(self.red, max),
            green: scale_component(self.green, max),
            blue: scale_component(self.blue, max),
        }
    }
}

/// maps a normalized component onto 0..=max
pub fn scale_component(component: f64, max: u16) -> u16 {
    let scaled = (component * f64::from(max)).round();
    scaled.clamp(0.0, f64::from(max)) as u16
}

impl From<&RGBColorFormat<f64>> for HSLColorFormat<f64> {
    fn from(value: &RGBColorFormat<f64>) -> Self {
        let (red, green, blue) = (value.red, value.green, value.blue);
        let component_max = red.max(green.max(blue));
        let component_min = red.min(green.min(blue));
        let delta = component_max - component_min;
        let lightness = (component_max + component_min) / 2.0;

        if delta == 0.0 {
            return HSLColorFormat {
                hue: 0.0,
                saturation: 0.0,
                lightness,
            };
        }

        let saturation = (delta / (1.0 - (2.0 * lightness - 1.0).abs())).clamp(0.0, 1.0);
        let sector = if component_max == red {
            ((green - blue) / delta).rem_euclid(6.0)
        } else if component_max == green {
            (blue - red) / delta + 2.0
        } else {
            (red - green) / delta + 4.0
        };

        HSLColorFormat {
            hue: (sector * 60.0).rem_euclid(360.0),
            saturation,
            lightness,
        }
    }
}

impl From<&HSLColorFormat<f64>> for RGBColorFormat<f64> {
    fn from(value: &HSLColorFormat<f64>) -> Self {
        RGBColorFormat {
            red: hsl_component(value, 0.0),
            green: hsl_component(value, 8.0),
            blue: hsl_component(value, 4.0),
        }
    }
}

// piecewise-linear hsl to rgb, n selects the channel
fn hsl_component(hsl: &HSLColorFormat<f64>, n: f64) -> f64 {
    let k = (n + hsl.hue / 30.0).rem_euclid(12.0);
    let a = hsl.saturation * hsl.lightness.min(1.0 - hsl.lightness);
    hsl.lightness - a * (k - 3.0).min(9.0 - k).min(1.0).max(-1.0)
}

#[cfg(test)]
mod test {
    use super::{HSLColorFormat, RGBColorFormat, RangeColorFormat};

    fn assert_close(actual: f64, expected: f64, name: &str) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "{} is wrong, expected {} but was {}",
            name,
            expected,
            actual
        );
    }

    #[test]
    fn convert_range_color_to_rgb() {
        let range_color = RangeColorFormat::new(255_u16, 51, 102, 255);
        let result = RGBColorFormat::from(&range_color);
        assert_close(result.red, 0.2, "red");
        assert_close(result.green, 0.4, "green");
        assert_close(result.blue, 1.0, "blue");
    }

    #[test]
    fn convert_range_color_4bit_to_rgb() {
        let range_color = RangeColorFormat::new(0b1111_u16, 0b0010, 0b0101, 0b1111);
        let result = RGBColorFormat::from(&range_color);
        assert_close(result.red, 2.0 / 15.0, "red");
        assert_close(result.green, 1.0 / 3.0, "green");
        assert_close(result.blue, 1.0, "blue");
    }

    #[test]
    fn convert_pure_red_to_hsl() {
        let hsl = HSLColorFormat::from(&RGBColorFormat {
            red: 1.0,
            green: 0.0,
            blue: 0.0,
        });
        assert_close(hsl.hue, 0.0, "hue");
        assert_close(hsl.saturation, 1.0, "saturation");
        assert_close(hsl.lightness, 0.5, "lightness");
    }

    #[test]
    fn convert_magenta_to_hsl_keeps_hue_positive() {
        let hsl = HSLColorFormat::from(&RGBColorFormat {
            red: 1.0,
            green: 0.0,
            blue: 1.0,
        });
        assert_close(hsl.hue, 300.0, "hue");
    }

    #[test]
    fn convert_grey_to_hsl_has_no_saturation() {
        let hsl = HSLColorFormat::from(&RGBColorFormat {
            red: 0.5,
            green: 0.5,
            blue: 0.5,
        });
        assert_close(hsl.hue, 0.0, "hue");
        assert_close(hsl.saturation, 0.0, "saturation");
        assert_close(hsl.lightness, 0.5, "lightness");
    }

    #[test]
    fn hsl_conversion_is_reversible() {
        let rgb = RGBColorFormat {
            red: 150.0 / 255.0,
            green: 50.0 / 255.0,
            blue: 89.0 / 255.0,
        };
        let back = RGBColorFormat::from(&HSLColorFormat::from(&rgb)).to_range(255);
        assert_eq!(back, RangeColorFormat::new(255, 150, 50, 89));
    }

    #[test]
    fn scaling_clamps_out_of_range_components() {
        let rgb = RGBColorFormat {
            red: 1.2,
            green: -0.3,
            blue: 0.5,
        };
        let range = rgb.to_range(100);
        assert_eq!(range, RangeColorFormat::new(100, 100, 0, 50));
    }
}
