use std::io::BufRead;

use super::tokenizer::{Token, TokenStream, Tokenizer};
use super::Dot;
use crate::codec::ImageReader;
use crate::error::Error;
use crate::image::PixelBuffer;
use crate::pixel::Pixel;
use crate::position::Position;
use crate::Result;

pub const P3_HEADER: &str = "P3";

const P3_HEADER_TOKEN_NAME: &str = "P3 Header";
const WIDTH_HEADER_TOKEN_NAME: &str = "Width Header";
const HEIGHT_HEADER_TOKEN_NAME: &str = "Height Header";
const MAX_VALUE_HEADER_TOKEN_NAME: &str = "Max Value Header";
const COLOR_COMPONENT_VALUE_TOKEN_NAME: &str = "Color Component Value";

/// reads plain `P3` images, every pixel becomes fully opaque
pub struct PPMImageReader<R: BufRead> {
    reader: R,
}

impl<R: BufRead> PPMImageReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> ImageReader for PPMImageReader<R> {
    fn read_image(&mut self) -> Result<PixelBuffer> {
        let tokenizer = Tokenizer::new(&mut self.reader);
        let mut parser = PPMParser::new(TokenStream::new(tokenizer));
        parser.parse_tokens()
    }
}

struct PPMParser<I> {
    tokens: TokenStream<I>,
}

impl<I> PPMParser<I>
where
    I: Iterator<Item = Result<Token>>,
{
    fn new(tokens: TokenStream<I>) -> Self {
        Self { tokens }
    }

    fn parse_tokens(&mut self) -> Result<PixelBuffer> {
        self.tokens.expect_literal(P3_HEADER_TOKEN_NAME, P3_HEADER)?;
        let width = self.tokens.parse_dimension(WIDTH_HEADER_TOKEN_NAME)?;
        let height = self.tokens.parse_dimension(HEIGHT_HEADER_TOKEN_NAME)?;
        let max_value = self.tokens.parse_max_value(MAX_VALUE_HEADER_TOKEN_NAME)?;
        let dots = self.parse_all_dots()?;
        Self::check_parsed_dots_length_match_header_information(&dots, width, height)?;
        let pixels = dots
            .into_iter()
            .map(|d| {
                Pixel::opaque(
                    d.component(0),
                    d.component(1),
                    d.component(2),
                    max_value,
                    Position::ORIGIN,
                )
            })
            .collect::<Result<Vec<Pixel>>>()?;
        PixelBuffer::new(height, width, pixels)
    }

    fn parse_all_dots(&mut self) -> Result<Vec<Dot<3>>> {
        let mut current_dot = Dot::new();
        let mut dots = Vec::new();
        while let Some(component) = self.tokens.next_component(COLOR_COMPONENT_VALUE_TOKEN_NAME)? {
            current_dot.push_color_component(component);
            if current_dot.is_complete() {
                dots.push(current_dot);
                current_dot.reset();
            }
        }
        if !current_dot.is_empty() {
            return Err(Error::IncompletePixelParsed {
                expected: 3,
                found: current_dot.index,
            });
        }
        Ok(dots)
    }

    fn check_parsed_dots_length_match_header_information(
        dots: &[Dot<3>],
        width: usize,
        height: usize,
    ) -> Result<()> {
        let expected = width
            .checked_mul(height)
            .ok_or(Error::DimensionTooLarge { height, width })?;
        if dots.len() != expected {
            return Err(Error::MismatchOfSizeBetweenHeaderAndValues {
                expected,
                found: dots.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::PPMImageReader;
    use crate::codec::ImageReader;
    use crate::error::Error;
    use crate::image::PixelBuffer;
    use crate::Result;

    fn parse_ppm_tokens(token_string: &str) -> Result<PixelBuffer> {
        PPMImageReader::new(token_string.as_bytes()).read_image()
    }

    #[test]
    fn read_string() {
        let string = "P3\n# Example PPM image string\n3 2\n255\n255 0 0   0 255 0   0 0 255\n255 255 0  255 0 255  0 255 255";
        let image = parse_ppm_tokens(string).unwrap();
        assert_eq!(image.height(), 2);
        assert_eq!(image.width(), 3);
        assert_eq!(image.pixel(1, 1).unwrap().rgba(), [255, 0, 255, 255]);
    }

    #[test]
    fn read_continuous_string() {
        let string = "P3 3 2 255 255 0 0   0 255 0   0 0 255 255 255 0  255 0 255  0 255 255";
        let image = parse_ppm_tokens(string).unwrap();
        assert_eq!(image.height(), 2);
    }

    #[test]
    fn read_newline_string() {
        let string = "P3\n# Example PPM image newlines\n3\n2\n255\n255\n0\n0\n0\n255\n0\n0\n0\n255\n255\n255\n0\n255\n0\n255\n0\n255\n255";
        let image = parse_ppm_tokens(string).unwrap();
        assert_eq!(image.height(), 2);
    }

    #[test]
    fn pixels_are_opaque_against_max_value() {
        let image = parse_ppm_tokens("P3 1 1 15 1 2 3").unwrap();
        let pixel = image.pixel(0, 0).unwrap();
        assert_eq!(pixel.rgba(), [1, 2, 3, 15]);
        assert_eq!(pixel.max_value(), 15);
    }

    #[test]
    fn wrong_header() {
        let result = parse_ppm_tokens("P6 1 1 255 0 0 0");
        assert!(matches!(result, Err(Error::UnexpectedToken { expected: "P3", .. })));
    }

    #[test]
    fn incomplete_pixel() {
        let result = parse_ppm_tokens("P3\n3 2 255 0 0 255 0 0");
        assert!(matches!(
            result,
            Err(Error::IncompletePixelParsed {
                expected: 3,
                found: 2
            })
        ));
    }

    #[test]
    fn wrong_size() {
        let result = parse_ppm_tokens("P3\n3 2 255 0 0 255");
        assert!(matches!(
            result,
            Err(Error::MismatchOfSizeBetweenHeaderAndValues {
                expected: 6,
                found: 1
            })
        ));
    }

    #[test]
    fn header_dimension_overflow() {
        let result = parse_ppm_tokens("P3 4294967296 4294967296 255 1 2 3");
        assert!(matches!(result, Err(Error::DimensionTooLarge { .. })));
    }

    #[test]
    fn large_header_with_few_pixels() {
        let result = parse_ppm_tokens("P3 100000 100000 255 1 2 3");
        assert!(matches!(
            result,
            Err(Error::MismatchOfSizeBetweenHeaderAndValues { found: 1, .. })
        ));
    }

    #[test]
    fn negative_width() {
        let result = parse_ppm_tokens("P3\n-3 2 255");
        assert!(matches!(result, Err(Error::NegativeDimension { value: -3, .. })));
    }

    #[test]
    fn component_above_max_value() {
        let result = parse_ppm_tokens("P3 1 1 100 101 0 0");
        assert!(matches!(result, Err(Error::ChannelValueOutOfRange { value: 101, .. })));
    }

    #[test]
    fn zero_width() {
        let result = parse_ppm_tokens("P3 0 2 255");
        assert!(matches!(result, Err(Error::InvalidDimension { width: 0, .. })));
    }
}
