use std::io::BufRead;

use super::tokenizer::{Token, TokenStream, Tokenizer};
use super::Dot;
use crate::error::Error;
use crate::filter::Filter;
use crate::image::PixelBuffer;
use crate::layer::Layer;
use crate::pixel::Pixel;
use crate::position::Position;
use crate::project::Project;
use crate::Result;

pub const C1_HEADER: &str = "C1";

const C1_HEADER_TOKEN_NAME: &str = "C1 Header";
const WIDTH_HEADER_TOKEN_NAME: &str = "Width Header";
const HEIGHT_HEADER_TOKEN_NAME: &str = "Height Header";
const MAX_VALUE_HEADER_TOKEN_NAME: &str = "Max Value Header";
const FILTER_NAME_TOKEN_NAME: &str = "Filter Name";
const COLOR_COMPONENT_VALUE_TOKEN_NAME: &str = "Color Component Value";

/// reads `C1` project files back into a project
///
/// layer canvases are taken over verbatim, they hold the filtered state
/// written by the project writer
pub struct ProjectReader<R: BufRead> {
    reader: R,
}

impl<R: BufRead> ProjectReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    pub fn read_project(&mut self) -> Result<Project> {
        let tokenizer = Tokenizer::new(&mut self.reader);
        ProjectParser::new(TokenStream::new(tokenizer)).parse_tokens()
    }
}

struct ProjectParser<I> {
    tokens: TokenStream<I>,
}

impl<I> ProjectParser<I>
where
    I: Iterator<Item = Result<Token>>,
{
    fn new(tokens: TokenStream<I>) -> Self {
        Self { tokens }
    }

    fn parse_tokens(&mut self) -> Result<Project> {
        self.tokens.expect_literal(C1_HEADER_TOKEN_NAME, C1_HEADER)?;
        let width = self.tokens.parse_dimension(WIDTH_HEADER_TOKEN_NAME)?;
        let height = self.tokens.parse_dimension(HEIGHT_HEADER_TOKEN_NAME)?;
        let max_value = self.tokens.parse_max_value(MAX_VALUE_HEADER_TOKEN_NAME)?;

        let expected = height
            .checked_mul(width)
            .ok_or(Error::DimensionTooLarge { height, width })?;

        let mut layers = Vec::new();
        while let Some(name) = self.tokens.next_token()? {
            layers.push(self.parse_layer(name, height, width, expected, max_value)?);
        }

        if layers.is_empty() {
            return Err(Error::ProjectWithoutLayers);
        }
        log::debug!("Parsed project with {} layers", layers.len());
        Project::from_layers(height, width, max_value, layers)
    }

    fn parse_layer(
        &mut self,
        name: Token,
        height: usize,
        width: usize,
        expected: usize,
        max_value: u16,
    ) -> Result<Layer> {
        let filter: Filter = self.tokens.expect_token(FILTER_NAME_TOKEN_NAME)?.text.parse()?;
        let pixels = self.parse_dots(expected, max_value)?;
        let canvas = PixelBuffer::new(height, width, pixels)?;
        Layer::with_canvas(name.text, filter, max_value, canvas)
    }

    fn parse_dots(&mut self, expected: usize, max_value: u16) -> Result<Vec<Pixel>> {
        let mut current_dot = Dot::<4>::new();
        // grows with the data actually present, the header alone is not trusted
        let mut pixels = Vec::new();
        while pixels.len() < expected {
            let component = match self.tokens.next_component(COLOR_COMPONENT_VALUE_TOKEN_NAME)? {
                Some(component) => component,
                None if current_dot.is_empty() => {
                    return Err(Error::MismatchOfSizeBetweenHeaderAndValues {
                        expected,
                        found: pixels.len(),
                    })
                }
                None => {
                    return Err(Error::IncompletePixelParsed {
                        expected: 4,
                        found: current_dot.index,
                    })
                }
            };
            current_dot.push_color_component(component);
            if current_dot.is_complete() {
                pixels.push(Pixel::new(
                    current_dot.component(0),
                    current_dot.component(1),
                    current_dot.component(2),
                    current_dot.component(3),
                    max_value,
                    Position::ORIGIN,
                )?);
                current_dot.reset();
            }
        }
        Ok(pixels)
    }
}
