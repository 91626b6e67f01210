use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid dimension: height {height}, width {width} and max value {max_value} must all be positive")]
    InvalidDimension {
        height: usize,
        width: usize,
        max_value: u16,
    },
    #[error("Max channel value must be positive")]
    InvalidMaxValue,
    #[error("Invalid layer name '{0}': names must be non-empty and free of whitespace")]
    InvalidLayerName(String),
    #[error("Layer name '{0}' already exists")]
    DuplicateLayerName(String),
    #[error("Layer '{0}' not found")]
    LayerNotFound(String),
    #[error("Unknown filter '{0}'")]
    UnknownFilter(String),
    #[error("Channel value {value} exceeds max value {max_value}")]
    ChannelValueOutOfRange { value: u16, max_value: u16 },
    #[error("Layer '{name}' is {found_height}x{found_width}, but project is {expected_height}x{expected_width}")]
    LayerDimensionMismatch {
        name: String,
        expected_height: usize,
        expected_width: usize,
        found_height: usize,
        found_width: usize,
    },
    #[error("Expected {expected} pixels for the given dimension, but got {found}")]
    SizeOfPixelsDoesNotMatchDimension { expected: usize, found: usize },
    #[error("Project has no layers to render")]
    EmptyProject,
    #[error("Expected token '{token_name}' not found (line {line})")]
    RequiredTokenMissing { token_name: &'static str, line: usize },
    #[error("Unexpected token for '{token_name}' on line {line}: expected '{expected}', found '{found}'")]
    UnexpectedToken {
        token_name: &'static str,
        expected: &'static str,
        found: String,
        line: usize,
    },
    #[error("Parsing of token '{token_name}' failed on line {line}: found '{found}'")]
    ParsingOfTokenFailed {
        token_name: &'static str,
        found: String,
        line: usize,
    },
    #[error("Token '{token_name}' must not be negative, but was {value}")]
    NegativeDimension { token_name: &'static str, value: i64 },
    #[error("Header dimension {height}x{width} exceeds the addressable pixel count")]
    DimensionTooLarge { height: usize, width: usize },
    #[error("Incomplete pixel parsed. Expected {expected} components, but got {found}.")]
    IncompletePixelParsed { expected: usize, found: usize },
    #[error("Number of pixels ({found}) does not match the size provided in header ({expected})")]
    MismatchOfSizeBetweenHeaderAndValues { expected: usize, found: usize },
    #[error("Project file does not contain any layer")]
    ProjectWithoutLayers,
    #[error("Line {line} is not valid UTF-8")]
    InvalidUtf8 { line: usize },
    #[error("Input file '{}' not found", .0.display())]
    InputFileNotFound(PathBuf),
    #[error("Unable to open input file '{}' for reading: {}", .0.display(), .1)]
    UnableToOpenInputFileForReading(PathBuf, #[source] std::io::Error),
    #[error("Unable to open output file '{}' for writing: {}", .0.display(), .1)]
    UnableToOpenOutputFileForWriting(PathBuf, #[source] std::io::Error),
    #[error("Failed to read input: {0}")]
    FailedToReadInput(#[source] std::io::Error),
    #[error("Failed to write output: {0}")]
    FailedToWriteOutput(#[from] std::io::Error),
    #[error("File extension of '{}' is not supported", .0.display())]
    UnsupportedExtension(PathBuf),
    #[error("Image codec failed: {0}")]
    HostCodec(#[from] image::ImageError),
}

impl Error {
    /// true for the not-found class of failures
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::LayerNotFound(_) | Self::InputFileNotFound(_))
    }

    /// true when the content of a file could not be understood
    pub fn is_malformed_data(&self) -> bool {
        matches!(
            self,
            Self::RequiredTokenMissing { .. }
                | Self::UnexpectedToken { .. }
                | Self::ParsingOfTokenFailed { .. }
                | Self::NegativeDimension { .. }
                | Self::DimensionTooLarge { .. }
                | Self::IncompletePixelParsed { .. }
                | Self::MismatchOfSizeBetweenHeaderAndValues { .. }
                | Self::ProjectWithoutLayers
                | Self::InvalidUtf8 { .. }
        )
    }
}
