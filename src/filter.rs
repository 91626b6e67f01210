use std::fmt::Display;
use std::str::FromStr;

use clap::builder::PossibleValue;
use clap::ValueEnum;

use crate::error::Error;
use crate::pixel::{Channel, Pixel};

/// per layer pixel transform, evaluated against the composite beneath the layer
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Filter {
    #[default]
    Normal,
    RedComponent,
    GreenComponent,
    BlueComponent,
    Darken,
    Brighten,
    Invert,
}

const NORMAL_IDENTIFIER: &str = "normal";
const RED_COMPONENT_IDENTIFIER: &str = "red-component";
const GREEN_COMPONENT_IDENTIFIER: &str = "green-component";
const BLUE_COMPONENT_IDENTIFIER: &str = "blue-component";
const DARKEN_IDENTIFIER: &str = "darken";
const BRIGHTEN_IDENTIFIER: &str = "brighten";
const INVERT_IDENTIFIER: &str = "invert";

impl Filter {
    pub const ALL: [Filter; 7] = [
        Filter::Normal,
        Filter::RedComponent,
        Filter::GreenComponent,
        Filter::BlueComponent,
        Filter::Darken,
        Filter::Brighten,
        Filter::Invert,
    ];

    /// the literal name used in project files and on the command line
    pub fn identifier(&self) -> &'static str {
        match self {
            Self::Normal => NORMAL_IDENTIFIER,
            Self::RedComponent => RED_COMPONENT_IDENTIFIER,
            Self::GreenComponent => GREEN_COMPONENT_IDENTIFIER,
            Self::BlueComponent => BLUE_COMPONENT_IDENTIFIER,
            Self::Darken => DARKEN_IDENTIFIER,
            Self::Brighten => BRIGHTEN_IDENTIFIER,
            Self::Invert => INVERT_IDENTIFIER,
        }
    }

    /// apply the filter to `current`, `backdrop` is the composited pixel below
    ///
    /// filters that blend with the backdrop fall back to identity without one
    pub fn apply(&self, current: &Pixel, backdrop: Option<&Pixel>) -> Pixel {
        match (self, backdrop) {
            (Self::Normal, _) => *current,
            (Self::RedComponent, _) => current.isolate(Channel::Red),
            (Self::GreenComponent, _) => current.isolate(Channel::Green),
            (Self::BlueComponent, _) => current.isolate(Channel::Blue),
            (Self::Darken, Some(backdrop)) => current.darken(backdrop),
            (Self::Brighten, Some(backdrop)) => current.brighten(backdrop),
            (Self::Invert, Some(backdrop)) => current.invert(backdrop),
            (Self::Darken | Self::Brighten | Self::Invert, None) => *current,
        }
    }
}

impl FromStr for Filter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|filter| filter.identifier().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownFilter(s.to_owned()))
    }
}

impl Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.identifier())
    }
}

impl ValueEnum for Filter {
    fn value_variants<'a>() -> &'a [Self] {
        &Self::ALL
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(PossibleValue::new(self.identifier()))
    }
}
