use crate::error::Error;
use std::str::FromStr;

/// When to colour the console report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// Colour when stdout is a terminal.
    Auto,
    Always,
    Never,
}

impl Color {
    pub const VALUES: [&'static str; 3] = ["auto", "always", "never"];

    pub fn enabled(self) -> bool {
        match self {
            Color::Auto => atty::is(atty::Stream::Stdout),
            Color::Always => true,
            Color::Never => false,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::Auto
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(Self::Auto),
            "always" => Ok(Self::Always),
            "never" => Ok(Self::Never),
            invalid => Err(Error::InvalidInput {
                arg: "--color",
                value: invalid.to_owned(),
            }),
        }
    }
}
