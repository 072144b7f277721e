use crate::slider::geometry::Dimensions;
use palette::Srgba;
use serde_with::DeserializeFromStr;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    #[error("Invalid hex digits in color '{0}'")]
    InvalidDigits(String),
    #[error("Color '{0}' must have 3, 6 or 8 hex digits")]
    InvalidLength(String),
}

/// Stand-in for a color that could not be read: red and green at 1/255, alpha 1/255.
pub const FALLBACK_COLOR: Srgba<f64> = Srgba::new(1.0 / 255.0, 1.0 / 255.0, 0.0, 1.0 / 255.0);

/// A color written as `#RGB`, `#RRGGBB` or `#AARRGGBB`.
///
/// Parsing through [`FromStr`] never fails; anything unreadable becomes
/// [`FALLBACK_COLOR`]. Use [`HexColor::parse`] to see why a string was rejected.
#[derive(Debug, Clone, Copy, PartialEq, DeserializeFromStr)]
pub struct HexColor(pub Srgba<f64>);

impl HexColor {
    pub fn parse(s: &str) -> Result<Self, ColorError> {
        let hex = s.trim_matches(|c: char| !c.is_ascii_alphanumeric());
        let digits = |hex: &str| {
            u32::from_str_radix(hex, 16).map_err(|_| ColorError::InvalidDigits(s.into()))
        };

        let (a, r, g, b) = match hex.len() {
            3 => {
                let int = digits(hex)?;
                (
                    255,
                    (int >> 8 & 0xF) * 17,
                    (int >> 4 & 0xF) * 17,
                    (int & 0xF) * 17,
                )
            }
            6 => {
                let int = digits(hex)?;
                (255, int >> 16 & 0xFF, int >> 8 & 0xFF, int & 0xFF)
            }
            8 => {
                let int = digits(hex)?;
                (int >> 24, int >> 16 & 0xFF, int >> 8 & 0xFF, int & 0xFF)
            }
            _ => return Err(ColorError::InvalidLength(s.into())),
        };

        let channel = |v: u32| v as f64 / 255.0;
        Ok(Self(Srgba::new(channel(r), channel(g), channel(b), channel(a))))
    }
}

impl FromStr for HexColor {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s).unwrap_or_else(|e| {
            log::warn!("{}, using fallback color", e);
            Self(FALLBACK_COLOR)
        }))
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, g, b, a) = self.0.into_format::<u8, u8>().into_components();
        write!(f, "#{a:02X}{r:02X}{g:02X}{b:02X}")
    }
}

impl From<HexColor> for Srgba<f64> {
    fn from(color: HexColor) -> Self {
        color.0
    }
}

impl From<&str> for HexColor {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(color) => color,
            Err(never) => match never {},
        }
    }
}

pub fn hex(s: &str) -> Srgba<f64> {
    HexColor::from(s).0
}

pub const PINK: &str = "#FF2D55";
pub const MINT: &str = "#00C7BE";
pub const WHITE: &str = "#FFFFFF";
pub const GREEN: &str = "#34C759";
pub const TRACK_BACKGROUND: &str = "#F3FBFF";
pub const PROGRESS_TEXT: &str = "#3C37CC";
pub const TEXT: &str = "#1B1B1B";
pub const CIRCLE_BACKGROUND: [&str; 2] = ["#E5EAFF", "#A1A9D1"];

/// Presentation of the slider. Pure data, no invariants beyond non-negative sizes.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub dimensions: Dimensions,
    /// Progress gradient stops, drawn from the maximum end towards the minimum end.
    pub slider_colors: Vec<Srgba<f64>>,
    pub track_color: Srgba<f64>,
    pub thumb_color: Srgba<f64>,
    pub thumb_dot_color: Srgba<f64>,
    pub progress_text_color: Srgba<f64>,
    pub circle_background_colors: Vec<Srgba<f64>>,
    /// Caption shown above the value by [`crate::gui::view::value_readout`].
    pub text: String,
    pub text_color: Srgba<f64>,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            dimensions: Dimensions::default(),
            slider_colors: [PINK, MINT, PINK, WHITE].into_iter().map(hex).collect(),
            track_color: hex(TRACK_BACKGROUND),
            thumb_color: hex(GREEN),
            thumb_dot_color: hex(WHITE),
            progress_text_color: hex(PROGRESS_TEXT),
            circle_background_colors: CIRCLE_BACKGROUND.into_iter().map(hex).collect(),
            text: String::new(),
            text_color: hex(TEXT),
        }
    }
}

impl Style {
    /// Stops for the progress gradient, evenly spaced from the left end to the right end.
    pub fn gradient_stops(&self) -> Vec<(f64, Srgba<f64>)> {
        let colors: Vec<_> = self.slider_colors.iter().rev().copied().collect();
        match colors.len() {
            0 => vec![(0.0, self.track_color)],
            1 => vec![(0.0, colors[0])],
            n => colors
                .into_iter()
                .enumerate()
                .map(|(i, c)| (i as f64 / (n - 1) as f64, c))
                .collect(),
        }
    }
}
