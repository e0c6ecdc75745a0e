//! Colors as handed over by the UI, and their numeric form.
//!
//! A [`Color`] is kept exactly as the caller wrote it and passed through to
//! the renderer untouched. Only the gradient path needs numeric channels, and
//! it asks for them through [`Color::to_rgb`].

use std::fmt;

use nom::{
    branch::alt,
    bytes::complete::{tag, tag_no_case, take_while_m_n},
    character::complete::{char, space0},
    combinator::{all_consuming, map, map_res, opt},
    number::complete::double,
    sequence::{delimited, preceded, tuple},
    IResult,
};
use serde::{Deserialize, Serialize};

use crate::error::ColorError;

/// Face color outside the selection box
pub const DEFAULT_BASE_COLOR: &str = "rgb(207,181,59)";
/// Face color inside the selection box
pub const DEFAULT_HIGHLIGHT_COLOR: &str = "rgb(1, 0, 79)";
/// Gradient color at the intensity floor
pub const DEFAULT_LOW_COLOR: &str = "rgb(0, 0, 255)";
/// Gradient color at the highest vertex
pub const DEFAULT_HIGH_COLOR: &str = "rgb(255, 255, 255)";
/// Wireframe overlay line color
pub const WIREFRAME_COLOR: &str = "rgb(70,70,70)";

/// An opaque color string
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse the color into channels.
    ///
    /// Accepts `rgb(r, g, b)`, `rgba(r, g, b, a)` (alpha dropped),
    /// `#rrggbb` and `#rgb`.
    pub fn to_rgb(&self) -> Result<Rgb, ColorError> {
        let input = self.0.trim();
        let (_, rgb) = all_consuming(alt((rgb_function, hex_color)))(input).map_err(|_| {
            ColorError::Unparseable {
                input: self.0.clone(),
            }
        })?;

        for value in [rgb.r, rgb.g, rgb.b] {
            if !(0.0..=255.0).contains(&value) {
                return Err(ColorError::ChannelOutOfRange {
                    input: self.0.clone(),
                    value,
                });
            }
        }

        Ok(rgb)
    }
}

impl From<&str> for Color {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Color {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Self(rgb.to_string())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Numeric color, channels in `[0, 255]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Linear interpolation, `t = 0` gives `self` and `t = 1` gives `other`
    pub fn lerp(&self, other: &Rgb, t: f64) -> Rgb {
        Rgb {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rgb({}, {}, {})",
            self.r.round() as u8,
            self.g.round() as u8,
            self.b.round() as u8
        )
    }
}

fn rgb_function(input: &str) -> IResult<&str, Rgb> {
    // rgba must be tried first, otherwise "rgb" matches its prefix
    let (input, _) = alt((tag_no_case("rgba"), tag_no_case("rgb")))(input)?;
    let (input, _) = preceded(space0, char('('))(input)?;
    let (input, r) = delimited(space0, double, space0)(input)?;
    let (input, g) = preceded(char(','), delimited(space0, double, space0))(input)?;
    let (input, b) = preceded(char(','), delimited(space0, double, space0))(input)?;
    let (input, _alpha) = opt(preceded(char(','), delimited(space0, double, space0)))(input)?;
    let (input, _) = char(')')(input)?;
    Ok((input, Rgb::new(r, g, b)))
}

fn hex_color(input: &str) -> IResult<&str, Rgb> {
    preceded(tag("#"), alt((hex_long, hex_short)))(input)
}

fn hex_long(input: &str) -> IResult<&str, Rgb> {
    map(tuple((hex_pair, hex_pair, hex_pair)), |(r, g, b)| {
        Rgb::new(r as f64, g as f64, b as f64)
    })(input)
}

fn hex_short(input: &str) -> IResult<&str, Rgb> {
    // #abc is shorthand for #aabbcc
    map(tuple((hex_digit, hex_digit, hex_digit)), |(r, g, b)| {
        Rgb::new((r * 17) as f64, (g * 17) as f64, (b * 17) as f64)
    })(input)
}

fn hex_pair(input: &str) -> IResult<&str, u8> {
    map_res(take_while_m_n(2, 2, |c: char| c.is_ascii_hexdigit()), |s| {
        u8::from_str_radix(s, 16)
    })(input)
}

fn hex_digit(input: &str) -> IResult<&str, u8> {
    map_res(take_while_m_n(1, 1, |c: char| c.is_ascii_hexdigit()), |s| {
        u8::from_str_radix(s, 16)
    })(input)
}
