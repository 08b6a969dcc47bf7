//! Style attributes for drawable primitives
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// 24-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const GREY: Self = Self::rgb(128, 128, 128);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    pub const YELLOW: Self = Self::rgb(255, 255, 0);
    pub const CYAN: Self = Self::rgb(0, 255, 255);
    pub const MAGENTA: Self = Self::rgb(255, 0, 255);

    const NAMED: &'static [(&'static str, Color)] = &[
        ("black", Self::BLACK),
        ("white", Self::WHITE),
        ("grey", Self::GREY),
        ("gray", Self::GREY),
        ("red", Self::RED),
        ("green", Self::GREEN),
        ("blue", Self::BLUE),
        ("yellow", Self::YELLOW),
        ("cyan", Self::CYAN),
        ("magenta", Self::MAGENTA),
    ];

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Parses `"#rrggbb"` or one of the named colors.
impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::invalid_option("color", s);

        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() != 6 || !hex.is_ascii() {
                return Err(invalid());
            }
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
            return Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?));
        }

        let name = s.to_ascii_lowercase();
        Self::NAMED
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, c)| *c)
            .ok_or_else(invalid)
    }
}

/// Arrowhead decoration for line segments
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ArrowMode {
    #[default]
    None,
    First,
    Last,
    Both,
}

impl ArrowMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArrowMode::None => "none",
            ArrowMode::First => "first",
            ArrowMode::Last => "last",
            ArrowMode::Both => "both",
        }
    }

    pub fn at_first(&self) -> bool {
        matches!(self, ArrowMode::First | ArrowMode::Both)
    }

    pub fn at_last(&self) -> bool {
        matches!(self, ArrowMode::Last | ArrowMode::Both)
    }
}

impl fmt::Display for ArrowMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArrowMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "none" => Ok(ArrowMode::None),
            "first" => Ok(ArrowMode::First),
            "last" => Ok(ArrowMode::Last),
            "both" => Ok(ArrowMode::Both),
            other => Err(Error::invalid_option("arrow", other)),
        }
    }
}

/// Style for filled shapes: points, triangles and overlays
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeStyle {
    pub fill: Option<Color>,
    pub outline: Option<Color>,
    pub width: u32,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            fill: None,
            outline: Some(Color::BLACK),
            width: 1,
        }
    }
}

/// Style for line segments
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub color: Color,
    pub width: u32,
    pub arrow: ArrowMode,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1,
            arrow: ArrowMode::None,
        }
    }
}
