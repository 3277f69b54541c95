//! Color model - RGBA channels in unit range.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, Result};

/// An RGBA color with every channel in `[0, 1]`.
///
/// Serialized as a hex string (`#rrggbb`, or `#rrggbbaa` when not opaque);
/// deserialized from hex or from a named color such as `"orange"`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    red: f64,
    green: f64,
    blue: f64,
    alpha: f64,
}

impl Color {
    /// Fully transparent black. Used wherever no palette color exists.
    pub const CLEAR: Color = Color { red: 0.0, green: 0.0, blue: 0.0, alpha: 0.0 };
    /// Black
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    /// White
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    /// 50% gray
    pub const GRAY: Color = Color::rgb(0.5, 0.5, 0.5);
    /// Red
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    /// Green
    pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
    /// Blue
    pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);
    /// Cyan
    pub const CYAN: Color = Color::rgb(0.0, 1.0, 1.0);
    /// Yellow
    pub const YELLOW: Color = Color::rgb(1.0, 1.0, 0.0);
    /// Orange
    pub const ORANGE: Color = Color::rgb(1.0, 0.5, 0.0);
    /// Magenta
    pub const MAGENTA: Color = Color::rgb(1.0, 0.0, 1.0);
    /// Purple
    pub const PURPLE: Color = Color::rgb(0.5, 0.0, 0.5);
    /// Brown
    pub const BROWN: Color = Color::rgb(0.6, 0.4, 0.2);

    /// Create a color, rejecting channels that are not finite or not in `[0, 1]`.
    pub fn new(red: f64, green: f64, blue: f64, alpha: f64) -> Result<Self> {
        for (channel, value) in [("red", red), ("green", green), ("blue", blue), ("alpha", alpha)] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(CoreError::InvalidChannel { channel, value });
            }
        }
        Ok(Self { red, green, blue, alpha })
    }

    /// Opaque color from literal channels. Callers are responsible for the range.
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self { red, green, blue, alpha: 1.0 }
    }

    /// Opaque color from 8-bit channels.
    pub fn from_rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::rgb(red as f64 / 255.0, green as f64 / 255.0, blue as f64 / 255.0)
    }

    /// Red channel
    pub fn red(&self) -> f64 {
        self.red
    }

    /// Green channel
    pub fn green(&self) -> f64 {
        self.green
    }

    /// Blue channel
    pub fn blue(&self) -> f64 {
        self.blue
    }

    /// Alpha channel
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Whether the color is fully opaque.
    pub fn is_opaque(&self) -> bool {
        self.alpha >= 1.0
    }

    /// Linear blend toward `other`.
    ///
    /// `fraction` is clamped to `[0, 1]` (NaN counts as 0). The result is
    /// always opaque and every channel stays in range.
    pub fn mix(&self, other: &Color, fraction: f64) -> Color {
        let t = if fraction.is_nan() { 0.0 } else { fraction.clamp(0.0, 1.0) };
        let channel = |a: f64, b: f64| ((1.0 - t) * a + t * b).clamp(0.0, 1.0);
        Color {
            red: channel(self.red, other.red),
            green: channel(self.green, other.green),
            blue: channel(self.blue, other.blue),
            alpha: 1.0,
        }
    }

    /// 8-bit RGB triple, alpha dropped.
    pub fn to_rgb8(&self) -> (u8, u8, u8) {
        (to_u8(self.red), to_u8(self.green), to_u8(self.blue))
    }

    /// Look up a named color (case-insensitive).
    pub fn named(name: &str) -> Option<Color> {
        let color = match name.to_ascii_lowercase().as_str() {
            "clear" | "transparent" => Color::CLEAR,
            "black" => Color::BLACK,
            "white" => Color::WHITE,
            "gray" | "grey" => Color::GRAY,
            "red" => Color::RED,
            "green" => Color::GREEN,
            "blue" => Color::BLUE,
            "cyan" => Color::CYAN,
            "yellow" => Color::YELLOW,
            "orange" => Color::ORANGE,
            "magenta" => Color::MAGENTA,
            "purple" => Color::PURPLE,
            "brown" => Color::BROWN,
            _ => return None,
        };
        Some(color)
    }

    /// Parse `#rrggbb` / `#rrggbbaa` (leading `#` optional).
    pub fn from_hex(s: &str) -> Result<Self> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if !(digits.len() == 6 || digits.len() == 8) || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(CoreError::InvalidHex(s.to_string()));
        }

        let byte = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map(|v| v as f64 / 255.0)
                .map_err(|_| CoreError::InvalidHex(s.to_string()))
        };

        let alpha = if digits.len() == 8 { byte(6)? } else { 1.0 };
        Color::new(byte(0)?, byte(2)?, byte(4)?, alpha)
    }
}

fn to_u8(channel: f64) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl Default for Color {
    fn default() -> Self {
        Color::CLEAR
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, g, b) = self.to_rgb8();
        if self.is_opaque() {
            write!(f, "#{:02x}{:02x}{:02x}", r, g, b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", r, g, b, to_u8(self.alpha))
        }
    }
}

impl FromStr for Color {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if let Some(color) = Color::named(trimmed) {
            return Ok(color);
        }
        if trimmed.starts_with('#') || (trimmed.len() >= 6 && trimmed.chars().all(|c| c.is_ascii_hexdigit())) {
            return Color::from_hex(trimmed);
        }
        Err(CoreError::UnknownColor(trimmed.to_string()))
    }
}

impl TryFrom<String> for Color {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}
