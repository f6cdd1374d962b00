//! RGBA colors written as hex strings, used for sheet backgrounds.

use std::{fmt, str::FromStr};

use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parses `#RRGGBB` or `#RRGGBBAA`. The leading `#` is optional and a
    /// missing alpha channel means fully opaque.
    pub fn from_hex(value: &str) -> Result<Self, ColorError> {
        let digits = value.strip_prefix('#').unwrap_or(value);

        if !(digits.len() == 6 || digits.len() == 8) || !digits.is_ascii() {
            return Err(ColorError::InvalidLength {
                value: value.to_owned(),
            });
        }

        // from_str_radix alone would accept a leading '+'.
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidDigit {
                value: value.to_owned(),
            });
        }

        let channel = |index: usize| {
            u8::from_str_radix(&digits[index * 2..index * 2 + 2], 16).map_err(|_| {
                ColorError::InvalidDigit {
                    value: value.to_owned(),
                }
            })
        };

        let alpha = if digits.len() == 8 { channel(3)? } else { 255 };

        Ok(Color::new(channel(0)?, channel(1)?, channel(2)?, alpha))
    }

    /// Lowercase `#rrggbbaa`.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Color::from_hex(value)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = <String as Deserialize>::deserialize(deserializer)?;

        Color::from_hex(&value).map_err(D::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("color '{value}' must have 6 or 8 hex digits, like #112233 or #112233ff")]
    InvalidLength { value: String },

    #[error("color '{value}' contains characters that are not hex digits")]
    InvalidDigit { value: String },
}
