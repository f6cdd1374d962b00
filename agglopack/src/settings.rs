use std::fmt;

use serde::{
    de::{self, Visitor},
    Deserialize, Deserializer, Serialize, Serializer,
};

use crate::{algorithm::AlgorithmKind, geometry::Vector2};

static AUTO: &str = "auto";

/// The requested length of one sheet axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Fixed(u32),

    /// The algorithm decides the length of this axis while packing.
    Auto,
}

impl Dimension {
    #[inline]
    pub fn is_auto(self) -> bool {
        self == Dimension::Auto
    }

    /// The fixed length, or `fallback` if this axis is automatic.
    #[inline]
    pub fn fixed_or(self, fallback: u32) -> u32 {
        match self {
            Dimension::Fixed(value) => value,
            Dimension::Auto => fallback,
        }
    }
}

impl Default for Dimension {
    fn default() -> Self {
        Dimension::Auto
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Dimension::Fixed(value) => write!(formatter, "{}", value),
            Dimension::Auto => formatter.write_str(AUTO),
        }
    }
}

impl Serialize for Dimension {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Dimension::Fixed(value) => serializer.serialize_u32(*value),
            Dimension::Auto => serializer.serialize_str(AUTO),
        }
    }
}

impl<'de> Deserialize<'de> for Dimension {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DimensionVisitor;

        impl<'de> Visitor<'de> for DimensionVisitor {
            type Value = Dimension;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a non-negative integer or \"auto\"")
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<Dimension, E> {
                if value > u64::from(u32::MAX) {
                    return Err(E::invalid_value(de::Unexpected::Unsigned(value), &self));
                }

                Ok(Dimension::Fixed(value as u32))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<Dimension, E> {
                if value < 0 {
                    return Err(E::invalid_value(de::Unexpected::Signed(value), &self));
                }

                self.visit_u64(value as u64)
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Dimension, E> {
                if value == AUTO {
                    Ok(Dimension::Auto)
                } else {
                    Err(E::invalid_value(de::Unexpected::Str(value), &self))
                }
            }
        }

        deserializer.deserialize_any(DimensionVisitor)
    }
}

/// The requested size of a sheet, where each axis may be fixed or automatic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SheetSize {
    #[serde(rename = "x")]
    pub width: Dimension,

    #[serde(rename = "y")]
    pub height: Dimension,
}

impl SheetSize {
    pub fn new(width: Dimension, height: Dimension) -> Self {
        Self { width, height }
    }

    pub fn auto() -> Self {
        Self::new(Dimension::Auto, Dimension::Auto)
    }

    pub fn fixed(width: u32, height: u32) -> Self {
        Self::new(Dimension::Fixed(width), Dimension::Fixed(height))
    }

    pub fn has_auto(&self) -> bool {
        self.width.is_auto() || self.height.is_auto()
    }

    /// Replaces each automatic axis with the matching component of
    /// `fallback`.
    pub fn resolve_with(&self, fallback: Vector2) -> Vector2 {
        Vector2::new(
            self.width.fixed_or(fallback.x),
            self.height.fixed_or(fallback.y),
        )
    }
}

impl From<Vector2> for SheetSize {
    fn from(size: Vector2) -> Self {
        SheetSize::fixed(size.x, size.y)
    }
}

impl fmt::Display for SheetSize {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "{}x{}", self.width, self.height)
    }
}

/// Options the caller is fine with an algorithm using, but doesn't insist on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Allow {
    /// Sprites may be rotated 90 degrees clockwise.
    pub rotation: bool,

    /// Transparent borders of sprites may be cropped away.
    pub cropping: bool,
}

/// Options the caller insists on. An algorithm that can't honor one of these
/// is incompatible with the settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Require {
    pub rotation: bool,
    pub cropping: bool,

    /// Automatically sized sheets must be square.
    pub square_size: bool,

    /// Automatically sized sheets must have power-of-two dimensions.
    pub power_of_two_size: bool,

    /// Padding in pixels around every sprite.
    pub padding: Option<u32>,
}

/// Everything an algorithm needs to know about the sheet or group it packs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub algorithm: AlgorithmKind,

    #[serde(default)]
    pub allow: Allow,

    #[serde(default)]
    pub require: Require,

    #[serde(default)]
    pub size: SheetSize,
}

impl Settings {
    pub fn new(algorithm: AlgorithmKind) -> Self {
        Self {
            algorithm,
            ..Default::default()
        }
    }

    pub fn with_size(self, size: SheetSize) -> Self {
        Self { size, ..self }
    }
}
