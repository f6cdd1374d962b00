//! Coordinates file formats, describing where each sprite ended up.

use std::{fmt, str::FromStr};

use agglopack::Allow;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sprite::PlacedSprite;

/// What a coordinates format is able to describe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatSupports {
    pub rotation: bool,
    pub cropping: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatKind {
    /// A JSON array with the name, position, size and rotation of every
    /// sprite.
    SimpleJson,
}

impl FormatKind {
    pub const ALL: &'static [FormatKind] = &[FormatKind::SimpleJson];

    pub fn name(self) -> &'static str {
        match self {
            FormatKind::SimpleJson => "simplejson",
        }
    }

    pub fn supports(self) -> FormatSupports {
        match self {
            FormatKind::SimpleJson => FormatSupports {
                rotation: true,
                cropping: false,
            },
        }
    }

    /// The extension given to coordinates files that were named without one.
    pub fn suggested_extension(self) -> &'static str {
        match self {
            FormatKind::SimpleJson => "json",
        }
    }

    pub fn generate(self, sprites: &[PlacedSprite]) -> Result<String, serde_json::Error> {
        match self {
            FormatKind::SimpleJson => simple_json(sprites),
        }
    }
}

impl Default for FormatKind {
    fn default() -> Self {
        FormatKind::SimpleJson
    }
}

impl fmt::Display for FormatKind {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

impl FromStr for FormatKind {
    type Err = UnknownFormat;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        FormatKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == value)
            .ok_or_else(|| UnknownFormat {
                name: value.to_owned(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown format named '{name}'")]
pub struct UnknownFormat {
    pub name: String,
}

/// A reason why a format can't describe the sheets some settings may produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum FormatIncompatibility {
    #[error("rotation is allowed but the format can't describe rotated sprites")]
    RotationAllowed,

    #[error("cropping is allowed but the format can't describe cropped sprites")]
    CroppingAllowed,
}

pub fn check_compatibility(supports: &FormatSupports, allow: &Allow) -> Vec<FormatIncompatibility> {
    let mut incompatibilities = Vec::new();

    if allow.rotation && !supports.rotation {
        incompatibilities.push(FormatIncompatibility::RotationAllowed);
    }

    if allow.cropping && !supports.cropping {
        incompatibilities.push(FormatIncompatibility::CroppingAllowed);
    }

    incompatibilities
}

#[derive(Debug, Serialize)]
struct SimpleJsonSprite<'a> {
    name: &'a str,
    x: u32,
    y: u32,
    w: u32,
    h: u32,
    rotated: bool,
}

fn simple_json(sprites: &[PlacedSprite]) -> Result<String, serde_json::Error> {
    let entries: Vec<_> = sprites
        .iter()
        .map(|placed| SimpleJsonSprite {
            name: &placed.sprite.name,
            x: placed.position.x,
            y: placed.position.y,
            w: placed.size.x,
            h: placed.size.y,
            rotated: placed.rotated,
        })
        .collect();

    let mut output = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut output, formatter);
    entries.serialize(&mut serializer)?;

    // serde_json only ever writes valid UTF-8.
    Ok(String::from_utf8_lossy(&output).into_owned())
}

#[cfg(test)]
mod test {
    use super::*;

    use agglopack::Vector2;

    use crate::{color::Color, image::Image, sprite::Sprite};

    fn sprite(name: &str, size: (u32, u32)) -> Sprite {
        Sprite::new(name.to_owned(), Image::new_filled(size, Color::TRANSPARENT))
    }

    #[test]
    fn names() {
        assert_eq!("simplejson".parse::<FormatKind>(), Ok(FormatKind::SimpleJson));
        assert_eq!(FormatKind::SimpleJson.to_string(), "simplejson");
        assert_eq!(
            "xml".parse::<FormatKind>(),
            Err(UnknownFormat {
                name: "xml".to_owned()
            })
        );
    }

    #[test]
    fn cropping_is_incompatible() {
        let supports = FormatKind::SimpleJson.supports();

        let allow = Allow {
            rotation: true,
            cropping: false,
        };
        assert!(check_compatibility(&supports, &allow).is_empty());

        let allow = Allow {
            rotation: true,
            cropping: true,
        };
        assert_eq!(
            check_compatibility(&supports, &allow),
            vec![FormatIncompatibility::CroppingAllowed]
        );
    }

    #[test]
    fn simple_json_output() {
        let first = sprite("a.png", (10, 12));
        let second = sprite("b.png", (3, 4));

        let placed = vec![
            PlacedSprite {
                sprite: &first,
                position: Vector2::new(0, 0),
                size: Vector2::new(10, 12),
                rotated: false,
            },
            PlacedSprite {
                sprite: &second,
                position: Vector2::new(10, 0),
                size: Vector2::new(3, 4),
                rotated: false,
            },
        ];

        let output = FormatKind::SimpleJson.generate(&placed).unwrap();

        insta::assert_snapshot!(output, @r###"
        [
            {
                "name": "a.png",
                "x": 0,
                "y": 0,
                "w": 10,
                "h": 12,
                "rotated": false
            },
            {
                "name": "b.png",
                "x": 10,
                "y": 0,
                "w": 3,
                "h": 4,
                "rotated": false
            }
        ]
        "###);
    }

    #[test]
    fn simple_json_empty() {
        assert_eq!(FormatKind::SimpleJson.generate(&[]).unwrap(), "[]");
    }
}
