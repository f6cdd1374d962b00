//! Checks whether an algorithm can honor a set of settings before it runs.

use std::fmt;

use crate::settings::Settings;

/// What an algorithm is able to do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Supports {
    pub rotation: bool,
    pub cropping: bool,
    pub padding: bool,

    /// The algorithm can decide the length of an automatic sheet axis.
    pub auto_size: bool,

    /// Ignored unless `auto_size` is set.
    pub auto_square_size: bool,

    /// Ignored unless `auto_size` is set.
    pub auto_power_of_two_size: bool,
}

/// A reason why an algorithm can't be used with some settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Incompatibility {
    AutoSizeRequired,
    AutoSquareSizeRequired,
    AutoPowerOfTwoSizeRequired,
    RotationRequired,
    CroppingRequired,
    PaddingRequired,
}

impl fmt::Display for Incompatibility {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        let message = match self {
            Incompatibility::AutoSizeRequired => "automatic sheet size is not supported",
            Incompatibility::AutoSquareSizeRequired => {
                "automatic square sheet size is not supported"
            }
            Incompatibility::AutoPowerOfTwoSizeRequired => {
                "automatic power-of-two sheet size is not supported"
            }
            Incompatibility::RotationRequired => "sprite rotation is required but not supported",
            Incompatibility::CroppingRequired => "sprite cropping is required but not supported",
            Incompatibility::PaddingRequired => "sprite padding is required but not supported",
        };

        formatter.write_str(message)
    }
}

/// Something the caller allowed that the algorithm will not do. Packing still
/// works, it just won't take advantage of the option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Warning {
    RotationAllowed,
    CroppingAllowed,
}

impl fmt::Display for Warning {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Warning::RotationAllowed => {
                formatter.write_str("rotation is allowed but the algorithm never rotates sprites")
            }
            Warning::CroppingAllowed => {
                formatter.write_str("cropping is allowed but the algorithm never crops sprites")
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Compatibility {
    pub incompatibilities: Vec<Incompatibility>,
    pub warnings: Vec<Warning>,
}

impl Compatibility {
    #[inline]
    pub fn is_compatible(&self) -> bool {
        self.incompatibilities.is_empty()
    }
}

pub fn check_compatibility(supports: &Supports, settings: &Settings) -> Compatibility {
    let mut result = Compatibility::default();
    let require = &settings.require;
    let allow = &settings.allow;

    if settings.size.has_auto() {
        if !supports.auto_size {
            result
                .incompatibilities
                .push(Incompatibility::AutoSizeRequired);
        }

        if require.square_size && !supports.auto_square_size {
            result
                .incompatibilities
                .push(Incompatibility::AutoSquareSizeRequired);
        }

        if require.power_of_two_size && !supports.auto_power_of_two_size {
            result
                .incompatibilities
                .push(Incompatibility::AutoPowerOfTwoSizeRequired);
        }
    }

    if !supports.rotation {
        if require.rotation {
            result
                .incompatibilities
                .push(Incompatibility::RotationRequired);
        } else if allow.rotation {
            result.warnings.push(Warning::RotationAllowed);
        }
    }

    if !supports.cropping {
        if require.cropping {
            result
                .incompatibilities
                .push(Incompatibility::CroppingRequired);
        } else if allow.cropping {
            result.warnings.push(Warning::CroppingAllowed);
        }
    }

    let wants_padding = require.padding.map_or(false, |padding| padding > 0);
    if wants_padding && !supports.padding {
        result
            .incompatibilities
            .push(Incompatibility::PaddingRequired);
    }

    result
}
