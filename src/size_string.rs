use agglopack::{Dimension, SheetSize};
use regex::Regex;
use thiserror::Error;

/// Parses a sheet size given on the command line.
///
/// Examples of accepted sizes:
///
/// - 400x500 (both axes fixed)
/// - 400x (fixed width, automatic height)
/// - x500 (automatic width, fixed height)
/// - auto (both axes automatic)
pub fn parse_size(value: &str) -> Result<SheetSize, SizeParseError> {
    lazy_static::lazy_static! {
        static ref SIZE_PATTERN: Regex = Regex::new(r"^([0-9]*)x([0-9]*)$").unwrap();
    }

    if value == "auto" {
        return Ok(SheetSize::auto());
    }

    let captures = SIZE_PATTERN
        .captures(value)
        .ok_or_else(|| SizeParseError::InvalidSyntax {
            value: value.to_owned(),
        })?;

    let dimension = |index: usize| -> Result<Dimension, SizeParseError> {
        let digits = captures.get(index).map_or("", |digits| digits.as_str());

        if digits.is_empty() {
            return Ok(Dimension::Auto);
        }

        digits
            .parse()
            .map(Dimension::Fixed)
            .map_err(|_| SizeParseError::TooLarge {
                value: value.to_owned(),
            })
    };

    Ok(SheetSize::new(dimension(1)?, dimension(2)?))
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SizeParseError {
    #[error("invalid size '{value}', expected something like 400x500, 400x, x500 or auto")]
    InvalidSyntax { value: String },

    #[error("size '{value}' is too large")]
    TooLarge { value: String },
}
