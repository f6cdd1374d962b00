//! Agglopack is a small library for packing rectangles into sprite sheets. It
//! was built for Agglomerate, a tool that joins images into a single sheet
//! and describes where each of them ended up.
//!
//! The main algorithm, [`BinaryTreePacker`][BinaryTreePacker], places items
//! largest-first into a binary tree of free space and grows the sheet when
//! nothing fits. Sheet axes can be fixed or left for the algorithm to decide.
//!
//! ## Example
//! ```
//! use agglopack::{pack, AlgorithmKind, Item, Settings, Vector2};
//!
//! // Items are anything implementing Placeable. Item is the simplest one.
//! let mut items = vec![
//!     Item::new((128, 64)),
//!     Item::new((64, 64)),
//!     Item::new((1, 300)),
//! ];
//!
//! // Both sheet axes are automatic by default.
//! let settings = Settings::new(AlgorithmKind::BinaryTree);
//!
//! // Compatibility between the settings and the algorithm is checked before
//! // any item is placed.
//! let packed = pack(&mut items, &settings).unwrap();
//!
//! assert_eq!(items[2].position(), Some(Vector2::new(0, 0)));
//! assert_eq!(packed.size, Vector2::new(129, 300));
//! ```
//!
//! [BinaryTreePacker]: struct.BinaryTreePacker.html

mod algorithm;
mod binary_tree;
mod compat;
mod error;
mod geometry;
mod inline;
mod item;
mod settings;
pub mod tree;

pub use algorithm::*;
pub use binary_tree::*;
pub use compat::*;
pub use error::*;
pub use geometry::*;
pub use inline::*;
pub use item::*;
pub use settings::*;

/// The outcome of a successful call to [`pack`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packed {
    /// The resolved sheet size. Fixed axes are returned unchanged.
    pub size: Vector2,

    /// Options the settings allowed that the algorithm ignored.
    pub warnings: Vec<Warning>,
}

/// Packs `items` with the algorithm and constraints named in `settings`.
///
/// The settings are checked against the algorithm's capabilities first; any
/// incompatibility is returned as [`PackError::Incompatible`] before any item
/// is touched.
pub fn pack<P: Placeable>(items: &mut [P], settings: &Settings) -> Result<Packed, PackError> {
    let algorithm = settings.algorithm;
    let compatibility = check_compatibility(&algorithm.supports(), settings);

    if !compatibility.is_compatible() {
        return Err(PackError::Incompatible {
            algorithm,
            reasons: compatibility.incompatibilities,
        });
    }

    for warning in &compatibility.warnings {
        log::warn!("{}: {}", algorithm, warning);
    }

    let size = algorithm.pack(items, settings.size)?;

    Ok(Packed {
        size,
        warnings: compatibility.warnings,
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn incompatible_settings_touch_nothing() {
        let mut items = vec![Item::new((10, 10))];
        let mut settings = Settings::new(AlgorithmKind::BinaryTree);
        settings.require.square_size = true;

        let err = pack(&mut items, &settings).unwrap_err();

        assert_eq!(
            err,
            PackError::Incompatible {
                algorithm: AlgorithmKind::BinaryTree,
                reasons: vec![Incompatibility::AutoSquareSizeRequired],
            }
        );
        assert_eq!(items[0].position(), None);
    }

    #[test]
    fn warnings_are_returned() {
        let mut items = vec![Item::new((10, 10))];
        let mut settings = Settings::new(AlgorithmKind::Inline);
        settings.allow.rotation = true;

        let packed = pack(&mut items, &settings).unwrap();

        assert_eq!(packed.size, Vector2::new(10, 10));
        assert_eq!(packed.warnings, vec![Warning::RotationAllowed]);
    }

    #[test]
    fn error_messages() {
        let err = PackError::OutOfSpace {
            item: Vector2::new(40, 40),
            sheet: Vector2::new(32, 32),
        };
        assert_eq!(
            err.to_string(),
            "ran out of space: cannot fit an item of size 40x40 in a 32x32 sheet"
        );

        let err = PackError::Incompatible {
            algorithm: AlgorithmKind::BinaryTree,
            reasons: vec![
                Incompatibility::AutoSquareSizeRequired,
                Incompatibility::PaddingRequired,
            ],
        };
        assert_eq!(
            err.to_string(),
            "algorithm binarytree is incompatible with the given settings: \
             automatic square sheet size is not supported, \
             sprite padding is required but not supported"
        );
    }
}
