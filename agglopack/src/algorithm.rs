use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    binary_tree::BinaryTreePacker,
    compat::Supports,
    error::{Axis, MalformedInput, PackError, UnknownAlgorithm},
    geometry::Vector2,
    inline::InlinePacker,
    item::Placeable,
    settings::{Dimension, SheetSize},
};

/// A packing strategy.
///
/// Implementations write a position into every item and return the resolved
/// sheet size, with every automatic axis decided.
pub trait Algorithm {
    fn supports(&self) -> Supports;

    fn pack<P: Placeable>(&self, items: &mut [P], size: SheetSize) -> Result<Vector2, PackError>;
}

/// Every algorithm this crate knows about, addressable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlgorithmKind {
    /// Largest-first placement into a growing binary tree of free space. See
    /// [`BinaryTreePacker`].
    BinaryTree,

    /// Places items left to right in a single row. See [`InlinePacker`].
    Inline,
}

impl AlgorithmKind {
    pub const ALL: &'static [AlgorithmKind] = &[AlgorithmKind::BinaryTree, AlgorithmKind::Inline];

    pub fn name(self) -> &'static str {
        match self {
            AlgorithmKind::BinaryTree => "binarytree",
            AlgorithmKind::Inline => "inline",
        }
    }

    pub fn supports(self) -> Supports {
        match self {
            AlgorithmKind::BinaryTree => BinaryTreePacker.supports(),
            AlgorithmKind::Inline => InlinePacker.supports(),
        }
    }

    pub fn pack<P: Placeable>(
        self,
        items: &mut [P],
        size: SheetSize,
    ) -> Result<Vector2, PackError> {
        match self {
            AlgorithmKind::BinaryTree => BinaryTreePacker.pack(items, size),
            AlgorithmKind::Inline => InlinePacker.pack(items, size),
        }
    }
}

impl Default for AlgorithmKind {
    fn default() -> Self {
        AlgorithmKind::BinaryTree
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

impl FromStr for AlgorithmKind {
    type Err = UnknownAlgorithm;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        AlgorithmKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == value)
            .ok_or_else(|| UnknownAlgorithm {
                name: value.to_owned(),
            })
    }
}

/// Rejects items and sheet sizes that no algorithm can make sense of.
pub(crate) fn validate_input<P: Placeable>(
    items: &[P],
    size: SheetSize,
) -> Result<(), MalformedInput> {
    if size.width == Dimension::Fixed(0) {
        return Err(MalformedInput::ZeroSizedSheet { axis: Axis::Width });
    }

    if size.height == Dimension::Fixed(0) {
        return Err(MalformedInput::ZeroSizedSheet { axis: Axis::Height });
    }

    for (index, item) in items.iter().enumerate() {
        let item_size = item.size();

        if item_size.is_degenerate() {
            return Err(MalformedInput::ZeroSizedItem {
                index,
                size: item_size,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::item::Item;

    #[test]
    fn names_round_trip() {
        for kind in AlgorithmKind::ALL {
            assert_eq!(kind.name().parse::<AlgorithmKind>(), Ok(*kind));
        }
    }

    #[test]
    fn unknown_name() {
        let err = "maxrects".parse::<AlgorithmKind>().unwrap_err();
        assert_eq!(err.name, "maxrects");
    }

    #[test]
    fn serde_uses_names() {
        let encoded = serde_json::to_string(&AlgorithmKind::BinaryTree).unwrap();
        assert_eq!(encoded, r#""binarytree""#);

        let decoded: AlgorithmKind = serde_json::from_str(r#""inline""#).unwrap();
        assert_eq!(decoded, AlgorithmKind::Inline);
    }

    #[test]
    fn capabilities() {
        let supports = AlgorithmKind::BinaryTree.supports();

        assert!(supports.auto_size);
        assert!(!supports.rotation);
        assert!(!supports.cropping);
        assert!(!supports.auto_square_size);
        assert!(!supports.auto_power_of_two_size);
    }

    #[test]
    fn zero_sized_items_are_rejected() {
        let items = [Item::new((4, 4)), Item::new((0, 4))];

        assert_eq!(
            validate_input(&items, SheetSize::auto()),
            Err(MalformedInput::ZeroSizedItem {
                index: 1,
                size: Vector2::new(0, 4),
            })
        );
    }

    #[test]
    fn zero_sized_sheets_are_rejected() {
        let items = [Item::new((4, 4))];
        let size = SheetSize::new(Dimension::Auto, Dimension::Fixed(0));

        assert_eq!(
            validate_input(&items, size),
            Err(MalformedInput::ZeroSizedSheet { axis: Axis::Height })
        );
    }
}
