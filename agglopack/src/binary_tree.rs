use std::cmp::Reverse;

use crate::{
    algorithm::{validate_input, Algorithm},
    compat::Supports,
    error::PackError,
    geometry::Vector2,
    item::Placeable,
    settings::SheetSize,
    tree::{FreeSpaceTree, NodeId},
};

/// Packs items largest-first into a binary tree of free space, growing the
/// sheet whenever nothing fits.
///
/// Items are visited in descending order of their longest side. Each item
/// goes into the first free rectangle the tree yields, and that rectangle is
/// split into what's left to its right and below it. When no free rectangle
/// is large enough, the sheet grows along one of its automatic axes, choosing
/// the direction that keeps it closest to a square.
///
/// Based on <http://codeincomplete.com/posts/2011/5/7/bin_packing/>.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryTreePacker;

impl Algorithm for BinaryTreePacker {
    fn supports(&self) -> Supports {
        Supports {
            rotation: false,
            cropping: false,
            padding: false,
            auto_size: true,
            auto_square_size: false,
            auto_power_of_two_size: false,
        }
    }

    fn pack<P: Placeable>(&self, items: &mut [P], size: SheetSize) -> Result<Vector2, PackError> {
        validate_input(items, size)?;

        // Keep track of original indices so that the caller's slice stays in
        // the order it was given. The sort is stable, so equal items keep
        // their relative order.
        let mut order: Vec<usize> = (0..items.len()).collect();
        order.sort_by_key(|&index| Reverse(items[index].size().longest_side()));

        let first = match order.first() {
            Some(&index) => items[index].size(),
            None => {
                log::trace!("No items to pack");
                return Ok(size.resolve_with(Vector2::zero()));
            }
        };

        let mut tree = FreeSpaceTree::new(size.resolve_with(first));

        log::trace!(
            "Packing {} items starting from a {} sheet",
            items.len(),
            tree.size()
        );

        for index in order {
            let item = &mut items[index];
            let item_size = item.size();

            let node = match tree.find_space(item_size) {
                Some(node) => node,
                None => grow(&mut tree, item_size, size)?,
            };

            let position = tree.node(node).rect().pos;
            tree.split(node, item_size);
            item.place(position, false);

            log::trace!("Placed item {} ({}) at {:?}", index, item_size, position);
        }

        log::trace!("Finished packing into a {} sheet", tree.size());
        if log::log_enabled!(log::Level::Trace) {
            for free in tree.leaves().filter(|rect| !rect.size.is_degenerate()) {
                log::trace!("Unused space: {} at {:?}", free.size, free.pos);
            }
        }

        Ok(tree.size())
    }
}

/// Extends the sheet so that an item of `item_size` fits, returning the newly
/// created free leaf.
fn grow(
    tree: &mut FreeSpaceTree,
    item_size: Vector2,
    requested: SheetSize,
) -> Result<NodeId, PackError> {
    let sheet = tree.size();

    let can_extend_below = requested.height.is_auto() && item_size.x <= sheet.x;
    let can_extend_right = requested.width.is_auto() && item_size.y <= sheet.y;

    // Prefer whichever direction keeps the sheet closer to a square. Summed as
    // u64 so that huge sheets can't wrap around.
    let should_extend_below =
        can_extend_below && u64::from(sheet.x) >= u64::from(sheet.y) + u64::from(item_size.y);
    let should_extend_right =
        can_extend_right && u64::from(sheet.y) >= u64::from(sheet.x) + u64::from(item_size.x);

    let leaf = if should_extend_below || (can_extend_below && !should_extend_right) {
        log::trace!("Extending {} sheet below by {}", sheet, item_size.y);
        tree.extend_below(item_size.y)
    } else if can_extend_right {
        log::trace!("Extending {} sheet right by {}", sheet, item_size.x);
        tree.extend_right(item_size.x)
    } else {
        None
    };

    leaf.ok_or_else(|| {
        log::trace!("Cannot extend {} sheet to fit {}", sheet, item_size);

        PackError::OutOfSpace {
            item: item_size,
            sheet,
        }
    })
}
