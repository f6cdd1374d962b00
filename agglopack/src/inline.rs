use crate::{
    algorithm::{validate_input, Algorithm},
    compat::Supports,
    error::PackError,
    geometry::Vector2,
    item::Placeable,
    settings::SheetSize,
};

/// Places items in a single horizontal row, in the order they were given.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlinePacker;

impl Algorithm for InlinePacker {
    fn supports(&self) -> Supports {
        Supports {
            auto_size: true,
            ..Supports::default()
        }
    }

    fn pack<P: Placeable>(&self, items: &mut [P], size: SheetSize) -> Result<Vector2, PackError> {
        validate_input(items, size)?;

        let row_width: u64 = items.iter().map(|item| u64::from(item.size().x)).sum();
        let row_height = items.iter().map(|item| item.size().y).max().unwrap_or(0);

        // Automatic widths are still bounded by what a u32 can hold.
        let too_wide = row_width > u64::from(size.width.fixed_or(u32::MAX));
        let too_tall = row_height > size.height.fixed_or(u32::MAX);

        if too_wide || too_tall {
            let row = Vector2::new(row_width.min(u64::from(u32::MAX)) as u32, row_height);

            return Err(PackError::OutOfSpace {
                item: row,
                sheet: size.resolve_with(row),
            });
        }

        let mut next_x = 0;
        for item in items.iter_mut() {
            item.place(Vector2::new(next_x, 0), false);
            next_x += item.size().x;
        }

        log::trace!("Placed {} items in a row {} wide", items.len(), next_x);

        Ok(size.resolve_with(Vector2::new(next_x, row_height)))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{item::Item, settings::Dimension};

    #[test]
    fn row_in_given_order() {
        let mut items = vec![Item::new((3, 5)), Item::new((10, 2)), Item::new((1, 1))];
        let size = InlinePacker.pack(&mut items, SheetSize::auto()).unwrap();

        assert_eq!(size, Vector2::new(14, 5));

        let positions: Vec<_> = items.iter().map(|item| item.position().unwrap()).collect();
        assert_eq!(
            positions,
            vec![Vector2::new(0, 0), Vector2::new(3, 0), Vector2::new(13, 0)]
        );
    }

    #[test]
    fn fixed_axes_are_kept() {
        let mut items = vec![Item::new((3, 5)), Item::new((10, 2))];
        let requested = SheetSize::new(Dimension::Fixed(20), Dimension::Auto);
        let size = InlinePacker.pack(&mut items, requested).unwrap();

        assert_eq!(size, Vector2::new(20, 5));
    }

    #[test]
    fn fixed_width_too_small() {
        let mut items = vec![Item::new((3, 5)), Item::new((10, 2))];
        let requested = SheetSize::new(Dimension::Fixed(12), Dimension::Auto);
        let err = InlinePacker.pack(&mut items, requested).unwrap_err();

        assert!(matches!(err, PackError::OutOfSpace { .. }));
        assert!(items.iter().all(|item| item.position().is_none()));
    }

    #[test]
    fn fixed_height_too_small() {
        let mut items = vec![Item::new((3, 5))];
        let requested = SheetSize::new(Dimension::Auto, Dimension::Fixed(4));

        assert!(InlinePacker.pack(&mut items, requested).is_err());
    }
}
