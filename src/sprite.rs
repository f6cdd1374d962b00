//! Sprites and groups of sprites, the things that get packed into a sheet.

use agglopack::{PackError, Placeable, Settings, Vector2};

use crate::{color::Color, image::Image};

/// A single image to put in the sheet.
#[derive(Debug, Clone)]
pub struct Sprite {
    /// Used to identify the sprite in the coordinates file.
    pub name: String,
    pub image: Image,
    position: Option<Vector2>,
    rotated: bool,
}

impl Sprite {
    pub fn new(name: String, image: Image) -> Self {
        Self {
            name,
            image,
            position: None,
            rotated: false,
        }
    }
}

impl Placeable for Sprite {
    fn size(&self) -> Vector2 {
        self.image.size().into()
    }

    fn place(&mut self, position: Vector2, rotated: bool) {
        self.position = Some(position);
        self.rotated = rotated;
    }
}

/// Items packed together with their own settings. Once packed, the group is
/// placed in its parent as a single rectangle of its resolved size.
#[derive(Debug, Clone)]
pub struct Group {
    pub items: Vec<Entry>,
    pub settings: Settings,
    size: Option<Vector2>,
    position: Option<Vector2>,
}

impl Group {
    pub fn new(items: Vec<Entry>, settings: Settings) -> Self {
        Self {
            items,
            settings,
            size: None,
            position: None,
        }
    }

    /// Packs every nested group, deepest first, and then this group's own
    /// items. Returns the resolved size of this group.
    pub fn pack(&mut self) -> Result<Vector2, PackError> {
        for entry in &mut self.items {
            if let Entry::Group(group) = entry {
                group.pack()?;
            }
        }

        let packed = agglopack::pack(&mut self.items, &self.settings)?;
        log::debug!(
            "Packed {} items into a {} group",
            self.items.len(),
            packed.size
        );

        self.size = Some(packed.size);
        Ok(packed.size)
    }

    /// Every sprite in this group and its nested groups, positioned relative
    /// to this group's top-left corner.
    pub fn placed_sprites(&self) -> Vec<PlacedSprite<'_>> {
        let mut placed = Vec::new();
        self.collect_sprites(Vector2::zero(), &mut placed);
        placed
    }

    fn collect_sprites<'a>(&'a self, offset: Vector2, placed: &mut Vec<PlacedSprite<'a>>) {
        for entry in &self.items {
            match entry {
                Entry::Sprite(sprite) => {
                    if let Some(position) = sprite.position {
                        placed.push(PlacedSprite {
                            sprite,
                            position: offset + position,
                            size: sprite.size(),
                            rotated: sprite.rotated,
                        });
                    }
                }
                Entry::Group(group) => {
                    if let Some(position) = group.position {
                        group.collect_sprites(offset + position, placed);
                    }
                }
            }
        }
    }

    /// Draws every placed sprite onto a sheet of `size` filled with
    /// `background`.
    pub fn render(&self, size: Vector2, background: Color) -> Image {
        let mut sheet = Image::new_filled(size.to_tuple(), background);

        for placed in self.placed_sprites() {
            sheet.blit(&placed.sprite.image, placed.position.to_tuple());
        }

        sheet
    }

    pub fn sprite_count(&self) -> usize {
        self.items
            .iter()
            .map(|entry| match entry {
                Entry::Sprite(_) => 1,
                Entry::Group(group) => group.sprite_count(),
            })
            .sum()
    }
}

impl Placeable for Group {
    /// Zero until the group has been packed, which packing rejects.
    fn size(&self) -> Vector2 {
        self.size.unwrap_or_default()
    }

    // Groups are never rotated, only the sprites inside them.
    fn place(&mut self, position: Vector2, _rotated: bool) {
        self.position = Some(position);
    }
}

#[derive(Debug, Clone)]
pub enum Entry {
    Sprite(Sprite),
    Group(Group),
}

impl Placeable for Entry {
    fn size(&self) -> Vector2 {
        match self {
            Entry::Sprite(sprite) => sprite.size(),
            Entry::Group(group) => group.size(),
        }
    }

    fn place(&mut self, position: Vector2, rotated: bool) {
        match self {
            Entry::Sprite(sprite) => sprite.place(position, rotated),
            Entry::Group(group) => group.place(position, rotated),
        }
    }
}

/// A sprite with its position in sheet coordinates.
#[derive(Debug, Clone, Copy)]
pub struct PlacedSprite<'a> {
    pub sprite: &'a Sprite,
    pub position: Vector2,
    pub size: Vector2,
    pub rotated: bool,
}

#[cfg(test)]
mod test {
    use super::*;

    use agglopack::{AlgorithmKind, SheetSize};

    fn sprite(name: &str, size: (u32, u32), color: Color) -> Entry {
        Entry::Sprite(Sprite::new(name.to_owned(), Image::new_filled(size, color)))
    }

    fn positions(root: &Group) -> Vec<(String, (u32, u32))> {
        root.placed_sprites()
            .iter()
            .map(|placed| (placed.sprite.name.clone(), placed.position.to_tuple()))
            .collect()
    }

    #[test]
    fn flat_sheet() {
        let mut root = Group::new(
            vec![
                sprite("a", (10, 10), Color::TRANSPARENT),
                sprite("b", (10, 10), Color::TRANSPARENT),
                sprite("c", (10, 10), Color::TRANSPARENT),
            ],
            Settings::default(),
        );

        assert_eq!(root.pack().unwrap(), Vector2::new(20, 20));
        assert_eq!(
            positions(&root),
            vec![
                ("a".to_owned(), (0, 0)),
                ("b".to_owned(), (0, 10)),
                ("c".to_owned(), (10, 0)),
            ]
        );
    }

    #[test]
    fn group_offsets_are_added() {
        // The inline group is 8x4 and is bigger than the lone sprite, so it
        // seeds the sheet at the origin and the sprite goes below it.
        let group = Group::new(
            vec![
                sprite("g1", (4, 4), Color::TRANSPARENT),
                sprite("g2", (4, 4), Color::TRANSPARENT),
            ],
            Settings::new(AlgorithmKind::Inline),
        );

        let mut root = Group::new(
            vec![
                sprite("lone", (2, 2), Color::TRANSPARENT),
                Entry::Group(group),
            ],
            Settings::default(),
        );

        assert_eq!(root.pack().unwrap(), Vector2::new(8, 6));
        assert_eq!(root.sprite_count(), 3);
        assert_eq!(
            positions(&root),
            vec![
                ("lone".to_owned(), (0, 4)),
                ("g1".to_owned(), (0, 0)),
                ("g2".to_owned(), (4, 0)),
            ]
        );
    }

    #[test]
    fn nested_group_positions_accumulate() {
        let inner = Group::new(
            vec![sprite("deep", (3, 3), Color::TRANSPARENT)],
            Settings::default(),
        );

        let middle = Group::new(
            vec![
                sprite("wide", (6, 3), Color::TRANSPARENT),
                Entry::Group(inner),
            ],
            Settings::new(AlgorithmKind::Inline),
        );

        let mut root = Group::new(
            vec![sprite("first", (9, 9), Color::TRANSPARENT), Entry::Group(middle)],
            Settings::default(),
        );

        // middle is 9x3 and goes below the 9x9 sprite.
        assert_eq!(root.pack().unwrap(), Vector2::new(9, 12));
        assert_eq!(
            positions(&root),
            vec![
                ("first".to_owned(), (0, 0)),
                ("wide".to_owned(), (0, 9)),
                ("deep".to_owned(), (6, 9)),
            ]
        );
    }

    #[test]
    fn failing_group_fails_the_sheet() {
        let group = Group::new(
            vec![sprite("big", (10, 10), Color::TRANSPARENT)],
            Settings::default().with_size(SheetSize::fixed(5, 5)),
        );

        let mut root = Group::new(vec![Entry::Group(group)], Settings::default());

        assert!(matches!(root.pack(), Err(PackError::OutOfSpace { .. })));
    }

    #[test]
    fn render_composites_sprites() {
        let red = Color::new(255, 0, 0, 255);
        let blue = Color::new(0, 0, 255, 255);
        let background = Color::new(1, 1, 1, 1);

        let mut root = Group::new(
            vec![sprite("red", (2, 4), red), sprite("blue", (2, 2), blue)],
            Settings::default(),
        );

        let size = root.pack().unwrap();
        assert_eq!(size, Vector2::new(4, 4));

        let sheet = root.render(size, background);

        assert_eq!(sheet.size(), (4, 4));
        assert_eq!(sheet.get_pixel((0, 0)), red);
        assert_eq!(sheet.get_pixel((1, 3)), red);
        assert_eq!(sheet.get_pixel((2, 0)), blue);
        assert_eq!(sheet.get_pixel((3, 1)), blue);
        assert_eq!(sheet.get_pixel((2, 2)), background);
    }
}
