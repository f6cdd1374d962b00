use crate::geometry::{Rect, Vector2};

/// Something rectangular that a packing algorithm can place.
///
/// Algorithms read `size` and write back a position through `place`. They
/// never take ownership of the items they are given, so applications can
/// implement this trait on their own sprite types and read the results back
/// after packing.
pub trait Placeable {
    /// The size this item occupies in its container. Must be known before
    /// packing starts and must not change while packing.
    fn size(&self) -> Vector2;

    /// Records where the algorithm put this item. `position` is the top-left
    /// corner in the coordinate space of the containing sheet, regardless of
    /// rotation.
    fn place(&mut self, position: Vector2, rotated: bool);
}

impl<T: Placeable + ?Sized> Placeable for &mut T {
    fn size(&self) -> Vector2 {
        (**self).size()
    }

    fn place(&mut self, position: Vector2, rotated: bool) {
        (**self).place(position, rotated)
    }
}

/// A bare rectangle to pack, for consumers that track their own data
/// separately from positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item {
    size: Vector2,
    position: Option<Vector2>,
    rotated: bool,
}

impl Item {
    #[inline]
    pub fn new<S: Into<Vector2>>(size: S) -> Self {
        Self {
            size: size.into(),
            position: None,
            rotated: false,
        }
    }

    #[inline]
    pub fn size(&self) -> Vector2 {
        self.size
    }

    /// `None` until a packing algorithm has placed this item.
    #[inline]
    pub fn position(&self) -> Option<Vector2> {
        self.position
    }

    #[inline]
    pub fn rotated(&self) -> bool {
        self.rotated
    }

    /// The area this item covers in its container, once placed.
    pub fn rect(&self) -> Option<Rect> {
        self.position.map(|pos| Rect {
            pos,
            size: self.size,
        })
    }
}

impl Placeable for Item {
    fn size(&self) -> Vector2 {
        self.size
    }

    fn place(&mut self, position: Vector2, rotated: bool) {
        self.position = Some(position);
        self.rotated = rotated;
    }
}
