use std::{
    fmt,
    ops::{Add, Sub},
};

use serde::{Deserialize, Serialize};

/// A pair of unsigned integers used for sizes and positions alike.
///
/// Serializes as `{"x": .., "y": ..}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: u32,
    pub y: u32,
}

impl Vector2 {
    #[inline]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self { x: 0, y: 0 }
    }

    #[inline]
    pub fn to_tuple(self) -> (u32, u32) {
        (self.x, self.y)
    }

    /// Tells whether a rectangle of this size fits inside a rectangle of size
    /// `other` without rotating it.
    #[inline]
    pub fn fits_in(self, other: Vector2) -> bool {
        self.x <= other.x && self.y <= other.y
    }

    #[inline]
    pub fn longest_side(self) -> u32 {
        self.x.max(self.y)
    }

    #[inline]
    pub fn area(self) -> u64 {
        u64::from(self.x) * u64::from(self.y)
    }

    #[inline]
    pub fn is_degenerate(self) -> bool {
        self.x == 0 || self.y == 0
    }
}

impl From<(u32, u32)> for Vector2 {
    fn from((x, y): (u32, u32)) -> Self {
        Self { x, y }
    }
}

impl From<Vector2> for (u32, u32) {
    fn from(value: Vector2) -> Self {
        value.to_tuple()
    }
}

impl Add for Vector2 {
    type Output = Vector2;

    fn add(self, other: Vector2) -> Vector2 {
        Vector2::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Vector2 {
    type Output = Vector2;

    fn sub(self, other: Vector2) -> Vector2 {
        Vector2::new(self.x - other.x, self.y - other.y)
    }
}

impl fmt::Display for Vector2 {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "{}x{}", self.x, self.y)
    }
}

/// An axis-aligned rectangle anchored at its top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vector2,
    pub size: Vector2,
}

impl Rect {
    #[inline]
    pub fn new<P: Into<Vector2>, S: Into<Vector2>>(pos: P, size: S) -> Self {
        Self {
            pos: pos.into(),
            size: size.into(),
        }
    }

    /// The corner opposite to `pos`, exclusive.
    #[inline]
    pub fn max(&self) -> Vector2 {
        self.pos + self.size
    }

    /// Tells whether the two rectangles share any area. Rectangles that only
    /// touch along an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        let self_max = self.max();
        let other_max = other.max();

        self.pos.x < other_max.x
            && other.pos.x < self_max.x
            && self.pos.y < other_max.y
            && other.pos.y < self_max.y
    }

    /// Tells whether `other` lies completely inside this rectangle.
    pub fn contains(&self, other: &Rect) -> bool {
        let self_max = self.max();
        let other_max = other.max();

        self.pos.x <= other.pos.x
            && self.pos.y <= other.pos.y
            && other_max.x <= self_max.x
            && other_max.y <= self_max.y
    }
}
