//! A 2D point, generic over the coordinate type.

use std::fmt;

use crate::{Coordinate, Vec2};

/// A 2D point.
///
/// Unlike [`Vec2`], which is always `f64`, a `Point` carries the coordinate
/// type of the path it belongs to, so `Path<i32>` yields integer points and
/// `Path<f64>` floating-point ones.
#[derive(Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point<T> {
    /// The x coordinate.
    pub x: T,
    /// The y coordinate.
    pub y: T,
}

impl<T: Coordinate> Point<T> {
    /// Create a new `Point` with the provided `x` and `y` coordinates.
    #[inline]
    pub const fn new(x: T, y: T) -> Self {
        Point { x, y }
    }

    /// Widen both coordinates to `f64`.
    #[inline]
    pub fn to_f64(self) -> Point<f64> {
        Point::new(self.x.to_f64(), self.y.to_f64())
    }

    /// Snap an `f64` point into this coordinate type.
    ///
    /// Rounds to the nearest value for integer coordinate types.
    #[inline]
    pub fn from_f64(p: Point<f64>) -> Self {
        Point::new(T::from_f64(p.x), T::from_f64(p.y))
    }

    /// Euclidean distance to another point, computed in `f64`.
    #[inline]
    pub fn distance(self, other: Self) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Squared Euclidean distance to another point, computed in `f64`.
    #[inline]
    pub fn distance_squared(self, other: Self) -> f64 {
        let dx = self.x.to_f64() - other.x.to_f64();
        let dy = self.y.to_f64() - other.y.to_f64();
        dx * dx + dy * dy
    }
}

impl Point<f64> {
    /// Convert this point into a [`Vec2`].
    #[inline]
    pub const fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// The point midway between this point and `other`.
    #[inline]
    pub fn midpoint(self, other: Self) -> Self {
        Point::new(0.5 * (self.x + other.x), 0.5 * (self.y + other.y))
    }
}

impl<T: Coordinate> From<(T, T)> for Point<T> {
    #[inline]
    fn from(v: (T, T)) -> Self {
        Point::new(v.0, v.1)
    }
}

impl<T: fmt::Debug> fmt::Debug for Point<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?}, {:?})", self.x, self.y)
    }
}

impl<T: fmt::Display> fmt::Display for Point<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::Point;

    #[test]
    fn distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(a.distance_squared(b), 25.0);
    }

    #[test]
    fn integer_points() {
        let a: Point<i32> = Point::new(0, 0);
        let b = Point::new(3, 4);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(Point::<i32>::from_f64(Point::new(1.6, -0.4)), Point::new(2, 0));
    }
}
