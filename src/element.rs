//! Path element tags, winding rules, and the derived per-element values
//! yielded by iterators.

use arrayvec::ArrayVec;

use crate::{Coordinate, Point};

/// The tag of one path element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ElementType {
    /// Start a new subpath at a point.
    MoveTo,
    /// A straight segment to a point.
    LineTo,
    /// A quadratic Bézier segment (one control point).
    QuadTo,
    /// A cubic Bézier segment (two control points).
    CurveTo,
    /// Close the current subpath back to its last move point.
    Close,
}

impl ElementType {
    /// The number of points this tag consumes from the coordinate buffer.
    #[inline]
    pub const fn point_count(self) -> usize {
        match self {
            ElementType::MoveTo | ElementType::LineTo => 1,
            ElementType::QuadTo => 2,
            ElementType::CurveTo => 3,
            ElementType::Close => 0,
        }
    }

    /// Whether this tag describes a Bézier segment.
    #[inline]
    pub const fn is_curved(self) -> bool {
        matches!(self, ElementType::QuadTo | ElementType::CurveTo)
    }

    /// Whether this tag traces geometry (anything but a move).
    #[inline]
    pub const fn is_drawable(self) -> bool {
        !matches!(self, ElementType::MoveTo)
    }
}

/// The policy converting a crossing count into an inside/outside decision.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WindingRule {
    /// A point is inside if the signed crossing count is non-zero.
    #[default]
    NonZero,
    /// A point is inside if the crossing count is odd.
    EvenOdd,
}

/// One reconstructed path element, as yielded by the iterator family.
///
/// Elements are derived, not stored: the `from` point is the running current
/// point of the walk, and a `Close` resolves its target to the last move
/// point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathElement<T> {
    /// Start of a subpath.
    MoveTo {
        /// The new current point.
        to: Point<T>,
    },
    /// A straight segment.
    LineTo {
        /// The segment start.
        from: Point<T>,
        /// The segment end.
        to: Point<T>,
    },
    /// A quadratic Bézier segment.
    QuadTo {
        /// The curve start.
        from: Point<T>,
        /// The control point.
        ctrl: Point<T>,
        /// The curve end.
        to: Point<T>,
    },
    /// A cubic Bézier segment.
    CurveTo {
        /// The curve start.
        from: Point<T>,
        /// The first control point.
        ctrl1: Point<T>,
        /// The second control point.
        ctrl2: Point<T>,
        /// The curve end.
        to: Point<T>,
    },
    /// The implicit segment closing a subpath.
    Close {
        /// The current point when the close was encountered.
        from: Point<T>,
        /// The last move point, which closing returns to.
        to: Point<T>,
    },
}

impl<T: Coordinate> PathElement<T> {
    /// The tag of this element.
    #[inline]
    pub fn element_type(&self) -> ElementType {
        match self {
            PathElement::MoveTo { .. } => ElementType::MoveTo,
            PathElement::LineTo { .. } => ElementType::LineTo,
            PathElement::QuadTo { .. } => ElementType::QuadTo,
            PathElement::CurveTo { .. } => ElementType::CurveTo,
            PathElement::Close { .. } => ElementType::Close,
        }
    }

    /// The point this element starts from.
    ///
    /// For a `MoveTo`, which starts nothing, this is its target point.
    #[inline]
    pub fn from(&self) -> Point<T> {
        match *self {
            PathElement::MoveTo { to } => to,
            PathElement::LineTo { from, .. }
            | PathElement::QuadTo { from, .. }
            | PathElement::CurveTo { from, .. }
            | PathElement::Close { from, .. } => from,
        }
    }

    /// The point this element ends at.
    #[inline]
    pub fn to(&self) -> Point<T> {
        match *self {
            PathElement::MoveTo { to }
            | PathElement::LineTo { to, .. }
            | PathElement::QuadTo { to, .. }
            | PathElement::CurveTo { to, .. }
            | PathElement::Close { to, .. } => to,
        }
    }

    /// The element's control points, if any (0 for non-curves, 1 for a
    /// quadratic, 2 for a cubic).
    #[inline]
    pub fn control_points(&self) -> ArrayVec<Point<T>, 2> {
        let mut ctrls = ArrayVec::new();
        match *self {
            PathElement::QuadTo { ctrl, .. } => ctrls.push(ctrl),
            PathElement::CurveTo { ctrl1, ctrl2, .. } => {
                ctrls.push(ctrl1);
                ctrls.push(ctrl2);
            }
            _ => {}
        }
        ctrls
    }

    /// Whether this element is a Bézier segment.
    #[inline]
    pub fn is_curved(&self) -> bool {
        self.element_type().is_curved()
    }

    /// Widen every point of the element to `f64`.
    pub fn to_f64(&self) -> PathElement<f64> {
        match *self {
            PathElement::MoveTo { to } => PathElement::MoveTo { to: to.to_f64() },
            PathElement::LineTo { from, to } => PathElement::LineTo {
                from: from.to_f64(),
                to: to.to_f64(),
            },
            PathElement::QuadTo { from, ctrl, to } => PathElement::QuadTo {
                from: from.to_f64(),
                ctrl: ctrl.to_f64(),
                to: to.to_f64(),
            },
            PathElement::CurveTo {
                from,
                ctrl1,
                ctrl2,
                to,
            } => PathElement::CurveTo {
                from: from.to_f64(),
                ctrl1: ctrl1.to_f64(),
                ctrl2: ctrl2.to_f64(),
                to: to.to_f64(),
            },
            PathElement::Close { from, to } => PathElement::Close {
                from: from.to_f64(),
                to: to.to_f64(),
            },
        }
    }
}
