//! The path iterator family: raw and affine-transformed walks.
//!
//! Iterators are finite, single-pass, forward-only cursors. They borrow
//! their backing [`Path`], so mutating the path while an iterator is alive
//! is rejected at compile time rather than producing torn reads.

use crate::{Affine, Coordinate, ElementType, Path, PathElement, Point, WindingRule};

/// A finite, single-pass cursor over a path.
///
/// An exhausted iterator cannot be rewound in place, but [`restart`]
/// produces a fresh equivalent iterator over the same backing path.
///
/// [`restart`]: PathIter::restart
pub trait PathIter: Iterator<Item = PathElement<Self::Coord>> + Sized {
    /// The coordinate type of the backing path.
    type Coord: Coordinate;

    /// The winding rule of the backing path.
    fn winding_rule(&self) -> WindingRule;

    /// Whether the iteration will yield any Bézier element.
    fn is_curved(&self) -> bool;

    /// Whether the backing path is a single open run of straight segments.
    fn is_polyline(&self) -> bool;

    /// Whether the backing path is a single closed run of straight
    /// segments.
    fn is_polygon(&self) -> bool;

    /// Whether the backing path has more than one subpath.
    fn is_multi_parts(&self) -> bool;

    /// A fresh equivalent iterator positioned at the start.
    fn restart(&self) -> Self;
}

/// An iterator walking a path's tag and coordinate sequences directly.
///
/// The walk maintains the running current point and the last move point, so
/// each yielded element carries its `from` point and a `Close` resolves its
/// implicit target.
#[derive(Debug)]
pub struct RawIter<'a, T> {
    path: &'a Path<T>,
    element: usize,
    coord: usize,
    cur: Point<T>,
    last_move: Point<T>,
}

impl<'a, T: Coordinate> RawIter<'a, T> {
    pub(crate) fn new(path: &'a Path<T>) -> Self {
        RawIter {
            path,
            element: 0,
            coord: 0,
            cur: Point::default(),
            last_move: Point::default(),
        }
    }

    #[inline]
    fn read_point(&mut self) -> Point<T> {
        let coords = self.path.coords();
        let p = Point::new(coords[self.coord], coords[self.coord + 1]);
        self.coord += 2;
        p
    }
}

impl<T: Coordinate> Iterator for RawIter<'_, T> {
    type Item = PathElement<T>;

    fn next(&mut self) -> Option<PathElement<T>> {
        let t = *self.path.element_types().get(self.element)?;
        self.element += 1;
        let el = match t {
            ElementType::MoveTo => {
                let to = self.read_point();
                self.cur = to;
                self.last_move = to;
                PathElement::MoveTo { to }
            }
            ElementType::LineTo => {
                let to = self.read_point();
                let el = PathElement::LineTo { from: self.cur, to };
                self.cur = to;
                el
            }
            ElementType::QuadTo => {
                let ctrl = self.read_point();
                let to = self.read_point();
                let el = PathElement::QuadTo {
                    from: self.cur,
                    ctrl,
                    to,
                };
                self.cur = to;
                el
            }
            ElementType::CurveTo => {
                let ctrl1 = self.read_point();
                let ctrl2 = self.read_point();
                let to = self.read_point();
                let el = PathElement::CurveTo {
                    from: self.cur,
                    ctrl1,
                    ctrl2,
                    to,
                };
                self.cur = to;
                el
            }
            ElementType::Close => {
                let el = PathElement::Close {
                    from: self.cur,
                    to: self.last_move,
                };
                self.cur = self.last_move;
                el
            }
        };
        Some(el)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.path.len() - self.element;
        (remaining, Some(remaining))
    }
}

impl<T: Coordinate> PathIter for RawIter<'_, T> {
    type Coord = T;

    fn winding_rule(&self) -> WindingRule {
        self.path.winding_rule()
    }

    fn is_curved(&self) -> bool {
        self.path.is_curved()
    }

    fn is_polyline(&self) -> bool {
        self.path.is_polyline()
    }

    fn is_polygon(&self) -> bool {
        self.path.is_polygon()
    }

    fn is_multi_parts(&self) -> bool {
        self.path.is_multi_parts()
    }

    fn restart(&self) -> Self {
        RawIter::new(self.path)
    }
}

/// An iterator applying an affine transform to each coordinate pair as it
/// is read.
///
/// Every coordinate is transformed exactly once: the transformed `to` of
/// one element becomes the `from` of the next.
#[derive(Debug)]
pub struct TransformedIter<'a, T> {
    inner: RawIter<'a, T>,
    transform: Affine,
    identity: bool,
    cur: Point<T>,
    last_move: Point<T>,
}

impl<'a, T: Coordinate> TransformedIter<'a, T> {
    pub(crate) fn new(path: &'a Path<T>, transform: Affine) -> Self {
        TransformedIter {
            inner: RawIter::new(path),
            transform,
            identity: transform.is_identity(),
            cur: Point::default(),
            last_move: Point::default(),
        }
    }

    #[inline]
    fn apply(&self, p: Point<T>) -> Point<T> {
        if self.identity {
            p
        } else {
            self.transform.apply(p)
        }
    }
}

impl<T: Coordinate> Iterator for TransformedIter<'_, T> {
    type Item = PathElement<T>;

    fn next(&mut self) -> Option<PathElement<T>> {
        let el = match self.inner.next()? {
            PathElement::MoveTo { to } => {
                let to = self.apply(to);
                self.cur = to;
                self.last_move = to;
                PathElement::MoveTo { to }
            }
            PathElement::LineTo { to, .. } => {
                let to = self.apply(to);
                let el = PathElement::LineTo { from: self.cur, to };
                self.cur = to;
                el
            }
            PathElement::QuadTo { ctrl, to, .. } => {
                let ctrl = self.apply(ctrl);
                let to = self.apply(to);
                let el = PathElement::QuadTo {
                    from: self.cur,
                    ctrl,
                    to,
                };
                self.cur = to;
                el
            }
            PathElement::CurveTo {
                ctrl1, ctrl2, to, ..
            } => {
                let ctrl1 = self.apply(ctrl1);
                let ctrl2 = self.apply(ctrl2);
                let to = self.apply(to);
                let el = PathElement::CurveTo {
                    from: self.cur,
                    ctrl1,
                    ctrl2,
                    to,
                };
                self.cur = to;
                el
            }
            PathElement::Close { .. } => {
                let el = PathElement::Close {
                    from: self.cur,
                    to: self.last_move,
                };
                self.cur = self.last_move;
                el
            }
        };
        Some(el)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T: Coordinate> PathIter for TransformedIter<'_, T> {
    type Coord = T;

    fn winding_rule(&self) -> WindingRule {
        self.inner.winding_rule()
    }

    fn is_curved(&self) -> bool {
        self.inner.is_curved()
    }

    fn is_polyline(&self) -> bool {
        self.inner.is_polyline()
    }

    fn is_polygon(&self) -> bool {
        self.inner.is_polygon()
    }

    fn is_multi_parts(&self) -> bool {
        self.inner.is_multi_parts()
    }

    fn restart(&self) -> Self {
        TransformedIter {
            inner: self.inner.restart(),
            transform: self.transform,
            identity: self.identity,
            cur: Point::default(),
            last_move: Point::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PathIter;
    use crate::{Affine, Path, PathElement, Point};

    fn triangle() -> Path<f64> {
        let mut p = Path::new();
        p.move_to(0.0, 0.0);
        p.line_to(4.0, 0.0).unwrap();
        p.line_to(2.0, 3.0).unwrap();
        p.close_path();
        p
    }

    #[test]
    fn raw_walk_resolves_close() {
        let p = triangle();
        let els: Vec<_> = p.iter().collect();
        assert_eq!(els.len(), 4);
        match els[3] {
            PathElement::Close { from, to } => {
                assert_eq!(from, Point::new(2.0, 3.0));
                assert_eq!(to, Point::new(0.0, 0.0));
            }
            ref other => panic!("expected close, got {other:?}"),
        }
        match els[2] {
            PathElement::LineTo { from, to } => {
                assert_eq!(from, Point::new(4.0, 0.0));
                assert_eq!(to, Point::new(2.0, 3.0));
            }
            ref other => panic!("expected line, got {other:?}"),
        }
    }

    #[test]
    fn transformed_walk_applies_once() {
        let p = triangle();
        let t = Affine::translate((10.0, 0.0));
        let els: Vec<_> = p.transformed_iter(t).collect();
        match els[1] {
            PathElement::LineTo { from, to } => {
                assert_eq!(from, Point::new(10.0, 0.0));
                assert_eq!(to, Point::new(14.0, 0.0));
            }
            ref other => panic!("expected line, got {other:?}"),
        }
        match els[3] {
            PathElement::Close { from, to } => {
                assert_eq!(from, Point::new(12.0, 3.0));
                assert_eq!(to, Point::new(10.0, 0.0));
            }
            ref other => panic!("expected close, got {other:?}"),
        }
    }

    #[test]
    fn restart_yields_equivalent_iterator() {
        let p = triangle();
        let mut it = p.iter();
        it.next();
        it.next();
        let replay: Vec<_> = it.restart().collect();
        let fresh: Vec<_> = p.iter().collect();
        assert_eq!(replay, fresh);
    }

    #[test]
    fn iterator_predicates_delegate() {
        let p = triangle();
        let it = p.iter();
        assert!(!it.is_curved());
        assert!(it.is_polygon());
        assert!(!it.is_polyline());
        assert!(!it.is_multi_parts());
    }
}
