//! Closest- and farthest-point solvers over flattened iterators.

use crate::crossings::point_mask;
use crate::iter::PathIter;
use crate::shadow::{closest_on_segment, point_crossings_for_line};
use crate::{Error, PathElement, Point, Result};

/// The closest point on the traced outline to `(x, y)`, or the query point
/// itself when it is proven inside a closed subpath.
///
/// The walk keeps the winding parity of the segments seen so far; when a
/// `Close` leaves the parity non-zero under the iterator's winding rule the
/// query point is inside and is returned directly (distance zero).
/// Otherwise every segment contributes its clamped orthogonal projection of
/// the query point and the global minimum wins.
///
/// # Errors
///
/// Returns [`Error::PreconditionViolation`] if the iterator still contains
/// curves (flatten first), and [`Error::InvalidPathState`] if it yields no
/// elements.
pub fn closest_point<I: PathIter>(mut iter: I, x: f64, y: f64) -> Result<Point<I::Coord>> {
    if iter.is_curved() {
        return Err(Error::PreconditionViolation(
            "closest_point requires a non-curved iterator",
        ));
    }
    let mask = point_mask(iter.winding_rule());
    let mut crossings = 0i32;
    let mut best: Option<(f64, Point<I::Coord>)> = None;
    while let Some(el) = iter.next() {
        let candidate = match el {
            PathElement::MoveTo { to } => to,
            PathElement::LineTo { from, to } | PathElement::Close { from, to } => {
                let (f, t) = (from.to_f64(), to.to_f64());
                let proj = closest_on_segment(x, y, f.x, f.y, t.x, t.y);
                crossings += point_crossings_for_line(x, y, f.x, f.y, t.x, t.y);
                if matches!(el, PathElement::Close { .. }) && (crossings & mask) != 0 {
                    return Ok(Point::from_f64(Point::new(x, y)));
                }
                Point::from_f64(proj)
            }
            PathElement::QuadTo { .. } | PathElement::CurveTo { .. } => {
                return Err(Error::PreconditionViolation(
                    "closest_point requires a non-curved iterator",
                ));
            }
        };
        let d = candidate.to_f64().distance_squared(Point::new(x, y));
        if best.map(|(bd, _)| d < bd).unwrap_or(true) {
            best = Some((d, candidate));
        }
    }
    best.map(|(_, p)| p)
        .ok_or(Error::InvalidPathState("path has no elements"))
}

/// The farthest point on the traced outline from `(x, y)`.
///
/// For a straight segment the farther of its two endpoints is always at
/// maximal distance, so only endpoints are ever candidates.
///
/// # Errors
///
/// Returns [`Error::PreconditionViolation`] if the iterator still contains
/// curves (flatten first), and [`Error::InvalidPathState`] if it yields no
/// elements.
pub fn farthest_point<I: PathIter>(mut iter: I, x: f64, y: f64) -> Result<Point<I::Coord>> {
    if iter.is_curved() {
        return Err(Error::PreconditionViolation(
            "farthest_point requires a non-curved iterator",
        ));
    }
    let query = Point::new(x, y);
    let mut best: Option<(f64, Point<I::Coord>)> = None;
    while let Some(el) = iter.next() {
        let candidate = match el {
            PathElement::MoveTo { to } => to,
            PathElement::LineTo { from, to } | PathElement::Close { from, to } => {
                if from.to_f64().distance_squared(query) >= to.to_f64().distance_squared(query) {
                    from
                } else {
                    to
                }
            }
            PathElement::QuadTo { .. } | PathElement::CurveTo { .. } => {
                return Err(Error::PreconditionViolation(
                    "farthest_point requires a non-curved iterator",
                ));
            }
        };
        let d = candidate.to_f64().distance_squared(query);
        if best.map(|(bd, _)| d > bd).unwrap_or(true) {
            best = Some((d, candidate));
        }
    }
    best.map(|(_, p)| p)
        .ok_or(Error::InvalidPathState("path has no elements"))
}
