//! The crossing-number engine.
//!
//! Every containment and intersection predicate reduces to the same
//! question: how many times, and in which direction, does the path cross a
//! ray extending in +X from the reference shape? Each function here walks a
//! path iterator once, feeding flattened segments through the shape's
//! crossing primitive, and returns the signed total or the
//! [`SHAPE_INTERSECTS`] sentinel as soon as interior overlap is detected.
//!
//! Bézier elements are never evaluated analytically: each is rerouted
//! through a one-curve scratch sub-path, flattened at
//! [`SPLINE_APPROXIMATION_RATIO`], and the walk recurses over the chords.

use log::trace;

use crate::flatten::{CurveScratch, FlatteningIter, DEFAULT_FLATTENING_LIMIT};
use crate::iter::PathIter;
use crate::shadow::{
    segments_intersect, span_crossings, CircleShadow, EllipseShadow, PointShadow, RectShadow,
    RoundRectShadow, SegmentShadow, Shadow, ShadowSpan, TriangleShadow,
};
use crate::{Coordinate, Path, PathElement, WindingRule};

/// Reserved crossing count meaning "interior overlap detected; counting was
/// abandoned".
///
/// Out of range for any real crossing total; once a crossing function
/// returns it, every enclosing computation returns it unmodified.
pub const SHAPE_INTERSECTS: i32 = i32::MIN;

/// The fixed flatness used when the engine flattens curves internally, for
/// crossing tests, bounding boxes and the point-solver wrappers.
pub const SPLINE_APPROXIMATION_RATIO: f64 = 0.1;

/// How a crossing computation treats a subpath that does not end exactly at
/// its starting move point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CrossingMode {
    /// Leave the gap uncounted.
    #[default]
    Standard,
    /// Evaluate one more crossing test against the implicit closing edge.
    AutoClose,
    /// Discard the accumulated count entirely: for an open path only "did
    /// we touch the shape" is meaningful, not parity.
    SimpleIntersectionWhenNotPolygon,
}

/// The containment mask for a winding rule (`contains`-style predicates).
#[inline]
pub(crate) fn point_mask(rule: WindingRule) -> i32 {
    match rule {
        WindingRule::NonZero => -1,
        WindingRule::EvenOdd => 1,
    }
}

/// The intersection mask for a winding rule (shape predicates, where each
/// wind contributes two crossings).
#[inline]
pub(crate) fn shape_mask(rule: WindingRule) -> i32 {
    match rule {
        WindingRule::NonZero => -1,
        WindingRule::EvenOdd => 2,
    }
}

/// The shared traversal: feed each flattened segment through `shadow`,
/// recurse into curves, honor the open-path policy.
///
/// `point_semantics` enables the crossings-from-point early exit: a `Close`
/// whose own contribution leaves the count non-zero proves the point inside
/// and returns immediately.
fn walk<I, S>(
    mut crossings: i32,
    mut iter: I,
    shadow: &S,
    mode: CrossingMode,
    point_semantics: bool,
) -> i32
where
    I: PathIter,
    S: Shadow + ?Sized,
{
    let rule = iter.winding_rule();
    let first = match iter.next() {
        Some(el) => el,
        None => return crossings,
    };
    let start = first.to().to_f64();
    let (mut movx, mut movy) = (start.x, start.y);
    let (mut curx, mut cury) = (movx, movy);
    while let Some(el) = iter.next() {
        match el.to_f64() {
            PathElement::MoveTo { to } => {
                movx = to.x;
                movy = to.y;
                curx = to.x;
                cury = to.y;
            }
            PathElement::LineTo { to, .. } => {
                crossings = shadow.crossings(crossings, curx, cury, to.x, to.y);
                if crossings == SHAPE_INTERSECTS {
                    return crossings;
                }
                curx = to.x;
                cury = to.y;
            }
            PathElement::QuadTo { ctrl, to, .. } => {
                let scratch =
                    CurveScratch::quad(curx, cury, ctrl.x, ctrl.y, to.x, to.y, rule);
                let flat = FlatteningIter::with_limit(
                    scratch,
                    SPLINE_APPROXIMATION_RATIO,
                    DEFAULT_FLATTENING_LIMIT,
                );
                crossings = walk(crossings, flat, shadow, CrossingMode::Standard, point_semantics);
                if crossings == SHAPE_INTERSECTS {
                    return crossings;
                }
                curx = to.x;
                cury = to.y;
            }
            PathElement::CurveTo {
                ctrl1, ctrl2, to, ..
            } => {
                let scratch = CurveScratch::cubic(
                    curx, cury, ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y, to.x, to.y, rule,
                );
                let flat = FlatteningIter::with_limit(
                    scratch,
                    SPLINE_APPROXIMATION_RATIO,
                    DEFAULT_FLATTENING_LIMIT,
                );
                crossings = walk(crossings, flat, shadow, CrossingMode::Standard, point_semantics);
                if crossings == SHAPE_INTERSECTS {
                    return crossings;
                }
                curx = to.x;
                cury = to.y;
            }
            PathElement::Close { .. } => {
                if curx != movx || cury != movy {
                    crossings = shadow.crossings(crossings, curx, cury, movx, movy);
                    if crossings == SHAPE_INTERSECTS {
                        return crossings;
                    }
                }
                // A closed ring with a non-zero count proves containment;
                // nothing later can retract it for the point case.
                if point_semantics && crossings != 0 {
                    return crossings;
                }
                curx = movx;
                cury = movy;
            }
        }
    }
    let open = curx != movx || cury != movy;
    if open {
        match mode {
            CrossingMode::Standard => {}
            CrossingMode::AutoClose => {
                crossings = shadow.crossings(crossings, curx, cury, movx, movy);
            }
            CrossingMode::SimpleIntersectionWhenNotPolygon => {
                crossings = 0;
            }
        }
    }
    crossings
}

/// Crossings of the path around the point `(px, py)`.
///
/// Returns [`SHAPE_INTERSECTS`] if the point lies exactly on a drawn
/// segment.
pub fn crossings_from_point<I: PathIter>(
    crossings: i32,
    iter: I,
    px: f64,
    py: f64,
    mode: CrossingMode,
) -> i32 {
    walk(crossings, iter, &PointShadow { px, py }, mode, true)
}

/// Crossings of the path around the segment from `(x1, y1)` to `(x2, y2)`.
pub fn crossings_from_segment<I: PathIter>(
    crossings: i32,
    iter: I,
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    mode: CrossingMode,
) -> i32 {
    walk(
        crossings,
        iter,
        &SegmentShadow::new(x1, y1, x2, y2),
        mode,
        false,
    )
}

/// Crossings of the path around the axis-aligned rectangle.
#[allow(clippy::too_many_arguments)]
pub fn crossings_from_rect<I: PathIter>(
    crossings: i32,
    iter: I,
    xmin: f64,
    ymin: f64,
    xmax: f64,
    ymax: f64,
    mode: CrossingMode,
) -> i32 {
    walk(
        crossings,
        iter,
        &RectShadow::new(xmin, ymin, xmax, ymax),
        mode,
        false,
    )
}

/// Crossings of the path around the circle centered at `(cx, cy)`.
pub fn crossings_from_circle<I: PathIter>(
    crossings: i32,
    iter: I,
    cx: f64,
    cy: f64,
    radius: f64,
    mode: CrossingMode,
) -> i32 {
    walk(
        crossings,
        iter,
        &CircleShadow::new(cx, cy, radius),
        mode,
        false,
    )
}

/// Crossings of the path around the axis-aligned ellipse centered at
/// `(cx, cy)` with radii `rx` and `ry`.
#[allow(clippy::too_many_arguments)]
pub fn crossings_from_ellipse<I: PathIter>(
    crossings: i32,
    iter: I,
    cx: f64,
    cy: f64,
    rx: f64,
    ry: f64,
    mode: CrossingMode,
) -> i32 {
    walk(
        crossings,
        iter,
        &EllipseShadow::new(cx, cy, rx, ry),
        mode,
        false,
    )
}

/// Crossings of the path around the triangle with the given vertices.
#[allow(clippy::too_many_arguments)]
pub fn crossings_from_triangle<I: PathIter>(
    crossings: i32,
    iter: I,
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    x3: f64,
    y3: f64,
    mode: CrossingMode,
) -> i32 {
    walk(
        crossings,
        iter,
        &TriangleShadow::new(x1, y1, x2, y2, x3, y3),
        mode,
        false,
    )
}

/// Crossings of the path around the round rectangle with corner radii
/// `aw` and `ah`.
#[allow(clippy::too_many_arguments)]
pub fn crossings_from_round_rect<I: PathIter>(
    crossings: i32,
    iter: I,
    xmin: f64,
    ymin: f64,
    xmax: f64,
    ymax: f64,
    aw: f64,
    ah: f64,
    mode: CrossingMode,
) -> i32 {
    walk(
        crossings,
        iter,
        &RoundRectShadow::new(xmin, ymin, xmax, ymax, aw, ah),
        mode,
        false,
    )
}

/// Crossings of the path around another path, presented through its
/// [`PathShadow`].
pub fn crossings_from_path<I: PathIter, T: Coordinate>(
    crossings: i32,
    iter: I,
    shadow: &PathShadow<'_, T>,
    mode: CrossingMode,
) -> i32 {
    walk(crossings, iter, shadow, mode, false)
}

/// Containment test over an iterator, with coordinates already in `f64`.
pub(crate) fn iter_contains_point<I: PathIter>(iter: I, x: f64, y: f64) -> bool {
    let mask = point_mask(iter.winding_rule());
    let c = crossings_from_point(
        0,
        iter,
        x,
        y,
        CrossingMode::SimpleIntersectionWhenNotPolygon,
    );
    c == SHAPE_INTERSECTS || (c & mask) != 0
}

/// Another path, abstracted to its crossing primitives.
///
/// The shadow flattens the target path once at construction to find its
/// extremal boundary points; each query segment is then tested against the
/// shadow exactly like the fixed shapes: interior overlap (touching any
/// shadow segment, or lying inside the shadow path's region) short-circuits
/// with the sentinel, and the counting case accumulates the ray crossings
/// of the shadow's bottom-most and top-most path points.
pub struct PathShadow<'a, T> {
    path: &'a Path<T>,
    span: Option<ShadowSpan>,
}

impl<'a, T: Coordinate> PathShadow<'a, T> {
    /// Build the shadow of `path`.
    pub fn new(path: &'a Path<T>) -> Self {
        let mut span: Option<ShadowSpan> = None;
        for el in path.flattened_iter(SPLINE_APPROXIMATION_RATIO) {
            if let PathElement::LineTo { from, to } | PathElement::Close { from, to } =
                el.to_f64()
            {
                for p in [from, to] {
                    match span.as_mut() {
                        None => {
                            span = Some(ShadowSpan {
                                xmin: p.x,
                                ymin: p.y,
                                xmax: p.x,
                                ymax: p.y,
                                bottom: (p.x, p.y),
                                top: (p.x, p.y),
                            });
                        }
                        Some(s) => {
                            s.xmin = s.xmin.min(p.x);
                            s.xmax = s.xmax.max(p.x);
                            if p.y < s.ymin {
                                s.ymin = p.y;
                                s.bottom = (p.x, p.y);
                            }
                            if p.y > s.ymax {
                                s.ymax = p.y;
                                s.top = (p.x, p.y);
                            }
                        }
                    }
                }
            }
        }
        if span.is_none() {
            trace!("path shadow over a path with no drawable elements");
        }
        PathShadow { path, span }
    }

    fn overlaps(&self, x0: f64, y0: f64, x1: f64, y1: f64) -> bool {
        for el in self.path.flattened_iter(SPLINE_APPROXIMATION_RATIO) {
            if let PathElement::LineTo { from, to } | PathElement::Close { from, to } =
                el.to_f64()
            {
                if segments_intersect(x0, y0, x1, y1, from.x, from.y, to.x, to.y) {
                    return true;
                }
            }
        }
        // No edge touches; the segment can still lie wholly inside the
        // shadow path's region.
        iter_contains_point(self.path.iter(), 0.5 * (x0 + x1), 0.5 * (y0 + y1))
    }
}

impl<T: Coordinate> Shadow for PathShadow<'_, T> {
    fn crossings(&self, crossings: i32, x0: f64, y0: f64, x1: f64, y1: f64) -> i32 {
        let span = match &self.span {
            Some(span) => span,
            None => return crossings,
        };
        span_crossings(
            crossings,
            span,
            || self.overlaps(x0, y0, x1, y1),
            x0,
            y0,
            x1,
            y1,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Path;

    fn rect_path() -> Path<f64> {
        let mut p = Path::new();
        p.move_to(0.0, 0.0);
        p.line_to(10.0, 0.0).unwrap();
        p.line_to(10.0, 10.0).unwrap();
        p.line_to(0.0, 10.0).unwrap();
        p.close_path();
        p
    }

    fn open_vee() -> Path<f64> {
        let mut p = Path::new();
        p.move_to(0.0, 0.0);
        p.line_to(10.0, 0.0).unwrap();
        p.line_to(5.0, 10.0).unwrap();
        p
    }

    #[test]
    fn point_crossings_in_rect() {
        let p = rect_path();
        let c = crossings_from_point(0, p.iter(), 5.0, 5.0, CrossingMode::Standard);
        assert_eq!(c, 1);
        let c = crossings_from_point(0, p.iter(), -1.0, -1.0, CrossingMode::Standard);
        assert_eq!(c, 0);
    }

    #[test]
    fn point_on_boundary_is_sentinel() {
        let p = rect_path();
        let c = crossings_from_point(
            0,
            p.iter(),
            10.0,
            5.0,
            CrossingMode::SimpleIntersectionWhenNotPolygon,
        );
        assert_eq!(c, SHAPE_INTERSECTS);
    }

    #[test]
    fn open_path_policies() {
        let p = open_vee();
        // Near the implied apex interior, but not on any drawn segment.
        let simple = crossings_from_point(
            0,
            p.iter(),
            5.0,
            5.0,
            CrossingMode::SimpleIntersectionWhenNotPolygon,
        );
        assert_eq!(simple, 0, "open path parity is discarded");

        let standard = crossings_from_point(0, p.iter(), 5.0, 5.0, CrossingMode::Standard);
        assert_eq!(standard, 1, "standard leaves the gap uncounted");

        let auto = crossings_from_point(0, p.iter(), 5.0, 3.0, CrossingMode::AutoClose);
        assert_ne!(auto & point_mask(WindingRule::NonZero), 0);
    }

    #[test]
    fn curve_elements_recurse_through_chords() {
        // A half-disc-like region: a baseline plus a quadratic arch back to
        // the start, so the path ends exactly at its move point.
        let mut p = Path::new();
        p.move_to(0.0, 0.0);
        p.line_to(10.0, 0.0).unwrap();
        p.quad_to(5.0, 20.0, 0.0, 0.0).unwrap();
        let c = crossings_from_point(
            0,
            p.iter(),
            5.0,
            4.0,
            CrossingMode::SimpleIntersectionWhenNotPolygon,
        );
        assert_eq!(c, 1);
        let c = crossings_from_point(
            0,
            p.iter(),
            5.0,
            15.0,
            CrossingMode::SimpleIntersectionWhenNotPolygon,
        );
        assert_eq!(c, 0);
    }

    #[test]
    fn enclosed_shapes_count_two_per_wind() {
        let p = rect_path();
        let mode = CrossingMode::SimpleIntersectionWhenNotPolygon;
        assert_eq!(crossings_from_circle(0, p.iter(), 5.0, 5.0, 1.0, mode), 2);
        assert_eq!(
            crossings_from_ellipse(0, p.iter(), 5.0, 5.0, 2.0, 1.0, mode),
            2
        );
        assert_eq!(
            crossings_from_rect(0, p.iter(), 4.0, 4.0, 6.0, 6.0, mode),
            2
        );
        assert_eq!(
            crossings_from_segment(0, p.iter(), 3.0, 3.0, 7.0, 7.0, mode),
            2
        );
        assert_eq!(
            crossings_from_triangle(0, p.iter(), 4.0, 4.0, 6.0, 4.0, 5.0, 6.0, mode),
            2
        );
        assert_eq!(
            crossings_from_round_rect(0, p.iter(), 4.0, 4.0, 6.0, 6.0, 0.5, 0.5, mode),
            2
        );
    }

    #[test]
    fn disjoint_shapes_count_zero() {
        let p = rect_path();
        let mode = CrossingMode::SimpleIntersectionWhenNotPolygon;
        assert_eq!(
            crossings_from_circle(0, p.iter(), 20.0, 5.0, 1.0, mode),
            0
        );
        assert_eq!(
            crossings_from_rect(0, p.iter(), 12.0, 12.0, 15.0, 15.0, mode),
            0
        );
    }

    #[test]
    fn overlap_returns_sentinel() {
        let p = rect_path();
        let mode = CrossingMode::SimpleIntersectionWhenNotPolygon;
        assert_eq!(
            crossings_from_circle(0, p.iter(), 10.0, 5.0, 2.0, mode),
            SHAPE_INTERSECTS
        );
        assert_eq!(
            crossings_from_segment(0, p.iter(), 5.0, 5.0, 15.0, 5.0, mode),
            SHAPE_INTERSECTS
        );
    }

    #[test]
    fn sentinel_propagates_through_path_shadow() {
        let p = rect_path();
        let mut crossing = Path::new();
        crossing.move_to(5.0, 5.0);
        crossing.line_to(15.0, 5.0).unwrap();

        let shadow = PathShadow::new(&p);
        let c = crossings_from_path(
            0,
            crossing.iter(),
            &shadow,
            CrossingMode::SimpleIntersectionWhenNotPolygon,
        );
        assert_eq!(c, SHAPE_INTERSECTS, "edge touch propagates unmodified");
    }

    #[test]
    fn path_shadow_counts_enclosure() {
        let outer = rect_path();
        let mut inner = Path::new();
        inner.move_to(4.0, 4.0);
        inner.line_to(6.0, 4.0).unwrap();
        inner.line_to(6.0, 6.0).unwrap();
        inner.line_to(4.0, 6.0).unwrap();
        inner.close_path();

        let shadow = PathShadow::new(&inner);
        let c = crossings_from_path(
            0,
            outer.iter(),
            &shadow,
            CrossingMode::SimpleIntersectionWhenNotPolygon,
        );
        assert_eq!(c, 2);

        // Inner-inside-outer without edge contact: the inner path's
        // segments lie in the outer region, which is interior overlap.
        let shadow = PathShadow::new(&outer);
        let c = crossings_from_path(
            0,
            inner.iter(),
            &shadow,
            CrossingMode::SimpleIntersectionWhenNotPolygon,
        );
        assert_eq!(c, SHAPE_INTERSECTS);

        // Far apart: nothing.
        let mut far = Path::new();
        far.move_to(100.0, 100.0);
        far.line_to(110.0, 100.0).unwrap();
        far.line_to(110.0, 110.0).unwrap();
        far.close_path();
        let shadow = PathShadow::new(&far);
        let c = crossings_from_path(
            0,
            outer.iter(),
            &shadow,
            CrossingMode::SimpleIntersectionWhenNotPolygon,
        );
        assert_eq!(c, 0);
    }

    #[test]
    fn close_early_exit_short_circuits() {
        // Two subpaths; the first close proves containment, so the second
        // subpath (which would touch the point and yield the sentinel) is
        // never reached.
        let mut p = Path::new();
        p.move_to(0.0, 0.0);
        p.line_to(10.0, 0.0).unwrap();
        p.line_to(10.0, 10.0).unwrap();
        p.line_to(0.0, 10.0).unwrap();
        p.close_path();
        p.move_to(0.0, 5.0);
        p.line_to(10.0, 5.0).unwrap();
        let c = crossings_from_point(0, p.iter(), 5.0, 5.0, CrossingMode::Standard);
        assert_eq!(c, 1, "close early-exit fired before the overlapping subpath");
    }
}
