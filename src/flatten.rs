//! Curve flattening: replacing Bézier segments with line chords.
//!
//! The flattener is a depth-first subdivision without a call stack: segment
//! coordinates live in a scratch buffer that grows from the front, and a
//! parallel array records each held segment's recursion depth. Subdividing
//! pushes the left half in front of the right half; emitting pops one chord
//! and continues with the most recently pushed half. Chord endpoints are
//! always exact points on the original curve.

use log::trace;
use smallvec::{smallvec, SmallVec};

use crate::iter::PathIter;
use crate::shadow::point_segment_distance_sq;
use crate::{Coordinate, ElementType, PathElement, Point, WindingRule};

/// The default recursion limit for curve subdivision.
///
/// When a segment reaches this depth it is accepted as a chord even if the
/// flatness tolerance is not yet met; deeper recursion rarely buys visible
/// precision and this bounds every flattening walk.
pub const DEFAULT_FLATTENING_LIMIT: usize = 10;

const INITIAL_HOLD: usize = 14;
const HOLD_GROW: usize = 24;

/// Scratch storage for the subdivision walk.
///
/// Owned exclusively by one [`FlatteningIter`]; dropped with it.
#[derive(Debug)]
struct FlatteningState {
    /// Segment coordinates, packed back to front; adjacent held segments
    /// share their common endpoint slots.
    hold: SmallVec<[f64; 28]>,
    /// Recursion depth of each held segment.
    levels: SmallVec<[usize; DEFAULT_FLATTENING_LIMIT + 2]>,
    hold_index: usize,
    hold_end: usize,
    level_index: usize,
}

impl FlatteningState {
    fn new(limit: usize) -> Self {
        FlatteningState {
            hold: smallvec![0.0; INITIAL_HOLD],
            levels: smallvec![0; limit + 1],
            hold_index: 0,
            hold_end: 0,
            level_index: 0,
        }
    }

    #[inline]
    fn has_pending(&self) -> bool {
        self.hold_index < self.hold_end
    }

    fn load(&mut self, coords: &[f64]) {
        if self.hold.len() < INITIAL_HOLD {
            self.hold.resize(INITIAL_HOLD, 0.0);
        }
        let len = self.hold.len();
        self.hold_index = len - coords.len();
        self.hold_end = len - 2;
        self.hold[self.hold_index..].copy_from_slice(coords);
        self.levels[0] = 0;
        self.level_index = 0;
    }

    /// Make room for one more held segment in front of `hold_index`.
    fn ensure_front_capacity(&mut self, want: usize) {
        if self.hold_index < want {
            let mut grown = SmallVec::with_capacity(self.hold.len() + HOLD_GROW);
            grown.extend(std::iter::repeat(0.0).take(HOLD_GROW));
            grown.extend_from_slice(&self.hold);
            self.hold = grown;
            self.hold_index += HOLD_GROW;
            self.hold_end += HOLD_GROW;
        }
    }
}

#[inline]
fn quad_flatness_sq(hold: &[f64], ix: usize) -> f64 {
    point_segment_distance_sq(
        hold[ix + 2],
        hold[ix + 3],
        hold[ix],
        hold[ix + 1],
        hold[ix + 4],
        hold[ix + 5],
    )
}

#[inline]
fn cubic_flatness_sq(hold: &[f64], ix: usize) -> f64 {
    let d1 = point_segment_distance_sq(
        hold[ix + 2],
        hold[ix + 3],
        hold[ix],
        hold[ix + 1],
        hold[ix + 6],
        hold[ix + 7],
    );
    let d2 = point_segment_distance_sq(
        hold[ix + 4],
        hold[ix + 5],
        hold[ix],
        hold[ix + 1],
        hold[ix + 6],
        hold[ix + 7],
    );
    d1.max(d2)
}

/// Split the quadratic at `ix..ix + 6` in half, writing the left half at
/// `ix - 4` and the right half in place. The halves share the midpoint slot.
fn subdivide_quad(hold: &mut [f64], ix: usize) {
    let (x0, y0) = (hold[ix], hold[ix + 1]);
    let (cx, cy) = (hold[ix + 2], hold[ix + 3]);
    let (x1, y1) = (hold[ix + 4], hold[ix + 5]);
    let (lcx, lcy) = (0.5 * (x0 + cx), 0.5 * (y0 + cy));
    let (rcx, rcy) = (0.5 * (cx + x1), 0.5 * (cy + y1));
    let (mx, my) = (0.5 * (lcx + rcx), 0.5 * (lcy + rcy));
    hold[ix - 4] = x0;
    hold[ix - 3] = y0;
    hold[ix - 2] = lcx;
    hold[ix - 1] = lcy;
    hold[ix] = mx;
    hold[ix + 1] = my;
    hold[ix + 2] = rcx;
    hold[ix + 3] = rcy;
}

/// Split the cubic at `ix..ix + 8` in half, writing the left half at
/// `ix - 6` and the right half in place.
fn subdivide_cubic(hold: &mut [f64], ix: usize) {
    let (x0, y0) = (hold[ix], hold[ix + 1]);
    let (c1x, c1y) = (hold[ix + 2], hold[ix + 3]);
    let (c2x, c2y) = (hold[ix + 4], hold[ix + 5]);
    let (x1, y1) = (hold[ix + 6], hold[ix + 7]);
    let (l1x, l1y) = (0.5 * (x0 + c1x), 0.5 * (y0 + c1y));
    let (hx, hy) = (0.5 * (c1x + c2x), 0.5 * (c1y + c2y));
    let (r2x, r2y) = (0.5 * (c2x + x1), 0.5 * (c2y + y1));
    let (l2x, l2y) = (0.5 * (l1x + hx), 0.5 * (l1y + hy));
    let (r1x, r1y) = (0.5 * (hx + r2x), 0.5 * (hy + r2y));
    let (mx, my) = (0.5 * (l2x + r1x), 0.5 * (l2y + r1y));
    hold[ix - 6] = x0;
    hold[ix - 5] = y0;
    hold[ix - 4] = l1x;
    hold[ix - 3] = l1y;
    hold[ix - 2] = l2x;
    hold[ix - 1] = l2y;
    hold[ix] = mx;
    hold[ix + 1] = my;
    hold[ix + 2] = r1x;
    hold[ix + 3] = r1y;
    hold[ix + 4] = r2x;
    hold[ix + 5] = r2y;
}

/// An iterator replacing every Bézier element of the wrapped iterator with
/// line chords.
///
/// Move, line and close elements pass through unchanged; quadratic and
/// cubic elements are subdivided until each chord's squared perpendicular
/// deviation drops below the flatness tolerance or the recursion limit is
/// reached. The postcondition is `is_curved() == false`, which is what the
/// point solvers require.
#[derive(Debug)]
pub struct FlatteningIter<I: PathIter> {
    inner: I,
    flatness_sq: f64,
    limit: usize,
    state: FlatteningState,
    hold_type: ElementType,
    last: Point<I::Coord>,
    last_move: Point<I::Coord>,
}

impl<I: PathIter> FlatteningIter<I> {
    /// Wrap `inner`, flattening curves to within `flatness` with the
    /// default recursion limit.
    pub fn new(inner: I, flatness: f64) -> Self {
        Self::with_limit(inner, flatness, DEFAULT_FLATTENING_LIMIT)
    }

    /// Wrap `inner` with an explicit recursion limit.
    pub fn with_limit(inner: I, flatness: f64, limit: usize) -> Self {
        FlatteningIter {
            inner,
            flatness_sq: flatness * flatness,
            limit,
            state: FlatteningState::new(limit),
            hold_type: ElementType::LineTo,
            last: Point::default(),
            last_move: Point::default(),
        }
    }

    /// The flatness tolerance this iterator was built with.
    #[inline]
    pub fn flatness(&self) -> f64 {
        self.flatness_sq.sqrt()
    }

    fn next_chord(&mut self) -> PathElement<I::Coord> {
        let dim = if self.hold_type == ElementType::QuadTo {
            4
        } else {
            6
        };
        let s = &mut self.state;
        let mut level = s.levels[s.level_index];
        while level < self.limit {
            let deviation_sq = if dim == 4 {
                quad_flatness_sq(&s.hold, s.hold_index)
            } else {
                cubic_flatness_sq(&s.hold, s.hold_index)
            };
            if deviation_sq < self.flatness_sq {
                break;
            }
            s.ensure_front_capacity(dim);
            if dim == 4 {
                subdivide_quad(&mut s.hold, s.hold_index);
            } else {
                subdivide_cubic(&mut s.hold, s.hold_index);
            }
            s.hold_index -= dim;
            level += 1;
            s.levels[s.level_index] = level;
            s.level_index += 1;
            s.levels[s.level_index] = level;
        }
        if level >= self.limit {
            trace!("flattening depth limit {} reached, accepting segment", self.limit);
        }
        // The held segment is flat enough (or too deep); its endpoint is
        // the next chord target, and the following held segment starts
        // there.
        let ex = s.hold[s.hold_index + dim];
        let ey = s.hold[s.hold_index + dim + 1];
        s.hold_index += dim;
        s.level_index = s.level_index.saturating_sub(1);
        let to = Point::new(I::Coord::from_f64(ex), I::Coord::from_f64(ey));
        let el = PathElement::LineTo {
            from: self.last,
            to,
        };
        self.last = to;
        el
    }
}

impl<I: PathIter> Iterator for FlatteningIter<I> {
    type Item = PathElement<I::Coord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.state.has_pending() {
            return Some(self.next_chord());
        }
        let el = match self.inner.next()? {
            PathElement::MoveTo { to } => {
                self.last = to;
                self.last_move = to;
                PathElement::MoveTo { to }
            }
            PathElement::LineTo { to, .. } => {
                let el = PathElement::LineTo {
                    from: self.last,
                    to,
                };
                self.last = to;
                el
            }
            PathElement::Close { .. } => {
                let el = PathElement::Close {
                    from: self.last,
                    to: self.last_move,
                };
                self.last = self.last_move;
                el
            }
            PathElement::QuadTo { from, ctrl, to } => {
                let (p0, c, p1) = (from.to_f64(), ctrl.to_f64(), to.to_f64());
                self.state.load(&[p0.x, p0.y, c.x, c.y, p1.x, p1.y]);
                self.hold_type = ElementType::QuadTo;
                self.next_chord()
            }
            PathElement::CurveTo {
                from,
                ctrl1,
                ctrl2,
                to,
            } => {
                let (p0, c1, c2, p1) = (
                    from.to_f64(),
                    ctrl1.to_f64(),
                    ctrl2.to_f64(),
                    to.to_f64(),
                );
                self.state
                    .load(&[p0.x, p0.y, c1.x, c1.y, c2.x, c2.y, p1.x, p1.y]);
                self.hold_type = ElementType::CurveTo;
                self.next_chord()
            }
        };
        Some(el)
    }
}

impl<I: PathIter> PathIter for FlatteningIter<I> {
    type Coord = I::Coord;

    fn winding_rule(&self) -> WindingRule {
        self.inner.winding_rule()
    }

    fn is_curved(&self) -> bool {
        false
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
        FlatteningIter::with_limit(
            self.inner.restart(),
            self.flatness_sq.sqrt(),
            self.limit,
        )
    }
}

/// A one-curve sub-path over scratch coordinates.
///
/// The crossing engine and the bounding-box sweep reroute each Bézier
/// element through one of these (move + single curve) instead of
/// materializing a full path per recursive evaluation.
#[derive(Clone, Debug)]
pub(crate) struct CurveScratch {
    coords: arrayvec::ArrayVec<f64, 8>,
    kind: ElementType,
    rule: WindingRule,
    index: usize,
}

impl CurveScratch {
    pub(crate) fn quad(
        x0: f64,
        y0: f64,
        cx: f64,
        cy: f64,
        x1: f64,
        y1: f64,
        rule: WindingRule,
    ) -> Self {
        let mut coords = arrayvec::ArrayVec::new();
        coords.extend([x0, y0, cx, cy, x1, y1]);
        CurveScratch {
            coords,
            kind: ElementType::QuadTo,
            rule,
            index: 0,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn cubic(
        x0: f64,
        y0: f64,
        c1x: f64,
        c1y: f64,
        c2x: f64,
        c2y: f64,
        x1: f64,
        y1: f64,
        rule: WindingRule,
    ) -> Self {
        let mut coords = arrayvec::ArrayVec::new();
        coords.extend([x0, y0, c1x, c1y, c2x, c2y, x1, y1]);
        CurveScratch {
            coords,
            kind: ElementType::CurveTo,
            rule,
            index: 0,
        }
    }

    #[inline]
    fn point(&self, i: usize) -> Point<f64> {
        Point::new(self.coords[2 * i], self.coords[2 * i + 1])
    }
}

impl Iterator for CurveScratch {
    type Item = PathElement<f64>;

    fn next(&mut self) -> Option<PathElement<f64>> {
        let el = match self.index {
            0 => PathElement::MoveTo { to: self.point(0) },
            1 => match self.kind {
                ElementType::QuadTo => PathElement::QuadTo {
                    from: self.point(0),
                    ctrl: self.point(1),
                    to: self.point(2),
                },
                _ => PathElement::CurveTo {
                    from: self.point(0),
                    ctrl1: self.point(1),
                    ctrl2: self.point(2),
                    to: self.point(3),
                },
            },
            _ => return None,
        };
        self.index += 1;
        Some(el)
    }
}

impl PathIter for CurveScratch {
    type Coord = f64;

    fn winding_rule(&self) -> WindingRule {
        self.rule
    }

    fn is_curved(&self) -> bool {
        true
    }

    fn is_polyline(&self) -> bool {
        false
    }

    fn is_polygon(&self) -> bool {
        false
    }

    fn is_multi_parts(&self) -> bool {
        false
    }

    fn restart(&self) -> Self {
        let mut fresh = self.clone();
        fresh.index = 0;
        fresh
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iter::PathIter;
    use crate::{Path, PathElement, Point};

    fn eval_quad(p0: Point<f64>, c: Point<f64>, p1: Point<f64>, t: f64) -> Point<f64> {
        let mt = 1.0 - t;
        Point::new(
            mt * mt * p0.x + 2.0 * mt * t * c.x + t * t * p1.x,
            mt * mt * p0.y + 2.0 * mt * t * c.y + t * t * p1.y,
        )
    }

    fn eval_cubic(
        p0: Point<f64>,
        c1: Point<f64>,
        c2: Point<f64>,
        p1: Point<f64>,
        t: f64,
    ) -> Point<f64> {
        let mt = 1.0 - t;
        let (a, b, c, d) = (mt * mt * mt, 3.0 * mt * mt * t, 3.0 * mt * t * t, t * t * t);
        Point::new(
            a * p0.x + b * c1.x + c * c2.x + d * p1.x,
            a * p0.y + b * c1.y + c * c2.y + d * p1.y,
        )
    }

    fn polyline_distance_sq(chords: &[(Point<f64>, Point<f64>)], p: Point<f64>) -> f64 {
        chords
            .iter()
            .map(|&(a, b)| point_segment_distance_sq(p.x, p.y, a.x, a.y, b.x, b.y))
            .fold(f64::INFINITY, f64::min)
    }

    fn chords_of(path: &Path<f64>, flatness: f64) -> Vec<(Point<f64>, Point<f64>)> {
        path.flattened_iter(flatness)
            .filter_map(|el| match el {
                PathElement::LineTo { from, to } => Some((from, to)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn quad_flattening_converges() {
        let (p0, c, p1) = (
            Point::new(0.0, 0.0),
            Point::new(5.0, 10.0),
            Point::new(10.0, 0.0),
        );
        let mut path = Path::new();
        path.move_to(p0.x, p0.y);
        path.quad_to(c.x, c.y, p1.x, p1.y).unwrap();

        for flatness in [1.0, 0.1, 0.01] {
            let chords = chords_of(&path, flatness);
            assert!(!chords.is_empty());
            assert_eq!(chords.first().unwrap().0, p0);
            assert_eq!(chords.last().unwrap().1, p1);
            for i in 0..=64 {
                let t = i as f64 / 64.0;
                let on_curve = eval_quad(p0, c, p1, t);
                let d2 = polyline_distance_sq(&chords, on_curve);
                assert!(
                    d2 <= flatness * flatness * (1.0 + 1e-9),
                    "deviation {} exceeds flatness {flatness}",
                    d2.sqrt()
                );
            }
        }
    }

    #[test]
    fn cubic_flattening_converges() {
        let (p0, c1, c2, p1) = (
            Point::new(0.0, 0.0),
            Point::new(0.0, 12.0),
            Point::new(10.0, -12.0),
            Point::new(10.0, 0.0),
        );
        let mut path = Path::new();
        path.move_to(p0.x, p0.y);
        path.curve_to(c1.x, c1.y, c2.x, c2.y, p1.x, p1.y).unwrap();

        let flatness = 0.05;
        let chords = chords_of(&path, flatness);
        assert_eq!(chords.first().unwrap().0, p0);
        assert_eq!(chords.last().unwrap().1, p1);
        for i in 0..=128 {
            let t = i as f64 / 128.0;
            let on_curve = eval_cubic(p0, c1, c2, p1, t);
            let d2 = polyline_distance_sq(&chords, on_curve);
            assert!(d2 <= flatness * flatness * (1.0 + 1e-9));
        }
    }

    #[test]
    fn depth_limit_bounds_chord_count() {
        let mut path = Path::new();
        path.move_to(0.0, 0.0);
        path.quad_to(500.0, 1000.0, 1000.0, 0.0).unwrap();

        let limited = FlatteningIter::with_limit(path.iter(), 1e-9, 2);
        let chords = limited
            .filter(|el| matches!(el, PathElement::LineTo { .. }))
            .count();
        assert_eq!(chords, 4, "depth 2 yields exactly 2^2 chords");

        // The default limit also terminates on an impossible tolerance.
        let chords = path
            .flattened_iter(0.0)
            .filter(|el| matches!(el, PathElement::LineTo { .. }))
            .count();
        assert_eq!(chords, 1 << DEFAULT_FLATTENING_LIMIT);
    }

    #[test]
    fn passthrough_and_postcondition() {
        let mut path = Path::new();
        path.move_to(0.0, 0.0);
        path.line_to(5.0, 5.0).unwrap();
        path.quad_to(7.0, 9.0, 9.0, 5.0).unwrap();
        path.close_path();

        let it = path.flattened_iter(0.25);
        assert!(!it.is_curved());
        let els: Vec<_> = it.collect();
        assert!(matches!(els[0], PathElement::MoveTo { .. }));
        assert!(matches!(els[1], PathElement::LineTo { .. }));
        assert!(els.iter().all(|el| !el.is_curved()));
        match els.last().unwrap() {
            PathElement::Close { from, to } => {
                assert_eq!(*to, Point::new(0.0, 0.0));
                assert_eq!(*from, Point::new(9.0, 5.0), "close starts at the curve end");
            }
            other => panic!("expected close, got {other:?}"),
        }
    }

    #[test]
    fn integer_chords_snap_at_emission() {
        let mut path: Path<i32> = Path::new();
        path.move_to(0, 0);
        path.quad_to(5, 10, 10, 0).unwrap();
        let els: Vec<_> = path.flattened_iter(0.5).collect();
        // Every chord is integer-typed; endpoints of the curve survive
        // exactly.
        match els.last().unwrap() {
            PathElement::LineTo { to, .. } => assert_eq!(*to, Point::new(10, 0)),
            other => panic!("expected line, got {other:?}"),
        }
    }

    #[test]
    fn transform_composes_before_flattening() {
        let mut path = Path::new();
        path.move_to(0.0, 0.0);
        path.quad_to(5.0, 10.0, 10.0, 0.0).unwrap();

        let t = crate::Affine::translate((100.0, 0.0));
        let shifted: Vec<_> = path
            .transformed_flattened_iter(t, 0.1)
            .filter_map(|el| match el {
                PathElement::LineTo { to, .. } => Some(to),
                _ => None,
            })
            .collect();
        let plain: Vec<_> = chords_of(&path, 0.1).iter().map(|&(_, to)| to).collect();
        assert_eq!(shifted.len(), plain.len());
        for (s, p) in shifted.iter().zip(&plain) {
            approx::assert_abs_diff_eq!(s.x, p.x + 100.0, epsilon = 1e-9);
            approx::assert_abs_diff_eq!(s.y, p.y, epsilon = 1e-9);
        }
    }

    #[test]
    fn curve_scratch_is_a_two_element_subpath() {
        let scratch = CurveScratch::quad(0.0, 0.0, 5.0, 10.0, 10.0, 0.0, WindingRule::NonZero);
        assert!(scratch.is_curved());
        let els: Vec<_> = scratch.clone().collect();
        assert_eq!(els.len(), 2);
        assert!(matches!(els[0], PathElement::MoveTo { .. }));
        assert!(matches!(els[1], PathElement::QuadTo { .. }));
        let flat: Vec<_> = FlatteningIter::new(scratch, 0.25).collect();
        assert!(flat.iter().all(|el| !el.is_curved()));
    }
}
