//! The mutable path buffer: an ordered tag sequence plus a flat coordinate
//! buffer, with the query surface built on top of it.

use std::cell::Cell;

use crate::bounds::{control_point_bounding_box, drawable_bounding_box};
use crate::crossings::{
    crossings_from_circle, crossings_from_ellipse, crossings_from_path, crossings_from_point,
    crossings_from_rect, crossings_from_round_rect, crossings_from_segment,
    crossings_from_triangle, point_mask, shape_mask, CrossingMode, PathShadow, SHAPE_INTERSECTS,
    SPLINE_APPROXIMATION_RATIO,
};
use crate::flatten::FlatteningIter;
use crate::iter::{RawIter, TransformedIter};
use crate::nearest::{closest_point, farthest_point};
use crate::{Affine, Coordinate, ElementType, Error, PathElement, Point, Rect, Result, WindingRule};

/// Derived path properties, recomputed in one sweep when stale.
#[derive(Clone, Copy, Debug)]
pub(crate) struct PathFlags {
    pub(crate) is_empty: bool,
    pub(crate) is_curved: bool,
    pub(crate) is_polyline: bool,
    pub(crate) is_polygon: bool,
    pub(crate) is_multi_parts: bool,
}

/// A 2D path: an ordered sequence of element tags and a flat buffer of
/// coordinates, two per point.
///
/// The coordinate layout is the invariant the whole kernel rests on:
/// consuming the buffer left to right, each tag takes exactly
/// [`ElementType::point_count`] points, exhausting the buffer with no
/// remainder, and the first tag of a non-empty path is always `MoveTo`.
///
/// Derived properties (`is_empty`, `is_curved`, ...) are memoized against a
/// mutation generation counter and recomputed lazily on first read after a
/// mutation.
///
/// # Examples
///
/// ```
/// use pathwind::Path;
///
/// let mut path = Path::new();
/// path.move_to(0.0, 0.0);
/// path.line_to(10.0, 0.0)?;
/// path.line_to(10.0, 10.0)?;
/// path.line_to(0.0, 10.0)?;
/// path.close_path();
/// assert!(path.contains(5.0, 5.0));
/// assert!(!path.contains(-1.0, -1.0));
/// # Ok::<(), pathwind::Error>(())
/// ```
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path<T> {
    types: Vec<ElementType>,
    coords: Vec<T>,
    winding_rule: WindingRule,
    #[cfg_attr(feature = "serde", serde(skip))]
    generation: Cell<u64>,
    #[cfg_attr(feature = "serde", serde(skip))]
    flags: Cell<Option<(u64, PathFlags)>>,
}

impl<T: Coordinate> Default for Path<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Coordinate> Path<T> {
    /// Create an empty path with the default (`NonZero`) winding rule.
    pub fn new() -> Self {
        Self::with_winding_rule(WindingRule::default())
    }

    /// Create an empty path with the given winding rule.
    pub fn with_winding_rule(winding_rule: WindingRule) -> Self {
        Path {
            types: Vec::new(),
            coords: Vec::new(),
            winding_rule,
            generation: Cell::new(0),
            flags: Cell::new(None),
        }
    }

    /// Create a path by replaying an existing iterator.
    ///
    /// The new path takes the iterator's winding rule.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPathState`] if the iterator yields a drawing
    /// element before any `MoveTo` (which a well-formed iterator never does).
    pub fn from_path_iter<I>(iter: I) -> Result<Self>
    where
        I: crate::PathIter<Coord = T>,
    {
        let mut path = Self::with_winding_rule(iter.winding_rule());
        path.append(iter)?;
        Ok(path)
    }

    #[inline]
    fn bump(&mut self) {
        self.generation.set(self.generation.get().wrapping_add(1));
    }

    fn ensure_started(&self, msg: &'static str) -> Result<()> {
        if self.types.is_empty() {
            Err(Error::InvalidPathState(msg))
        } else {
            Ok(())
        }
    }

    /// Start a new subpath at `(x, y)`.
    ///
    /// Consecutive `move_to` calls collapse into one: if the last element is
    /// already a `MoveTo`, its coordinates are overwritten in place.
    pub fn move_to(&mut self, x: T, y: T) {
        if self.types.last() == Some(&ElementType::MoveTo) {
            let n = self.coords.len();
            self.coords[n - 2] = x;
            self.coords[n - 1] = y;
        } else {
            self.types.push(ElementType::MoveTo);
            self.coords.push(x);
            self.coords.push(y);
        }
        self.bump();
    }

    /// Append a straight segment to `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPathState`] if no `move_to` preceded.
    pub fn line_to(&mut self, x: T, y: T) -> Result<()> {
        self.ensure_started("line_to requires a preceding move_to")?;
        self.types.push(ElementType::LineTo);
        self.coords.push(x);
        self.coords.push(y);
        self.bump();
        Ok(())
    }

    /// Append a quadratic Bézier segment with control point `(cx, cy)`
    /// ending at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPathState`] if no `move_to` preceded.
    pub fn quad_to(&mut self, cx: T, cy: T, x: T, y: T) -> Result<()> {
        self.ensure_started("quad_to requires a preceding move_to")?;
        self.types.push(ElementType::QuadTo);
        self.coords.extend([cx, cy, x, y]);
        self.bump();
        Ok(())
    }

    /// Append a cubic Bézier segment with control points `(cx1, cy1)` and
    /// `(cx2, cy2)` ending at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPathState`] if no `move_to` preceded.
    pub fn curve_to(&mut self, cx1: T, cy1: T, cx2: T, cy2: T, x: T, y: T) -> Result<()> {
        self.ensure_started("curve_to requires a preceding move_to")?;
        self.types.push(ElementType::CurveTo);
        self.coords.extend([cx1, cy1, cx2, cy2, x, y]);
        self.bump();
        Ok(())
    }

    /// Close the current subpath.
    ///
    /// A no-op if the path is empty, already closed, or the last element is
    /// a bare `MoveTo` (there is nothing to close yet).
    pub fn close_path(&mut self) {
        match self.types.last() {
            None | Some(ElementType::Close) | Some(ElementType::MoveTo) => {}
            Some(_) => {
                self.types.push(ElementType::Close);
                self.bump();
            }
        }
    }

    /// Remove the last element and its coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPathState`] if the path is empty.
    pub fn remove_last(&mut self) -> Result<()> {
        let t = self
            .types
            .pop()
            .ok_or(Error::InvalidPathState("remove_last on an empty path"))?;
        let keep = self.coords.len() - 2 * t.point_count();
        self.coords.truncate(keep);
        self.bump();
        Ok(())
    }

    /// Overwrite the final point's coordinates in place.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPathState`] if the path holds no point.
    pub fn set_last_point(&mut self, x: T, y: T) -> Result<()> {
        let n = self.coords.len();
        if n < 2 {
            return Err(Error::InvalidPathState(
                "set_last_point requires at least one point",
            ));
        }
        self.coords[n - 2] = x;
        self.coords[n - 1] = y;
        self.bump();
        Ok(())
    }

    /// Remove the first element any of whose points equals `(x, y)`.
    ///
    /// For `MoveTo`/`LineTo` the single point is compared; for `QuadTo` and
    /// `CurveTo`, a match on *any* control or end point removes the whole
    /// element. Returns whether a removal occurred.
    ///
    /// Note that, as a literal element removal, this can leave a path whose
    /// first tag is no longer `MoveTo` when a leading move is removed out
    /// from under its subpath.
    pub fn remove(&mut self, x: T, y: T) -> bool {
        let mut ci = 0;
        let mut hit = None;
        for (ei, &t) in self.types.iter().enumerate() {
            let pts = t.point_count();
            if (0..pts)
                .any(|p| self.coords[ci + 2 * p] == x && self.coords[ci + 2 * p + 1] == y)
            {
                hit = Some((ei, ci, pts));
                break;
            }
            ci += 2 * pts;
        }
        match hit {
            Some((ei, ci, pts)) => {
                self.types.remove(ei);
                self.coords.drain(ci..ci + 2 * pts);
                self.bump();
                true
            }
            None => false,
        }
    }

    /// Remove every element and coordinate.
    pub fn clear(&mut self) {
        self.types.clear();
        self.coords.clear();
        self.bump();
    }

    /// Replay path elements onto the end of this path.
    ///
    /// Replaying a path's own [`iter`](Self::iter) into an empty path
    /// reproduces its tag and coordinate sequences exactly.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPathState`] if a drawing element arrives
    /// while this path is still empty.
    pub fn append<I>(&mut self, elements: I) -> Result<()>
    where
        I: IntoIterator<Item = PathElement<T>>,
    {
        for el in elements {
            match el {
                PathElement::MoveTo { to } => self.move_to(to.x, to.y),
                PathElement::LineTo { to, .. } => self.line_to(to.x, to.y)?,
                PathElement::QuadTo { ctrl, to, .. } => {
                    self.quad_to(ctrl.x, ctrl.y, to.x, to.y)?;
                }
                PathElement::CurveTo {
                    ctrl1, ctrl2, to, ..
                } => self.curve_to(ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y, to.x, to.y)?,
                PathElement::Close { .. } => self.close_path(),
            }
        }
        Ok(())
    }

    /// The coordinate at `index` in the flat buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index` is past the end.
    pub fn get_coord_at(&self, index: usize) -> Result<T> {
        self.coords
            .get(index)
            .copied()
            .ok_or(Error::IndexOutOfRange {
                index,
                len: self.coords.len(),
            })
    }

    /// The `index`-th point of the path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index` is past the end.
    pub fn get_point_at(&self, index: usize) -> Result<Point<T>> {
        let len = self.point_count();
        if index >= len {
            return Err(Error::IndexOutOfRange { index, len });
        }
        Ok(Point::new(self.coords[2 * index], self.coords[2 * index + 1]))
    }

    /// The tag of the `index`-th element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index` is past the end.
    pub fn get_element_type_at(&self, index: usize) -> Result<ElementType> {
        self.types
            .get(index)
            .copied()
            .ok_or(Error::IndexOutOfRange {
                index,
                len: self.types.len(),
            })
    }

    /// The number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// The number of points in the coordinate buffer.
    #[inline]
    pub fn point_count(&self) -> usize {
        self.coords.len() / 2
    }

    /// The ordered element tags.
    #[inline]
    pub fn element_types(&self) -> &[ElementType] {
        &self.types
    }

    /// The flat coordinate buffer, two values per point.
    #[inline]
    pub fn coords(&self) -> &[T] {
        &self.coords
    }

    /// The final point, if any.
    pub fn last_point(&self) -> Option<Point<T>> {
        let n = self.coords.len();
        if n < 2 {
            None
        } else {
            Some(Point::new(self.coords[n - 2], self.coords[n - 1]))
        }
    }

    /// The path's winding rule.
    #[inline]
    pub fn winding_rule(&self) -> WindingRule {
        self.winding_rule
    }

    /// Replace the path's winding rule.
    #[inline]
    pub fn set_winding_rule(&mut self, rule: WindingRule) {
        self.winding_rule = rule;
    }

    pub(crate) fn flags(&self) -> PathFlags {
        let generation = self.generation.get();
        if let Some((g, f)) = self.flags.get() {
            if g == generation {
                return f;
            }
        }
        let f = self.compute_flags();
        self.flags.set(Some((generation, f)));
        f
    }

    fn compute_flags(&self) -> PathFlags {
        let mut moves = 0usize;
        let mut curved = false;
        let mut drawable = false;
        let mut has_close = false;
        for &t in &self.types {
            match t {
                ElementType::MoveTo => moves += 1,
                ElementType::LineTo => drawable = true,
                ElementType::QuadTo | ElementType::CurveTo => {
                    curved = true;
                    drawable = true;
                }
                ElementType::Close => has_close = true,
            }
        }
        let single_part = moves == 1;
        PathFlags {
            is_empty: !drawable,
            is_curved: curved,
            is_polyline: drawable && !curved && single_part && !has_close,
            is_polygon: drawable
                && !curved
                && single_part
                && self.types.last() == Some(&ElementType::Close),
            is_multi_parts: moves > 1,
        }
    }

    /// Whether the path traces no geometry (only moves and closes).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.flags().is_empty
    }

    /// Whether the path contains at least one Bézier segment.
    #[inline]
    pub fn is_curved(&self) -> bool {
        self.flags().is_curved
    }

    /// Whether the path is a single open run of straight segments.
    #[inline]
    pub fn is_polyline(&self) -> bool {
        self.flags().is_polyline
    }

    /// Whether the path is a single closed run of straight segments.
    #[inline]
    pub fn is_polygon(&self) -> bool {
        self.flags().is_polygon
    }

    /// Whether the path contains more than one subpath.
    #[inline]
    pub fn is_multi_parts(&self) -> bool {
        self.flags().is_multi_parts
    }

    /// An iterator over the path's elements.
    #[inline]
    pub fn iter(&self) -> RawIter<'_, T> {
        RawIter::new(self)
    }

    /// An iterator applying `transform` to every coordinate as it is read.
    #[inline]
    pub fn transformed_iter(&self, transform: Affine) -> TransformedIter<'_, T> {
        TransformedIter::new(self, transform)
    }

    /// An iterator replacing every Bézier segment with line chords deviating
    /// from the true curve by at most `flatness`.
    #[inline]
    pub fn flattened_iter(&self, flatness: f64) -> FlatteningIter<RawIter<'_, T>> {
        FlatteningIter::new(self.iter(), flatness)
    }

    /// A transformed, then flattened, iterator.
    ///
    /// The transform is applied per coordinate first; flattening happens in
    /// the transformed space.
    #[inline]
    pub fn transformed_flattened_iter(
        &self,
        transform: Affine,
        flatness: f64,
    ) -> FlatteningIter<TransformedIter<'_, T>> {
        FlatteningIter::new(self.transformed_iter(transform), flatness)
    }

    /// Whether the path contains the point `(x, y)`.
    ///
    /// Boundary points are inside under either winding rule. Open subpaths
    /// contribute nothing unless the point lies exactly on a drawn segment.
    pub fn contains(&self, x: T, y: T) -> bool {
        let c = crossings_from_point(
            0,
            self.iter(),
            x.to_f64(),
            y.to_f64(),
            CrossingMode::SimpleIntersectionWhenNotPolygon,
        );
        c == SHAPE_INTERSECTS || (c & point_mask(self.winding_rule)) != 0
    }

    /// Whether the path entirely contains the axis-aligned rectangle.
    ///
    /// A degenerate rectangle (zero or negative width or height) is never
    /// contained.
    pub fn contains_rect(&self, xmin: T, ymin: T, xmax: T, ymax: T) -> bool {
        let (xmin, ymin) = (xmin.to_f64(), ymin.to_f64());
        let (xmax, ymax) = (xmax.to_f64(), ymax.to_f64());
        if xmax <= xmin || ymax <= ymin {
            return false;
        }
        let c = crossings_from_rect(
            0,
            self.iter(),
            xmin,
            ymin,
            xmax,
            ymax,
            CrossingMode::AutoClose,
        );
        c != SHAPE_INTERSECTS && (c & shape_mask(self.winding_rule)) != 0
    }

    #[inline]
    fn shape_hit(&self, crossings: i32) -> bool {
        crossings == SHAPE_INTERSECTS || (crossings & shape_mask(self.winding_rule)) != 0
    }

    /// Whether the path intersects the axis-aligned rectangle.
    ///
    /// A degenerate rectangle intersects nothing.
    pub fn intersects_rect(&self, xmin: T, ymin: T, xmax: T, ymax: T) -> bool {
        let (xmin, ymin) = (xmin.to_f64(), ymin.to_f64());
        let (xmax, ymax) = (xmax.to_f64(), ymax.to_f64());
        if xmax <= xmin || ymax <= ymin {
            return false;
        }
        self.shape_hit(crossings_from_rect(
            0,
            self.iter(),
            xmin,
            ymin,
            xmax,
            ymax,
            CrossingMode::SimpleIntersectionWhenNotPolygon,
        ))
    }

    /// Whether the path intersects the circle centered at `(cx, cy)`.
    pub fn intersects_circle(&self, cx: T, cy: T, radius: T) -> bool {
        self.shape_hit(crossings_from_circle(
            0,
            self.iter(),
            cx.to_f64(),
            cy.to_f64(),
            radius.to_f64(),
            CrossingMode::SimpleIntersectionWhenNotPolygon,
        ))
    }

    /// Whether the path intersects the axis-aligned ellipse centered at
    /// `(cx, cy)` with radii `rx` and `ry`.
    pub fn intersects_ellipse(&self, cx: T, cy: T, rx: T, ry: T) -> bool {
        self.shape_hit(crossings_from_ellipse(
            0,
            self.iter(),
            cx.to_f64(),
            cy.to_f64(),
            rx.to_f64(),
            ry.to_f64(),
            CrossingMode::SimpleIntersectionWhenNotPolygon,
        ))
    }

    /// Whether the path intersects the segment from `(x1, y1)` to
    /// `(x2, y2)`.
    pub fn intersects_segment(&self, x1: T, y1: T, x2: T, y2: T) -> bool {
        self.shape_hit(crossings_from_segment(
            0,
            self.iter(),
            x1.to_f64(),
            y1.to_f64(),
            x2.to_f64(),
            y2.to_f64(),
            CrossingMode::SimpleIntersectionWhenNotPolygon,
        ))
    }

    /// Whether the path intersects the triangle with the given vertices.
    #[allow(clippy::too_many_arguments)]
    pub fn intersects_triangle(&self, x1: T, y1: T, x2: T, y2: T, x3: T, y3: T) -> bool {
        self.shape_hit(crossings_from_triangle(
            0,
            self.iter(),
            x1.to_f64(),
            y1.to_f64(),
            x2.to_f64(),
            y2.to_f64(),
            x3.to_f64(),
            y3.to_f64(),
            CrossingMode::SimpleIntersectionWhenNotPolygon,
        ))
    }

    /// Whether the path intersects the round rectangle with corner radii
    /// `aw` and `ah`.
    #[allow(clippy::too_many_arguments)]
    pub fn intersects_round_rect(
        &self,
        xmin: T,
        ymin: T,
        xmax: T,
        ymax: T,
        aw: T,
        ah: T,
    ) -> bool {
        let (xmin, ymin) = (xmin.to_f64(), ymin.to_f64());
        let (xmax, ymax) = (xmax.to_f64(), ymax.to_f64());
        if xmax <= xmin || ymax <= ymin {
            return false;
        }
        self.shape_hit(crossings_from_round_rect(
            0,
            self.iter(),
            xmin,
            ymin,
            xmax,
            ymax,
            aw.to_f64(),
            ah.to_f64(),
            CrossingMode::SimpleIntersectionWhenNotPolygon,
        ))
    }

    /// Whether the path intersects another path.
    pub fn intersects_path(&self, other: &Path<T>) -> bool {
        let shadow = PathShadow::new(other);
        self.shape_hit(crossings_from_path(
            0,
            self.iter(),
            &shadow,
            CrossingMode::SimpleIntersectionWhenNotPolygon,
        ))
    }

    /// The bounding box of the traced geometry.
    ///
    /// Control points that pull a curve are not included unless the curve
    /// actually reaches them; an empty path yields the canonical empty box.
    pub fn bounding_box(&self) -> Rect<T> {
        drawable_bounding_box(self.iter()).unwrap_or_default()
    }

    /// The bounding box of every control and end point of the path's
    /// drawable elements.
    ///
    /// Always contains [`bounding_box`](Self::bounding_box); Bézier control
    /// points outside the rendered curve widen only this box.
    pub fn control_point_bounding_box(&self) -> Rect<T> {
        control_point_bounding_box(self.iter()).unwrap_or_default()
    }

    /// The closest point on the path's outline to `(x, y)`, or the query
    /// point itself when it is proven inside a closed subpath.
    ///
    /// Curves are flattened internally before solving.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPathState`] if the path has no elements.
    pub fn closest_point_to(&self, x: T, y: T) -> Result<Point<T>> {
        closest_point(
            self.flattened_iter(SPLINE_APPROXIMATION_RATIO),
            x.to_f64(),
            y.to_f64(),
        )
    }

    /// The farthest point on the path's outline from `(x, y)`.
    ///
    /// Curves are flattened internally before solving.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPathState`] if the path has no elements.
    pub fn farthest_point_to(&self, x: T, y: T) -> Result<Point<T>> {
        farthest_point(
            self.flattened_iter(SPLINE_APPROXIMATION_RATIO),
            x.to_f64(),
            y.to_f64(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WindingRule;

    fn rect_path() -> Path<f64> {
        let mut p = Path::new();
        p.move_to(0.0, 0.0);
        p.line_to(10.0, 0.0).unwrap();
        p.line_to(10.0, 10.0).unwrap();
        p.line_to(0.0, 10.0).unwrap();
        p.close_path();
        p
    }

    #[test]
    fn consecutive_move_to_collapses() {
        let mut p = Path::new();
        p.move_to(1.0, 1.0);
        p.move_to(2.0, 2.0);
        assert_eq!(p.len(), 1);
        assert_eq!(p.coords(), &[2.0, 2.0]);
        p.line_to(3.0, 3.0).unwrap();
        p.move_to(4.0, 4.0);
        assert_eq!(p.len(), 3);
    }

    #[test]
    fn close_path_no_ops() {
        let mut p: Path<f64> = Path::new();
        p.close_path();
        assert_eq!(p.len(), 0);
        p.move_to(0.0, 0.0);
        p.close_path();
        assert_eq!(p.len(), 1, "close after a bare move is a no-op");
        p.line_to(1.0, 0.0).unwrap();
        p.close_path();
        p.close_path();
        assert_eq!(
            p.element_types(),
            &[ElementType::MoveTo, ElementType::LineTo, ElementType::Close]
        );
    }

    #[test]
    fn draw_before_move_fails() {
        let mut p: Path<f64> = Path::new();
        assert_eq!(
            p.line_to(1.0, 1.0),
            Err(Error::InvalidPathState("line_to requires a preceding move_to"))
        );
        assert!(p.quad_to(0.0, 0.0, 1.0, 1.0).is_err());
        assert!(p.curve_to(0.0, 0.0, 1.0, 1.0, 2.0, 2.0).is_err());
    }

    #[test]
    fn remove_last_pops_coords() {
        let mut p = Path::new();
        p.move_to(0.0, 0.0);
        p.curve_to(1.0, 2.0, 3.0, 4.0, 5.0, 6.0).unwrap();
        p.close_path();
        p.remove_last().unwrap();
        assert_eq!(p.coords().len(), 8, "close carries no coordinates");
        p.remove_last().unwrap();
        assert_eq!(p.coords().len(), 2);
        p.remove_last().unwrap();
        assert_eq!(
            p.remove_last(),
            Err(Error::InvalidPathState("remove_last on an empty path"))
        );
    }

    #[test]
    fn set_last_point_overwrites() {
        let mut p = Path::new();
        assert!(p.set_last_point(1.0, 1.0).is_err());
        p.move_to(0.0, 0.0);
        p.line_to(5.0, 5.0).unwrap();
        p.set_last_point(7.0, 8.0).unwrap();
        assert_eq!(p.last_point(), Some(Point::new(7.0, 8.0)));
    }

    #[test]
    fn remove_by_coordinate_takes_whole_element() {
        let mut p = Path::new();
        p.move_to(0.0, 0.0);
        p.curve_to(1.0, 5.0, 2.0, 5.0, 3.0, 0.0).unwrap();
        p.quad_to(4.0, 5.0, 5.0, 0.0).unwrap();
        let elements = p.len();
        let coords = p.coords().len();

        // interior control point of the cubic
        assert!(p.remove(2.0, 5.0));
        assert_eq!(p.len(), elements - 1);
        assert_eq!(p.coords().len(), coords - 6);

        // control point of the quadratic
        assert!(p.remove(4.0, 5.0));
        assert_eq!(p.coords().len(), coords - 6 - 4);
        assert!(!p.remove(42.0, 42.0));
    }

    #[test]
    fn indexed_access() {
        let mut p = Path::new();
        p.move_to(1.0, 2.0);
        p.line_to(3.0, 4.0).unwrap();
        assert_eq!(p.get_coord_at(3).unwrap(), 4.0);
        assert_eq!(p.get_point_at(1).unwrap(), Point::new(3.0, 4.0));
        assert_eq!(p.get_element_type_at(0).unwrap(), ElementType::MoveTo);
        assert_eq!(
            p.get_point_at(2),
            Err(Error::IndexOutOfRange { index: 2, len: 2 })
        );
        assert_eq!(
            p.get_coord_at(4),
            Err(Error::IndexOutOfRange { index: 4, len: 4 })
        );
    }

    #[test]
    fn round_trip_through_iterator() {
        let mut p = Path::new();
        p.move_to(0.0, 0.0);
        p.line_to(4.0, 0.0).unwrap();
        p.quad_to(6.0, 2.0, 4.0, 4.0).unwrap();
        p.curve_to(2.0, 6.0, 1.0, 5.0, 0.0, 4.0).unwrap();
        p.close_path();
        p.move_to(10.0, 10.0);
        p.line_to(11.0, 10.0).unwrap();

        let q = Path::from_path_iter(p.iter()).unwrap();
        assert_eq!(p.element_types(), q.element_types());
        assert_eq!(p.coords(), q.coords());
        assert_eq!(p.winding_rule(), q.winding_rule());
    }

    #[test]
    fn derived_flags() {
        let mut p = Path::new();
        assert!(p.is_empty());
        p.move_to(0.0, 0.0);
        assert!(p.is_empty(), "a bare move traces nothing");
        p.line_to(1.0, 0.0).unwrap();
        p.line_to(1.0, 1.0).unwrap();
        assert!(p.is_polyline());
        assert!(!p.is_polygon());
        p.close_path();
        assert!(p.is_polygon());
        assert!(!p.is_polyline());
        p.move_to(5.0, 5.0);
        assert!(p.is_multi_parts());
        p.quad_to(6.0, 6.0, 7.0, 5.0).unwrap();
        assert!(p.is_curved());
        p.clear();
        assert!(p.is_empty());
        assert_eq!(p.len(), 0);
    }

    #[test]
    fn contains_inclusive_boundary() {
        let p = rect_path();
        assert!(p.contains(5.0, 5.0));
        assert!(!p.contains(-1.0, -1.0));
        assert!(p.contains(10.0, 5.0), "boundary points are inside");
    }

    #[test]
    fn even_odd_contains() {
        let mut p = rect_path();
        p.set_winding_rule(WindingRule::EvenOdd);
        assert!(p.contains(5.0, 5.0));
        assert!(!p.contains(11.0, 5.0));
        assert!(p.contains(10.0, 5.0), "boundary inclusive under even-odd");
    }

    #[test]
    fn integer_path_contains() {
        let mut p: Path<i32> = Path::new();
        p.move_to(0, 0);
        p.line_to(10, 0).unwrap();
        p.line_to(10, 10).unwrap();
        p.line_to(0, 10).unwrap();
        p.close_path();
        assert!(p.contains(5, 5));
        assert!(!p.contains(-1, -1));
    }

    #[test]
    fn rect_predicates() {
        let p = rect_path();
        assert!(p.contains_rect(2.0, 2.0, 8.0, 8.0));
        assert!(!p.contains_rect(2.0, 2.0, 12.0, 8.0));
        assert!(p.intersects_rect(2.0, 2.0, 12.0, 8.0));
        assert!(!p.intersects_rect(11.0, 11.0, 20.0, 20.0));
        assert!(!p.intersects_rect(5.0, 5.0, 5.0, 9.0), "degenerate rect");
        assert!(!p.contains_rect(5.0, 9.0, 5.0, 9.0), "degenerate rect");
    }
}
