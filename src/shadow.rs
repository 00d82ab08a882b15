//! Per-shape segment crossing primitives.
//!
//! Each reference shape exposes its "shadow": given one path segment, how
//! does that segment change the signed crossing count accumulated for the
//! shape, and does it overlap the shape outright? The traversal engine in
//! [`crate::crossings`] knows nothing about shapes; it feeds every flattened
//! segment through one of these.
//!
//! All shadows share one scheme: trivially reject segments entirely above,
//! below or left of the shadow's bounds; count band entries/exits for
//! segments entirely to the right; report interior overlap with the
//! [`SHAPE_INTERSECTS`] sentinel; and otherwise accumulate the ray crossings
//! of the shape's bottom-most and top-most boundary points, so a path
//! enclosing the shape accumulates two crossings per wind.

use crate::crossings::SHAPE_INTERSECTS;
use crate::{Point, Vec2};

/// A reference shape's crossing primitives.
pub(crate) trait Shadow {
    /// Fold one segment into the running crossing count, or return
    /// [`SHAPE_INTERSECTS`] if the segment overlaps the shape.
    fn crossings(&self, crossings: i32, x0: f64, y0: f64, x1: f64, y1: f64) -> i32;
}

/// Signed crossing contribution of a segment for a +X ray from `(px, py)`.
///
/// +1 for a Y-increasing crossing, -1 for Y-decreasing, 0 for horizontal
/// segments and misses. The crossing interval is half-open at the upper end
/// so shared vertices are not counted twice.
pub(crate) fn point_crossings_for_line(
    px: f64,
    py: f64,
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
) -> i32 {
    if py < y0 && py < y1 {
        return 0;
    }
    if py >= y0 && py >= y1 {
        return 0;
    }
    if px >= x0 && px >= x1 {
        return 0;
    }
    let sign = if y0 < y1 { 1 } else { -1 };
    if px < x0 && px < x1 {
        return sign;
    }
    let xint = x0 + (py - y0) * (x1 - x0) / (y1 - y0);
    if px >= xint {
        0
    } else {
        sign
    }
}

#[inline]
fn orient(ax: f64, ay: f64, bx: f64, by: f64, cx: f64, cy: f64) -> f64 {
    (bx - ax) * (cy - ay) - (by - ay) * (cx - ax)
}

/// Whether `(px, py)` lies exactly on the segment, degenerate segments
/// included.
pub(crate) fn point_on_segment(px: f64, py: f64, ax: f64, ay: f64, bx: f64, by: f64) -> bool {
    if orient(ax, ay, bx, by, px, py) != 0.0 {
        return false;
    }
    px >= ax.min(bx) && px <= ax.max(bx) && py >= ay.min(by) && py <= ay.max(by)
}

/// The closest point of a segment to `(px, py)` (clamped projection).
pub(crate) fn closest_on_segment(
    px: f64,
    py: f64,
    ax: f64,
    ay: f64,
    bx: f64,
    by: f64,
) -> Point<f64> {
    let d = Vec2::new(bx - ax, by - ay);
    let q = Vec2::new(px - ax, py - ay);
    let len2 = d.hypot2();
    if len2 == 0.0 {
        // Zero-length segment, the endpoint is all there is.
        return Point::new(ax, ay);
    }
    let t = (q.dot(d) / len2).clamp(0.0, 1.0);
    Point::new(ax + t * d.x, ay + t * d.y)
}

/// Squared distance from `(px, py)` to the segment.
pub(crate) fn point_segment_distance_sq(
    px: f64,
    py: f64,
    ax: f64,
    ay: f64,
    bx: f64,
    by: f64,
) -> f64 {
    let c = closest_on_segment(px, py, ax, ay, bx, by);
    let (dx, dy) = (px - c.x, py - c.y);
    dx * dx + dy * dy
}

/// Whether two segments intersect, endpoint touches and collinear overlap
/// included.
#[allow(clippy::too_many_arguments)]
pub(crate) fn segments_intersect(
    ax: f64,
    ay: f64,
    bx: f64,
    by: f64,
    cx: f64,
    cy: f64,
    dx: f64,
    dy: f64,
) -> bool {
    let d1 = orient(cx, cy, dx, dy, ax, ay);
    let d2 = orient(cx, cy, dx, dy, bx, by);
    let d3 = orient(ax, ay, bx, by, cx, cy);
    let d4 = orient(ax, ay, bx, by, dx, dy);
    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }
    (d1 == 0.0 && point_on_segment(ax, ay, cx, cy, dx, dy))
        || (d2 == 0.0 && point_on_segment(bx, by, cx, cy, dx, dy))
        || (d3 == 0.0 && point_on_segment(cx, cy, ax, ay, bx, by))
        || (d4 == 0.0 && point_on_segment(dx, dy, ax, ay, bx, by))
}

/// Whether the segment touches the (closed) axis-aligned rectangle.
#[allow(clippy::too_many_arguments)]
pub(crate) fn segment_intersects_rect(
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    xmin: f64,
    ymin: f64,
    xmax: f64,
    ymax: f64,
) -> bool {
    let inside = |x: f64, y: f64| x > xmin && x < xmax && y > ymin && y < ymax;
    if inside(x0, y0) || inside(x1, y1) {
        return true;
    }
    segments_intersect(x0, y0, x1, y1, xmin, ymin, xmax, ymin)
        || segments_intersect(x0, y0, x1, y1, xmax, ymin, xmax, ymax)
        || segments_intersect(x0, y0, x1, y1, xmax, ymax, xmin, ymax)
        || segments_intersect(x0, y0, x1, y1, xmin, ymax, xmin, ymin)
}

/// Whether the segment touches the (closed) circle.
pub(crate) fn segment_intersects_circle(
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    cx: f64,
    cy: f64,
    r: f64,
) -> bool {
    point_segment_distance_sq(cx, cy, x0, y0, x1, y1) <= r * r
}

/// Whether the segment touches the (closed) axis-aligned ellipse.
#[allow(clippy::too_many_arguments)]
pub(crate) fn segment_intersects_ellipse(
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    cx: f64,
    cy: f64,
    rx: f64,
    ry: f64,
) -> bool {
    if rx == 0.0 || ry == 0.0 {
        // A degenerate ellipse has no interior to overlap.
        return false;
    }
    // Scale into the space where the ellipse is the unit circle.
    point_segment_distance_sq(
        0.0,
        0.0,
        (x0 - cx) / rx,
        (y0 - cy) / ry,
        (x1 - cx) / rx,
        (y1 - cy) / ry,
    ) <= 1.0
}

/// Whether `(px, py)` lies in the (closed) triangle.
#[allow(clippy::too_many_arguments)]
pub(crate) fn point_in_triangle(
    px: f64,
    py: f64,
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    x3: f64,
    y3: f64,
) -> bool {
    let d1 = orient(x1, y1, x2, y2, px, py);
    let d2 = orient(x2, y2, x3, y3, px, py);
    let d3 = orient(x3, y3, x1, y1, px, py);
    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_neg && has_pos)
}

/// The bounds and extremal boundary points of a shadow.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ShadowSpan {
    pub(crate) xmin: f64,
    pub(crate) ymin: f64,
    pub(crate) xmax: f64,
    pub(crate) ymax: f64,
    /// A boundary point of the shape with minimal y.
    pub(crate) bottom: (f64, f64),
    /// A boundary point of the shape with maximal y.
    pub(crate) top: (f64, f64),
}

/// The shared shadow scheme; `overlaps` is the shape's own segment overlap
/// test, only consulted once the trivial cases are exhausted.
pub(crate) fn span_crossings<F: FnOnce() -> bool>(
    crossings: i32,
    span: &ShadowSpan,
    overlaps: F,
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
) -> i32 {
    if y0 <= span.ymin && y1 <= span.ymin {
        return crossings;
    }
    if y0 >= span.ymax && y1 >= span.ymax {
        return crossings;
    }
    if x0 <= span.xmin && x1 <= span.xmin {
        return crossings;
    }
    if x0 >= span.xmax && x1 >= span.xmax {
        // Entirely in the right shadow band: count complete entries and
        // exits of the band.
        let mut c = crossings;
        if y0 < y1 {
            if y0 <= span.ymin {
                c += 1;
            }
            if y1 >= span.ymax {
                c += 1;
            }
        } else {
            if y1 <= span.ymin {
                c -= 1;
            }
            if y0 >= span.ymax {
                c -= 1;
            }
        }
        return c;
    }
    if overlaps() {
        return SHAPE_INTERSECTS;
    }
    crossings
        + point_crossings_for_line(span.bottom.0, span.bottom.1, x0, y0, x1, y1)
        + point_crossings_for_line(span.top.0, span.top.1, x0, y0, x1, y1)
}

/// Shadow of a single point.
pub(crate) struct PointShadow {
    pub(crate) px: f64,
    pub(crate) py: f64,
}

impl Shadow for PointShadow {
    fn crossings(&self, crossings: i32, x0: f64, y0: f64, x1: f64, y1: f64) -> i32 {
        if point_on_segment(self.px, self.py, x0, y0, x1, y1) {
            return SHAPE_INTERSECTS;
        }
        crossings + point_crossings_for_line(self.px, self.py, x0, y0, x1, y1)
    }
}

/// Shadow of an axis-aligned rectangle.
pub(crate) struct RectShadow {
    span: ShadowSpan,
}

impl RectShadow {
    pub(crate) fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        let cx = 0.5 * (xmin + xmax);
        RectShadow {
            span: ShadowSpan {
                xmin,
                ymin,
                xmax,
                ymax,
                bottom: (cx, ymin),
                top: (cx, ymax),
            },
        }
    }
}

impl Shadow for RectShadow {
    fn crossings(&self, crossings: i32, x0: f64, y0: f64, x1: f64, y1: f64) -> i32 {
        let s = &self.span;
        span_crossings(
            crossings,
            s,
            || segment_intersects_rect(x0, y0, x1, y1, s.xmin, s.ymin, s.xmax, s.ymax),
            x0,
            y0,
            x1,
            y1,
        )
    }
}

/// Shadow of a circle.
pub(crate) struct CircleShadow {
    cx: f64,
    cy: f64,
    r: f64,
    span: ShadowSpan,
}

impl CircleShadow {
    pub(crate) fn new(cx: f64, cy: f64, radius: f64) -> Self {
        let r = radius.abs();
        CircleShadow {
            cx,
            cy,
            r,
            span: ShadowSpan {
                xmin: cx - r,
                ymin: cy - r,
                xmax: cx + r,
                ymax: cy + r,
                bottom: (cx, cy - r),
                top: (cx, cy + r),
            },
        }
    }
}

impl Shadow for CircleShadow {
    fn crossings(&self, crossings: i32, x0: f64, y0: f64, x1: f64, y1: f64) -> i32 {
        span_crossings(
            crossings,
            &self.span,
            || segment_intersects_circle(x0, y0, x1, y1, self.cx, self.cy, self.r),
            x0,
            y0,
            x1,
            y1,
        )
    }
}

/// Shadow of an axis-aligned ellipse.
pub(crate) struct EllipseShadow {
    cx: f64,
    cy: f64,
    rx: f64,
    ry: f64,
    span: ShadowSpan,
}

impl EllipseShadow {
    pub(crate) fn new(cx: f64, cy: f64, rx: f64, ry: f64) -> Self {
        let rx = rx.abs();
        let ry = ry.abs();
        EllipseShadow {
            cx,
            cy,
            rx,
            ry,
            span: ShadowSpan {
                xmin: cx - rx,
                ymin: cy - ry,
                xmax: cx + rx,
                ymax: cy + ry,
                bottom: (cx, cy - ry),
                top: (cx, cy + ry),
            },
        }
    }
}

impl Shadow for EllipseShadow {
    fn crossings(&self, crossings: i32, x0: f64, y0: f64, x1: f64, y1: f64) -> i32 {
        span_crossings(
            crossings,
            &self.span,
            || segment_intersects_ellipse(x0, y0, x1, y1, self.cx, self.cy, self.rx, self.ry),
            x0,
            y0,
            x1,
            y1,
        )
    }
}

/// Shadow of an arbitrary segment.
pub(crate) struct SegmentShadow {
    ax: f64,
    ay: f64,
    bx: f64,
    by: f64,
    span: ShadowSpan,
}

impl SegmentShadow {
    pub(crate) fn new(ax: f64, ay: f64, bx: f64, by: f64) -> Self {
        let (bottom, top) = if ay <= by {
            ((ax, ay), (bx, by))
        } else {
            ((bx, by), (ax, ay))
        };
        SegmentShadow {
            ax,
            ay,
            bx,
            by,
            span: ShadowSpan {
                xmin: ax.min(bx),
                ymin: ay.min(by),
                xmax: ax.max(bx),
                ymax: ay.max(by),
                bottom,
                top,
            },
        }
    }
}

impl Shadow for SegmentShadow {
    fn crossings(&self, crossings: i32, x0: f64, y0: f64, x1: f64, y1: f64) -> i32 {
        span_crossings(
            crossings,
            &self.span,
            || segments_intersect(x0, y0, x1, y1, self.ax, self.ay, self.bx, self.by),
            x0,
            y0,
            x1,
            y1,
        )
    }
}

/// Shadow of a triangle.
pub(crate) struct TriangleShadow {
    pts: [(f64, f64); 3],
    span: ShadowSpan,
}

impl TriangleShadow {
    pub(crate) fn new(x1: f64, y1: f64, x2: f64, y2: f64, x3: f64, y3: f64) -> Self {
        let pts = [(x1, y1), (x2, y2), (x3, y3)];
        let mut bottom = pts[0];
        let mut top = pts[0];
        for &p in &pts[1..] {
            if p.1 < bottom.1 {
                bottom = p;
            }
            if p.1 > top.1 {
                top = p;
            }
        }
        TriangleShadow {
            pts,
            span: ShadowSpan {
                xmin: x1.min(x2).min(x3),
                ymin: y1.min(y2).min(y3),
                xmax: x1.max(x2).max(x3),
                ymax: y1.max(y2).max(y3),
                bottom,
                top,
            },
        }
    }

    fn overlaps(&self, x0: f64, y0: f64, x1: f64, y1: f64) -> bool {
        let [(ax, ay), (bx, by), (cx, cy)] = self.pts;
        point_in_triangle(x0, y0, ax, ay, bx, by, cx, cy)
            || point_in_triangle(x1, y1, ax, ay, bx, by, cx, cy)
            || segments_intersect(x0, y0, x1, y1, ax, ay, bx, by)
            || segments_intersect(x0, y0, x1, y1, bx, by, cx, cy)
            || segments_intersect(x0, y0, x1, y1, cx, cy, ax, ay)
    }
}

impl Shadow for TriangleShadow {
    fn crossings(&self, crossings: i32, x0: f64, y0: f64, x1: f64, y1: f64) -> i32 {
        span_crossings(
            crossings,
            &self.span,
            || self.overlaps(x0, y0, x1, y1),
            x0,
            y0,
            x1,
            y1,
        )
    }
}

/// Shadow of a round rectangle with elliptical corners.
pub(crate) struct RoundRectShadow {
    xmin: f64,
    ymin: f64,
    xmax: f64,
    ymax: f64,
    aw: f64,
    ah: f64,
    span: ShadowSpan,
}

impl RoundRectShadow {
    pub(crate) fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64, aw: f64, ah: f64) -> Self {
        let aw = aw.abs().min(0.5 * (xmax - xmin));
        let ah = ah.abs().min(0.5 * (ymax - ymin));
        let cx = 0.5 * (xmin + xmax);
        RoundRectShadow {
            xmin,
            ymin,
            xmax,
            ymax,
            aw,
            ah,
            span: ShadowSpan {
                xmin,
                ymin,
                xmax,
                ymax,
                bottom: (cx, ymin),
                top: (cx, ymax),
            },
        }
    }

    /// The round rectangle is the union of two slab rectangles and four
    /// corner ellipses (each full corner ellipse lies within the shape, so
    /// quarter-arc bookkeeping is unnecessary).
    fn overlaps(&self, x0: f64, y0: f64, x1: f64, y1: f64) -> bool {
        let (aw, ah) = (self.aw, self.ah);
        segment_intersects_rect(
            x0,
            y0,
            x1,
            y1,
            self.xmin,
            self.ymin + ah,
            self.xmax,
            self.ymax - ah,
        ) || segment_intersects_rect(
            x0,
            y0,
            x1,
            y1,
            self.xmin + aw,
            self.ymin,
            self.xmax - aw,
            self.ymax,
        ) || [
            (self.xmin + aw, self.ymin + ah),
            (self.xmax - aw, self.ymin + ah),
            (self.xmax - aw, self.ymax - ah),
            (self.xmin + aw, self.ymax - ah),
        ]
        .iter()
        .any(|&(ecx, ecy)| segment_intersects_ellipse(x0, y0, x1, y1, ecx, ecy, aw, ah))
    }
}

impl Shadow for RoundRectShadow {
    fn crossings(&self, crossings: i32, x0: f64, y0: f64, x1: f64, y1: f64) -> i32 {
        span_crossings(
            crossings,
            &self.span,
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

    #[test]
    fn point_crossings_sign_convention() {
        // Y-increasing segment crossed by a ray from the left.
        assert_eq!(point_crossings_for_line(0.0, 5.0, 2.0, 0.0, 2.0, 10.0), 1);
        // Same segment, reversed direction.
        assert_eq!(point_crossings_for_line(0.0, 5.0, 2.0, 10.0, 2.0, 0.0), -1);
        // Horizontal segments never contribute.
        assert_eq!(point_crossings_for_line(0.0, 0.0, 1.0, 0.0, 5.0, 0.0), 0);
        // Crossing behind the ray origin.
        assert_eq!(point_crossings_for_line(3.0, 5.0, 2.0, 0.0, 2.0, 10.0), 0);
        // Shared-vertex half-open interval: top endpoint excluded.
        assert_eq!(point_crossings_for_line(0.0, 10.0, 2.0, 0.0, 2.0, 10.0), 0);
        assert_eq!(point_crossings_for_line(0.0, 0.0, 2.0, 0.0, 2.0, 10.0), 1);
    }

    #[test]
    fn segment_predicates() {
        assert!(point_on_segment(5.0, 0.0, 0.0, 0.0, 10.0, 0.0));
        assert!(!point_on_segment(5.0, 0.1, 0.0, 0.0, 10.0, 0.0));
        assert!(segments_intersect(0.0, 0.0, 10.0, 10.0, 0.0, 10.0, 10.0, 0.0));
        assert!(segments_intersect(0.0, 0.0, 5.0, 5.0, 5.0, 5.0, 9.0, 0.0), "endpoint touch");
        assert!(!segments_intersect(0.0, 0.0, 1.0, 1.0, 2.0, 2.0, 3.0, 2.0));
        assert!(segments_intersect(0.0, 0.0, 4.0, 0.0, 2.0, 0.0, 9.0, 0.0), "collinear overlap");
    }

    #[test]
    fn distance_and_projection() {
        assert_eq!(point_segment_distance_sq(5.0, 3.0, 0.0, 0.0, 10.0, 0.0), 9.0);
        // Beyond an endpoint the projection clamps.
        assert_eq!(point_segment_distance_sq(13.0, 4.0, 0.0, 0.0, 10.0, 0.0), 25.0);
        // Zero-length segment.
        assert_eq!(point_segment_distance_sq(3.0, 4.0, 0.0, 0.0, 0.0, 0.0), 25.0);
    }

    #[test]
    fn circle_shadow_counts_band() {
        let shadow = CircleShadow::new(5.0, 5.0, 1.0);
        // A segment far to the right, spanning the whole band.
        assert_eq!(shadow.crossings(0, 20.0, 0.0, 20.0, 10.0), 2);
        assert_eq!(shadow.crossings(0, 20.0, 10.0, 20.0, 0.0), -2);
        // Entirely to the left contributes nothing.
        assert_eq!(shadow.crossings(0, -5.0, 0.0, -5.0, 10.0), 0);
        // Touching the circle short-circuits.
        assert_eq!(shadow.crossings(0, 5.0, 0.0, 5.0, 10.0), SHAPE_INTERSECTS);
    }

    #[test]
    fn triangle_shadow_overlap() {
        let shadow = TriangleShadow::new(0.0, 0.0, 10.0, 0.0, 5.0, 10.0);
        assert_eq!(shadow.crossings(0, 4.0, 1.0, 6.0, 1.0), SHAPE_INTERSECTS);
        assert_eq!(shadow.crossings(0, 20.0, -1.0, 20.0, 11.0), 2);
    }

    #[test]
    fn round_rect_overlap_respects_corners() {
        let shadow = RoundRectShadow::new(0.0, 0.0, 10.0, 10.0, 2.0, 2.0);
        // A segment clipping the corner gap outside the arc does not
        // overlap the shape.
        assert_ne!(
            shadow.crossings(0, -1.0, 0.4, 0.4, -1.0),
            SHAPE_INTERSECTS
        );
        // Through the middle it does.
        assert_eq!(shadow.crossings(0, -1.0, 5.0, 11.0, 5.0), SHAPE_INTERSECTS);
    }
}
