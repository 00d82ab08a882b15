//! Bounding-box sweeps over path iterators.

use crate::crossings::SPLINE_APPROXIMATION_RATIO;
use crate::flatten::{CurveScratch, FlatteningIter, DEFAULT_FLATTENING_LIMIT};
use crate::iter::PathIter;
use crate::{PathElement, Point, Rect};

fn fold<T: crate::Coordinate>(bbox: &mut Option<Rect<T>>, p: Point<T>) {
    *bbox = Some(match *bbox {
        Some(b) => b.union_pt(p),
        None => Rect::new(p.x, p.y, p.x, p.y),
    });
}

/// The bounding box of the geometry the iterator actually traces.
///
/// Line segments fold both endpoints; Bézier elements are rerouted through
/// a flattened one-curve sub-path and contribute the union of their own
/// drawable boxes, so control points pull the box only as far as the curve
/// actually reaches. Moves and closes contribute nothing.
///
/// Returns `None` when no element contributes.
pub fn drawable_bounding_box<I: PathIter>(mut iter: I) -> Option<Rect<I::Coord>> {
    let rule = iter.winding_rule();
    let mut bbox: Option<Rect<I::Coord>> = None;
    while let Some(el) = iter.next() {
        match el {
            PathElement::MoveTo { .. } | PathElement::Close { .. } => {}
            PathElement::LineTo { from, to } => {
                fold(&mut bbox, from);
                fold(&mut bbox, to);
            }
            PathElement::QuadTo { from, ctrl, to } => {
                let (p0, c, p1) = (from.to_f64(), ctrl.to_f64(), to.to_f64());
                let scratch = CurveScratch::quad(p0.x, p0.y, c.x, c.y, p1.x, p1.y, rule);
                let flat = FlatteningIter::with_limit(
                    scratch,
                    SPLINE_APPROXIMATION_RATIO,
                    DEFAULT_FLATTENING_LIMIT,
                );
                if let Some(sub) = drawable_bounding_box(flat) {
                    let sub = Rect::from_f64(sub);
                    bbox = Some(match bbox {
                        Some(b) => b.union(sub),
                        None => sub,
                    });
                }
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
                let scratch =
                    CurveScratch::cubic(p0.x, p0.y, c1.x, c1.y, c2.x, c2.y, p1.x, p1.y, rule);
                let flat = FlatteningIter::with_limit(
                    scratch,
                    SPLINE_APPROXIMATION_RATIO,
                    DEFAULT_FLATTENING_LIMIT,
                );
                if let Some(sub) = drawable_bounding_box(flat) {
                    let sub = Rect::from_f64(sub);
                    bbox = Some(match bbox {
                        Some(b) => b.union(sub),
                        None => sub,
                    });
                }
            }
        }
    }
    bbox
}

/// The bounding box of every control and end point of the iterator's
/// drawable elements.
///
/// Unlike [`drawable_bounding_box`] this folds raw Bézier control points,
/// which may lie well outside the rendered curve; it therefore always
/// contains the drawable box. Moves and closes contribute nothing.
///
/// Returns `None` when no element contributes.
pub fn control_point_bounding_box<I: PathIter>(iter: I) -> Option<Rect<I::Coord>> {
    let mut bbox: Option<Rect<I::Coord>> = None;
    for el in iter {
        match el {
            PathElement::MoveTo { .. } | PathElement::Close { .. } => {}
            PathElement::LineTo { from, to } => {
                fold(&mut bbox, from);
                fold(&mut bbox, to);
            }
            PathElement::QuadTo { from, ctrl, to } => {
                fold(&mut bbox, from);
                fold(&mut bbox, ctrl);
                fold(&mut bbox, to);
            }
            PathElement::CurveTo {
                from,
                ctrl1,
                ctrl2,
                to,
            } => {
                fold(&mut bbox, from);
                fold(&mut bbox, ctrl1);
                fold(&mut bbox, ctrl2);
                fold(&mut bbox, to);
            }
        }
    }
    bbox
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Path, Rect};

    #[test]
    fn drawable_box_skips_moves_and_closes() {
        let mut p = Path::new();
        p.move_to(100.0, 100.0);
        p.move_to(1.0, 2.0);
        p.line_to(5.0, 6.0).unwrap();
        p.close_path();
        assert_eq!(
            drawable_bounding_box(p.iter()),
            Some(Rect::new(1.0, 2.0, 5.0, 6.0))
        );
    }

    #[test]
    fn empty_path_degrades_to_canonical_empty_box() {
        let mut p: Path<f64> = Path::new();
        assert_eq!(drawable_bounding_box(p.iter()), None);
        assert_eq!(p.bounding_box(), Rect::default());
        p.move_to(3.0, 4.0);
        assert_eq!(
            drawable_bounding_box(p.iter()),
            None,
            "a bare move traces nothing"
        );
        assert_eq!(control_point_bounding_box(p.iter()), None);
        assert_eq!(p.control_point_bounding_box(), Rect::default());
    }

    #[test]
    fn control_box_contains_drawable_box() {
        // Control points far above the rendered curve.
        let mut p = Path::new();
        p.move_to(0.0, 0.0);
        p.curve_to(2.0, 40.0, 8.0, 40.0, 10.0, 0.0).unwrap();

        let drawable = p.bounding_box();
        let control = p.control_point_bounding_box();
        assert_eq!(control, Rect::new(0.0, 0.0, 10.0, 40.0));
        // The cubic's true apex is 3/4 of the control height.
        assert!(drawable.y1 <= 30.0 + 1e-6);
        assert!(drawable.y1 > 29.0);
        assert!(control.x0 <= drawable.x0 && control.x1 >= drawable.x1);
        assert!(control.y0 <= drawable.y0 && control.y1 >= drawable.y1);
        assert!(control.y1 > drawable.y1, "strict when controls overshoot");
    }

    #[test]
    fn quad_drawable_box_tracks_curve_extent() {
        let mut p = Path::new();
        p.move_to(0.0, 0.0);
        p.quad_to(5.0, 10.0, 10.0, 0.0).unwrap();
        let b = p.bounding_box();
        assert_eq!((b.x0, b.y0, b.x1), (0.0, 0.0, 10.0));
        // Apex of the quad is at y = 5; chords stay on the curve.
        assert!(b.y1 <= 5.0 && b.y1 > 4.5);
    }
}
