// Copyright 2024 the Pathwind Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! 2D paths and the winding-crossings algorithms on them.
//!
//! pathwind is a small computation kernel for 2D vector paths: a mutable
//! path representation (ordered element tags over a flat coordinate
//! buffer), an iterator family (raw, affine-transformed, curve-flattening),
//! and the algorithms that answer "does this path contain or intersect that
//! shape" and "what is the closest or farthest point of this path to a
//! query point", with robust handling of quadratic and cubic Bézier
//! segments.
//!
//! The whole engine is written once, generic over the [`Coordinate`] type,
//! so integer and floating-point paths share the same implementation; all
//! internal math happens in `f64`.
//!
//! # Examples
//!
//! Containment with the crossing-number engine:
//!
//! ```
//! use pathwind::Path;
//!
//! let mut path = Path::new();
//! path.move_to(0.0, 0.0);
//! path.line_to(10.0, 0.0)?;
//! path.quad_to(15.0, 5.0, 10.0, 10.0)?;
//! path.line_to(0.0, 10.0)?;
//! path.close_path();
//!
//! assert!(path.contains(5.0, 5.0));
//! assert!(path.intersects_circle(12.0, 5.0, 2.0));
//! assert!(!path.contains(-3.0, 5.0));
//! # Ok::<(), pathwind::Error>(())
//! ```
//!
//! Flattening and the point solvers:
//!
//! ```
//! use pathwind::{closest_point, Path, Point};
//!
//! let mut arc = Path::new();
//! arc.move_to(0.0, 0.0);
//! arc.quad_to(5.0, 10.0, 10.0, 0.0)?;
//!
//! // The solvers require a non-curved iterator; flattening provides one.
//! let hit = closest_point(arc.flattened_iter(0.1), 5.0, 20.0)?;
//! assert!(hit.distance(Point::new(5.0, 5.0)) < 0.5);
//! # Ok::<(), pathwind::Error>(())
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs, clippy::trivially_copy_pass_by_ref)]
#![warn(clippy::doc_markdown, rustdoc::broken_intra_doc_links)]
#![warn(clippy::semicolon_if_nothing_returned)]
#![warn(unused_qualifications)]
#![allow(clippy::many_single_char_names, clippy::excessive_precision)]

mod affine;
mod bounds;
mod coord;
mod crossings;
mod element;
mod error;
mod flatten;
mod iter;
mod nearest;
mod path;
mod point;
mod rect;
mod shadow;
mod vec2;

pub use crate::affine::*;
pub use crate::bounds::*;
pub use crate::coord::*;
pub use crate::crossings::*;
pub use crate::element::*;
pub use crate::error::*;
pub use crate::flatten::*;
pub use crate::iter::*;
pub use crate::nearest::*;
pub use crate::path::*;
pub use crate::point::*;
pub use crate::rect::*;
pub use crate::vec2::*;
