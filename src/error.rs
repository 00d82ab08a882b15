//! Error types for the path kernel.

use thiserror::Error;

/// Errors reported by path mutation, indexed access and the point solvers.
///
/// All failures are synchronous and fail-fast; malformed input is treated as
/// a programming error rather than something to recover from. Degenerate
/// geometry (zero-length segments, empty rectangles, zero radii) is *not* an
/// error anywhere in the crate.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A drawing operation was attempted in a state that does not admit it,
    /// e.g. `line_to` before any `move_to`, or `remove_last` on an empty
    /// path.
    #[error("invalid path state: {0}")]
    InvalidPathState(&'static str),

    /// A bounds-checked accessor was called with an index past the end.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// The length of the indexed sequence.
        len: usize,
    },

    /// A caller violated an operation's documented precondition, e.g.
    /// invoking a point solver on an iterator that still contains curves.
    #[error("precondition violation: {0}")]
    PreconditionViolation(&'static str),
}

/// Convenience alias for results using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
