use std::fmt;

use whroute_core::Point;

/// Precondition failures reported before a search starts.
///
/// An unreachable goal is not an error: searches report it as `Ok(None)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// The endpoint lies outside the searched range.
    OutOfBounds(Point),
    /// The endpoint is inside the range but not passable.
    Blocked(Point),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds(p) => write!(f, "search endpoint {p} is out of bounds"),
            Self::Blocked(p) => write!(f, "search endpoint {p} is not passable"),
        }
    }
}

impl std::error::Error for SearchError {}
