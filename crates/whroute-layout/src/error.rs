use std::fmt;

use whroute_core::{Point, Range};

/// Rejected floor construction or mutation. A rejected call leaves the
/// warehouse unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutError {
    /// Floor dimensions must both be positive.
    InvalidSize { width: i32, height: i32 },
    /// A block dimension or aisle parameter is out of its allowed range.
    InvalidDimension { name: &'static str, value: i32 },
    /// The region does not fit inside the floor.
    OutOfBounds(Range),
    /// Traversal costs must be positive.
    InvalidWeight { pos: Point, cost: i32 },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSize { width, height } => {
                write!(f, "invalid floor size {width}x{height}")
            }
            Self::InvalidDimension { name, value } => write!(f, "invalid {name}: {value}"),
            Self::OutOfBounds(r) => write!(f, "region {r} is outside the floor"),
            Self::InvalidWeight { pos, cost } => {
                write!(f, "invalid traversal cost {cost} at {pos}")
            }
        }
    }
}

impl std::error::Error for LayoutError {}
