//! Shortest-path search on weighted 2D grids.
//!
//! - **A\*** shortest-path search ([`PathRange::astar_path`])
//! - **Dijkstra** multi-source cost maps ([`PathRange::dijkstra_map`])
//! - A binary-heap [`Frontier`] with insertion-order tie-breaking, shared
//!   by both searches.
//!
//! Searches run through [`PathRange`], which owns and reuses its node
//! arrays so repeated queries on the same floor do not reallocate. A
//! `PathRange` is per-caller state; any number of them may query one
//! read-only grid concurrently.
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | passability and neighbour enumeration |
//! | [`WeightedPather`] : [`Pather`] | Dijkstra, [`path_cost`] |
//! | [`AstarPather`] : [`WeightedPather`] | A* |

mod astar;
mod dijkstra;
mod distance;
mod error;
mod frontier;
mod neighbors;
mod pathrange;
mod traits;

pub use astar::path_cost;
pub use distance::manhattan;
pub use error::SearchError;
pub use frontier::{Frontier, FrontierNode};
pub use neighbors::checkered_cardinal;
pub use pathrange::{PathNode, PathRange, UNREACHABLE};
pub use traits::{AstarPather, Pather, WeightedPather};
