//! Warehouse floor model and route planning.
//!
//! A [`Warehouse`] is a bounded grid with two kinds of blocked cells,
//! walls and shelving, plus per-cell traversal costs. It implements the
//! [`whroute_paths`] pather traits, so [`find_path`] can run A* over it
//! directly. Floors can be built imperatively or from a declarative
//! [`Layout`], and dumped as text with [`render`].
//!
//! ```
//! use whroute_layout::{Point, Warehouse, find_path};
//!
//! let mut wh = Warehouse::new(5, 5).unwrap();
//! wh.add_wall(Point::new(2, 0), 1, 4).unwrap();
//! let route = find_path(&wh, Point::new(0, 0), Point::new(4, 0)).unwrap().unwrap();
//! assert_eq!(route.cost, 12);
//! ```

mod error;
mod layout;
mod render;
mod route;
mod warehouse;

pub use error::LayoutError;
pub use layout::{Layout, ShelfSpec, WallSpec, WeightSpec};
pub use render::{FloorPlan, Overlay, render};
pub use route::{Route, cost_map, find_path, find_path_with};
pub use warehouse::Warehouse;

pub use whroute_core::{Point, Range};
pub use whroute_paths::{PathNode, PathRange, SearchError};
