//! **whroute-core** — geometry primitives shared by the *whroute* crates.
//!
//! [`Point`] is the grid coordinate used as a map key everywhere in the
//! workspace; [`Range`] is the half-open rectangle that bounds a grid.

pub mod geom;

pub use geom::{Point, Range, RangeIter};
