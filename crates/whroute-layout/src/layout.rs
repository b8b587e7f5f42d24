//! Declarative floor descriptions.

use whroute_core::Point;

use crate::error::LayoutError;
use crate::warehouse::Warehouse;

/// A rectangular wall region; see [`Warehouse::add_wall`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WallSpec {
    pub origin: Point,
    pub width: i32,
    pub height: i32,
}

/// A run of shelf blocks separated by aisles; see [`Warehouse::add_shelf`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShelfSpec {
    pub origin: Point,
    pub width: i32,
    pub rows: i32,
    pub aisle_width: i32,
    pub aisle_count: i32,
}

/// The traversal cost of one cell; see [`Warehouse::set_weight`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeightSpec {
    pub pos: Point,
    pub cost: i32,
}

/// Everything needed to build a [`Warehouse`].
///
/// Entries are applied in order: walls, then shelves, then weights.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Layout {
    pub width: i32,
    pub height: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub walls: Vec<WallSpec>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub shelves: Vec<ShelfSpec>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub weights: Vec<WeightSpec>,
}

impl Layout {
    /// An empty floor of the given size.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Add a wall rectangle.
    pub fn with_wall(mut self, origin: Point, width: i32, height: i32) -> Self {
        self.walls.push(WallSpec {
            origin,
            width,
            height,
        });
        self
    }

    /// Add a run of shelf blocks.
    pub fn with_shelf(
        mut self,
        origin: Point,
        width: i32,
        rows: i32,
        aisle_width: i32,
        aisle_count: i32,
    ) -> Self {
        self.shelves.push(ShelfSpec {
            origin,
            width,
            rows,
            aisle_width,
            aisle_count,
        });
        self
    }

    /// Set the cost of one cell.
    pub fn with_weight(mut self, pos: Point, cost: i32) -> Self {
        self.weights.push(WeightSpec { pos, cost });
        self
    }

    /// Build the floor. The first invalid entry aborts the whole build.
    pub fn build(&self) -> Result<Warehouse, LayoutError> {
        Warehouse::from_layout(self)
    }
}

impl Warehouse {
    /// Build a floor from a [`Layout`].
    pub fn from_layout(layout: &Layout) -> Result<Self, LayoutError> {
        let mut wh = Warehouse::new(layout.width, layout.height)?;
        for w in &layout.walls {
            wh.add_wall(w.origin, w.width, w.height)?;
        }
        for s in &layout.shelves {
            wh.add_shelf(s.origin, s.width, s.rows, s.aisle_width, s.aisle_count)?;
        }
        for w in &layout.weights {
            wh.set_weight(w.pos, w.cost)?;
        }
        Ok(wh)
    }
}
