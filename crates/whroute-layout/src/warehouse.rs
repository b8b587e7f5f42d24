use std::collections::{HashMap, HashSet};

use whroute_core::{Point, Range};
use whroute_paths::{AstarPather, Pather, WeightedPather, checkered_cardinal, manhattan};

use crate::error::LayoutError;

/// Traversal cost of a cell with no explicit weight.
pub const DEFAULT_COST: i32 = 1;

/// A warehouse floor: the rectangle `[0, width) × [0, height)` with walls,
/// shelving and a terrain cost overlay.
///
/// Walls and shelves block movement equally and are kept apart only so a
/// renderer can tell them apart. Membership tests are hash lookups. The
/// floor is mutated through `&mut self` during setup and shared read-only
/// (it is `Sync`) while routes are searched.
#[derive(Debug, Clone)]
pub struct Warehouse {
    bounds: Range,
    walls: HashSet<Point>,
    shelves: HashSet<Point>,
    weights: HashMap<Point, i32>,
}

impl Warehouse {
    /// Create an empty floor of `width × height` cells.
    pub fn new(width: i32, height: i32) -> Result<Self, LayoutError> {
        if width <= 0 || height <= 0 {
            return Err(LayoutError::InvalidSize { width, height });
        }
        Ok(Self {
            bounds: Range::new(0, 0, width, height),
            walls: HashSet::new(),
            shelves: HashSet::new(),
            weights: HashMap::new(),
        })
    }

    /// The floor rectangle.
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Number of columns.
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    /// Number of rows.
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// Whether `p` lies on the floor.
    #[inline]
    pub fn in_bounds(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    /// Whether `p` is neither a wall nor a shelf. Says nothing about bounds.
    #[inline]
    pub fn passable(&self, p: Point) -> bool {
        !self.walls.contains(&p) && !self.shelves.contains(&p)
    }

    /// Whether `p` is a wall cell.
    pub fn is_wall(&self, p: Point) -> bool {
        self.walls.contains(&p)
    }

    /// Whether `p` is a shelf cell.
    pub fn is_shelf(&self, p: Point) -> bool {
        self.shelves.contains(&p)
    }

    /// Wall cells, in no particular order.
    pub fn walls(&self) -> impl Iterator<Item = Point> + '_ {
        self.walls.iter().copied()
    }

    /// Shelf cells, in no particular order.
    pub fn shelves(&self) -> impl Iterator<Item = Point> + '_ {
        self.shelves.iter().copied()
    }

    /// Cost of entering `p`.
    #[inline]
    pub fn weight(&self, p: Point) -> i32 {
        self.weights.get(&p).copied().unwrap_or(DEFAULT_COST)
    }

    /// Cost of stepping from `from` into `to`. Cost belongs to the entered
    /// cell, so `from` is ignored.
    #[inline]
    pub fn cost(&self, _from: Point, to: Point) -> i32 {
        self.weight(to)
    }

    /// The on-floor, passable neighbours of `p` in checkerboard order.
    pub fn neighbors(&self, p: Point) -> Vec<Point> {
        let mut buf = Vec::with_capacity(4);
        self.push_neighbors(p, &mut buf);
        buf
    }

    fn push_neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        buf.extend(
            checkered_cardinal(p)
                .into_iter()
                .filter(|&n| self.in_bounds(n) && self.passable(n)),
        );
    }

    // -----------------------------------------------------------------------
    // Setup
    // -----------------------------------------------------------------------

    /// Wall off the `width × height` rectangle whose top-left cell is
    /// `origin`. The whole rectangle must lie on the floor; unlike shelving,
    /// walls hanging off the edge are rejected rather than clipped.
    pub fn add_wall(&mut self, origin: Point, width: i32, height: i32) -> Result<(), LayoutError> {
        positive("wall width", width)?;
        positive("wall height", height)?;
        let rect = Range::checked_with_size(origin, width, height)
            .filter(|r| r.in_range(self.bounds))
            .ok_or_else(|| LayoutError::OutOfBounds(saturating_rect(origin, width, height)))?;
        self.walls.extend(rect);
        log::debug!("add_wall: {rect}, {} cells", rect.len());
        Ok(())
    }

    /// Lay out `aisle_count` shelf blocks of `width × row_count` cells.
    ///
    /// The first block's top-left cell is `origin`; each following block
    /// starts `width + aisle_width` columns further east. Cells falling off
    /// the floor are dropped silently, so partially visible layouts are
    /// fine.
    pub fn add_shelf(
        &mut self,
        origin: Point,
        width: i32,
        row_count: i32,
        aisle_width: i32,
        aisle_count: i32,
    ) -> Result<(), LayoutError> {
        positive("shelf width", width)?;
        positive("shelf row count", row_count)?;
        non_negative("aisle width", aisle_width)?;
        non_negative("aisle count", aisle_count)?;

        // Block columns are computed in i64: step and offsets may exceed i32.
        let step = i64::from(width) + i64::from(aisle_width);
        let x0 = i64::from(origin.x);
        let (lo, hi) = (i64::from(self.bounds.min.x), i64::from(self.bounds.max.x));
        // Skip blocks lying entirely west of the floor.
        let first = if x0 + i64::from(width) > lo {
            0
        } else {
            (lo - x0 - i64::from(width)) / step + 1
        };

        let mut placed = 0usize;
        let mut inserted = 0usize;
        for k in first..i64::from(aisle_count) {
            let x = x0 + k * step;
            if x >= hi {
                break;
            }
            let Ok(x) = i32::try_from(x) else {
                break;
            };
            let block = saturating_rect(Point::new(x, origin.y), width, row_count);
            let visible = block.intersect(self.bounds);
            self.shelves.extend(visible);
            inserted += visible.len();
            placed += 1;
        }
        log::debug!("add_shelf: {placed} of {aisle_count} blocks at {origin} on the floor, {inserted} cells");
        Ok(())
    }

    /// Set the cost of entering `p`. `cost` must be positive and `p` must
    /// lie on the floor. Weights on blocked cells are kept but never used.
    pub fn set_weight(&mut self, p: Point, cost: i32) -> Result<(), LayoutError> {
        if cost <= 0 {
            return Err(LayoutError::InvalidWeight { pos: p, cost });
        }
        if !self.in_bounds(p) {
            return Err(LayoutError::OutOfBounds(saturating_rect(p, 1, 1)));
        }
        if cost == DEFAULT_COST {
            self.weights.remove(&p);
        } else {
            self.weights.insert(p, cost);
        }
        Ok(())
    }
}

/// The `w × h` rectangle at `origin`, its far corner clamped to `i32::MAX`.
fn saturating_rect(origin: Point, w: i32, h: i32) -> Range {
    Range::new(
        origin.x,
        origin.y,
        origin.x.saturating_add(w),
        origin.y.saturating_add(h),
    )
}

fn positive(name: &'static str, value: i32) -> Result<(), LayoutError> {
    if value <= 0 {
        return Err(LayoutError::InvalidDimension { name, value });
    }
    Ok(())
}

fn non_negative(name: &'static str, value: i32) -> Result<(), LayoutError> {
    if value < 0 {
        return Err(LayoutError::InvalidDimension { name, value });
    }
    Ok(())
}

impl Pather for Warehouse {
    fn passable(&self, p: Point) -> bool {
        Warehouse::passable(self, p)
    }

    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        self.push_neighbors(p, buf);
    }
}

impl WeightedPather for Warehouse {
    fn cost(&self, from: Point, to: Point) -> i32 {
        Warehouse::cost(self, from, to)
    }
}

impl AstarPather for Warehouse {
    fn estimate(&self, from: Point, to: Point) -> i32 {
        manhattan(from, to)
    }
}
