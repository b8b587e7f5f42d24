use whroute_core::Point;

/// Minimal pathfinding interface: passability and neighbour enumeration.
pub trait Pather {
    /// Whether an agent may stand on `p`.
    fn passable(&self, p: Point) -> bool;

    /// Append the traversable neighbours of `p` into `buf`, in the order the
    /// search should consider them. The caller clears `buf` before calling.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>);
}

/// Pather with weighted (positive-cost) moves.
pub trait WeightedPather: Pather {
    /// Cost of moving from `from` to adjacent `to`. Must be > 0.
    fn cost(&self, from: Point, to: Point) -> i32;
}

/// Full A* pather with an admissible heuristic.
pub trait AstarPather: WeightedPather {
    /// Heuristic estimate of the cost from `from` to `to`.
    /// Must never overestimate the true cost (admissible).
    fn estimate(&self, from: Point, to: Point) -> i32;
}
