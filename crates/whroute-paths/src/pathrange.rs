use whroute_core::{Point, Range};

use crate::error::SearchError;
use crate::frontier::Frontier;
use crate::traits::Pather;

/// A position with an associated cost, returned from cost-map queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathNode {
    pub pos: Point,
    pub cost: i32,
}

/// Sentinel value meaning "unreachable" in cost maps.
pub const UNREACHABLE: i32 = i32::MAX;

/// Parent index of a node with no predecessor.
pub(crate) const NO_PARENT: usize = usize::MAX;

// ---------------------------------------------------------------------------
// Per-cell search state
// ---------------------------------------------------------------------------

/// Cost-so-far and provenance for one cell, valid only when `generation`
/// matches the owning search's generation.
#[derive(Clone)]
pub(crate) struct Node {
    pub(crate) g: i32,
    pub(crate) parent: usize,
    pub(crate) generation: u32,
    pub(crate) open: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: 0,
            parent: NO_PARENT,
            generation: 0,
            open: false,
        }
    }
}

/// Advance a generation counter. Generation 0 marks never-touched nodes,
/// so on wrap-around every node is reset and counting restarts at 1.
pub(crate) fn next_generation(generation: &mut u32, nodes: &mut [Node]) -> u32 {
    *generation = generation.wrapping_add(1);
    if *generation == 0 {
        nodes.fill(Node::default());
        *generation = 1;
    }
    *generation
}

// ---------------------------------------------------------------------------
// PathRange
// ---------------------------------------------------------------------------

/// Search workspace for one grid rectangle.
///
/// Owns the cost-so-far, provenance and frontier storage used by the
/// searches, indexed by cell rather than by reference, and reuses it across
/// queries. Stale state from a previous query is invalidated by bumping a
/// generation counter, so results never depend on earlier searches.
pub struct PathRange {
    pub(crate) rng: Range,
    pub(crate) width: usize,
    // A* caches
    pub(crate) astar_nodes: Vec<Node>,
    pub(crate) astar_generation: u32,
    // Dijkstra caches
    pub(crate) dijkstra_nodes: Vec<Node>,
    pub(crate) dijkstra_generation: u32,
    pub(crate) dijkstra_results: Vec<PathNode>,
    pub(crate) dijkstra_map: Vec<i32>,
    // shared scratch space
    pub(crate) frontier: Frontier<usize>,
    pub(crate) nbuf: Vec<Point>,
}

impl PathRange {
    /// Create a new `PathRange` for the given grid rectangle.
    pub fn new(rng: Range) -> Self {
        let w = rng.width().max(0) as usize;
        let len = rng.len();
        Self {
            rng,
            width: w,
            astar_nodes: vec![Node::default(); len],
            astar_generation: 0,
            dijkstra_nodes: vec![Node::default(); len],
            dijkstra_generation: 0,
            dijkstra_results: Vec::new(),
            dijkstra_map: vec![UNREACHABLE; len],
            frontier: Frontier::new(),
            nbuf: Vec::with_capacity(4),
        }
    }

    /// Replace the underlying range.
    ///
    /// If the new range fits within the existing node arrays they are kept
    /// and only the generations are bumped; otherwise they are reallocated.
    pub fn set_range(&mut self, rng: Range) {
        let new_len = rng.len();
        let old_capacity = self.astar_nodes.len();
        self.rng = rng;
        self.width = rng.width().max(0) as usize;
        self.dijkstra_results.clear();

        if new_len <= old_capacity {
            next_generation(&mut self.astar_generation, &mut self.astar_nodes);
            next_generation(&mut self.dijkstra_generation, &mut self.dijkstra_nodes);
            return;
        }

        self.astar_nodes.clear();
        self.astar_nodes.resize(new_len, Node::default());
        self.astar_generation = 0;

        self.dijkstra_nodes.clear();
        self.dijkstra_nodes.resize(new_len, Node::default());
        self.dijkstra_generation = 0;
        self.dijkstra_map.clear();
        self.dijkstra_map.resize(new_len, UNREACHABLE);
    }

    /// The grid rectangle being searched.
    #[inline]
    pub fn range(&self) -> Range {
        self.rng
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers
    // -----------------------------------------------------------------------

    /// Convert a `Point` to a flat index. Returns `None` if out of range.
    #[inline]
    pub(crate) fn idx(&self, p: Point) -> Option<usize> {
        if !self.rng.contains(p) {
            return None;
        }
        let x = (p.x - self.rng.min.x) as usize;
        let y = (p.y - self.rng.min.y) as usize;
        Some(y * self.width + x)
    }

    /// Convert a flat index back to a `Point`.
    #[inline]
    pub(crate) fn point(&self, idx: usize) -> Point {
        let x = (idx % self.width) as i32 + self.rng.min.x;
        let y = (idx / self.width) as i32 + self.rng.min.y;
        Point::new(x, y)
    }

    /// Index of a search endpoint, checking that it is inside the range and
    /// passable.
    pub(crate) fn endpoint_idx<P: Pather>(&self, pather: &P, p: Point) -> Result<usize, SearchError> {
        let i = self.idx(p).ok_or(SearchError::OutOfBounds(p))?;
        if !pather.passable(p) {
            return Err(SearchError::Blocked(p));
        }
        Ok(i)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for PathRange {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde::Serialize::serialize(&self.rng, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for PathRange {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let range = <Range as serde::Deserialize>::deserialize(deserializer)?;
        Ok(PathRange::new(range))
    }
}
