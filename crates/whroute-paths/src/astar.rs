use whroute_core::Point;

use crate::PathRange;
use crate::error::SearchError;
use crate::pathrange::{NO_PARENT, next_generation};
use crate::traits::{AstarPather, WeightedPather};

impl PathRange {
    /// Compute a minimum-cost path from `from` to `to` using A*.
    ///
    /// Returns the full path (both endpoints included, start first),
    /// `Ok(None)` if the goal cannot be reached, or an error if either
    /// endpoint is outside the range or not passable.
    ///
    /// Neighbours are relaxed in the order the pather emits them and the
    /// frontier breaks priority ties by insertion order, so the same query
    /// on the same grid always returns the same path. Routes whose total
    /// cost would exceed `i32::MAX` are treated as unreachable.
    pub fn astar_path<P: AstarPather>(
        &mut self,
        pather: &P,
        from: Point,
        to: Point,
    ) -> Result<Option<Vec<Point>>, SearchError> {
        let start_idx = self.endpoint_idx(pather, from)?;
        let goal_idx = self.endpoint_idx(pather, to)?;

        if start_idx == goal_idx {
            return Ok(Some(vec![from]));
        }

        let cur_gen = next_generation(&mut self.astar_generation, &mut self.astar_nodes);

        {
            let node = &mut self.astar_nodes[start_idx];
            node.g = 0;
            node.parent = NO_PARENT;
            node.generation = cur_gen;
            node.open = true;
        }

        let mut open = std::mem::take(&mut self.frontier);
        open.clear();
        open.push(start_idx, 0);

        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut expanded = 0usize;

        let found = 'search: loop {
            let Some(current) = open.pop_min() else {
                break 'search false;
            };

            let ci = current.item;

            // Skip copies superseded by a cheaper push.
            if self.astar_nodes[ci].generation != cur_gen || !self.astar_nodes[ci].open {
                continue;
            }

            if ci == goal_idx {
                break 'search true;
            }

            self.astar_nodes[ci].open = false;
            expanded += 1;
            let current_g = self.astar_nodes[ci].g;
            let current_point = self.point(ci);
            log::trace!("astar: expand {current_point} g={current_g} f={}", current.priority);

            nbuf.clear();
            pather.neighbors(current_point, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                // A step whose total no longer fits in i32 is never an improvement.
                let Some(tentative_g) = current_g.checked_add(pather.cost(current_point, np)) else {
                    continue;
                };

                let n = &mut self.astar_nodes[ni];
                if n.generation == cur_gen {
                    if tentative_g >= n.g {
                        continue;
                    }
                } else {
                    n.generation = cur_gen;
                }

                n.g = tentative_g;
                n.parent = ci;
                n.open = true;

                open.push(ni, tentative_g.saturating_add(pather.estimate(np, to)));
            }
        };

        open.clear();
        self.frontier = open;
        self.nbuf = nbuf;

        if !found {
            log::debug!("astar: {from} -> {to} unreachable after {expanded} expansions");
            return Ok(None);
        }

        let path = self.reconstruct(start_idx, goal_idx, cur_gen);
        match &path {
            Some(p) => log::debug!(
                "astar: {from} -> {to} cost {} in {} steps, {expanded} expansions",
                self.astar_nodes[goal_idx].g,
                p.len() - 1
            ),
            None => log::debug!("astar: {from} -> {to} provenance broken, reporting unreachable"),
        }
        Ok(path)
    }

    /// Walk provenance back from the goal. Any missing or stale link yields
    /// `None` instead of a partial path.
    fn reconstruct(&self, start_idx: usize, goal_idx: usize, cur_gen: u32) -> Option<Vec<Point>> {
        let mut path = Vec::new();
        let mut ci = goal_idx;
        loop {
            let node = self.astar_nodes.get(ci)?;
            if node.generation != cur_gen || path.len() >= self.astar_nodes.len() {
                return None;
            }
            path.push(self.point(ci));
            if ci == start_idx {
                break;
            }
            ci = node.parent;
        }
        path.reverse();
        Some(path)
    }
}

/// Total cost of walking `path`: the entry cost of every cell after the
/// first. A single-cell or empty path costs 0. The sum saturates at
/// `i32::MAX`.
pub fn path_cost<P: WeightedPather>(pather: &P, path: &[Point]) -> i32 {
    path.windows(2)
        .fold(0i32, |acc, w| acc.saturating_add(pather.cost(w[0], w[1])))
}
