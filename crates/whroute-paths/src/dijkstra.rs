use whroute_core::Point;

use crate::PathRange;
use crate::pathrange::{PathNode, UNREACHABLE, next_generation};
use crate::traits::WeightedPather;

impl PathRange {
    /// Compute a multi-source Dijkstra cost map.
    ///
    /// Every source inside the range starts at cost 0; sources outside it
    /// are ignored. Expansion stops when the cumulative cost exceeds
    /// `max_cost`. Returns every reached cell in the order it was settled,
    /// which is non-decreasing cost.
    pub fn dijkstra_map<P: WeightedPather>(
        &mut self,
        pather: &P,
        sources: &[Point],
        max_cost: i32,
    ) -> &[PathNode] {
        self.dijkstra_map.fill(UNREACHABLE);
        self.dijkstra_results.clear();

        let cur_gen = next_generation(&mut self.dijkstra_generation, &mut self.dijkstra_nodes);

        let mut open = std::mem::take(&mut self.frontier);
        open.clear();

        for &src in sources {
            if let Some(si) = self.idx(src) {
                let n = &mut self.dijkstra_nodes[si];
                if n.generation == cur_gen {
                    continue;
                }
                n.g = 0;
                n.generation = cur_gen;
                n.open = true;
                self.dijkstra_map[si] = 0;
                open.push(si, 0);
            }
        }

        let mut nbuf = std::mem::take(&mut self.nbuf);

        while let Some(current) = open.pop_min() {
            let ci = current.item;
            let cn = &self.dijkstra_nodes[ci];
            if cn.generation != cur_gen || !cn.open {
                continue;
            }
            let current_g = cn.g;
            self.dijkstra_nodes[ci].open = false;

            let cp = self.point(ci);
            self.dijkstra_results.push(PathNode {
                pos: cp,
                cost: current_g,
            });

            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                let tentative = match current_g.checked_add(pather.cost(cp, np)) {
                    Some(t) if t <= max_cost => t,
                    _ => continue,
                };

                let n = &mut self.dijkstra_nodes[ni];
                if n.generation == cur_gen {
                    if tentative >= n.g {
                        continue;
                    }
                } else {
                    n.generation = cur_gen;
                }

                n.g = tentative;
                n.open = true;
                self.dijkstra_map[ni] = tentative;
                open.push(ni, tentative);
            }
        }

        self.frontier = open;
        self.nbuf = nbuf;
        log::debug!(
            "dijkstra: {} sources reached {} cells",
            sources.len(),
            self.dijkstra_results.len()
        );
        &self.dijkstra_results
    }

    /// Query the Dijkstra cost at a specific point.
    ///
    /// Returns [`UNREACHABLE`] if the point is outside the range or was not
    /// reached by the last `dijkstra_map` call.
    pub fn dijkstra_at(&self, p: Point) -> i32 {
        match self.idx(p) {
            Some(i) => self.dijkstra_map[i],
            None => UNREACHABLE,
        }
    }
}
