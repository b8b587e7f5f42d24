use whroute_core::Point;
use whroute_paths::{PathNode, PathRange, SearchError, path_cost};

use crate::warehouse::Warehouse;

/// A planned route: the visited cells from start to goal inclusive and
/// the total cost of walking them.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    pub path: Vec<Point>,
    pub cost: i32,
}

impl Route {
    /// First cell of the route.
    pub fn start(&self) -> Option<Point> {
        self.path.first().copied()
    }

    /// Last cell of the route.
    pub fn goal(&self) -> Option<Point> {
        self.path.last().copied()
    }

    /// Number of moves, one less than the number of cells.
    pub fn steps(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Plan a minimum-cost route across `warehouse`.
///
/// `Ok(None)` means the goal is unreachable. Start and goal must be on the
/// floor and passable, otherwise a [`SearchError`] is returned before any
/// search happens.
pub fn find_path(warehouse: &Warehouse, start: Point, goal: Point) -> Result<Option<Route>, SearchError> {
    let mut pr = PathRange::new(warehouse.bounds());
    find_path_with(&mut pr, warehouse, start, goal)
}

/// Like [`find_path`], reusing the caches in `pr`. The range of `pr` is
/// reset to the floor bounds if it differs.
pub fn find_path_with(
    pr: &mut PathRange,
    warehouse: &Warehouse,
    start: Point,
    goal: Point,
) -> Result<Option<Route>, SearchError> {
    if pr.range() != warehouse.bounds() {
        pr.set_range(warehouse.bounds());
    }
    let route = pr.astar_path(warehouse, start, goal)?.map(|path| Route {
        cost: path_cost(warehouse, &path),
        path,
    });
    Ok(route)
}

/// Cheapest cost from the nearest of `sources` to every cell reachable
/// within `max_cost`, in non-decreasing cost order.
pub fn cost_map(warehouse: &Warehouse, sources: &[Point], max_cost: i32) -> Vec<PathNode> {
    let mut pr = PathRange::new(warehouse.bounds());
    pr.dijkstra_map(warehouse, sources, max_cost).to_vec()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::layout::Layout;
    use proptest::prelude::*;

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    fn assert_valid(wh: &Warehouse, route: &Route, start: Point, goal: Point) {
        assert_eq!(route.start(), Some(start));
        assert_eq!(route.goal(), Some(goal));
        for w in route.path.windows(2) {
            assert!(wh.neighbors(w[0]).contains(&w[1]), "{} -> {}", w[0], w[1]);
        }
    }

    #[test]
    fn start_is_goal() {
        let wh = Warehouse::new(5, 5).unwrap();
        let route = find_path(&wh, p(3, 1), p(3, 1)).unwrap().unwrap();
        assert_eq!(route.path, vec![p(3, 1)]);
        assert_eq!(route.cost, 0);
        assert_eq!(route.steps(), 0);
    }

    #[test]
    fn straight_line() {
        let wh = Warehouse::new(5, 5).unwrap();
        let route = find_path(&wh, p(0, 0), p(4, 0)).unwrap().unwrap();
        assert_eq!(route.path, vec![p(0, 0), p(1, 0), p(2, 0), p(3, 0), p(4, 0)]);
        assert_eq!(route.cost, 4);
    }

    #[test]
    fn open_floor_diagonal_takes_staircase() {
        // Many routes cost 6; neighbour order and frontier insertion order
        // pick this one.
        let wh = Warehouse::new(5, 5).unwrap();
        let route = find_path(&wh, p(0, 0), p(3, 3)).unwrap().unwrap();
        assert_eq!(
            route.path,
            vec![p(0, 0), p(0, 1), p(1, 1), p(1, 2), p(2, 2), p(2, 3), p(3, 3)]
        );
        assert_eq!(route.cost, 6);
    }

    #[test]
    fn detour_below_column_wall() {
        // Wall on x = 2 covering y = 0..=3 leaves only row 4 open.
        let mut wh = Warehouse::new(5, 5).unwrap();
        wh.add_wall(p(2, 0), 1, 4).unwrap();
        let route = find_path(&wh, p(0, 0), p(4, 0)).unwrap().unwrap();
        assert_valid(&wh, &route, p(0, 0), p(4, 0));
        assert!(route.path.contains(&p(2, 4)));
        assert_eq!(route.cost, 12);
    }

    #[test]
    fn detour_below_short_wall() {
        let mut wh = Warehouse::new(5, 5).unwrap();
        wh.add_wall(p(2, 0), 1, 2).unwrap();
        let route = find_path(&wh, p(0, 0), p(4, 0)).unwrap().unwrap();
        assert_valid(&wh, &route, p(0, 0), p(4, 0));
        assert!(route.path.contains(&p(2, 2)));
        assert_eq!(route.cost, 8);
    }

    #[test]
    fn enclosed_goal_is_unreachable() {
        let mut wh = Warehouse::new(9, 9).unwrap();
        wh.add_wall(p(3, 3), 3, 1).unwrap();
        wh.add_wall(p(3, 5), 3, 1).unwrap();
        wh.add_wall(p(3, 4), 1, 1).unwrap();
        wh.add_shelf(p(5, 4), 1, 1, 0, 1).unwrap();
        assert_eq!(find_path(&wh, p(0, 0), p(4, 4)), Ok(None));
        assert_eq!(find_path(&wh, p(4, 4), p(8, 8)), Ok(None));
    }

    #[test]
    fn wall_on_only_corridor_cuts_route() {
        // Two rooms joined by a single gap at (4, 2).
        let mut wh = Warehouse::new(9, 5).unwrap();
        wh.add_wall(p(4, 0), 1, 2).unwrap();
        wh.add_wall(p(4, 3), 1, 2).unwrap();
        assert!(find_path(&wh, p(0, 0), p(8, 4)).unwrap().is_some());
        wh.add_wall(p(4, 2), 1, 1).unwrap();
        assert_eq!(find_path(&wh, p(0, 0), p(8, 4)), Ok(None));
    }

    #[test]
    fn heavy_terrain_forces_cheaper_detour() {
        let mut wh = Warehouse::new(7, 3).unwrap();
        for x in 1..6 {
            wh.set_weight(p(x, 1), 20).unwrap();
        }
        let route = find_path(&wh, p(0, 1), p(6, 1)).unwrap().unwrap();
        assert_valid(&wh, &route, p(0, 1), p(6, 1));
        // Up or down one row, across, and back: 8 moves of cost 1.
        assert_eq!(route.cost, 8);
        assert!(route.path[1..route.path.len() - 1].iter().all(|c| c.y != 1));
    }

    #[test]
    fn extreme_weights_do_not_overflow() {
        let mut wh = Warehouse::new(3, 1).unwrap();
        wh.set_weight(p(1, 0), i32::MAX).unwrap();
        let route = find_path(&wh, p(0, 0), p(1, 0)).unwrap().unwrap();
        assert_eq!(route.cost, i32::MAX);
        assert_eq!(find_path(&wh, p(0, 0), p(2, 0)), Ok(None));

        let mut wh = Warehouse::new(4, 1).unwrap();
        wh.set_weight(p(1, 0), 1 << 30).unwrap();
        wh.set_weight(p(2, 0), 1 << 30).unwrap();
        assert_eq!(find_path(&wh, p(0, 0), p(3, 0)), Ok(None));
        let nodes = cost_map(&wh, &[p(0, 0)], i32::MAX);
        assert_eq!(nodes.len(), 2);

        // With a second row the heavy cells are simply avoided.
        let mut wh = Warehouse::new(4, 2).unwrap();
        wh.set_weight(p(1, 0), 1 << 30).unwrap();
        wh.set_weight(p(2, 0), 1 << 30).unwrap();
        let route = find_path(&wh, p(0, 0), p(3, 0)).unwrap().unwrap();
        assert_valid(&wh, &route, p(0, 0), p(3, 0));
        assert_eq!(route.cost, 5);
    }

    #[test]
    fn endpoints_are_validated() {
        let mut wh = Warehouse::new(4, 4).unwrap();
        wh.add_shelf(p(1, 1), 1, 1, 0, 1).unwrap();
        assert_eq!(
            find_path(&wh, p(4, 0), p(0, 0)),
            Err(SearchError::OutOfBounds(p(4, 0)))
        );
        assert_eq!(
            find_path(&wh, p(0, 0), p(1, 1)),
            Err(SearchError::Blocked(p(1, 1)))
        );
    }

    #[test]
    fn deterministic_across_reuse() {
        let wh = warehouse_floor();
        let mut pr = PathRange::new(wh.bounds());
        let a = find_path_with(&mut pr, &wh, p(3, 19), p(50, 45)).unwrap();
        find_path_with(&mut pr, &wh, p(61, 0), p(0, 49)).unwrap();
        let b = find_path_with(&mut pr, &wh, p(3, 19), p(50, 45)).unwrap();
        assert!(a.is_some());
        assert_eq!(a, b);
        assert_eq!(a, find_path(&wh, p(3, 19), p(50, 45)).unwrap());
    }

    #[test]
    fn find_path_with_adopts_floor_bounds() {
        let wh = Warehouse::new(6, 6).unwrap();
        let mut pr = PathRange::new(whroute_core::Range::new(0, 0, 2, 2));
        let route = find_path_with(&mut pr, &wh, p(0, 0), p(5, 5)).unwrap().unwrap();
        assert_eq!(route.cost, 10);
        assert_eq!(pr.range(), wh.bounds());
    }

    #[test]
    fn concurrent_searches_share_the_floor() {
        let wh = warehouse_floor();
        let queries = [(p(3, 19), p(50, 45)), (p(0, 0), p(61, 49)), (p(60, 2), p(2, 47))];
        let expected: Vec<_> = queries
            .iter()
            .map(|&(s, g)| find_path(&wh, s, g).unwrap())
            .collect();
        let shared = &wh;
        let results: Vec<_> = std::thread::scope(|scope| {
            let handles: Vec<_> = queries
                .iter()
                .map(|&(s, g)| scope.spawn(move || find_path(shared, s, g).unwrap()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert_eq!(results, expected);
    }

    #[test]
    fn warehouse_route_through_aisles() {
        let wh = warehouse_floor();
        let (s, g) = (p(3, 19), p(50, 45));
        let route = find_path(&wh, s, g).unwrap().unwrap();
        assert_valid(&wh, &route, s, g);
        let costs = cost_map(&wh, &[s], i32::MAX - 1);
        let best = costs.iter().find(|n| n.pos == g).map(|n| n.cost);
        assert_eq!(Some(route.cost), best);
    }

    #[test]
    fn cost_map_respects_weights() {
        let mut wh = Warehouse::new(3, 1).unwrap();
        wh.set_weight(p(1, 0), 4).unwrap();
        let nodes = cost_map(&wh, &[p(0, 0)], 100);
        let by_pos: HashMap<Point, i32> = nodes.iter().map(|n| (n.pos, n.cost)).collect();
        assert_eq!(by_pos[&p(1, 0)], 4);
        assert_eq!(by_pos[&p(2, 0)], 5);
    }

    /// A 62×50 floor with two banks of shelving split by a cross aisle.
    fn warehouse_floor() -> Warehouse {
        Layout::new(62, 50)
            .with_shelf(p(0, 6), 2, 20, 2, 1)
            .with_shelf(p(4, 6), 4, 20, 2, 10)
            .with_shelf(p(0, 28), 2, 15, 2, 1)
            .with_shelf(p(4, 28), 4, 15, 2, 10)
            .build()
            .unwrap()
    }

    fn arb_floor() -> impl Strategy<Value = (Warehouse, Point, Point)> {
        (2i32..8, 2i32..8).prop_flat_map(|(w, h)| {
            let cells = (w * h) as usize;
            (
                proptest::collection::vec(0u8..8, cells),
                (0..w, 0..h),
                (0..w, 0..h),
            )
                .prop_map(move |(kinds, s, g)| {
                    let (s, g) = (Point::new(s.0, s.1), Point::new(g.0, g.1));
                    let mut wh = Warehouse::new(w, h).unwrap();
                    for (i, k) in kinds.into_iter().enumerate() {
                        let c = Point::new(i as i32 % w, i as i32 / w);
                        if c == s || c == g {
                            continue;
                        }
                        match k {
                            0 => wh.add_wall(c, 1, 1).unwrap(),
                            1 => wh.add_shelf(c, 1, 1, 0, 1).unwrap(),
                            2 => wh.set_weight(c, 6).unwrap(),
                            _ => {}
                        }
                    }
                    (wh, s, g)
                })
        })
    }

    proptest! {
        #[test]
        fn route_cost_is_optimal((wh, s, g) in arb_floor()) {
            let reference = cost_map(&wh, &[s], i32::MAX - 1)
                .into_iter()
                .find(|n| n.pos == g)
                .map(|n| n.cost);
            let route = find_path(&wh, s, g).unwrap();
            prop_assert_eq!(route.as_ref().map(|r| r.cost), reference);
            if let Some(r) = route {
                prop_assert_eq!(r.start(), Some(s));
                prop_assert_eq!(r.goal(), Some(g));
                for w in r.path.windows(2) {
                    prop_assert!(wh.neighbors(w[0]).contains(&w[1]));
                }
                prop_assert_eq!(find_path(&wh, s, g).unwrap(), Some(r));
            }
        }
    }
}
