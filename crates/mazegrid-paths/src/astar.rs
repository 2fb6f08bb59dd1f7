use mazegrid_core::Point;

use crate::SearchRange;
use crate::traits::AstarPather;

impl SearchRange {
    /// Compute a path from `from` to `to` using A*. The priority key is
    /// `g + estimate(pos, goal)`.
    ///
    /// With an estimate that never overestimates (the plain Manhattan
    /// estimate of [`Grid`](mazegrid_core::Grid)) the result is
    /// cost-optimal. Biased estimates such as
    /// [`SafetyPather`](crate::SafetyPather) trade that optimality for
    /// steering; a closed node whose `g` later improves is reopened, so
    /// the returned path's costs stay internally consistent either way.
    ///
    /// Returns the full path (including both endpoints) or `None` if no
    /// path exists.
    pub fn astar_path<P: AstarPather>(
        &mut self,
        pather: &P,
        from: Point,
        to: Point,
    ) -> Option<Vec<Point>> {
        let start_idx = self.idx(from)?;
        let goal_idx = self.idx(to)?;

        if start_idx == goal_idx {
            return Some(vec![from]);
        }

        self.generation = self.generation.wrapping_add(1);
        let cur_gen = self.generation;

        {
            let node = &mut self.nodes[start_idx];
            node.g = 0;
            node.parent = usize::MAX;
            node.generation = cur_gen;
            node.open = true;
        }

        self.frontier.clear();
        self.frontier.push(start_idx, pather.estimate(from, to));

        let mut nbuf = std::mem::take(&mut self.nbuf);

        let found = 'search: loop {
            let Ok((ci, _)) = self.frontier.pop_min() else {
                break 'search false;
            };

            // Skip stale entries.
            if self.nodes[ci].generation != cur_gen || !self.nodes[ci].open {
                continue;
            }

            if ci == goal_idx {
                break 'search true;
            }

            self.nodes[ci].open = false;
            let current_g = self.nodes[ci].g;
            let current_point = self.point(ci);

            nbuf.clear();
            pather.neighbors(current_point, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                let tentative = current_g + pather.cost(current_point, np);

                let n = &mut self.nodes[ni];
                if n.generation == cur_gen {
                    if tentative >= n.g {
                        continue;
                    }
                } else {
                    n.generation = cur_gen;
                }

                n.g = tentative;
                n.parent = ci;
                n.open = true;
                self.frontier.push(ni, tentative + pather.estimate(np, to));
            }
        };

        self.nbuf = nbuf;

        if !found {
            return None;
        }
        Some(self.reconstruct(goal_idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mazegrid_core::Grid;

    #[test]
    fn matches_dijkstra_cost_with_plain_estimate() {
        let grid = Grid::parse(
            "\
#######
#.~~..#
#.##~.#
#.....#
#######",
        )
        .unwrap();
        let start = Point::new(1, 1);
        let goal = Point::new(5, 3);
        let mut sr = SearchRange::new(grid.width(), grid.height());
        let a = sr.astar_path(&grid, start, goal).unwrap();
        let d = sr.dijkstra_path(&grid, start, goal).unwrap();
        let cost = |p: &[Point]| -> i32 {
            p.iter().skip(1).map(|&q| grid.cost(q).unwrap()).sum()
        };
        assert_eq!(cost(&a), cost(&d));
    }

    #[test]
    fn straight_corridor() {
        let grid = Grid::parse(
            "\
#######
#.....#
#######",
        )
        .unwrap();
        let mut sr = SearchRange::new(grid.width(), grid.height());
        let path = sr
            .astar_path(&grid, Point::new(1, 1), Point::new(5, 1))
            .unwrap();
        assert_eq!(path.len(), 5);
    }

    #[test]
    fn unreachable_goal_returns_none() {
        let grid = Grid::parse(
            "\
..#..
..#..",
        )
        .unwrap();
        let mut sr = SearchRange::new(grid.width(), grid.height());
        assert_eq!(
            sr.astar_path(&grid, Point::new(0, 0), Point::new(4, 0)),
            None
        );
    }

    #[test]
    fn endpoint_outside_range_returns_none() {
        let grid = Grid::parse("...").unwrap();
        let mut sr = SearchRange::new(grid.width(), grid.height());
        assert_eq!(
            sr.astar_path(&grid, Point::new(0, 0), Point::new(9, 9)),
            None
        );
    }
}
