use mazegrid_core::Point;

use crate::SearchRange;
use crate::traits::WeightedPather;

impl SearchRange {
    /// Compute a least-cost path from `from` to `to` using Dijkstra's
    /// algorithm (uniform-cost search). The priority key is the
    /// cumulative cost `g`.
    ///
    /// There is no decrease-key: a node whose cost improves is pushed
    /// again and the stale entry is skipped when it pops. Equal-cost
    /// frontiers pop in insertion order, so results are reproducible.
    ///
    /// Returns the full path (including both endpoints) or `None` if no
    /// path exists.
    pub fn dijkstra_path<P: WeightedPather>(
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
        self.frontier.push(start_idx, 0);

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
                self.frontier.push(ni, tentative);
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
    fn detours_around_expensive_terrain() {
        // Straight route costs 5 + 1 = 6; the detour through ground
        // costs 4.
        let grid = Grid::parse(
            "\
#####
#.~.#
#...#
#####",
        )
        .unwrap();
        let mut sr = SearchRange::new(grid.width(), grid.height());
        let path = sr
            .dijkstra_path(&grid, Point::new(1, 1), Point::new(3, 1))
            .unwrap();
        assert_eq!(
            path,
            vec![
                Point::new(1, 1),
                Point::new(1, 2),
                Point::new(2, 2),
                Point::new(3, 2),
                Point::new(3, 1),
            ]
        );
    }

    #[test]
    fn takes_expensive_route_when_cheaper_overall() {
        // The muddy shortcut costs 6; the all-ground detour costs 14.
        let grid = Grid::parse(
            "\
#########
#.~.....#
#.#####.#
#.......#
#########",
        )
        .unwrap();
        let mut sr = SearchRange::new(grid.width(), grid.height());
        let path = sr
            .dijkstra_path(&grid, Point::new(1, 1), Point::new(3, 1))
            .unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(path[1], Point::new(2, 1));
    }

    #[test]
    fn no_path_returns_none() {
        let grid = Grid::parse(
            "\
.#.
.#.",
        )
        .unwrap();
        let mut sr = SearchRange::new(grid.width(), grid.height());
        assert_eq!(
            sr.dijkstra_path(&grid, Point::new(0, 0), Point::new(2, 1)),
            None
        );
    }

    #[test]
    fn reuse_across_queries_is_clean() {
        let open = Grid::parse(
            "\
####
#..#
####",
        )
        .unwrap();
        let mut sr = SearchRange::new(open.width(), open.height());
        let first = sr.dijkstra_path(&open, Point::new(1, 1), Point::new(2, 1));
        let second = sr.dijkstra_path(&open, Point::new(1, 1), Point::new(2, 1));
        assert_eq!(first, second);
        assert_eq!(first.unwrap().len(), 2);
    }
}
