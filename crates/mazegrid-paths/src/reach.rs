//! Reachability checking.

use mazegrid_core::{Grid, Point};

use crate::SearchRange;
use crate::traits::Pather;

impl SearchRange {
    /// Whether `to` can be reached from `from` over the pather's
    /// neighbor graph.
    ///
    /// Depth-first traversal on an explicit stack, so large grids never
    /// threaten the call stack. Visited marks live in the shared node
    /// array via generation stamps and short-circuit as soon as the
    /// goal is discovered.
    pub fn reachable<P: Pather>(&mut self, pather: &P, from: Point, to: Point) -> bool {
        let Some(start_idx) = self.idx(from) else {
            return false;
        };
        let Some(goal_idx) = self.idx(to) else {
            return false;
        };
        if start_idx == goal_idx {
            return true;
        }

        self.generation = self.generation.wrapping_add(1);
        let cur_gen = self.generation;
        self.nodes[start_idx].generation = cur_gen;

        self.dfs_stack.clear();
        self.dfs_stack.push(start_idx);

        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut found = false;

        'dfs: while let Some(ci) = self.dfs_stack.pop() {
            let cp = self.point(ci);
            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);

            // Pushed in reverse so the first direction is explored
            // first, matching the recursive visit order.
            for &np in nbuf.iter().rev() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                if self.nodes[ni].generation == cur_gen {
                    continue;
                }
                self.nodes[ni].generation = cur_gen;
                if ni == goal_idx {
                    found = true;
                    break 'dfs;
                }
                self.dfs_stack.push(ni);
            }
        }

        self.nbuf = nbuf;
        found
    }
}

/// Whether `goal` is reachable from `start` on `grid`.
///
/// Both endpoints must be inside the grid and passable; anything else
/// is trivially unreachable.
pub fn is_reachable(grid: &Grid, start: Point, goal: Point) -> bool {
    if !grid.passable(start) || !grid.passable(goal) {
        return false;
    }
    let mut range = SearchRange::new(grid.width(), grid.height());
    range.reachable(grid, start, goal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reaches_through_winding_corridor() {
        let grid = Grid::parse(
            "\
#######
#.###.#
#.#.#.#
#.#.#.#
#...#.#
#######",
        )
        .unwrap();
        assert!(is_reachable(&grid, Point::new(1, 1), Point::new(3, 2)));
        assert!(!is_reachable(&grid, Point::new(1, 1), Point::new(5, 1)));
    }

    #[test]
    fn solid_wall_separates() {
        let grid = Grid::parse(
            "\
.....
#####
.....",
        )
        .unwrap();
        assert!(!is_reachable(&grid, Point::new(0, 0), Point::new(0, 2)));
    }

    #[test]
    fn endpoints_must_be_passable_and_in_bounds() {
        let grid = Grid::parse(
            "\
.#
..",
        )
        .unwrap();
        assert!(!is_reachable(&grid, Point::new(0, 0), Point::new(1, 0)));
        assert!(!is_reachable(&grid, Point::new(0, 0), Point::new(5, 5)));
        assert!(is_reachable(&grid, Point::new(0, 0), Point::new(0, 0)));
    }

    #[test]
    fn large_corridor_does_not_recurse() {
        // A single serpentine corridor through a 201x201 grid; deep
        // enough to blow a call stack if the traversal recursed.
        let n = 201;
        let mut grid = Grid::new(n, n, mazegrid_core::Terrain::Wall);
        let open = |x: i32, y: i32, g: &mut Grid| {
            g.set(Point::new(x, y), mazegrid_core::Terrain::Ground)
        };
        for y in (1..n - 1).step_by(2) {
            for x in 1..n - 1 {
                open(x, y, &mut grid);
            }
        }
        for (i, y) in ((1..n - 2).step_by(2)).enumerate() {
            let x = if i % 2 == 0 { n - 2 } else { 1 };
            open(x, y + 1, &mut grid);
        }
        assert!(is_reachable(
            &grid,
            Point::new(1, 1),
            Point::new(n - 2, n - 2),
        ));
    }
}
