use mazegrid_core::Point;

use crate::SearchRange;
use crate::traits::Pather;

impl SearchRange {
    /// Compute a fewest-hops path from `from` to `to` using
    /// breadth-first search. Terrain cost is ignored; every step counts
    /// as 1.
    ///
    /// Every push uses the constant key 0, so the frontier's FIFO
    /// tie-break reduces it to a plain queue and nodes pop in wave
    /// order.
    ///
    /// Returns the full path (including both endpoints) or `None` if no
    /// path exists.
    pub fn bfs_path<P: Pather>(&mut self, pather: &P, from: Point, to: Point) -> Option<Vec<Point>> {
        let start_idx = self.idx(from)?;
        let goal_idx = self.idx(to)?;

        if start_idx == goal_idx {
            return Some(vec![from]);
        }

        // Bump generation to lazily invalidate all nodes.
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
                let n = &mut self.nodes[ni];
                if n.generation == cur_gen {
                    // In uniform-step expansion the first visit is final.
                    continue;
                }
                n.generation = cur_gen;
                n.g = current_g + 1;
                n.parent = ci;
                n.open = true;
                self.frontier.push(ni, 0);
            }
        };

        self.nbuf = nbuf;

        if !found {
            return None;
        }
        Some(self.reconstruct(goal_idx))
    }
}
