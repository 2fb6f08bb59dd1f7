use mazegrid_core::{Frontier, Point};

/// Sentinel value meaning "no finite cost known".
pub const UNREACHABLE: i32 = i32::MAX;

/// Per-node search state, stamped by generation so a new query
/// invalidates old nodes lazily instead of clearing the whole array.
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
            g: UNREACHABLE,
            parent: usize::MAX,
            generation: 0,
            open: false,
        }
    }
}

/// Reusable search state for pathfinding on a `width × height` grid.
///
/// A `SearchRange` owns the node array, the open frontier, and the DFS
/// stack, so repeated queries incur no allocations after warm-up. The
/// node set belongs exclusively to the search invocation in flight;
/// nothing survives a call except capacity.
pub struct SearchRange {
    width: i32,
    height: i32,
    pub(crate) nodes: Vec<Node>,
    pub(crate) generation: u32,
    pub(crate) frontier: Frontier<usize, i32>,
    pub(crate) dfs_stack: Vec<usize>,
    // shared scratch buffer for neighbor queries
    pub(crate) nbuf: Vec<Point>,
}

impl SearchRange {
    /// Create a new `SearchRange` for a grid of the given dimensions.
    pub fn new(width: i32, height: i32) -> Self {
        let w = width.max(0);
        let h = height.max(0);
        let len = (w as usize) * (h as usize);
        Self {
            width: w,
            height: h,
            nodes: vec![Node::default(); len],
            generation: 0,
            frontier: Frontier::new(),
            dfs_stack: Vec::new(),
            nbuf: Vec::with_capacity(4),
        }
    }

    /// Width of the searched grid.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height of the searched grid.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Convert a `Point` to a flat index. Returns `None` if out of range.
    #[inline]
    pub(crate) fn idx(&self, p: Point) -> Option<usize> {
        if p.x < 0 || p.x >= self.width || p.y < 0 || p.y >= self.height {
            return None;
        }
        Some((p.y * self.width + p.x) as usize)
    }

    /// Convert a flat index back to a `Point`.
    #[inline]
    pub(crate) fn point(&self, idx: usize) -> Point {
        let w = self.width as usize;
        Point::new((idx % w) as i32, (idx / w) as i32)
    }

    /// Walk parent pointers backward from `goal_idx` and reverse,
    /// yielding the start-to-goal path inclusive of both endpoints.
    pub(crate) fn reconstruct(&self, goal_idx: usize) -> Vec<Point> {
        let mut path = Vec::new();
        let mut ci = goal_idx;
        while ci != usize::MAX {
            path.push(self.point(ci));
            ci = self.nodes[ci].parent;
        }
        path.reverse();
        path
    }
}
