use mazegrid_core::Point;

/// Minimal pathfinding interface — provides neighbor enumeration.
pub trait Pather {
    /// Append the passable neighbors of `p` into `buf`. The caller
    /// clears `buf` before calling.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>);
}

/// Pather with weighted (positive-cost) edges.
pub trait WeightedPather: Pather {
    /// Cost of moving from `from` to adjacent `to`. Must be > 0.
    fn cost(&self, from: Point, to: Point) -> i32;
}

/// Full A* pather with a heuristic estimate.
pub trait AstarPather: WeightedPather {
    /// Heuristic estimate of the remaining cost from `from` to `to`.
    ///
    /// An estimate that never overestimates keeps A* cost-optimal.
    /// Implementations may deliberately overestimate to bias the search
    /// (see [`SafetyPather`](crate::SafetyPather)), giving up that
    /// guarantee.
    fn estimate(&self, from: Point, to: Point) -> i32;
}
