//! The one-call query surface: pick a strategy, get a path.

use std::fmt;

use mazegrid_core::{Grid, Point};

use crate::pathers::SafetyPather;
use crate::searchrange::SearchRange;

/// Which search algorithm [`find_path`] runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Fewest hops, terrain cost ignored.
    Bfs,
    /// Least terrain cost.
    Dijkstra,
    /// Least terrain cost with heuristic guidance; honors
    /// [`SearchOptions`] penalties.
    AStar,
}

/// Tuning for A* danger avoidance. The default enables nothing, which
/// keeps the heuristic admissible.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    /// Penalize positions within 3 cells of a wall.
    pub avoid_walls: bool,
    /// Positions to steer clear of; each penalizes its surroundings out
    /// to Euclidean distance 5. Empty disables the term.
    pub hazards: Vec<Point>,
}

/// A query rejected before any search ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathError {
    /// Start or goal lies outside the grid.
    OutOfBounds(Point),
    /// Start or goal sits on impassable terrain.
    Blocked(Point),
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds(p) => write!(f, "position {p} is outside the grid"),
            Self::Blocked(p) => write!(f, "position {p} is impassable"),
        }
    }
}

impl std::error::Error for PathError {}

/// Find a path from `start` to `goal` on `grid` using the given
/// strategy.
///
/// Endpoints are validated before the search: out-of-bounds or walled
/// endpoints are errors. A clean search that exhausts the frontier is
/// not an error; it returns `Ok(None)`.
///
/// `options` only affects [`Strategy::AStar`]; with penalties active
/// the result is safety-biased rather than cost-minimal. The grid is
/// never mutated, and identical inputs always return the identical
/// path.
pub fn find_path(
    grid: &Grid,
    start: Point,
    goal: Point,
    strategy: Strategy,
    options: &SearchOptions,
) -> Result<Option<Vec<Point>>, PathError> {
    for p in [start, goal] {
        if !grid.contains(p) {
            return Err(PathError::OutOfBounds(p));
        }
        if !grid.passable(p) {
            return Err(PathError::Blocked(p));
        }
    }

    let mut range = SearchRange::new(grid.width(), grid.height());
    let path = match strategy {
        Strategy::Bfs => range.bfs_path(grid, start, goal),
        Strategy::Dijkstra => range.dijkstra_path(grid, start, goal),
        Strategy::AStar => {
            let pather = SafetyPather::new(grid, options);
            range.astar_path(&pather, start, goal)
        }
    };
    Ok(path)
}

/// Total terrain cost of walking `path`, with each move paying the
/// destination cell's cost. `None` if any step is impassable or out of
/// bounds.
pub fn path_cost(grid: &Grid, path: &[Point]) -> Option<i32> {
    let mut total = 0;
    for &p in path.iter().skip(1) {
        total += grid.cost(p)?;
    }
    Some(total)
}
