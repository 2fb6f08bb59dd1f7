//! Pather implementations for terrain grids.
//!
//! [`Grid`] itself implements the full trait stack with a plain
//! Manhattan estimate, which keeps A* cost-optimal. [`SafetyPather`]
//! wraps a grid with the optional penalty terms; those deliberately
//! overestimate, so the search steers wide of walls and hazards at the
//! price of global cost-optimality.

use mazegrid_core::{Grid, Point, Terrain};

use crate::distance::manhattan;
use crate::query::SearchOptions;
use crate::searchrange::UNREACHABLE;
use crate::traits::{AstarPather, Pather, WeightedPather};

impl Pather for Grid {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        for np in p.neighbors_4() {
            if self.passable(np) {
                buf.push(np);
            }
        }
    }
}

impl WeightedPather for Grid {
    fn cost(&self, _from: Point, to: Point) -> i32 {
        // Moves pay the destination cell's terrain cost. `neighbors`
        // only yields passable cells, so the fallback never feeds a
        // search in practice.
        self.cost(to).unwrap_or(UNREACHABLE)
    }
}

impl AstarPather for Grid {
    fn estimate(&self, from: Point, to: Point) -> i32 {
        manhattan(from, to)
    }
}

/// How far around a position the wall-proximity penalty looks.
const WALL_SCAN_RADIUS: i32 = 3;

/// Hazards farther away than this (Euclidean) contribute nothing.
const HAZARD_RADIUS: f64 = 5.0;

/// A grid pather whose heuristic is biased away from danger.
///
/// On top of the Manhattan estimate it adds, per
/// [`SearchOptions`](crate::SearchOptions):
///
/// - a *wall-proximity penalty*: with the nearest wall at Chebyshev
///   distance `d < 3`, add `(3 - d) * 2`;
/// - a *hazard-proximity penalty*: for every hazard within Euclidean
///   distance 5, add `⌊20 / (d + 0.5)⌋`.
///
/// Both terms overestimate the remaining cost, so paths found through
/// this pather are **safety-biased, not guaranteed cost-minimal**. That
/// is the point: the search pays extra to keep its distance.
pub struct SafetyPather<'a> {
    grid: &'a Grid,
    avoid_walls: bool,
    hazards: &'a [Point],
}

impl<'a> SafetyPather<'a> {
    /// Wrap `grid` with the penalties selected in `options`.
    pub fn new(grid: &'a Grid, options: &'a SearchOptions) -> Self {
        Self {
            grid,
            avoid_walls: options.avoid_walls,
            hazards: &options.hazards,
        }
    }
}

impl Pather for SafetyPather<'_> {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        self.grid.neighbors(p, buf);
    }
}

impl WeightedPather for SafetyPather<'_> {
    fn cost(&self, from: Point, to: Point) -> i32 {
        WeightedPather::cost(self.grid, from, to)
    }
}

impl AstarPather for SafetyPather<'_> {
    fn estimate(&self, from: Point, to: Point) -> i32 {
        let mut h = manhattan(from, to);
        if self.avoid_walls {
            h += wall_penalty(self.grid, from);
        }
        if !self.hazards.is_empty() {
            h += hazard_penalty(self.hazards, from);
        }
        h
    }
}

/// Penalty for standing near a wall: `(3 - d) * 2` with `d` the
/// Chebyshev distance to the nearest wall within the scan window,
/// zero when no wall is closer than 3.
fn wall_penalty(grid: &Grid, p: Point) -> i32 {
    let mut nearest = WALL_SCAN_RADIUS;
    for dy in -WALL_SCAN_RADIUS..=WALL_SCAN_RADIUS {
        for dx in -WALL_SCAN_RADIUS..=WALL_SCAN_RADIUS {
            if dx == 0 && dy == 0 {
                continue;
            }
            if grid.at(p.shift(dx, dy)) == Some(Terrain::Wall) {
                nearest = nearest.min(dx.abs().max(dy.abs()));
            }
        }
    }
    (WALL_SCAN_RADIUS - nearest) * 2
}

/// Summed penalty from every hazard within [`HAZARD_RADIUS`]:
/// `⌊20 / (d + 0.5)⌋` per hazard, so a hazard underfoot costs 40 and
/// one at the rim costs 3.
fn hazard_penalty(hazards: &[Point], p: Point) -> i32 {
    let mut total = 0;
    for &hz in hazards {
        let dx = f64::from(hz.x - p.x);
        let dy = f64::from(hz.y - p.y);
        let d = (dx * dx + dy * dy).sqrt();
        if d <= HAZARD_RADIUS {
            total += (20.0 / (d + 0.5)).floor() as i32;
        }
    }
    total
}
