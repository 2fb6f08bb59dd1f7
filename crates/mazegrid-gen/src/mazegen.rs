//! Randomized maze carving and the acceptance gate.

use std::fmt;

use mazegrid_core::{Grid, Point, Terrain};
use mazegrid_paths::SearchRange;
use rand::{Rng, RngExt};

/// Carving directions, in the canonical up/right/down/left order.
const DIRS: [Point; 4] = [
    Point::new(0, -1),
    Point::new(1, 0),
    Point::new(0, 1),
    Point::new(-1, 0),
];

/// Tuning knobs for [`MazeGen::generate`]. The defaults reproduce the
/// classic 15×15 demo maze.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MazeParams {
    /// Requested width; even values are bumped to the next odd so the
    /// carving lattice exists.
    pub width: i32,
    /// Requested height; bumped like `width`.
    pub height: i32,
    /// One loosening attempt per `area / loosen_divisor` cells.
    /// Zero disables loosening entirely.
    pub loosen_divisor: i32,
    /// Probability that a candidate wall is actually opened.
    pub loosen_chance: f64,
    /// Probability that opening a wall also carves one adjacent step.
    pub branch_chance: f64,
    /// Terrain roll above this becomes Forest (unless it is also above
    /// `mud_threshold`).
    pub forest_threshold: f64,
    /// Terrain roll above this becomes Mud.
    pub mud_threshold: f64,
    /// How many times to regenerate before giving up.
    pub attempts: u32,
}

impl Default for MazeParams {
    fn default() -> Self {
        Self {
            width: 15,
            height: 15,
            loosen_divisor: 7,
            loosen_chance: 0.6,
            branch_chance: 0.3,
            forest_threshold: 0.80,
            mud_threshold: 0.91,
            attempts: 100,
        }
    }
}

/// An accepted maze: the grid plus its fixed endpoints.
///
/// The grid is immutable from here on; searches read it, nothing
/// writes it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Maze {
    /// The carved terrain.
    pub grid: Grid,
    /// Always `(1, 1)`, always Ground.
    pub start: Point,
    /// Always `(width - 2, height - 2)`, always Ground.
    pub goal: Point,
}

/// Errors from [`MazeGen::generate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MazeError {
    /// Width or height below 3, or a 3×3 request whose goal would sit
    /// on the start cell.
    DimensionsTooSmall {
        /// The rejected width.
        width: i32,
        /// The rejected height.
        height: i32,
    },
    /// Every attempt produced a grid whose goal was unreachable.
    Unsolvable {
        /// How many grids were generated and rejected.
        attempts: u32,
    },
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DimensionsTooSmall { width, height } => {
                write!(f, "maze dimensions {width}x{height} are too small")
            }
            Self::Unsolvable { attempts } => {
                write!(f, "no solvable maze after {attempts} attempts")
            }
        }
    }
}

impl std::error::Error for MazeError {}

/// One frame of the iterative carve: a cell, its one-time direction
/// shuffle, and how far through it the walk has gotten.
struct CarveFrame {
    pos: Point,
    dirs: [Point; 4],
    next: usize,
}

/// Maze generator owning its random source.
pub struct MazeGen<R: Rng> {
    rng: R,
}

impl<R: Rng> MazeGen<R> {
    /// Create a generator around the given RNG. Pass a seeded RNG for
    /// reproducible mazes.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Generate a maze, retrying until the goal is reachable from the
    /// start or the attempt cap runs out.
    pub fn generate(&mut self, params: &MazeParams) -> Result<Maze, MazeError> {
        let mut width = params.width;
        let mut height = params.height;
        if width % 2 == 0 {
            width += 1;
        }
        if height % 2 == 0 {
            height += 1;
        }
        if params.width < 3 || params.height < 3 || (width == 3 && height == 3) {
            return Err(MazeError::DimensionsTooSmall {
                width: params.width,
                height: params.height,
            });
        }

        let start = Point::new(1, 1);
        let goal = Point::new(width - 2, height - 2);
        let mut range = SearchRange::new(width, height);

        for attempt in 1..=params.attempts {
            let mut grid = Grid::new(width, height, Terrain::Wall);
            self.carve(&mut grid, start);
            self.loosen(&mut grid, params);
            self.season(&mut grid, params);
            grid.set(start, Terrain::Ground);
            grid.set(goal, Terrain::Ground);

            if range.reachable(&grid, start, goal) {
                log::debug!("maze {width}x{height} accepted on attempt {attempt}");
                return Ok(Maze { grid, start, goal });
            }
            log::debug!("maze attempt {attempt} rejected: goal unreachable from start");
        }

        Err(MazeError::Unsolvable {
            attempts: params.attempts,
        })
    }

    /// Recursive-backtracking carve on an explicit frame stack.
    ///
    /// Each frame shuffles its directions once and resumes where it
    /// left off after a descent, so the visit order is exactly that of
    /// the call-stack recursion it replaces.
    fn carve(&mut self, grid: &mut Grid, start: Point) {
        grid.set(start, Terrain::Ground);
        let dirs = self.shuffled_dirs();
        let mut stack = vec![CarveFrame {
            pos: start,
            dirs,
            next: 0,
        }];

        loop {
            let (pos, d) = {
                let Some(frame) = stack.last_mut() else {
                    break;
                };
                if frame.next == frame.dirs.len() {
                    stack.pop();
                    continue;
                }
                let d = frame.dirs[frame.next];
                frame.next += 1;
                (frame.pos, d)
            };

            let far = pos + d * 2;
            if Self::in_interior(grid, far) && grid.at(far) == Some(Terrain::Wall) {
                grid.set(pos + d, Terrain::Ground);
                grid.set(far, Terrain::Ground);
                let dirs = self.shuffled_dirs();
                stack.push(CarveFrame {
                    pos: far,
                    dirs,
                    next: 0,
                });
            }
        }
    }

    /// Open extra connections so the spanning tree gains cycles and the
    /// cost-aware searches have real alternatives. Carving only ever
    /// adds Ground, so the maze cannot become disconnected here.
    fn loosen(&mut self, grid: &mut Grid, params: &MazeParams) {
        if params.loosen_divisor <= 0 {
            return;
        }
        let (w, h) = (grid.width(), grid.height());
        let extra = (w * h) / params.loosen_divisor;

        for _ in 0..extra {
            let p = Point::new(
                self.rng.random_range(1..w - 1),
                self.rng.random_range(1..h - 1),
            );
            if grid.at(p) != Some(Terrain::Wall) || !borders_ground(grid, p) {
                continue;
            }
            if !self.rng.random_bool(params.loosen_chance) {
                continue;
            }
            grid.set(p, Terrain::Ground);

            if self.rng.random_bool(params.branch_chance) {
                let q = p + DIRS[self.rng.random_range(0..DIRS.len())];
                if Self::in_interior(grid, q) && grid.at(q) == Some(Terrain::Wall) {
                    grid.set(q, Terrain::Ground);
                }
            }
        }
    }

    /// Convert a slice of corridors to Forest and Mud.
    fn season(&mut self, grid: &mut Grid, params: &MazeParams) {
        for y in 1..grid.height() - 1 {
            for x in 1..grid.width() - 1 {
                let p = Point::new(x, y);
                if grid.at(p) != Some(Terrain::Ground) {
                    continue;
                }
                let r: f64 = self.rng.random();
                if r > params.mud_threshold {
                    grid.set(p, Terrain::Mud);
                } else if r > params.forest_threshold {
                    grid.set(p, Terrain::Forest);
                }
            }
        }
    }

    fn shuffled_dirs(&mut self) -> [Point; 4] {
        let mut dirs = DIRS;
        for i in 0..dirs.len() {
            let j = self.rng.random_range(i..dirs.len());
            dirs.swap(i, j);
        }
        dirs
    }

    fn in_interior(grid: &Grid, p: Point) -> bool {
        p.x > 0 && p.x < grid.width() - 1 && p.y > 0 && p.y < grid.height() - 1
    }
}

fn borders_ground(grid: &Grid, p: Point) -> bool {
    p.neighbors_4()
        .iter()
        .any(|&n| grid.at(n).is_some_and(Terrain::passable))
}
