//! Maze generation for the mazegrid engine.
//!
//! [`MazeGen`] carves a spanning maze by randomized recursive
//! backtracking, loosens it with extra connections so several routes
//! exist, seasons corridors with costly terrain, and only returns grids
//! whose goal the reachability check confirms. All randomness flows
//! through a caller-supplied [`Rng`](rand::Rng), so a fixed seed
//! replays the exact same maze.

pub mod mazegen;

pub use mazegen::{Maze, MazeError, MazeGen, MazeParams};
