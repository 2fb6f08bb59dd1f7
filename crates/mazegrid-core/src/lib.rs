//! **mazegrid-core** — foundational types for the mazegrid engine.
//!
//! This crate provides the types shared by every other mazegrid crate:
//! geometry primitives, the weighted terrain model, and the priority
//! frontier that backs both the pathfinders and the turn scheduler.

pub mod frontier;
pub mod geom;
pub mod grid;
pub mod terrain;

pub use frontier::{EmptyFrontier, Frontier};
pub use geom::Point;
pub use grid::{Grid, GridError};
pub use terrain::Terrain;
