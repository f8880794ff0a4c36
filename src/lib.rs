#![warn(missing_docs)]

//! # `gridwalk`
//!
//! Building blocks for puzzles played on square grids: a coordinate-addressed [`Grid`], a [`Direction`] model,
//! pending-work containers ([`WorkQueue`], [`WorkStack`]), and the searches built from them.
//! Begin by reading puzzle text into a grid with [`Grid::from_text`], mapping every character to a cell type of your choosing.
//! Then hand the grid to one of the searches:
//!
//! - [`Maze`] scores unit-cost shortest paths in place on its cells; [`DistanceMap`] does the same into a fresh map.
//! - [`BestPaths`] finds the cheapest route when turning costs extra, along with every cell on any route of that cost.
//! - [`find_shortcuts`] measures how much time jumping over obstacles would save.
//! - [`Regions`] partitions a grid into connected same-valued [`Region`]s and measures their area, perimeter and sides.
//!
//! # Internals
//! Every search is a drain of a [`WorkList`]: items are taken one at a time, and visiting one may add more.
//! A queue gives breadth-first order, which for unit costs means a cell is settled the first time it is dequeued.
//! Searches with uneven costs (turning versus stepping) still use a queue but re-enqueue a state whenever its cost drops,
//! so they settle once no improvement is left.
//! Work lists do not remember what they have handed out; every search keeps its own best-cost or membership table
//! and only enqueues work that improves on it.
//!
//! Cells never refer back to their grid. Searches borrow the grid for the duration of one call.

pub use direction::Direction;
pub use distance::{Distance, DistanceMap, Target};
pub use error::{DirectionError, GridError};
pub use grid::Grid;
pub use heading::{BestPathOptions, BestPaths, Heading, PathTracking};
pub use location::{Coord, Dimension, Location};
pub use maze::{Maze, MazeCell, ScoreMode};
pub use region::{Region, Regions};
pub use shortcut::{find_shortcuts, ShortcutRules};
pub use work::{Drain, WorkList, WorkQueue, WorkStack};

pub mod direction;
pub mod distance;
pub mod error;
pub mod grid;
pub mod heading;
pub(crate) mod location;
pub mod maze;
pub mod region;
pub mod shortcut;
pub mod work;
