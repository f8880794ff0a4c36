use std::fmt::{Display, Formatter};

use tracing::{debug, instrument, trace};

use crate::distance::{Distance, Target};
use crate::error::GridError;
use crate::grid::Grid;
use crate::location::{Dimension, Location};
use crate::work::{Drain, WorkList, WorkQueue};

/// Whether a scoring run starts from a clean slate.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum ScoreMode {
    /// Clear every best score before the run.
    #[default]
    Reset,
    /// Keep the best scores of earlier runs. Scores only ever go down, so stale scores block expansion;
    /// callers choose this only when earlier results are known to still hold.
    Reuse,
}

/// One cell of a [`Maze`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MazeCell {
    /// Where this cell sits.
    pub location: Location,
    /// The character this cell was read from, or `.` for generated mazes.
    pub symbol: char,
    /// Impassable cells are never entered.
    pub obstacle: bool,
    best_score: Distance,
}

impl MazeCell {
    /// An open cell at `location`.
    pub fn open(location: Location) -> Self {
        Self { location, symbol: '.', obstacle: false, best_score: Distance::Unreachable }
    }

    /// The lowest cost found to this cell by the most recent scoring run(s).
    pub fn best_score(&self) -> Distance {
        self.best_score
    }
}

impl Display for MazeCell {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.obstacle {
            return write!(f, "#");
        }

        match self.best_score {
            Distance::Finite(score) => write!(f, "{}", score % 10),
            Distance::Unreachable => write!(f, "."),
        }
    }
}

/// A grid of open and obstructed cells scored by unit-cost breadth-first search.
///
/// Scores live on the cells themselves and only ever decrease within a run.
/// Runs that share a maze either reset scores first ([`ScoreMode::Reset`]) or deliberately build on the previous run ([`ScoreMode::Reuse`]).
/// For scoring without touching the maze, see [`DistanceMap`](crate::DistanceMap).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    grid: Grid<MazeCell>,
}

impl Maze {
    /// An open maze, `dims` specified in `(width, height)` order.
    pub fn with_dims(dims: (Dimension, Dimension)) -> Self {
        Self { grid: Grid::from_fn(dims, MazeCell::open) }
    }

    /// Read a maze from text: `#` marks an obstacle, every other character is open and kept as the cell's symbol.
    pub fn from_text(text: &str) -> Result<Self, GridError> {
        let grid = Grid::from_text(text, |symbol, location| MazeCell {
            location,
            symbol,
            obstacle: symbol == '#',
            best_score: Distance::Unreachable,
        })?;

        Ok(Self { grid })
    }

    /// The underlying grid.
    pub fn grid(&self) -> &Grid<MazeCell> {
        &self.grid
    }

    /// Location of the first cell in row-major order read from `symbol`.
    pub fn find_char(&self, symbol: char) -> Option<Location> {
        self.grid.find_location(|_, cell| cell.symbol == symbol)
    }

    /// Whether `location` is on the maze and not an obstacle.
    pub fn is_open(&self, location: Location) -> bool {
        self.grid.get(location).is_some_and(|cell| !cell.obstacle)
    }

    /// Mark or clear an obstacle. Returns the previous state, or [`None`] if `location` is off the maze.
    pub fn set_obstacle(&mut self, location: Location, obstacle: bool) -> Option<bool> {
        self.grid.get_mut(location)
            .map(|cell| std::mem::replace(&mut cell.obstacle, obstacle))
    }

    /// The best score currently recorded at `location`; off-maze locations are unreachable.
    pub fn best_score(&self, location: Location) -> Distance {
        self.grid.get(location).map_or(Distance::Unreachable, MazeCell::best_score)
    }

    /// Forget every best score.
    pub fn reset_scores(&mut self) {
        self.grid.iter_mut().for_each(|(_, cell)| cell.best_score = Distance::Unreachable);
    }

    /// Shortest unit-cost distance from `start` to `end`, clearing previous scores first.
    pub fn score(&mut self, start: Location, end: Location) -> Distance {
        self.score_with(start, Target::Cell(end), ScoreMode::Reset);
        self.best_score(end)
    }

    /// Score every cell reachable from `start`, clearing previous scores first.
    pub fn fill_from(&mut self, start: Location) {
        self.score_with(start, Target::Everything, ScoreMode::Reset);
    }

    /// Run one breadth-first scoring pass from `start`.
    ///
    /// With [`Target::Cell`], the run stops as soon as that cell is dequeued, which is when its score is final.
    /// Returns how the underlying work queue finished; read results back with [`Self::best_score`].
    #[instrument(level = "debug", skip(self))]
    pub fn score_with(&mut self, start: Location, target: Target, mode: ScoreMode) -> Drain {
        if mode == ScoreMode::Reset {
            self.reset_scores();
        }

        let Some(start_cell) = self.grid.get_mut(start) else {
            debug!("start is not on the maze");
            return Drain::Drained;
        };
        start_cell.best_score = Distance::Finite(0);

        let mut queue = WorkQueue::new();
        queue.add(start);

        let grid = &mut self.grid;
        let outcome = queue.process(|queue, location| {
            if target.is(location) {
                trace!(%location, "target settled");
                queue.abandon();
                return;
            }

            let next = grid.get(location).map_or(Distance::Unreachable, MazeCell::best_score).plus(1);
            let improved = grid.orthogonal_neighbors(location)
                .filter(|(_, cell)| !cell.obstacle && cell.best_score > next)
                .map(|(neighbor, _)| neighbor)
                .collect::<Vec<_>>();

            for neighbor in improved {
                if let Some(cell) = grid.get_mut(neighbor) {
                    cell.best_score = next;
                }
                queue.add(neighbor);
            }
        });

        debug!(?outcome, "maze scored");
        outcome
    }
}

impl From<Grid<MazeCell>> for Maze {
    fn from(grid: Grid<MazeCell>) -> Self {
        Self { grid }
    }
}

impl Display for Maze {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.grid)
    }
}
