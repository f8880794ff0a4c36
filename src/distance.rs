use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use tracing::{debug, instrument};

use crate::grid::Grid;
use crate::location::Location;
use crate::work::{WorkList, WorkQueue};

/// A path cost, or the sentinel for "no path exists".
///
/// Every finite distance orders below [`Distance::Unreachable`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Distance {
    /// A path of this cost exists.
    Finite(u64),
    /// No path exists.
    Unreachable,
}

impl Distance {
    /// Whether a path exists.
    pub fn is_reachable(&self) -> bool {
        matches!(self, Self::Finite(_))
    }

    /// The cost, if a path exists.
    pub fn finite(&self) -> Option<u64> {
        match self {
            Self::Finite(cost) => Some(*cost),
            Self::Unreachable => None,
        }
    }

    /// This distance extended by `cost`. Unreachable stays unreachable.
    pub fn plus(self, cost: u64) -> Self {
        match self {
            Self::Finite(base) => Self::Finite(base + cost),
            Self::Unreachable => Self::Unreachable,
        }
    }
}

impl Default for Distance {
    fn default() -> Self {
        Self::Unreachable
    }
}

impl From<u64> for Distance {
    fn from(value: u64) -> Self {
        Self::Finite(value)
    }
}

impl From<Option<u64>> for Distance {
    fn from(value: Option<u64>) -> Self {
        value.map_or(Self::Unreachable, Self::Finite)
    }
}

impl Display for Distance {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Finite(cost) => write!(f, "{cost}"),
            Self::Unreachable => write!(f, "unreachable"),
        }
    }
}

/// How far a scoring run needs to go.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Target {
    /// Stop as soon as this cell is settled; other cells may be left with partial scores.
    Cell(Location),
    /// Settle every reachable cell.
    Everything,
}

impl Target {
    #[inline]
    pub(crate) fn is(&self, location: Location) -> bool {
        matches!(self, Self::Cell(end) if *end == location)
    }
}

/// Unit-cost distances from one start cell, held apart from the grid they were computed on.
///
/// This is the scratch-arena counterpart of [`Maze`](crate::Maze)'s in-place scores: each run gets a fresh map,
/// so there is nothing to reset between runs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DistanceMap {
    start: Option<Location>,
    scores: HashMap<Location, u64>,
}

impl DistanceMap {
    /// Breadth-first distances from `start` over present, non-obstacle cells of `grid`.
    ///
    /// Every orthogonal step costs 1. If `start` is absent from the grid, nothing is reachable.
    #[instrument(level = "debug", skip(grid, is_obstacle))]
    pub fn compute<T>(grid: &Grid<T>, start: Location, target: Target, is_obstacle: impl Fn(&T) -> bool) -> Self {
        let mut scores = HashMap::new();
        if grid.get(start).is_none() {
            debug!("start is not on the grid");
            return Self { start: None, scores };
        }

        scores.insert(start, 0);
        let mut queue = WorkQueue::new();
        queue.add(start);

        let outcome = queue.process(|queue, location| {
            if target.is(location) {
                queue.abandon();
                return;
            }

            let next = scores[&location] + 1;
            for (neighbor, cell) in grid.orthogonal_neighbors(location) {
                if is_obstacle(cell) || scores.get(&neighbor).is_some_and(|best| *best <= next) {
                    continue;
                }

                scores.insert(neighbor, next);
                queue.add(neighbor);
            }
        });

        debug!(?outcome, reached = scores.len(), "distance map computed");
        Self { start: Some(start), scores }
    }

    /// Where the distances were measured from, if the start was on the grid.
    pub fn start(&self) -> Option<Location> {
        self.start
    }

    /// Distance to `location`.
    pub fn get(&self, location: Location) -> Distance {
        self.scores.get(&location).copied().into()
    }

    /// Every reached location with its distance, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (Location, u64)> + '_ {
        self.scores.iter().map(|(location, score)| (*location, *score))
    }

    /// Number of reached locations, the start included.
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Whether nothing was reached.
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}
