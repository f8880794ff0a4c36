use std::collections::HashMap;

use indexmap::IndexSet;
use itertools::Itertools;
use petgraph::graphmap::DiGraphMap;
use petgraph::visit::Dfs;
use petgraph::Direction::Outgoing;
use tracing::{debug, instrument};

use crate::direction::Direction;
use crate::distance::Distance;
use crate::grid::Grid;
use crate::location::Location;
use crate::work::{WorkList, WorkQueue};

/// A walker's state: where it stands and which way it faces.
///
/// Two headings on the same cell are distinct search states, since facing a different way changes what the next move costs.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Heading {
    /// Where the walker stands.
    pub location: Location,
    /// Which way the walker faces; always cardinal.
    pub facing: Direction,
}

impl Heading {
    /// A walker at `location` facing `facing`.
    pub fn new(location: Location, facing: Direction) -> Self {
        Self { location, facing }
    }

    /// One step forward, same facing.
    pub fn forward(&self) -> Self {
        Self::new(self.facing.attempt_from(self.location, 1), self.facing)
    }

    /// The two quarter turns in place.
    pub fn turns(&self) -> [Self; 2] {
        [
            Self::new(self.location, self.facing.rotate_left()),
            Self::new(self.location, self.facing.rotate_right()),
        ]
    }
}

/// How [`BestPaths::analyze`] remembers which cells lie on optimal paths.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum PathTracking {
    /// Every state carries the full set of cells on the optimal paths reaching it; tied paths merge their sets.
    /// Memory grows with the number of states times the length of their paths.
    PathSets,
    /// Every state remembers only its optimal predecessors; the cells are recovered by walking back from the goal.
    #[default]
    Predecessors,
}

/// Costs and bookkeeping for [`BestPaths::analyze`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct BestPathOptions {
    /// Cost of one step forward.
    pub step_cost: u64,
    /// Cost of one quarter turn in place.
    pub turn_cost: u64,
    /// How cells on optimal paths are collected.
    pub tracking: PathTracking,
}

impl Default for BestPathOptions {
    fn default() -> Self {
        Self { step_cost: 1, turn_cost: 1000, tracking: PathTracking::default() }
    }
}

/// The outcome of a turn-penalty search: the optimal cost and every cell on any path achieving it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BestPaths {
    /// Lowest cost to any goal cell.
    pub score: Distance,
    /// Cells on at least one optimal path, sorted row-major. Empty if no goal is reachable.
    pub cells: IndexSet<Location>,
}

#[derive(Clone)]
struct PathSet {
    score: u64,
    cells: IndexSet<Location>,
}

impl BestPaths {
    /// Search from `start` over the present, non-wall cells of `grid` for the cheapest way to reach any cell where `is_end` holds.
    ///
    /// Moving forward costs [`step_cost`](BestPathOptions::step_cost), turning left or right in place costs
    /// [`turn_cost`](BestPathOptions::turn_cost). Goal cells are not expanded further.
    #[instrument(level = "debug", skip(grid, is_wall, is_end))]
    pub fn analyze<T>(
        grid: &Grid<T>,
        start: Heading,
        options: BestPathOptions,
        is_wall: impl Fn(&T) -> bool,
        is_end: impl Fn(Location, &T) -> bool,
    ) -> Self {
        let Some(start_cell) = grid.get(start.location) else {
            debug!("start is not on the grid");
            return Self { score: Distance::Unreachable, cells: IndexSet::new() };
        };
        if is_end(start.location, start_cell) {
            return Self { score: Distance::Finite(0), cells: IndexSet::from([start.location]) };
        }

        let walkable = |heading: Heading| grid.get(heading.location).is_some_and(|cell| !is_wall(cell));
        let at_end = |heading: Heading| grid.get(heading.location).is_some_and(|cell| is_end(heading.location, cell));

        let mut result = match options.tracking {
            PathTracking::PathSets => Self::with_path_sets(start, options, walkable, at_end),
            PathTracking::Predecessors => Self::with_predecessors(start, options, walkable, at_end),
        };
        result.cells.sort();

        debug!(score = %result.score, cells = result.cells.len(), "best paths analyzed");
        result
    }

    fn with_path_sets(
        start: Heading,
        options: BestPathOptions,
        walkable: impl Fn(Heading) -> bool,
        at_end: impl Fn(Heading) -> bool,
    ) -> Self {
        // best score per state, with every cell on any path reaching it at that score
        let mut paths = HashMap::from([(start, PathSet { score: 0, cells: IndexSet::from([start.location]) })]);
        let mut ends: IndexSet<Heading> = IndexSet::new();

        let mut queue = WorkQueue::new();
        queue.add((start, 0u64));

        queue.process(|queue, (heading, score)| {
            let Some(current) = paths.get(&heading).filter(|current| current.score == score) else {
                return;
            };

            if at_end(heading) {
                ends.insert(heading);
                return;
            }

            let cells = current.cells.clone();
            let forward = heading.forward();
            let moves = [(forward, options.step_cost)].into_iter()
                .filter(|(next, _)| walkable(*next))
                .chain(heading.turns().map(|turn| (turn, options.turn_cost)));

            for (next, cost) in moves {
                let next_score = score + cost;
                match paths.get_mut(&next) {
                    Some(known) if known.score < next_score => {}
                    Some(known) if known.score == next_score => {
                        // ties merge; only growth needs to be passed on
                        let before = known.cells.len();
                        known.cells.extend(cells.iter().copied());
                        known.cells.insert(next.location);
                        if known.cells.len() > before {
                            queue.add((next, next_score));
                        }
                    }
                    _ => {
                        let mut next_cells = cells.clone();
                        next_cells.insert(next.location);
                        paths.insert(next, PathSet { score: next_score, cells: next_cells });
                        queue.add((next, next_score));
                    }
                }
            }
        });

        let best_score = ends.iter()
            .filter_map(|end| paths.get(end))
            .map(|path| path.score)
            .min();

        let cells = ends.iter()
            .filter_map(|end| paths.get(end))
            .filter(|path| Some(path.score) == best_score)
            .flat_map(|path| path.cells.iter().copied())
            .collect();

        Self { score: best_score.into(), cells }
    }

    fn with_predecessors(
        start: Heading,
        options: BestPathOptions,
        walkable: impl Fn(Heading) -> bool,
        at_end: impl Fn(Heading) -> bool,
    ) -> Self {
        let mut best_seen = HashMap::from([(start, 0u64)]);
        // edges point from a state to the states it was optimally reached from
        let mut predecessors: DiGraphMap<Heading, ()> = DiGraphMap::new();
        predecessors.add_node(start);
        let mut ends: Vec<Heading> = Vec::new();

        let mut queue = WorkQueue::new();
        queue.add((start, 0u64));

        queue.process(|queue, (heading, score)| {
            if best_seen.get(&heading).is_some_and(|best| *best < score) {
                return;
            }

            if at_end(heading) {
                ends.push(heading);
                return;
            }

            let forward = heading.forward();
            let moves = [(forward, options.step_cost)].into_iter()
                .filter(|(next, _)| walkable(*next))
                .chain(heading.turns().map(|turn| (turn, options.turn_cost)));

            for (next, cost) in moves {
                let next_score = score + cost;
                match best_seen.get(&next) {
                    Some(best) if *best < next_score => {}
                    Some(best) if *best == next_score => {
                        predecessors.add_edge(next, heading, ());
                    }
                    _ => {
                        best_seen.insert(next, next_score);
                        let outdated = predecessors.neighbors_directed(next, Outgoing).collect_vec();
                        for stale in outdated {
                            predecessors.remove_edge(next, stale);
                        }
                        predecessors.add_edge(next, heading, ());
                        queue.add((next, next_score));
                    }
                }
            }
        });

        let best_score = ends.iter()
            .filter_map(|end| best_seen.get(end).copied())
            .min();

        let mut cells = IndexSet::new();
        if let Some(best_score) = best_score {
            let mut dfs = Dfs::empty(&predecessors);
            for end in ends.iter().filter(|end| best_seen.get(end) == Some(&best_score)) {
                dfs.move_to(*end);
                while let Some(state) = dfs.next(&predecessors) {
                    cells.insert(state.location);
                }
            }
        }

        Self { score: best_score.into(), cells }
    }

    /// Number of distinct cells on optimal paths.
    pub fn tile_count(&self) -> usize {
        self.cells.len()
    }
}
