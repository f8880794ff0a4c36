use std::collections::BTreeMap;

use tracing::{debug, instrument};

use crate::distance::{Distance, DistanceMap, Target};
use crate::location::Location;
use crate::maze::{Maze, MazeCell};

/// Which jumps [`find_shortcuts`] considers.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ShortcutRules {
    /// Longest jump, in Manhattan distance. Jumps are at least two cells long.
    pub max_length: usize,
    /// Smallest saving worth reporting.
    pub min_saved: u64,
}

impl Default for ShortcutRules {
    fn default() -> Self {
        Self { max_length: 2, min_saved: 1 }
    }
}

/// Every jump that shortens the trip from `start` to `end`, keyed by `(jump_from, jump_to)` and valued by the time it saves.
///
/// A jump leaves an open cell reachable from `start`, ignores obstacles for its Manhattan length, and lands on an open cell.
/// The trip then costs the distance to the take-off cell, plus the jump length, plus the distance from the landing cell to `end`.
/// Returns an empty map if `end` is unreachable without jumping.
#[instrument(level = "debug", skip(maze))]
pub fn find_shortcuts(maze: &Maze, start: Location, end: Location, rules: ShortcutRules) -> BTreeMap<(Location, Location), u64> {
    let mut shortcuts = BTreeMap::new();

    let is_obstacle = |cell: &MazeCell| cell.obstacle;
    let from_start = DistanceMap::compute(maze.grid(), start, Target::Everything, is_obstacle);
    // the maze is undirected, so distances from the end double as distances to it
    let to_end = DistanceMap::compute(maze.grid(), end, Target::Everything, is_obstacle);

    let Distance::Finite(baseline) = from_start.get(end) else {
        debug!("end is unreachable");
        return shortcuts;
    };

    for (jump_from, time_to_jump) in from_start.iter() {
        if jump_from == end {
            continue;
        }

        for length in 2..=rules.max_length {
            let length_cost = length as u64;
            if time_to_jump + length_cost >= baseline {
                break;
            }

            for (jump_to, _) in maze.grid().cells_at_distance(jump_from, length, |cell| !cell.obstacle) {
                let Distance::Finite(time_to_end) = to_end.get(jump_to) else {
                    continue;
                };

                let total = time_to_jump + length_cost + time_to_end;
                let saved = baseline.saturating_sub(total);
                if total < baseline && saved >= rules.min_saved {
                    let entry = shortcuts.entry((jump_from, jump_to)).or_insert(saved);
                    *entry = (*entry).max(saved);
                }
            }
        }
    }

    debug!(baseline, found = shortcuts.len(), "shortcuts found");
    shortcuts
}
