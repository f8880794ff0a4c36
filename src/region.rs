use std::collections::HashMap;

use indexmap::IndexSet;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::direction::Direction;
use crate::grid::Grid;
use crate::location::Location;
use crate::work::{WorkList, WorkStack};

/// A maximal set of orthogonally connected cells sharing one grouping value.
///
/// A region holds only locations, never the grid, and does not change once extracted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Region<K> {
    group: K,
    cells: IndexSet<Location>,
}

impl<K: PartialEq> Region<K> {
    /// Flood fill from `start` across orthogonal neighbors whose `group_of` value equals the start's.
    ///
    /// Returns [`None`] if `start` holds no cell.
    pub fn flood_from<T>(grid: &Grid<T>, start: Location, group_of: impl Fn(&T) -> K) -> Option<Self> {
        let group = group_of(grid.get(start)?);
        let mut cells = IndexSet::new();

        let mut stack = WorkStack::new();
        stack.add(start);
        stack.process(|stack, location| {
            if !cells.insert(location) {
                return;
            }

            for (neighbor, cell) in grid.orthogonal_neighbors(location) {
                if !cells.contains(&neighbor) && group_of(cell) == group {
                    stack.add(neighbor);
                }
            }
        });

        Some(Self { group, cells })
    }
}

impl<K> Region<K> {
    /// The grouping value shared by every cell.
    pub fn group(&self) -> &K {
        &self.group
    }

    /// Member locations, in discovery order.
    pub fn locations(&self) -> impl Iterator<Item = Location> + '_ {
        self.cells.iter().copied()
    }

    /// Whether `location` belongs to this region.
    pub fn contains(&self, location: Location) -> bool {
        self.cells.contains(&location)
    }

    /// Number of cells.
    pub fn area(&self) -> usize {
        self.cells.len()
    }

    /// Number of unit edges separating this region from everything else.
    ///
    /// Each cell adds four edges and removes two for every orthogonal neighbor in the region that was already counted.
    pub fn perimeter(&self) -> usize {
        let mut counted = IndexSet::with_capacity(self.cells.len());
        let total = self.cells.iter().fold(0isize, |sum, location| {
            counted.insert(*location);
            let shared = Direction::ORTHOGONAL.iter()
                .filter(|dir| counted.contains(&dir.attempt_from(*location, 1)))
                .count() as isize;
            sum + 4 - 2 * shared
        });

        total as usize
    }

    /// Number of straight sides of the region's boundary, holes included.
    ///
    /// Counted as corners: a lattice point is a corner when one or three of the cells around it are members,
    /// and a double corner when exactly two diagonally opposite cells are.
    pub fn sides(&self) -> usize {
        // each lattice point (r, c) is the top-left corner of cell (r, c)
        let touching = self.cells.iter()
            .flat_map(|cell| {
                [(0, 0), (1, 0), (0, 1), (1, 1)].map(|step| (cell.offset_by(step), *cell))
            })
            .into_group_map();

        touching.values()
            .map(|cells| match cells.as_slice() {
                [a, b] if a.manhattan(*b) != 1 => 2,
                cells if cells.len() % 2 == 1 => 1,
                _ => 0,
            })
            .sum()
    }
}

/// A partition of every present cell of a grid into [`Region`]s.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Regions<K> {
    regions: Vec<Region<K>>,
    owner: HashMap<Location, usize>,
}

impl<K: PartialEq> Regions<K> {
    /// Partition `grid` by `group_of`.
    ///
    /// Regions are discovered in row-major order of their first cell, so the result is reproducible.
    #[instrument(level = "debug", skip_all)]
    pub fn partition<T>(grid: &Grid<T>, group_of: impl Fn(&T) -> K) -> Self {
        let mut regions: Vec<Region<K>> = Vec::new();
        let mut owner = HashMap::new();

        for (location, _) in grid.iter() {
            if owner.contains_key(&location) {
                continue;
            }

            let Some(region) = Region::flood_from(grid, location, &group_of) else {
                continue;
            };
            owner.extend(region.locations().map(|member| (member, regions.len())));
            regions.push(region);
        }

        debug!(regions = regions.len(), cells = owner.len(), "grid partitioned");
        Self { regions, owner }
    }
}

impl<K> Regions<K> {
    /// The region `location` belongs to, if it holds a cell.
    pub fn region_of(&self, location: Location) -> Option<&Region<K>> {
        self.owner.get(&location).map(|index| &self.regions[*index])
    }

    /// Every region, in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &Region<K>> + '_ {
        self.regions.iter()
    }

    /// Number of regions.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Whether the grid had no cells at all.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

impl<K> IntoIterator for Regions<K> {
    type Item = Region<K>;
    type IntoIter = std::vec::IntoIter<Region<K>>;

    fn into_iter(self) -> Self::IntoIter {
        self.regions.into_iter()
    }
}
