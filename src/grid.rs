use std::fmt::{Display, Formatter};

use itertools::Itertools;
use ndarray::Array2;

use crate::direction::Direction;
use crate::error::GridError;
use crate::location::{Coord, Dimension, Location};

/// A dense, rectangular grid of optional cells addressed by [`Location`].
///
/// The grid spans `[min.row, min.row + height) x [min.col, min.col + width)`; the minimum corner may be negative.
/// Every location in that span maps to exactly one storage slot. Reads outside the span yield [`None`] rather than failing,
/// so callers can treat "off the edge" and "empty slot" the same way.
///
/// Cells are owned by the grid. A cell type may carry its own [`Location`] as plain data but should never point back
/// into the grid; components needing grid-wide queries borrow the grid for the duration of one call instead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid<T> {
    cells: Array2<Option<T>>,
    origin: Location,
}

impl<T> Grid<T> {
    /// A grid with its top-left corner at `(0, 0)`, `dims` specified in `(width, height)` order, and every slot empty.
    pub fn with_dims(dims: (Dimension, Dimension)) -> Self {
        Self {
            cells: Array2::from_shape_simple_fn((dims.1.get(), dims.0.get()), || None),
            origin: Location::default(),
        }
    }

    /// A grid with its top-left corner at `(0, 0)` where every slot is filled by `factory`.
    pub fn from_fn(dims: (Dimension, Dimension), mut factory: impl FnMut(Location) -> T) -> Self {
        let origin = Location::default();
        Self {
            cells: Array2::from_shape_fn((dims.1.get(), dims.0.get()), |index| {
                Some(factory(Location::from_index(index, origin)))
            }),
            origin,
        }
    }

    /// A grid spanning `min` to `max` inclusive, with every slot empty.
    ///
    /// Fails with [`GridError::InvertedBounds`] if `min` lies below or right of `max`,
    /// and with [`GridError::TooLarge`] if the span cannot be stored.
    pub fn with_bounds(min: Location, max: Location) -> Result<Self, GridError> {
        let shape = Self::bounded_shape(min, max)?;

        Ok(Self {
            cells: Array2::from_shape_simple_fn(shape, || None),
            origin: min,
        })
    }

    /// A grid spanning `min` to `max` inclusive where every slot is filled by `factory`.
    ///
    /// Fails the same way as [`Self::with_bounds`].
    pub fn from_fn_with_bounds(min: Location, max: Location, mut factory: impl FnMut(Location) -> T) -> Result<Self, GridError> {
        let shape = Self::bounded_shape(min, max)?;

        Ok(Self {
            cells: Array2::from_shape_fn(shape, |index| Some(factory(Location::from_index(index, min)))),
            origin: min,
        })
    }

    /// `(height, width)` of the span from `min` to `max` inclusive.
    fn bounded_shape(min: Location, max: Location) -> Result<(usize, usize), GridError> {
        if min.0 > max.0 || min.1 > max.1 {
            return Err(GridError::InvertedBounds { min, max });
        }

        let height = max.0.abs_diff(min.0).checked_add(1);
        let width = max.1.abs_diff(min.1).checked_add(1);
        let slot_size = std::mem::size_of::<Option<T>>().max(1);

        match (height, width) {
            (Some(height), Some(width))
                if height.checked_mul(width)
                    .and_then(|slots| slots.checked_mul(slot_size))
                    .is_some_and(|bytes| bytes <= isize::MAX as usize) => Ok((height, width)),
            _ => Err(GridError::TooLarge { min, max }),
        }
    }

    /// Build a grid from a block of text.
    ///
    /// Blank lines are skipped; every remaining character is passed to `factory` along with its location.
    /// Rows shorter than the longest row leave their trailing slots empty.
    pub fn from_text(text: &str, mut factory: impl FnMut(char, Location) -> T) -> Result<Self, GridError> {
        let lines = text.lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.is_empty())
            .map(|line| line.chars().collect_vec())
            .collect_vec();

        let height = lines.len();
        let width = lines.iter().map(Vec::len).max().unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(GridError::EmptyInput);
        }

        let origin = Location::default();
        let cells = Array2::from_shape_fn((height, width), |(row, col)| {
            lines[row].get(col).map(|symbol| factory(*symbol, Location::from_index((row, col), origin)))
        });

        Ok(Self { cells, origin })
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    /// The top-left corner, inclusive.
    pub fn min(&self) -> Location {
        self.origin
    }

    /// The bottom-right corner, inclusive.
    pub fn max(&self) -> Location {
        self.origin.offset_by((self.height() as Coord - 1, self.width() as Coord - 1))
    }

    /// Whether `location` lies within the span of this grid, regardless of whether its slot is filled.
    pub fn contains(&self, location: Location) -> bool {
        self.slot_index(location).is_some()
    }

    #[inline]
    fn slot_index(&self, location: Location) -> Option<(usize, usize)> {
        location.as_index(self.origin)
            .filter(|(row, col)| *row < self.height() && *col < self.width())
    }

    fn out_of_bounds(&self, location: Location) -> GridError {
        GridError::OutOfBounds { location, min: self.min(), max: self.max() }
    }

    /// The cell at `location`, or [`None`] if the slot is empty or outside the grid.
    pub fn get(&self, location: Location) -> Option<&T> {
        self.slot_index(location)
            .and_then(|index| self.cells.get(index))
            .and_then(Option::as_ref)
    }

    /// Mutable access to the cell at `location`, with the same absence rules as [`Self::get`].
    pub fn get_mut(&mut self, location: Location) -> Option<&mut T> {
        let index = self.slot_index(location)?;
        self.cells.get_mut(index).and_then(Option::as_mut)
    }

    /// Replace the cell at `location`, returning the previous occupant.
    ///
    /// Fails with [`GridError::OutOfBounds`] outside the grid; the grid never grows or moves its origin.
    pub fn set(&mut self, location: Location, value: T) -> Result<Option<T>, GridError> {
        let index = self.slot_index(location).ok_or_else(|| self.out_of_bounds(location))?;
        Ok(self.cells[index].replace(value))
    }

    /// Empty the slot at `location`, returning its occupant.
    pub fn take(&mut self, location: Location) -> Option<T> {
        let index = self.slot_index(location)?;
        self.cells[index].take()
    }

    /// The location `distance` steps from `location` in `direction`. The result need not lie within the grid.
    pub fn location_in_direction(&self, location: Location, direction: Direction, distance: Coord) -> Location {
        direction.attempt_from(location, distance)
    }

    /// The cell one step from `location` in `direction`.
    pub fn neighbor_in_direction(&self, location: Location, direction: Direction) -> Option<&T> {
        self.get(direction.attempt_from(location, 1))
    }

    /// Present cells among the four orthogonal neighbors, in [`Direction::ORTHOGONAL`] order.
    pub fn orthogonal_neighbors(&self, location: Location) -> impl Iterator<Item = (Location, &T)> + '_ {
        self.neighbors_along(location, &Direction::ORTHOGONAL)
    }

    /// Present cells among all eight neighbors, in [`Direction::ALL`] order.
    pub fn all_neighbors(&self, location: Location) -> impl Iterator<Item = (Location, &T)> + '_ {
        self.neighbors_along(location, &Direction::ALL)
    }

    fn neighbors_along<'a>(&'a self, location: Location, directions: &'static [Direction]) -> impl Iterator<Item = (Location, &'a T)> + 'a {
        directions.iter()
            .map(move |dir| dir.attempt_from(location, 1))
            .filter_map(move |neighbor| self.get(neighbor).map(|cell| (neighbor, cell)))
    }

    /// Swap the cell at `location` with its neighbor in `direction`, if both are present.
    ///
    /// Returns whether a swap happened. Fails if `location` itself is outside the grid.
    pub fn swap_with_neighbor(&mut self, location: Location, direction: Direction) -> Result<bool, GridError> {
        let here = self.slot_index(location).ok_or_else(|| self.out_of_bounds(location))?;
        let Some(there) = self.slot_index(direction.attempt_from(location, 1)) else {
            return Ok(false);
        };

        if self.cells[here].is_none() || self.cells[there].is_none() {
            return Ok(false);
        }

        self.cells.swap(here, there);
        Ok(true)
    }

    /// Every slot in row-major order, empty ones included.
    pub fn slots(&self) -> impl Iterator<Item = (Location, Option<&T>)> + '_ {
        self.cells.indexed_iter()
            .map(move |(index, slot)| (Location::from_index(index, self.origin), slot.as_ref()))
    }

    /// Present cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Location, &T)> + '_ {
        self.slots().filter_map(|(location, slot)| slot.map(|cell| (location, cell)))
    }

    /// Present cells in row-major order, mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Location, &mut T)> + '_ {
        let origin = self.origin;
        self.cells.indexed_iter_mut()
            .filter_map(move |(index, slot)| slot.as_mut().map(|cell| (Location::from_index(index, origin), cell)))
    }

    /// Visit every slot in row-major order.
    pub fn for_each(&self, mut visit: impl FnMut(Location, Option<&T>)) {
        self.slots().for_each(|(location, slot)| visit(location, slot));
    }

    /// A grid of the same shape and origin with every present cell transformed by `f`; empty slots stay empty.
    pub fn map<U>(&self, mut f: impl FnMut(Location, &T) -> U) -> Grid<U> {
        let origin = self.origin;
        Grid {
            cells: Array2::from_shape_fn(self.cells.raw_dim(), |index| {
                self.cells[index].as_ref().map(|cell| f(Location::from_index(index, origin), cell))
            }),
            origin,
        }
    }

    /// Present cells matching `predicate`, in row-major order.
    pub fn filter(&self, mut predicate: impl FnMut(Location, &T) -> bool) -> Vec<&T> {
        self.iter()
            .filter(|(location, cell)| predicate(*location, cell))
            .map(|(_, cell)| cell)
            .collect_vec()
    }

    /// Locations of present cells matching `predicate`, in row-major order.
    pub fn filter_locations(&self, mut predicate: impl FnMut(Location, &T) -> bool) -> Vec<Location> {
        self.iter()
            .filter(|(location, cell)| predicate(*location, cell))
            .map(|(location, _)| location)
            .collect_vec()
    }

    /// The first present cell in row-major order matching `predicate`.
    pub fn find(&self, mut predicate: impl FnMut(Location, &T) -> bool) -> Option<(Location, &T)> {
        self.iter().find(|(location, cell)| predicate(*location, cell))
    }

    /// Location of the first present cell in row-major order matching `predicate`.
    pub fn find_location(&self, predicate: impl FnMut(Location, &T) -> bool) -> Option<Location> {
        self.find(predicate).map(|(location, _)| location)
    }

    /// Fold every slot, empty ones included, in row-major order.
    pub fn reduce<A>(&self, init: A, mut f: impl FnMut(A, Location, Option<&T>) -> A) -> A {
        self.slots().fold(init, |acc, (location, slot)| f(acc, location, slot))
    }

    /// The slots of a row, left to right. Empty if `row` is outside the grid.
    pub fn row(&self, row: Coord) -> Vec<Option<&T>> {
        match row.checked_sub(self.origin.0).and_then(|offset| usize::try_from(offset).ok()).filter(|index| *index < self.height()) {
            Some(index) => self.cells.row(index).into_iter().map(Option::as_ref).collect_vec(),
            None => Vec::new(),
        }
    }

    /// The slots of a column, top to bottom. Empty if `col` is outside the grid.
    pub fn column(&self, col: Coord) -> Vec<Option<&T>> {
        match col.checked_sub(self.origin.1).and_then(|offset| usize::try_from(offset).ok()).filter(|index| *index < self.width()) {
            Some(index) => self.cells.column(index).into_iter().map(Option::as_ref).collect_vec(),
            None => Vec::new(),
        }
    }

    /// Present cells at exactly Manhattan distance `distance` from `location` that satisfy `predicate`.
    ///
    /// Results are in row-major order. A distance of zero yields `location` itself.
    pub fn cells_at_distance(&self, location: Location, distance: usize, mut predicate: impl FnMut(&T) -> bool) -> Vec<(Location, &T)> {
        let reach = distance as Coord;
        (-reach..=reach)
            .flat_map(|d_row| {
                let d_col = reach - d_row.abs();
                if d_col == 0 { vec![(d_row, 0)] } else { vec![(d_row, -d_col), (d_row, d_col)] }
            })
            .map(|step| location.offset_by(step))
            .filter_map(|candidate| self.get(candidate).map(|cell| (candidate, cell)))
            .filter(|(_, cell)| predicate(*cell))
            .collect_vec()
    }

    /// Lay the grid out as text, one line per row, drawing each slot with `draw`.
    pub fn render(&self, mut draw: impl FnMut(Location, Option<&T>) -> char) -> String {
        let mut out = String::with_capacity(self.height() * (self.width() + 1));

        for (row, slots) in self.cells.rows().into_iter().enumerate() {
            for (col, slot) in slots.iter().enumerate() {
                out.push(draw(Location::from_index((row, col), self.origin), slot.as_ref()));
            }
            out.push('\n');
        }

        out
    }
}

impl<T: Display> Display for Grid<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for slots in self.cells.rows() {
            for slot in slots {
                match slot {
                    Some(cell) => write!(f, "{cell}")?,
                    None => write!(f, " ")?,
                }
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
