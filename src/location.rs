use std::fmt::{Display, Formatter};
use std::num::NonZero;

use ndarray::Ix;

/// A single coordinate axis. Signed so that grids may have a negative origin.
pub type Coord = isize;
/// A width or height; grids are never empty.
pub type Dimension = NonZero<usize>;

/// A location `(row, col)` on a grid. Rows grow downward and columns grow rightward.
#[derive(Clone, Eq, Hash, Copy, PartialEq, Ord, PartialOrd, Debug, Default)]
pub struct Location(pub Coord, pub Coord);

impl Location {
    /// The row of this location.
    #[inline]
    pub fn row(&self) -> Coord {
        self.0
    }

    /// The column of this location.
    #[inline]
    pub fn col(&self) -> Coord {
        self.1
    }

    /// Shift this location by a `(d_row, d_col)` step.
    pub fn offset_by(self, rhs: (Coord, Coord)) -> Self {
        Self(self.0 + rhs.0, self.1 + rhs.1)
    }

    /// Manhattan (L1) distance between two locations.
    pub fn manhattan(&self, other: Location) -> usize {
        self.0.abs_diff(other.0) + self.1.abs_diff(other.1)
    }

    /// The storage index of this location in a grid whose top-left corner is `origin`,
    /// or [`None`] if the location lies above or left of the origin.
    pub(crate) fn as_index(&self, origin: Location) -> Option<(Ix, Ix)> {
        let row = usize::try_from(self.0.checked_sub(origin.0)?).ok()?;
        let col = usize::try_from(self.1.checked_sub(origin.1)?).ok()?;
        Some((row, col))
    }

    /// Inverse of [`Self::as_index`].
    pub(crate) fn from_index(index: (Ix, Ix), origin: Location) -> Self {
        Self(origin.0 + index.0 as Coord, origin.1 + index.1 as Coord)
    }
}

impl From<(Coord, Coord)> for Location {
    fn from(value: (Coord, Coord)) -> Self {
        Self(value.0, value.1)
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}
