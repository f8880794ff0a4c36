use std::fmt::{Display, Formatter};

use strum::VariantArray;

use crate::error::DirectionError;
use crate::location::{Coord, Location};

/// A single step on a square grid, either cardinal or diagonal.
///
/// Rows grow downward, so [`Up`](Direction::Up) is `(-1, 0)`.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Direction {
    /// The four cardinal directions.
    pub const CARDINALS: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Order in which orthogonal neighbors are reported by [`Grid`](crate::Grid).
    pub const ORTHOGONAL: [Self; 4] = [Self::Right, Self::Left, Self::Down, Self::Up];

    /// Order in which all eight neighbors are reported by [`Grid`](crate::Grid).
    /// The orthogonal neighbors come first, in the same order as [`Self::ORTHOGONAL`].
    pub const ALL: [Self; 8] = [
        Self::Right,
        Self::Left,
        Self::Down,
        Self::Up,
        Self::DownRight,
        Self::DownLeft,
        Self::UpRight,
        Self::UpLeft,
    ];

    /// The `(d_row, d_col)` step vector of this direction.
    pub const fn offset(&self) -> (Coord, Coord) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
            Self::UpLeft => (-1, -1),
            Self::UpRight => (-1, 1),
            Self::DownLeft => (1, -1),
            Self::DownRight => (1, 1),
        }
    }

    /// The direction whose step vector is exactly `offset`, if any.
    pub fn from_offset(offset: (Coord, Coord)) -> Option<Self> {
        Self::VARIANTS.iter().copied().find(|dir| dir.offset() == offset)
    }

    /// Take the step specified by `self` from `location`, `distance` times.
    pub fn attempt_from(&self, location: Location, distance: Coord) -> Location {
        let (d_row, d_col) = self.offset();
        location.offset_by((d_row * distance, d_col * distance))
    }

    /// Determine the direction from `a` to the adjacent location `b`.
    ///
    /// Returns [`None`] if `b` is not one of the eight neighbors of `a`.
    pub fn between(a: Location, b: Location) -> Option<Self> {
        Self::from_offset((b.0 - a.0, b.1 - a.1))
    }

    /// Whether this is one of [`Self::CARDINALS`].
    pub const fn is_cardinal(&self) -> bool {
        matches!(self, Self::Up | Self::Down | Self::Left | Self::Right)
    }

    /// Invert the direction specified by `self`.
    pub const fn invert(&self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::UpLeft => Self::DownRight,
            Self::UpRight => Self::DownLeft,
            Self::DownLeft => Self::UpRight,
            Self::DownRight => Self::UpLeft,
        }
    }

    /// A quarter turn clockwise: up, right, down, left, up.
    ///
    /// Diagonals turn a quarter as well, e.g. up-left becomes up-right.
    pub const fn rotate_right(&self) -> Self {
        match self {
            Self::Up => Self::Right,
            Self::Right => Self::Down,
            Self::Down => Self::Left,
            Self::Left => Self::Up,
            Self::UpLeft => Self::UpRight,
            Self::UpRight => Self::DownRight,
            Self::DownRight => Self::DownLeft,
            Self::DownLeft => Self::UpLeft,
        }
    }

    /// A quarter turn counter-clockwise; the inverse of [`Self::rotate_right`].
    pub const fn rotate_left(&self) -> Self {
        self.rotate_right().invert()
    }

    /// Parse an arrow symbol into a cardinal direction.
    pub fn from_char(symbol: char) -> Result<Self, DirectionError> {
        match symbol {
            '^' => Ok(Self::Up),
            'v' => Ok(Self::Down),
            '<' => Ok(Self::Left),
            '>' => Ok(Self::Right),
            other => Err(DirectionError::UnrecognizedSymbol(other)),
        }
    }

    /// The arrow symbol of a cardinal direction; diagonals have none.
    pub const fn as_char(&self) -> Option<char> {
        match self {
            Self::Up => Some('^'),
            Self::Down => Some('v'),
            Self::Left => Some('<'),
            Self::Right => Some('>'),
            _ => None,
        }
    }
}

impl TryFrom<char> for Direction {
    type Error = DirectionError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        Self::from_char(value)
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.as_char() {
            Some(symbol) => write!(f, "{symbol}"),
            None => write!(f, "{self:?}"),
        }
    }
}
