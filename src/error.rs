use thiserror::Error;

use crate::location::Location;

/// Errors raised while translating printable symbols into [`Direction`](crate::Direction)s.
#[derive(Copy, Clone, Debug, Error, PartialEq, Eq)]
pub enum DirectionError {
    /// The character is not one of `^`, `v`, `<` or `>`.
    #[error("unrecognized direction symbol {0:?}")]
    UnrecognizedSymbol(char),
}

/// Errors raised while building or writing to a [`Grid`](crate::Grid).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GridError {
    /// The text block had no non-empty lines, so no dimensions could be derived.
    #[error("input has no non-empty lines")]
    EmptyInput,
    /// A write targeted a location outside the grid.
    #[error("location {location} is outside the grid spanning {min} to {max}")]
    OutOfBounds {
        /// The offending location.
        location: Location,
        /// Top-left corner of the grid, inclusive.
        min: Location,
        /// Bottom-right corner of the grid, inclusive.
        max: Location,
    },
    /// The requested minimum corner lies below or right of the maximum corner.
    #[error("minimum corner {min} lies beyond maximum corner {max}")]
    InvertedBounds {
        /// Requested top-left corner.
        min: Location,
        /// Requested bottom-right corner.
        max: Location,
    },
    /// The requested span holds more slots than can be addressed.
    #[error("span from {min} to {max} is too large to store")]
    TooLarge {
        /// Requested top-left corner.
        min: Location,
        /// Requested bottom-right corner.
        max: Location,
    },
}
