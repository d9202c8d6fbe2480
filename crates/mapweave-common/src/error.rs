//! Error types for Mapweave.

use thiserror::Error;

/// Reasons an interaction rule can be rejected at construction time.
///
/// This is the only error the generation core produces; generation itself
/// absorbs every degenerate input into empty grids or blank cells.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInteraction {
    /// Fewer than two terrains were named
    #[error("an interaction needs at least 2 terrains, got {0}")]
    TooFewTerrains(usize),

    /// A distance bound is negative
    #[error("range values must be non-negative, got [{min}, {max}]")]
    NegativeRange {
        /// Lower distance bound
        min: f64,
        /// Upper distance bound
        max: f64,
    },

    /// Distance bounds are inverted
    #[error("range minimum {min} can not be bigger than range maximum {max}")]
    InvertedRange {
        /// Lower distance bound
        min: f64,
        /// Upper distance bound
        max: f64,
    },

    /// A restriction was requested from the modification constructor
    #[error("restrictions must be created with create_restriction, not create_modification")]
    RestrictionAsModification,

    /// A multiplier bound is negative
    #[error("multiplier values must be non-negative, got [{min}, {max}]")]
    NegativeMultiplier {
        /// Lower multiplier bound
        min: f64,
        /// Upper multiplier bound
        max: f64,
    },

    /// Multiplier bounds are inverted
    #[error("multiplier minimum {min} can not be bigger than multiplier maximum {max}")]
    InvertedMultiplier {
        /// Lower multiplier bound
        min: f64,
        /// Upper multiplier bound
        max: f64,
    },

    /// A bound is NaN
    #[error("{0} bounds must be numbers")]
    NotANumber(&'static str),
}

/// Malformed `#RRGGBB` color strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// No leading `#`
    #[error("color {0:?} must start with '#'")]
    MissingHash(String),

    /// Wrong number of hex digits
    #[error("color {0:?} must have exactly 6 hex digits")]
    BadLength(String),

    /// Non-hex digit
    #[error("color {0:?} contains a non-hex digit")]
    BadDigit(String),
}

/// Result type alias for rule construction.
pub type InteractionResult<T> = Result<T, InvalidInteraction>;
