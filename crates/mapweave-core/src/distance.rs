//! Distance weighting helpers.

use mapweave_common::GridPos;
use serde::{Deserialize, Serialize};

/// Closed interval `[min, max]` of non-negative values.
///
/// Used both for rule distance ranges and for multiplier ranges. Validation
/// lives in the rule factory; a `Bounds` on its own accepts anything.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Lower bound (inclusive)
    pub min: f64,
    /// Upper bound (inclusive)
    pub max: f64,
}

impl Bounds {
    /// Creates new bounds.
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Checks if `value` lies in `[min, max]`.
    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Width of the interval.
    #[must_use]
    pub fn span(self) -> f64 {
        self.max - self.min
    }

    /// Position of `value` inside the interval, `0.0` at `min`, `1.0` at `max`.
    ///
    /// A zero-width interval maps everything to `0.0`.
    #[must_use]
    pub fn fraction(self, value: f64) -> f64 {
        let span = self.span();
        if span > 0.0 {
            (value - self.min) / span
        } else {
            0.0
        }
    }

    /// Value at fraction `t` walking from `min` to `max`.
    #[must_use]
    pub fn ascending(self, t: f64) -> f64 {
        lerp(self.min, self.max, t)
    }

    /// Value at fraction `t` walking from `max` to `min`.
    #[must_use]
    pub fn descending(self, t: f64) -> f64 {
        lerp(self.max, self.min, t)
    }
}

/// Euclidean distance between two cells.
#[must_use]
pub fn distance(a: GridPos, b: GridPos) -> f64 {
    a.distance_to(b)
}

/// Linear interpolation, exact at both ends (`t == 0` gives `from`, `t == 1`
/// gives `to`).
#[must_use]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    // 0 * inf is NaN, so endpoints skip the blend.
    if t <= 0.0 {
        from
    } else if t >= 1.0 {
        to
    } else {
        (1.0 - t) * from + t * to
    }
}
