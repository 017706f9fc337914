use core::fmt;
use core::ops::Sub;

use serde::{Deserialize, Serialize};

/// Continuous pixel coordinate, as reported by a pointing device.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2f {
    pub x: f64,
    pub y: f64,
}

impl Point2f {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Rounds to the nearest pixel, ties to even.
    ///
    /// Returns `None` when either coordinate is not finite or does not fit.
    pub fn round(self) -> Option<Point2i> {
        if !self.is_finite() {
            return None;
        }
        let x = self.x.round_ties_even();
        let y = self.y.round_ties_even();
        let limit = i64::MAX as f64;
        if x.abs() >= limit || y.abs() >= limit {
            return None;
        }
        Some(Point2i {
            x: x as i64,
            y: y as i64,
        })
    }
}

/// Integer pixel coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point2i {
    pub x: i64,
    pub y: i64,
}

impl Point2i {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point2i {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Signed integer displacement between two registered features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Offset {
    pub dx: i64,
    pub dy: i64,
}

impl Offset {
    pub const ZERO: Offset = Offset { dx: 0, dy: 0 };

    pub fn new(dx: i64, dy: i64) -> Self {
        Self { dx, dy }
    }

    pub fn is_zero(self) -> bool {
        self.dx == 0 && self.dy == 0
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.dx, self.dy)
    }
}

impl Sub for Point2i {
    type Output = Offset;

    fn sub(self, rhs: Point2i) -> Self::Output {
        Offset {
            dx: self.x - rhs.x,
            dy: self.y - rhs.y,
        }
    }
}
