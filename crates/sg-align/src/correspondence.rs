use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use sg_core::{Frame, Offset, Point2f, Point2i};
use thiserror::Error;

use crate::error::{AlignError, AlignResult};
use crate::offset::compute_offset;

/// Which of the two photographs a click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Eye {
    Left,
    Right,
}

impl Eye {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for Eye {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Eye {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" | "l" => Ok(Self::Left),
            "right" | "r" => Ok(Self::Right),
            other => Err(format!("unknown image '{other}', expected 'left' or 'right'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Click {
    pub eye: Eye,
    pub position: Point2f,
}

impl Click {
    pub fn new(eye: Eye, x: f64, y: f64) -> Self {
        Self {
            eye,
            position: Point2f::new(x, y),
        }
    }
}

/// Failures raised by a picker before any clicks reach the reduction step.
#[derive(Error, Debug)]
pub enum PickError {
    #[error("point selection was cancelled")]
    Cancelled,

    #[error("point picker I/O failed")]
    Io(#[from] std::io::Error),
}

/// Source of the two correspondence clicks.
///
/// Implementations show both frames to someone (or something) and block
/// until two clicks are available. No timeout is applied here; wrap the
/// picker if one is needed.
pub trait PointPicker {
    fn pick(&mut self, left: &Frame, right: &Frame) -> Result<Vec<Click>, PickError>;
}

impl<P: PointPicker + ?Sized> PointPicker for &mut P {
    fn pick(&mut self, left: &Frame, right: &Frame) -> Result<Vec<Click>, PickError> {
        (**self).pick(left, right)
    }
}

/// Replays a fixed list of clicks, ignoring the frames.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPicker {
    clicks: Vec<Click>,
}

impl ScriptedPicker {
    pub fn new(clicks: Vec<Click>) -> Self {
        Self { clicks }
    }

    pub fn from_points(left: Point2f, right: Point2f) -> Self {
        Self::new(vec![
            Click {
                eye: Eye::Left,
                position: left,
            },
            Click {
                eye: Eye::Right,
                position: right,
            },
        ])
    }
}

impl PointPicker for ScriptedPicker {
    fn pick(&mut self, _left: &Frame, _right: &Frame) -> Result<Vec<Click>, PickError> {
        Ok(self.clicks.clone())
    }
}

/// One feature located in both photographs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Correspondence {
    pub left: Point2i,
    pub right: Point2i,
}

impl Correspondence {
    pub fn offset(&self) -> Offset {
        compute_offset(self.left, self.right)
    }
}

/// Reduces exactly two clicks, one per eye, to integer pixel positions.
///
/// Positions must round to non-negative pixels, which also keeps the
/// offset subtraction in range.
pub fn resolve_correspondence(clicks: &[Click]) -> AlignResult<Correspondence> {
    let [first, second] = clicks else {
        return Err(AlignError::WrongClickCount {
            count: clicks.len(),
        });
    };

    if first.eye == second.eye {
        return Err(AlignError::AmbiguousCorrespondence { eye: first.eye });
    }

    let round = |click: &Click| {
        click
            .position
            .round()
            .filter(|p| p.x >= 0 && p.y >= 0)
            .ok_or(AlignError::InvalidCoordinate {
                eye: click.eye,
                x: click.position.x,
                y: click.position.y,
            })
    };
    let (left, right) = match first.eye {
        Eye::Left => (round(first)?, round(second)?),
        Eye::Right => (round(second)?, round(first)?),
    };

    Ok(Correspondence { left, right })
}
