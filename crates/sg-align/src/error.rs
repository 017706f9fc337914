use sg_core::Offset;
use thiserror::Error;

use crate::correspondence::Eye;

/// Failures while registering a stereo pair.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AlignError {
    /// The offset removes every column or every row of the images.
    #[error("offset {offset} leaves nothing of a {width}x{height} image")]
    OutOfRange {
        offset: Offset,
        width: usize,
        height: usize,
    },

    /// The two images differ in size, so no common crop exists.
    #[error(
        "left image is {}x{} but right image is {}x{}",
        .left.0, .left.1, .right.0, .right.1
    )]
    DimensionMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },

    /// Both clicks were tagged with the same eye.
    #[error("both clicks landed on the {eye} image; click once in each image")]
    AmbiguousCorrespondence { eye: Eye },

    #[error("expected exactly two clicks, got {count}")]
    WrongClickCount { count: usize },

    #[error("click on the {eye} image at ({x}, {y}) is not a usable pixel coordinate")]
    InvalidCoordinate { eye: Eye, x: f64, y: f64 },

    #[error("crop geometry: {0}")]
    Geometry(#[from] sg_core::Error),
}

pub type AlignResult<T> = Result<T, AlignError>;
