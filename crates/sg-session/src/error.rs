//! Error taxonomy for a stereogram run.

use std::path::PathBuf;

use sg_align::{AlignError, Eye, PickError};
use sg_composite::CompositeError;
use sg_core::Offset;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StereoError {
    /// The input could not be read or decoded.
    #[error("failed to load the {eye} image from {}", .path.display())]
    ImageLoad {
        eye: Eye,
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The composite could not be encoded or written.
    #[error("failed to save {}", .path.display())]
    ImageSave {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The measured offset is at least as large as the images.
    #[error("offset {offset} leaves nothing of a {width}x{height} image")]
    AlignmentOutOfRange {
        offset: Offset,
        width: usize,
        height: usize,
    },

    /// Two frames that must agree in size do not.
    #[error(
        "{context}: left is {}x{}, right is {}x{}",
        .left.0, .left.1, .right.0, .right.1
    )]
    DimensionMismatch {
        context: String,
        left: (usize, usize),
        right: (usize, usize),
    },

    /// Both clicks landed on the same photograph. Ask again.
    #[error("both clicks landed on the {eye} image; click once in each image")]
    AmbiguousCorrespondence { eye: Eye },

    #[error("expected exactly two clicks, got {count}")]
    WrongClickCount { count: usize },

    #[error("click on the {eye} image at ({x}, {y}) is not a usable pixel coordinate")]
    InvalidCoordinate { eye: Eye, x: f64, y: f64 },

    #[error("point picker failed")]
    Picker(#[from] PickError),

    /// The pair was already registered with `offset`.
    #[error("the pair is already aligned with offset {offset}")]
    AlreadyAligned { offset: Offset },

    #[error("crop geometry")]
    Geometry(#[from] sg_core::Error),
}

pub type StereoResult<T> = Result<T, StereoError>;

impl From<AlignError> for StereoError {
    fn from(err: AlignError) -> Self {
        match err {
            AlignError::OutOfRange {
                offset,
                width,
                height,
            } => Self::AlignmentOutOfRange {
                offset,
                width,
                height,
            },
            AlignError::DimensionMismatch { left, right } => Self::DimensionMismatch {
                context: "registration needs equal sizes".to_string(),
                left,
                right,
            },
            AlignError::AmbiguousCorrespondence { eye } => Self::AmbiguousCorrespondence { eye },
            AlignError::WrongClickCount { count } => Self::WrongClickCount { count },
            AlignError::InvalidCoordinate { eye, x, y } => Self::InvalidCoordinate { eye, x, y },
            AlignError::Geometry(err) => Self::Geometry(err),
        }
    }
}

impl From<CompositeError> for StereoError {
    fn from(err: CompositeError) -> Self {
        match err {
            CompositeError::DimensionMismatch {
                compositor,
                axis,
                left,
                right,
            } => Self::DimensionMismatch {
                context: format!("{compositor} needs matching {axis}"),
                left,
                right,
            },
        }
    }
}
