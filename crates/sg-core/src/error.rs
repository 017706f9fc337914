use core::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    SizeMismatch { expected: usize, actual: usize },
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        bounds: (usize, usize),
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeMismatch { expected, actual } => {
                write!(f, "size mismatch: expected {expected}, got {actual}")
            }
            Self::OutOfBounds {
                x,
                y,
                width,
                height,
                bounds,
            } => write!(
                f,
                "region {width}x{height} at ({x}, {y}) exceeds image bounds {}x{}",
                bounds.0, bounds.1
            ),
        }
    }
}

impl std::error::Error for Error {}
