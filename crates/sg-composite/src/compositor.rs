use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use sg_core::{Frame, Image, Rgb8};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompositeError {
    /// The pair handed to a compositor does not share the required extent.
    /// Registration guarantees equal sizes, so this indicates a bug upstream.
    #[error(
        "{compositor} needs matching {axis}: left is {}x{}, right is {}x{}",
        .left.0, .left.1, .right.0, .right.1
    )]
    DimensionMismatch {
        compositor: Compositor,
        axis: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },
}

/// The ways a registered pair can be merged into one picture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Compositor {
    /// Left frame directly left of the right frame, at full color depth.
    #[serde(rename = "sidebyside")]
    SideBySide,
    /// Left luminance in red, right luminance in green and blue.
    #[serde(rename = "bluered")]
    Anaglyph,
}

impl Compositor {
    /// Every compositor, in the order outputs are written.
    pub const ALL: [Compositor; 2] = [Compositor::SideBySide, Compositor::Anaglyph];

    /// Tag used to name output files.
    pub fn label(self) -> &'static str {
        match self {
            Self::SideBySide => "sidebyside",
            Self::Anaglyph => "bluered",
        }
    }

    pub fn compose(self, left: &Frame, right: &Frame) -> Result<Frame, CompositeError> {
        match self {
            Self::SideBySide => side_by_side(left, right),
            Self::Anaglyph => anaglyph(left, right).map(Frame::Rgb),
        }
    }
}

impl fmt::Display for Compositor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Compositor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sidebyside" | "side-by-side" => Ok(Self::SideBySide),
            "bluered" | "anaglyph" => Ok(Self::Anaglyph),
            other => Err(format!(
                "unknown compositor '{other}', expected 'sidebyside' or 'bluered'"
            )),
        }
    }
}

/// Concatenates the two frames horizontally.
///
/// Two gray frames give a gray result and two color frames a color result.
/// A mixed pair is promoted to color so no channel is lost.
pub fn side_by_side(left: &Frame, right: &Frame) -> Result<Frame, CompositeError> {
    if left.height() != right.height() {
        return Err(CompositeError::DimensionMismatch {
            compositor: Compositor::SideBySide,
            axis: "height",
            left: left.dims(),
            right: right.dims(),
        });
    }

    Ok(match (left, right) {
        (Frame::Luma(l), Frame::Luma(r)) => Frame::Luma(hstack(l, r)),
        _ => Frame::Rgb(hstack(&left.to_rgb(), &right.to_rgb())),
    })
}

fn hstack<T: Copy>(left: &Image<T>, right: &Image<T>) -> Image<T> {
    debug_assert_eq!(left.height(), right.height());
    let width = left.width() + right.width();
    let mut data = Vec::with_capacity(width * left.height());
    for y in 0..left.height() {
        data.extend_from_slice(left.row(y));
        data.extend_from_slice(right.row(y));
    }
    Image::from_vec(width, left.height(), data).expect("stacked rows fill the output exactly")
}

/// Red/cyan anaglyph of a registered pair.
///
/// Channel values are luminance bytes, so they can never leave `0..=255`.
pub fn anaglyph(left: &Frame, right: &Frame) -> Result<Image<Rgb8>, CompositeError> {
    if left.dims() != right.dims() {
        return Err(CompositeError::DimensionMismatch {
            compositor: Compositor::Anaglyph,
            axis: "size",
            left: left.dims(),
            right: right.dims(),
        });
    }

    let left = left.to_luma();
    let right = right.to_luma();
    let data = left
        .data()
        .iter()
        .zip(right.data())
        .map(|(&l, &r)| [l, r, r])
        .collect();

    Ok(Image::from_vec(left.width(), left.height(), data)
        .expect("luma buffers of equal size zip to the output size"))
}
