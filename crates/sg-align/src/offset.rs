use log::debug;
use sg_core::{Frame, Offset, Point2i};

use crate::error::{AlignError, AlignResult};

pub fn compute_offset(left: Point2i, right: Point2i) -> Offset {
    right - left
}

/// Start indices of the kept span along one axis, for the left and right
/// image respectively, plus the kept length.
///
/// A positive shift means the feature sits further along the axis in the
/// right image, so the left image loses its tail and the right image its
/// head. Otherwise the left image loses its head and the right image its
/// tail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AxisCrop {
    left_start: usize,
    right_start: usize,
    len: usize,
}

fn axis_crop(shift: i64, len: usize) -> Option<AxisCrop> {
    let amount = usize::try_from(shift.unsigned_abs()).ok()?;
    if amount >= len {
        return None;
    }
    let kept = len - amount;
    Some(if shift > 0 {
        AxisCrop {
            left_start: 0,
            right_start: amount,
            len: kept,
        }
    } else {
        AxisCrop {
            left_start: amount,
            right_start: 0,
            len: kept,
        }
    })
}

/// Crops both frames so the feature the offset was measured on lands on the
/// same pixel in each.
///
/// Both results are `|dx|` columns narrower and `|dy|` rows shorter than
/// the inputs. Pixels are copied, never resampled.
pub fn apply_offset(left: &Frame, right: &Frame, offset: Offset) -> AlignResult<(Frame, Frame)> {
    if left.dims() != right.dims() {
        return Err(AlignError::DimensionMismatch {
            left: left.dims(),
            right: right.dims(),
        });
    }

    let (width, height) = left.dims();
    let out_of_range = || AlignError::OutOfRange {
        offset,
        width,
        height,
    };
    let cols = axis_crop(offset.dx, width).ok_or_else(out_of_range)?;
    let rows = axis_crop(offset.dy, height).ok_or_else(out_of_range)?;

    debug!(
        "registering {width}x{height} pair with offset {offset}: left from ({}, {}), right from ({}, {}), size {}x{}",
        cols.left_start, rows.left_start, cols.right_start, rows.right_start, cols.len, rows.len
    );

    let left = left.crop(cols.left_start, rows.left_start, cols.len, rows.len)?;
    let right = right.crop(cols.right_start, rows.right_start, cols.len, rows.len)?;
    Ok((left, right))
}
