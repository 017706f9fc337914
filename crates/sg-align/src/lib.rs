//! Two-point registration of a stereo pair.
//!
//! A person clicks the same feature once in each photograph. The clicks are
//! rounded to pixels, their difference is the offset `(dx, dy)`, and both
//! frames are cropped so the feature lands on the same pixel in each.
//!
//! Crop policy:
//! - `dx > 0` drops the last `dx` columns of the left frame and the first
//!   `dx` columns of the right frame; otherwise the first `|dx|` columns of
//!   the left and the last `|dx|` of the right.
//! - `dy` does the same on rows: positive trims the bottom of the left frame
//!   and the top of the right frame.
//! - Only integer translation is modeled. There is no rotation, scale or
//!   sub-pixel correction, so pixel values are copied untouched.

mod correspondence;
mod error;
mod offset;

pub use correspondence::{
    Click, Correspondence, Eye, PickError, PointPicker, ScriptedPicker, resolve_correspondence,
};
pub use error::{AlignError, AlignResult};
pub use offset::{apply_offset, compute_offset};
