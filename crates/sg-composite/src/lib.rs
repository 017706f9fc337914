//! Merging a registered stereo pair into a single picture.
//!
//! Both compositors expect frames that were registered first:
//! - `SideBySide` needs equal heights and concatenates rows without any
//!   blending, so the output width is the sum of both widths.
//! - `Anaglyph` needs equal sizes. Each frame is reduced to BT.601
//!   luminance, the left one fills the red channel and the right one fills
//!   green and blue.

mod compositor;

pub use compositor::{CompositeError, Compositor, anaglyph, side_by_side};
