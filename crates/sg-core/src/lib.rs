//! Pixel containers and geometry shared by the stereogram crates.
//!
//! ## Images and Views
//! `Image<T>` owns a tightly packed row-major buffer. `ImageView` borrows a
//! region of one and uses element stride (not byte stride), so a crop is a
//! `subview` until it is copied out with `Image::from_view`.
//!
//! ## Frames
//! A `Frame` is a photograph at its native depth: one 8-bit luma channel or
//! three interleaved 8-bit RGB channels.
//!
//! ## Coordinates
//! Integer coordinates address pixel columns (`x`) and rows (`y`) from the
//! top-left corner. Continuous coordinates round to the nearest pixel with
//! ties going to the even neighbor.

mod error;
mod frame;
mod geom;
mod image;
mod luma;

pub use error::Error;
pub use frame::Frame;
pub use geom::{Offset, Point2f, Point2i};
pub use image::{Image, ImageView, Rgb8};
pub use luma::{luma_to_rgb, luminance, rgb_to_luma};
