use std::borrow::Cow;

use crate::Error;
use crate::image::{Image, Rgb8};
use crate::luma::{luma_to_rgb, rgb_to_luma};

/// A decoded photograph at its native channel depth.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    Luma(Image<u8>),
    Rgb(Image<Rgb8>),
}

impl Frame {
    pub fn width(&self) -> usize {
        match self {
            Self::Luma(img) => img.width(),
            Self::Rgb(img) => img.width(),
        }
    }

    pub fn height(&self) -> usize {
        match self {
            Self::Luma(img) => img.height(),
            Self::Rgb(img) => img.height(),
        }
    }

    pub fn dims(&self) -> (usize, usize) {
        (self.width(), self.height())
    }

    pub fn channels(&self) -> usize {
        match self {
            Self::Luma(_) => 1,
            Self::Rgb(_) => 3,
        }
    }

    pub fn crop(&self, x: usize, y: usize, width: usize, height: usize) -> Result<Self, Error> {
        Ok(match self {
            Self::Luma(img) => Self::Luma(img.crop(x, y, width, height)?),
            Self::Rgb(img) => Self::Rgb(img.crop(x, y, width, height)?),
        })
    }

    /// Single-channel luminance; borrows when the frame is already gray.
    pub fn to_luma(&self) -> Cow<'_, Image<u8>> {
        match self {
            Self::Luma(img) => Cow::Borrowed(img),
            Self::Rgb(img) => Cow::Owned(rgb_to_luma(img)),
        }
    }

    /// Three-channel view; gray values are replicated into R, G and B.
    pub fn to_rgb(&self) -> Cow<'_, Image<Rgb8>> {
        match self {
            Self::Luma(img) => Cow::Owned(luma_to_rgb(img)),
            Self::Rgb(img) => Cow::Borrowed(img),
        }
    }
}

impl From<Image<u8>> for Frame {
    fn from(img: Image<u8>) -> Self {
        Self::Luma(img)
    }
}

impl From<Image<Rgb8>> for Frame {
    fn from(img: Image<Rgb8>) -> Self {
        Self::Rgb(img)
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use super::Frame;
    use crate::image::Image;

    #[test]
    fn dims_and_channels() {
        let gray = Frame::from(Image::new_fill(5, 4, 0u8));
        let color = Frame::from(Image::new_fill(3, 2, [0u8; 3]));

        assert_eq!((gray.dims(), gray.channels()), ((5, 4), 1));
        assert_eq!((color.dims(), color.channels()), ((3, 2), 3));
    }

    #[test]
    fn crop_keeps_channel_depth() {
        let color = Frame::from(Image::new_fill(6, 6, [9u8, 8, 7]));
        let out = color.crop(1, 2, 4, 3).expect("in bounds");
        assert_eq!(out.dims(), (4, 3));
        assert_eq!(out.channels(), 3);
    }

    #[test]
    fn conversions_borrow_when_possible() {
        let gray = Frame::from(Image::new_fill(2, 2, 42u8));
        assert!(matches!(gray.to_luma(), Cow::Borrowed(_)));
        assert_eq!(gray.to_rgb().data()[0], [42, 42, 42]);

        let color = Frame::from(Image::new_fill(2, 2, [42u8, 42, 42]));
        assert!(matches!(color.to_rgb(), Cow::Borrowed(_)));
        assert_eq!(color.to_luma().data()[0], 42);
    }
}
