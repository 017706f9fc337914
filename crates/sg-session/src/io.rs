//! Load and save collaborators backed by the `image` crate.
//!
//! - `load_frame`: decode any supported raster into a gray or RGB `Frame`.
//!   Alpha is discarded and 16-bit inputs are reduced to 8 bits.
//! - `save_frame`: encode a `Frame` in the format implied by the path's
//!   extension.

use std::path::Path;

use image::error::{ParameterError, ParameterErrorKind};
use image::{DynamicImage, GrayImage, ImageError, RgbImage};
use sg_align::Eye;
use sg_core::{Frame, Image};

use crate::error::{StereoError, StereoResult};

pub fn load_frame(path: &Path, eye: Eye) -> StereoResult<Frame> {
    let dyn_img = image::open(path).map_err(|source| StereoError::ImageLoad {
        eye,
        path: path.to_path_buf(),
        source,
    })?;
    Ok(frame_from_dynamic(dyn_img)?)
}

pub fn save_frame(frame: &Frame, path: &Path) -> StereoResult<()> {
    let save_err = |source| StereoError::ImageSave {
        path: path.to_path_buf(),
        source,
    };
    frame_to_dynamic(frame)
        .map_err(save_err)?
        .save(path)
        .map_err(save_err)
}

pub(crate) fn frame_from_dynamic(img: DynamicImage) -> Result<Frame, sg_core::Error> {
    if img.color().has_color() {
        let rgb = img.into_rgb8();
        let (w, h) = rgb.dimensions();
        let data = rgb
            .into_raw()
            .chunks_exact(3)
            .map(|px| [px[0], px[1], px[2]])
            .collect();
        Ok(Frame::Rgb(Image::from_vec(w as usize, h as usize, data)?))
    } else {
        let luma = img.into_luma8();
        let (w, h) = luma.dimensions();
        Ok(Frame::Luma(Image::from_vec(
            w as usize,
            h as usize,
            luma.into_raw(),
        )?))
    }
}

pub(crate) fn frame_to_dynamic(frame: &Frame) -> Result<DynamicImage, ImageError> {
    let (w, h) = (frame.width() as u32, frame.height() as u32);
    let converted = match frame {
        Frame::Luma(img) => GrayImage::from_raw(w, h, img.data().to_vec()).map(DynamicImage::from),
        Frame::Rgb(img) => {
            RgbImage::from_raw(w, h, img.data().as_flattened().to_vec()).map(DynamicImage::from)
        }
    };
    converted.ok_or_else(|| {
        ImageError::Parameter(ParameterError::from_kind(
            ParameterErrorKind::DimensionMismatch,
        ))
    })
}

#[cfg(test)]
mod tests {
    use image::{DynamicImage, GrayAlphaImage, LumaA, Rgb, RgbImage, Rgba, RgbaImage};
    use sg_align::Eye;
    use sg_core::{Frame, Image};

    use super::{frame_from_dynamic, frame_to_dynamic, load_frame};
    use crate::error::StereoError;

    #[test]
    fn color_input_becomes_rgb_frame() {
        let mut rgb = RgbImage::new(3, 2);
        rgb.put_pixel(2, 1, Rgb([10, 20, 30]));
        let frame = frame_from_dynamic(DynamicImage::ImageRgb8(rgb)).expect("valid image");

        let Frame::Rgb(img) = frame else {
            panic!("expected a color frame");
        };
        assert_eq!(img.dims(), (3, 2));
        assert_eq!(img.get(2, 1), Some(&[10, 20, 30]));
    }

    #[test]
    fn alpha_is_dropped() {
        let rgba = RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 0]));
        let frame = frame_from_dynamic(DynamicImage::ImageRgba8(rgba)).expect("valid image");
        assert_eq!(frame.channels(), 3);

        let gray = GrayAlphaImage::from_pixel(2, 2, LumaA([77, 5]));
        let frame = frame_from_dynamic(DynamicImage::ImageLumaA8(gray)).expect("valid image");
        assert_eq!(frame, Frame::Luma(Image::new_fill(2, 2, 77)));
    }

    #[test]
    fn frames_convert_back_with_same_pixels() {
        let frame = Frame::from(
            Image::from_vec(2, 1, vec![[1u8, 2, 3], [4, 5, 6]]).expect("valid image"),
        );
        let dyn_img = frame_to_dynamic(&frame).expect("consistent buffer");
        assert_eq!(dyn_img.as_bytes(), &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let path = std::env::temp_dir().join("sg_session_missing_input.png");
        let err = load_frame(&path, Eye::Right).expect_err("file does not exist");
        assert!(matches!(
            err,
            StereoError::ImageLoad {
                eye: Eye::Right,
                ..
            }
        ));
    }
}
