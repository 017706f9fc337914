use crate::image::{Image, Rgb8};

// BT.601 weights 0.299, 0.587, 0.114 scaled by 2^16. They sum to 65536, so
// the rounded result of any 8-bit input stays within 0..=255.
const WR: u32 = 19_595;
const WG: u32 = 38_470;
const WB: u32 = 7_471;

#[inline]
pub fn luminance(px: Rgb8) -> u8 {
    let [r, g, b] = px;
    let acc = WR * r as u32 + WG * g as u32 + WB * b as u32 + (1 << 15);
    (acc >> 16).min(255) as u8
}

pub fn rgb_to_luma(img: &Image<Rgb8>) -> Image<u8> {
    img.map(|&px| luminance(px))
}

pub fn luma_to_rgb(img: &Image<u8>) -> Image<Rgb8> {
    img.map(|&v| [v, v, v])
}
