// src/dataset/transforms.rs
use image::{imageops::FilterType, RgbImage};

use super::Transform;

/// Side length the classifier was trained at.
pub const INPUT_SIZE: u32 = 224;

/// Resize to exactly `width` x `height`, ignoring aspect ratio.
pub fn resize(width: u32, height: u32) -> Transform {
    Box::new(move |img| image::imageops::resize(&img, width, height, FilterType::Triangle))
}

/// Channel-major `[3, h, w]` floats in `[0, 1]`.
pub fn to_chw_tensor(img: &RgbImage) -> Vec<f32> {
    let (w, h) = img.dimensions();
    let plane = (w * h) as usize;
    let mut out = vec![0.0f32; 3 * plane];
    for (i, px) in img.pixels().enumerate() {
        for c in 0..3 {
            out[c * plane + i] = f32::from(px[c]) / 255.0;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn resize_hits_target_size() {
        let t = resize(INPUT_SIZE, INPUT_SIZE);
        let out = t(RgbImage::new(40, 17));
        assert_eq!(out.dimensions(), (INPUT_SIZE, INPUT_SIZE));
    }

    #[test]
    fn tensor_is_channel_major() {
        let mut img = RgbImage::new(2, 1);
        img.put_pixel(0, 0, Rgb([255, 0, 0]));
        img.put_pixel(1, 0, Rgb([0, 0, 255]));
        let t = to_chw_tensor(&img);
        assert_eq!(t, vec![1.0, 0.0, 0.0, 0.0, 0.0, 1.0]);
    }
}
