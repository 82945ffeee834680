use image::{DynamicImage, GenericImageView, imageops::FilterType};
use ndarray::Array4;

use crate::inference::InferenceError;

/// Edge length of the classifier's square input.
pub const INPUT_EDGE: u32 = 224;

pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage, InferenceError> {
    image::load_from_memory(bytes).map_err(|e| InferenceError::InvalidImage(e.to_string()))
}

/// Crop to the largest centered square, discarding the excess of the longer
/// axis. Offsets use integer division, so the center may shift by one pixel
/// on odd differences.
pub fn center_crop(image: &DynamicImage) -> DynamicImage {
    let (width, height) = image.dimensions();
    let edge = width.min(height);
    let left = (width - edge) / 2;
    let top = (height - edge) / 2;
    image.crop_imm(left, top, edge, edge)
}

/// Full normalization pipeline: center-crop, resize to the model input edge,
/// scale u8 intensities into [0, 1], and add the leading batch dimension.
pub fn normalize(image: &DynamicImage) -> Array4<f32> {
    let cropped = center_crop(image);
    let resized = cropped.resize_exact(INPUT_EDGE, INPUT_EDGE, FilterType::Triangle);
    let rgb = resized.to_rgb8();

    let edge = INPUT_EDGE as usize;
    let mut tensor = Array4::<f32>::zeros((1, edge, edge, 3));
    for (x, y, pixel) in rgb.enumerate_pixels() {
        for channel in 0..3 {
            tensor[[0, y as usize, x as usize, channel]] = f32::from(pixel[channel]) / 255.0;
        }
    }
    tensor
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn gradient_image(width: u32, height: u32) -> DynamicImage {
        let mut img = RgbImage::new(width, height);
        for (x, y, pixel) in img.enumerate_pixels_mut() {
            *pixel = Rgb([(x % 256) as u8, (y % 256) as u8, 128]);
        }
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn center_crop_is_square_on_min_edge() {
        for (w, h) in [(100, 60), (60, 100), (224, 224), (101, 57), (3, 9)] {
            let cropped = center_crop(&gradient_image(w, h));
            let edge = w.min(h);
            assert_eq!(cropped.dimensions(), (edge, edge), "input {w}x{h}");
        }
    }

    #[test]
    fn center_crop_preserves_center() {
        let img = gradient_image(100, 60);
        let cropped = center_crop(&img);
        // Crop starts at x = (100 - 60) / 2 = 20, y = 0.
        let original = img.get_pixel(20, 0);
        let after = cropped.get_pixel(0, 0);
        assert_eq!(original, after);
    }

    #[test]
    fn normalize_shape_and_range() {
        for (w, h) in [(640, 480), (33, 900), (224, 224)] {
            let tensor = normalize(&gradient_image(w, h));
            assert_eq!(tensor.shape(), &[1, 224, 224, 3]);
            assert!(tensor.iter().all(|&v| (0.0..=1.0).contains(&v)));
        }
    }

    #[test]
    fn decode_rejects_garbage() {
        let err = decode_image(b"definitely not an image").unwrap_err();
        assert!(err.is_client_error());
    }

    #[test]
    fn decode_accepts_png_bytes() {
        let mut bytes = Vec::new();
        gradient_image(8, 8)
            .write_to(
                &mut std::io::Cursor::new(&mut bytes),
                image::ImageFormat::Png,
            )
            .unwrap();
        let decoded = decode_image(&bytes).unwrap();
        assert_eq!(decoded.dimensions(), (8, 8));
    }
}
