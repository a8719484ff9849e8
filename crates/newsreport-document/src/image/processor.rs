// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Logo rasterisation: decode the fetched bytes, resample to the title-page box,
// and drop alpha so printpdf can embed the result as an RGB image XObject.

use image::imageops::FilterType;
use image::{DynamicImage, Rgb, RgbImage, Rgba};
use newsreport_core::error::ReportError;
use printpdf::{RawImage, RawImageData, RawImageFormat};
use tracing::{debug, instrument};

/// A decoded logo on its way to the PDF.
///
/// ```ignore
/// let raw = ImageProcessor::from_bytes(&png)?
///     .resize_exact(375, 150)
///     .flatten([255, 255, 255])
///     .to_raw_image();
/// ```
pub struct ImageProcessor {
    image: DynamicImage,
}

impl ImageProcessor {
    /// Decode PNG, JPEG, or any other format the `image` crate recognises.
    #[instrument(skip_all, fields(len = encoded.len()))]
    pub fn from_bytes(encoded: &[u8]) -> Result<Self, ReportError> {
        let image = image::load_from_memory(encoded)
            .map_err(|err| ReportError::Image(format!("cannot decode logo: {err}")))?;
        debug!(w = image.width(), h = image.height(), "Logo decoded");
        Ok(Self { image })
    }

    /// Pixel dimensions as `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.image.width(), self.image.height())
    }

    /// Stretch to exactly `width` x `height` pixels. The logo box has a fixed
    /// shape, so aspect ratio is not preserved.
    pub fn resize_exact(self, width: u32, height: u32) -> Self {
        let (w, h) = self.dimensions();
        debug!(w, h, width, height, "Resampling logo");
        Self {
            image: self
                .image
                .resize_exact(width.max(1), height.max(1), FilterType::Lanczos3),
        }
    }

    /// Composite over an opaque `background`.
    pub fn flatten(self, background: [u8; 3]) -> Self {
        let rgba = self.image.into_rgba8();
        let flattened = RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
            let Rgba([r, g, b, a]) = *rgba.get_pixel(x, y);
            Rgb([
                blend(r, background[0], a),
                blend(g, background[1], a),
                blend(b, background[2], a),
            ])
        });
        Self {
            image: DynamicImage::ImageRgb8(flattened),
        }
    }

    /// Hand the pixels to printpdf as 8-bit RGB.
    pub fn to_raw_image(&self) -> RawImage {
        let pixels = self.image.to_rgb8();
        let (width, height) = (pixels.width() as usize, pixels.height() as usize);
        RawImage {
            pixels: RawImageData::U8(pixels.into_raw()),
            width,
            height,
            data_format: RawImageFormat::RGB8,
            tag: Vec::new(),
        }
    }
}

/// Source-over blend of one channel, rounded to nearest.
fn blend(channel: u8, background: u8, alpha: u8) -> u8 {
    let a = u32::from(alpha);
    ((u32::from(channel) * a + u32::from(background) * (255 - a) + 127) / 255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbaImage};

    fn encode_png(image: RgbaImage) -> Vec<u8> {
        let mut png = Vec::new();
        DynamicImage::ImageRgba8(image)
            .write_to(&mut std::io::Cursor::new(&mut png), ImageFormat::Png)
            .expect("encode png");
        png
    }

    #[test]
    fn decodes_png() {
        let png = encode_png(RgbaImage::from_pixel(4, 2, Rgba([1, 2, 3, 255])));
        let processor = ImageProcessor::from_bytes(&png).unwrap();
        assert_eq!(processor.dimensions(), (4, 2));
    }

    #[test]
    fn html_error_page_is_not_an_image() {
        let result = ImageProcessor::from_bytes(b"<html>404</html>");
        assert!(matches!(result, Err(ReportError::Image(_))));
    }

    #[test]
    fn transparent_pixels_take_the_background() {
        let mut img = RgbaImage::from_pixel(2, 1, Rgba([0, 0, 0, 0]));
        img.put_pixel(1, 0, Rgba([10, 20, 30, 255]));

        let processor = ImageProcessor {
            image: DynamicImage::ImageRgba8(img),
        };
        let raw = processor.flatten([255, 255, 255]).to_raw_image();

        match raw.pixels {
            RawImageData::U8(pixels) => assert_eq!(pixels, vec![255, 255, 255, 10, 20, 30]),
            _ => panic!("expected 8-bit pixels"),
        }
    }

    #[test]
    fn half_alpha_blends_midway() {
        assert_eq!(blend(0, 255, 128), 127);
        assert_eq!(blend(200, 0, 255), 200);
    }

    #[test]
    fn resize_exact_sets_dimensions() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(40, 40, Rgba([9, 9, 9, 255])));
        let raw = ImageProcessor { image: img }.resize_exact(25, 10).to_raw_image();
        assert_eq!((raw.width, raw.height), (25, 10));
    }
}
