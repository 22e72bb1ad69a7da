//! Resampling of source images down (or up) to the glyph grid size

use crate::error::{ConvertError, Result};
use image::{RgbaImage, imageops};

/// Resolve the target dimensions for a resize request
///
/// A `target_height` of 0 derives the height from the source aspect ratio:
/// `round(target_width / (source_width / source_height))`.
///
/// # Returns
/// The `(width, height)` to resize to, or `InvalidDimensions` if the source
/// or the resolved target is smaller than 1x1
pub fn resolve_dimensions(
    source: (u32, u32),
    target_width: u32,
    target_height: u32,
) -> Result<(u32, u32)> {
    let (width, height) = source;
    if width < 1 || height < 1 {
        return Err(ConvertError::InvalidDimensions { width, height });
    }

    let target_height = if target_height == 0 {
        (target_width as f32 / (width as f32 / height as f32)).round() as u32
    } else {
        target_height
    };

    if target_width < 1 || target_height < 1 {
        return Err(ConvertError::InvalidDimensions {
            width: target_width,
            height: target_height,
        });
    }

    Ok((target_width, target_height))
}

/// Resize an image with pairwise blending
///
/// When shrinking, every source pixel is projected onto the destination grid
/// in scan order. The first pixel landing in a cell is copied, every later
/// one is averaged with the cell's current value (`(a + b) >> 1` per
/// channel). This is a cascading average: pixels scanned last weigh the most.
///
/// When enlarging (or keeping the width), each destination pixel copies its
/// nearest source pixel without blending.
///
/// # Arguments
/// * `source` - The input RGBA image
/// * `target_width` - Output width, at least 1
/// * `target_height` - Output height, or 0 to keep the aspect ratio
///
/// # Returns
/// A new image of exactly the resolved target dimensions
pub fn resize(source: &RgbaImage, target_width: u32, target_height: u32) -> Result<RgbaImage> {
    let (w, h) = resolve_dimensions(source.dimensions(), target_width, target_height)?;
    let (width, height) = source.dimensions();

    let x_ratio = width as f32 / w as f32;
    let y_ratio = height as f32 / h as f32;

    let output = if width > w {
        blend_down(source, w, h, x_ratio, y_ratio)
    } else {
        sample_up(source, w, h, x_ratio, y_ratio)
    };

    Ok(output)
}

/// Resize an image with Lanczos3 filtering
///
/// Dimension resolution and errors match [`resize`].
pub fn resize_smooth(
    source: &RgbaImage,
    target_width: u32,
    target_height: u32,
) -> Result<RgbaImage> {
    let (w, h) = resolve_dimensions(source.dimensions(), target_width, target_height)?;
    Ok(imageops::resize(source, w, h, imageops::FilterType::Lanczos3))
}

fn blend_down(source: &RgbaImage, w: u32, h: u32, x_ratio: f32, y_ratio: f32) -> RgbaImage {
    let mut output = RgbaImage::new(w, h);
    let mut touched = vec![false; (w * h) as usize];

    for (x, y, pixel) in source.enumerate_pixels() {
        let ox = ((x as f32 / x_ratio) as u32).min(w - 1);
        let oy = ((y as f32 / y_ratio) as u32).min(h - 1);
        let idx = (oy * w + ox) as usize;
        let dst = output.get_pixel_mut(ox, oy);

        if !touched[idx] {
            touched[idx] = true;
            *dst = *pixel;
        } else {
            for c in 0..4 {
                dst[c] = ((dst[c] as u16 + pixel[c] as u16) >> 1) as u8;
            }
        }
    }

    output
}

fn sample_up(source: &RgbaImage, w: u32, h: u32, x_ratio: f32, y_ratio: f32) -> RgbaImage {
    let (width, height) = source.dimensions();

    RgbaImage::from_fn(w, h, |x, y| {
        let sx = ((x as f32 * x_ratio) as u32).min(width - 1);
        let sy = ((y as f32 * y_ratio) as u32).min(height - 1);
        *source.get_pixel(sx, sy)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn gradient(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            Rgba([
                (x * 7 % 256) as u8,
                (y * 13 % 256) as u8,
                ((x + y) * 3 % 256) as u8,
                255,
            ])
        })
    }

    #[test]
    fn test_resolve_dimensions_aspect_ratio() {
        assert_eq!(resolve_dimensions((200, 100), 50, 0), Ok((50, 25)));
        // 10 / (3 / 2) = 6.67 rounds up
        assert_eq!(resolve_dimensions((3, 2), 10, 0), Ok((10, 7)));
        assert_eq!(resolve_dimensions((2, 1), 2, 0), Ok((2, 1)));
    }

    #[test]
    fn test_resolve_dimensions_invalid_source() {
        assert_eq!(
            resolve_dimensions((0, 10), 5, 5),
            Err(ConvertError::InvalidDimensions {
                width: 0,
                height: 10
            })
        );
    }

    #[test]
    fn test_resolve_dimensions_invalid_target() {
        assert!(resolve_dimensions((10, 10), 0, 5).is_err());
        // Very wide source: height derives to 0
        assert_eq!(
            resolve_dimensions((1000, 1), 10, 0),
            Err(ConvertError::InvalidDimensions {
                width: 10,
                height: 0
            })
        );
    }

    #[test]
    fn test_resize_exact_dimensions() {
        let cases = [
            ((100, 100), (10, 10)),
            ((127, 85), (40, 13)),
            ((33, 7), (5, 21)),
            ((4, 4), (9, 3)),
            ((1, 1), (6, 6)),
        ];
        for ((sw, sh), (tw, th)) in cases {
            let out = resize(&gradient(sw, sh), tw, th).unwrap();
            assert_eq!(out.dimensions(), (tw, th), "{}x{} -> {}x{}", sw, sh, tw, th);
        }
    }

    #[test]
    fn test_downscale_is_deterministic() {
        let src = gradient(97, 61);
        let a = resize(&src, 13, 0).unwrap();
        let b = resize(&src, 13, 0).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_downscale_cascading_average() {
        // Three pixels fold into one cell: ((0 + 100) >> 1 + 200) >> 1 = 125
        let mut src = RgbaImage::new(3, 1);
        src.put_pixel(0, 0, Rgba([0, 0, 0, 255]));
        src.put_pixel(1, 0, Rgba([100, 100, 100, 255]));
        src.put_pixel(2, 0, Rgba([200, 200, 200, 255]));

        let out = resize(&src, 1, 1).unwrap();
        assert_eq!(*out.get_pixel(0, 0), Rgba([125, 125, 125, 255]));
    }

    #[test]
    fn test_downscale_blend_order_matters() {
        let mut src = RgbaImage::new(3, 1);
        src.put_pixel(0, 0, Rgba([200, 0, 0, 255]));
        src.put_pixel(1, 0, Rgba([100, 0, 0, 255]));
        src.put_pixel(2, 0, Rgba([0, 0, 0, 255]));

        // ((200 + 100) >> 1 + 0) >> 1 = 75, a true mean would give 100
        let out = resize(&src, 1, 1).unwrap();
        assert_eq!(out.get_pixel(0, 0)[0], 75);
    }

    #[test]
    fn test_downscale_blends_alpha() {
        let mut src = RgbaImage::new(2, 1);
        src.put_pixel(0, 0, Rgba([10, 20, 30, 0]));
        src.put_pixel(1, 0, Rgba([30, 40, 50, 255]));

        let out = resize(&src, 1, 1).unwrap();
        assert_eq!(*out.get_pixel(0, 0), Rgba([20, 30, 40, 127]));
    }

    #[test]
    fn test_downscale_first_write_is_copied() {
        // 4x2 -> 2x1: cell (0,0) receives (0,0), (1,0), (0,1), (1,1) in scan order
        let mut src = RgbaImage::from_pixel(4, 2, Rgba([0, 0, 0, 255]));
        src.put_pixel(0, 0, Rgba([255, 255, 255, 255]));
        src.put_pixel(1, 0, Rgba([255, 255, 255, 255]));
        src.put_pixel(0, 1, Rgba([255, 255, 255, 255]));
        src.put_pixel(1, 1, Rgba([255, 255, 255, 255]));

        let out = resize(&src, 2, 1).unwrap();
        assert_eq!(*out.get_pixel(0, 0), Rgba([255, 255, 255, 255]));
        assert_eq!(*out.get_pixel(1, 0), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_upscale_never_blends() {
        let src = gradient(5, 4);
        let out = resize(&src, 17, 11).unwrap();

        let source_pixels: Vec<Rgba<u8>> = src.pixels().copied().collect();
        for pixel in out.pixels() {
            assert!(source_pixels.contains(pixel));
        }
    }

    #[test]
    fn test_upscale_nearest_neighbor() {
        let mut src = RgbaImage::new(2, 1);
        src.put_pixel(0, 0, Rgba([1, 2, 3, 4]));
        src.put_pixel(1, 0, Rgba([5, 6, 7, 8]));

        let out = resize(&src, 4, 1).unwrap();
        assert_eq!(*out.get_pixel(0, 0), Rgba([1, 2, 3, 4]));
        assert_eq!(*out.get_pixel(1, 0), Rgba([1, 2, 3, 4]));
        assert_eq!(*out.get_pixel(2, 0), Rgba([5, 6, 7, 8]));
        assert_eq!(*out.get_pixel(3, 0), Rgba([5, 6, 7, 8]));
    }

    #[test]
    fn test_same_width_is_copy() {
        let src = gradient(6, 3);
        let out = resize(&src, 6, 3).unwrap();
        assert_eq!(out, src);
    }

    #[test]
    fn test_resize_smooth_dimensions() {
        let out = resize_smooth(&gradient(64, 32), 16, 0).unwrap();
        assert_eq!(out.dimensions(), (16, 8));
        assert!(resize_smooth(&gradient(64, 32), 0, 4).is_err());
    }
}
