use crate::THUMBNAIL_SIZE;
use color_eyre::eyre::Context;
use color_eyre::Result;
use image::imageops;
use image::{ImageReader, Rgba, RgbaImage};
use std::path::Path;

/// Generate the thumbnail for a photo with the native image pipeline:
/// decode, scale to fit the thumbnail box, center on a white canvas.
pub fn generate_photo_thumbnail(input: &Path, output: &Path) -> Result<()> {
    let img = ImageReader::open(input)?
        .with_guessed_format()?
        .decode()
        .with_context(|| format!("failed to decode {}", input.display()))?;

    let (target_w, target_h) = fit_within(img.width(), img.height(), THUMBNAIL_SIZE);
    let scaled = img.thumbnail_exact(target_w, target_h).to_rgba8();
    let (x, y) = pad_offsets(scaled.width(), scaled.height(), THUMBNAIL_SIZE);

    let mut canvas = RgbaImage::from_pixel(
        THUMBNAIL_SIZE,
        THUMBNAIL_SIZE,
        Rgba([255, 255, 255, 255]),
    );
    imageops::overlay(&mut canvas, &scaled, i64::from(x), i64::from(y));

    canvas
        .save(output)
        .with_context(|| format!("failed to write thumbnail {}", output.display()))?;
    Ok(())
}

/// Dimensions of an image scaled to fit within a square box while keeping
/// its aspect ratio. Never returns zero for a non-empty source.
pub(crate) fn fit_within(width: u32, height: u32, size: u32) -> (u32, u32) {
    if width >= height {
        let scaled_h = (u64::from(height) * u64::from(size) / u64::from(width.max(1))) as u32;
        (size, scaled_h.max(1))
    } else {
        let scaled_w = (u64::from(width) * u64::from(size) / u64::from(height)) as u32;
        (scaled_w.max(1), size)
    }
}

/// Top-left offset that centers a scaled image on the square canvas.
pub(crate) fn pad_offsets(width: u32, height: u32, size: u32) -> (u32, u32) {
    ((size - width.min(size)) / 2, (size - height.min(size)) / 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn landscape_fits_to_full_width() {
        let (w, h) = fit_within(4000, 3000, 200);
        assert_eq!((w, h), (200, 150));
    }

    #[test]
    fn portrait_fits_to_full_height() {
        let (w, h) = fit_within(1080, 1920, 200);
        assert_eq!((w, h), (112, 200));
    }

    #[test]
    fn square_fills_the_box() {
        assert_eq!(fit_within(512, 512, 200), (200, 200));
    }

    #[test]
    fn extreme_ratios_never_collapse_to_zero() {
        let (w, h) = fit_within(10_000, 1, 200);
        assert_eq!((w, h), (200, 1));
    }

    #[test]
    fn padding_is_centered() {
        assert_eq!(pad_offsets(200, 150, 200), (0, 25));
        assert_eq!(pad_offsets(112, 200, 200), (44, 0));
        assert_eq!(pad_offsets(200, 200, 200), (0, 0));
    }
}
