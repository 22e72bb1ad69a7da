use crate::config::{RenderSettings, Resampling};
use crate::error::{ConvertError, Result};
use crate::filters::reduce;
use crate::markup::{RunSink, encode_document, encode_runs};
use crate::resize::{resize, resize_smooth};
use crate::sequencer::GlyphSequencer;
use image::RgbaImage;
use rayon::prelude::*;
use std::time::{Duration, Instant};

/// Most glyph rows a single conversion will produce
pub const MAX_ROWS: u32 = 20_000;

/// Result of converting one image
#[derive(Debug, Clone)]
pub struct Conversion {
    /// The markup block, ready to embed in a page
    pub markup: String,
    /// Glyphs per row
    pub columns: u32,
    /// Number of rows
    pub rows: u32,
    /// Time spent resampling, reducing and encoding
    pub elapsed: Duration,
}

/// Compute the glyph grid size for a source image
///
/// The height follows the source aspect ratio and is then squashed by the
/// browser's height factor, because glyph cells are taller than wide. At
/// least one row is always produced.
///
/// # Arguments
/// * `width`, `height` - Source dimensions
/// * `settings` - Supplies the target width and browser
///
/// # Returns
/// `(columns, rows)`, or `UnsupportedInput` for an empty source or one so
/// tall that it would need more than [`MAX_ROWS`] rows
pub fn output_dimensions(
    width: u32,
    height: u32,
    settings: &RenderSettings,
) -> Result<(u32, u32)> {
    if width == 0 || height == 0 {
        return Err(ConvertError::UnsupportedInput(format!(
            "image has no pixels ({}x{})",
            width, height
        )));
    }

    // f32 to u64 casts saturate, the percentage is applied without overflow
    let rows = (settings.width as f32 / (width as f32 / height as f32)) as u64;
    let rows = rows
        .checked_mul(settings.browser.height_percent() as u64)
        .map(|r| r / 100)
        .filter(|&r| r <= MAX_ROWS as u64)
        .ok_or_else(|| {
            ConvertError::UnsupportedInput(format!(
                "{}x{} image needs more than {} rows at width {}",
                width, height, MAX_ROWS, settings.width
            ))
        })?;

    Ok((settings.width, (rows as u32).max(1)))
}

/// Bring an image to glyph-grid resolution and apply color reduction
///
/// This is everything the pipeline does before encoding.
pub fn prepare_image(input: &RgbaImage, settings: &RenderSettings) -> Result<RgbaImage> {
    settings.validate()?;

    let (width, height) = input.dimensions();
    let (columns, rows) = output_dimensions(width, height, settings)?;
    log::debug!(
        "resampling {}x{} to {}x{} ({:?})",
        width,
        height,
        columns,
        rows,
        settings.resampling
    );

    let resized = match settings.resampling {
        Resampling::Blend => resize(input, columns, rows)?,
        Resampling::Smooth => resize_smooth(input, columns, rows)?,
    };

    Ok(reduce(resized, settings.color_mode))
}

/// Converts an image to glyph markup
///
/// Pipeline:
/// 1. Resolve the glyph grid size from width, aspect ratio and browser
/// 2. Resample to that size
/// 3. Apply grayscale or monochrome reduction if requested
/// 4. Run-length encode the pixels into color-tagged glyph runs
///
/// # Arguments
/// * `input` - The decoded source image
/// * `settings` - Conversion settings
///
/// # Returns
/// The markup block and its dimensions, or the first error hit
pub fn convert(input: &RgbaImage, settings: &RenderSettings) -> Result<Conversion> {
    let start = Instant::now();

    let mut glyphs = GlyphSequencer::new(settings.text_type, &settings.characters, settings.seed)?;
    let image = prepare_image(input, settings)?;
    let markup = encode_document(&image, &mut glyphs, settings);

    let elapsed = start.elapsed();
    log::debug!(
        "converted {}x{} image to {} bytes of markup in {:?}",
        input.width(),
        input.height(),
        markup.len(),
        elapsed
    );

    Ok(Conversion {
        markup,
        columns: image.width(),
        rows: image.height(),
        elapsed,
    })
}

/// Converts an image, sending run events to a custom sink
///
/// Same pipeline as [`convert`] without the HTML wrapper, for consumers
/// that render runs themselves.
pub fn render_with<S: RunSink + ?Sized>(
    input: &RgbaImage,
    settings: &RenderSettings,
    sink: &mut S,
) -> Result<(u32, u32)> {
    let mut glyphs = GlyphSequencer::new(settings.text_type, &settings.characters, settings.seed)?;
    let image = prepare_image(input, settings)?;
    encode_runs(&image, &mut glyphs, sink);
    Ok(image.dimensions())
}

/// Converts several images in parallel
///
/// Each conversion is fully independent with its own buffers and glyph
/// sequencer. Results are returned in input order.
pub fn convert_many(inputs: &[RgbaImage], settings: &RenderSettings) -> Vec<Result<Conversion>> {
    inputs
        .par_iter()
        .map(|input| convert(input, settings))
        .collect()
}
