//! pic2html - image to colored glyph HTML converter
//!
//! Converts a raster image into HTML built from colored monospace glyphs.
//! The image is resampled down to a small glyph grid, optionally reduced to
//! grayscale or monochrome, and every pixel becomes one glyph. Consecutive
//! pixels of the same color share a single `<font color=...>` tag.
//!
//! # Example
//! ```no_run
//! use pic2html::{convert, RenderSettings};
//!
//! let input = image::open("photo.jpg").unwrap().to_rgba8();
//! let settings = RenderSettings::from_pairs([("width", "80"), ("grayscale", "1")]);
//! let conversion = convert(&input, &settings).unwrap();
//! std::fs::write("photo.html", conversion.markup).unwrap();
//! ```

pub mod config;
pub mod error;
pub mod filters;
pub mod markup;
pub mod processor;
pub mod resize;
pub mod sequencer;

// Re-export main types for convenience
pub use config::{Browser, ColorMode, RenderSettings, Resampling, TextType};
pub use error::ConvertError;
pub use markup::{Color, HtmlSink, RunSink, wrap_document};
pub use processor::{Conversion, convert, convert_many, render_with};
pub use sequencer::GlyphSequencer;
