use crate::config::RenderSettings;
use crate::sequencer::GlyphSequencer;
use image::{Rgba, RgbaImage};
use std::fmt;

/// 24-bit RGB color of a run
///
/// Alpha never takes part in run comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub [u8; 3]);

impl Color {
    pub fn from_pixel(pixel: &Rgba<u8>) -> Self {
        Color([pixel[0], pixel[1], pixel[2]])
    }

    pub fn r(&self) -> u8 {
        self.0[0]
    }

    pub fn g(&self) -> u8 {
        self.0[1]
    }

    pub fn b(&self) -> u8 {
        self.0[2]
    }
}

/// Six uppercase hex digits, zero padded
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X}{:02X}{:02X}", self.0[0], self.0[1], self.0[2])
    }
}

/// Receiver for the events of a run-length encode pass
pub trait RunSink {
    /// A new run of `color` starts
    fn open_run(&mut self, color: Color);
    /// One glyph inside the current run
    fn glyph(&mut self, glyph: char);
    /// The current run ends
    fn close_run(&mut self);
    /// The current row ends
    fn end_row(&mut self);
}

/// Walk an image row by row and report one run per maximal span of equal
/// colors
///
/// Runs never continue across rows: each row opens a fresh run at its first
/// pixel, even when the previous row ended in the same color.
///
/// # Arguments
/// * `img` - The resampled (and possibly color-reduced) image
/// * `glyphs` - Supplies one glyph per pixel
/// * `sink` - Receives the run events
pub fn encode_runs<S: RunSink + ?Sized>(
    img: &RgbaImage,
    glyphs: &mut GlyphSequencer,
    sink: &mut S,
) {
    for row in img.rows() {
        let mut previous: Option<Color> = None;

        for pixel in row {
            let current = Color::from_pixel(pixel);
            match previous {
                Some(color) if color == current => {}
                Some(_) => {
                    sink.close_run();
                    sink.open_run(current);
                }
                None => sink.open_run(current),
            }
            sink.glyph(glyphs.next_glyph());
            previous = Some(current);
        }

        if previous.is_some() {
            sink.close_run();
        }
        sink.end_row();
    }
}

/// Forwards every event to both sinks, in order
impl<A: RunSink, B: RunSink> RunSink for (A, B) {
    fn open_run(&mut self, color: Color) {
        self.0.open_run(color);
        self.1.open_run(color);
    }

    fn glyph(&mut self, glyph: char) {
        self.0.glyph(glyph);
        self.1.glyph(glyph);
    }

    fn close_run(&mut self) {
        self.0.close_run();
        self.1.close_run();
    }

    fn end_row(&mut self) {
        self.0.end_row();
        self.1.end_row();
    }
}

/// Writes run events as `<font color=#RRGGBB>` tagged HTML
#[derive(Debug, Default)]
pub struct HtmlSink {
    buffer: String,
}

impl HtmlSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: String::with_capacity(capacity),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn into_string(self) -> String {
        self.buffer
    }
}

impl RunSink for HtmlSink {
    fn open_run(&mut self, color: Color) {
        self.buffer.push_str("<font color=#");
        self.buffer.push_str(&color.to_string());
        self.buffer.push('>');
    }

    fn glyph(&mut self, glyph: char) {
        match glyph {
            '<' => self.buffer.push_str("&lt;"),
            '>' => self.buffer.push_str("&gt;"),
            '&' => self.buffer.push_str("&amp;"),
            _ => self.buffer.push(glyph),
        }
    }

    fn close_run(&mut self) {
        self.buffer.push_str("</font>");
    }

    fn end_row(&mut self) {
        self.buffer.push_str("<br>");
    }
}

/// Escape a value for use inside a double-quoted HTML attribute
pub fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '&' => escaped.push_str("&amp;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Opening half of the markup block, up to the first row
pub fn document_head(settings: &RenderSettings) -> String {
    format!(
        "<table align=\"center\" cellpadding=\"10\">\n<tr bgcolor=\"{}\"><td>\n\n\
         <!-- IMAGE BEGINS HERE -->\n<font size=\"{}\">\n<pre>",
        escape_attribute(&settings.bgcolor),
        escape_attribute(&settings.fontsize),
    )
}

/// Closing half of the markup block
///
/// The surrounding table is left open for the page template to close.
pub const DOCUMENT_TAIL: &str = "\n</pre></font>\n<!-- IMAGE ENDS HERE -->\n";

/// Wrap already-encoded rows in the markup block
pub fn wrap_document(settings: &RenderSettings, rows: &str) -> String {
    let head = document_head(settings);
    let mut doc = String::with_capacity(head.len() + rows.len() + DOCUMENT_TAIL.len());
    doc.push_str(&head);
    doc.push_str(rows);
    doc.push_str(DOCUMENT_TAIL);
    doc
}

/// Encode a prepared image into the complete markup block
///
/// # Arguments
/// * `img` - The image at glyph-grid resolution
/// * `glyphs` - Glyph source for this pass
/// * `settings` - Supplies background color and font size
///
/// # Returns
/// A self-contained fragment ready to embed in a page
pub fn encode_document(
    img: &RgbaImage,
    glyphs: &mut GlyphSequencer,
    settings: &RenderSettings,
) -> String {
    let head = document_head(settings);
    // An open tag, close tag and glyph per pixel is the worst case
    let cells = (img.width() as usize + 1) * img.height() as usize;
    let estimate = head.len() + DOCUMENT_TAIL.len() + cells * 24;

    let mut sink = HtmlSink::with_capacity(estimate);
    sink.buffer.push_str(&head);
    encode_runs(img, glyphs, &mut sink);
    sink.buffer.push_str(DOCUMENT_TAIL);
    sink.into_string()
}
