use crate::error::{ConvertError, Result};

/// Width used when no width is supplied
pub const DEFAULT_WIDTH: u32 = 130;
/// Width substituted for an out-of-range or unparseable width
pub const FALLBACK_WIDTH: u32 = 100;
/// Largest accepted output width in glyphs
pub const MAX_WIDTH: u32 = 500;

/// Color reduction applied after resampling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    #[default]
    None,
    Grayscale,
    Monochrome,
}

impl ColorMode {
    /// Map the numeric form value (0 = off, 1 = grayscale, 2 = monochrome)
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => ColorMode::Grayscale,
            2 => ColorMode::Monochrome,
            _ => ColorMode::None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ColorMode::None => "color",
            ColorMode::Grayscale => "grayscale",
            ColorMode::Monochrome => "monochrome",
        }
    }
}

/// How glyphs are picked from the alphabet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextType {
    /// Walk the alphabet in order, wrapping around
    #[default]
    Sequence,
    /// Pick a uniformly random glyph per pixel
    Random,
}

impl TextType {
    pub fn parse(value: &str) -> Self {
        if value == "random" {
            TextType::Random
        } else {
            TextType::Sequence
        }
    }
}

/// Target browser, which decides how much rows are squashed
///
/// Glyph cells are taller than they are wide, so the output height is scaled
/// down to keep the picture's proportions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Browser {
    InternetExplorer,
    #[default]
    Other,
}

impl Browser {
    pub fn parse(value: &str) -> Self {
        if value == "ie" {
            Browser::InternetExplorer
        } else {
            Browser::Other
        }
    }

    /// Height scaling in percent
    pub fn height_percent(&self) -> u32 {
        match self {
            Browser::InternetExplorer => 65,
            Browser::Other => 43,
        }
    }
}

/// Resampling algorithm used to reach the glyph grid size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Resampling {
    /// Pairwise-average downscale, nearest-neighbor upscale
    #[default]
    Blend,
    /// Lanczos3 filtering from the `image` crate
    Smooth,
}

impl Resampling {
    pub fn parse(value: &str) -> Self {
        if value == "smooth" {
            Resampling::Smooth
        } else {
            Resampling::Blend
        }
    }
}

/// Settings for a single image conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSettings {
    /// Table background, any HTML color name or value
    pub bgcolor: String,
    pub browser: Browser,
    /// Glyph alphabet, must not be empty
    pub characters: String,
    /// Accepted for compatibility with existing forms, not used
    pub contrast: i32,
    /// HTML `<font size>` value
    pub fontsize: String,
    pub color_mode: ColorMode,
    pub text_type: TextType,
    /// Output width in glyphs [1, 500]
    pub width: u32,
    pub resampling: Resampling,
    /// Seed for random glyph selection; fresh entropy per conversion if unset
    pub seed: Option<u64>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            bgcolor: "BLACK".to_string(),
            browser: Browser::Other,
            characters: "01".to_string(),
            contrast: 0,
            fontsize: "-3".to_string(),
            color_mode: ColorMode::None,
            text_type: TextType::Sequence,
            width: DEFAULT_WIDTH,
            resampling: Resampling::Blend,
            seed: None,
        }
    }
}

/// Clamp a requested width into the accepted range
///
/// Widths outside [1, 500] fall back to 100 instead of being rejected.
pub fn clamp_width(width: i64) -> u32 {
    if width < 1 || width > MAX_WIDTH as i64 {
        log::warn!("width {} out of range, using {}", width, FALLBACK_WIDTH);
        FALLBACK_WIDTH
    } else {
        width as u32
    }
}

impl RenderSettings {
    /// Build settings from form-style key/value pairs
    ///
    /// Empty values count as absent and unknown keys are ignored, so any
    /// input produces usable settings. Values are trimmed, except the
    /// `characters` alphabet, where spaces are glyphs.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut settings = Self::default();

        for (key, raw) in pairs {
            let value = raw.trim();
            if value.is_empty() && (key != "characters" || raw.is_empty()) {
                continue;
            }
            match key {
                "bgcolor" => settings.bgcolor = value.to_string(),
                "browser" => settings.browser = Browser::parse(value),
                // Whitespace is a valid glyph, keep the alphabet verbatim
                "characters" => settings.characters = raw.to_string(),
                "contrast" => settings.contrast = value.parse().unwrap_or(0),
                "fontsize" => settings.fontsize = value.to_string(),
                "grayscale" => {
                    settings.color_mode = ColorMode::from_code(value.parse().unwrap_or(0))
                }
                "textType" => settings.text_type = TextType::parse(value),
                "width" => settings.width = clamp_width(value.parse().unwrap_or(0)),
                "resampling" => settings.resampling = Resampling::parse(value),
                "seed" => settings.seed = value.parse().ok(),
                _ => log::debug!("ignoring unknown setting {:?}", key),
            }
        }

        settings
    }

    /// Validates the settings
    ///
    /// Settings built with [`RenderSettings::from_pairs`] only fail here when
    /// the struct was edited afterwards.
    pub fn validate(&self) -> Result<()> {
        if self.characters.is_empty() {
            return Err(ConvertError::InvalidAlphabet);
        }
        if self.width < 1 || self.width > MAX_WIDTH {
            return Err(ConvertError::InvalidWidth(self.width));
        }
        Ok(())
    }
}
