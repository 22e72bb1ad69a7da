use thiserror::Error;

/// Errors raised while converting an image to markup
///
/// Every variant aborts the conversion; nothing is retried or partially
/// recovered, since all stages are deterministic given valid input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// Source or resolved target dimensions below 1
    #[error("image dimensions invalid: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Output width outside [1, 500]
    #[error("output width {0} outside 1..=500")]
    InvalidWidth(u32),

    /// The glyph alphabet is empty
    #[error("character set must contain at least one character")]
    InvalidAlphabet,

    /// Input that cannot be converted at all (zero-sized or undecodable)
    #[error("unsupported input: {0}")]
    UnsupportedInput(String),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, ConvertError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_invalid_dimensions() {
        let err = ConvertError::InvalidDimensions {
            width: 0,
            height: 12,
        };
        assert_eq!(err.to_string(), "image dimensions invalid: 0x12");
    }

    #[test]
    fn test_display_invalid_width() {
        assert_eq!(
            ConvertError::InvalidWidth(0).to_string(),
            "output width 0 outside 1..=500"
        );
    }

    #[test]
    fn test_display_unsupported_input() {
        let err = ConvertError::UnsupportedInput("empty image".to_string());
        assert_eq!(err.to_string(), "unsupported input: empty image");
    }
}
