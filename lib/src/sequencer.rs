//! Glyph selection
//!
//! Every pixel of the output is drawn with one glyph from the configured
//! alphabet. Glyphs either cycle through the alphabet in order or are drawn
//! at random.

use crate::config::TextType;
use crate::error::{ConvertError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Debug)]
enum Cursor {
    Cyclic(usize),
    Random(StdRng),
}

/// Produces the glyph for each successive pixel of one conversion
///
/// A sequencer lives for a single encode pass and is never shared, so
/// concurrent conversions each carry their own cursor and random source.
#[derive(Debug)]
pub struct GlyphSequencer {
    alphabet: Vec<char>,
    cursor: Cursor,
}

impl GlyphSequencer {
    /// Sequencer that walks the alphabet in order, wrapping around
    pub fn cyclic(alphabet: &str) -> Result<Self> {
        Ok(Self {
            alphabet: parse_alphabet(alphabet)?,
            cursor: Cursor::Cyclic(0),
        })
    }

    /// Sequencer that picks uniformly random glyphs from `rng`
    pub fn random(alphabet: &str, rng: StdRng) -> Result<Self> {
        Ok(Self {
            alphabet: parse_alphabet(alphabet)?,
            cursor: Cursor::Random(rng),
        })
    }

    /// Build a sequencer for the given text type
    ///
    /// In random mode, `seed` makes the output reproducible; without one the
    /// generator is seeded from OS entropy for every call.
    pub fn new(text_type: TextType, alphabet: &str, seed: Option<u64>) -> Result<Self> {
        match text_type {
            TextType::Sequence => Self::cyclic(alphabet),
            TextType::Random => {
                let rng = match seed {
                    Some(seed) => StdRng::seed_from_u64(seed),
                    None => StdRng::from_entropy(),
                };
                Self::random(alphabet, rng)
            }
        }
    }

    /// Number of distinct glyphs in the alphabet
    pub fn alphabet_len(&self) -> usize {
        self.alphabet.len()
    }

    /// The next glyph to draw
    pub fn next_glyph(&mut self) -> char {
        let len = self.alphabet.len();
        let index = match &mut self.cursor {
            Cursor::Cyclic(counter) => {
                let index = *counter % len;
                *counter = counter.wrapping_add(1);
                index
            }
            Cursor::Random(rng) => rng.gen_range(0..len),
        };
        self.alphabet[index]
    }
}

impl Iterator for GlyphSequencer {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        Some(self.next_glyph())
    }
}

fn parse_alphabet(alphabet: &str) -> Result<Vec<char>> {
    let chars: Vec<char> = alphabet.chars().collect();
    if chars.is_empty() {
        return Err(ConvertError::InvalidAlphabet);
    }
    Ok(chars)
}
