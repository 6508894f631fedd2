use crate::GlyphError;

/// Direction in which brightness maps onto the ramp index domain.
///
/// The two historical sketch families disagree on this, so it is a
/// required configuration choice rather than a default: with the wrong
/// polarity the output is silently inverted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Polarity {
    /// Brightness 0 maps toward index 0: the ramp's first (highest-ink)
    /// glyph is used for the darkest pixels.
    DarkFirst,
    /// Brightness 255 maps toward index 0: the ramp's first glyph is
    /// used for the brightest pixels.
    BrightFirst,
}

/// Ordered glyph lookup table for brightness-to-glyph mapping.
///
/// Index 0 carries the highest visual ink weight; the last index the
/// lowest (conventionally a space). Immutable once constructed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DensityRamp {
    chars: Vec<char>,
}

impl DensityRamp {
    pub fn new(chars: impl Into<String>) -> Result<Self, GlyphError> {
        let chars: Vec<char> = chars.into().chars().collect();
        if chars.is_empty() {
            return Err(GlyphError::EmptyRamp);
        }
        Ok(Self { chars })
    }

    pub(crate) fn from_chars(chars: Vec<char>) -> Result<Self, GlyphError> {
        if chars.is_empty() {
            return Err(GlyphError::EmptyRamp);
        }
        Ok(Self { chars })
    }

    /// The 29-glyph ramp used by the still-image sketches.
    pub fn classic() -> Self {
        Self { chars: "Ñ@#W$9876543210?!abc;:+=-,._ ".chars().collect() }
    }

    /// The webcam variant: same glyphs with a long blank tail, which
    /// widens the brightness band rendered as empty space.
    pub fn extended() -> Self {
        Self {
            chars: "Ñ@#W$9876543210?!abc;:+=-,._                    ".chars().collect(),
        }
    }

    /// Unicode block elements, pseudo-pixel look.
    pub fn blocks() -> Self {
        Self { chars: "█▓▒░ ".chars().collect() }
    }

    /// Short high-contrast ramp.
    pub fn minimal() -> Self {
        Self { chars: "@#O%|+i-:. ".chars().collect() }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// The glyph rendered for empty cells: the lowest-ink end of the ramp.
    pub fn blank(&self) -> char {
        // Constructors reject empty ramps, so last() always exists.
        *self.chars.last().unwrap_or(&' ')
    }

    pub fn glyph_at(&self, index: usize) -> char {
        self.chars[index.min(self.chars.len() - 1)]
    }

    /// Map a brightness value in [0, 255] to a ramp index.
    ///
    /// Linear map onto [0, len] (or [len, 0] under `BrightFirst`),
    /// floored, then clamped: the boundary inputs 0 and 255 legitimately
    /// land on `len`, one past the last glyph.
    pub fn index_for(&self, brightness: f32, polarity: Polarity) -> usize {
        let len = self.chars.len() as f32;
        let scaled = match polarity {
            Polarity::DarkFirst => brightness / 255.0 * len,
            Polarity::BrightFirst => (1.0 - brightness / 255.0) * len,
        };
        (scaled.floor() as usize).min(self.chars.len() - 1)
    }
}
