use super::ramp::DensityRamp;
use crate::GlyphError;

/// Capability to rasterize a single glyph and report its ink coverage.
///
/// The core consumes this but never implements surface rendering itself;
/// the shipped implementation lives in [`crate::font::FontRaster`].
pub trait GlyphRaster {
    /// Cell dimensions in pixels of the monospace raster cell.
    fn cell_size(&self) -> (u32, u32);

    /// Fraction of the cell covered by ink, in [0, 1].
    ///
    /// Returns `None` when the font has no glyph for `ch`; whitespace
    /// glyphs return `Some(0.0)`.
    fn coverage(&self, ch: char) -> Option<f32>;
}

/// Glyphs ordered by measured rendered-ink coverage.
///
/// Built once, offline, by rasterizing every candidate glyph and
/// measuring how much of its cell it fills. Immutable afterwards and
/// reused across every conversion.
#[derive(Clone, Debug)]
pub struct WeightTable {
    entries: Vec<(char, f32)>,
}

impl WeightTable {
    /// Measure `candidates` against `raster`, dropping glyphs the font
    /// lacks, and sort densest-first.
    pub fn measure<R, I>(raster: &R, candidates: I) -> Self
    where
        R: GlyphRaster,
        I: IntoIterator<Item = char>,
    {
        let mut entries: Vec<(char, f32)> = candidates
            .into_iter()
            .filter_map(|ch| raster.coverage(ch).map(|cov| (ch, cov)))
            .collect();
        entries.sort_by(|a, b| b.1.total_cmp(&a.1));
        log::debug!("measured {} glyphs into weight table", entries.len());
        Self { entries }
    }

    pub fn entries(&self) -> &[(char, f32)] {
        &self.entries
    }

    /// Render the table as a density ramp, densest glyph at index 0.
    pub fn to_ramp(&self) -> Result<DensityRamp, GlyphError> {
        DensityRamp::from_chars(self.entries.iter().map(|&(ch, _)| ch).collect())
    }

    /// Human-readable listing of the measured weights, densest first.
    pub fn listing(&self) -> String {
        let mut out = String::new();
        for (ch, coverage) in &self.entries {
            out.push_str(&format!("{ch:?}: {coverage:.4}\n"));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedCoverage;

    impl GlyphRaster for FixedCoverage {
        fn cell_size(&self) -> (u32, u32) {
            (8, 16)
        }

        fn coverage(&self, ch: char) -> Option<f32> {
            match ch {
                '@' => Some(0.8),
                '+' => Some(0.4),
                '.' => Some(0.1),
                ' ' => Some(0.0),
                _ => None,
            }
        }
    }

    #[test]
    fn table_sorts_densest_first_and_drops_missing_glyphs() {
        let table = WeightTable::measure(&FixedCoverage, "§. @+".chars());
        let order: Vec<char> = table.entries().iter().map(|&(ch, _)| ch).collect();
        assert_eq!(order, vec!['@', '+', '.', ' ']);
    }

    #[test]
    fn measured_ramp_ends_in_the_lightest_glyph() {
        let table = WeightTable::measure(&FixedCoverage, "@ .+".chars());
        let ramp = table.to_ramp().unwrap();
        assert_eq!(ramp.glyph_at(0), '@');
        assert_eq!(ramp.blank(), ' ');
    }

    #[test]
    fn empty_measurement_yields_empty_ramp_error() {
        let table = WeightTable::measure(&FixedCoverage, "§§§".chars());
        assert!(matches!(table.to_ramp(), Err(GlyphError::EmptyRamp)));
    }
}
