use super::grid::GlyphGrid;
use super::ramp::{DensityRamp, Polarity};
use crate::GlyphError;

/// Pure per-pixel brightness-to-glyph conversion.
///
/// Holds only immutable configuration; every call produces a fresh grid
/// and shares no state with previous frames.
#[derive(Clone, Debug)]
pub struct PixelMapper {
    ramp: DensityRamp,
    polarity: Polarity,
}

impl PixelMapper {
    pub fn new(ramp: DensityRamp, polarity: Polarity) -> Self {
        Self { ramp, polarity }
    }

    pub fn ramp(&self) -> &DensityRamp {
        &self.ramp
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Convert a flat row-major RGBA buffer into a glyph grid.
    ///
    /// Brightness is the plain channel average (R+G+B)/3; alpha is
    /// ignored. Fails with `InvalidDimensions` before touching any pixel
    /// if the buffer is shorter than the declared geometry requires, so
    /// no partial grid is ever produced.
    pub fn convert(
        &self,
        pixels: &[u8],
        width: u16,
        height: u16,
    ) -> Result<GlyphGrid, GlyphError> {
        let expected = usize::from(width) * usize::from(height) * 4;
        if pixels.len() < expected {
            return Err(GlyphError::InvalidDimensions { expected, actual: pixels.len() });
        }

        let mut cells = Vec::with_capacity(usize::from(width) * usize::from(height));
        for j in 0..usize::from(height) {
            for i in 0..usize::from(width) {
                let base = (i + j * usize::from(width)) * 4;
                let r = f32::from(pixels[base]);
                let g = f32::from(pixels[base + 1]);
                let b = f32::from(pixels[base + 2]);
                let avg = (r + g + b) / 3.0;
                let index = self.ramp.index_for(avg, self.polarity);
                cells.push(self.ramp.glyph_at(index));
            }
        }

        Ok(GlyphGrid::new(width, height, cells))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u16, height: u16, rgba: [u8; 4]) -> Vec<u8> {
        rgba.iter()
            .copied()
            .cycle()
            .take(usize::from(width) * usize::from(height) * 4)
            .collect()
    }

    #[test]
    fn white_maps_to_blank_under_dark_first() {
        let mapper = PixelMapper::new(DensityRamp::classic(), Polarity::DarkFirst);
        let grid = mapper.convert(&solid(4, 3, [255, 255, 255, 255]), 4, 3).unwrap();
        let blank = mapper.ramp().blank();
        assert!(grid.cells().iter().all(|&ch| ch == blank));
    }

    #[test]
    fn black_maps_to_densest_under_dark_first() {
        let mapper = PixelMapper::new(DensityRamp::classic(), Polarity::DarkFirst);
        let grid = mapper.convert(&solid(4, 3, [0, 0, 0, 255]), 4, 3).unwrap();
        let densest = mapper.ramp().glyph_at(0);
        assert!(grid.cells().iter().all(|&ch| ch == densest));
    }

    #[test]
    fn bright_first_polarity_inverts_the_extremes() {
        let mapper = PixelMapper::new(DensityRamp::classic(), Polarity::BrightFirst);
        let black = mapper.convert(&solid(2, 2, [0, 0, 0, 255]), 2, 2).unwrap();
        let white = mapper.convert(&solid(2, 2, [255, 255, 255, 255]), 2, 2).unwrap();
        assert!(white.cells().iter().all(|&ch| ch == mapper.ramp().glyph_at(0)));
        assert!(black.cells().iter().all(|&ch| ch == mapper.ramp().blank()));
    }

    #[test]
    fn grid_dimensions_match_declared_geometry() {
        let mapper = PixelMapper::new(DensityRamp::minimal(), Polarity::DarkFirst);
        let grid = mapper.convert(&solid(7, 5, [10, 20, 30, 255]), 7, 5).unwrap();
        assert_eq!((grid.width, grid.height), (7, 5));
        assert_eq!(grid.cells().len(), 35);
    }

    #[test]
    fn short_buffer_is_rejected_without_partial_output() {
        let mapper = PixelMapper::new(DensityRamp::minimal(), Polarity::DarkFirst);
        let short = vec![0u8; 4 * 3 * 4 - 1];
        match mapper.convert(&short, 4, 3) {
            Err(GlyphError::InvalidDimensions { expected, actual }) => {
                assert_eq!(expected, 48);
                assert_eq!(actual, 47);
            },
            other => panic!("expected InvalidDimensions, got {other:?}"),
        }
    }

    #[test]
    fn alpha_channel_is_ignored() {
        let mapper = PixelMapper::new(DensityRamp::minimal(), Polarity::BrightFirst);
        let opaque = mapper.convert(&solid(2, 2, [40, 80, 120, 255]), 2, 2).unwrap();
        let clear = mapper.convert(&solid(2, 2, [40, 80, 120, 0]), 2, 2).unwrap();
        assert_eq!(opaque, clear);
    }
}
