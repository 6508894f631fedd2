use ab_glyph::{point, Font, FontVec, OutlinedGlyph, PxScale};
use image::{Rgba, RgbaImage};

use crate::ascii::weights::GlyphRaster;
use crate::GlyphError;

/// Software glyph rasterizer over a loaded font.
///
/// Serves two roles: measuring ink coverage for [`WeightTable`]
/// construction, and painting glyphs onto an [`RgbaImage`] surface.
/// Cell metrics are fixed at construction from the font's 'M' advance
/// and line height, so every glyph lands in a uniform monospace cell.
///
/// [`WeightTable`]: crate::WeightTable
pub struct FontRaster {
    font: FontVec,
    scale: PxScale,
    cell_width: u32,
    cell_height: u32,
    ascent: f32,
    descent: f32,
}

impl FontRaster {
    pub fn from_vec(data: Vec<u8>, px: f32) -> Result<Self, GlyphError> {
        let font = FontVec::try_from_vec(data)?;
        let scale = PxScale::from(px.max(1.0));
        let units = font.height_unscaled();

        let ascent = font.ascent_unscaled() * scale.y / units;
        let descent = font.descent_unscaled() * scale.y / units;
        let v_advance =
            font.ascent_unscaled() - font.descent_unscaled() + font.line_gap_unscaled();
        let cell_height = ((v_advance * scale.y / units).ceil() as u32).max(1);

        let m_glyph = font.glyph_id('M');
        let h_advance = font.h_advance_unscaled(m_glyph) * scale.x / units;
        let cell_width = ((h_advance.ceil()) as u32).max(1);

        Ok(Self { font, scale, cell_width, cell_height, ascent, descent })
    }

    pub fn cell_width(&self) -> u32 {
        self.cell_width
    }

    pub fn cell_height(&self) -> u32 {
        self.cell_height
    }

    fn outline(&self, ch: char, origin_x: f32, baseline_y: f32) -> Option<OutlinedGlyph> {
        let glyph_id = self.font.glyph_id(ch);
        // glyph_id 0 is .notdef; skip rather than paint placeholder boxes.
        if glyph_id.0 == 0 && ch != '\0' {
            return None;
        }
        let glyph = glyph_id.with_scale_and_position(self.scale, point(origin_x, baseline_y));
        self.font.outline_glyph(glyph)
    }

    /// Paint one glyph centered at `(center_x, center_y)` onto `canvas`.
    ///
    /// Centering matches the canvas sketches' CENTER/CENTER text mode:
    /// horizontally on the glyph advance, vertically on the em box.
    pub fn draw_glyph(
        &self,
        ch: char,
        center_x: f32,
        center_y: f32,
        color: Rgba<u8>,
        canvas: &mut RgbaImage,
    ) {
        let glyph_id = self.font.glyph_id(ch);
        if glyph_id.0 == 0 {
            return;
        }
        let units = self.font.height_unscaled();
        let advance = self.font.h_advance_unscaled(glyph_id) * self.scale.x / units;
        let origin_x = center_x - advance * 0.5;
        let baseline_y = center_y + (self.ascent + self.descent) * 0.5;

        let Some(outlined) = self.outline(ch, origin_x, baseline_y) else {
            return;
        };
        let bounds = outlined.px_bounds();
        let (width, height) = canvas.dimensions();
        outlined.draw(|gx, gy, cov| {
            let px = bounds.min.x as i32 + gx as i32;
            let py = bounds.min.y as i32 + gy as i32;
            if px >= 0 && py >= 0 && (px as u32) < width && (py as u32) < height {
                blend(canvas.get_pixel_mut(px as u32, py as u32), color, cov);
            }
        });
    }
}

fn blend(dst: &mut Rgba<u8>, src: Rgba<u8>, coverage: f32) {
    let weight = coverage.clamp(0.0, 1.0) * f32::from(src.0[3]) / 255.0;
    for channel in 0..3 {
        let mixed =
            f32::from(src.0[channel]) * weight + f32::from(dst.0[channel]) * (1.0 - weight);
        dst.0[channel] = mixed.round().clamp(0.0, 255.0) as u8;
    }
    let alpha = f32::from(dst.0[3]).max(weight * 255.0);
    dst.0[3] = alpha.round().clamp(0.0, 255.0) as u8;
}

impl GlyphRaster for FontRaster {
    fn cell_size(&self) -> (u32, u32) {
        (self.cell_width, self.cell_height)
    }

    fn coverage(&self, ch: char) -> Option<f32> {
        let glyph_id = self.font.glyph_id(ch);
        if glyph_id.0 == 0 && ch != '\0' {
            return None;
        }
        // Whitespace carries a glyph but no outline: zero ink, still a
        // legitimate ramp member.
        let Some(outlined) = self.outline(ch, 0.0, self.ascent) else {
            return Some(0.0);
        };
        let mut ink = 0.0f32;
        outlined.draw(|_, _, cov| ink += cov.clamp(0.0, 1.0));
        let cell_area = (self.cell_width * self.cell_height) as f32;
        Some((ink / cell_area).min(1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blend_full_coverage_replaces_color() {
        let mut dst = Rgba([0, 0, 0, 255]);
        blend(&mut dst, Rgba([255, 255, 255, 255]), 1.0);
        assert_eq!(dst, Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn blend_zero_coverage_leaves_pixel_untouched() {
        let mut dst = Rgba([10, 20, 30, 255]);
        blend(&mut dst, Rgba([255, 255, 255, 255]), 0.0);
        assert_eq!(dst, Rgba([10, 20, 30, 255]));
    }
}
