use image::{Rgba, RgbaImage};

use super::canvas::DrawSurface;
use crate::font::FontRaster;

/// RGBA image surface painting glyphs through a [`FontRaster`].
///
/// Concrete [`DrawSurface`] used by the PNG export path: the canvas is
/// cleared to the background color, glyphs blend on top.
pub struct ImageSurface {
    canvas: RgbaImage,
    raster: FontRaster,
    foreground: Rgba<u8>,
}

impl ImageSurface {
    pub fn new(width: u32, height: u32, raster: FontRaster) -> Self {
        Self {
            canvas: RgbaImage::from_pixel(width.max(1), height.max(1), Rgba([0, 0, 0, 255])),
            raster,
            foreground: Rgba([255, 255, 255, 255]),
        }
    }

    /// Surface sized so every grid cell gets one full font cell.
    pub fn for_grid(columns: u16, rows: u16, raster: FontRaster) -> Self {
        let width = u32::from(columns) * raster.cell_width();
        let height = u32::from(rows) * raster.cell_height();
        Self::new(width, height, raster)
    }

    pub fn set_colors(&mut self, foreground: Rgba<u8>, background: Rgba<u8>) {
        self.foreground = foreground;
        for pixel in self.canvas.pixels_mut() {
            *pixel = background;
        }
    }

    pub fn into_image(self) -> RgbaImage {
        self.canvas
    }
}

impl DrawSurface for ImageSurface {
    fn size(&self) -> (f32, f32) {
        (self.canvas.width() as f32, self.canvas.height() as f32)
    }

    fn is_ready(&self) -> bool {
        self.canvas.width() > 0 && self.canvas.height() > 0
    }

    fn place_glyph(&mut self, ch: char, x: f32, y: f32) {
        self.raster.draw_glyph(ch, x, y, self.foreground, &mut self.canvas);
    }
}
