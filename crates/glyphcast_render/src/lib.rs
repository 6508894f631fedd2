mod ascii;
mod font;
mod image_pipeline;
mod render;

use std::path::Path;

use image::{DynamicImage, GenericImageView};

pub use ascii::{
    grid::GlyphGrid,
    mapper::PixelMapper,
    ramp::{DensityRamp, Polarity},
    weights::{GlyphRaster, WeightTable},
};
pub use font::FontRaster;
pub use image_pipeline::{
    adjust::posterize_rgba,
    loader::{FrameSource, SequenceSource, StaticFrame},
    resize::{GridGeometry, GridLayout},
};
pub use render::{
    canvas::{paint_grid, try_paint_grid, DrawSurface, Placement},
    markup::{markup_rows, to_markup, MarkupOptions},
    raster::ImageSurface,
};

#[derive(Debug, thiserror::Error)]
pub enum GlyphError {
    #[error("failed to load image: {0}")]
    Image(#[from] image::ImageError),
    #[error("failed to parse font: {0}")]
    Font(#[from] ab_glyph::InvalidFont),
    #[error("unsupported layout dimensions")]
    InvalidLayout,
    #[error("pixel buffer too short: need {expected} bytes, have {actual}")]
    InvalidDimensions { expected: usize, actual: usize },
    #[error("density ramp has no glyphs")]
    EmptyRamp,
    #[error("no glyph grid to render")]
    NullGrid,
    #[error("render target has no paintable surface")]
    NoDrawSurface,
    #[error("bad number of placement arguments: {0}")]
    BadArgumentCount(usize),
}

/// Conversion configuration.
///
/// Deliberately has no `Default`: the ramp polarity silently inverts the
/// picture when guessed wrong, so callers always state it.
#[derive(Clone, Debug)]
pub struct ConvertOptions {
    pub ramp: DensityRamp,
    pub polarity: Polarity,
    /// Per-channel posterize levels applied before mapping, off when
    /// `None`.
    pub posterize: Option<u8>,
}

impl ConvertOptions {
    pub fn new(ramp: DensityRamp, polarity: Polarity) -> Self {
        Self { ramp, polarity, posterize: None }
    }

    pub fn with_posterize(mut self, levels: u8) -> Self {
        self.posterize = Some(levels);
        self
    }
}

#[derive(Clone, Debug)]
pub struct ConvertOutput {
    pub grid: GlyphGrid,
    pub geometry: GridGeometry,
}

/// Image-to-glyph-grid conversion front end.
///
/// Derives the grid geometry, resizes the source to one pixel per cell,
/// optionally posterizes, then runs the pure per-pixel mapping.
#[derive(Default)]
pub struct GlyphConverter;

impl GlyphConverter {
    pub fn render_path<P: AsRef<Path>>(
        &self,
        path: P,
        layout: GridLayout,
        options: &ConvertOptions,
    ) -> Result<ConvertOutput, GlyphError> {
        let image = image::open(path)?;
        self.render_image(&image, layout, options)
    }

    pub fn render_image(
        &self,
        image: &DynamicImage,
        layout: GridLayout,
        options: &ConvertOptions,
    ) -> Result<ConvertOutput, GlyphError> {
        let (width, height) = image.dimensions();
        let geometry = layout.derive(width, height).ok_or(GlyphError::InvalidLayout)?;

        let resized = image.resize_exact(
            u32::from(geometry.columns),
            u32::from(geometry.rows),
            image::imageops::FilterType::CatmullRom,
        );

        let mut pixels = resized.to_rgba8().into_raw();
        if let Some(levels) = options.posterize {
            posterize_rgba(&mut pixels, levels);
        }

        let mapper = PixelMapper::new(options.ramp.clone(), options.polarity);
        let grid = mapper.convert(&pixels, geometry.columns, geometry.rows)?;
        Ok(ConvertOutput { grid, geometry })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    #[test]
    fn converted_grid_matches_derived_geometry() {
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            64,
            32,
            image::Rgba([255, 255, 255, 255]),
        ));
        let options = ConvertOptions::new(DensityRamp::classic(), Polarity::DarkFirst);
        let output = GlyphConverter
            .render_image(&image, GridLayout::Exact { columns: 16, rows: 8 }, &options)
            .unwrap();
        assert_eq!(output.geometry, GridGeometry { columns: 16, rows: 8 });
        assert_eq!((output.grid.width, output.grid.height), (16, 8));
        assert!(output.grid.cells().iter().all(|&ch| ch == ' '));
    }

    #[test]
    fn empty_source_is_a_layout_error() {
        let image = DynamicImage::ImageRgba8(RgbaImage::new(0, 0));
        let options = ConvertOptions::new(DensityRamp::classic(), Polarity::DarkFirst);
        let result = GlyphConverter.render_image(
            &image,
            GridLayout::FixedColumns { columns: 80, font_aspect: 0.55 },
            &options,
        );
        assert!(matches!(result, Err(GlyphError::InvalidLayout)));
    }
}
