/// Glyph-grid dimensions in characters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridGeometry {
    pub columns: u16,
    pub rows: u16,
}

/// How the target glyph-grid resolution is derived from the source image.
#[derive(Clone, Copy, Debug)]
pub enum GridLayout {
    /// Fixed character resolution regardless of source shape, like the
    /// sketches' 120×60 capture grid.
    Exact { columns: u16, rows: u16 },
    /// Fixed column count; rows follow the source aspect ratio corrected
    /// by the font cell aspect (height / width).
    FixedColumns { columns: u16, font_aspect: f32 },
}

impl GridLayout {
    pub fn derive(&self, source_width: u32, source_height: u32) -> Option<GridGeometry> {
        if source_width == 0 || source_height == 0 {
            return None;
        }

        match *self {
            GridLayout::Exact { columns, rows } => {
                if columns == 0 || rows == 0 {
                    return None;
                }
                Some(GridGeometry { columns, rows })
            },
            GridLayout::FixedColumns { columns, font_aspect } => {
                let columns = columns.max(1);
                let image_ratio = source_height as f32 / source_width as f32;
                let rows =
                    ((image_ratio * f32::from(columns) * font_aspect).round() as u16).max(1);
                Some(GridGeometry { columns, rows })
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_layout_ignores_source_shape() {
        let layout = GridLayout::Exact { columns: 120, rows: 60 };
        assert_eq!(
            layout.derive(1920, 1080),
            Some(GridGeometry { columns: 120, rows: 60 })
        );
    }

    #[test]
    fn fixed_columns_follows_aspect() {
        let layout = GridLayout::FixedColumns { columns: 100, font_aspect: 0.5 };
        // 100 wide source, 100 tall: ratio 1.0, rows = 100 * 0.5.
        assert_eq!(
            layout.derive(100, 100),
            Some(GridGeometry { columns: 100, rows: 50 })
        );
    }

    #[test]
    fn degenerate_sources_yield_no_geometry() {
        let layout = GridLayout::FixedColumns { columns: 80, font_aspect: 0.55 };
        assert_eq!(layout.derive(0, 100), None);
        assert_eq!(layout.derive(100, 0), None);
        assert_eq!(GridLayout::Exact { columns: 0, rows: 10 }.derive(10, 10), None);
    }
}
