/// A converted frame: width × height glyphs, row-major.
///
/// Produced fresh by each conversion; a new frame's grid fully replaces
/// the previous one, there is no identity across frames.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphGrid {
    pub width: u16,
    pub height: u16,
    cells: Vec<char>,
}

impl GlyphGrid {
    pub fn new(width: u16, height: u16, cells: Vec<char>) -> Self {
        assert_eq!(usize::from(width) * usize::from(height), cells.len());
        Self { width, height, cells }
    }

    pub fn glyph(&self, x: u16, y: u16) -> char {
        self.cells[usize::from(y) * usize::from(self.width) + usize::from(x)]
    }

    pub fn cells(&self) -> &[char] {
        &self.cells
    }

    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        let width = usize::from(self.width).max(1);
        self.cells.chunks(width).map(|row| row.iter().collect::<String>())
    }

    /// Newline-joined plain-text export.
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() + usize::from(self.height));
        for row in self.rows() {
            out.push_str(&row);
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_follow_row_major_order() {
        let grid = GlyphGrid::new(3, 2, vec!['a', 'b', 'c', 'd', 'e', 'f']);
        let rows: Vec<String> = grid.rows().collect();
        assert_eq!(rows, vec!["abc", "def"]);
        assert_eq!(grid.glyph(2, 1), 'f');
    }

    #[test]
    fn text_export_has_one_line_per_row() {
        let grid = GlyphGrid::new(2, 2, vec!['@', '.', '.', '@']);
        assert_eq!(grid.to_text(), "@.\n.@\n");
    }
}
