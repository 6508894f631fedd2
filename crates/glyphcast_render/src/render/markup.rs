use crate::ascii::grid::GlyphGrid;

/// Formatting for markup-mode output.
///
/// The blank glyph is escaped so consumers that collapse whitespace keep
/// cell alignment; every row ends with a line-break marker.
#[derive(Clone, Debug)]
pub struct MarkupOptions {
    pub blank: char,
    pub blank_escape: String,
    pub line_break: String,
}

impl Default for MarkupOptions {
    fn default() -> Self {
        Self {
            blank: ' ',
            blank_escape: "&nbsp;".to_string(),
            line_break: "<br/>".to_string(),
        }
    }
}

impl MarkupOptions {
    /// Options keyed to a specific ramp's designated blank glyph.
    pub fn for_blank(blank: char) -> Self {
        Self { blank, ..Self::default() }
    }
}

/// Concatenate the grid row-major into one markup string.
///
/// Exactly one escape per blank cell, exactly one line break per row.
pub fn to_markup(grid: &GlyphGrid, options: &MarkupOptions) -> String {
    let mut out = String::with_capacity(grid.cells().len() * 2);
    for row in markup_rows(grid, options) {
        out.push_str(&row);
        out.push_str(&options.line_break);
    }
    out
}

/// Per-row markup strings without trailing line breaks, for consumers
/// that place each row in its own container.
pub fn markup_rows(grid: &GlyphGrid, options: &MarkupOptions) -> Vec<String> {
    grid.rows()
        .map(|row| {
            let mut line = String::with_capacity(row.len() * 2);
            for ch in row.chars() {
                if ch == options.blank {
                    line.push_str(&options.blank_escape);
                } else {
                    line.push(ch);
                }
            }
            line
        })
        .collect()
}
