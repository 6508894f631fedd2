use crate::ascii::grid::GlyphGrid;
use crate::GlyphError;

/// A paintable destination supplied by the host.
///
/// The core never creates or owns the surface; it only issues
/// place-glyph calls into it.
pub trait DrawSurface {
    /// Drawable extent in surface units.
    fn size(&self) -> (f32, f32);

    /// Whether the surface is currently paintable. A target that lost
    /// its backing reports `false` and the frame is skipped.
    fn is_ready(&self) -> bool {
        true
    }

    /// Paint one glyph centered at `(x, y)`.
    fn place_glyph(&mut self, ch: char, x: f32, y: f32);
}

/// Target region for a grid layout pass.
///
/// Replaces the sketches' positional-argument overloading with explicit
/// optional fields: origin defaults to (0, 0), size to the full target.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Placement {
    pub origin: Option<(f32, f32)>,
    pub size: Option<(f32, f32)>,
}

impl Placement {
    /// Full target rectangle at origin (0, 0).
    pub fn full() -> Self {
        Self::default()
    }

    /// Explicit origin, full target size.
    pub fn at(x: f32, y: f32) -> Self {
        Self { origin: Some((x, y)), size: None }
    }

    /// Explicit origin and size.
    pub fn region(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { origin: Some((x, y)), size: Some((width, height)) }
    }

    /// Resolve from a raw geometry-argument list, preserving the original
    /// call contract: zero args (full target), two (origin), or four
    /// (origin and size). Any other count is a configuration error.
    pub fn from_args(args: &[f32]) -> Result<Self, GlyphError> {
        match args {
            [] => Ok(Self::full()),
            [x, y] => Ok(Self::at(*x, *y)),
            [x, y, w, h] => Ok(Self::region(*x, *y, *w, *h)),
            other => Err(GlyphError::BadArgumentCount(other.len())),
        }
    }

    fn resolve(&self, target_width: f32, target_height: f32) -> (f32, f32, f32, f32) {
        let (x, y) = self.origin.unwrap_or((0.0, 0.0));
        let (w, h) = self.size.unwrap_or((target_width, target_height));
        (x, y, w, h)
    }
}

/// Lay the grid out onto the target, one centered glyph per cell.
///
/// Per-frame entry point: failures are logged and the call is a no-op,
/// so one bad frame never halts the host's display loop.
pub fn paint_grid(grid: Option<&GlyphGrid>, target: &mut dyn DrawSurface, placement: Placement) {
    if let Err(err) = try_paint_grid(grid, target, placement) {
        log::warn!("glyph layout skipped: {err}");
    }
}

/// Fallible layout pass; see [`paint_grid`] for the per-frame wrapper.
pub fn try_paint_grid(
    grid: Option<&GlyphGrid>,
    target: &mut dyn DrawSurface,
    placement: Placement,
) -> Result<(), GlyphError> {
    let grid = grid.ok_or(GlyphError::NullGrid)?;
    if !target.is_ready() {
        return Err(GlyphError::NoDrawSurface);
    }
    if grid.width == 0 || grid.height == 0 {
        return Ok(());
    }

    let (target_width, target_height) = target.size();
    let (x, y, width, height) = placement.resolve(target_width, target_height);
    let dist_hor = width / f32::from(grid.width);
    let dist_ver = height / f32::from(grid.height);

    for cy in 0..grid.height {
        for cx in 0..grid.width {
            target.place_glyph(
                grid.glyph(cx, cy),
                x + dist_hor * (f32::from(cx) + 0.5),
                y + dist_ver * (f32::from(cy) + 0.5),
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Recorder {
        width: f32,
        height: f32,
        ready: bool,
        placed: Vec<(char, f32, f32)>,
    }

    impl Recorder {
        fn new(width: f32, height: f32) -> Self {
            Self { width, height, ready: true, placed: Vec::new() }
        }
    }

    impl DrawSurface for Recorder {
        fn size(&self) -> (f32, f32) {
            (self.width, self.height)
        }

        fn is_ready(&self) -> bool {
            self.ready
        }

        fn place_glyph(&mut self, ch: char, x: f32, y: f32) {
            self.placed.push((ch, x, y));
        }
    }

    #[test]
    fn two_by_two_grid_centers_on_a_ten_by_ten_target() {
        let grid = GlyphGrid::new(2, 2, vec!['a', 'b', 'c', 'd']);
        let mut target = Recorder::new(10.0, 10.0);
        try_paint_grid(Some(&grid), &mut target, Placement::full()).unwrap();
        assert_eq!(
            target.placed,
            vec![
                ('a', 2.5, 2.5),
                ('b', 7.5, 2.5),
                ('c', 2.5, 7.5),
                ('d', 7.5, 7.5),
            ]
        );
    }

    #[test]
    fn explicit_origin_offsets_every_center() {
        let grid = GlyphGrid::new(1, 1, vec!['x']);
        let mut target = Recorder::new(4.0, 4.0);
        try_paint_grid(Some(&grid), &mut target, Placement::region(10.0, 20.0, 4.0, 4.0)).unwrap();
        assert_eq!(target.placed, vec![('x', 12.0, 22.0)]);
    }

    #[test]
    fn unsupported_argument_counts_are_rejected() {
        for args in [&[1.0, 2.0, 3.0][..], &[1.0, 2.0, 3.0, 4.0, 5.0][..]] {
            match Placement::from_args(args) {
                Err(GlyphError::BadArgumentCount(n)) => assert_eq!(n, args.len()),
                other => panic!("expected BadArgumentCount, got {other:?}"),
            }
        }
    }

    #[test]
    fn missing_grid_draws_nothing() {
        let mut target = Recorder::new(10.0, 10.0);
        let result = try_paint_grid(None, &mut target, Placement::full());
        assert!(matches!(result, Err(GlyphError::NullGrid)));
        assert!(target.placed.is_empty());
    }

    #[test]
    fn unready_surface_draws_nothing() {
        let grid = GlyphGrid::new(1, 1, vec!['x']);
        let mut target = Recorder::new(10.0, 10.0);
        target.ready = false;
        let result = try_paint_grid(Some(&grid), &mut target, Placement::full());
        assert!(matches!(result, Err(GlyphError::NoDrawSurface)));
        assert!(target.placed.is_empty());
    }

    #[test]
    fn per_frame_wrapper_never_panics_on_bad_input() {
        let mut target = Recorder::new(10.0, 10.0);
        paint_grid(None, &mut target, Placement::full());
        assert!(target.placed.is_empty());
    }
}
