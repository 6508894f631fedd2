use image::DynamicImage;
use image::GenericImageView;

/// Pull-based frame acquisition.
///
/// The host loop polls once per tick; `None` means no frame is available
/// this tick and the tick is skipped, never treated as an error.
pub trait FrameSource {
    fn dimensions(&self) -> (u32, u32);
    fn next_frame(&mut self) -> Option<DynamicImage>;
}

/// A single still image, returned on every poll.
pub struct StaticFrame {
    image: DynamicImage,
}

impl StaticFrame {
    pub fn new(image: DynamicImage) -> Self {
        Self { image }
    }
}

impl FrameSource for StaticFrame {
    fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    fn next_frame(&mut self) -> Option<DynamicImage> {
        Some(self.image.clone())
    }
}

/// A finite frame sequence (decoded animation or image directory),
/// exhausted front to back.
pub struct SequenceSource {
    frames: Vec<DynamicImage>,
    cursor: usize,
}

impl SequenceSource {
    pub fn new(frames: Vec<DynamicImage>) -> Self {
        Self { frames, cursor: 0 }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl FrameSource for SequenceSource {
    fn dimensions(&self) -> (u32, u32) {
        self.frames.first().map(|frame| frame.dimensions()).unwrap_or((0, 0))
    }

    fn next_frame(&mut self) -> Option<DynamicImage> {
        let frame = self.frames.get(self.cursor).cloned();
        if frame.is_some() {
            self.cursor += 1;
        }
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    fn frame(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::new(width, height))
    }

    #[test]
    fn static_frame_never_runs_dry() {
        let mut source = StaticFrame::new(frame(4, 2));
        assert_eq!(source.dimensions(), (4, 2));
        assert!(source.next_frame().is_some());
        assert!(source.next_frame().is_some());
    }

    #[test]
    fn sequence_drains_then_signals_skip() {
        let mut source = SequenceSource::new(vec![frame(2, 2), frame(2, 2)]);
        assert_eq!(source.len(), 2);
        assert!(source.next_frame().is_some());
        assert!(source.next_frame().is_some());
        assert!(source.next_frame().is_none());
        assert!(source.next_frame().is_none());
    }
}
