/// Quantize each color channel of an RGBA buffer into `levels` discrete
/// steps, leaving alpha untouched.
///
/// Mirrors the sketches' pre-conversion posterize filter; fewer levels
/// flatten gradients into bands the ramp resolves more cleanly. Levels
/// below 2 are clamped to 2.
pub fn posterize_rgba(pixels: &mut [u8], levels: u8) {
    let levels = levels.max(2);
    let steps = f32::from(levels - 1);
    for chunk in pixels.chunks_exact_mut(4) {
        for channel in &mut chunk[..3] {
            let normalized = f32::from(*channel) / 255.0;
            let quantized = (normalized * f32::from(levels)).floor().min(steps) / steps;
            *channel = (quantized * 255.0).round() as u8;
        }
    }
}
