//! Per-frame motion arithmetic: elapsed-time scaling and edge wraparound.

/// Duration of one reference frame. Velocities are expressed per reference frame.
pub const REFERENCE_FRAME_MS: f64 = 1000.0 / 60.0;

/// Convert an elapsed interval into reference-frame steps.
///
/// The interval is clamped to `[0, max_frame_ms]` so a stalled host (hidden
/// tab, debugger pause) does not fling particles across the view.
pub fn frame_steps(elapsed_ms: f64, max_frame_ms: f64, speed_scale: f32) -> f32 {
    let elapsed = if elapsed_ms.is_finite() {
        elapsed_ms.clamp(0.0, max_frame_ms)
    } else {
        0.0
    };
    (elapsed / REFERENCE_FRAME_MS) as f32 * speed_scale
}

/// Wrap `value` into `[0, extent)`.
pub fn wrap(value: f32, extent: f32) -> f32 {
    let r = value.rem_euclid(extent);
    // rem_euclid can round up to `extent` for tiny negative inputs.
    if r >= extent { 0.0 } else { r }
}

/// Wrap `value` into `[-margin, extent + margin)`.
pub fn wrap_with_margin(value: f32, extent: f32, margin: f32) -> f32 {
    wrap(value + margin, extent + 2.0 * margin) - margin
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_reference_frame_is_one_step() {
        let steps = frame_steps(REFERENCE_FRAME_MS, 250.0, 1.0);
        assert!((steps - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_speed_scale_multiplies() {
        let steps = frame_steps(REFERENCE_FRAME_MS * 2.0, 250.0, 0.5);
        assert!((steps - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_elapsed_clamped() {
        assert_eq!(frame_steps(-10.0, 250.0, 1.0), 0.0);
        assert_eq!(frame_steps(f64::NAN, 250.0, 1.0), 0.0);
        let clamped = frame_steps(10_000.0, 250.0, 1.0);
        assert!((clamped - 15.0).abs() < 1e-4);
    }

    #[test]
    fn test_wrap_right_edge_reenters_left() {
        assert_eq!(wrap(100.0, 100.0), 0.0);
        assert!((wrap(100.5, 100.0) - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_wrap_left_edge_reenters_right() {
        assert!((wrap(-0.5, 100.0) - 99.5).abs() < 1e-5);
        let tiny = wrap(-1e-9, 100.0);
        assert!((0.0..100.0).contains(&tiny));
    }

    #[test]
    fn test_wrap_with_margin_range() {
        assert!((wrap_with_margin(350.0, 300.0, 50.0) - -50.0).abs() < 1e-4);
        assert!((wrap_with_margin(-51.0, 300.0, 50.0) - 349.0).abs() < 1e-4);
        assert!((wrap_with_margin(360.0, 300.0, 50.0) - -40.0).abs() < 1e-4);
        assert!((wrap_with_margin(120.0, 300.0, 50.0) - 120.0).abs() < 1e-4);
    }
}
