//! Easing and opacity curves

/// Cubic ease-out: fast start, gentle arrival
#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv * inv
}

/// Normalized progress of a timer, clamped to [0, 1]
#[inline]
pub fn progress(elapsed_ms: f64, duration_ms: f64) -> f32 {
    if duration_ms <= 0.0 {
        return 1.0;
    }
    (elapsed_ms / duration_ms).clamp(0.0, 1.0) as f32
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Fade out linearly, reaching zero at `fade_end`
#[inline]
pub fn fade_out(t: f32, fade_end: f32) -> f32 {
    (1.0 - t / fade_end).max(0.0)
}

/// Fade in linearly, reaching one at `fade_end`
#[inline]
pub fn fade_in(t: f32, fade_end: f32) -> f32 {
    (t / fade_end).min(1.0)
}

/// Ramp up to `peak` by `peak_at`, then back down to zero at t = 1
pub fn flash(t: f32, peak_at: f32, peak: f32) -> f32 {
    if t < peak_at {
        t / peak_at * peak
    } else {
        peak * (1.0 - (t - peak_at) / (1.0 - peak_at)).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_endpoints() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert!((ease_out_cubic(0.5) - 0.875).abs() < 1e-6);
        // Ease-out runs ahead of linear
        assert!(ease_out_cubic(0.3) > 0.3);
    }

    #[test]
    fn test_progress_clamps() {
        assert_eq!(progress(-5.0, 100.0), 0.0);
        assert_eq!(progress(250.0, 100.0), 1.0);
        assert_eq!(progress(10.0, 0.0), 1.0);
        assert!((progress(25.0, 100.0) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_flash_shape() {
        assert_eq!(flash(0.0, 0.2, 0.5), 0.0);
        assert!((flash(0.2, 0.2, 0.5) - 0.5).abs() < 1e-6);
        assert!((flash(0.6, 0.2, 0.5) - 0.25).abs() < 1e-6);
        assert_eq!(flash(1.0, 0.2, 0.5), 0.0);
    }

    #[test]
    fn test_fades() {
        assert_eq!(fade_out(0.85, 0.85), 0.0);
        assert_eq!(fade_out(1.0, 0.85), 0.0);
        assert_eq!(fade_in(0.4, 0.4), 1.0);
        assert!((fade_in(0.2, 0.4) - 0.5).abs() < 1e-6);
    }
}
