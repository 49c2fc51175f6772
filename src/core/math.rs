// Math utilities and helper functions

/// Linear interpolation
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Quadratic ease-out: fast start, settles at 1.0
pub fn ease_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Remaining fraction of a decaying offset, 1.0 at `t = 0` and 0.0 at `t = 1`
pub fn decay_out_quad(t: f32) -> f32 {
    1.0 - ease_out_quad(t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(0.0, 10.0, 0.0), 0.0);
        assert_eq!(lerp(0.0, 10.0, 1.0), 10.0);
        assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
    }

    #[test]
    fn test_ease_out_endpoints() {
        assert_eq!(ease_out_quad(0.0), 0.0);
        assert_eq!(ease_out_quad(1.0), 1.0);
        assert_eq!(ease_out_quad(2.0), 1.0);
        assert!(ease_out_quad(0.5) > 0.5);
    }

    #[test]
    fn test_decay_reaches_zero() {
        assert_eq!(decay_out_quad(0.0), 1.0);
        assert_eq!(decay_out_quad(1.0), 0.0);
    }
}
