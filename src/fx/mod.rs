//! Animation layer - visual-only interpolation driven once per tick
//!
//! Tasks interpolate position, scale, opacity and rotation through the
//! `Renderer` port. None of them can touch the grid: logical mutations
//! happen synchronously in the core and the visuals catch up here.

mod scheduler;
mod task;

pub use scheduler::Scheduler;
pub use task::AnimTask;

/// 2D point in grid units
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn lerp(from: Vec2, to: Vec2, t: f32) -> Vec2 {
        Vec2 {
            x: from.x + (to.x - from.x) * t,
            y: from.y + (to.y - from.y) * t,
        }
    }
}

/// Visual position of a grid cell
pub fn cell_center(x: i8, y: i8) -> Vec2 {
    Vec2::new(x as f32, y as f32)
}

/// Quadratic ease-out: fast start, smooth stop
pub fn ease_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * (2.0 - t)
}

/// Cubic ease-out
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Falling curve: cubic ease-out with a small damped bounce near the end,
/// landing exactly at 1.0
pub fn fall_curve(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    let base = ease_out_cubic(t);
    if t > 0.8 {
        let bounce_t = (t - 0.8) / 0.2;
        base - (bounce_t * std::f32::consts::PI).sin() * 0.08
    } else {
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(4.0, -2.0);
        assert_eq!(Vec2::lerp(a, b, 0.0), a);
        assert_eq!(Vec2::lerp(a, b, 1.0), b);
        assert_eq!(Vec2::lerp(a, b, 0.5), Vec2::new(2.0, -1.0));
    }

    #[test]
    fn test_easing_endpoints() {
        for ease in [ease_out_quad, ease_out_cubic, fall_curve] {
            assert!(ease(0.0).abs() < 1e-6);
            assert!((ease(1.0) - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_easing_clamps_out_of_range() {
        assert_eq!(ease_out_quad(-1.0), 0.0);
        assert_eq!(ease_out_quad(2.0), 1.0);
        assert_eq!(fall_curve(2.0), 1.0);
    }

    #[test]
    fn test_fall_curve_dips_before_landing() {
        // The bounce pulls below the plain cubic in the last stretch
        assert!(fall_curve(0.9) < ease_out_cubic(0.9));
    }
}
