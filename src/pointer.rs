//! The pointer: a circular region of influence following the cursor.

use glam::Vec2;

/// Inclusive range the pointer radius is clamped to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadiusBounds {
    min: f32,
    max: f32,
}

impl Default for RadiusBounds {
    fn default() -> Self {
        Self {
            min: 10.0,
            max: 200.0,
        }
    }
}

impl RadiusBounds {
    /// Create bounds, swapping the arguments if they are given in the wrong order.
    ///
    /// A non-finite end falls back to the default bound on that side.
    pub fn new(min: f32, max: f32) -> Self {
        let fallback = Self::default();
        let min = if min.is_finite() { min } else { fallback.min };
        let max = if max.is_finite() { max } else { fallback.max };
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    /// Clamp a finite radius into the bounds.
    #[inline]
    pub fn clamp(&self, radius: f32) -> f32 {
        radius.max(self.min).min(self.max)
    }
}

/// Whether a button is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerMode {
    /// No button held; the pointer ring just follows the cursor.
    #[default]
    Idle,
    /// Button held since the last down event.
    Dragging,
}

/// Pointer position, radius and mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointer {
    pub position: Vec2,
    radius: f32,
    bounds: RadiusBounds,
    pub mode: PointerMode,
}

impl Default for Pointer {
    fn default() -> Self {
        Self::new(100.0, RadiusBounds::default())
    }
}

impl Pointer {
    /// Create a pointer at the origin. The radius is clamped to `bounds`.
    pub fn new(radius: f32, bounds: RadiusBounds) -> Self {
        Self {
            position: Vec2::ZERO,
            radius: if radius.is_finite() {
                bounds.clamp(radius)
            } else {
                bounds.max
            },
            bounds,
            mode: PointerMode::Idle,
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn bounds(&self) -> RadiusBounds {
        self.bounds
    }

    /// Set the radius, clamped to the bounds. Non-finite values are ignored.
    pub fn set_radius(&mut self, radius: f32) {
        if radius.is_finite() {
            self.radius = self.bounds.clamp(radius);
        }
    }

    /// Apply a wheel delta. Positive deltas (scrolling down) shrink the ring.
    pub fn apply_wheel(&mut self, delta: f32) {
        self.set_radius(self.radius - delta);
    }

    pub fn is_dragging(&self) -> bool {
        self.mode == PointerMode::Dragging
    }
}

/// Round a position to the nearest multiple of `step` on each axis.
///
/// Axes with a non-positive step are left untouched.
pub fn snap(position: Vec2, step: Vec2) -> Vec2 {
    let axis = |v: f32, s: f32| if s > 0.0 { (v / s).round() * s } else { v };
    Vec2::new(axis(position.x, step.x), axis(position.y, step.y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_radius_clamped() {
        let p = Pointer::new(1000.0, RadiusBounds::new(10.0, 200.0));
        assert_eq!(p.radius(), 200.0);
        let p = Pointer::new(1.0, RadiusBounds::new(10.0, 200.0));
        assert_eq!(p.radius(), 10.0);
    }

    #[test]
    fn test_wheel_extremes() {
        let mut p = Pointer::default();
        p.apply_wheel(-1e6);
        assert_eq!(p.radius(), 200.0);
        p.apply_wheel(1e6);
        assert_eq!(p.radius(), 10.0);
    }

    #[test]
    fn test_wheel_sequence_stays_in_bounds() {
        let mut p = Pointer::new(100.0, RadiusBounds::new(10.0, 500.0));
        for delta in [120.0, -3.0, -900.0, 55.5, 1.0, -0.25, 480.0, -100.0] {
            p.apply_wheel(delta);
            assert!(p.radius() >= 10.0 && p.radius() <= 500.0);
        }
    }

    #[test]
    fn test_bounds_swap() {
        let b = RadiusBounds::new(300.0, 20.0);
        assert_eq!(b.min(), 20.0);
        assert_eq!(b.max(), 300.0);
    }

    #[test]
    fn test_non_finite_wheel_ignored() {
        let mut p = Pointer::default();
        p.apply_wheel(f32::NAN);
        assert_eq!(p.radius(), 100.0);
        p.apply_wheel(f32::INFINITY);
        assert_eq!(p.radius(), 100.0);
        p.apply_wheel(f32::NEG_INFINITY);
        assert_eq!(p.radius(), 100.0);
    }

    #[test]
    fn test_non_finite_bounds_fall_back() {
        let b = RadiusBounds::new(f32::NAN, 300.0);
        assert_eq!((b.min(), b.max()), (10.0, 300.0));
        let b = RadiusBounds::new(5.0, f32::INFINITY);
        assert_eq!((b.min(), b.max()), (5.0, 200.0));

        let p = Pointer::new(f32::NAN, RadiusBounds::new(f32::NAN, f32::NAN));
        assert_eq!(p.radius(), 200.0);
        assert!(p.radius() >= p.bounds().min() && p.radius() <= p.bounds().max());
    }

    #[test]
    fn test_inverted_bounds_never_panic() {
        let mut p = Pointer::new(500.0, RadiusBounds::new(200.0, 10.0));
        assert_eq!(p.radius(), 200.0);
        p.apply_wheel(1e9);
        assert_eq!(p.radius(), 10.0);
    }

    #[test]
    fn test_snap() {
        assert_eq!(snap(Vec2::new(14.0, 16.0), Vec2::splat(10.0)), Vec2::new(10.0, 20.0));
        assert_eq!(snap(Vec2::new(-4.0, 25.0), Vec2::new(10.0, 0.0)), Vec2::new(0.0, 25.0));
    }
}
