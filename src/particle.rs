//! Particle and line data.

use glam::{Vec2, Vec4};

/// A point in the field.
///
/// Positions are unconstrained once modifiers have run; particles may leave
/// the lattice bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    /// RGBA, each channel `0.0..=1.0`. `None` means "use the renderer's default".
    pub color: Option<Vec4>,
}

impl Particle {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            color: None,
        }
    }
}

/// A link between two neighboring particles on the same lattice row.
///
/// Endpoints are indices into the owning grid's particle storage, so a line
/// always follows its particles as they move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Line {
    pub a: usize,
    pub b: usize,
}

impl Line {
    /// Resolve both endpoints against live particle storage.
    ///
    /// Returns `None` if either index is out of range.
    pub fn endpoints(&self, particles: &[Particle]) -> Option<(Vec2, Vec2)> {
        let a = particles.get(self.a)?;
        let b = particles.get(self.b)?;
        Some((a.position, b.position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_tracks_live_positions() {
        let mut particles = vec![Particle::new(0.0, 0.0), Particle::new(10.0, 0.0)];
        let line = Line { a: 0, b: 1 };

        particles[1].position.y = 7.0;
        let (a, b) = line.endpoints(&particles).unwrap();
        assert_eq!(a, Vec2::ZERO);
        assert_eq!(b, Vec2::new(10.0, 7.0));
    }

    #[test]
    fn test_line_out_of_range() {
        let particles = vec![Particle::new(0.0, 0.0)];
        assert!(Line { a: 0, b: 3 }.endpoints(&particles).is_none());
    }
}
