//! Read-only snapshot handed to renderers after each update.

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec4};

use crate::particle::{Line, Particle};
use crate::pointer::Pointer;

/// Borrowed view of the field: particles, lines and pointer.
///
/// A `Scene` borrows the session immutably, so it cannot outlive the next
/// mutation.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub particles: &'a [Particle],
    pub lines: &'a [Line],
    pub pointer: &'a Pointer,
    /// Extent of the drawing area.
    pub size: Vec2,
}

/// Vertex layout for GPU or vector renderers.
///
/// `PointVertex` is `Pod`, so a vertex list can be handed to a graphics API
/// as raw bytes without copying:
///
/// ```ignore
/// let vertices = session.scene().particle_vertices(style.particle);
/// queue.write_buffer(&vertex_buffer, 0, bytemuck::cast_slice(&vertices));
/// ```
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct PointVertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl<'a> Scene<'a> {
    /// Live endpoint positions of every line.
    pub fn line_segments(&self) -> impl Iterator<Item = (Vec2, Vec2)> + 'a {
        let (particles, lines) = (self.particles, self.lines);
        lines
            .iter()
            .filter_map(move |line| line.endpoints(particles))
    }

    /// One vertex per particle. Uncolored particles use `default_color`.
    pub fn particle_vertices(&self, default_color: Vec4) -> Vec<PointVertex> {
        self.particles
            .iter()
            .map(|p| PointVertex {
                position: p.position.to_array(),
                color: p.color.unwrap_or(default_color).to_array(),
            })
            .collect()
    }

    /// Two vertices per line, suitable for a line-list primitive.
    pub fn line_vertices(&self, color: Vec4) -> Vec<PointVertex> {
        let color = color.to_array();
        self.line_segments()
            .flat_map(|(a, b)| {
                [
                    PointVertex {
                        position: a.to_array(),
                        color,
                    },
                    PointVertex {
                        position: b.to_array(),
                        color,
                    },
                ]
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertices() {
        let mut particles = vec![Particle::new(1.0, 2.0), Particle::new(3.0, 4.0)];
        particles[1].color = Some(Vec4::new(1.0, 0.0, 0.0, 1.0));
        let lines = vec![Line { a: 0, b: 1 }];
        let pointer = Pointer::default();
        let scene = Scene {
            particles: &particles,
            lines: &lines,
            pointer: &pointer,
            size: Vec2::new(10.0, 10.0),
        };

        let points = scene.particle_vertices(Vec4::ONE);
        assert_eq!(points[0].color, [1.0; 4]);
        assert_eq!(points[1].color, [1.0, 0.0, 0.0, 1.0]);

        let segments = scene.line_vertices(Vec4::ONE);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[1].position, [3.0, 4.0]);

        let bytes: &[u8] = bytemuck::cast_slice(&segments);
        assert_eq!(bytes.len(), 2 * 6 * 4);
    }
}
