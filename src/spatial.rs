//! Containment queries: which particles lie inside the pointer.
//!
//! [`particles_inside`] is a full scan, O(n) per call. For the grid sizes the
//! field is built for (low thousands) that fits easily in a frame. Larger
//! fields can use [`BucketGrid`], a uniform-cell index that returns the same
//! indices in the same order.

use std::collections::HashMap;

use glam::Vec2;

use crate::particle::Particle;
use crate::pointer::Pointer;

/// Strict containment: points exactly on the circle are outside.
#[inline]
pub fn contains(center: Vec2, radius: f32, position: Vec2) -> bool {
    position.distance(center) < radius
}

/// Indices (ascending) of all particles strictly inside the pointer.
pub fn particles_inside(pointer: &Pointer, particles: &[Particle]) -> Vec<usize> {
    particles
        .iter()
        .enumerate()
        .filter(|(_, p)| contains(pointer.position, pointer.radius(), p.position))
        .map(|(i, _)| i)
        .collect()
}

/// How a session answers containment queries.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum QueryStrategy {
    /// Full scan of every particle (default).
    #[default]
    Scan,
    /// Uniform bucket index with the given cell size.
    Bucketed { cell_size: f32 },
}

type CellKey = (i32, i32);

/// Uniform-cell spatial index over particle positions.
///
/// The index stores indices, not positions, so it has to be told which
/// particles moved via [`BucketGrid::refresh`].
#[derive(Debug, Clone)]
pub struct BucketGrid {
    cell_size: f32,
    cells: HashMap<CellKey, Vec<usize>>,
    /// Cell each particle is currently filed under.
    keys: Vec<CellKey>,
}

impl BucketGrid {
    /// Index every particle. Non-positive or non-finite cell sizes fall back to 1.
    pub fn new(cell_size: f32, particles: &[Particle]) -> Self {
        let cell_size = if cell_size.is_finite() && cell_size > 0.0 {
            cell_size
        } else {
            1.0
        };
        let mut grid = Self {
            cell_size,
            cells: HashMap::new(),
            keys: Vec::with_capacity(particles.len()),
        };
        for (i, p) in particles.iter().enumerate() {
            let key = grid.key(p.position);
            grid.keys.push(key);
            grid.cells.entry(key).or_default().push(i);
        }
        grid
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    fn key(&self, position: Vec2) -> CellKey {
        let cell = (position / self.cell_size).floor();
        (saturate(cell.x), saturate(cell.y))
    }

    /// Re-file the given particles after they moved.
    pub fn refresh(&mut self, indices: &[usize], particles: &[Particle]) {
        for &i in indices {
            let (Some(p), Some(&old)) = (particles.get(i), self.keys.get(i)) else {
                continue;
            };
            let new = self.key(p.position);
            if new == old {
                continue;
            }
            if let Some(bucket) = self.cells.get_mut(&old) {
                bucket.retain(|&j| j != i);
                if bucket.is_empty() {
                    self.cells.remove(&old);
                }
            }
            self.cells.entry(new).or_default().push(i);
            self.keys[i] = new;
        }
    }

    /// Same result as [`particles_inside`], visiting only nearby cells.
    pub fn query(&self, pointer: &Pointer, particles: &[Particle]) -> Vec<usize> {
        let center = pointer.position;
        let radius = pointer.radius();
        let (min_x, min_y) = self.key(center - Vec2::splat(radius));
        let (max_x, max_y) = self.key(center + Vec2::splat(radius));

        let hit = |i: &usize| {
            particles
                .get(*i)
                .is_some_and(|p| contains(center, radius, p.position))
        };

        let mut inside = Vec::new();
        let span = (max_x as i64 - min_x as i64 + 1) * (max_y as i64 - min_y as i64 + 1);
        if span > self.cells.len() as i64 {
            // Fewer occupied cells than cells under the ring: walk the occupied ones.
            for (&(cx, cy), bucket) in &self.cells {
                if (min_x..=max_x).contains(&cx) && (min_y..=max_y).contains(&cy) {
                    inside.extend(bucket.iter().copied().filter(hit));
                }
            }
        } else {
            for cx in min_x..=max_x {
                for cy in min_y..=max_y {
                    if let Some(bucket) = self.cells.get(&(cx, cy)) {
                        inside.extend(bucket.iter().copied().filter(hit));
                    }
                }
            }
        }
        inside.sort_unstable();
        inside
    }
}

fn saturate(v: f32) -> i32 {
    if v.is_nan() {
        0
    } else {
        v.clamp(i32::MIN as f32, i32::MAX as f32) as i32
    }
}
