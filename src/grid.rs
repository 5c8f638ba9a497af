//! Particle grid construction.
//!
//! The grid samples a regular lattice, optionally filtered by a [`Mask`], and
//! links consecutive surviving points on each row with [`Line`]s.
//!
//! ```ignore
//! let grid = ParticleGrid::build(&GridConfig::default(), None);
//! assert_eq!(grid.particles().len(), 60 * 60);
//! ```

use crate::mask::Mask;
use crate::particle::{Line, Particle};

/// Lattice configuration.
///
/// The two axes and their step sizes are independent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridConfig {
    /// Exclusive bound of the x axis.
    pub width: f32,
    /// Exclusive bound of the y axis.
    pub height: f32,
    pub step_x: f32,
    pub step_y: f32,
    /// First x coordinate of every row.
    pub offset_x: f32,
    /// First row's y coordinate.
    pub offset_y: f32,
    /// Mask samples below this value (0-255) produce a particle.
    pub threshold: u8,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 600.0,
            step_x: 10.0,
            step_y: 10.0,
            offset_x: 5.0,
            offset_y: 5.0,
            threshold: 20,
        }
    }
}

impl GridConfig {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Set the lattice pitch on both axes.
    pub fn with_step(mut self, step_x: f32, step_y: f32) -> Self {
        self.step_x = step_x;
        self.step_y = step_y;
        self
    }

    /// Set the lattice origin.
    pub fn with_offset(mut self, offset_x: f32, offset_y: f32) -> Self {
        self.offset_x = offset_x;
        self.offset_y = offset_y;
        self
    }

    /// Set the mask darkness threshold.
    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }

    /// Number of lattice columns (before masking).
    pub fn columns(&self) -> usize {
        axis_count(self.offset_x, self.width, self.step_x)
    }

    /// Number of lattice rows (before masking).
    pub fn rows(&self) -> usize {
        axis_count(self.offset_y, self.height, self.step_y)
    }

    /// Lattice coordinate of column `i`.
    fn column_x(&self, i: usize) -> f32 {
        self.offset_x + i as f32 * self.step_x
    }

    /// Lattice coordinate of row `j`.
    fn row_y(&self, j: usize) -> f32 {
        self.offset_y + j as f32 * self.step_y
    }
}

/// Count of `offset + k * step` values strictly below `bound`.
fn axis_count(offset: f32, bound: f32, step: f32) -> usize {
    if !(step > 0.0) || !(offset < bound) {
        return 0;
    }
    let mut n = ((bound - offset) / step).ceil() as usize;
    // Guard against float rounding putting the last point on the bound.
    while n > 0 && offset + (n - 1) as f32 * step >= bound {
        n -= 1;
    }
    n
}

/// The particle set and the lines connecting row neighbors.
///
/// Particle count and line topology are fixed once built.
#[derive(Debug, Clone, Default)]
pub struct ParticleGrid {
    particles: Vec<Particle>,
    lines: Vec<Line>,
}

impl ParticleGrid {
    /// Build a grid from a lattice, keeping only points the mask marks as dark.
    ///
    /// Without a mask every lattice point becomes a particle.
    pub fn build(config: &GridConfig, mask: Option<&Mask>) -> Self {
        let mut grid = Self::default();
        grid.extend_from_lattice(config, mask);
        log::info!(
            "Built particle grid: {} particles, {} lines ({}x{} lattice, masked: {})",
            grid.particles.len(),
            grid.lines.len(),
            config.columns(),
            config.rows(),
            mask.is_some()
        );
        grid
    }

    /// Append a lattice's particles and lines to this grid.
    ///
    /// Calling this more than once stacks duplicate particles on the same
    /// lattice points.
    pub fn extend_from_lattice(&mut self, config: &GridConfig, mask: Option<&Mask>) {
        let columns = config.columns();
        let rows = config.rows();

        self.particles.reserve(columns * rows);
        self.lines.reserve(rows * columns.saturating_sub(1));

        for j in 0..rows {
            let y = config.row_y(j);
            // Index of the last kept particle in the current unbroken run.
            let mut previous: Option<usize> = None;

            for i in 0..columns {
                let x = config.column_x(i);

                if !is_included(config, mask, x, y) {
                    previous = None;
                    continue;
                }

                let index = self.particles.len();
                self.particles.push(Particle::new(x, y));
                if let Some(a) = previous {
                    self.lines.push(Line { a, b: index });
                }
                previous = Some(index);
            }
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

fn is_included(config: &GridConfig, mask: Option<&Mask>, x: f32, y: f32) -> bool {
    match mask {
        None => true,
        Some(mask) => mask
            .sample_scaled(x, y, config.width, config.height)
            .is_some_and(|sample| sample < config.threshold),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_lattice_dimensions() {
        let config = GridConfig::default();
        assert_eq!(config.columns(), 60);
        assert_eq!(config.rows(), 60);
    }

    #[test]
    fn test_axis_count_exclusive_bound() {
        assert_eq!(axis_count(0.0, 100.0, 10.0), 10);
        assert_eq!(axis_count(5.0, 100.0, 10.0), 10);
        assert_eq!(axis_count(0.0, 101.0, 10.0), 11);
        assert_eq!(axis_count(100.0, 100.0, 10.0), 0);
        assert_eq!(axis_count(0.0, 100.0, 0.0), 0);
        assert_eq!(axis_count(0.0, 100.0, -1.0), 0);
    }

    #[test]
    fn test_unmasked_grid_counts() {
        let config = GridConfig::new(100.0, 50.0).with_step(10.0, 5.0).with_offset(0.0, 0.0);
        let grid = ParticleGrid::build(&config, None);
        assert_eq!(grid.len(), 10 * 10);
        assert_eq!(grid.lines().len(), 10 * 9);
    }

    #[test]
    fn test_row_major_order() {
        let config = GridConfig::new(30.0, 20.0).with_offset(5.0, 5.0);
        let grid = ParticleGrid::build(&config, None);
        let positions: Vec<(f32, f32)> = grid
            .particles()
            .iter()
            .map(|p| (p.position.x, p.position.y))
            .collect();
        assert_eq!(
            positions,
            vec![(5.0, 5.0), (15.0, 5.0), (25.0, 5.0), (5.0, 15.0), (15.0, 15.0), (25.0, 15.0)]
        );
    }

    #[test]
    fn test_lines_do_not_wrap_rows() {
        let config = GridConfig::new(30.0, 20.0).with_offset(5.0, 5.0);
        let grid = ParticleGrid::build(&config, None);
        assert_eq!(
            grid.lines(),
            &[Line { a: 0, b: 1 }, Line { a: 1, b: 2 }, Line { a: 3, b: 4 }, Line { a: 4, b: 5 }]
        );
    }

    #[test]
    fn test_mask_gap_breaks_chain() {
        // 4x1 mask over a 40x10 region: columns 0,1 dark, 2 bright, 3 dark.
        let mask = Mask::from_samples(vec![0, 0, 255, 0], 4, 1).unwrap();
        let config = GridConfig::new(40.0, 10.0).with_offset(5.0, 5.0);
        let grid = ParticleGrid::build(&config, Some(&mask));

        let xs: Vec<f32> = grid.particles().iter().map(|p| p.position.x).collect();
        assert_eq!(xs, vec![5.0, 15.0, 35.0]);
        assert_eq!(grid.lines(), &[Line { a: 0, b: 1 }]);
    }

    #[test]
    fn test_threshold_is_strict() {
        let mask = Mask::from_samples(vec![19, 20, 21], 3, 1).unwrap();
        let config = GridConfig::new(30.0, 10.0).with_offset(5.0, 5.0);
        let grid = ParticleGrid::build(&config, Some(&mask));
        assert_eq!(grid.len(), 1);
        assert_eq!(grid.particles()[0].position.x, 5.0);

        let lenient = ParticleGrid::build(&config.with_threshold(22), Some(&mask));
        assert_eq!(lenient.len(), 3);
    }

    #[test]
    fn test_extend_appends() {
        let config = GridConfig::new(20.0, 10.0).with_offset(0.0, 0.0);
        let mut grid = ParticleGrid::build(&config, None);
        grid.extend_from_lattice(&config, None);
        assert_eq!(grid.len(), 4);
        assert_eq!(grid.lines(), &[Line { a: 0, b: 1 }, Line { a: 2, b: 3 }]);
    }
}
