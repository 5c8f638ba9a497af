//! Modifiers: the forces a pointer interaction applies to the field.
//!
//! Each modifier is a pure transformation of particle positions or colors
//! given the pointer, the whole particle set, and the indices currently
//! inside the pointer. Modifiers never add or remove particles.
//!
//! Radial modifiers measure `offset = particle - pointer` and use
//! `d = max(epsilon, |offset|)` so that particles sitting on the pointer
//! center do not blow up.
//!
//! | Modifier | Set | Effect |
//! |----------|-----|--------|
//! | [`Modifier::JitterVertical`] | inside | `y += U[0, 10)` |
//! | [`Modifier::JitterBoth`] | inside | `x += U[-5, 5)`, `y -= U[-5, 5)` |
//! | [`Modifier::Implode`] | inside or all | `pos -= offset * radius / d²` |
//! | [`Modifier::Explode`] | inside | `pos += offset * radius / d²` |
//! | [`Modifier::ColorShift`] | inside | teal to magenta by distance |

use glam::Vec2;
use rand::Rng;

use crate::color::{hsv_to_rgb, lerp, with_alpha};
use crate::particle::Particle;
use crate::pointer::Pointer;

/// Default distance floor for radial modifiers.
pub const DEFAULT_EPSILON: f32 = 1.0;

/// Which particles a modifier operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Target {
    /// Only particles inside the pointer (default).
    #[default]
    Inside,
    /// Every particle in the field.
    All,
}

/// A named force applied to the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    /// Push particles down by a random amount in `[0, 10)`.
    JitterVertical,
    /// Shake particles on both axes by up to 5 units.
    JitterBoth,
    /// Pull particles toward the pointer center, harder the closer they are.
    ///
    /// With [`Target::All`] the whole field is pulled, not just the ring.
    Implode { target: Target },
    /// Push particles away from the pointer center. Mirror of `Implode`.
    Explode,
    /// Recolor particles by normalized distance from the center.
    ColorShift,
}

impl Modifier {
    /// Stable, human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Modifier::JitterVertical => "jitter-vertical",
            Modifier::JitterBoth => "jitter-both",
            Modifier::Implode { target: Target::Inside } => "implode",
            Modifier::Implode { target: Target::All } => "implode-all",
            Modifier::Explode => "explode",
            Modifier::ColorShift => "color-shift",
        }
    }

    /// The particle set this modifier writes to.
    pub fn target(&self) -> Target {
        match self {
            Modifier::Implode { target } => *target,
            _ => Target::Inside,
        }
    }

    /// Apply the modifier in place.
    ///
    /// `inside` holds indices into `particles`; out-of-range indices are skipped.
    pub fn apply<R: Rng + ?Sized>(
        &self,
        pointer: &Pointer,
        particles: &mut [Particle],
        inside: &[usize],
        epsilon: f32,
        rng: &mut R,
    ) {
        match self {
            Modifier::JitterVertical => {
                for_each(particles, inside, |p| {
                    p.position.y += rng.gen_range(0.0..10.0);
                });
            }
            Modifier::JitterBoth => {
                for_each(particles, inside, |p| {
                    p.position.x += rng.gen_range(-5.0..5.0);
                    p.position.y -= rng.gen_range(-5.0..5.0);
                });
            }
            Modifier::Implode { target } => {
                let pull = |p: &mut Particle| {
                    p.position -= radial_push(pointer, p.position, epsilon);
                };
                match target {
                    Target::Inside => for_each(particles, inside, pull),
                    Target::All => particles.iter_mut().for_each(pull),
                }
            }
            Modifier::Explode => {
                for_each(particles, inside, |p| {
                    p.position += radial_push(pointer, p.position, epsilon);
                });
            }
            Modifier::ColorShift => {
                for_each(particles, inside, |p| {
                    let (_, d) = radial_offset(pointer, p.position, epsilon);
                    let ratio = d / pointer.radius();
                    let hue = 360.0 * lerp(0.5, 0.833, ratio);
                    p.color = Some(with_alpha(hsv_to_rgb(hue, ratio, 1.0), 1.0));
                });
            }
        }
    }
}

fn for_each(particles: &mut [Particle], indices: &[usize], mut f: impl FnMut(&mut Particle)) {
    for &i in indices {
        if let Some(p) = particles.get_mut(i) {
            f(p);
        }
    }
}

/// Offset from the pointer center and its floored length.
fn radial_offset(pointer: &Pointer, position: Vec2, epsilon: f32) -> (Vec2, f32) {
    let offset = position - pointer.position;
    (offset, offset.length().max(epsilon))
}

/// `offset / (d² / radius)`: magnitude `radius / d` along the offset.
fn radial_push(pointer: &Pointer, position: Vec2, epsilon: f32) -> Vec2 {
    let (offset, d) = radial_offset(pointer, position, epsilon);
    offset / ((d * d) / pointer.radius())
}

/// Ordered list of modifiers with one active entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModifierRegistry {
    modifiers: Vec<Modifier>,
    active: usize,
}

impl Default for ModifierRegistry {
    /// Jitter-vertical, jitter-both, implode, explode.
    fn default() -> Self {
        Self::new(vec![
            Modifier::JitterVertical,
            Modifier::JitterBoth,
            Modifier::Implode {
                target: Target::Inside,
            },
            Modifier::Explode,
        ])
    }
}

impl ModifierRegistry {
    /// Create a registry. The first modifier starts active.
    pub fn new(modifiers: Vec<Modifier>) -> Self {
        Self {
            modifiers,
            active: 0,
        }
    }

    /// The default set followed by color-shift.
    pub fn with_color_shift() -> Self {
        let mut registry = Self::default();
        registry.modifiers.push(Modifier::ColorShift);
        registry
    }

    pub fn active(&self) -> Option<Modifier> {
        self.modifiers.get(self.active).copied()
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Advance to the next modifier, wrapping at the end.
    pub fn cycle(&mut self) -> Option<Modifier> {
        if self.modifiers.is_empty() {
            return None;
        }
        self.active = (self.active + 1) % self.modifiers.len();
        self.active()
    }

    /// Jump to a modifier by position. Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) -> Option<Modifier> {
        if index < self.modifiers.len() {
            self.active = index;
        }
        self.active()
    }

    pub fn len(&self) -> usize {
        self.modifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modifiers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Modifier> {
        self.modifiers.iter()
    }
}
