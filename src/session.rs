//! Session: the pointer interaction state machine.
//!
//! A [`Session`] owns the particle grid, the pointer and the modifier
//! registry. Event handlers call its transition methods (or
//! [`Session::handle`]) and get back a [`RenderRequest`] telling them what, if
//! anything, to draw next.
//!
//! ```ignore
//! let mut session = Session::builder()
//!     .with_grid(GridConfig::default())
//!     .with_snapping(true)
//!     .build();
//!
//! if session.pointer_down(Vec2::new(300.0, 300.0)) == RenderRequest::Scene {
//!     draw_scene(&session.scene(), &style, &mut renderer);
//! }
//! ```
//!
//! | State | Event | Effect |
//! |-------|-------|--------|
//! | any | `Down(p)` | enter `Dragging`, move to `p`, apply modifier, render |
//! | `Dragging` | `Move(p)` | move, apply modifier, render |
//! | `Idle` | `Move(p)` | move, apply modifier only with [`HoverMode::ApplyModifier`], render |
//! | any | `Up` | enter `Idle` |
//! | any | `Wheel(d)` | `radius -= d`, clamped, render |
//! | any | `CycleModifier` | advance the active modifier |
//! | any | `SampleRender` | request a stochastic preview |

use std::path::Path;

use glam::Vec2;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::grid::{GridConfig, ParticleGrid};
use crate::mask::{Mask, MaskChannel};
use crate::modifier::{Modifier, ModifierRegistry, Target, DEFAULT_EPSILON};
use crate::particle::{Line, Particle};
use crate::pointer::{snap, Pointer, PointerMode, RadiusBounds};
use crate::scene::Scene;
use crate::spatial::{particles_inside, BucketGrid, QueryStrategy};

/// Input delivered by an event layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Vec2),
    Move(Vec2),
    Up,
    /// Wheel delta in browser convention: positive when scrolling down.
    Wheel(f32),
    CycleModifier,
    SampleRender,
}

/// What the caller should draw after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderRequest {
    /// Nothing changed visibly.
    None,
    /// Redraw the full scene.
    Scene,
    /// Paint a stochastic preview over the current frame.
    Preview,
}

/// What hovering (moving without a button held) does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoverMode {
    /// Only the pointer ring follows the cursor (default).
    #[default]
    Reposition,
    /// The active modifier is applied on every hover move, as while dragging.
    ApplyModifier,
}

/// Builder for [`Session`].
///
/// Use method chaining to configure, then call `.build()`.
pub struct SessionBuilder {
    grid: GridConfig,
    mask: Option<Mask>,
    bounds: RadiusBounds,
    radius: f32,
    hover: HoverMode,
    snapping: bool,
    epsilon: f32,
    modifiers: ModifierRegistry,
    query: QueryStrategy,
    seed: Option<u64>,
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            mask: None,
            bounds: RadiusBounds::default(),
            radius: 100.0,
            hover: HoverMode::default(),
            snapping: true,
            epsilon: DEFAULT_EPSILON,
            modifiers: ModifierRegistry::default(),
            query: QueryStrategy::default(),
            seed: None,
        }
    }
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the lattice the particles are sampled from.
    pub fn with_grid(mut self, grid: GridConfig) -> Self {
        self.grid = grid;
        self
    }

    /// Filter the lattice through a mask.
    pub fn with_mask(mut self, mask: Mask) -> Self {
        self.mask = Some(mask);
        self
    }

    /// Load a mask from an image file.
    ///
    /// A mask that fails to load is dropped with a warning and the full
    /// lattice is used instead.
    pub fn with_mask_file<P: AsRef<Path>>(mut self, path: P, channel: MaskChannel) -> Self {
        match Mask::from_file(path.as_ref(), channel) {
            Ok(mask) => self.mask = Some(mask),
            Err(e) => {
                log::warn!(
                    "Ignoring mask '{}': {}; using the full grid",
                    path.as_ref().display(),
                    e
                );
                self.mask = None;
            }
        }
        self
    }

    /// Set the range the pointer radius is clamped to.
    pub fn with_radius_bounds(mut self, min: f32, max: f32) -> Self {
        self.bounds = RadiusBounds::new(min, max);
        self
    }

    /// Set the starting pointer radius (clamped to the bounds).
    pub fn with_initial_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_hover_mode(mut self, hover: HoverMode) -> Self {
        self.hover = hover;
        self
    }

    /// Snap the pointer to the lattice pitch on every down and move (on by default).
    pub fn with_snapping(mut self, snapping: bool) -> Self {
        self.snapping = snapping;
        self
    }

    /// Distance floor for radial modifiers.
    pub fn with_epsilon(mut self, epsilon: f32) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_modifiers(mut self, modifiers: ModifierRegistry) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_query_strategy(mut self, query: QueryStrategy) -> Self {
        self.query = query;
        self
    }

    /// Seed the random source for reproducible jitter.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn build(self) -> Session {
        let grid = ParticleGrid::build(&self.grid, self.mask.as_ref());

        let index = match self.query {
            QueryStrategy::Scan => None,
            QueryStrategy::Bucketed { cell_size } => Some(BucketGrid::new(cell_size, grid.particles())),
        };

        let seed = self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(42)
        });

        let snap_step = self
            .snapping
            .then(|| Vec2::new(self.grid.step_x, self.grid.step_y));

        Session {
            size: Vec2::new(self.grid.width, self.grid.height),
            grid,
            pointer: Pointer::new(self.radius, self.bounds),
            modifiers: self.modifiers,
            index,
            hover: self.hover,
            snap_step,
            epsilon: self.epsilon,
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

/// One interactive field: particles, lines, pointer and modifiers.
pub struct Session {
    grid: ParticleGrid,
    pointer: Pointer,
    modifiers: ModifierRegistry,
    index: Option<BucketGrid>,
    hover: HoverMode,
    snap_step: Option<Vec2>,
    epsilon: f32,
    size: Vec2,
    rng: SmallRng,
}

impl Session {
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    /// Dispatch an event to its transition.
    pub fn handle(&mut self, event: PointerEvent) -> RenderRequest {
        match event {
            PointerEvent::Down(p) => self.pointer_down(p),
            PointerEvent::Move(p) => self.pointer_move(p),
            PointerEvent::Up => self.pointer_up(),
            PointerEvent::Wheel(d) => self.wheel(d),
            PointerEvent::CycleModifier => self.cycle_modifier(),
            PointerEvent::SampleRender => self.sample_render(),
        }
    }

    /// Start a drag at `position` and apply the active modifier once.
    pub fn pointer_down(&mut self, position: Vec2) -> RenderRequest {
        if !self.pointer.is_dragging() {
            log::debug!("pointer: idle -> dragging at {position}");
        }
        self.pointer.mode = PointerMode::Dragging;
        self.move_to(position);
        self.apply_active();
        RenderRequest::Scene
    }

    /// Follow the cursor; modify the field while dragging (or hovering, if configured).
    pub fn pointer_move(&mut self, position: Vec2) -> RenderRequest {
        self.move_to(position);
        if self.pointer.is_dragging() || self.hover == HoverMode::ApplyModifier {
            self.apply_active();
        }
        RenderRequest::Scene
    }

    /// End a drag.
    pub fn pointer_up(&mut self) -> RenderRequest {
        if self.pointer.is_dragging() {
            log::debug!("pointer: dragging -> idle");
        }
        self.pointer.mode = PointerMode::Idle;
        RenderRequest::None
    }

    /// Resize the pointer ring. Positive deltas shrink it.
    pub fn wheel(&mut self, delta: f32) -> RenderRequest {
        self.pointer.apply_wheel(delta);
        log::trace!("pointer radius: {}", self.pointer.radius());
        RenderRequest::Scene
    }

    /// Advance to the next modifier.
    pub fn cycle_modifier(&mut self) -> RenderRequest {
        if let Some(m) = self.modifiers.cycle() {
            log::debug!("active modifier: {}", m.name());
        }
        RenderRequest::None
    }

    pub fn sample_render(&mut self) -> RenderRequest {
        RenderRequest::Preview
    }

    fn move_to(&mut self, position: Vec2) {
        self.pointer.position = match self.snap_step {
            Some(step) => snap(position, step),
            None => position,
        };
    }

    fn apply_active(&mut self) {
        let Some(modifier) = self.modifiers.active() else {
            return;
        };
        let inside = self.inside();
        log::trace!(
            "{} at {}: {} particles inside",
            modifier.name(),
            self.pointer.position,
            inside.len()
        );

        modifier.apply(
            &self.pointer,
            self.grid.particles_mut(),
            &inside,
            self.epsilon,
            &mut self.rng,
        );

        if let Some(index) = self.index.as_mut() {
            refresh_index(index, modifier, &inside, self.grid.particles());
        }
    }

    /// Indices of particles strictly inside the pointer.
    pub fn inside(&self) -> Vec<usize> {
        match &self.index {
            Some(index) => index.query(&self.pointer, self.grid.particles()),
            None => particles_inside(&self.pointer, self.grid.particles()),
        }
    }

    /// Snapshot for renderers.
    pub fn scene(&self) -> Scene<'_> {
        Scene {
            particles: self.grid.particles(),
            lines: self.grid.lines(),
            pointer: &self.pointer,
            size: self.size,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        self.grid.particles()
    }

    pub fn lines(&self) -> &[Line] {
        self.grid.lines()
    }

    pub fn pointer(&self) -> &Pointer {
        &self.pointer
    }

    pub fn mode(&self) -> PointerMode {
        self.pointer.mode
    }

    pub fn modifiers(&self) -> &ModifierRegistry {
        &self.modifiers
    }

    pub fn active_modifier(&self) -> Option<Modifier> {
        self.modifiers.active()
    }

    pub fn hover_mode(&self) -> HoverMode {
        self.hover
    }

    /// Random source shared by modifiers, exposed for preview rendering.
    pub fn rng(&mut self) -> &mut SmallRng {
        &mut self.rng
    }
}

fn refresh_index(index: &mut BucketGrid, modifier: Modifier, inside: &[usize], particles: &[Particle]) {
    match modifier.target() {
        Target::Inside => index.refresh(inside, particles),
        Target::All => {
            let all: Vec<usize> = (0..particles.len()).collect();
            index.refresh(&all, particles);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::builder().with_seed(1).build()
    }

    fn positions(session: &Session) -> Vec<Vec2> {
        session.particles().iter().map(|p| p.position).collect()
    }

    #[test]
    fn test_down_enters_dragging_and_modifies() {
        let mut s = session();
        let before = positions(&s);
        assert_eq!(s.pointer_down(Vec2::new(300.0, 300.0)), RenderRequest::Scene);
        assert_eq!(s.mode(), PointerMode::Dragging);
        assert_eq!(s.pointer().position, Vec2::new(300.0, 300.0));
        assert_ne!(positions(&s), before);
    }

    #[test]
    fn test_hover_reposition_does_not_modify() {
        let mut s = session();
        let before = positions(&s);
        assert_eq!(s.pointer_move(Vec2::new(250.0, 250.0)), RenderRequest::Scene);
        assert_eq!(s.pointer().position, Vec2::new(250.0, 250.0));
        assert_eq!(positions(&s), before);
    }

    #[test]
    fn test_hover_apply_modifier() {
        let mut s = Session::builder()
            .with_seed(1)
            .with_hover_mode(HoverMode::ApplyModifier)
            .build();
        let before = positions(&s);
        s.pointer_move(Vec2::new(250.0, 250.0));
        assert_eq!(s.mode(), PointerMode::Idle);
        assert_ne!(positions(&s), before);
    }

    #[test]
    fn test_up_returns_to_idle() {
        let mut s = session();
        s.pointer_down(Vec2::new(100.0, 100.0));
        assert_eq!(s.pointer_up(), RenderRequest::None);
        assert_eq!(s.mode(), PointerMode::Idle);

        let before = positions(&s);
        s.pointer_move(Vec2::new(120.0, 100.0));
        assert_eq!(positions(&s), before);
    }

    #[test]
    fn test_snapping_on_by_default() {
        let mut s = session();
        s.pointer_move(Vec2::new(123.0, 456.7));
        assert_eq!(s.pointer().position, Vec2::new(120.0, 460.0));
        s.pointer_down(Vec2::new(77.0, 4.0));
        assert_eq!(s.pointer().position, Vec2::new(80.0, 0.0));
    }

    #[test]
    fn test_snapping_disabled() {
        let mut s = Session::builder().with_seed(1).with_snapping(false).build();
        s.pointer_move(Vec2::new(123.0, 456.7));
        assert_eq!(s.pointer().position, Vec2::new(123.0, 456.7));
    }

    #[test]
    fn test_non_finite_wheel_keeps_radius() {
        let mut s = session();
        assert_eq!(s.handle(PointerEvent::Wheel(f32::NAN)), RenderRequest::Scene);
        assert_eq!(s.pointer().radius(), 100.0);
        s.handle(PointerEvent::Wheel(f32::INFINITY));
        let r = s.pointer().radius();
        assert!(r >= s.pointer().bounds().min() && r <= s.pointer().bounds().max());
    }

    #[test]
    fn test_inverted_radius_bounds_build() {
        let mut s = Session::builder().with_radius_bounds(300.0, 20.0).with_initial_radius(f32::NAN).build();
        assert_eq!(s.pointer().radius(), 300.0);
        s.wheel(1e6);
        assert_eq!(s.pointer().radius(), 20.0);
    }

    #[test]
    fn test_wheel_clamps_in_any_state() {
        let mut s = Session::builder().with_radius_bounds(10.0, 500.0).build();
        assert_eq!(s.wheel(-10_000.0), RenderRequest::Scene);
        assert_eq!(s.pointer().radius(), 500.0);
        s.pointer_down(Vec2::ZERO);
        s.wheel(10_000.0);
        assert_eq!(s.pointer().radius(), 10.0);
    }

    #[test]
    fn test_cycle_modifier() {
        let mut s = session();
        assert_eq!(s.active_modifier(), Some(Modifier::JitterVertical));
        assert_eq!(s.cycle_modifier(), RenderRequest::None);
        assert_eq!(s.active_modifier(), Some(Modifier::JitterBoth));
    }

    #[test]
    fn test_sample_render_does_not_mutate() {
        let mut s = session();
        let before = positions(&s);
        assert_eq!(s.handle(PointerEvent::SampleRender), RenderRequest::Preview);
        assert_eq!(positions(&s), before);
    }

    #[test]
    fn test_handle_dispatch() {
        let mut s = session();
        assert_eq!(s.handle(PointerEvent::Down(Vec2::new(5.0, 5.0))), RenderRequest::Scene);
        assert_eq!(s.handle(PointerEvent::Move(Vec2::new(15.0, 5.0))), RenderRequest::Scene);
        assert_eq!(s.handle(PointerEvent::Up), RenderRequest::None);
        assert_eq!(s.handle(PointerEvent::Wheel(50.0)), RenderRequest::Scene);
        assert_eq!(s.pointer().radius(), 50.0);
        assert_eq!(s.handle(PointerEvent::CycleModifier), RenderRequest::None);
    }

    #[test]
    fn test_topology_fixed() {
        let mut s = session();
        let (n, l) = (s.particles().len(), s.lines().len());
        s.pointer_down(Vec2::new(300.0, 300.0));
        for modifier in 0..4 {
            s.pointer_move(Vec2::new(300.0 + modifier as f32, 300.0));
            s.cycle_modifier();
        }
        assert_eq!(s.particles().len(), n);
        assert_eq!(s.lines().len(), l);
    }

    #[test]
    fn test_seeded_sessions_agree() {
        let mut a = session();
        let mut b = session();
        a.pointer_down(Vec2::new(200.0, 200.0));
        b.pointer_down(Vec2::new(200.0, 200.0));
        assert_eq!(positions(&a), positions(&b));
    }

    #[test]
    fn test_bad_mask_file_falls_back() {
        let s = Session::builder()
            .with_mask_file("no/such/mask.png", MaskChannel::Luma)
            .build();
        assert_eq!(s.particles().len(), 3600);
    }
}
