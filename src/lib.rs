//! # dotfield
//!
//! An interactive 2D particle field. A lattice of point particles, optionally
//! filtered through an image mask into a dot-matrix silhouette, reacts to a
//! circular pointer through a swappable set of modifiers.
//!
//! dotfield owns the simulation state and the interaction logic; drawing is
//! delegated to a [`Renderer`] supplied by the caller.
//!
//! ## Quick Start
//!
//! ```ignore
//! use dotfield::prelude::*;
//!
//! let mut session = Session::builder()
//!     .with_grid(GridConfig::default())
//!     .with_radius_bounds(10.0, 200.0)
//!     .with_snapping(true)
//!     .build();
//!
//! let mut raster = RasterRenderer::new(600, 600);
//! let style = RenderStyle::default();
//!
//! for event in [
//!     PointerEvent::Down(Vec2::new(300.0, 300.0)),
//!     PointerEvent::Move(Vec2::new(320.0, 300.0)),
//!     PointerEvent::Up,
//! ] {
//!     if session.handle(event) == RenderRequest::Scene {
//!         draw_scene(&session.scene(), &style, &mut raster);
//!     }
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Grid
//!
//! [`ParticleGrid`] samples a lattice (`x` from `offset_x` below `width`,
//! `y` from `offset_y` below `height`). With a [`Mask`], only points whose
//! sample is darker than the threshold become particles. Consecutive
//! particles on a row are joined by [`Line`]s; masked-out points break the
//! chain.
//!
//! ### Modifiers
//!
//! | Modifier | Effect |
//! |----------|--------|
//! | [`Modifier::JitterVertical`] | random downward nudge |
//! | [`Modifier::JitterBoth`] | random shake on both axes |
//! | [`Modifier::Implode`] | pull toward the pointer center |
//! | [`Modifier::Explode`] | push away from the pointer center |
//! | [`Modifier::ColorShift`] | recolor by distance from center |
//!
//! The active modifier is cycled with [`Session::cycle_modifier`].
//!
//! ### Pointer
//!
//! The [`Session`] is a two-state machine (idle / dragging). Dragging applies
//! the active modifier to the particles inside the pointer on every move; the
//! wheel resizes the pointer within its [`RadiusBounds`].

pub mod color;
mod error;
pub mod grid;
pub mod input;
pub mod mask;
pub mod modifier;
mod particle;
pub mod pointer;
pub mod render;
mod scene;
pub mod session;
pub mod spatial;

pub use error::MaskError;
pub use glam::{Vec2, Vec3, Vec4};
pub use grid::{GridConfig, ParticleGrid};
pub use input::InputTranslator;
pub use mask::{Mask, MaskChannel};
pub use modifier::{Modifier, ModifierRegistry, Target};
pub use particle::{Line, Particle};
pub use pointer::{Pointer, PointerMode, RadiusBounds};
pub use render::{draw_preview, draw_scene, RasterRenderer, RenderStyle, Renderer};
pub use scene::{PointVertex, Scene};
pub use session::{HoverMode, PointerEvent, RenderRequest, Session, SessionBuilder};
pub use spatial::{particles_inside, BucketGrid, QueryStrategy};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use dotfield::prelude::*;
/// ```
pub mod prelude {
    pub use crate::grid::{GridConfig, ParticleGrid};
    pub use crate::input::InputTranslator;
    pub use crate::mask::{Mask, MaskChannel};
    pub use crate::modifier::{Modifier, ModifierRegistry, Target};
    pub use crate::particle::{Line, Particle};
    pub use crate::pointer::{Pointer, PointerMode, RadiusBounds};
    pub use crate::render::{draw_preview, draw_scene, RasterRenderer, RenderStyle, Renderer};
    pub use crate::scene::{PointVertex, Scene};
    pub use crate::session::{HoverMode, PointerEvent, RenderRequest, Session, SessionBuilder};
    pub use crate::spatial::QueryStrategy;
    pub use crate::{Vec2, Vec4};
}
