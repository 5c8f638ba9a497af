//! Rendering interface and the two render passes.
//!
//! The field does not draw anything itself. A [`Renderer`] supplies four
//! primitives; [`draw_scene`] redraws the whole field with them after every
//! update, and [`draw_preview`] paints a one-shot ink-spatter impression on
//! top of whatever is already there.
//!
//! [`RasterRenderer`] is a small software implementation over an
//! [`image::RgbaImage`], used by the demo binary and tests.

use glam::{Vec2, Vec4};
use image::{Rgba, RgbaImage};
use rand::Rng;

use crate::color::from_hex;
use crate::scene::Scene;

/// Samples drawn per particle by [`draw_preview`].
pub const PREVIEW_SAMPLES: usize = 30;
/// Maximum distance of a preview sample from its particle, per axis.
pub const PREVIEW_SPREAD: f32 = 10.0;
/// Exclusive upper bound on preview sample alpha.
pub const PREVIEW_MAX_ALPHA: f32 = 0.1;

/// Drawing primitives a render target must provide.
pub trait Renderer {
    /// Fill the rectangle `(0, 0)..size`.
    fn fill_background(&mut self, size: Vec2, color: Vec4);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Vec4);
    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Vec4);
    /// Outline used for the pointer ring.
    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Vec4);
}

/// Colors and sizes for the render passes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStyle {
    pub background: Vec4,
    /// Fill for particles without their own color.
    pub particle: Vec4,
    pub line: Vec4,
    pub pointer: Vec4,
    pub particle_radius: f32,
    /// Whether to draw lines in the regular pass.
    pub show_lines: bool,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            background: from_hex("#333333").unwrap_or(Vec4::new(0.2, 0.2, 0.2, 1.0)),
            particle: Vec4::ONE,
            line: Vec4::ONE,
            pointer: Vec4::ONE,
            particle_radius: 1.0,
            show_lines: true,
        }
    }
}

/// Redraw the complete field: background, lines, particles, pointer ring.
pub fn draw_scene<R: Renderer + ?Sized>(scene: &Scene<'_>, style: &RenderStyle, renderer: &mut R) {
    renderer.fill_background(scene.size, style.background);

    if style.show_lines {
        for (a, b) in scene.line_segments() {
            renderer.stroke_line(a, b, style.line);
        }
    }

    for p in scene.particles {
        renderer.fill_circle(p.position, style.particle_radius, p.color.unwrap_or(style.particle));
    }

    renderer.stroke_circle(scene.pointer.position, scene.pointer.radius(), style.pointer);
}

/// Paint a stochastic impression of the field, then the lines over it.
///
/// Every particle gets [`PREVIEW_SAMPLES`] faint dots scattered within
/// [`PREVIEW_SPREAD`] units. Nothing is cleared first, so repeated calls
/// accumulate.
pub fn draw_preview<R, G>(scene: &Scene<'_>, style: &RenderStyle, renderer: &mut R, rng: &mut G)
where
    R: Renderer + ?Sized,
    G: Rng + ?Sized,
{
    for p in scene.particles {
        let base = p.color.unwrap_or(style.particle);
        for _ in 0..PREVIEW_SAMPLES {
            let jitter = Vec2::new(
                rng.gen_range(-PREVIEW_SPREAD..=PREVIEW_SPREAD),
                rng.gen_range(-PREVIEW_SPREAD..=PREVIEW_SPREAD),
            );
            let alpha = rng.gen_range(0.0..PREVIEW_MAX_ALPHA);
            renderer.fill_circle(p.position + jitter, style.particle_radius, base.truncate().extend(alpha));
        }
    }

    for (a, b) in scene.line_segments() {
        renderer.stroke_line(a, b, style.line);
    }
}

/// Software renderer writing into an RGBA image with source-over blending.
#[derive(Debug, Clone)]
pub struct RasterRenderer {
    image: RgbaImage,
}

impl RasterRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Blend `color` over the pixel at `(x, y)`. Out-of-bounds pixels are ignored.
    fn blend(&mut self, x: i64, y: i64, color: Vec4) {
        if x < 0 || y < 0 || x >= self.image.width() as i64 || y >= self.image.height() as i64 {
            return;
        }
        let pixel = self.image.get_pixel_mut(x as u32, y as u32);
        let dst = Vec4::from_array(pixel.0.map(|c| c as f32 / 255.0));
        let a = color.w.clamp(0.0, 1.0);
        let rgb = color.truncate().clamp(glam::Vec3::ZERO, glam::Vec3::ONE) * a
            + dst.truncate() * (1.0 - a);
        let out_a = a + dst.w * (1.0 - a);
        *pixel = Rgba(rgb.extend(out_a).to_array().map(|c| (c * 255.0).round() as u8));
    }

    fn plot(&mut self, point: Vec2, color: Vec4) {
        self.blend(point.x.floor() as i64, point.y.floor() as i64, color);
    }
}

impl Renderer for RasterRenderer {
    fn fill_background(&mut self, size: Vec2, color: Vec4) {
        let w = (size.x.max(0.0) as u32).min(self.image.width());
        let h = (size.y.max(0.0) as u32).min(self.image.height());
        let fill = Rgba(color.to_array().map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8));
        for y in 0..h {
            for x in 0..w {
                self.image.put_pixel(x, y, fill);
            }
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Vec4) {
        let min = (center - Vec2::splat(radius)).floor();
        let max = (center + Vec2::splat(radius)).ceil();
        let mut covered = false;
        for y in min.y as i64..max.y as i64 {
            for x in min.x as i64..max.x as i64 {
                let pixel_center = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                if pixel_center.distance(center) <= radius {
                    self.blend(x, y, color);
                    covered = true;
                }
            }
        }
        // Sub-pixel dots still leave a mark.
        if !covered {
            self.plot(center, color);
        }
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Vec4) {
        let steps = (to - from).abs().max_element().ceil().max(1.0) as usize;
        for i in 0..=steps {
            self.plot(from.lerp(to, i as f32 / steps as f32), color);
        }
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Vec4) {
        let steps = (std::f32::consts::TAU * radius).ceil().max(8.0) as usize;
        for i in 0..steps {
            let angle = i as f32 / steps as f32 * std::f32::consts::TAU;
            self.plot(center + Vec2::from_angle(angle) * radius, color);
        }
    }
}
