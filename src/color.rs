//! Color helpers used by the color-shift modifier and the renderers.
//!
//! Hue is expressed in degrees here, unlike most shader-side helpers which
//! take a normalized `0..1` hue.

use glam::{Vec3, Vec4};

/// Convert HSV to RGB.
///
/// * `h` - hue in degrees, wrapped into `[0, 360)`
/// * `s` - saturation, `0.0` (gray) to `1.0` (vivid)
/// * `v` - value, `0.0` (black) to `1.0` (bright)
///
/// A saturation of zero or less is achromatic and returns `(v, v, v)`.
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> Vec3 {
    if s <= 0.0 {
        return Vec3::splat(v);
    }

    let h = h.rem_euclid(360.0) / 60.0;
    let sector = h.floor();
    let f = h - sector;

    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    match sector as u32 % 6 {
        0 => Vec3::new(v, t, p),
        1 => Vec3::new(q, v, p),
        2 => Vec3::new(p, v, t),
        3 => Vec3::new(p, q, v),
        4 => Vec3::new(t, p, v),
        _ => Vec3::new(v, p, q),
    }
}

/// Linear interpolation. `t` is not clamped.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Attach an alpha channel to an RGB color.
#[inline]
pub fn with_alpha(rgb: Vec3, alpha: f32) -> Vec4 {
    rgb.extend(alpha)
}

/// Parse a `#rrggbb` hex string into an opaque RGBA color.
///
/// Returns `None` for anything that is not exactly six hex digits after the `#`.
pub fn from_hex(hex: &str) -> Option<Vec4> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| -> Option<f32> {
        u8::from_str_radix(&digits[i..i + 2], 16)
            .ok()
            .map(|c| c as f32 / 255.0)
    };
    Some(Vec4::new(channel(0)?, channel(2)?, channel(4)?, 1.0))
}
