//! Headless demo: drags the pointer across the field once per modifier and
//! writes the final frame and a stochastic preview as PNGs, plus the final
//! point and line vertex buffers as raw little-endian `f32` data.
//!
//! Usage: `dotfield [mask.png] [output-dir]`

use std::path::PathBuf;

use dotfield::prelude::*;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let mask = args.next().filter(|a| !a.is_empty());
    let out_dir = PathBuf::from(args.next().unwrap_or_else(|| ".".to_string()));

    let grid = GridConfig::default();
    let mut builder = Session::builder()
        .with_grid(grid)
        .with_modifiers(ModifierRegistry::with_color_shift());
    if let Some(path) = &mask {
        builder = builder.with_mask_file(path, MaskChannel::Luma);
    }
    let mut session = builder.build();

    let style = RenderStyle::default();
    let mut raster = RasterRenderer::new(grid.width as u32, grid.height as u32);

    for _ in 0..session.modifiers().len() {
        let name = session.active_modifier().map(|m| m.name()).unwrap_or("none");
        log::info!("dragging with {name}");

        let mut events = vec![PointerEvent::Down(Vec2::new(150.0, 300.0))];
        events.extend((0..30).map(|i| PointerEvent::Move(Vec2::new(150.0 + i as f32 * 10.0, 300.0))));
        events.push(PointerEvent::Up);
        events.push(PointerEvent::CycleModifier);

        for event in events {
            if session.handle(event) == RenderRequest::Scene {
                draw_scene(&session.scene(), &style, &mut raster);
            }
        }
    }

    let frame_path = out_dir.join("frame.png");
    if let Err(e) = raster.image().save(&frame_path) {
        log::error!("Failed to write {}: {}", frame_path.display(), e);
        std::process::exit(1);
    }
    log::info!("wrote {}", frame_path.display());

    let scene = session.scene();
    for (name, vertices) in [
        ("points.bin", scene.particle_vertices(style.particle)),
        ("lines.bin", scene.line_vertices(style.line)),
    ] {
        let path = out_dir.join(name);
        if let Err(e) = std::fs::write(&path, bytemuck::cast_slice::<PointVertex, u8>(&vertices)) {
            log::error!("Failed to write {}: {}", path.display(), e);
            std::process::exit(1);
        }
        log::info!("wrote {} ({} vertices)", path.display(), vertices.len());
    }

    if session.handle(PointerEvent::SampleRender) == RenderRequest::Preview {
        let mut preview = raster.clone();
        let mut rng = session.rng().clone();
        draw_preview(&session.scene(), &style, &mut preview, &mut rng);

        let preview_path = out_dir.join("preview.png");
        if let Err(e) = preview.image().save(&preview_path) {
            log::error!("Failed to write {}: {}", preview_path.display(), e);
            std::process::exit(1);
        }
        log::info!("wrote {}", preview_path.display());
    }
}
