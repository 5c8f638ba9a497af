//! Translation from winit window events to session events.
//!
//! The translator keeps the last cursor position so that button presses,
//! which winit reports without coordinates, can be turned into
//! [`PointerEvent::Down`] at the right place.
//!
//! # Usage
//!
//! ```ignore
//! fn window_event(&mut self, _: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
//!     if let Some(e) = self.input.translate(&event) {
//!         match self.session.handle(e) {
//!             RenderRequest::Scene => self.window.request_redraw(),
//!             RenderRequest::Preview => self.preview_pending = true,
//!             RenderRequest::None => {}
//!         }
//!     }
//! }
//! ```
//!
//! Wheel deltas are converted to the browser convention the session expects
//! (positive when scrolling down, in pixels).

use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::session::PointerEvent;

/// Stateful winit-to-[`PointerEvent`] adapter.
#[derive(Debug, Clone)]
pub struct InputTranslator {
    cursor: Vec2,
    /// Pixels per wheel line (one notch).
    line_height: f32,
    cycle_key: KeyCode,
    preview_key: KeyCode,
}

impl Default for InputTranslator {
    fn default() -> Self {
        Self {
            cursor: Vec2::ZERO,
            line_height: 100.0,
            cycle_key: KeyCode::KeyF,
            preview_key: KeyCode::KeyP,
        }
    }
}

impl InputTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how many pixels one wheel notch is worth.
    pub fn with_line_height(mut self, line_height: f32) -> Self {
        self.line_height = line_height;
        self
    }

    /// Rebind the cycle-modifier and sample-render keys.
    pub fn with_keys(mut self, cycle: KeyCode, preview: KeyCode) -> Self {
        self.cycle_key = cycle;
        self.preview_key = preview;
        self
    }

    /// Last known cursor position in window pixels.
    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }

    /// Translate a window event. Events the field does not care about map to `None`.
    pub fn translate(&mut self, event: &WindowEvent) -> Option<PointerEvent> {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                Some(self.cursor_moved(Vec2::new(position.x as f32, position.y as f32)))
            }
            WindowEvent::MouseInput { state, button, .. } => self.mouse_button(*button, *state),
            WindowEvent::MouseWheel { delta, .. } => Some(self.mouse_wheel(*delta)),
            WindowEvent::KeyboardInput { event, .. } => match event.physical_key {
                PhysicalKey::Code(code) => self.key(code, event.state, event.repeat),
                PhysicalKey::Unidentified(_) => None,
            },
            _ => None,
        }
    }

    pub fn cursor_moved(&mut self, position: Vec2) -> PointerEvent {
        self.cursor = position;
        PointerEvent::Move(position)
    }

    /// Only the left button drives the field.
    pub fn mouse_button(&mut self, button: MouseButton, state: ElementState) -> Option<PointerEvent> {
        if button != MouseButton::Left {
            return None;
        }
        Some(match state {
            ElementState::Pressed => PointerEvent::Down(self.cursor),
            ElementState::Released => PointerEvent::Up,
        })
    }

    pub fn mouse_wheel(&self, delta: MouseScrollDelta) -> PointerEvent {
        let pixels = match delta {
            MouseScrollDelta::LineDelta(_, y) => -y * self.line_height,
            MouseScrollDelta::PixelDelta(pos) => -(pos.y as f32),
        };
        PointerEvent::Wheel(pixels)
    }

    /// Key presses map to commands; releases and auto-repeats are ignored.
    pub fn key(&self, code: KeyCode, state: ElementState, repeat: bool) -> Option<PointerEvent> {
        if state != ElementState::Pressed || repeat {
            return None;
        }
        if code == self.cycle_key {
            Some(PointerEvent::CycleModifier)
        } else if code == self.preview_key {
            Some(PointerEvent::SampleRender)
        } else {
            None
        }
    }
}
