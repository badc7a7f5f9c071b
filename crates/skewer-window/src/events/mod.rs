pub mod types;

use skewer_core::InputEvent;
use winit::keyboard::{KeyCode, PhysicalKey};

pub use types::SkewerWindowEvent;

pub fn translate_window_event(event: &winit::event::WindowEvent) -> Option<SkewerWindowEvent> {
    use winit::event::{ElementState, WindowEvent};
    match event {
        WindowEvent::Resized(sz) => Some(SkewerWindowEvent::Resized(*sz)),
        WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
            Some(SkewerWindowEvent::ScaleFactorChanged(*scale_factor))
        }
        WindowEvent::KeyboardInput { event, .. }
            if event.state == ElementState::Pressed && !event.repeat =>
        {
            map_key(event.physical_key).map(SkewerWindowEvent::Input)
        }
        WindowEvent::RedrawRequested => Some(SkewerWindowEvent::RedrawRequested),
        WindowEvent::CloseRequested => Some(SkewerWindowEvent::CloseRequested),
        _ => None,
    }
}

/// Map a physical key onto engine input. Layout independent: the digit row
/// and the numpad give the same ids.
pub fn map_key(key: PhysicalKey) -> Option<InputEvent> {
    let PhysicalKey::Code(code) = key else {
        return None;
    };
    let id = match code {
        KeyCode::Escape => return Some(InputEvent::Quit),
        KeyCode::Digit0 | KeyCode::Numpad0 => 0,
        KeyCode::Digit1 | KeyCode::Numpad1 => 1,
        KeyCode::Digit2 | KeyCode::Numpad2 => 2,
        KeyCode::Digit3 | KeyCode::Numpad3 => 3,
        KeyCode::Digit4 | KeyCode::Numpad4 => 4,
        KeyCode::Digit5 | KeyCode::Numpad5 => 5,
        KeyCode::Digit6 | KeyCode::Numpad6 => 6,
        KeyCode::Digit7 | KeyCode::Numpad7 => 7,
        KeyCode::Digit8 | KeyCode::Numpad8 => 8,
        KeyCode::Digit9 | KeyCode::Numpad9 => 9,
        _ => return None,
    };
    Some(InputEvent::Trigger(id))
}
