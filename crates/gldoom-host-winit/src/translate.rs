use gldoom_core::{KeyInput, MouseInput, VideoEvent, WindowState};
use winit::event::{
    DeviceEvent, ElementState, KeyboardInput, MouseButton, MouseScrollDelta, WindowEvent,
};

/// Map one winit window event onto the shim's event kinds.
///
/// winit has no dedicated minimize/maximize events: a zero-sized resize or occlusion counts as
/// minimized, any other resize as maximized or restored depending on `maximized`.
pub fn translate_window_event(event: &WindowEvent<'_>, maximized: bool) -> VideoEvent {
    match event {
        WindowEvent::CloseRequested => VideoEvent::Quit,

        WindowEvent::KeyboardInput {
            input:
                KeyboardInput {
                    state,
                    scancode,
                    virtual_keycode,
                    ..
                },
            ..
        } => VideoEvent::Key(KeyInput {
            pressed: *state == ElementState::Pressed,
            scancode: *scancode,
            keysym: virtual_keycode.map(|k| k as u32),
        }),

        WindowEvent::MouseInput { state, button, .. } => VideoEvent::Mouse(MouseInput::Button {
            button: button_index(*button),
            pressed: *state == ElementState::Pressed,
        }),

        WindowEvent::MouseWheel { delta, .. } => {
            let dy = match delta {
                MouseScrollDelta::LineDelta(_, y) => *y,
                MouseScrollDelta::PixelDelta(p) => p.y as f32,
            };
            VideoEvent::Mouse(MouseInput::Wheel { dy })
        }

        WindowEvent::Moved(pos) => VideoEvent::WindowState(WindowState::Moved { x: pos.x, y: pos.y }),

        WindowEvent::Focused(true) => VideoEvent::WindowState(WindowState::FocusGained),
        WindowEvent::Focused(false) => VideoEvent::WindowState(WindowState::FocusLost),

        WindowEvent::Occluded(true) => VideoEvent::WindowState(WindowState::Minimized),
        WindowEvent::Occluded(false) => VideoEvent::WindowState(WindowState::Restored),

        WindowEvent::Resized(size) if size.width == 0 || size.height == 0 => {
            VideoEvent::WindowState(WindowState::Minimized)
        }
        WindowEvent::Resized(_) if maximized => VideoEvent::WindowState(WindowState::Maximized),
        WindowEvent::Resized(_) => VideoEvent::WindowState(WindowState::Restored),

        _ => VideoEvent::Other,
    }
}

pub fn translate_device_event(event: &DeviceEvent) -> VideoEvent {
    match event {
        DeviceEvent::MouseMotion { delta: (dx, dy) } => {
            VideoEvent::Mouse(MouseInput::Motion { dx: *dx, dy: *dy })
        }
        _ => VideoEvent::Other,
    }
}

/// Engine button numbering: left 0, right 1, middle 2, extra buttons after that.
fn button_index(button: MouseButton) -> u8 {
    match button {
        MouseButton::Left => 0,
        MouseButton::Right => 1,
        MouseButton::Middle => 2,
        MouseButton::Other(n) => u8::try_from(n).unwrap_or(u8::MAX),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::{PhysicalPosition, PhysicalSize};
    use winit::event::{DeviceId, ModifiersState, VirtualKeyCode};

    #[test]
    fn close_becomes_quit() {
        assert_eq!(
            translate_window_event(&WindowEvent::CloseRequested, false),
            VideoEvent::Quit
        );
    }

    #[test]
    #[allow(deprecated)]
    fn key_press_keeps_scancode_and_symbol() {
        let ev = WindowEvent::KeyboardInput {
            device_id: unsafe { DeviceId::dummy() },
            input: KeyboardInput {
                scancode: 30,
                state: ElementState::Released,
                virtual_keycode: Some(VirtualKeyCode::A),
                modifiers: ModifiersState::empty(),
            },
            is_synthetic: false,
        };
        assert_eq!(
            translate_window_event(&ev, false),
            VideoEvent::Key(KeyInput {
                pressed: false,
                scancode: 30,
                keysym: Some(VirtualKeyCode::A as u32),
            })
        );
    }

    #[test]
    fn window_state_mapping() {
        let moved = WindowEvent::Moved(PhysicalPosition::new(1930, 15));
        assert_eq!(
            translate_window_event(&moved, false),
            VideoEvent::WindowState(WindowState::Moved { x: 1930, y: 15 })
        );

        let zero = WindowEvent::Resized(PhysicalSize::new(0, 0));
        assert_eq!(
            translate_window_event(&zero, false),
            VideoEvent::WindowState(WindowState::Minimized)
        );

        let big = WindowEvent::Resized(PhysicalSize::new(1920, 1080));
        assert_eq!(
            translate_window_event(&big, true),
            VideoEvent::WindowState(WindowState::Maximized)
        );
        assert_eq!(
            translate_window_event(&big, false),
            VideoEvent::WindowState(WindowState::Restored)
        );

        assert_eq!(
            translate_window_event(&WindowEvent::Focused(false), false),
            VideoEvent::WindowState(WindowState::FocusLost)
        );
    }

    #[test]
    fn unrelated_events_are_other() {
        assert_eq!(
            translate_window_event(&WindowEvent::Destroyed, false),
            VideoEvent::Other
        );
        assert_eq!(
            translate_device_event(&DeviceEvent::Added),
            VideoEvent::Other
        );
    }

    #[test]
    fn extra_mouse_buttons_saturate() {
        assert_eq!(button_index(MouseButton::Other(3)), 3);
        assert_eq!(button_index(MouseButton::Other(4000)), u8::MAX);
    }
}
