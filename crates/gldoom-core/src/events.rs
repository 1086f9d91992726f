//! Window-system events as seen by the video shim, and their dispatch.
//!
//! Hosts translate their backend's events into [`VideoEvent`] and feed them through
//! [`dispatch`], which either hands them to the engine's handlers or updates [`VideoState`].

use crate::placement::{display_containing, DisplayProvider, WindowPlacementConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    pub pressed: bool,
    /// Platform scancode (layout independent).
    pub scancode: u32,
    /// Backend key symbol, if the backend could map one.
    pub keysym: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MouseInput {
    Motion { dx: f64, dy: f64 },
    Button { button: u8, pressed: bool },
    Wheel { dy: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowState {
    Minimized,
    Maximized,
    Restored,
    Moved { x: i32, y: i32 },
    FocusGained,
    FocusLost,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VideoEvent {
    Key(KeyInput),
    Mouse(MouseInput),
    Quit,
    WindowState(WindowState),
    Other,
}

/// Events posted into the engine's own queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum EngineEvent {
    Quit,
}

/// The engine side of the event boundary.
pub trait EventHandler {
    fn key(&mut self, input: KeyInput);

    /// Currently never called: mouse input is not forwarded to the engine.
    fn mouse(&mut self, _input: MouseInput) {}

    fn post(&mut self, event: EngineEvent);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Continue,
    /// Screensaver mode got a quit request; the host should exit the process.
    Terminate,
}

/// Mutable video-subsystem state touched by event handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoState {
    pub placement: WindowPlacementConfig,
    pub screensaver_mode: bool,
    /// False while the window is minimized.
    pub screen_visible: bool,
    pub window_focused: bool,
    /// Current window size, kept up to date by the host. Moves test the window centre.
    pub window_size: (i32, i32),
}

impl VideoState {
    pub fn new(placement: WindowPlacementConfig, screensaver_mode: bool) -> Self {
        Self {
            placement,
            screensaver_mode,
            screen_visible: true,
            window_focused: true,
            window_size: (0, 0),
        }
    }

    /// Centre of the window whose top-left corner is at `(x, y)`.
    pub fn window_centre(&self, x: i32, y: i32) -> (i32, i32) {
        let (w, h) = self.window_size;
        (x.saturating_add(w.max(0) / 2), y.saturating_add(h.max(0) / 2))
    }
}

pub fn dispatch<D, H>(
    event: VideoEvent,
    state: &mut VideoState,
    displays: &D,
    handler: &mut H,
) -> Dispatch
where
    D: DisplayProvider + ?Sized,
    H: EventHandler + ?Sized,
{
    match event {
        VideoEvent::Key(input) => handler.key(input),

        // Not forwarded yet; the arm stays so hosts can keep translating mouse events.
        VideoEvent::Mouse(_) => {}

        VideoEvent::Quit => {
            if state.screensaver_mode {
                tracing::info!(target: "gldoom::events", "quit in screensaver mode");
                return Dispatch::Terminate;
            }
            handler.post(EngineEvent::Quit);
        }

        VideoEvent::WindowState(ws) => apply_window_state(ws, state, displays),

        VideoEvent::Other => {}
    }
    Dispatch::Continue
}

fn apply_window_state<D>(ws: WindowState, state: &mut VideoState, displays: &D)
where
    D: DisplayProvider + ?Sized,
{
    match ws {
        WindowState::Minimized => state.screen_visible = false,
        WindowState::Maximized | WindowState::Restored => state.screen_visible = true,
        WindowState::FocusGained => state.window_focused = true,
        WindowState::FocusLost => state.window_focused = false,
        WindowState::Moved { x, y } => {
            let (cx, cy) = state.window_centre(x, y);
            if let Some(i) = display_containing(displays, cx, cy) {
                let i = i32::try_from(i).unwrap_or(0);
                if i != state.placement.target_display {
                    tracing::debug!(target: "gldoom::events", display = i, "window moved to display");
                    state.placement.target_display = i;
                }
            }
        }
    }
}
