use gldoom_core::{DisplayBounds, DisplayProvider};
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::monitor::MonitorHandle;

/// Snapshot of the monitors winit reported at enumeration time.
#[derive(Debug, Clone, Default)]
pub struct WinitDisplays {
    monitors: Vec<MonitorHandle>,
    bounds: Vec<DisplayBounds>,
}

impl WinitDisplays {
    pub fn from_monitors(monitors: impl IntoIterator<Item = MonitorHandle>) -> Self {
        let monitors: Vec<MonitorHandle> = monitors.into_iter().collect();
        let bounds = monitors
            .iter()
            .map(|m| bounds_of(m.position(), m.size()))
            .collect();
        Self { monitors, bounds }
    }

    pub fn monitor(&self, index: i32) -> Option<MonitorHandle> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.monitors.get(i))
            .cloned()
    }
}

impl DisplayProvider for WinitDisplays {
    fn display_count(&self) -> usize {
        self.bounds.len()
    }

    fn display_bounds(&self, index: usize) -> Option<DisplayBounds> {
        self.bounds.get(index).copied()
    }
}

pub fn bounds_of(position: PhysicalPosition<i32>, size: PhysicalSize<u32>) -> DisplayBounds {
    DisplayBounds::new(
        position.x,
        position.y,
        i32::try_from(size.width).unwrap_or(i32::MAX),
        i32::try_from(size.height).unwrap_or(i32::MAX),
    )
}
