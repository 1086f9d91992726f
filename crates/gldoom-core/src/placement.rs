//! Window placement: turns the `window_position` / `fullscreen` / `video_display` settings into
//! the top-left coordinate the window is created at.
//!
//! In fullscreen mode the "position" still matters, because it selects the display the game
//! runs fullscreen on. Windowed mode honours the configured position string.

use std::fmt;

/// Bounds of one physical display in desktop coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayBounds {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl DisplayBounds {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Half-open containment test: the right and bottom edges belong to the neighbour.
    pub fn contains(&self, px: i32, py: i32) -> bool {
        let px = i64::from(px);
        let py = i64::from(py);
        let (x, y) = (i64::from(self.x), i64::from(self.y));
        px >= x && py >= y && px < x + i64::from(self.w) && py < y + i64::from(self.h)
    }
}

/// Enumerable set of displays, indexed `0..display_count()`.
///
/// `display_bounds` may fail for an index that is in range (for example a display that went
/// away between enumeration and query).
pub trait DisplayProvider {
    fn display_count(&self) -> usize;
    fn display_bounds(&self, index: usize) -> Option<DisplayBounds>;
}

impl DisplayProvider for [DisplayBounds] {
    fn display_count(&self) -> usize {
        self.len()
    }

    fn display_bounds(&self, index: usize) -> Option<DisplayBounds> {
        self.get(index).copied()
    }
}

impl DisplayProvider for Vec<DisplayBounds> {
    fn display_count(&self) -> usize {
        self.len()
    }

    fn display_bounds(&self, index: usize) -> Option<DisplayBounds> {
        self.get(index).copied()
    }
}

/// The placement-related slice of the video configuration.
///
/// Owned by the video subsystem; `target_display` is corrected by [`resolve`] and updated when
/// the window is moved onto another display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowPlacementConfig {
    pub fullscreen: bool,
    pub target_display: i32,
    /// Raw `window_position` setting: empty, `"center"`, or `"x,y"`.
    pub position: String,
}

impl Default for WindowPlacementConfig {
    fn default() -> Self {
        Self {
            fullscreen: false,
            target_display: 0,
            position: "center".to_string(),
        }
    }
}

/// Parsed form of the `window_position` setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionSpec {
    Unset,
    Center,
    At { x: i32, y: i32 },
}

impl PositionSpec {
    /// Returns `None` when the string is neither empty, `"center"`, nor an `"x,y"` pair.
    ///
    /// The pair follows C `%i,%i` rules: each integer may be preceded by whitespace, carry a
    /// sign, and use a `0x` (hex) or leading-`0` (octal) prefix. The comma must directly follow
    /// the first integer. Anything after the second integer is ignored.
    pub fn parse(s: &str) -> Option<Self> {
        if s.is_empty() {
            return Some(PositionSpec::Unset);
        }
        if s == "center" {
            return Some(PositionSpec::Center);
        }

        let (x, rest) = parse_c_int(s)?;
        let rest = rest.strip_prefix(',')?;
        let (y, _) = parse_c_int(rest)?;
        Some(PositionSpec::At { x, y })
    }
}

/// Where the window should be created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowPosition {
    /// Let the window system choose.
    Default,
    At { x: i32, y: i32 },
}

/// Non-fatal findings of a [`resolve`] call. Each one is also logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementDiagnostic {
    /// `target_display` named a display that no longer exists and was reset to 0.
    DisplayReset { configured: i32, max: i32 },
    /// `window_position` could not be parsed; the default position was used.
    InvalidPosition { setting: String },
    /// Bounds of the target display could not be read; the default position was used.
    BoundsUnavailable { display: i32 },
}

impl fmt::Display for PlacementDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementDiagnostic::DisplayReset { configured, max } => write!(
                f,
                "configured to run on display #{configured}, but it no longer exists (max {max}); moving to display 0"
            ),
            PlacementDiagnostic::InvalidPosition { setting } => {
                write!(f, "invalid window_position setting {setting:?}")
            }
            PlacementDiagnostic::BoundsUnavailable { display } => {
                write!(f, "failed to read display bounds for display #{display}")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub position: WindowPosition,
    pub diagnostics: Vec<PlacementDiagnostic>,
}

/// Resolve the top-left corner for a `w` x `h` window.
///
/// Afterwards `cfg.target_display` names an existing display whenever at least one display is
/// available. Never fails: every problem falls back to [`WindowPosition::Default`] and is
/// reported in [`Resolution::diagnostics`].
pub fn resolve<D>(cfg: &mut WindowPlacementConfig, displays: &D, w: i32, h: i32) -> Resolution
where
    D: DisplayProvider + ?Sized,
{
    let mut diagnostics = Vec::new();

    let count = displays.display_count();
    let in_range = usize::try_from(cfg.target_display)
        .map(|d| d < count)
        .unwrap_or(false);
    if !in_range {
        let max = i32::try_from(count).unwrap_or(i32::MAX) - 1;
        diagnostics.push(PlacementDiagnostic::DisplayReset {
            configured: cfg.target_display,
            max,
        });
        cfg.target_display = 0;
    }

    let position = if cfg.fullscreen {
        center_or_default(cfg.target_display, displays, w, h, &mut diagnostics)
    } else {
        match PositionSpec::parse(&cfg.position) {
            Some(PositionSpec::Unset) => WindowPosition::Default,
            Some(PositionSpec::Center) => {
                center_or_default(cfg.target_display, displays, w, h, &mut diagnostics)
            }
            Some(PositionSpec::At { x, y }) => WindowPosition::At { x, y },
            None => {
                diagnostics.push(PlacementDiagnostic::InvalidPosition {
                    setting: cfg.position.clone(),
                });
                WindowPosition::Default
            }
        }
    };

    for d in &diagnostics {
        tracing::warn!(target: "gldoom::placement", "{d}");
    }

    Resolution {
        position,
        diagnostics,
    }
}

/// Top-left corner that centres a `w` x `h` window on `bounds`.
///
/// An oversized window is pinned to the display origin rather than given a negative offset.
pub fn center_on(bounds: DisplayBounds, w: i32, h: i32) -> (i32, i32) {
    let dx = (bounds.w.saturating_sub(w) / 2).max(0);
    let dy = (bounds.h.saturating_sub(h) / 2).max(0);
    (bounds.x.saturating_add(dx), bounds.y.saturating_add(dy))
}

fn center_or_default<D>(
    display: i32,
    displays: &D,
    w: i32,
    h: i32,
    diagnostics: &mut Vec<PlacementDiagnostic>,
) -> WindowPosition
where
    D: DisplayProvider + ?Sized,
{
    let bounds = usize::try_from(display)
        .ok()
        .and_then(|d| displays.display_bounds(d));
    match bounds {
        Some(b) => {
            let (x, y) = center_on(b, w, h);
            WindowPosition::At { x, y }
        }
        None => {
            diagnostics.push(PlacementDiagnostic::BoundsUnavailable { display });
            WindowPosition::Default
        }
    }
}

/// Index of the first display whose bounds contain `(x, y)`.
pub fn display_containing<D>(displays: &D, x: i32, y: i32) -> Option<usize>
where
    D: DisplayProvider + ?Sized,
{
    (0..displays.display_count()).find(|&i| {
        displays
            .display_bounds(i)
            .map(|b| b.contains(x, y))
            .unwrap_or(false)
    })
}

/// One C `%i` conversion. Returns the value and the unconsumed remainder.
fn parse_c_int(s: &str) -> Option<(i32, &str)> {
    let s = s.trim_start();
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let bytes = s.as_bytes();
    let (radix, digits) = if bytes.len() > 2
        && bytes[0] == b'0'
        && (bytes[1] == b'x' || bytes[1] == b'X')
        && bytes[2].is_ascii_hexdigit()
    {
        (16, &s[2..])
    } else if bytes.first() == Some(&b'0') {
        (8, s)
    } else {
        (10, s)
    };

    let end = digits
        .char_indices()
        .find(|&(_, c)| !c.is_digit(radix))
        .map(|(i, _)| i)
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude = i64::from_str_radix(&digits[..end], radix).ok()?;
    let value = if negative { -magnitude } else { magnitude };
    let value = i32::try_from(value).ok()?;
    Some((value, &digits[end..]))
}
