//! Backend-agnostic half of the OpenGL video shim.
//!
//! Nothing in here talks to a window system or a GL driver: displays are queried through
//! [`DisplayProvider`], input arrives as already-translated [`VideoEvent`]s.
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(missing_debug_implementations)]

pub mod config;
pub mod error;
pub mod events;
pub mod placement;

pub use error::VideoError;

pub use config::{
    VideoConfig, DEFAULT_FRAGMENT_SHADER, DEFAULT_VERTEX_SHADER, SCREEN_HEIGHT, SCREEN_WIDTH,
};
pub use events::{
    dispatch, Dispatch, EngineEvent, EventHandler, KeyInput, MouseInput, VideoEvent, VideoState,
    WindowState,
};
pub use placement::{
    center_on, display_containing, resolve, DisplayBounds, DisplayProvider, PlacementDiagnostic,
    PositionSpec, Resolution, WindowPlacementConfig, WindowPosition,
};
