//! Host glue: winit window, glutin GL context, and the per-frame entry points the engine
//! calls ([`GlVideo`]).
//!
//! Placement, event dispatch and shader building live in `gldoom-core` and
//! `gldoom-runtime-glow`; this crate only adapts winit/glutin to them.

pub mod displays;
pub mod translate;
pub mod video;

pub use displays::WinitDisplays;
pub use translate::translate_window_event;
pub use video::GlVideo;
