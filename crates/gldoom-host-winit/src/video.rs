use std::ffi::CString;
use std::num::NonZeroU32;

use glutin::context::PossiblyCurrentContext;
use glutin::display::GetGlDisplay;
use glutin::prelude::*;
use glutin::surface::{Surface, WindowSurface};
use glutin_winit::DisplayBuilder;
use raw_window_handle::HasRawWindowHandle;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::platform::run_return::EventLoopExtRunReturn;
use winit::window::{Fullscreen, Window, WindowBuilder};

use gldoom_core::{
    dispatch, resolve, Dispatch, EventHandler, VideoConfig, VideoError, VideoEvent, VideoState,
    WindowPosition,
};
use gldoom_runtime_glow::{self as rt, GlProgram};

use crate::displays::WinitDisplays;
use crate::translate::{translate_device_event, translate_window_event};

/// The video subsystem: one window, one GL context, one shader program.
pub struct GlVideo {
    program: Option<GlProgram>,
    gl: glow::Context,
    gl_surface: Surface<WindowSurface>,
    gl_context: PossiblyCurrentContext,
    window: Window,
    event_loop: EventLoop<()>,
    displays: WinitDisplays,
    state: VideoState,
    size: (i32, i32),
    clear_color: [f32; 4],
}

impl std::fmt::Debug for GlVideo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlVideo")
            .field("program", &self.program)
            .field("window", &self.window.id())
            .field("displays", &self.displays)
            .field("state", &self.state)
            .field("size", &self.size)
            .field("clear_color", &self.clear_color)
            .field("gl", &"<glow context>")
            .finish()
    }
}

impl GlVideo {
    /// Open the window on the configured display and build the shader program.
    ///
    /// Any failure drops everything created so far; no GL state outlives an `Err`.
    pub fn init_graphics(config: &VideoConfig) -> Result<Self, VideoError> {
        let event_loop = EventLoop::new();
        let displays = WinitDisplays::from_monitors(event_loop.available_monitors());

        let (w, h) = (config.width, config.height);
        let mut state = VideoState::new(config.placement(), config.screensaver_mode);
        let placement = resolve(&mut state.placement, &displays, w, h);

        let inner = PhysicalSize::new(w.unsigned_abs(), h.unsigned_abs());
        let mut window_builder = WindowBuilder::new()
            .with_title(config.title.clone())
            .with_inner_size(inner)
            .with_resizable(false);
        if let WindowPosition::At { x, y } = placement.position {
            window_builder = window_builder.with_position(PhysicalPosition::new(x, y));
        }
        if state.placement.fullscreen {
            let monitor = displays.monitor(state.placement.target_display);
            window_builder = window_builder.with_fullscreen(Some(Fullscreen::Borderless(monitor)));
        }

        let GlWindow {
            window,
            gl_surface,
            gl_context,
            gl,
        } = create_gl_window(&event_loop, window_builder)?;

        let program =
            match unsafe { rt::build_program(&gl, &config.vertex_shader, &config.fragment_shader) } {
                Ok(p) => p,
                Err(e) => {
                    tracing::error!(target: "gldoom::video", "shader program build failed: {e}");
                    return Err(e);
                }
            };

        let size = DrawableSize::clamped(window.inner_size()).viewport();
        state.window_size = size;
        unsafe { rt::configure_viewport(&gl, size.0, size.1, config.clear_color) };

        tracing::info!(
            target: "gldoom::video",
            width = size.0,
            height = size.1,
            display = state.placement.target_display,
            fullscreen = state.placement.fullscreen,
            "video initialised"
        );

        Ok(Self {
            program: Some(program),
            gl,
            gl_surface,
            gl_context,
            window,
            event_loop,
            displays,
            state,
            size,
            clear_color: config.clear_color,
        })
    }

    /// Release the program, then the context, surface, and window.
    pub fn shutdown_graphics(mut self) {
        self.release_program();
        tracing::info!(target: "gldoom::video", "video shut down");
    }

    /// Per-frame hook; nothing to prepare yet.
    pub fn start_frame(&mut self) {}

    /// Hook for updates that do not need a present.
    pub fn update_no_blit(&mut self) {}

    /// Clear, bind the program, and present.
    pub fn finish_update(&mut self) -> Result<(), VideoError> {
        if let Some(program) = &self.program {
            unsafe { rt::begin_present(&self.gl, program) };
        }
        self.gl_surface
            .swap_buffers(&self.gl_context)
            .map_err(|e| VideoError::Window(format!("swap_buffers: {e}")))
    }

    /// Pump every pending window-system event and dispatch it.
    ///
    /// Returns [`Dispatch::Terminate`] as soon as a quit arrives in screensaver mode; the
    /// caller is expected to exit the process then.
    pub fn start_tic<H>(&mut self, handler: &mut H) -> Dispatch
    where
        H: EventHandler + ?Sized,
    {
        let mut pending: Vec<VideoEvent> = Vec::new();
        let mut resized: Option<PhysicalSize<u32>> = None;
        let window = &self.window;

        self.event_loop.run_return(|event, _, control_flow| {
            *control_flow = ControlFlow::Poll;
            match event {
                Event::WindowEvent { event, .. } => {
                    if let WindowEvent::Resized(size) = &event {
                        resized = Some(*size);
                    }
                    pending.push(translate_window_event(&event, window.is_maximized()));
                }
                Event::DeviceEvent { event, .. } => pending.push(translate_device_event(&event)),
                Event::MainEventsCleared => *control_flow = ControlFlow::Exit,
                _ => {}
            }
        });

        // Only the latest size matters; a zero size (minimized) keeps the old surface.
        if let Some(size) = resized.and_then(DrawableSize::from_resize) {
            self.apply_resize(size);
        }

        for event in pending {
            if dispatch(event, &mut self.state, &self.displays, &mut *handler) == Dispatch::Terminate {
                return Dispatch::Terminate;
            }
        }
        Dispatch::Continue
    }

    pub fn state(&self) -> &VideoState {
        &self.state
    }

    pub fn size(&self) -> (i32, i32) {
        self.size
    }

    /// Location of the `coord3d` attribute in the active program.
    pub fn coord3d_attribute(&self) -> Option<u32> {
        self.program.as_ref().and_then(|p| p.coord3d)
    }

    fn apply_resize(&mut self, size: DrawableSize) {
        self.gl_surface.resize(&self.gl_context, size.w, size.h);
        self.size = size.viewport();
        self.state.window_size = self.size;
        unsafe { rt::configure_viewport(&self.gl, self.size.0, self.size.1, self.clear_color) };
        tracing::debug!(
            target: "gldoom::video",
            width = self.size.0,
            height = self.size.1,
            "surface resized"
        );
    }

    fn release_program(&mut self) {
        if let Some(program) = self.program.take() {
            unsafe { program.destroy(&self.gl) };
        }
    }
}

impl Drop for GlVideo {
    fn drop(&mut self) {
        self.release_program();
    }
}

/// Window plus the GL objects tied to it, as produced by [`create_gl_window`].
struct GlWindow {
    window: Window,
    gl_surface: Surface<WindowSurface>,
    gl_context: PossiblyCurrentContext,
    gl: glow::Context,
}

/// Build the window from `builder`, pick the config with the most samples, and make a core
/// profile context current on a surface matching the window's inner size.
fn create_gl_window(
    event_loop: &EventLoop<()>,
    builder: WindowBuilder,
) -> Result<GlWindow, VideoError> {
    let template = glutin::config::ConfigTemplateBuilder::new()
        .with_alpha_size(8)
        .with_depth_size(24)
        .with_transparency(false);

    let (window, gl_config) = DisplayBuilder::new()
        .with_window_builder(Some(builder))
        .build(event_loop, template, |configs| {
            configs
                .max_by_key(|c| c.num_samples())
                .expect("glutin offers at least one config")
        })
        .map_err(|e| VideoError::Window(format!("window/display setup: {e}")))?;
    let window = window.ok_or_else(|| VideoError::Window("no window was created".into()))?;

    let gl_display = gl_config.display();
    let handle = window.raw_window_handle();

    let core_profile = |handle| {
        glutin::context::ContextAttributesBuilder::new()
            .with_profile(glutin::context::GlProfile::Core)
            .build(handle)
    };
    // Some drivers refuse a context bound to the window handle; retry unbound.
    let context = unsafe {
        gl_display
            .create_context(&gl_config, &core_profile(Some(handle)))
            .or_else(|_| gl_display.create_context(&gl_config, &core_profile(None)))
            .map_err(|e| VideoError::GlCreate(format!("create_context: {e}")))?
    };

    let size = DrawableSize::clamped(window.inner_size());
    let surface_attrs =
        glutin::surface::SurfaceAttributesBuilder::<WindowSurface>::new().build(handle, size.w, size.h);
    let gl_surface = unsafe {
        gl_display
            .create_window_surface(&gl_config, &surface_attrs)
            .map_err(|e| VideoError::GlCreate(format!("create_window_surface: {e}")))?
    };

    let gl_context = context
        .make_current(&gl_surface)
        .map_err(|e| VideoError::GlCreate(format!("make_current: {e}")))?;

    let gl = unsafe {
        glow::Context::from_loader_function(|s| match CString::new(s) {
            Ok(name) => gl_display.get_proc_address(name.as_c_str()) as *const _,
            Err(_) => std::ptr::null(),
        })
    };

    Ok(GlWindow {
        window,
        gl_surface,
        gl_context,
        gl,
    })
}

/// Size of the drawable surface, never zero in either dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DrawableSize {
    pub(crate) w: NonZeroU32,
    pub(crate) h: NonZeroU32,
}

impl DrawableSize {
    /// Clamp each dimension to at least 1.
    pub(crate) fn clamped(size: PhysicalSize<u32>) -> Self {
        Self {
            w: NonZeroU32::new(size.width).unwrap_or(NonZeroU32::MIN),
            h: NonZeroU32::new(size.height).unwrap_or(NonZeroU32::MIN),
        }
    }

    /// `None` for a zero-sized resize, which is how a minimized window reports itself.
    pub(crate) fn from_resize(size: PhysicalSize<u32>) -> Option<Self> {
        Some(Self {
            w: NonZeroU32::new(size.width)?,
            h: NonZeroU32::new(size.height)?,
        })
    }

    pub(crate) fn viewport(self) -> (i32, i32) {
        (
            i32::try_from(self.w.get()).unwrap_or(i32::MAX),
            i32::try_from(self.h.get()).unwrap_or(i32::MAX),
        )
    }
}
