//! gldoom runtime (glow/OpenGL backend)
//
// This crate contains only the GL side of the video shim:
// - read shader sources (capacity checked)
// - compile/link the shader program
// - clear and prepare the default framebuffer
//
// It does NOT contain windowing, event pumping, or config loading.
#![allow(clippy::missing_safety_doc)]
#![deny(missing_debug_implementations)]

use glow::HasContext;
use std::path::Path;

pub mod backend;
pub mod source;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use backend::{ShaderBackend, ShaderStage};
pub use gldoom_core::VideoError;
pub use source::{read_shader_source, SHADER_SOURCE_CAPACITY};

/// Vertex attribute the engine's geometry is fed through.
pub const COORD3D_ATTRIBUTE: &str = "coord3d";

/// A linked program. Owned by the video subsystem until [`ShaderProgram::destroy`].
#[derive(Debug)]
pub struct ShaderProgram<P> {
    pub program: P,
    /// Non-empty linker output, kept even when linking succeeded.
    pub link_log: Option<String>,
    /// Location of [`COORD3D_ATTRIBUTE`], if the program uses it.
    pub coord3d: Option<u32>,
}

pub type GlProgram = ShaderProgram<glow::NativeProgram>;

impl<P: Copy> ShaderProgram<P> {
    pub unsafe fn bind<B>(&self, gl: &B)
    where
        B: ShaderBackend<Program = P> + ?Sized,
    {
        gl.use_program(Some(self.program));
    }

    /// Release the program. Consumes `self`, so it can only happen once.
    pub unsafe fn destroy<B>(self, gl: &B)
    where
        B: ShaderBackend<Program = P> + ?Sized,
    {
        gl.delete_program(self.program);
    }
}

/// Read both shader files and build the program from them.
pub unsafe fn build_program<B>(
    gl: &B,
    vertex_path: impl AsRef<Path>,
    fragment_path: impl AsRef<Path>,
) -> Result<ShaderProgram<B::Program>, VideoError>
where
    B: ShaderBackend + ?Sized,
{
    let vertex_path = vertex_path.as_ref();
    let fragment_path = fragment_path.as_ref();

    let vert_src = read_shader_source(vertex_path, SHADER_SOURCE_CAPACITY)?;
    let frag_src = read_shader_source(fragment_path, SHADER_SOURCE_CAPACITY)?;

    let program = compile_program(gl, &vert_src, &frag_src)?;
    tracing::debug!(
        target: "gldoom::shader",
        vertex = %vertex_path.display(),
        fragment = %fragment_path.display(),
        "shader program linked"
    );
    Ok(program)
}

/// Compile both stages and link them.
///
/// Stage objects never outlive this call, whatever step fails. On failure no program object
/// is left behind either.
pub unsafe fn compile_program<B>(
    gl: &B,
    vert_src: &str,
    frag_src: &str,
) -> Result<ShaderProgram<B::Program>, VideoError>
where
    B: ShaderBackend + ?Sized,
{
    let vs = compile_stage(gl, ShaderStage::Vertex, vert_src)?;
    let fs = match compile_stage(gl, ShaderStage::Fragment, frag_src) {
        Ok(fs) => fs,
        Err(e) => {
            gl.delete_shader(vs);
            return Err(e);
        }
    };

    let program = match gl.create_program() {
        Ok(p) => p,
        Err(e) => {
            gl.delete_shader(vs);
            gl.delete_shader(fs);
            return Err(VideoError::GlCreate(format!("create_program failed: {e}")));
        }
    };
    gl.attach_shader(program, vs);
    gl.attach_shader(program, fs);
    let linked = gl.link_program(program);

    let log = gl.program_info_log(program);
    let link_log = (!log.is_empty()).then_some(log);

    gl.detach_shader(program, vs);
    gl.detach_shader(program, fs);
    gl.delete_shader(vs);
    gl.delete_shader(fs);

    if !linked {
        gl.delete_program(program);
        return Err(VideoError::Link(link_log.unwrap_or_default()));
    }

    if let Some(log) = &link_log {
        tracing::warn!(target: "gldoom::shader", "program linked with warnings: {log}");
    }

    let coord3d = gl.attrib_location(program, COORD3D_ATTRIBUTE);
    if coord3d.is_none() {
        tracing::debug!(target: "gldoom::shader", "program has no `{COORD3D_ATTRIBUTE}` attribute");
    }

    Ok(ShaderProgram {
        program,
        link_log,
        coord3d,
    })
}

unsafe fn compile_stage<B>(gl: &B, stage: ShaderStage, src: &str) -> Result<B::Shader, VideoError>
where
    B: ShaderBackend + ?Sized,
{
    let shader = gl
        .create_shader(stage)
        .map_err(|e| VideoError::GlCreate(format!("create_shader({}) failed: {e}", stage.label())))?;

    if !gl.compile_shader(shader, src) {
        let log = gl.shader_info_log(shader);
        gl.delete_shader(shader);
        return Err(match stage {
            ShaderStage::Vertex => VideoError::VertexCompile(log),
            ShaderStage::Fragment => VideoError::FragmentCompile(log),
        });
    }

    let log = gl.shader_info_log(shader);
    if !log.is_empty() {
        tracing::warn!(target: "gldoom::shader", "{} shader compiled with warnings: {log}", stage.label());
    }
    Ok(shader)
}

// -------------------------------------------------------------------------------------------------
// Default framebuffer
// -------------------------------------------------------------------------------------------------

pub unsafe fn configure_viewport(gl: &glow::Context, w: i32, h: i32, clear_color: [f32; 4]) {
    gl.viewport(0, 0, w.max(1), h.max(1));
    let [r, g, b, a] = clear_color;
    gl.clear_color(r, g, b, a);
}

/// Clear colour and depth, then bind `program` for the frame.
pub unsafe fn begin_present(gl: &glow::Context, program: &GlProgram) {
    gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
    program.bind(gl);
}
