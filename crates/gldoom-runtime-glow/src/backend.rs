use glow::HasContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub fn gl_enum(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        }
    }
}

/// The handful of GL shader/program entry points the program builder needs.
///
/// Every method requires the backing GL context to be current on the calling thread.
pub trait ShaderBackend {
    type Shader: Copy + std::fmt::Debug;
    type Program: Copy + std::fmt::Debug;

    unsafe fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, String>;
    /// Upload `source` and compile it. Returns the compile status.
    unsafe fn compile_shader(&self, shader: Self::Shader, source: &str) -> bool;
    unsafe fn shader_info_log(&self, shader: Self::Shader) -> String;
    unsafe fn delete_shader(&self, shader: Self::Shader);

    unsafe fn create_program(&self) -> Result<Self::Program, String>;
    unsafe fn attach_shader(&self, program: Self::Program, shader: Self::Shader);
    unsafe fn detach_shader(&self, program: Self::Program, shader: Self::Shader);
    /// Link `program`. Returns the link status.
    unsafe fn link_program(&self, program: Self::Program) -> bool;
    unsafe fn program_info_log(&self, program: Self::Program) -> String;
    unsafe fn delete_program(&self, program: Self::Program);
    unsafe fn use_program(&self, program: Option<Self::Program>);
    unsafe fn attrib_location(&self, program: Self::Program, name: &str) -> Option<u32>;
}

impl ShaderBackend for glow::Context {
    type Shader = glow::NativeShader;
    type Program = glow::NativeProgram;

    unsafe fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, String> {
        HasContext::create_shader(self, stage.gl_enum())
    }

    unsafe fn compile_shader(&self, shader: Self::Shader, source: &str) -> bool {
        HasContext::shader_source(self, shader, source);
        HasContext::compile_shader(self, shader);
        HasContext::get_shader_compile_status(self, shader)
    }

    unsafe fn shader_info_log(&self, shader: Self::Shader) -> String {
        HasContext::get_shader_info_log(self, shader)
    }

    unsafe fn delete_shader(&self, shader: Self::Shader) {
        HasContext::delete_shader(self, shader);
    }

    unsafe fn create_program(&self) -> Result<Self::Program, String> {
        HasContext::create_program(self)
    }

    unsafe fn attach_shader(&self, program: Self::Program, shader: Self::Shader) {
        HasContext::attach_shader(self, program, shader);
    }

    unsafe fn detach_shader(&self, program: Self::Program, shader: Self::Shader) {
        HasContext::detach_shader(self, program, shader);
    }

    unsafe fn link_program(&self, program: Self::Program) -> bool {
        HasContext::link_program(self, program);
        HasContext::get_program_link_status(self, program)
    }

    unsafe fn program_info_log(&self, program: Self::Program) -> String {
        HasContext::get_program_info_log(self, program)
    }

    unsafe fn delete_program(&self, program: Self::Program) {
        HasContext::delete_program(self, program);
    }

    unsafe fn use_program(&self, program: Option<Self::Program>) {
        HasContext::use_program(self, program);
    }

    unsafe fn attrib_location(&self, program: Self::Program, name: &str) -> Option<u32> {
        HasContext::get_attrib_location(self, program, name)
    }
}
