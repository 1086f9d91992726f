//! GL-free [`ShaderBackend`] that records handle lifetimes.
//!
//! A stage fails to compile when its source contains `#error`, mirroring what a real GLSL
//! compiler does with that directive.

use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;

use crate::backend::{ShaderBackend, ShaderStage};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FakeShader(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FakeProgram(pub u32);

#[derive(Debug, Default)]
pub struct RecordingBackend {
    next_id: Cell<u32>,
    live_shaders: RefCell<BTreeSet<u32>>,
    live_programs: RefCell<BTreeSet<u32>>,
    shader_logs: RefCell<Vec<(u32, String)>>,
    /// Force the next link to fail with this log.
    pub link_error: RefCell<Option<String>>,
    /// Log reported by a successful link (a driver warning).
    pub link_warning: RefCell<Option<String>>,
    pub fail_create_program: Cell<bool>,
    /// Attribute names the linked program exposes.
    pub attributes: RefCell<Vec<String>>,
    bound: Cell<Option<u32>>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        let b = Self::default();
        b.attributes.borrow_mut().push("coord3d".to_string());
        b
    }

    pub fn live_shader_count(&self) -> usize {
        self.live_shaders.borrow().len()
    }

    pub fn live_program_count(&self) -> usize {
        self.live_programs.borrow().len()
    }

    pub fn is_live_program(&self, program: FakeProgram) -> bool {
        self.live_programs.borrow().contains(&program.0)
    }

    pub fn bound_program(&self) -> Option<FakeProgram> {
        self.bound.get().map(FakeProgram)
    }

    fn alloc(&self) -> u32 {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        id
    }
}

impl ShaderBackend for RecordingBackend {
    type Shader = FakeShader;
    type Program = FakeProgram;

    unsafe fn create_shader(&self, _stage: ShaderStage) -> Result<FakeShader, String> {
        let id = self.alloc();
        self.live_shaders.borrow_mut().insert(id);
        Ok(FakeShader(id))
    }

    unsafe fn compile_shader(&self, shader: FakeShader, source: &str) -> bool {
        match source.lines().position(|l| l.trim_start().starts_with("#error")) {
            Some(line) => {
                let log = format!("0:{}(1): error: #error directive encountered", line + 1);
                self.shader_logs.borrow_mut().push((shader.0, log));
                false
            }
            None => true,
        }
    }

    unsafe fn shader_info_log(&self, shader: FakeShader) -> String {
        self.shader_logs
            .borrow()
            .iter()
            .find(|(id, _)| *id == shader.0)
            .map(|(_, log)| log.clone())
            .unwrap_or_default()
    }

    unsafe fn delete_shader(&self, shader: FakeShader) {
        let removed = self.live_shaders.borrow_mut().remove(&shader.0);
        assert!(removed, "shader {} deleted twice", shader.0);
    }

    unsafe fn create_program(&self) -> Result<FakeProgram, String> {
        if self.fail_create_program.get() {
            return Err("out of program objects".to_string());
        }
        let id = self.alloc();
        self.live_programs.borrow_mut().insert(id);
        Ok(FakeProgram(id))
    }

    unsafe fn attach_shader(&self, program: FakeProgram, shader: FakeShader) {
        assert!(self.live_programs.borrow().contains(&program.0));
        assert!(self.live_shaders.borrow().contains(&shader.0));
    }

    unsafe fn detach_shader(&self, _program: FakeProgram, _shader: FakeShader) {}

    unsafe fn link_program(&self, _program: FakeProgram) -> bool {
        self.link_error.borrow().is_none()
    }

    unsafe fn program_info_log(&self, _program: FakeProgram) -> String {
        if let Some(e) = self.link_error.borrow().as_ref() {
            return e.clone();
        }
        self.link_warning.borrow().clone().unwrap_or_default()
    }

    unsafe fn delete_program(&self, program: FakeProgram) {
        let removed = self.live_programs.borrow_mut().remove(&program.0);
        assert!(removed, "program {} deleted twice", program.0);
    }

    unsafe fn use_program(&self, program: Option<FakeProgram>) {
        self.bound.set(program.map(|p| p.0));
    }

    unsafe fn attrib_location(&self, _program: FakeProgram, name: &str) -> Option<u32> {
        self.attributes
            .borrow()
            .iter()
            .position(|a| a == name)
            .and_then(|i| u32::try_from(i).ok())
    }
}
