use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use gldoom_runtime_glow::testing::RecordingBackend;
use gldoom_runtime_glow::{build_program, VideoError, SHADER_SOURCE_CAPACITY};

const VERT: &str = "#version 330 core\nin vec3 coord3d;\nvoid main() { gl_Position = vec4(coord3d, 1.0); }\n";
const FRAG: &str = "#version 330 core\nout vec4 o;\nvoid main() { o = vec4(0.9); }\n";
const BROKEN_FRAG: &str = "#version 330 core\nout vec4 o;\n#error deliberately broken\n";

struct TempShader(PathBuf);

impl TempShader {
    fn new(name: &str, contents: &[u8]) -> Self {
        let mut p = std::env::temp_dir();
        let ts = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        p.push(format!("gldoom_contract_shader_{name}_{ts}.glsl"));
        fs::write(&p, contents).expect("write shader fixture");
        Self(p)
    }
}

impl Drop for TempShader {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.0);
    }
}

/// A syntactically valid shader padded with comment bytes to exactly `len` bytes.
fn padded_source(len: usize) -> Vec<u8> {
    let mut src = FRAG.as_bytes().to_vec();
    src.extend_from_slice(b"//");
    assert!(src.len() < len, "padding target too small");
    src.resize(len, b'x');
    src
}

#[test]
fn valid_pair_builds_and_leaves_no_stages() {
    let vs = TempShader::new("valid_vs", VERT.as_bytes());
    let fs = TempShader::new("valid_fs", FRAG.as_bytes());
    let gl = RecordingBackend::new();

    let program = unsafe { build_program(&gl, &vs.0, &fs.0) }.expect("valid pair should link");
    assert!(gl.is_live_program(program.program));
    assert_eq!(gl.live_shader_count(), 0);

    unsafe { program.destroy(&gl) };
    assert_eq!(gl.live_program_count(), 0);
}

#[test]
fn broken_fragment_yields_diagnostic_and_no_program() {
    let vs = TempShader::new("broken_vs", VERT.as_bytes());
    let fs = TempShader::new("broken_fs", BROKEN_FRAG.as_bytes());
    let gl = RecordingBackend::new();

    let err = unsafe { build_program(&gl, &vs.0, &fs.0) }.unwrap_err();
    match &err {
        VideoError::FragmentCompile(log) => assert!(!log.is_empty(), "empty compile log"),
        other => panic!("expected fragment compile error, got {other}"),
    }
    assert!(err.is_build_failure());
    assert_eq!(gl.live_program_count(), 0);
    assert_eq!(gl.live_shader_count(), 0);
}

#[test]
fn source_just_under_capacity_builds() {
    let vs = TempShader::new("cap_vs", VERT.as_bytes());
    let fs = TempShader::new("cap_fs", &padded_source(SHADER_SOURCE_CAPACITY - 1));
    let gl = RecordingBackend::new();

    let program = unsafe { build_program(&gl, &vs.0, &fs.0) }.expect("capacity-1 bytes must build");
    unsafe { program.destroy(&gl) };
}

#[test]
fn source_at_or_over_capacity_fails_cleanly() {
    let vs = TempShader::new("over_vs", VERT.as_bytes());
    for len in [SHADER_SOURCE_CAPACITY, SHADER_SOURCE_CAPACITY + 1, 4 * SHADER_SOURCE_CAPACITY] {
        let fs = TempShader::new("over_fs", &padded_source(len));
        let gl = RecordingBackend::new();

        let err = unsafe { build_program(&gl, &vs.0, &fs.0) }.unwrap_err();
        assert!(
            matches!(err, VideoError::ShaderTooLarge { capacity, .. } if capacity == SHADER_SOURCE_CAPACITY),
            "len {len}: got {err}"
        );
        assert_eq!(gl.live_shader_count(), 0, "len {len}");
        assert_eq!(gl.live_program_count(), 0, "len {len}");
    }
}

#[test]
fn unreadable_vertex_file_fails_before_any_gl_work() {
    let fs = TempShader::new("orphan_fs", FRAG.as_bytes());
    let gl = RecordingBackend::new();

    let err = unsafe { build_program(&gl, "/no/such/dir/vert.glsl", &fs.0) }.unwrap_err();
    assert!(matches!(err, VideoError::Io { .. }), "got: {err}");
    assert_eq!(gl.live_shader_count(), 0);
}
