use std::path::PathBuf;

/// Errors produced by the video shim.
///
/// Lives in `gldoom-core` so the glow runtime and the winit host share one type.
#[derive(Debug, thiserror::Error)]
pub enum VideoError {
    // ---- Config / files ----
    #[error("io error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("json parse error at {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config at {}: {msg}", .path.display())]
    InvalidConfig { path: PathBuf, msg: String },

    #[error(
        "shader source {} is too large ({len_at_least}+ bytes, capacity {capacity})",
        .path.display()
    )]
    ShaderTooLarge {
        path: PathBuf,
        len_at_least: usize,
        capacity: usize,
    },

    #[error("shader source {} is not valid UTF-8", .path.display())]
    ShaderEncoding { path: PathBuf },

    // ---- Backend ----
    #[error("vertex shader compile error: {0}")]
    VertexCompile(String),

    #[error("fragment shader compile error: {0}")]
    FragmentCompile(String),

    #[error("program link error: {0}")]
    Link(String),

    #[error("backend object creation failed: {0}")]
    GlCreate(String),

    #[error("window setup failed: {0}")]
    Window(String),

    // ---- Fallback ----
    #[error("{0}")]
    Other(String),
}

impl VideoError {
    pub fn other<T: Into<String>>(s: T) -> Self {
        VideoError::Other(s.into())
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        VideoError::Io {
            path: path.into(),
            source,
        }
    }

    /// True for compile/link failures, whose payload is the driver's diagnostic log.
    pub fn is_build_failure(&self) -> bool {
        matches!(
            self,
            VideoError::VertexCompile(_) | VideoError::FragmentCompile(_) | VideoError::Link(_)
        )
    }
}
