use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::VideoError;
use crate::placement::WindowPlacementConfig;

pub const DEFAULT_VERTEX_SHADER: &str = "shaders/vert.glsl";
pub const DEFAULT_FRAGMENT_SHADER: &str = "shaders/frag.glsl";

/// Native resolution of the game's framebuffer.
pub const SCREEN_WIDTH: i32 = 320;
pub const SCREEN_HEIGHT: i32 = 200;

/// Video settings supplied by the surrounding config layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VideoConfig {
    #[serde(default)]
    pub fullscreen: bool,

    /// Empty (let the window system choose), `"center"`, or `"x,y"`.
    #[serde(default = "default_window_position")]
    pub window_position: String,

    /// Index of the display to open on.
    #[serde(default)]
    pub video_display: i32,

    /// Quit requests terminate the process instead of reaching the game.
    #[serde(default)]
    pub screensaver_mode: bool,

    #[serde(default = "default_width")]
    pub width: i32,

    #[serde(default = "default_height")]
    pub height: i32,

    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default = "default_vertex_shader")]
    pub vertex_shader: PathBuf,

    #[serde(default = "default_fragment_shader")]
    pub fragment_shader: PathBuf,

    #[serde(default = "default_clear_color")]
    pub clear_color: [f32; 4],
}

fn default_window_position() -> String {
    "center".to_string()
}
fn default_width() -> i32 {
    SCREEN_WIDTH
}
fn default_height() -> i32 {
    SCREEN_HEIGHT
}
fn default_title() -> String {
    "OpenGL DOOM!".to_string()
}
fn default_vertex_shader() -> PathBuf {
    PathBuf::from(DEFAULT_VERTEX_SHADER)
}
fn default_fragment_shader() -> PathBuf {
    PathBuf::from(DEFAULT_FRAGMENT_SHADER)
}
fn default_clear_color() -> [f32; 4] {
    [0.9, 0.9, 0.9, 0.0]
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            fullscreen: false,
            window_position: default_window_position(),
            video_display: 0,
            screensaver_mode: false,
            width: default_width(),
            height: default_height(),
            title: default_title(),
            vertex_shader: default_vertex_shader(),
            fragment_shader: default_fragment_shader(),
            clear_color: default_clear_color(),
        }
    }
}

impl VideoConfig {
    /// Load and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, VideoError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| VideoError::io(path, e))?;
        Self::from_json_str(path, &text)
    }

    /// Parse and validate JSON text; `origin` is only used in error messages.
    pub fn from_json_str(origin: impl AsRef<Path>, text: &str) -> Result<Self, VideoError> {
        let origin = origin.as_ref();
        let cfg: VideoConfig = serde_json::from_str(text).map_err(|e| VideoError::Json {
            path: origin.to_path_buf(),
            source: e,
        })?;
        cfg.validate(origin)?;
        Ok(cfg)
    }

    fn validate(&self, origin: &Path) -> Result<(), VideoError> {
        let invalid = |msg: &str| VideoError::InvalidConfig {
            path: origin.to_path_buf(),
            msg: msg.to_string(),
        };

        if self.width <= 0 || self.height <= 0 {
            return Err(invalid("width/height must be > 0"));
        }
        if self.vertex_shader.as_os_str().is_empty() {
            return Err(invalid("vertex_shader is empty"));
        }
        if self.fragment_shader.as_os_str().is_empty() {
            return Err(invalid("fragment_shader is empty"));
        }
        Ok(())
    }

    pub fn placement(&self) -> WindowPlacementConfig {
        WindowPlacementConfig {
            fullscreen: self.fullscreen,
            target_display: self.video_display,
            position: self.window_position.clone(),
        }
    }

    /// Write the live placement state back, so a later save keeps the display the window
    /// ended up on.
    pub fn absorb_placement(&mut self, placement: &WindowPlacementConfig) {
        self.fullscreen = placement.fullscreen;
        self.video_display = placement.target_display;
        self.window_position = placement.position.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_uses_defaults() {
        let cfg = VideoConfig::from_json_str("inline.json", "{}").unwrap();
        assert_eq!(cfg, VideoConfig::default());
        assert_eq!(cfg.window_position, "center");
        assert_eq!((cfg.width, cfg.height), (320, 200));
        assert_eq!(cfg.vertex_shader, PathBuf::from("shaders/vert.glsl"));
    }

    #[test]
    fn placement_projection_round_trips() {
        let mut cfg = VideoConfig::from_json_str(
            "inline.json",
            r#"{ "fullscreen": true, "window_position": "10,20", "video_display": 2 }"#,
        )
        .unwrap();
        let mut p = cfg.placement();
        assert!(p.fullscreen);
        assert_eq!(p.target_display, 2);
        assert_eq!(p.position, "10,20");

        p.target_display = 0;
        cfg.absorb_placement(&p);
        assert_eq!(cfg.video_display, 0);
    }

    #[test]
    fn zero_size_is_rejected() {
        let err = VideoConfig::from_json_str("inline.json", r#"{ "width": 0 }"#).unwrap_err();
        assert!(matches!(err, VideoError::InvalidConfig { .. }), "got: {err}");
    }

    #[test]
    fn unknown_key_is_a_json_error() {
        let err =
            VideoConfig::from_json_str("inline.json", r#"{ "fulscreen": true }"#).unwrap_err();
        assert!(matches!(err, VideoError::Json { .. }), "got: {err}");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = VideoConfig::load("/definitely/not/here/video.json").unwrap_err();
        assert!(matches!(err, VideoError::Io { .. }), "got: {err}");
    }
}
