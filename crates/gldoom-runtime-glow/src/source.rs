use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use gldoom_core::VideoError;

/// Largest shader source accepted is one byte less than this.
pub const SHADER_SOURCE_CAPACITY: usize = 2048;

/// Read a shader source file whose length must stay below `capacity` bytes.
///
/// Oversized files are rejected, never truncated.
pub fn read_shader_source(path: impl AsRef<Path>, capacity: usize) -> Result<String, VideoError> {
    let path = path.as_ref();
    let io_err = |source| VideoError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(io_err)?;

    // Reading `capacity` bytes is enough to tell an oversized file apart.
    let mut buf = Vec::with_capacity(capacity);
    BufReader::new(file)
        .take(capacity as u64)
        .read_to_end(&mut buf)
        .map_err(io_err)?;

    if buf.len() >= capacity {
        return Err(VideoError::ShaderTooLarge {
            path: path.to_path_buf(),
            len_at_least: buf.len(),
            capacity,
        });
    }

    String::from_utf8(buf).map_err(|_| VideoError::ShaderEncoding {
        path: path.to_path_buf(),
    })
}
