//! Shader program build pipeline: source loading, stage compilation,
//! program linking and cleanup.
//!
//! Compiled stages are link-time-only resources. [`ShaderProgram::link`]
//! takes both stages by value and they are deleted when the call returns,
//! whether linking succeeded or not. A [`ShaderProgram`] value therefore
//! always refers to a successfully linked program.

use gl::types::*;
use log::debug;
use std::ffi::{CString, NulError};
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::ptr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("cannot open shader source {}: {source}", path.display())]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{kind} shader compilation failed: {log}")]
    Compilation { kind: StageKind, log: String },
    #[error("shader program linking failed: {log}")]
    Linking { log: String },
    #[error("shader source contains a NUL byte: {0}")]
    Nul(#[from] NulError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageKind {
    Vertex,
    Fragment,
}

impl StageKind {
    pub fn gl_enum(self) -> GLenum {
        match self {
            StageKind::Vertex => gl::VERTEX_SHADER,
            StageKind::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageKind::Vertex => f.write_str("vertex"),
            StageKind::Fragment => f.write_str("fragment"),
        }
    }
}

/// Reads a shader source file line by line into one text blob, with a
/// single `\n` after every line including the last. CRLF input is
/// normalized in the process.
///
/// A file that cannot be opened is an error, never an empty string, so a
/// missing file stays distinguishable from a valid empty one.
pub fn load_source(path: impl AsRef<Path>) -> Result<String, ShaderError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ShaderError::FileNotFound {
        path: path.to_path_buf(),
        source,
    })?;

    let mut contents = String::new();
    for line in BufReader::new(file).lines() {
        let line = line.map_err(|source| ShaderError::FileNotFound {
            path: path.to_path_buf(),
            source,
        })?;
        contents.push_str(&line);
        contents.push('\n');
    }

    debug!("loaded shader source {}:\n{}", path.display(), contents);
    Ok(contents)
}

/// One compiled shader stage. Owns the underlying GL shader object and
/// deletes it on drop, so failed builds cannot leak stages.
pub struct CompiledStage {
    id: GLuint,
    kind: StageKind,
}

impl CompiledStage {
    /// Compiles `source` for the given stage. On failure the driver's
    /// full info log is captured into the error and the shader object is
    /// released, so a rejected stage can never reach the linker.
    pub fn compile(source: &str, kind: StageKind) -> Result<Self, ShaderError> {
        let c_source = CString::new(source.as_bytes())?;

        let id = unsafe { gl::CreateShader(kind.gl_enum()) };
        let stage = CompiledStage { id, kind };

        unsafe {
            gl::ShaderSource(id, 1, &c_source.as_ptr(), ptr::null());
            gl::CompileShader(id);
        }

        let mut success = 1;
        unsafe {
            gl::GetShaderiv(id, gl::COMPILE_STATUS, &mut success);
        }

        if success == 0 {
            let log = shader_info_log(id);
            return Err(ShaderError::Compilation { kind, log });
        }

        Ok(stage)
    }

    pub fn kind(&self) -> StageKind {
        self.kind
    }
}

impl Drop for CompiledStage {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteShader(self.id);
        }
    }
}

/// A linked, executable shader program. Existence of a value implies the
/// link succeeded; the GL program object is deleted on drop.
pub struct ShaderProgram {
    id: GLuint,
}

impl ShaderProgram {
    /// Loads, compiles and links the two stages from source files.
    pub fn from_files(
        vertex_path: impl AsRef<Path>,
        fragment_path: impl AsRef<Path>,
    ) -> Result<Self, ShaderError> {
        let vertex_source = load_source(vertex_path)?;
        let fragment_source = load_source(fragment_path)?;

        let vertex = CompiledStage::compile(&vertex_source, StageKind::Vertex)?;
        let fragment = CompiledStage::compile(&fragment_source, StageKind::Fragment)?;

        ShaderProgram::link(vertex, fragment)
    }

    /// Links two compiled stages into a program. Both stages are consumed
    /// and their shader objects deleted when this returns, on the success
    /// and the failure path alike.
    pub fn link(vertex: CompiledStage, fragment: CompiledStage) -> Result<Self, ShaderError> {
        let id = unsafe { gl::CreateProgram() };
        let program = ShaderProgram { id };

        unsafe {
            gl::AttachShader(id, vertex.id);
            gl::AttachShader(id, fragment.id);
            gl::LinkProgram(id);
        }

        let mut success = 1;
        unsafe {
            gl::GetProgramiv(id, gl::LINK_STATUS, &mut success);
        }

        if success == 0 {
            let log = program_info_log(id);
            return Err(ShaderError::Linking { log });
        }

        Ok(program)
    }

    pub fn id(&self) -> GLuint {
        self.id
    }

    pub fn set_used(&self) {
        unsafe {
            gl::UseProgram(self.id);
        }
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteProgram(self.id);
        }
    }
}

fn shader_info_log(id: GLuint) -> String {
    let mut len = 0;
    unsafe {
        gl::GetShaderiv(id, gl::INFO_LOG_LENGTH, &mut len);
    }

    let buffer = create_whitespace_cstring_with_len(len as usize);
    unsafe {
        gl::GetShaderInfoLog(id, len, ptr::null_mut(), buffer.as_ptr() as *mut GLchar);
    }

    buffer.to_string_lossy().trim_end().to_owned()
}

fn program_info_log(id: GLuint) -> String {
    let mut len = 0;
    unsafe {
        gl::GetProgramiv(id, gl::INFO_LOG_LENGTH, &mut len);
    }

    let buffer = create_whitespace_cstring_with_len(len as usize);
    unsafe {
        gl::GetProgramInfoLog(id, len, ptr::null_mut(), buffer.as_ptr() as *mut GLchar);
    }

    buffer.to_string_lossy().trim_end().to_owned()
}

fn create_whitespace_cstring_with_len(len: usize) -> CString {
    let mut buffer: Vec<u8> = Vec::with_capacity(len + 1);
    buffer.extend([b' '].iter().cycle().take(len));
    unsafe { CString::from_vec_unchecked(buffer) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn load_source_appends_trailing_newline() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("basic.vert");
        fs::write(&path, "#version 330 core\nvoid main() {}").unwrap();

        let text = load_source(&path).unwrap();
        assert_eq!(text, "#version 330 core\nvoid main() {}\n");
    }

    #[test]
    fn load_source_preserves_line_content_and_count() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("basic.frag");
        let body = "#version 330 core\nout vec4 FragColor;\n\nvoid main() {\n}\n";
        fs::write(&path, body).unwrap();

        let text = load_source(&path).unwrap();
        assert_eq!(text, body);
        assert_eq!(text.lines().count(), 5);
    }

    #[test]
    fn load_source_normalizes_crlf() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("windows.vert");
        fs::write(&path, "line one\r\nline two\r\n").unwrap();

        let text = load_source(&path).unwrap();
        assert_eq!(text, "line one\nline two\n");
    }

    #[test]
    fn load_source_empty_file_is_ok() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.glsl");
        fs::write(&path, "").unwrap();

        assert_eq!(load_source(&path).unwrap(), "");
    }

    #[test]
    fn load_source_missing_file_is_an_error() {
        let err = load_source("no/such/shader.glsl").unwrap_err();
        match err {
            ShaderError::FileNotFound { path, .. } => {
                assert_eq!(path, PathBuf::from("no/such/shader.glsl"));
            }
            other => panic!("expected FileNotFound, got {other:?}"),
        }
    }

    #[test]
    fn stage_kind_maps_to_gl_enums() {
        assert_eq!(StageKind::Vertex.gl_enum(), gl::VERTEX_SHADER);
        assert_eq!(StageKind::Fragment.gl_enum(), gl::FRAGMENT_SHADER);
    }

    #[test]
    fn compilation_error_display_carries_stage_and_log() {
        let err = ShaderError::Compilation {
            kind: StageKind::Fragment,
            log: "0:4: 'FragColour' : undeclared identifier".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("fragment"));
        assert!(msg.contains("undeclared identifier"));
    }

    #[test]
    fn linking_error_display_carries_log() {
        let err = ShaderError::Linking {
            log: "error: vertex shader lacks main()".to_string(),
        };
        assert!(err.to_string().contains("lacks main()"));
    }
}
