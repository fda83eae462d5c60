//! OpenGL Shaders
//!
//! This module defines the [`Shader`] and [`ShaderProgram`] structs for managing OpenGL shaders,
//! and [`ShaderSource`] for reading shader code from disk.

use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
    sync::Arc,
};

use glow::HasContext;

/// The pipeline stage a shader is compiled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    /// The OpenGL enum passed to `glCreateShader`.
    pub fn gl_enum(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Everything that can go wrong while building a shader program.
#[derive(Debug)]
pub enum ShaderError {
    /// The source file could not be opened or read.
    Open {
        stage: ShaderStage,
        path: PathBuf,
        source: io::Error,
    },
    /// The driver refused to hand out a shader or program object.
    Create(String),
    /// Compilation failed; carries the driver's info log.
    Compile { stage: ShaderStage, log: String },
    /// Linking failed; carries the driver's info log.
    Link(String),
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderError::Open { stage, path, source } => write!(
                f,
                "A shader could not be opened! ({stage} shader at {}: {source})",
                path.display()
            ),
            ShaderError::Create(e) => write!(f, "could not create shader object: {e}"),
            ShaderError::Compile { stage, log } => {
                write!(f, "{stage} shader failed to compile: {}", log.trim_end())
            }
            ShaderError::Link(log) => write!(f, "shader program failed to link: {}", log.trim_end()),
        }
    }
}

impl std::error::Error for ShaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShaderError::Open { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Shader code read from a file, tagged with the stage it is meant for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    pub stage: ShaderStage,
    pub code: String,
}

impl ShaderSource {
    /// Reads the whole file at `path`.
    pub fn load(stage: ShaderStage, path: impl AsRef<Path>) -> Result<Self, ShaderError> {
        let path = path.as_ref();
        let code = fs::read_to_string(path).map_err(|source| ShaderError::Open {
            stage,
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("read {} bytes of {stage} shader from {}", code.len(), path.display());
        Ok(Self { stage, code })
    }
}

/// Represents an individual OpenGL shader.
pub struct Shader {
    gl: Arc<glow::Context>,
    id: glow::Shader,
}

impl Shader {
    /// Compiles a new shader from the given source code.
    pub fn new(gl: &Arc<glow::Context>, source: &ShaderSource) -> Result<Self, ShaderError> {
        unsafe {
            let shader = gl
                .create_shader(source.stage.gl_enum())
                .map_err(ShaderError::Create)?;
            gl.shader_source(shader, &source.code);
            gl.compile_shader(shader);

            if !gl.get_shader_compile_status(shader) {
                let log = gl.get_shader_info_log(shader);
                gl.delete_shader(shader);
                return Err(ShaderError::Compile {
                    stage: source.stage,
                    log,
                });
            }

            Ok(Self {
                gl: Arc::clone(gl),
                id: shader,
            })
        }
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_shader(self.id);
        }
    }
}

/// Represents an OpenGL shader program composed of multiple shaders.
pub struct ShaderProgram {
    gl: Arc<glow::Context>,
    id: glow::Program,
}

impl ShaderProgram {
    /// Links a new shader program from the given shaders.
    pub fn new(gl: &Arc<glow::Context>, shaders: &[&Shader]) -> Result<Self, ShaderError> {
        unsafe {
            let program = gl.create_program().map_err(ShaderError::Create)?;

            for shader in shaders {
                gl.attach_shader(program, shader.id);
            }

            gl.link_program(program);

            if !gl.get_program_link_status(program) {
                let log = gl.get_program_info_log(program);
                gl.delete_program(program);
                return Err(ShaderError::Link(log));
            }

            for shader in shaders {
                gl.detach_shader(program, shader.id);
            }

            Ok(Self {
                gl: Arc::clone(gl),
                id: program,
            })
        }
    }

    /// Reads, compiles and links a vertex/fragment pair, then makes the program current.
    ///
    /// The intermediate shader objects are deleted before this returns.
    pub fn from_files(
        gl: &Arc<glow::Context>,
        vertex_path: impl AsRef<Path>,
        fragment_path: impl AsRef<Path>,
    ) -> Result<Self, ShaderError> {
        let vertex_source = ShaderSource::load(ShaderStage::Vertex, vertex_path)?;
        let fragment_source = ShaderSource::load(ShaderStage::Fragment, fragment_path)?;

        let vertex = Shader::new(gl, &vertex_source)?;
        let fragment = Shader::new(gl, &fragment_source)?;
        let program = Self::new(gl, &[&vertex, &fragment])?;
        program.use_program();

        log::info!("linked shader program {:?}", program.id);
        Ok(program)
    }

    /// Binds the shader program for use.
    pub fn use_program(&self) {
        unsafe {
            self.gl.use_program(Some(self.id));
        }
    }

    /// Points a sampler uniform at the given texture unit.
    pub fn set_sampler(&self, name: &str, unit: i32) {
        unsafe {
            if let Some(location) = self.gl.get_uniform_location(self.id, name) {
                self.gl.uniform_1_i32(Some(&location), unit);
            }
        }
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_program(self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_file(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("rainbow-triangle-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_stage_gl_enum() {
        assert_eq!(ShaderStage::Vertex.gl_enum(), glow::VERTEX_SHADER);
        assert_eq!(ShaderStage::Fragment.gl_enum(), glow::FRAGMENT_SHADER);
    }

    #[test]
    fn test_load_reads_whole_file() {
        let code = "#version 330 core\nvoid main() {\n    gl_Position = vec4(0.0);\n}\n";
        let path = scratch_file("whole.vs", code);
        let source = ShaderSource::load(ShaderStage::Vertex, &path).unwrap();
        assert_eq!(source.stage, ShaderStage::Vertex);
        assert_eq!(source.code, code);
        assert!(!source.code.ends_with('\0'));
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("rainbow-triangle-does-not-exist/shader.fs");
        let err = ShaderSource::load(ShaderStage::Fragment, &path).unwrap_err();
        match &err {
            ShaderError::Open { stage, path: p, source } => {
                assert_eq!(*stage, ShaderStage::Fragment);
                assert_eq!(p, &path);
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert!(err.to_string().starts_with("A shader could not be opened!"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_error_messages() {
        let compile = ShaderError::Compile {
            stage: ShaderStage::Vertex,
            log: "0:1(1): error: syntax error\n".to_string(),
        };
        assert_eq!(
            compile.to_string(),
            "vertex shader failed to compile: 0:1(1): error: syntax error"
        );
        let link = ShaderError::Link("missing main\n".to_string());
        assert_eq!(link.to_string(), "shader program failed to link: missing main");
        assert!(std::error::Error::source(&link).is_none());
    }
}
