use gl::types::{GLenum, GLuint};
use std::ffi::{c_char, CString};
use std::fmt::{Display, Formatter};
use thiserror::Error;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    fn gl_enum(&self) -> GLenum {
        match self {
            ShaderStage::Vertex => gl::VERTEX_SHADER,
            ShaderStage::Fragment => gl::FRAGMENT_SHADER,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        }
    }
}

impl Display for ShaderStage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Compiled shader object, deleted on drop.
pub struct Shader {
    id: GLuint,
}

impl Shader {
    pub fn id(&self) -> GLuint {
        self.id
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        unsafe { gl::DeleteShader(self.id) }
    }
}

pub fn compile_shader(source: &str, stage: ShaderStage) -> Result<Shader, ShaderError> {
    let source = CString::new(source).map_err(|_| ShaderError::InvalidSource(stage))?;

    let shader = unsafe {
        let id = gl::CreateShader(stage.gl_enum());

        gl::ShaderSource(
            id,
            1,
            (&source.as_ptr()) as *const *const c_char,
            std::ptr::null(),
        );
        gl::CompileShader(id);

        Shader { id }
    };

    let mut success: i32 = 0;
    unsafe {
        gl::GetShaderiv(shader.id, gl::COMPILE_STATUS, (&mut success) as *mut i32);
    }

    if success != gl::TRUE as i32 {
        let mut len: i32 = 0;
        let mut buf;

        unsafe {
            gl::GetShaderiv(shader.id, gl::INFO_LOG_LENGTH, (&mut len) as *mut i32);
            buf = vec![0_u8; len.max(1) as usize];
            gl::GetShaderInfoLog(
                shader.id,
                buf.len() as i32,
                std::ptr::null_mut(),
                buf.as_mut_ptr() as *mut c_char,
            );
        }

        return Err(ShaderError::Compilation(stage, info_log_to_string(&buf)));
    }

    tracing::debug!(stage = stage.name(), id = shader.id, "compiled shader");

    Ok(shader)
}

/// Driver logs are NUL terminated, anything after the first NUL is garbage.
pub(crate) fn info_log_to_string(buf: &[u8]) -> String {
    let data = buf.split(|b| *b == 0).next().unwrap_or(buf);

    String::from_utf8_lossy(data).trim_end().to_string()
}

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("{0} shader source contains a NUL byte")]
    InvalidSource(ShaderStage),
    #[error("failed to compile {0} shader: {1}")]
    Compilation(ShaderStage, String),
}
