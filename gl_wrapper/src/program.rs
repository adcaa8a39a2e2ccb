use gl::types::{GLint, GLuint};
use std::ffi::{c_char, CString};
use thiserror::Error;

use crate::shader::{compile_shader, info_log_to_string, ShaderError, ShaderStage};

pub struct ProgramBuilder<'a> {
    vert: &'a str,
    frag: &'a str,
}

impl<'a> ProgramBuilder<'a> {
    pub fn new(vert_src: &'a str, frag_src: &'a str) -> Self {
        Self {
            vert: vert_src,
            frag: frag_src,
        }
    }

    pub fn build(self) -> Result<Program, ProgramError> {
        let vert = compile_shader(self.vert, ShaderStage::Vertex)?;
        let frag = compile_shader(self.frag, ShaderStage::Fragment)?;

        let program = unsafe {
            let id = gl::CreateProgram();
            gl::AttachShader(id, vert.id());
            gl::AttachShader(id, frag.id());
            gl::LinkProgram(id);

            Program { id }
        };

        let mut success: i32 = 0;
        unsafe {
            gl::GetProgramiv(program.id, gl::LINK_STATUS, (&mut success) as *mut i32);
        }

        if success != gl::TRUE as i32 {
            let mut len: i32 = 0;
            let mut buf;

            unsafe {
                gl::GetProgramiv(program.id, gl::INFO_LOG_LENGTH, (&mut len) as *mut i32);
                buf = vec![0_u8; len.max(1) as usize];
                gl::GetProgramInfoLog(
                    program.id,
                    buf.len() as i32,
                    std::ptr::null_mut(),
                    buf.as_mut_ptr() as *mut c_char,
                );
            }

            return Err(ProgramError::Linking(info_log_to_string(&buf)));
        }

        unsafe {
            gl::DetachShader(program.id, vert.id());
            gl::DetachShader(program.id, frag.id());
        }

        tracing::debug!(id = program.id, "linked program");

        Ok(program)
    }
}

#[derive(Debug, Error)]
pub enum ProgramError {
    #[error(transparent)]
    Shader(#[from] ShaderError),
    #[error("failed to link program: {0}")]
    Linking(String),
    #[error("no active uniform named \"{0}\"")]
    MissingUniform(String),
}

pub struct Program {
    id: GLuint,
}

impl Program {
    pub fn id(&self) -> GLuint {
        self.id
    }

    pub fn uniform_location(&self, name: &str) -> Result<GLint, ProgramError> {
        let c_name =
            CString::new(name).map_err(|_| ProgramError::MissingUniform(name.to_owned()))?;

        let location = unsafe { gl::GetUniformLocation(self.id, c_name.as_ptr()) };

        if location < 0 {
            return Err(ProgramError::MissingUniform(name.to_owned()));
        }

        Ok(location)
    }

    /// Binds the program, uniforms are per program state.
    pub fn set_i32(&self, name: &str, value: i32) -> Result<(), ProgramError> {
        let location = self.uniform_location(name)?;

        unsafe {
            gl::UseProgram(self.id);
            gl::Uniform1i(location, value);
        }

        Ok(())
    }

    pub fn set_vec3(&self, name: &str, value: [f32; 3]) -> Result<(), ProgramError> {
        let location = self.uniform_location(name)?;

        unsafe {
            gl::UseProgram(self.id);
            gl::Uniform3f(location, value[0], value[1], value[2]);
        }

        Ok(())
    }
}

impl Drop for Program {
    fn drop(&mut self) {
        unsafe { gl::DeleteProgram(self.id) }
    }
}
