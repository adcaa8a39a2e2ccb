use gl::types::GLenum;
use thiserror::Error;

use crate::texture::Texture2D;

pub struct FrameBuffer {
    id: u32,
    depth: RenderBuffer,
}

impl FrameBuffer {
    /// Colour texture plus a depth renderbuffer of the same size.
    pub fn with_depth(texture: &Texture2D) -> Result<Self, FramebufferError> {
        let depth = RenderBuffer::new(
            gl::DEPTH_COMPONENT,
            texture.width(),
            texture.height(),
        );

        let mut id = 0;

        unsafe {
            gl::GenFramebuffers(1, (&mut id) as *mut u32);
            gl::BindFramebuffer(gl::FRAMEBUFFER, id);
        }

        let fb = Self { id, depth };

        let status = unsafe {
            gl::FramebufferTexture2D(
                gl::FRAMEBUFFER,
                gl::COLOR_ATTACHMENT0,
                gl::TEXTURE_2D,
                texture.id,
                0,
            );

            gl::FramebufferRenderbuffer(
                gl::FRAMEBUFFER,
                gl::DEPTH_ATTACHMENT,
                gl::RENDERBUFFER,
                fb.depth.id,
            );

            let status = gl::CheckFramebufferStatus(gl::FRAMEBUFFER);
            gl::BindFramebuffer(gl::FRAMEBUFFER, 0);
            status
        };

        if status != gl::FRAMEBUFFER_COMPLETE {
            return Err(FramebufferError::Incomplete(status));
        }

        tracing::debug!(
            id = fb.id,
            width = texture.width(),
            height = texture.height(),
            "created framebuffer"
        );

        Ok(fb)
    }

    pub fn bind(&self) {
        unsafe {
            gl::BindFramebuffer(gl::FRAMEBUFFER, self.id);
        }
    }

    pub fn bind_default() {
        unsafe {
            gl::BindFramebuffer(gl::FRAMEBUFFER, 0);
        }
    }

    /// Copies the colour attachment onto the default framebuffer.
    pub fn blit_to_default(&self, src: (u32, u32), dst: (u32, u32)) {
        unsafe {
            gl::BindFramebuffer(gl::READ_FRAMEBUFFER, self.id);
            gl::BindFramebuffer(gl::DRAW_FRAMEBUFFER, 0);
            gl::BlitFramebuffer(
                0,
                0,
                src.0 as i32,
                src.1 as i32,
                0,
                0,
                dst.0 as i32,
                dst.1 as i32,
                gl::COLOR_BUFFER_BIT,
                gl::NEAREST,
            );
        }

        Self::bind_default();
    }
}

impl Drop for FrameBuffer {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteFramebuffers(1, (&self.id) as *const u32);
        }
    }
}

pub struct RenderBuffer {
    id: u32,
}

impl RenderBuffer {
    pub fn new(format: GLenum, width: u32, height: u32) -> Self {
        let mut id = 0;

        unsafe {
            gl::GenRenderbuffers(1, (&mut id) as *mut u32);
            gl::BindRenderbuffer(gl::RENDERBUFFER, id);
            gl::RenderbufferStorage(gl::RENDERBUFFER, format, width as i32, height as i32);
            gl::BindRenderbuffer(gl::RENDERBUFFER, 0);
        }

        Self { id }
    }
}

impl Drop for RenderBuffer {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteRenderbuffers(1, (&self.id) as *const u32);
        }
    }
}

#[derive(Debug, Error)]
pub enum FramebufferError {
    #[error("framebuffer is incomplete (status {0:#x})")]
    Incomplete(GLenum),
}
