use std::ffi::c_void;
use thiserror::Error;

pub struct Texture2D {
    pub(crate) id: u32,
    width: u32,
    height: u32,
}

impl Texture2D {
    pub fn new(
        width: u32,
        height: u32,
        data: &[u8],
        format: TextureFormat,
        filter: TextureFilter,
    ) -> Result<Self, TextureError> {
        check_src_len(width, height, data, format)?;

        let texture = Self::allocate(width, height, filter);
        texture.upload(Some(data), format);

        if filter.mipmapped() {
            unsafe { gl::GenerateMipmap(gl::TEXTURE_2D) }
        }

        Ok(texture)
    }

    /// Storage without initial contents, used as a render target.
    pub fn empty(width: u32, height: u32, format: TextureFormat, filter: TextureFilter) -> Self {
        let texture = Self::allocate(width, height, filter);
        texture.upload(None, format);

        texture
    }

    fn allocate(width: u32, height: u32, filter: TextureFilter) -> Self {
        let mut id = 0;

        unsafe {
            gl::GenTextures(1, (&mut id) as *mut u32);
            gl::BindTexture(gl::TEXTURE_2D, id);

            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, gl::CLAMP_TO_EDGE as i32);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, gl::CLAMP_TO_EDGE as i32);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, filter.min() as i32);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, filter.mag() as i32);
        }

        Self { id, width, height }
    }

    fn upload(&self, data: Option<&[u8]>, format: TextureFormat) {
        let ptr = data.map_or(std::ptr::null(), |d| d.as_ptr() as *const c_void);

        unsafe {
            gl::BindTexture(gl::TEXTURE_2D, self.id);
            // rows of RGB data are not 4 byte aligned
            gl::PixelStorei(gl::UNPACK_ALIGNMENT, 1);
            gl::TexImage2D(
                gl::TEXTURE_2D,
                0,
                format.internal() as i32,
                self.width as i32,
                self.height as i32,
                0,
                format.gl_format(),
                gl::UNSIGNED_BYTE,
                ptr,
            );
            gl::PixelStorei(gl::UNPACK_ALIGNMENT, 4);
        }
    }

    pub fn bind(&self, unit: u8) {
        unsafe {
            gl::ActiveTexture(gl::TEXTURE0 + unit as u32);
            gl::BindTexture(gl::TEXTURE_2D, self.id)
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

impl Drop for Texture2D {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteTextures(1, (&self.id) as *const u32);
        }
    }
}

fn check_src_len(
    width: u32,
    height: u32,
    data: &[u8],
    format: TextureFormat,
) -> Result<(), TextureError> {
    let expected = width as usize * height as usize * format.channels() as usize;

    if expected != data.len() {
        return Err(TextureError::InvalidSrcLength {
            expected,
            got: data.len(),
        });
    }

    Ok(())
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TextureError {
    #[error("Invalid source data length, expected {expected} bytes, got {got}")]
    InvalidSrcLength { expected: usize, got: usize },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TextureFormat {
    Rgb8,
    Rgba8,
}

impl TextureFormat {
    /// Four channels carry alpha, everything else is uploaded as RGB.
    pub fn from_channels(channels: u8) -> Self {
        match channels {
            4 => TextureFormat::Rgba8,
            _ => TextureFormat::Rgb8,
        }
    }

    pub fn channels(&self) -> u8 {
        match self {
            TextureFormat::Rgb8 => 3,
            TextureFormat::Rgba8 => 4,
        }
    }

    fn internal(&self) -> u32 {
        match self {
            TextureFormat::Rgb8 => gl::RGB8,
            TextureFormat::Rgba8 => gl::RGBA8,
        }
    }

    fn gl_format(&self) -> u32 {
        match self {
            TextureFormat::Rgb8 => gl::RGB,
            TextureFormat::Rgba8 => gl::RGBA,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TextureFilter {
    Linear,
    LinearMipmap,
}

impl TextureFilter {
    fn min(&self) -> u32 {
        match self {
            TextureFilter::Linear => gl::LINEAR,
            TextureFilter::LinearMipmap => gl::LINEAR_MIPMAP_LINEAR,
        }
    }

    fn mag(&self) -> u32 {
        match self {
            TextureFilter::Linear | TextureFilter::LinearMipmap => gl::LINEAR,
        }
    }

    fn mipmapped(&self) -> bool {
        matches!(self, TextureFilter::LinearMipmap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channels_to_format() {
        assert_eq!(TextureFormat::from_channels(4), TextureFormat::Rgba8);
        assert_eq!(TextureFormat::from_channels(3), TextureFormat::Rgb8);
        assert_eq!(TextureFormat::from_channels(1), TextureFormat::Rgb8);
    }

    #[test]
    fn src_len_checked_before_upload() {
        let data = [0_u8; 2 * 2 * 3];

        assert_eq!(check_src_len(2, 2, &data, TextureFormat::Rgb8), Ok(()));
        assert_eq!(
            check_src_len(2, 2, &data, TextureFormat::Rgba8),
            Err(TextureError::InvalidSrcLength {
                expected: 16,
                got: 12
            })
        );

        let res = Texture2D::new(3, 3, &data, TextureFormat::Rgb8, TextureFilter::Linear);
        assert!(matches!(
            res,
            Err(TextureError::InvalidSrcLength { expected: 27, .. })
        ));
    }
}
