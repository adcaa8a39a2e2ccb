use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use png::{ColorType, Transformations};
use thiserror::Error;

/// 8 bit pixels with 3 or 4 channels, first row is the bottom of the image.
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub channels: u8,
    pub pixels: Vec<u8>,
}

pub fn load_png<P: AsRef<Path>>(path: P) -> Result<DecodedImage, ImageError> {
    let file = File::open(path).map_err(ImageError::Io)?;

    decode_png(BufReader::new(file))
}

pub fn decode_png<R: Read>(src: R) -> Result<DecodedImage, ImageError> {
    let mut decoder = png::Decoder::new(src);
    decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);

    let mut reader = decoder.read_info()?;
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf)?;
    buf.truncate(info.buffer_size());

    let (pixels, channels) = match info.color_type {
        ColorType::Rgb => (buf, 3),
        ColorType::Rgba => (buf, 4),
        ColorType::Grayscale => (expand_gray(&buf, false), 3),
        ColorType::GrayscaleAlpha => (expand_gray(&buf, true), 4),
        ColorType::Indexed => return Err(ImageError::Unsupported(info.color_type)),
    };

    let mut image = DecodedImage {
        width: info.width,
        height: info.height,
        channels,
        pixels,
    };

    // GL expects the first row at the bottom
    flip_rows(&mut image.pixels, (image.width * channels as u32) as usize);

    Ok(image)
}

fn expand_gray(src: &[u8], alpha: bool) -> Vec<u8> {
    if alpha {
        src.chunks_exact(2)
            .flat_map(|p| [p[0], p[0], p[0], p[1]])
            .collect()
    } else {
        src.iter().flat_map(|g| [*g, *g, *g]).collect()
    }
}

fn flip_rows(pixels: &mut [u8], row_len: usize) {
    if row_len == 0 {
        return;
    }

    let rows = pixels.len() / row_len;

    for i in 0..rows / 2 {
        let (top, bottom) = pixels.split_at_mut((rows - 1 - i) * row_len);
        top[i * row_len..(i + 1) * row_len].swap_with_slice(&mut bottom[..row_len]);
    }
}

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("{0}")]
    Io(std::io::Error),
    #[error("{0}")]
    Decoding(#[from] png::DecodingError),
    #[error("unsupported color type {0:?}")]
    Unsupported(ColorType),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(width: u32, height: u32, color: ColorType, data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, width, height);
            encoder.set_color(color);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(data).unwrap();
        }
        out
    }

    #[test]
    fn rows_flipped() {
        let mut pixels = vec![1, 1, 2, 2, 3, 3];
        flip_rows(&mut pixels, 2);
        assert_eq!(pixels, vec![3, 3, 2, 2, 1, 1]);

        let mut even = vec![1, 2, 3, 4];
        flip_rows(&mut even, 1);
        assert_eq!(even, vec![4, 3, 2, 1]);
    }

    #[test]
    fn gray_expanded() {
        assert_eq!(expand_gray(&[7, 9], false), vec![7, 7, 7, 9, 9, 9]);
        assert_eq!(expand_gray(&[7, 200], true), vec![7, 7, 7, 200]);
    }

    #[test]
    fn decode_rgba_bottom_row_first() {
        #[rustfmt::skip]
        let data = [
            255, 0, 0, 255,    0, 255, 0, 255,
            0, 0, 255, 128,    9, 9, 9, 0,
        ];
        let image = decode_png(encode(2, 2, ColorType::Rgba, &data).as_slice()).unwrap();

        assert_eq!((image.width, image.height, image.channels), (2, 2, 4));
        assert_eq!(&image.pixels[..8], &data[8..]);
        assert_eq!(&image.pixels[8..], &data[..8]);
    }

    #[test]
    fn decode_gray_as_rgb() {
        let image = decode_png(encode(3, 1, ColorType::Grayscale, &[0, 128, 255]).as_slice())
            .unwrap();

        assert_eq!(image.channels, 3);
        assert_eq!(image.pixels, vec![0, 0, 0, 128, 128, 128, 255, 255, 255]);
    }

    #[test]
    fn garbage_rejected() {
        let res = decode_png(&b"not a png"[..]);

        assert!(matches!(res, Err(ImageError::Decoding(_))));
    }
}
