use std::fmt::{Display, Formatter};
use std::str::FromStr;

use thiserror::Error;

pub mod quad;

/// Width over height of a display or an image. Always positive and finite.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct AspectRatio(f32);

impl AspectRatio {
    pub fn new(ratio: f32) -> Result<Self, CropError> {
        if !ratio.is_finite() || ratio <= 0.0 {
            return Err(CropError::InvalidAspect(ratio));
        }

        Ok(Self(ratio))
    }

    pub fn from_dimensions(width: u32, height: u32) -> Result<Self, CropError> {
        if width == 0 || height == 0 {
            return Err(CropError::ZeroDimension(width, height));
        }

        Self::new(width as f32 / height as f32)
    }

    pub fn value(&self) -> f32 {
        self.0
    }
}

impl Display for AspectRatio {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{:.4}", self.0))
    }
}

/// Accepts `16:9`, `16/9` or a plain decimal like `1.7778`.
impl FromStr for AspectRatio {
    type Err = CropError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parse = |part: &str| {
            part.trim()
                .parse::<f32>()
                .map_err(|_| CropError::Parse(s.to_owned()))
        };

        match s.split_once(|c: char| c == ':' || c == '/') {
            Some((w, h)) => {
                let (w, h) = (parse(w)?, parse(h)?);

                if h == 0.0 {
                    return Err(CropError::Parse(s.to_owned()));
                }

                Self::new(w / h)
            }
            None => Self::new(parse(s)?),
        }
    }
}

///
/// Sub-region of a texture in normalized coordinates, centered in \[0,1]x\[0,1]
///
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CropRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl CropRect {
    pub const FULL: CropRect = CropRect {
        x: 0.0,
        y: 0.0,
        width: 1.0,
        height: 1.0,
    };

    /// Crops `image` so that it fills `display` without distortion.
    pub fn fit(display: AspectRatio, image: AspectRatio) -> Self {
        let (d, i) = (display.0, image.0);
        // extreme pairs underflow to zero, keep the crop non-empty
        let ratio = (d.min(i) / d.max(i)).max(f32::MIN_POSITIVE);

        let width = if d < i { ratio } else { 1.0 };
        let height = if d > i { ratio } else { 1.0 };

        Self {
            x: (1.0 - width) / 2.0,
            y: (1.0 - height) / 2.0,
            width,
            height,
        }
    }

    /// Corners in quad winding order: top-left, top-right, bottom-left, bottom-right.
    #[rustfmt::skip]
    pub fn tex_coords(&self) -> [f32; 8] {
        let (left, right) = (self.x, self.x + self.width);
        let (bottom, top) = (self.y, self.y + self.height);

        [
            left, top,
            right, top,
            left, bottom,
            right, bottom,
        ]
    }
}

pub fn compute_crop(display_aspect: f32, image_aspect: f32) -> Result<CropRect, CropError> {
    let display = AspectRatio::new(display_aspect)?;
    let image = AspectRatio::new(image_aspect)?;

    Ok(CropRect::fit(display, image))
}

#[derive(Debug, Error, PartialEq)]
pub enum CropError {
    #[error("aspect ratio must be positive and finite, got {0}")]
    InvalidAspect(f32),
    #[error("cannot derive aspect ratio from {0}x{1}")]
    ZeroDimension(u32, u32),
    #[error("cannot parse aspect ratio from \"{0}\"")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-6;

    const ASPECTS: [f32; 9] = [0.25, 0.5625, 0.75, 1.0, 4.0 / 3.0, 1.5, 16.0 / 9.0, 2.35, 8.0];

    #[test]
    fn equal_aspects_do_not_crop() {
        for a in ASPECTS {
            let crop = compute_crop(a, a).unwrap();

            assert_eq!(crop, CropRect::FULL);
        }
    }

    #[test]
    fn narrower_display_crops_width() {
        for a in ASPECTS {
            for b in ASPECTS.iter().copied().filter(|b| a < *b) {
                let crop = compute_crop(a, b).unwrap();
                assert_eq!(crop.width, a / b);
                assert_eq!(crop.height, 1.0);

                let swapped = compute_crop(b, a).unwrap();
                assert_eq!(swapped.height, a / b);
                assert_eq!(swapped.width, 1.0);
            }
        }
    }

    #[test]
    fn crop_stays_in_bounds_and_centered() {
        for a in ASPECTS {
            for b in ASPECTS {
                let crop = compute_crop(a, b).unwrap();

                assert!(crop.width > 0.0 && crop.width <= 1.0);
                assert!(crop.height > 0.0 && crop.height <= 1.0);
                assert!(crop.x >= 0.0 && crop.y >= 0.0);
                assert!(crop.x + crop.width <= 1.0);
                assert!(crop.y + crop.height <= 1.0);
                assert_eq!(crop.x, (1.0 - crop.width) / 2.0);
                assert_eq!(crop.y, (1.0 - crop.height) / 2.0);
            }
        }
    }

    #[test]
    fn extreme_aspects_keep_a_visible_crop() {
        let narrow = compute_crop(1e-30, 1e30).unwrap();
        assert!(narrow.width > 0.0);
        assert_eq!(narrow.height, 1.0);
        assert!(narrow.x + narrow.width <= 1.0);

        let flat = compute_crop(1e30, 1e-30).unwrap();
        assert!(flat.height > 0.0);
        assert_eq!(flat.width, 1.0);
        assert!(flat.y + flat.height <= 1.0);
    }

    #[test]
    fn wide_display_on_classic_image() {
        let crop = compute_crop(16.0 / 9.0, 4.0 / 3.0).unwrap();

        assert!((crop.height - 0.75).abs() < EPS);
        assert_eq!(crop.width, 1.0);
        assert!((crop.y - 0.125).abs() < EPS);
        assert_eq!(crop.x, 0.0);
    }

    #[test]
    fn classic_display_on_wide_image() {
        let display = AspectRatio::new(8.0 / 6.0).unwrap();
        let image = AspectRatio::from_dimensions(800, 450).unwrap();
        let crop = CropRect::fit(display, image);

        assert!((crop.width - 0.75).abs() < EPS);
        assert_eq!(crop.height, 1.0);
        assert!((crop.x - 0.125).abs() < EPS);
        assert_eq!(crop.y, 0.0);
    }

    #[test]
    fn invalid_aspects_are_rejected() {
        assert_eq!(compute_crop(0.0, 1.0), Err(CropError::InvalidAspect(0.0)));
        assert_eq!(compute_crop(1.0, -2.0), Err(CropError::InvalidAspect(-2.0)));
        assert!(compute_crop(f32::NAN, 1.0).is_err());
        assert!(compute_crop(1.0, f32::INFINITY).is_err());
        assert_eq!(
            AspectRatio::from_dimensions(800, 0),
            Err(CropError::ZeroDimension(800, 0))
        );
    }

    #[test]
    fn parse_aspect() {
        let hd: AspectRatio = "16:9".parse().unwrap();
        assert_eq!(hd.value(), 16.0 / 9.0);

        let sd: AspectRatio = " 8/6 ".parse().unwrap();
        assert_eq!(sd.value(), 8.0 / 6.0);

        let plain: AspectRatio = "1.5".parse().unwrap();
        assert_eq!(plain.value(), 1.5);

        assert!("0:9".parse::<AspectRatio>().is_err());
        assert!("16:0".parse::<AspectRatio>().is_err());
        assert!("-1".parse::<AspectRatio>().is_err());
        assert!("abc".parse::<AspectRatio>().is_err());
    }

    #[test]
    fn tex_coords_winding() {
        let crop = CropRect {
            x: 0.125,
            y: 0.0,
            width: 0.75,
            height: 1.0,
        };

        assert_eq!(
            crop.tex_coords(),
            [0.125, 1.0, 0.875, 1.0, 0.125, 0.0, 0.875, 0.0]
        );
    }
}
