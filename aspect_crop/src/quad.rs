use crate::CropRect;

/// Floats per vertex: `vec3` position followed by `vec2` texture coordinate.
pub const VERTEX_STRIDE: usize = 5;

#[rustfmt::skip]
pub const QUAD_POSITIONS: [f32; 12] = [
    -1.0, 1.0, 0.0,
    1.0, 1.0, 0.0,
    -1.0, -1.0, 0.0,
    1.0, -1.0, 0.0,
];

#[rustfmt::skip]
pub const QUAD_INDICES: [u32; 6] = [
    0, 1, 2,
    1, 3, 2,
];

/// Full screen quad sampling `crop`, interleaved as position + texture coordinate.
pub fn textured_quad(crop: &CropRect) -> [f32; 4 * VERTEX_STRIDE] {
    let tex = crop.tex_coords();
    let mut data = [0.0; 4 * VERTEX_STRIDE];

    for (i, vertex) in data.chunks_exact_mut(VERTEX_STRIDE).enumerate() {
        vertex[..3].copy_from_slice(&QUAD_POSITIONS[i * 3..i * 3 + 3]);
        vertex[3..].copy_from_slice(&tex[i * 2..i * 2 + 2]);
    }

    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AspectRatio, CropRect};

    #[test]
    fn quad_interleaving() {
        let display = AspectRatio::new(16.0 / 9.0).unwrap();
        let image = AspectRatio::new(4.0 / 3.0).unwrap();
        let crop = CropRect::fit(display, image);
        let data = textured_quad(&crop);
        let tex = crop.tex_coords();

        for (i, vertex) in data.chunks_exact(VERTEX_STRIDE).enumerate() {
            assert_eq!(&vertex[..3], &QUAD_POSITIONS[i * 3..i * 3 + 3]);
            assert_eq!(&vertex[3..], &tex[i * 2..i * 2 + 2]);
        }
    }

    #[test]
    fn full_crop_maps_corners() {
        #[rustfmt::skip]
        let expected = [
            -1.0, 1.0, 0.0, 0.0, 1.0,
            1.0, 1.0, 0.0, 1.0, 1.0,
            -1.0, -1.0, 0.0, 0.0, 0.0,
            1.0, -1.0, 0.0, 1.0, 0.0,
        ];

        assert_eq!(textured_quad(&CropRect::FULL), expected);
    }

    #[test]
    fn indices_reference_quad_vertices() {
        assert!(QUAD_INDICES.iter().all(|i| (*i as usize) < QUAD_POSITIONS.len() / 3));
    }
}
