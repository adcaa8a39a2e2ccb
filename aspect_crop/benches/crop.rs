use criterion::{black_box, criterion_group, criterion_main, Criterion};

use aspect_crop::quad::textured_quad;
use aspect_crop::{compute_crop, AspectRatio, CropRect};

pub fn crop_fit(c: &mut Criterion) {
    c.bench_function("compute_crop", |b| {
        b.iter(|| compute_crop(black_box(16.0 / 9.0), black_box(4.0 / 3.0)))
    });
}

pub fn quad_build(c: &mut Criterion) {
    let display = AspectRatio::from_dimensions(800, 600).unwrap();
    let image = AspectRatio::from_dimensions(800, 450).unwrap();
    let crop = CropRect::fit(display, image);

    c.bench_function("textured_quad", |b| b.iter(|| textured_quad(black_box(&crop))));
}

criterion_group!(benches, crop_fit, quad_build);
criterion_main!(benches);
