/// Sky background with a few point sources, row-major `width * height`.
pub fn star_field(width: usize, height: usize) -> Vec<f32> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");

    let stars = [(width / 4, height / 3, 900.0f32), (width / 2, height / 2, 4000.0)];
    let mut img = vec![0f32; width * height];
    for y in 0..height {
        for x in 0..width {
            let mut v = 100.0 + ((x * 7 + y * 13) % 11) as f32 * 0.5;
            for &(sx, sy, flux) in &stars {
                let dx = x as f32 - sx as f32;
                let dy = y as f32 - sy as f32;
                v += flux * (-(dx * dx + dy * dy) / 4.0).exp();
            }
            img[y * width + x] = v;
        }
    }
    img
}

/// Mask with `bits` set on the outer `border` pixels and zero elsewhere.
pub fn border_mask(width: usize, height: usize, border: usize, bits: u32) -> Vec<f32> {
    let mut mask = vec![0f32; width * height];
    for y in 0..height {
        for x in 0..width {
            if x < border || y < border || x + border >= width || y + border >= height {
                mask[y * width + x] = bits as f32;
            }
        }
    }
    mask
}
