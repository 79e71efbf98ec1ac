//! Helpers shared by the transform tests

use fwt::Image;

pub const EPSILON: f32 = 5e-3;

pub fn init_logger() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Info)
        .try_init();
}

/// A deterministic image with gradients, edges and some texture
pub fn test_image(width: usize, height: usize) -> Image<f32> {
    Image::from_fn(width, height, |x, y| {
        let ramp = (x + 2 * y) as f32 * 0.5;
        let edge = if x > width / 3 { 40.0 } else { 0.0 };
        let texture = ((x * 7 + y * 11) % 13) as f32;
        ramp + edge + texture
    })
}

pub fn approx_eq(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() < eps
}

pub fn images_approx_eq(a: &Image<f32>, b: &Image<f32>, eps: f32) -> bool {
    if a.width() != b.width() || a.height() != b.height() {
        return false;
    }
    a.data()
        .iter()
        .zip(b.data())
        .all(|(x, y)| approx_eq(*x, *y, eps))
}
