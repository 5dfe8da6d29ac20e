use rayon::prelude::*;

use super::camera::Camera;
use super::scene::ShadowScene;

/// Single-channel offscreen render target. Rows are stored bottom-up
/// (row 0 is the bottom of the image), as a GPU framebuffer would be.
pub struct OffscreenTarget {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl OffscreenTarget {
    pub fn new(width: usize, height: usize) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    #[inline(always)]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline(always)]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Reallocate for a new size; contents are cleared.
    pub fn resize(&mut self, width: usize, height: usize) {
        *self = Self::new(width, height);
    }

    /// Render `scene` through `camera`, sampling each pixel centre.
    pub fn render(&mut self, scene: &ShadowScene, camera: &Camera) {
        let (width, height) = (self.width as f64, self.height as f64);
        self.pixels
            .par_chunks_mut(self.width)
            .enumerate()
            .for_each(|(row, pixels)| {
                let ndc_y = (row as f64 + 0.5) / height * 2.0 - 1.0;
                for (col, pixel) in pixels.iter_mut().enumerate() {
                    let ndc_x = (col as f64 + 0.5) / width * 2.0 - 1.0;
                    *pixel = scene.shade(camera, ndc_x, ndc_y);
                }
            });
    }

    /// Read back one pixel; coordinates are clamped to the target.
    pub fn read_pixel(&self, x: usize, row: usize) -> u8 {
        let x = x.min(self.width - 1);
        let row = row.min(self.height - 1);
        self.pixels[row * self.width + x]
    }
}
