use std::path::Path;

use image::{ImageBuffer, Rgb, RgbImage};
use nalgebra::DMatrix;

use super::{extrema, gray_level, Render, RenderError};

/// Grayscale raster writer
///
/// Each frame sample is drawn as a `pixel_size` wide square and a vertical
/// colorbar, maximum on top, is appended to the right of the frame.
/// No frame label is drawn; use `ChartRenderer` (`plot` feature) for the
/// annotated rendering.
#[derive(Debug, Clone)]
pub struct GrayRenderer {
    pub pixel_size: u32,
    pub colorbar_width: u32,
    pub colorbar_gap: u32,
}
impl Default for GrayRenderer {
    fn default() -> Self {
        Self {
            pixel_size: 32,
            colorbar_width: 24,
            colorbar_gap: 12,
        }
    }
}
impl GrayRenderer {
    /// Rasterizes the frame and its colorbar
    pub fn to_image(&self, frame: &DMatrix<f64>) -> Result<RgbImage, RenderError> {
        let (rows, cols) = frame.shape();
        let minmax = extrema(frame);
        let width = cols as u32 * self.pixel_size + self.colorbar_gap + self.colorbar_width;
        let height = rows as u32 * self.pixel_size;
        if width == 0 || height == 0 {
            return Err(RenderError::Buffer);
        }
        let bar_start = cols as u32 * self.pixel_size + self.colorbar_gap;
        let white = Rgb([255u8; 3]);
        let image = ImageBuffer::from_fn(width, height, |x, y| {
            let (r, g, b) = if x < cols as u32 * self.pixel_size {
                let (i, j) = ((y / self.pixel_size) as usize, (x / self.pixel_size) as usize);
                gray_level(frame[(i, j)], minmax)
            } else if x >= bar_start {
                let (min, max) = minmax;
                let u = 1. - (y as f64 + 0.5) / height as f64;
                gray_level(min + u * (max - min), minmax)
            } else {
                return white;
            };
            Rgb([r, g, b])
        });
        Ok(image)
    }
}
impl Render for GrayRenderer {
    fn render(
        &self,
        _index: usize,
        frame: &DMatrix<f64>,
        filename: &Path,
    ) -> Result<(), RenderError> {
        self.to_image(frame)?
            .save(filename)
            .map_err(|e| RenderError::Save(e, filename.to_path_buf()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::frame_filename;

    #[test]
    fn image_layout() {
        let frame = DMatrix::from_row_slice(2, 3, &[0., 1., 2., 3., 4., 5.]);
        let renderer = GrayRenderer {
            pixel_size: 4,
            colorbar_width: 2,
            colorbar_gap: 1,
        };
        let image = renderer.to_image(&frame).unwrap();
        assert_eq!(image.dimensions(), (3 * 4 + 1 + 2, 2 * 4));
        // darkest sample top-left, brightest bottom-right
        let dark = image.get_pixel(0, 0)[0];
        let bright = image.get_pixel(11, 7)[0];
        assert!(dark < bright);
        assert_eq!(image.get_pixel(12, 0), &Rgb([255u8; 3]));
        // colorbar maximum on top
        assert!(image.get_pixel(13, 0)[0] > image.get_pixel(13, 7)[0]);
    }

    #[test]
    fn save_jpeg() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let frame = DMatrix::from_fn(9, 9, |i, j| (i + j) as f64);
        let filename = frame_filename(dir.path(), 0);
        GrayRenderer::default().render(0, &frame, &filename)?;
        let image = image::open(&filename)?;
        assert_eq!(image.width(), 9 * 32 + 12 + 24);
        assert_eq!(image.height(), 9 * 32);
        Ok(())
    }

    #[test]
    fn save_failure() {
        let frame = DMatrix::from_fn(3, 3, |i, j| (i * j) as f64);
        let filename = Path::new("no/such/directory/0noisy_particle.jpeg");
        assert!(matches!(
            GrayRenderer::default().render(0, &frame, filename),
            Err(RenderError::Save(..))
        ));
    }
}
