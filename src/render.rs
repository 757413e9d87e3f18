/*!
# Frame rendering

Rendering is an optional side product of the synthesis: each frame may be
exported as an annotated grayscale raster `<index>noisy_particle.jpeg`.

Two renderers implement [`Render`]:

- [`GrayRenderer`] writes the frame with a colorbar strip using the `image` crate,
- `ChartRenderer` (`plot` feature) draws the frame with `plotters`, including
  the colorbar values and a bold `frame: <index>` label.
*/

use std::path::{Path, PathBuf};

use nalgebra::DMatrix;

mod gray;
pub use gray::GrayRenderer;
#[cfg(feature = "plot")]
mod chart;
#[cfg(feature = "plot")]
pub use chart::ChartRenderer;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to create image buffer")]
    Buffer,
    #[error("failed to save frame to {1:?}")]
    Save(#[source] image::ImageError, PathBuf),
    #[error("failed to draw frame: {0}")]
    Plot(String),
}

/// Frame exporter
pub trait Render {
    /// Renders frame # `index` into `filename`
    fn render(&self, index: usize, frame: &DMatrix<f64>, filename: &Path)
        -> Result<(), RenderError>;
}

/// File name of frame # `index` in directory `path`
pub fn frame_filename(path: impl AsRef<Path>, index: usize) -> PathBuf {
    path.as_ref().join(format!("{index}noisy_particle.jpeg"))
}

/// Minimum and maximum values of a frame
pub fn extrema(frame: &DMatrix<f64>) -> (f64, f64) {
    frame
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), &x| {
            (min.min(x), max.max(x))
        })
}

/// Gray level of `value` within `[min,max]`, black at `min`
pub(crate) fn gray_level(value: f64, (min, max): (f64, f64)) -> (u8, u8, u8) {
    let range = max - min;
    let u = if range > 0. {
        ((value - min) / range).clamp(0., 1.)
    } else {
        0.5
    };
    colorous::GREYS.eval_continuous(1. - u).as_tuple()
}

/// Renderer used when none is given to the synthesizer
#[cfg(feature = "plot")]
pub fn default_renderer() -> Box<dyn Render> {
    Box::new(ChartRenderer::default())
}
/// Renderer used when none is given to the synthesizer
#[cfg(not(feature = "plot"))]
pub fn default_renderer() -> Box<dyn Render> {
    Box::new(GrayRenderer::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename() {
        assert_eq!(
            frame_filename("frames", 12),
            Path::new("frames").join("12noisy_particle.jpeg")
        );
    }

    #[test]
    fn frame_extrema() {
        let frame = DMatrix::from_row_slice(2, 2, &[0.5, -1.25, 3., 0.]);
        assert_eq!(extrema(&frame), (-1.25, 3.));
    }

    #[test]
    fn gray_scale_ends() {
        let (r0, g0, b0) = gray_level(-1., (-1., 1.));
        let (r1, g1, b1) = gray_level(1., (-1., 1.));
        assert!(r0 < r1 && g0 < g1 && b0 < b1);
        assert_eq!(gray_level(3., (3., 3.)), gray_level(0., (-1., 1.)));
    }
}
