//! Zero canvas with a particle placed at its center

use nalgebra::DMatrix;

use crate::Particle;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CanvasError {
    #[error("canvas of size {array_size} cannot hold a particle of size {particle_size}")]
    TooSmall {
        array_size: usize,
        particle_size: usize,
    },
}

/// Square canvas holding a single particle
///
/// The particle of size `p` fills the cells `[array_size/2 - p/2, array_size/2 - p/2 + p)`
/// on both axes. For an odd `p` it is centered on cell `array_size/2`.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas(DMatrix<f64>);
impl Canvas {
    pub fn new(array_size: usize, particle: &Particle) -> Result<Self, CanvasError> {
        let particle_size = particle.size();
        let (start, end) = Self::window(array_size, particle_size).ok_or(CanvasError::TooSmall {
            array_size,
            particle_size,
        })?;
        let mut canvas = DMatrix::<f64>::zeros(array_size, array_size);
        canvas
            .view_mut((start, start), (end - start, end - start))
            .copy_from(particle.data());
        log::debug!("particle placed in canvas window [{start},{end})");
        Ok(Self(canvas))
    }
    /// Placement window `[start, end)` of a particle on a canvas axis
    pub fn window(array_size: usize, particle_size: usize) -> Option<(usize, usize)> {
        let position = array_size / 2;
        let start = position.checked_sub(particle_size / 2)?;
        let end = start + particle_size;
        (end <= array_size).then_some((start, end))
    }
    pub fn size(&self) -> usize {
        self.0.nrows()
    }
    pub fn data(&self) -> &DMatrix<f64> {
        &self.0
    }
    pub fn into_inner(self) -> DMatrix<f64> {
        self.0
    }
}
