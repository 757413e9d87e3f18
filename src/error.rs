use crate::{
    canvas::CanvasError, frames::FramesError, noise::NoiseError, particle::ParticleError,
    render::RenderError,
};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Error in the `particle` module")]
    Particle(#[from] ParticleError),
    #[error("Error in the `noise` module")]
    Noise(#[from] NoiseError),
    #[error("Error in the `canvas` module")]
    Canvas(#[from] CanvasError),
    #[error("Error in the `frames` module")]
    Frames(#[from] FramesError),
    #[error("Error in the `render` module")]
    Render(#[from] RenderError),
}
