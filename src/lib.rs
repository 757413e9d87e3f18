/*!
# Diffraction spot

Synthetic sequences of noisy frames of a single diffraction-like particle,
meant as validation data for particle detection and tracking pipelines.

## Key Components

- [`Particle`] - radially symmetric Gaussian-like intensity profile
- [`inject_noise`] - additive Gaussian noise
- [`Canvas`] - zero canvas with the particle at its center
- [`FrameSynthesizer`] - reproducible sequence of noisy [`Frames`]
- [`Render`] - optional export of the frames as annotated rasters

## Usage

```rust,no_run
use diffraction_spot::synthesize;

// 5 frames of 21x21 pixels, noise std of 0.25, no rendering
let frames = synthesize(5, 0.25, 21, "none", 1)?;
assert_eq!(frames.len(), 5);
# Ok::<(), diffraction_spot::Error>(())
```
*/

pub mod canvas;
mod error;
pub mod frames;
pub mod noise;
pub mod particle;
pub mod render;

pub use canvas::{Canvas, CanvasError};
pub use error::Error;
pub use frames::{synthesize, Accumulation, FrameSynthesizer, Frames, FramesError};
pub use noise::{inject_noise, seeded_rng, NoiseError};
pub use particle::{create_particle, Particle, ParticleError, ParticleGeometry, SPOT_GEOMETRY};
pub use render::{frame_filename, GrayRenderer, Render, RenderError};
#[cfg(feature = "plot")]
pub use render::ChartRenderer;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_conversion() {
        let e: Error = ParticleError::ZeroResolution.into();
        assert!(matches!(e, Error::Particle(ParticleError::ZeroResolution)));
        let e: Error = synthesize(-3, 0., 9, "none", 1).unwrap_err().into();
        assert!(matches!(
            e,
            Error::Frames(FramesError::NegativeFrameCount(-3))
        ));
    }
}
