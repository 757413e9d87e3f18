/*!
# Noisy frame synthesis

A [`FrameSynthesizer`] places the [`SPOT_GEOMETRY`] particle at the center of
a zero canvas and derives each frame by adding an independent sample of
Gaussian noise to the canvas.
The random number generator is owned by the synthesis call and seeded once,
so a given set of parameters always yields the same [`Frames`].

```rust,no_run
use diffraction_spot::FrameSynthesizer;

let frames = FrameSynthesizer::new(10, 0.2, 21)
    .seed(7)
    .save_path("frames")
    .synthesize()?;
println!("{} frames, extrema: {:?}", frames.len(), frames.extrema());
# Ok::<(), diffraction_spot::FramesError>(())
```
*/

use std::{
    collections::BTreeMap,
    ops::Deref,
    path::{Path, PathBuf},
    time::Instant,
};

use indicatif::{ProgressBar, ProgressStyle};
use nalgebra::DMatrix;

use crate::{
    canvas::{Canvas, CanvasError},
    noise::{inject_noise, seeded_rng, NoiseError},
    particle::{Particle, ParticleError, SPOT_GEOMETRY},
    render::{default_renderer, frame_filename, Render},
};

#[derive(Debug, thiserror::Error)]
pub enum FramesError {
    #[error("the number of frames cannot be negative, found {0}")]
    NegativeFrameCount(i64),
    #[error("failed to create the particle")]
    Particle(#[from] ParticleError),
    #[error("failed to place the particle")]
    Canvas(#[from] CanvasError),
    #[error("failed to add noise")]
    Noise(#[from] NoiseError),
    #[error("invalid progress bar template")]
    Progress(#[from] indicatif::style::TemplateError),
}
type Result<T> = std::result::Result<T, FramesError>;

/// How the canvas contributes to a frame
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Accumulation {
    /// `canvas + noise + canvas`: the particle is added twice
    #[default]
    Doubled,
    /// `canvas + noise`
    Single,
}

/// Noisy frames indexed by frame number
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Frames(BTreeMap<usize, DMatrix<f64>>);
impl Deref for Frames {
    type Target = BTreeMap<usize, DMatrix<f64>>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
impl IntoIterator for Frames {
    type Item = (usize, DMatrix<f64>);
    type IntoIter = std::collections::btree_map::IntoIter<usize, DMatrix<f64>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
impl Frames {
    pub fn into_inner(self) -> BTreeMap<usize, DMatrix<f64>> {
        self.0
    }
    /// Global minimum and maximum over all the frames
    pub fn extrema(&self) -> Option<(f64, f64)> {
        self.values()
            .map(crate::render::extrema)
            .reduce(|(min0, max0), (min1, max1)| (min0.min(min1), max0.max(max1)))
    }
    /// Sum of all the frames (long exposure)
    pub fn sum(&self) -> Option<DMatrix<f64>> {
        let mut frames = self.values();
        let first = frames.next()?.clone();
        Some(frames.fold(first, |s, f| s + f))
    }
}

/// Noisy particle frames generator
pub struct FrameSynthesizer {
    n_frames: usize,
    noise_sigma: f64,
    array_size: usize,
    seed: u64,
    save_path: Option<PathBuf>,
    accumulation: Accumulation,
    renderer: Box<dyn Render>,
}
impl FrameSynthesizer {
    /// Creates a generator of `n_frames` frames of size `array_size x array_size`
    /// with noise of standard deviation `noise_sigma`
    pub fn new(n_frames: usize, noise_sigma: f64, array_size: usize) -> Self {
        Self {
            n_frames,
            noise_sigma,
            array_size,
            seed: 1,
            save_path: None,
            accumulation: Accumulation::default(),
            renderer: default_renderer(),
        }
    }
    /// Seeds the random number generator
    pub fn seed(self, seed: u64) -> Self {
        Self { seed, ..self }
    }
    /// Sets the directory the frames are rendered into
    ///
    /// Rendering is skipped if the path is not an existing directory.
    pub fn save_path<P: AsRef<Path>>(self, path: P) -> Self {
        Self {
            save_path: Some(path.as_ref().to_path_buf()),
            ..self
        }
    }
    pub fn accumulation(self, accumulation: Accumulation) -> Self {
        Self {
            accumulation,
            ..self
        }
    }
    pub fn renderer<R: Render + 'static>(self, renderer: R) -> Self {
        Self {
            renderer: Box::new(renderer),
            ..self
        }
    }
    fn render_dir(&self) -> Option<&Path> {
        let path = self.save_path.as_deref()?;
        if path.is_dir() {
            Some(path)
        } else {
            log::debug!("{path:?} is not a directory, frames are not rendered");
            None
        }
    }
    /// Generates the frames
    pub fn synthesize(&self) -> Result<Frames> {
        if !(self.noise_sigma >= 0.) || !self.noise_sigma.is_finite() {
            return Err(NoiseError::InvalidSigma {
                mean: 0.,
                sigma: self.noise_sigma,
            }
            .into());
        }
        let particle = Particle::new(SPOT_GEOMETRY)?;
        let canvas = Canvas::new(self.array_size, &particle)?;
        let render_dir = self.render_dir();

        log::info!(
            "Synthesizing {} {}x{} frames (noise std: {}, seed: {})...",
            self.n_frames,
            self.array_size,
            self.array_size,
            self.noise_sigma,
            self.seed
        );
        let now = Instant::now();

        let pb = ProgressBar::new(self.n_frames as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")?
                .progress_chars("#>-"),
        );
        pb.set_message("Synthesizing frames");

        let mut rng = seeded_rng(self.seed);
        let mut frames = BTreeMap::new();
        for index in 0..self.n_frames {
            let noisy = inject_noise(canvas.data(), 0., self.noise_sigma, &mut rng)?;
            let frame = match self.accumulation {
                Accumulation::Doubled => noisy + canvas.data(),
                Accumulation::Single => noisy,
            };
            if let Some(dir) = render_dir {
                let filename = frame_filename(dir, index);
                match self.renderer.render(index, &frame, &filename) {
                    Ok(_) => log::debug!("frame #{index} saved to {filename:?}"),
                    Err(e) => log::warn!("frame #{index} not saved: {e}"),
                }
            }
            frames.insert(index, frame);
            pb.inc(1);
        }
        pb.finish_with_message("Frames synthesized");

        log::info!("... done in {}ms", now.elapsed().as_millis());
        Ok(Frames(frames))
    }
}

/// Generates `n_frames` noisy particle frames
///
/// The frames are rendered into `save_path` if it is an existing directory.
pub fn synthesize<P: AsRef<Path>>(
    n_frames: i64,
    noise_sigma: f64,
    array_size: usize,
    save_path: P,
    seed: u64,
) -> Result<Frames> {
    let n_frames =
        usize::try_from(n_frames).map_err(|_| FramesError::NegativeFrameCount(n_frames))?;
    FrameSynthesizer::new(n_frames, noise_sigma, array_size)
        .seed(seed)
        .save_path(save_path)
        .synthesize()
}
