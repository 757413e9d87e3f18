//! Additive Gaussian noise

use nalgebra::DMatrix;
use rand::{rngs::StdRng, Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum NoiseError {
    #[error("invalid noise distribution N({mean},{sigma}²)")]
    InvalidSigma { mean: f64, sigma: f64 },
}

/// Creates the random number generator owned by a synthesis run
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Adds a fresh sample of N(`mean`,`sigma`²) noise to `base`
///
/// The samples are drawn row after row and `base` is left untouched.
/// A zero `sigma` adds exactly `mean` to every element.
pub fn inject_noise<R: Rng + ?Sized>(
    base: &DMatrix<f64>,
    mean: f64,
    sigma: f64,
    rng: &mut R,
) -> Result<DMatrix<f64>, NoiseError> {
    if !(sigma >= 0.) || !sigma.is_finite() || !mean.is_finite() {
        return Err(NoiseError::InvalidSigma { mean, sigma });
    }
    let normal = Normal::new(mean, sigma).map_err(|_| NoiseError::InvalidSigma { mean, sigma })?;
    let (rows, cols) = base.shape();
    let gauss = DMatrix::from_row_iterator(
        rows,
        cols,
        (0..rows * cols).map(|_| normal.sample(&mut *rng)),
    );
    Ok(base + gauss)
}
