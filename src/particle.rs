/*!
# Particle profile

A particle is a square array of intensities following a radially symmetric
Gaussian-like falloff:

```text
I(d) = exp(-(d - mu)² / (2 sigma²))
```

where `d` is the distance of a grid sample to the center of the box.
The peak value 1 is reached on the ring of radius `mu`.
*/

use nalgebra::DMatrix;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ParticleError {
    #[error("particle width (sigma) must be finite and non-zero, found {0}")]
    InvalidSigma(f64),
    #[error("particle resolution must be positive")]
    ZeroResolution,
    #[error("particle box size must be an odd positive integer, found {0}")]
    InvalidBoxSize(usize),
}
type Result<T> = std::result::Result<T, ParticleError>;

/// Geometry of a particle profile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleGeometry {
    /// spatial extent of the box: `[-(box_size-1)/2, (box_size-1)/2]`
    pub box_size: usize,
    /// number of samples per axis
    pub resolution: usize,
    /// radius of the peak intensity
    pub mu: f64,
    /// width of the falloff
    pub sigma: f64,
}

/// Geometry of the spot used by the frame synthesizer
pub const SPOT_GEOMETRY: ParticleGeometry = ParticleGeometry {
    box_size: 7,
    resolution: 7,
    mu: 0.0,
    sigma: 6.7 / 4.0,
};

impl Default for ParticleGeometry {
    fn default() -> Self {
        SPOT_GEOMETRY
    }
}
impl ParticleGeometry {
    pub fn new(box_size: usize, resolution: usize, mu: f64, sigma: f64) -> Self {
        Self {
            box_size,
            resolution,
            mu,
            sigma,
        }
    }
    fn validate(&self) -> Result<()> {
        if self.box_size == 0 || self.box_size % 2 == 0 {
            return Err(ParticleError::InvalidBoxSize(self.box_size));
        }
        if self.resolution == 0 {
            return Err(ParticleError::ZeroResolution);
        }
        if self.sigma == 0.0 || !self.sigma.is_finite() {
            return Err(ParticleError::InvalidSigma(self.sigma));
        }
        Ok(())
    }
    /// Evenly spaced samples over `[-half, half]`
    ///
    /// A single sample sits at `-half`.
    fn axis(&self) -> Vec<f64> {
        let half = ((self.box_size - 1) / 2) as f64;
        let n = self.resolution;
        if n == 1 {
            return vec![-half];
        }
        let step = 2. * half / (n - 1) as f64;
        (0..n)
            .map(|i| if i == n - 1 { half } else { -half + i as f64 * step })
            .collect()
    }
}

/// Radially symmetric intensity profile
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    geometry: ParticleGeometry,
    data: DMatrix<f64>,
}
impl Particle {
    /// Creates the particle profile for the given geometry
    pub fn new(geometry: ParticleGeometry) -> Result<Self> {
        geometry.validate()?;
        let ParticleGeometry { mu, sigma, .. } = geometry;
        let axis = geometry.axis();
        let n = geometry.resolution;
        let two_sigma_sqr = 2. * sigma * sigma;
        let data = DMatrix::from_fn(n, n, |i, j| {
            let (x, y) = (axis[j], axis[i]);
            let d = (x * x + y * y).sqrt();
            (-(d - mu).powi(2) / two_sigma_sqr).exp()
        });
        log::info!("{n}x{n} Gaussian-like particle created");
        Ok(Self { geometry, data })
    }
    /// The geometry the particle was built from
    pub fn geometry(&self) -> &ParticleGeometry {
        &self.geometry
    }
    /// Number of samples per axis
    pub fn size(&self) -> usize {
        self.data.nrows()
    }
    pub fn data(&self) -> &DMatrix<f64> {
        &self.data
    }
    pub fn into_inner(self) -> DMatrix<f64> {
        self.data
    }
    /// Maximum intensity and its `(row, col)` location (first one in row-major order)
    pub fn peak(&self) -> (f64, (usize, usize)) {
        let n = self.size();
        (0..n)
            .flat_map(|i| (0..n).map(move |j| (i, j)))
            .fold((f64::NEG_INFINITY, (0, 0)), |(max, ij), (i, j)| {
                let v = self.data[(i, j)];
                if v > max {
                    (v, (i, j))
                } else {
                    (max, ij)
                }
            })
    }
}

/// Creates a `resolution x resolution` particle profile
pub fn create_particle(
    box_size: usize,
    resolution: usize,
    mu: f64,
    sigma: f64,
) -> Result<DMatrix<f64>> {
    Particle::new(ParticleGeometry::new(box_size, resolution, mu, sigma)).map(Particle::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_sample() {
        let g = create_particle(1, 1, 0., 1.).unwrap();
        assert_eq!(g.shape(), (1, 1));
        assert_eq!(g[(0, 0)], 1.0);
    }

    #[test]
    fn single_sample_off_center() {
        // a lone sample sits at the lower bound of the box, (-2,-2)
        let g = create_particle(5, 1, 0., 1.).unwrap();
        assert_eq!(g.shape(), (1, 1));
        assert!((g[(0, 0)] - (-4f64).exp()).abs() < 1e-12);
    }

    #[test]
    fn spot_shape_and_peak() {
        let particle = Particle::new(SPOT_GEOMETRY).unwrap();
        assert_eq!(particle.size(), 7);
        let (max, ij) = particle.peak();
        assert_eq!(max, 1.0);
        assert_eq!(ij, (3, 3));
        assert!(particle.data().iter().all(|&v| v > 0. && v <= 1.));
    }

    #[test]
    fn radial_symmetry() {
        let g = create_particle(9, 9, 0., 0.5).unwrap();
        for i in 0..9 {
            for j in 0..9 {
                assert_eq!(g[(i, j)], g[(j, i)]);
                assert_eq!(g[(i, j)], g[(8 - i, j)]);
                assert_eq!(g[(i, j)], g[(i, 8 - j)]);
            }
        }
    }

    #[test]
    fn ring_peak() {
        // samples fall on integer coordinates, so the ring of radius 2 is hit exactly
        let g = create_particle(7, 7, 2., 0.8).unwrap();
        assert_eq!(g[(3, 1)], 1.0);
        assert_eq!(g[(3, 5)], 1.0);
        assert_eq!(g[(1, 3)], 1.0);
        assert!(g[(3, 3)] < 1.0);
        let max = g.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(max, 1.0);
    }

    #[test]
    fn oversampled_axis() {
        let g = create_particle(3, 5, 0., 1.).unwrap();
        assert_eq!(g.shape(), (5, 5));
        // corner at (-1,-1)
        let expected = (-(2f64).sqrt().powi(2) / 2.).exp();
        assert!((g[(0, 0)] - expected).abs() < 1e-12);
        // midpoint between corner and edge center at (-0.5,-1)
        let expected = (-1.25f64 / 2.).exp();
        assert!((g[(0, 1)] - expected).abs() < 1e-12);
    }

    #[test]
    fn idempotent() {
        let a = create_particle(7, 7, 0.3, 1.2).unwrap();
        let b = create_particle(7, 7, 0.3, 1.2).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn invalid_geometry() {
        assert_eq!(
            create_particle(7, 7, 0., 0.),
            Err(ParticleError::InvalidSigma(0.))
        );
        assert_eq!(
            create_particle(7, 0, 0., 1.),
            Err(ParticleError::ZeroResolution)
        );
        assert_eq!(
            create_particle(6, 7, 0., 1.),
            Err(ParticleError::InvalidBoxSize(6))
        );
        assert_eq!(
            create_particle(0, 7, 0., 1.),
            Err(ParticleError::InvalidBoxSize(0))
        );
    }
}
